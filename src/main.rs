use anyhow::Context;
use clap::Parser;
use utschooldata::config::cli::{CliConfig, Command, OutputFormat};
use utschooldata::utils::logger;
use utschooldata::utils::validation::Validate;
use utschooldata::{EnrollmentRecord, Engine, Result, RscriptEngine, SchoolDataError, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    let config = cli
        .runtime_config()
        .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    let package = config.package.clone();
    let session = Session::new(RscriptEngine::new(config), package);

    if let Err(e) = run(&cli.command, &session).await {
        tracing::error!("command failed: {}", e);
        eprintln!("Error: {}", e);
        eprintln!("Hint: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run<E: Engine>(command: &Command, session: &Session<E>) -> Result<()> {
    match command {
        Command::Years => {
            for year in session.get_available_years().await? {
                println!("{}", year);
            }
        }
        Command::Enr {
            end_year,
            format,
            output,
        } => {
            let records = session.fetch_enr(*end_year).await?;
            tracing::info!(
                "fetched {} enrollment rows for end year {}",
                records.len(),
                end_year
            );

            let rendered = render(&records, *format)?;
            match output {
                Some(path) => {
                    std::fs::write(path, rendered)?;
                    tracing::info!("wrote {}", path.display());
                }
                None => print!("{}", rendered),
            }
        }
        Command::Check => {
            let info = session.verify().await?;
            println!("R runtime: {}", info.r_version);
            println!("{} package: {}", session.package(), info.package_version);
        }
    }

    Ok(())
}

fn render(records: &[EnrollmentRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in records {
                writer.serialize(record)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| SchoolDataError::OutputError {
                    message: format!("could not flush CSV output: {}", e),
                })?;
            String::from_utf8(bytes).map_err(|e| SchoolDataError::OutputError {
                message: format!("CSV output is not UTF-8: {}", e),
            })
        }
        OutputFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(records)?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}
