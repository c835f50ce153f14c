pub mod rscript;
pub mod script;
pub mod session;

pub use crate::domain::model::EnrollmentRecord;
pub use crate::domain::ports::{ConfigProvider, Engine};
pub use crate::utils::error::Result;
