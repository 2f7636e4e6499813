pub mod app;
pub mod runner;

pub use crate::domain::model::{AdapterResult, RequestData, ResultKind};
pub use crate::domain::ports::SystemAdapter;
pub use crate::utils::error::Result;
