pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod legacy;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::{
    AttendanceAdapter, GradingAdapter, LibraryAdapter, ATTENDANCE_SYSTEM, GRADING_SYSTEM,
    LIBRARY_SYSTEM,
};
pub use config::ScenarioConfig;
pub use crate::core::{
    app::UnifiedApplication,
    runner::{Operation, ScenarioReport, ScenarioRequest, ScenarioRunner},
};
pub use domain::{
    model::{AdapterResult, RequestData, ResultKind},
    ports::SystemAdapter,
};
pub use legacy::{AttendanceSystem, GradingSystem, LibrarySystem};
pub use utils::error::{Result, SchoolError};
