use crate::core::runner::{Operation, ScenarioRequest};
use crate::utils::error::{Result, SchoolError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "school-hub")]
#[command(about = "Route key=value requests to attendance, grading and library systems")]
pub struct CliConfig {
    /// Target system name, e.g. "Grading System"
    #[arg(long, requires = "data")]
    pub system: Option<String>,

    /// Request payload, e.g. "studentId=STU001,subject=Mathematics,grade=95.5"
    #[arg(long, requires = "system")]
    pub data: Option<String>,

    /// Route the request through perform_operation instead of integrate_system
    #[arg(long)]
    pub query: bool,

    /// TOML scenario file with setup and a list of requests
    #[arg(long, conflicts_with_all = ["system", "data"])]
    pub scenario: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 命令列上的單一請求
    pub fn single_request(&self) -> Option<ScenarioRequest> {
        let (system, data) = (self.system.as_ref()?, self.data.as_ref()?);
        Some(ScenarioRequest {
            system: system.clone(),
            data: data.clone(),
            operation: if self.query {
                Operation::Perform
            } else {
                Operation::Integrate
            },
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.scenario.is_none() && self.single_request().is_none() {
            return Err(SchoolError::ConfigError {
                field: "request".to_string(),
                message: "Provide --system and --data, or --scenario <file>".to_string(),
            });
        }
        if let Some(system) = &self.system {
            validate_non_empty_string("system", system)?;
        }
        if let Some(path) = &self.scenario {
            validate_non_empty_string("scenario", path)?;
        }
        Ok(())
    }
}
