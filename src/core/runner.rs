use crate::core::app::UnifiedApplication;
use crate::domain::model::AdapterResult;
use serde::{Deserialize, Serialize};

/// 請求要走哪一個入口
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    #[default]
    Integrate,
    Perform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub system: String,
    pub data: String,
    #[serde(default)]
    pub operation: Operation,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestOutcome {
    pub system: String,
    pub data: String,
    pub operation: Operation,
    pub result: AdapterResult,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenarioReport {
    pub outcomes: Vec<RequestOutcome>,
    pub succeeded: usize,
    pub failed: usize,
}

impl ScenarioReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// 依序執行一批請求並彙整結果
pub struct ScenarioRunner<'a> {
    app: &'a UnifiedApplication,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(app: &'a UnifiedApplication) -> Self {
        Self { app }
    }

    pub fn run_one(&self, request: &ScenarioRequest) -> AdapterResult {
        match request.operation {
            Operation::Integrate => self.app.integrate_system(&request.system, &request.data),
            Operation::Perform => self.app.perform_operation(&request.system, &request.data),
        }
    }

    pub fn run(&self, requests: &[ScenarioRequest]) -> ScenarioReport {
        tracing::info!("Running {} requests", requests.len());

        let mut report = ScenarioReport::default();
        for request in requests {
            let result = self.run_one(request);
            if result.is_success() {
                report.succeeded += 1;
            } else {
                report.failed += 1;
            }
            report.outcomes.push(RequestOutcome {
                system: request.system.clone(),
                data: request.data.clone(),
                operation: request.operation,
                result,
            });
        }

        tracing::info!(
            "Finished: {} succeeded, {} failed",
            report.succeeded,
            report.failed
        );
        report
    }
}
