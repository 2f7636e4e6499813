use crate::domain::model::{AdapterResult, RequestData};
use crate::domain::ports::SystemAdapter;
use crate::legacy::GradingSystem;
use crate::utils::error::{Result, SchoolError};
use crate::utils::validation::parse_finite_f64_field;

pub const GRADING_SYSTEM: &str = "Grading System";

const REQUIRED_KEYS: [&str; 3] = ["studentId", "subject", "grade"];

fn has_shape(request: &RequestData) -> bool {
    request.has_required(&REQUIRED_KEYS)
}

pub struct GradingAdapter {
    system: GradingSystem,
}

impl GradingAdapter {
    pub fn new(system: GradingSystem) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &GradingSystem {
        &self.system
    }

    fn process(&self, request: &RequestData) -> Result<String> {
        let student_id = request.require("studentId")?;
        let subject = request.require("subject")?;
        let raw_grade = request.require("grade")?;
        let grade = parse_finite_f64_field("grade", raw_grade)?;

        self.system.record_grade(student_id, subject, grade)?;
        tracing::debug!(student_id, subject, grade, "Grade recorded");

        // 回傳原始字串，避免 95.0 被格式化成 95
        Ok(format!(
            "Grade {} recorded for {} in {}",
            raw_grade, student_id, subject
        ))
    }
}

impl Default for GradingAdapter {
    fn default() -> Self {
        Self::new(GradingSystem::new())
    }
}

impl SystemAdapter for GradingAdapter {
    fn system_name(&self) -> &str {
        GRADING_SYSTEM
    }

    fn validate_data(&self, data: &str) -> bool {
        has_shape(&RequestData::parse(data))
    }

    fn integrate_system(&self, data: &str) -> AdapterResult {
        let request = RequestData::parse(data);
        if !has_shape(&request) {
            tracing::warn!("{}: rejected malformed request '{}'", GRADING_SYSTEM, data);
            return AdapterResult::from_error(&SchoolError::InvalidFormat {
                system: GRADING_SYSTEM.to_string(),
            });
        }

        self.process(&request).into()
    }
}
