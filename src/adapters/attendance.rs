use crate::domain::model::{AdapterResult, RequestData};
use crate::domain::ports::SystemAdapter;
use crate::legacy::AttendanceSystem;
use crate::utils::error::{Result, SchoolError};
use crate::utils::validation::{parse_bool_field, parse_date_field};

pub const ATTENDANCE_SYSTEM: &str = "Attendance System";

const REQUIRED_KEYS: [&str; 3] = ["studentId", "date", "status"];

fn has_shape(request: &RequestData) -> bool {
    request.has_required(&REQUIRED_KEYS)
}

pub struct AttendanceAdapter {
    system: AttendanceSystem,
}

impl AttendanceAdapter {
    pub fn new(system: AttendanceSystem) -> Self {
        Self { system }
    }

    /// 唯讀存取底層系統（查詢用）
    pub fn system(&self) -> &AttendanceSystem {
        &self.system
    }

    fn process(&self, request: &RequestData) -> Result<String> {
        let student_id = request.require("studentId")?;
        let date = parse_date_field("date", request.require("date")?)?;
        let present = parse_bool_field("status", request.require("status")?)?;

        self.system.mark_attendance(student_id, date, present);
        tracing::debug!(student_id, %date, present, "Attendance marked");

        Ok(format!(
            "Attendance marked for student {} on {}",
            student_id,
            date.format("%Y-%m-%d")
        ))
    }
}

impl Default for AttendanceAdapter {
    fn default() -> Self {
        Self::new(AttendanceSystem::new())
    }
}

impl SystemAdapter for AttendanceAdapter {
    fn system_name(&self) -> &str {
        ATTENDANCE_SYSTEM
    }

    fn validate_data(&self, data: &str) -> bool {
        has_shape(&RequestData::parse(data))
    }

    fn integrate_system(&self, data: &str) -> AdapterResult {
        let request = RequestData::parse(data);
        if !has_shape(&request) {
            tracing::warn!("{}: rejected malformed request '{}'", ATTENDANCE_SYSTEM, data);
            return AdapterResult::from_error(&SchoolError::InvalidFormat {
                system: ATTENDANCE_SYSTEM.to_string(),
            });
        }

        self.process(&request).into()
    }
}
