use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 舊出缺勤系統：學生 → 日期 → 是否出席
#[derive(Debug, Default)]
pub struct AttendanceSystem {
    records: Mutex<HashMap<String, BTreeMap<NaiveDate, bool>>>,
}

impl AttendanceSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, BTreeMap<NaiveDate, bool>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 同一學生同一天重複登記時覆寫舊值
    pub fn mark_attendance(&self, student_id: &str, date: NaiveDate, present: bool) {
        let previous = self
            .records()
            .entry(student_id.to_string())
            .or_default()
            .insert(date, present);

        if previous.is_some() {
            tracing::debug!("Overwrote attendance for {} on {}", student_id, date);
        }
    }

    pub fn attendance_on(&self, student_id: &str, date: NaiveDate) -> Option<bool> {
        self.records()
            .get(student_id)
            .and_then(|days| days.get(&date).copied())
    }

    /// 出席天數比例（0.0 ~ 1.0）
    pub fn attendance_rate(&self, student_id: &str) -> Option<f64> {
        let records = self.records();
        let days = records.get(student_id).filter(|days| !days.is_empty())?;
        let present = days.values().filter(|present| **present).count();
        Some(present as f64 / days.len() as f64)
    }

    /// 所有學生的登記筆數總和
    pub fn record_count(&self) -> usize {
        self.records().values().map(BTreeMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_mark_and_query() {
        let system = AttendanceSystem::new();
        system.mark_attendance("STU001", date("2026-02-11"), true);

        assert_eq!(system.attendance_on("STU001", date("2026-02-11")), Some(true));
        assert_eq!(system.attendance_on("STU001", date("2026-02-12")), None);
        assert_eq!(system.attendance_on("STU002", date("2026-02-11")), None);
    }

    #[test]
    fn test_last_write_wins() {
        let system = AttendanceSystem::new();
        system.mark_attendance("STU001", date("2026-02-11"), true);
        system.mark_attendance("STU001", date("2026-02-11"), false);

        assert_eq!(system.record_count(), 1);
        assert_eq!(system.attendance_on("STU001", date("2026-02-11")), Some(false));
    }

    #[test]
    fn test_attendance_rate() {
        let system = AttendanceSystem::new();
        assert_eq!(system.attendance_rate("STU001"), None);

        system.mark_attendance("STU001", date("2026-02-09"), true);
        system.mark_attendance("STU001", date("2026-02-10"), false);
        system.mark_attendance("STU001", date("2026-02-11"), true);
        system.mark_attendance("STU001", date("2026-02-12"), true);

        assert_eq!(system.attendance_rate("STU001"), Some(0.75));
    }
}
