use crate::utils::error::{Result, SchoolError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

// 分數範圍是成績系統自己的業務規則：超出範圍的請求格式正確，仍回報 DomainRule 錯誤
pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 100.0;

/// 舊成績系統：學生 → 科目 → 分數
#[derive(Debug, Default)]
pub struct GradingSystem {
    grades: Mutex<HashMap<String, HashMap<String, f64>>>,
}

impl GradingSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn grades(&self) -> MutexGuard<'_, HashMap<String, HashMap<String, f64>>> {
        self.grades.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 分數必須介於 0 到 100；不合法時不會改動任何狀態
    pub fn record_grade(&self, student_id: &str, subject: &str, grade: f64) -> Result<()> {
        if !grade.is_finite() || !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Err(SchoolError::GradeOutOfRange { grade });
        }

        self.grades()
            .entry(student_id.to_string())
            .or_default()
            .insert(subject.to_string(), grade);
        Ok(())
    }

    pub fn grade_for(&self, student_id: &str, subject: &str) -> Option<f64> {
        self.grades()
            .get(student_id)
            .and_then(|subjects| subjects.get(subject).copied())
    }

    pub fn grades_for(&self, student_id: &str) -> HashMap<String, f64> {
        self.grades().get(student_id).cloned().unwrap_or_default()
    }

    /// 4.0 制 GPA，取各科績點的平均
    pub fn calculate_gpa(&self, student_id: &str) -> Option<f64> {
        let grades = self.grades();
        let subjects = grades.get(student_id).filter(|s| !s.is_empty())?;
        let total: f64 = subjects.values().map(|grade| grade_points(*grade)).sum();
        Some(total / subjects.len() as f64)
    }
}

fn grade_points(grade: f64) -> f64 {
    match grade {
        g if g >= 90.0 => 4.0,
        g if g >= 80.0 => 3.0,
        g if g >= 70.0 => 2.0,
        g if g >= 60.0 => 1.0,
        _ => 0.0,
    }
}
