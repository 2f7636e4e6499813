use crate::utils::error::{Result, SchoolError};
use chrono::NaiveDate;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SchoolError::ConfigError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(SchoolError::ConfigError {
            field: field_name.to_string(),
            message: format!("Unsupported value '{}'. Allowed: {}", value, allowed.join(", ")),
        });
    }
    Ok(())
}

fn conversion_error(field_name: &str, value: &str, expected: &str) -> SchoolError {
    SchoolError::ConversionError {
        field: field_name.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

/// 解析 true/false（不分大小寫）
pub fn parse_bool_field(field_name: &str, value: &str) -> Result<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(conversion_error(field_name, value, "a boolean (true/false)"))
    }
}

/// 解析有限浮點數，NaN 與無限大都視為轉換錯誤
pub fn parse_finite_f64_field(field_name: &str, value: &str) -> Result<f64> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(conversion_error(field_name, value, "a finite number")),
    }
}

pub fn parse_quantity_field(field_name: &str, value: &str) -> Result<u32> {
    let value = value.trim();
    value
        .parse::<u32>()
        .map_err(|_| conversion_error(field_name, value, "a non-negative integer"))
}

/// 只接受補零的 ISO 日期 `YYYY-MM-DD`：`2026-2-11`、`2026/02/11` 都視為轉換錯誤，
/// 因此回傳值格式化後與輸入字串完全相同
pub fn parse_date_field(field_name: &str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .filter(|date| date.format("%Y-%m-%d").to_string() == value)
        .ok_or_else(|| conversion_error(field_name, value, "a date (YYYY-MM-DD)"))
}
