use crate::utils::error::{ErrorCategory, Result, SchoolError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 由 `key=value,key=value` 字串解析出的請求欄位
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestData {
    pub fields: HashMap<String, String>,
}

impl RequestData {
    /// 先以 `,` 切分，再以第一個 `=` 切分鍵值；鍵與值都會去除前後空白。
    /// 沒有 `=` 的片段會被忽略，重複的鍵以最後一個為準。
    pub fn parse(raw: &str) -> Self {
        let mut fields = HashMap::new();
        for pair in raw.split(',') {
            if let Some((key, value)) = pair.split_once('=') {
                let key = key.trim();
                if key.is_empty() {
                    continue;
                }
                fields.insert(key.to_string(), value.trim().to_string());
            }
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// 所有必要欄位都存在且非空
    pub fn has_required(&self, keys: &[&str]) -> bool {
        keys.iter()
            .all(|key| self.get(key).is_some_and(|value| !value.is_empty()))
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(SchoolError::MissingField {
                field: key.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Success,
    SystemNotFound,
    InvalidFormat,
    Conversion,
    DomainRule,
}

impl From<ErrorCategory> for ResultKind {
    fn from(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::Lookup => ResultKind::SystemNotFound,
            // 設定錯誤不會從轉接器流出，歸入格式錯誤
            ErrorCategory::Format | ErrorCategory::Configuration => ResultKind::InvalidFormat,
            ErrorCategory::Conversion => ResultKind::Conversion,
            ErrorCategory::DomainRule => ResultKind::DomainRule,
        }
    }
}

/// 轉接器回傳的結果：訊息字串是主要介面，`kind` 供程式判斷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterResult {
    pub kind: ResultKind,
    pub message: String,
}

impl AdapterResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Success,
            message: message.into(),
        }
    }

    pub fn from_error(error: &SchoolError) -> Self {
        Self {
            kind: error.category().into(),
            message: error.user_friendly_message(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == ResultKind::Success
    }
}

impl fmt::Display for AdapterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<Result<String>> for AdapterResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(message) => AdapterResult::success(message),
            Err(error) => AdapterResult::from_error(&error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_request() {
        let request = RequestData::parse("studentId=STU001,date=2026-02-11,status=true");
        assert_eq!(request.len(), 3);
        assert_eq!(request.get("studentId"), Some("STU001"));
        assert_eq!(request.get("date"), Some("2026-02-11"));
        assert_eq!(request.get("status"), Some("true"));
    }

    #[test]
    fn test_parse_trims_and_ignores_noise() {
        let request = RequestData::parse(" bookId = BOOK001 ,, garbage, action=add ");
        assert_eq!(request.len(), 2);
        assert_eq!(request.get("bookId"), Some("BOOK001"));
        assert_eq!(request.get("action"), Some("add"));
    }

    #[test]
    fn test_parse_last_write_wins() {
        let request = RequestData::parse("grade=70,grade=85");
        assert_eq!(request.get("grade"), Some("85"));
    }

    #[test]
    fn test_parse_value_keeps_extra_equals() {
        let request = RequestData::parse("note=a=b");
        assert_eq!(request.get("note"), Some("a=b"));
    }

    #[test]
    fn test_has_required_rejects_empty_values() {
        let request = RequestData::parse("studentId=,subject=Math");
        assert!(!request.has_required(&["studentId", "subject"]));
        assert!(request.has_required(&["subject"]));
        assert!(request.require("studentId").is_err());
    }

    #[test]
    fn test_adapter_result_from_error() {
        let error = SchoolError::BookUnavailable {
            book_id: "BOOK001".to_string(),
        };
        let result = AdapterResult::from_error(&error);
        assert_eq!(result.kind, ResultKind::DomainRule);
        assert_eq!(result.to_string(), "Error: Book BOOK001 is unavailable");
        assert!(!result.is_success());
    }

    #[test]
    fn test_adapter_result_serializes_kind() {
        let result = AdapterResult::success("ok");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "success");
        assert_eq!(json["message"], "ok");
    }
}
