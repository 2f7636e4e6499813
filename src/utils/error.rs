use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchoolError {
    #[error("System '{name}' not found")]
    SystemNotFound { name: String },

    #[error("Invalid data format")]
    InvalidFormat { system: String },

    #[error("Invalid value for '{field}': '{value}' is not {expected}")]
    ConversionError {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Book {book_id} is unavailable")]
    BookUnavailable { book_id: String },

    #[error("Book {book_id} is already borrowed by student {student_id}")]
    AlreadyBorrowed { student_id: String, book_id: String },

    #[error("Book {book_id} is not borrowed by student {student_id}")]
    NotBorrowed { student_id: String, book_id: String },

    #[error("Cannot remove {requested} copies of book {book_id}: only {available} in stock")]
    InsufficientInventory {
        book_id: String,
        requested: u32,
        available: u32,
    },

    #[error("Cannot add {requested} copies of book {book_id}: {available} in stock would overflow")]
    InventoryOverflow {
        book_id: String,
        requested: u32,
        available: u32,
    },

    #[error("Grade {grade} is out of range (0-100)")]
    GradeOutOfRange { grade: f64 },

    #[error("Book {action} handles one copy at a time, got quantity {quantity}")]
    SingleCopyOnly { action: String, quantity: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigError { field: String, message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },
}

/// 錯誤分類，對應到 `ResultKind`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 找不到已註冊的系統
    Lookup,
    /// 請求格式不符
    Format,
    /// 欄位無法轉換成目標型別
    Conversion,
    /// 違反後端業務規則
    DomainRule,
    /// 設定或 IO 問題
    Configuration,
}

impl SchoolError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SchoolError::SystemNotFound { .. } => ErrorCategory::Lookup,
            SchoolError::InvalidFormat { .. } | SchoolError::MissingField { .. } => {
                ErrorCategory::Format
            }
            SchoolError::ConversionError { .. } => ErrorCategory::Conversion,
            SchoolError::BookUnavailable { .. }
            | SchoolError::AlreadyBorrowed { .. }
            | SchoolError::NotBorrowed { .. }
            | SchoolError::InsufficientInventory { .. }
            | SchoolError::InventoryOverflow { .. }
            | SchoolError::GradeOutOfRange { .. }
            | SchoolError::SingleCopyOnly { .. } => ErrorCategory::DomainRule,
            SchoolError::IoError(_) | SchoolError::ConfigError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Lookup => "Register an adapter for this system or check the system name",
            ErrorCategory::Format => "Send comma-separated key=value pairs with every required key",
            ErrorCategory::Conversion => "Check the field value type (number, true/false, YYYY-MM-DD)",
            ErrorCategory::DomainRule => "Check the current back-end state before retrying",
            ErrorCategory::Configuration => "Check the scenario file path and its TOML contents",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        format!("Error: {}", self)
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = SchoolError::SystemNotFound {
            name: "Cafeteria System".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Lookup);

        let err = SchoolError::BookUnavailable {
            book_id: "BOOK001".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::DomainRule);

        let err = SchoolError::ConversionError {
            field: "grade".to_string(),
            value: "abc".to_string(),
            expected: "a number".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Conversion);
    }

    #[test]
    fn test_user_friendly_message_has_error_prefix() {
        let err = SchoolError::InvalidFormat {
            system: "Grading System".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Error: Invalid data format");
    }
}
