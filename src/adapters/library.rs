use crate::domain::model::{AdapterResult, RequestData};
use crate::domain::ports::SystemAdapter;
use crate::legacy::LibrarySystem;
use crate::utils::error::{Result, SchoolError};
use crate::utils::validation::parse_quantity_field;

pub const LIBRARY_SYSTEM: &str = "Library System";

const REQUIRED_KEYS: [&str; 3] = ["bookId", "action", "quantity"];

fn has_shape(request: &RequestData) -> bool {
    if !request.has_required(&REQUIRED_KEYS) {
        return false;
    }

    // 無法辨識的 action 留給轉換階段處理
    match request.get("action").map(LibraryAction::parse) {
        Some(Ok(action)) if action.needs_student() => request.has_required(&["studentId"]),
        _ => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryAction {
    Borrow,
    Return,
    Add,
    Remove,
}

impl LibraryAction {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "borrow" => Ok(LibraryAction::Borrow),
            "return" => Ok(LibraryAction::Return),
            "add" => Ok(LibraryAction::Add),
            "remove" => Ok(LibraryAction::Remove),
            _ => Err(SchoolError::ConversionError {
                field: "action".to_string(),
                value: value.to_string(),
                expected: "one of borrow, return, add, remove".to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryAction::Borrow => "borrow",
            LibraryAction::Return => "return",
            LibraryAction::Add => "add",
            LibraryAction::Remove => "remove",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            LibraryAction::Borrow => "borrowed",
            LibraryAction::Return => "returned",
            LibraryAction::Add => "added",
            LibraryAction::Remove => "removed",
        }
    }

    /// 借還書會動到學生的借閱紀錄，需要 studentId
    pub fn needs_student(&self) -> bool {
        matches!(self, LibraryAction::Borrow | LibraryAction::Return)
    }
}

pub struct LibraryAdapter {
    system: LibrarySystem,
}

impl LibraryAdapter {
    pub fn new(system: LibrarySystem) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &LibrarySystem {
        &self.system
    }

    fn process(&self, request: &RequestData) -> Result<String> {
        let book_id = request.require("bookId")?;
        let action = LibraryAction::parse(request.require("action")?)?;
        let quantity = parse_quantity_field("quantity", request.require("quantity")?)?;

        match action {
            LibraryAction::Borrow | LibraryAction::Return => {
                if quantity != 1 {
                    return Err(SchoolError::SingleCopyOnly {
                        action: action.as_str().to_string(),
                        quantity,
                    });
                }
                let student_id = request.require("studentId")?;
                if action == LibraryAction::Borrow {
                    self.system.borrow_book(student_id, book_id)?;
                } else {
                    self.system.return_book(student_id, book_id)?;
                }
                tracing::debug!(student_id, book_id, action = action.as_str(), "Borrow record updated");
            }
            LibraryAction::Add => {
                let copies = self.system.add_copies(book_id, quantity)?;
                tracing::debug!(book_id, copies, "Inventory increased");
            }
            LibraryAction::Remove => {
                let copies = self.system.remove_copies(book_id, quantity)?;
                tracing::debug!(book_id, copies, "Inventory decreased");
            }
        }

        Ok(format!("Book {} {} successfully", book_id, action.past_tense()))
    }
}

impl Default for LibraryAdapter {
    fn default() -> Self {
        Self::new(LibrarySystem::new())
    }
}

impl SystemAdapter for LibraryAdapter {
    fn system_name(&self) -> &str {
        LIBRARY_SYSTEM
    }

    fn validate_data(&self, data: &str) -> bool {
        has_shape(&RequestData::parse(data))
    }

    fn integrate_system(&self, data: &str) -> AdapterResult {
        let request = RequestData::parse(data);
        if !has_shape(&request) {
            tracing::warn!("{}: rejected malformed request '{}'", LIBRARY_SYSTEM, data);
            return AdapterResult::from_error(&SchoolError::InvalidFormat {
                system: LIBRARY_SYSTEM.to_string(),
            });
        }

        let result: AdapterResult = self.process(&request).into();
        if !result.is_success() {
            tracing::info!("{}: {}", LIBRARY_SYSTEM, result.message);
        }
        result
    }
}
