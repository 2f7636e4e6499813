use crate::utils::error::{Result, SchoolError};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct LibraryState {
    inventory: HashMap<String, u32>,
    borrowed: HashMap<String, BTreeSet<String>>,
}

/// 舊圖書館系統：館藏數量與學生借閱紀錄。
///
/// 每個操作都在同一次鎖定內完成檢查與修改，失敗時狀態不變；
/// 庫存永遠不會小於零也不會溢位（拒絕而非截斷）。
#[derive(Debug, Default)]
pub struct LibrarySystem {
    state: Mutex<LibraryState>,
}

impl LibrarySystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以初始館藏建立
    pub fn with_inventory<I, K>(inventory: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        let state = LibraryState {
            inventory: inventory
                .into_iter()
                .map(|(book_id, copies)| (book_id.into(), copies))
                .collect(),
            borrowed: HashMap::new(),
        };
        Self {
            state: Mutex::new(state),
        }
    }

    fn state(&self) -> MutexGuard<'_, LibraryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_copies(&self, book_id: &str, quantity: u32) -> Result<u32> {
        let mut state = self.state();
        let available = state.inventory.get(book_id).copied().unwrap_or(0);
        let total = available
            .checked_add(quantity)
            .ok_or_else(|| SchoolError::InventoryOverflow {
                book_id: book_id.to_string(),
                requested: quantity,
                available,
            })?;

        state.inventory.insert(book_id.to_string(), total);
        Ok(total)
    }

    pub fn remove_copies(&self, book_id: &str, quantity: u32) -> Result<u32> {
        let mut state = self.state();
        let available = state.inventory.get(book_id).copied().unwrap_or(0);
        if quantity > available {
            return Err(SchoolError::InsufficientInventory {
                book_id: book_id.to_string(),
                requested: quantity,
                available,
            });
        }

        let remaining = available - quantity;
        state.inventory.insert(book_id.to_string(), remaining);
        Ok(remaining)
    }

    pub fn borrow_book(&self, student_id: &str, book_id: &str) -> Result<()> {
        let mut state = self.state();
        let available = state.inventory.get(book_id).copied().unwrap_or(0);
        if available == 0 {
            return Err(SchoolError::BookUnavailable {
                book_id: book_id.to_string(),
            });
        }
        if state
            .borrowed
            .get(student_id)
            .is_some_and(|books| books.contains(book_id))
        {
            return Err(SchoolError::AlreadyBorrowed {
                student_id: student_id.to_string(),
                book_id: book_id.to_string(),
            });
        }

        state.inventory.insert(book_id.to_string(), available - 1);
        state
            .borrowed
            .entry(student_id.to_string())
            .or_default()
            .insert(book_id.to_string());
        Ok(())
    }

    pub fn return_book(&self, student_id: &str, book_id: &str) -> Result<()> {
        let mut state = self.state();
        let held = state
            .borrowed
            .get(student_id)
            .is_some_and(|books| books.contains(book_id));
        if !held {
            return Err(SchoolError::NotBorrowed {
                student_id: student_id.to_string(),
                book_id: book_id.to_string(),
            });
        }

        let available = state.inventory.get(book_id).copied().unwrap_or(0);
        let total = available
            .checked_add(1)
            .ok_or_else(|| SchoolError::InventoryOverflow {
                book_id: book_id.to_string(),
                requested: 1,
                available,
            })?;

        if let Some(books) = state.borrowed.get_mut(student_id) {
            books.remove(book_id);
        }

        if state
            .borrowed
            .get(student_id)
            .is_some_and(BTreeSet::is_empty)
        {
            state.borrowed.remove(student_id);
        }
        state.inventory.insert(book_id.to_string(), total);
        Ok(())
    }

    pub fn available_copies(&self, book_id: &str) -> u32 {
        self.state().inventory.get(book_id).copied().unwrap_or(0)
    }

    pub fn borrowed_by(&self, student_id: &str) -> BTreeSet<String> {
        self.state()
            .borrowed
            .get(student_id)
            .cloned()
            .unwrap_or_default()
    }
}
