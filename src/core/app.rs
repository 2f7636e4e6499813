use crate::adapters::{AttendanceAdapter, GradingAdapter, LibraryAdapter};
use crate::domain::model::AdapterResult;
use crate::domain::ports::SystemAdapter;
use crate::utils::error::SchoolError;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// 統一入口：依系統名稱把請求轉交給已註冊的轉接器。
///
/// 註冊表讀多寫少，使用 `RwLock`；各後端的狀態由後端自己的鎖保護。
#[derive(Default)]
pub struct UnifiedApplication {
    adapters: RwLock<HashMap<String, Arc<dyn SystemAdapter>>>,
}

impl UnifiedApplication {
    pub fn new() -> Self {
        Self::default()
    }

    /// 註冊出缺勤、成績、圖書館三個標準轉接器
    pub fn with_default_adapters() -> Self {
        let app = Self::new();
        app.register_adapter(Arc::new(AttendanceAdapter::default()));
        app.register_adapter(Arc::new(GradingAdapter::default()));
        app.register_adapter(Arc::new(LibraryAdapter::default()));
        app
    }

    /// 以轉接器回報的名稱註冊；同名時覆寫並回傳被取代的轉接器
    pub fn register_adapter(
        &self,
        adapter: Arc<dyn SystemAdapter>,
    ) -> Option<Arc<dyn SystemAdapter>> {
        let name = adapter.system_name().to_string();
        let previous = self
            .adapters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), adapter);

        if previous.is_some() {
            tracing::warn!("Replaced existing adapter for '{}'", name);
        } else {
            tracing::info!("Registered adapter for '{}'", name);
        }
        previous
    }

    pub fn integrate_system(&self, system_name: &str, data: &str) -> AdapterResult {
        tracing::debug!("Integrating with '{}': {}", system_name, data);
        self.dispatch(system_name, data)
    }

    /// 與 `integrate_system` 相同的行為，保留給查詢類操作使用的入口
    pub fn perform_operation(&self, system_name: &str, operation_data: &str) -> AdapterResult {
        tracing::debug!("Performing operation on '{}': {}", system_name, operation_data);
        self.dispatch(system_name, operation_data)
    }

    fn dispatch(&self, system_name: &str, data: &str) -> AdapterResult {
        // 先取出 Arc 再放開讀鎖，轉接器執行期間不佔用註冊表
        let adapter = self
            .adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(system_name)
            .cloned();

        match adapter {
            Some(adapter) => adapter.integrate_system(data),
            None => {
                tracing::warn!("No adapter registered for '{}'", system_name);
                AdapterResult::from_error(&SchoolError::SystemNotFound {
                    name: system_name.to_string(),
                })
            }
        }
    }

    pub fn is_registered(&self, system_name: &str) -> bool {
        self.adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(system_name)
    }

    /// 已註冊的系統名稱（排序後）
    pub fn registered_systems(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ATTENDANCE_SYSTEM, GRADING_SYSTEM, LIBRARY_SYSTEM};
    use crate::domain::model::ResultKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAdapter {
        name: String,
        reply: String,
        calls: AtomicUsize,
    }

    impl CountingAdapter {
        fn new(name: &str, reply: &str) -> Self {
            Self {
                name: name.to_string(),
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SystemAdapter for CountingAdapter {
        fn system_name(&self) -> &str {
            &self.name
        }

        fn validate_data(&self, _data: &str) -> bool {
            true
        }

        fn integrate_system(&self, _data: &str) -> AdapterResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            AdapterResult::success(self.reply.clone())
        }
    }

    #[test]
    fn test_default_adapters_registered() {
        let app = UnifiedApplication::with_default_adapters();
        assert_eq!(
            app.registered_systems(),
            vec![ATTENDANCE_SYSTEM, GRADING_SYSTEM, LIBRARY_SYSTEM]
        );
        assert!(app.is_registered(GRADING_SYSTEM));
        assert!(!app.is_registered("grading system"));
    }

    #[test]
    fn test_unknown_system() {
        let app = UnifiedApplication::new();
        let result = app.integrate_system("Cafeteria System", "item=soup");

        assert_eq!(result.kind, ResultKind::SystemNotFound);
        assert_eq!(result.message, "Error: System 'Cafeteria System' not found");
        assert_eq!(app.perform_operation("Cafeteria System", "item=soup"), result);
    }

    #[test]
    fn test_reregistration_routes_to_new_adapter() {
        let app = UnifiedApplication::new();
        let first = Arc::new(CountingAdapter::new("Test System", "first"));
        let second = Arc::new(CountingAdapter::new("Test System", "second"));

        assert!(app.register_adapter(first.clone()).is_none());
        assert_eq!(app.integrate_system("Test System", "x=1").message, "first");

        let replaced = app.register_adapter(second.clone());
        assert!(replaced.is_some());
        assert_eq!(app.integrate_system("Test System", "x=1").message, "second");
        assert_eq!(app.perform_operation("Test System", "x=1").message, "second");

        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 2);
        assert_eq!(app.registered_systems().len(), 1);
    }

    #[test]
    fn test_perform_operation_matches_integrate() {
        let app = UnifiedApplication::with_default_adapters();
        let result = app.perform_operation(
            GRADING_SYSTEM,
            "studentId=STU003,subject=History,grade=77",
        );
        assert_eq!(result.message, "Grade 77 recorded for STU003 in History");
    }
}
