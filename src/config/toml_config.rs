use crate::adapters::{AttendanceAdapter, GradingAdapter, LibraryAdapter};
use crate::core::app::UnifiedApplication;
use crate::core::runner::ScenarioRequest;
use crate::legacy::LibrarySystem;
use crate::utils::error::{Result, SchoolError};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub const KNOWN_SYSTEMS: [&str; 3] = ["attendance", "grading", "library"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub application: ApplicationConfig,
    pub library: Option<LibraryConfig>,
    #[serde(default)]
    pub requests: Vec<ScenarioRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub name: String,
    pub description: Option<String>,
    /// 要註冊的系統：attendance / grading / library，未指定則全部註冊
    pub systems: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// 初始館藏：bookId → 數量
    pub inventory: Option<HashMap<String, u32>>,
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SchoolError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SchoolError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STUDENT_ID})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SchoolError::ConfigError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 啟用的系統清單
    pub fn enabled_systems(&self) -> Vec<&str> {
        match &self.application.systems {
            Some(systems) => systems.iter().map(String::as_str).collect(),
            None => KNOWN_SYSTEMS.to_vec(),
        }
    }

    fn initial_inventory(&self) -> HashMap<String, u32> {
        self.library
            .as_ref()
            .and_then(|library| library.inventory.clone())
            .unwrap_or_default()
    }

    /// 依設定註冊轉接器，圖書館以初始館藏建立
    pub fn build_application(&self) -> UnifiedApplication {
        let app = UnifiedApplication::new();
        for system in self.enabled_systems() {
            match system {
                "attendance" => {
                    app.register_adapter(Arc::new(AttendanceAdapter::default()));
                }
                "grading" => {
                    app.register_adapter(Arc::new(GradingAdapter::default()));
                }
                "library" => {
                    let library = LibrarySystem::with_inventory(self.initial_inventory());
                    app.register_adapter(Arc::new(LibraryAdapter::new(library)));
                }
                other => tracing::warn!("Skipping unknown system '{}'", other),
            }
        }
        app
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("application.name", &self.application.name)?;

        for system in self.enabled_systems() {
            validate_one_of("application.systems", system, &KNOWN_SYSTEMS)?;
        }

        for (index, request) in self.requests.iter().enumerate() {
            validate_non_empty_string(&format!("requests[{}].system", index), &request.system)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{GRADING_SYSTEM, LIBRARY_SYSTEM};
    use crate::core::runner::Operation;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_scenario() {
        let toml_content = r#"
[application]
name = "Springfield High"
systems = ["grading", "library"]

[library.inventory]
BOOK001 = 0
BOOK002 = 5

[[requests]]
system = "Grading System"
data = "studentId=STU001,subject=Mathematics,grade=95.5"

[[requests]]
system = "Library System"
data = "bookId=BOOK002,action=add,quantity=1"
operation = "perform"
"#;

        let config = ScenarioConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.name, "Springfield High");
        assert_eq!(config.requests.len(), 2);
        assert_eq!(config.requests[0].operation, Operation::Integrate);
        assert_eq!(config.requests[1].operation, Operation::Perform);

        let app = config.build_application();
        assert_eq!(app.registered_systems(), vec![GRADING_SYSTEM, LIBRARY_SYSTEM]);
    }

    #[test]
    fn test_all_systems_by_default() {
        let config = ScenarioConfig::from_toml_str(
            r#"
[application]
name = "default"
"#,
        )
        .unwrap();

        assert_eq!(config.enabled_systems(), KNOWN_SYSTEMS.to_vec());
        assert!(config.requests.is_empty());
        assert_eq!(config.build_application().registered_systems().len(), 3);
    }

    #[test]
    fn test_library_seeded_from_inventory() {
        let config = ScenarioConfig::from_toml_str(
            r#"
[application]
name = "seeded"
systems = ["library"]

[library.inventory]
BOOK002 = 5
"#,
        )
        .unwrap();

        let app = config.build_application();
        let result = app.integrate_system(
            LIBRARY_SYSTEM,
            "studentId=STU001,bookId=BOOK002,action=borrow,quantity=1",
        );
        assert!(result.is_success(), "{}", result);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SCHOOL_HUB_TEST_STUDENT", "STU042");

        let toml_content = r#"
[application]
name = "env"

[[requests]]
system = "Grading System"
data = "studentId=${SCHOOL_HUB_TEST_STUDENT},subject=Art,grade=80"
"#;

        let config = ScenarioConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.requests[0].data,
            "studentId=STU042,subject=Art,grade=80"
        );

        std::env::remove_var("SCHOOL_HUB_TEST_STUDENT");
    }

    #[test]
    fn test_unknown_system_fails_validation() {
        let config = ScenarioConfig::from_toml_str(
            r#"
[application]
name = "bad"
systems = ["cafeteria"]
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = ScenarioConfig::from_toml_str("[application\nname =").unwrap_err();
        assert!(matches!(err, SchoolError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[application]
name = "file-test"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ScenarioConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.application.name, "file-test");
    }
}
