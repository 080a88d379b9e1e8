use std::env;
use std::path::PathBuf;

pub const BACKEND_URL_ENV_VAR: &str = "DISHCOVERY_BACKEND_URL";
pub const DATA_DIR_ENV_VAR: &str = "DISHCOVERY_DATA_DIR";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const APP_DIR_NAME: &str = "dishcovery";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Explicit values win over the environment, which wins over defaults.
    /// Call `dotenv::dotenv()` first if a `.env` file should count.
    pub fn resolve(backend_url: Option<String>, data_dir: Option<PathBuf>) -> Self {
        let backend_url = backend_url
            .or_else(|| env::var(BACKEND_URL_ENV_VAR).ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let data_dir = data_dir
            .or_else(|| env::var_os(DATA_DIR_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        Self {
            backend_url,
            data_dir,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR_NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_win() {
        let config = AppConfig::resolve(
            Some("http://recipes.internal:9000".to_string()),
            Some(PathBuf::from("/tmp/dishcovery-test")),
        );
        assert_eq!(config.backend_url, "http://recipes.internal:9000");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dishcovery-test"));
    }

    #[test]
    fn test_default_data_dir_is_app_scoped() {
        assert!(default_data_dir().ends_with(APP_DIR_NAME) || default_data_dir().ends_with(".dishcovery"));
    }
}
