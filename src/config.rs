use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 默认题库服务地址
pub const DEFAULT_API_BASE_URL: &str = "https://exampro-backend.onrender.com/api";

/// 程序配置文件
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库服务基础地址（不含 /questions）
    pub api_base_url: String,
    /// 日志级别（RUST_LOG 未设置时生效）
    pub log_level: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: "info".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，文件不存在时使用默认值；环境变量优先级最高
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let base = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
                path: path.display().to_string(),
                source,
            })?;
            Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("QUESTION_API_BASE_URL").unwrap_or(self.api_base_url),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(self.log_level),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 实际生效的日志过滤表达式
    pub fn log_filter(&self) -> &str {
        if self.verbose_logging {
            "debug"
        } else {
            &self.log_level
        }
    }
}
