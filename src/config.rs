use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::{Field, GradeCenterTable, GradeEntry};
use crate::services::{FieldRule, ValidationRules};

/// 模板中的占位地址，部署前必须替换
pub const PLACEHOLDER_WEBHOOK_URL: &str = "YOUR_POWER_AUTOMATE_WEBHOOK_URL_HERE";

/// 频率限制（仅供接收端参考，本程序不执行）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub enabled: bool,
    /// 每个窗口内允许的最大请求数
    pub max_requests: u32,
    /// 窗口长度（毫秒）
    pub window_ms: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 10,
            window_ms: 60_000,
        }
    }
}

/// CORS 设置（仅供接收端参考）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    pub rate_limit: RateLimitSettings,
    pub cors: CorsSettings,
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 接收报名记录的 webhook 地址
    pub webhook_url: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 提示信息自动消失的秒数
    pub notice_duration_secs: u64,
    // --- 表单规则 ---
    pub rules: ValidationRules,
    pub grades: GradeCenterTable,
    // --- 接收端参考设置 ---
    pub security: SecuritySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: PLACEHOLDER_WEBHOOK_URL.to_string(),
            verbose_logging: false,
            notice_duration_secs: 5,
            rules: ValidationRules::default(),
            grades: GradeCenterTable::default(),
            security: SecuritySettings::default(),
        }
    }
}

// ========== 配置文件结构 ==========

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    webhook_url: Option<String>,
    verbose_logging: Option<bool>,
    notice_duration_secs: Option<u64>,
    rules: RuleOverrides,
    grades: Option<Vec<GradeEntry>>,
    security: Option<SecuritySettings>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuleOverrides {
    student_name: Option<RuleOverride>,
    student_number: Option<RuleOverride>,
    parent_phone: Option<RuleOverride>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuleOverride {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<String>,
    pattern_description: Option<String>,
}

impl RuleOverride {
    fn apply(self, field: Field, base: &FieldRule) -> Result<FieldRule, ConfigError> {
        FieldRule::new(
            field,
            self.min_length.unwrap_or(base.min_length),
            self.max_length.unwrap_or(base.max_length),
            self.pattern.as_deref().unwrap_or(base.pattern()),
            self.pattern_description
                .unwrap_or_else(|| base.pattern_description.clone()),
        )
    }
}

impl Config {
    /// 默认值 ← 配置文件 ← 环境变量
    ///
    /// 未显式指定路径时读取 `REGISTRATION_CONFIG` 环境变量。
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let env_path = std::env::var("REGISTRATION_CONFIG").ok();
        let path = path.or(env_path.as_deref().map(Path::new));
        if let Some(path) = path {
            config = config.merge_file(path)?;
        }

        config.apply_env()
    }

    /// 默认值 ← 环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env()
    }

    /// 读取 TOML 配置文件并覆盖当前配置
    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                path: path.display().to_string(),
                source,
            })?;
        self.merge_toml(&content)
            .map_err(|e| match e {
                ConfigError::TomlParseFailed { source, .. } => ConfigError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                },
                other => other,
            })
    }

    /// 用 TOML 文本覆盖当前配置
    pub fn merge_toml(mut self, content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
                path: String::new(),
                source,
            })?;

        if let Some(url) = file.webhook_url {
            self.webhook_url = url;
        }
        if let Some(verbose) = file.verbose_logging {
            self.verbose_logging = verbose;
        }
        if let Some(secs) = file.notice_duration_secs {
            self.notice_duration_secs = secs;
        }
        if let Some(rule) = file.rules.student_name {
            self.rules.student_name = rule.apply(Field::StudentName, &self.rules.student_name)?;
        }
        if let Some(rule) = file.rules.student_number {
            self.rules.student_number =
                rule.apply(Field::StudentNumber, &self.rules.student_number)?;
        }
        if let Some(rule) = file.rules.parent_phone {
            self.rules.parent_phone = rule.apply(Field::ParentPhone, &self.rules.parent_phone)?;
        }
        if let Some(grades) = file.grades {
            self.grades = GradeCenterTable::new(grades)?;
        }
        if let Some(security) = file.security {
            self.security = security;
        }

        Ok(self)
    }

    fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var("WEBHOOK_URL") {
            self.webhook_url = url;
        }
        if let Some(verbose) = env_parse("VERBOSE_LOGGING", "bool")? {
            self.verbose_logging = verbose;
        }
        if let Some(secs) = env_parse("NOTICE_DURATION_SECS", "u64")? {
            self.notice_duration_secs = secs;
        }
        Ok(self)
    }
}

fn env_parse<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
