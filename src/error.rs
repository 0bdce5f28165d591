use std::fmt;
use thiserror::Error;

use crate::models::messages;
use crate::models::Field;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表单校验未通过（一个或多个字段）
    #[error("表单校验未通过: {} 个字段有误", .0.len())]
    Validation(Vec<ValidationError>),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 提交错误
    #[error("提交错误: {0}")]
    Submission(#[from] SubmissionError),
}

// ========== 字段校验错误 ==========

/// 字段校验失败的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// 必填字段为空（仅在提交时报告）
    Required,
    /// 内容不符合字段格式
    Pattern,
    /// 长度不在允许范围内
    Length { min: usize, max: usize },
    /// 学号与家长电话相同
    DuplicateNumbers,
    /// 年级不在年级表中
    UnknownGrade,
    /// 教学点不属于所选年级
    CenterNotAllowed,
}

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: Field, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

/// 展示给用户的提示文案
impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&messages::validation_message(self.field, &self.reason))
    }
}

impl std::error::Error for ValidationError {}

// ========== 配置错误 ==========

/// Webhook 地址问题
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// 未填写地址
    #[error("webhook 地址为空")]
    Missing,
    /// 仍是模板中的占位地址
    #[error("webhook 地址仍为占位符，请替换为实际地址")]
    Placeholder,
    /// 地址无法解析或协议不受支持
    #[error("webhook 地址无效 ({url}): {reason}")]
    Invalid { url: String, reason: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    /// 字段正则无法编译
    #[error("字段 {field} 的正则无效 ({pattern}): {source}")]
    InvalidPattern {
        field: Field,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// 长度范围无效
    #[error("字段 {field} 的长度范围无效: {min}..={max}")]
    InvalidLengthRange { field: Field, min: usize, max: usize },
    /// 年级表为空
    #[error("年级表为空")]
    EmptyGradeTable,
    /// 年级重复
    #[error("年级重复: {key}")]
    DuplicateGrade { key: String },
    /// 年级没有可选教学点
    #[error("年级 {grade} 没有配置教学点")]
    EmptyCenters { grade: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 提交错误 ==========

/// 提交错误
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// 已有一次提交正在进行
    #[error("已有提交正在进行中")]
    InProgress,
    /// 服务端返回非 2xx
    #[error("服务端错误: HTTP {status}")]
    Server { status: u16, body: String },
    /// 没有收到任何响应
    #[error("网络错误: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },
    /// 请求体序列化失败
    #[error("请求体序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ========== 辅助方法 ==========

impl AppError {
    /// 取出字段校验错误（其他错误返回空切片）
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
