/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::RegistrationRecord;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
/// 重复调用不会报错（测试中会多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 学生报名表启动");
    info!("📋 可选年级: {} 个", config.grades.grades().len());
    info!("⏱️ 提示停留: {} 秒", config.notice_duration_secs);

    let security = &config.security;
    if security.rate_limit.enabled {
        info!(
            "🛡️ 接收端频率限制: 每 {} ms 最多 {} 次",
            security.rate_limit.window_ms, security.rate_limit.max_requests
        );
    }
    if security.cors.enabled {
        if security.cors.allowed_origins.is_empty() {
            warn!("⚠️ 已启用 CORS 但未配置任何来源");
        } else {
            info!("🌐 CORS 来源: {}", security.cors.allowed_origins.join(", "));
        }
    }
    info!("{}", "=".repeat(60));
}

/// 记录一次提交（电话号码脱敏）
pub fn log_submission(record: &RegistrationRecord) {
    info!(
        "📤 提交报名: {} | 学号 {} | 电话 {} | {} / {}",
        record.student_name(),
        record.student_number(),
        mask_phone(record.parent_phone()),
        record.grade_level(),
        record.center()
    );
}

/// 只保留电话号码的最后 3 位
pub fn mask_phone(phone: &str) -> String {
    let count = phone.chars().count();
    let keep = count.min(3);
    phone
        .chars()
        .enumerate()
        .map(|(i, c)| if i < count - keep { '*' } else { c })
        .collect()
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("0123456789"), "*******789");
        assert_eq!(mask_phone("12"), "12");
        assert_eq!(mask_phone(""), "");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("abc", 3), "abc");
    }
}
