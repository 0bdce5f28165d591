//! 环境变量覆盖配置；修改进程环境，单独放在一个测试二进制中

use student_registration::config::PLACEHOLDER_WEBHOOK_URL;
use student_registration::error::ConfigError;
use student_registration::Config;

#[test]
fn test_from_env_overrides_defaults() {
    std::env::remove_var("WEBHOOK_URL");
    std::env::remove_var("VERBOSE_LOGGING");
    std::env::remove_var("NOTICE_DURATION_SECS");
    std::env::remove_var("REGISTRATION_CONFIG");

    let config = Config::from_env().unwrap();
    assert_eq!(config.webhook_url, PLACEHOLDER_WEBHOOK_URL);
    assert!(!config.verbose_logging);
    assert_eq!(config.notice_duration_secs, 5);

    std::env::set_var("WEBHOOK_URL", "https://example.com/hook");
    std::env::set_var("VERBOSE_LOGGING", "true");
    std::env::set_var("NOTICE_DURATION_SECS", " 8 ");
    let config = Config::from_env().unwrap();
    assert_eq!(config.webhook_url, "https://example.com/hook");
    assert!(config.verbose_logging);
    assert_eq!(config.notice_duration_secs, 8);

    // 未指定配置文件时 load 与 from_env 一致
    let config = Config::load(None).unwrap();
    assert_eq!(config.webhook_url, "https://example.com/hook");

    std::env::set_var("VERBOSE_LOGGING", "sometimes");
    let err = Config::from_env().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::EnvVarParseFailed { ref var_name, .. } if var_name == "VERBOSE_LOGGING"
    ));
}
