/// Webhook 客户端
///
/// 封装向 webhook 提交报名记录的调用逻辑：每次调用只发一次 POST，不重试。
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Url;
use tracing::{debug, error, info};

use crate::config::{Config, PLACEHOLDER_WEBHOOK_URL};
use crate::error::{EndpointError, SubmissionError};
use crate::models::RegistrationRecord;
use crate::services::sheet_writer::parse_row_number;
use crate::utils::logging::truncate_text;

/// 提交成功的确认信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// HTTP 状态码（2xx）
    pub status: u16,
    /// 接收端返回的行号（若响应体中包含）
    pub row_number: Option<u64>,
}

/// 检查 webhook 地址是否可用
pub fn check_endpoint(url: &str) -> Result<Url, EndpointError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(EndpointError::Missing);
    }
    if url.contains(PLACEHOLDER_WEBHOOK_URL) {
        return Err(EndpointError::Placeholder);
    }
    let parsed = Url::parse(url).map_err(|e| EndpointError::Invalid {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(EndpointError::Invalid {
            url: url.to_string(),
            reason: format!("不支持的协议: {}", scheme),
        }),
    }
}

/// Webhook 客户端
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl WebhookClient {
    /// 创建客户端；地址未配置或无效时返回错误
    pub fn new(config: &Config) -> Result<Self, EndpointError> {
        Self::with_endpoint(&config.webhook_url)
    }

    pub fn with_endpoint(url: &str) -> Result<Self, EndpointError> {
        let endpoint = check_endpoint(url)?;
        // 3xx 不跟随，按非 2xx 处理
        let http = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|e| EndpointError::Invalid {
                url: endpoint.to_string(),
                reason: format!("HTTP 客户端创建失败: {}", e),
            })?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// 提交报名记录
    ///
    /// # 返回
    /// - 2xx：`Confirmation`，响应体仅用于提取行号
    /// - 非 2xx：`SubmissionError::Server`
    /// - 未收到响应：`SubmissionError::Network`
    pub async fn submit(
        &self,
        record: &RegistrationRecord,
    ) -> Result<Confirmation, SubmissionError> {
        let body = serde_json::to_vec(record)?;

        debug!("提交 Payload: {} 字节", body.len());

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| {
                error!("❌ 请求未得到响应: {}", source);
                SubmissionError::Network { source }
            })?;

        let status = response.status();
        // 响应体读取失败时按空处理，结果只取决于状态码
        let text = response.text().await.unwrap_or_default();

        if status.is_success() {
            let row_number = parse_row_number(&text);
            info!("✓ webhook 已接收 (HTTP {}, 行号: {:?})", status.as_u16(), row_number);
            Ok(Confirmation {
                status: status.as_u16(),
                row_number,
            })
        } else {
            error!(
                "❌ webhook 返回错误: HTTP {} - {}",
                status.as_u16(),
                truncate_text(&text, 200)
            );
            Err(SubmissionError::Server {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_endpoint_detects_placeholder() {
        assert_eq!(
            check_endpoint(PLACEHOLDER_WEBHOOK_URL),
            Err(EndpointError::Placeholder)
        );
        assert_eq!(
            check_endpoint("https://x/YOUR_POWER_AUTOMATE_WEBHOOK_URL_HERE"),
            Err(EndpointError::Placeholder)
        );
        assert_eq!(check_endpoint("  "), Err(EndpointError::Missing));
    }

    #[test]
    fn test_check_endpoint_rejects_invalid_urls() {
        assert!(matches!(
            check_endpoint("not a url"),
            Err(EndpointError::Invalid { .. })
        ));
        assert!(matches!(
            check_endpoint("ftp://example.com/hook"),
            Err(EndpointError::Invalid { .. })
        ));
    }

    #[test]
    fn test_check_endpoint_accepts_https() {
        let url = check_endpoint(
            "https://prod-1.westeurope.logic.azure.com:443/workflows/abc/triggers/manual/paths/invoke?api-version=2016-06-01",
        )
        .unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_new_uses_config_url() {
        let config = Config::default();
        assert_eq!(
            WebhookClient::new(&config).unwrap_err(),
            EndpointError::Placeholder
        );

        let config = Config {
            webhook_url: "http://127.0.0.1:9/hook".to_string(),
            ..Config::default()
        };
        let client = WebhookClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/hook");
    }
}
