//! 报名提交流程 - 流程层
//!
//! 流程顺序：
//! 1. 占用提交槽位（同一时间只允许一次提交）
//! 2. 检查 webhook 配置
//! 3. 校验整张表单，生成记录
//! 4. POST 到 webhook，解释响应

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::clients::{Confirmation, WebhookClient};
use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, EndpointError, SubmissionError};
use crate::models::FormInput;
use crate::services::Validator;
use crate::utils::logging;

/// 提交槽位，离开作用域时释放
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// 报名提交流程
///
/// - 不持有表单状态，只处理传入的快照
/// - 可通过 `&self` 并发调用，第二次调用会被拒绝
pub struct SubmissionFlow {
    validator: Validator,
    client: Result<WebhookClient, EndpointError>,
    in_flight: AtomicBool,
}

impl SubmissionFlow {
    /// 创建提交流程；webhook 配置有误时仍可创建，但每次提交都会被拒绝
    pub fn new(config: &Config) -> Self {
        let validator = Validator::new(config.rules.clone(), config.grades.clone());
        Self::with_parts(validator, WebhookClient::new(config))
    }

    pub fn with_parts(validator: Validator, client: Result<WebhookClient, EndpointError>) -> Self {
        Self {
            validator,
            client,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// webhook 配置状态
    pub fn endpoint(&self) -> Result<&WebhookClient, &EndpointError> {
        self.client.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// 提交一份表单快照
    ///
    /// 校验失败、配置错误、已有提交进行中时都不会发出网络请求。
    pub async fn submit(&self, input: &FormInput) -> AppResult<Confirmation> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("⚠️ 已有提交正在进行，本次请求被拒绝");
            return Err(SubmissionError::InProgress.into());
        };

        let client = self.client.as_ref().map_err(|e| {
            warn!("⚠️ webhook 未正确配置: {}", e);
            AppError::Config(ConfigError::Endpoint(e.clone()))
        })?;

        let record = self
            .validator
            .validate_form(input)
            .map_err(AppError::Validation)?;

        logging::log_submission(&record);
        let confirmation = client.submit(&record).await?;
        info!("✅ 报名提交成功");

        Ok(confirmation)
    }
}
