//! 报名表 - 流程层
//!
//! 持有当前输入和展示状态，把界面事件（字段变化、切换年级、提交）
//! 转换为校验和提交调用。

use std::time::Duration;
use tracing::error;

use crate::clients::Confirmation;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{messages, Field, FormInput};
use crate::services::{resolver, Validator};
use crate::workflow::form_state::{FieldState, FormState, Notice};
use crate::workflow::submission_flow::SubmissionFlow;

pub struct RegistrationForm {
    flow: SubmissionFlow,
    input: FormInput,
    state: FormState,
    notice: Option<Notice>,
    notice_duration: Duration,
}

impl RegistrationForm {
    /// 创建报名表；webhook 未配置时立即给出提示
    pub fn new(config: &Config) -> Self {
        Self::with_flow(
            SubmissionFlow::new(config),
            Duration::from_secs(config.notice_duration_secs),
        )
    }

    pub fn with_flow(flow: SubmissionFlow, notice_duration: Duration) -> Self {
        let notice = match flow.endpoint() {
            Ok(_) => None,
            Err(e) => {
                error!("❌ webhook 未正确配置，提交已禁用: {}", e);
                Some(Notice::error(messages::WEBHOOK_NOT_CONFIGURED, notice_duration))
            }
        };
        Self {
            flow,
            input: FormInput::default(),
            state: FormState::new(),
            notice,
            notice_duration,
        }
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// 最近一次提示（不论是否已自动隐藏）
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn validator(&self) -> &Validator {
        self.flow.validator()
    }

    pub fn flow(&self) -> &SubmissionFlow {
        &self.flow
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        self.flow.endpoint().is_ok() && !self.flow.is_in_flight()
    }

    /// 当前年级可选的教学点
    pub fn allowed_centers(&self) -> &[String] {
        resolver::allowed_centers(self.validator().table(), &self.input.grade_level)
    }

    /// 字段输入变化时调用，返回该字段的最新状态
    ///
    /// 学号 / 家长电话变化时，另一方若已填写也会重新校验。
    pub fn set_field(&mut self, field: Field, value: &str) -> &FieldState {
        if field == Field::GradeLevel {
            self.select_grade(value);
            return self.state.get(field);
        }

        self.input.set(field, value);
        self.revalidate(field);
        if let Some(partner) = field.partner() {
            if !self.input.value(partner).trim().is_empty() {
                self.revalidate(partner);
            }
        }
        self.state.get(field)
    }

    /// 切换年级，清除不再有效的教学点，返回新的可选教学点
    pub fn select_grade(&mut self, grade: &str) -> &[String] {
        self.input.set(Field::GradeLevel, grade);
        self.revalidate(Field::GradeLevel);

        let kept = resolver::reconcile_center(self.validator().table(), grade, &self.input.center);
        self.input.set(Field::Center, kept.unwrap_or_default());
        self.revalidate(Field::Center);

        self.allowed_centers()
    }

    /// 提交当前表单
    ///
    /// 成功：清空表单并显示成功提示；失败：保留输入，
    /// 校验错误标注在字段上，其他错误转为一条提示。
    pub async fn submit(&mut self) -> AppResult<Confirmation> {
        let snapshot = self.input.clone();
        let result = self.flow.submit(&snapshot).await;

        match &result {
            Ok(_) => {
                self.input = FormInput::default();
                self.state.reset();
                self.notice = Some(Notice::success(self.notice_duration));
            }
            Err(AppError::Validation(errors)) => {
                for field in Field::ALL {
                    self.revalidate(field);
                }
                self.state.apply_errors(errors);
            }
            Err(e) => {
                error!("❌ 提交失败: {}", e);
                self.notice = Some(Notice::error(messages::user_message(e), self.notice_duration));
            }
        }

        result
    }

    /// 清空输入和状态
    pub fn reset(&mut self) {
        self.input = FormInput::default();
        self.state.reset();
    }

    fn revalidate(&mut self, field: Field) {
        let outcome = self.flow.validator().validate_field(field, &self.input);
        self.state.apply(field, &outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::form_state::NoticeKind;

    fn form() -> RegistrationForm {
        RegistrationForm::new(&Config::default())
    }

    #[test]
    fn test_placeholder_shows_notice_at_startup() {
        let form = form();
        assert!(!form.can_submit());
        let notice = form.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, messages::WEBHOOK_NOT_CONFIGURED);
    }

    #[test]
    fn test_live_validation_stays_silent_for_empty_fields() {
        let mut form = form();
        assert_eq!(form.set_field(Field::StudentName, "  "), &FieldState::Untouched);
        assert_eq!(form.set_field(Field::StudentName, "John"), &FieldState::Valid);
        assert!(matches!(
            form.set_field(Field::StudentName, "John3"),
            FieldState::Invalid(_)
        ));
    }

    #[test]
    fn test_duplicate_numbers_mark_both_fields() {
        let mut form = form();
        form.set_field(Field::ParentPhone, "0123456789");
        form.set_field(Field::StudentNumber, "0123456789");

        let dup = FieldState::Invalid(messages::DUPLICATE_NUMBERS.to_string());
        assert_eq!(form.state().get(Field::StudentNumber), &dup);
        assert_eq!(form.state().get(Field::ParentPhone), &dup);

        // 修改学号后电话恢复正常
        form.set_field(Field::StudentNumber, "ABC123");
        assert_eq!(form.state().get(Field::ParentPhone), &FieldState::Valid);
    }

    #[test]
    fn test_changing_grade_clears_stale_center() {
        let mut form = form();
        form.select_grade("2nd prep");
        form.set_field(Field::Center, "cambridge");
        assert_eq!(form.state().get(Field::Center), &FieldState::Valid);

        let centers = form.select_grade("3rd prep").to_vec();
        assert_eq!(centers, ["heights", "60"]);
        assert_eq!(form.input().center, "");
        assert_eq!(form.state().get(Field::Center), &FieldState::Untouched);

        // 仍然有效的教学点会保留
        form.set_field(Field::Center, "heights");
        form.set_field(Field::GradeLevel, "2nd sec");
        assert_eq!(form.input().center, "heights");
        assert_eq!(form.state().get(Field::Center), &FieldState::Valid);
    }

    #[test]
    fn test_unknown_grade_has_no_centers() {
        let mut form = form();
        assert!(form.select_grade("unknown").is_empty());
        assert!(matches!(
            form.state().get(Field::GradeLevel),
            FieldState::Invalid(_)
        ));
    }

    #[tokio::test]
    async fn test_submit_with_placeholder_keeps_input() {
        let mut form = form();
        form.set_field(Field::StudentName, "John Smith");
        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(form.input().student_name, "John Smith");
        assert_eq!(
            form.notice().unwrap().message,
            messages::WEBHOOK_NOT_CONFIGURED
        );
    }
}
