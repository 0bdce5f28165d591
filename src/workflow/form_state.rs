//! 表单展示状态
//!
//! 字段 → 当前校验状态的声明式映射，以及会自动消失的提示信息。
//! 界面层只需按这里的状态渲染。

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::error::ValidationError;
use crate::models::messages;
use crate::models::Field;
use crate::services::FieldOutcome;

/// 单个字段的展示状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    Untouched,
    Valid,
    Invalid(String),
}

impl From<&FieldOutcome> for FieldState {
    fn from(outcome: &FieldOutcome) -> Self {
        match outcome {
            FieldOutcome::Untouched => FieldState::Untouched,
            FieldOutcome::Valid(_) => FieldState::Valid,
            FieldOutcome::Invalid(err) => FieldState::Invalid(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: BTreeMap<Field, FieldState>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            fields: Field::ALL
                .iter()
                .map(|f| (*f, FieldState::Untouched))
                .collect(),
        }
    }

    pub fn get(&self, field: Field) -> &FieldState {
        self.fields.get(&field).unwrap_or(&FieldState::Untouched)
    }

    pub fn apply(&mut self, field: Field, outcome: &FieldOutcome) {
        self.fields.insert(field, FieldState::from(outcome));
    }

    pub fn apply_errors(&mut self, errors: &[ValidationError]) {
        for err in errors {
            self.fields
                .insert(err.field, FieldState::Invalid(err.to_string()));
        }
    }

    pub fn reset(&mut self) {
        for state in self.fields.values_mut() {
            *state = FieldState::Untouched;
        }
    }

    pub fn is_all_valid(&self) -> bool {
        self.fields.values().all(|s| *s == FieldState::Valid)
    }

    /// 当前所有错误（按字段顺序）
    pub fn errors(&self) -> Vec<(Field, &str)> {
        self.fields
            .iter()
            .filter_map(|(field, state)| match state {
                FieldState::Invalid(msg) => Some((*field, msg.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// 全局提示，显示固定时长后自动隐藏
///
/// 隐藏只影响展示，引发提示的状况（例如未配置 webhook）依然存在。
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: Option<String>,
    pub message: String,
    shown_at: Instant,
    duration: Duration,
}

impl Notice {
    pub fn success(duration: Duration) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: Some(messages::SUCCESS_TITLE.to_string()),
            message: messages::SUCCESS_MESSAGE.to_string(),
            shown_at: Instant::now(),
            duration,
        }
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: None,
            message: message.into(),
            shown_at: Instant::now(),
            duration,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.duration
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }
}
