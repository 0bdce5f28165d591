use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 报名表字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    StudentName,
    StudentNumber,
    ParentPhone,
    GradeLevel,
    Center,
}

impl Field {
    /// 表单中的全部字段（按显示顺序）
    pub const ALL: [Field; 5] = [
        Field::StudentName,
        Field::StudentNumber,
        Field::ParentPhone,
        Field::GradeLevel,
        Field::Center,
    ];

    /// JSON 中使用的字段名
    pub fn key(self) -> &'static str {
        match self {
            Field::StudentName => "studentName",
            Field::StudentNumber => "studentNumber",
            Field::ParentPhone => "parentPhone",
            Field::GradeLevel => "gradeLevel",
            Field::Center => "center",
        }
    }

    /// 表单上显示的标签
    pub fn label(self) -> &'static str {
        match self {
            Field::StudentName => "Student Name",
            Field::StudentNumber => "Student Number",
            Field::ParentPhone => "Parent Phone",
            Field::GradeLevel => "Grade Level",
            Field::Center => "Center",
        }
    }

    /// 与本字段存在交叉校验关系的字段
    pub fn partner(self) -> Option<Field> {
        match self {
            Field::StudentNumber => Some(Field::ParentPhone),
            Field::ParentPhone => Some(Field::StudentNumber),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 提交时刻的表单快照（未经校验的原始输入）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub student_name: String,
    pub student_number: String,
    pub parent_phone: String,
    pub grade_level: String,
    pub center: String,
}

impl FormInput {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::StudentName => &self.student_name,
            Field::StudentNumber => &self.student_number,
            Field::ParentPhone => &self.parent_phone,
            Field::GradeLevel => &self.grade_level,
            Field::Center => &self.center,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::StudentName => self.student_name = value,
            Field::StudentNumber => self.student_number = value,
            Field::ParentPhone => self.parent_phone = value,
            Field::GradeLevel => self.grade_level = value,
            Field::Center => self.center = value,
        }
    }

    /// 链式设置字段，便于构造快照
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.value(*f).trim().is_empty())
    }
}

/// 提交给 webhook 的报名记录
///
/// 只能由 [`crate::services::Validator::validate_form`] 构造，
/// 因此每个实例都已满足全部字段规则和交叉规则。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    student_name: String,
    student_number: String,
    parent_phone: String,
    grade_level: String,
    center: String,
    timestamp: String,
}

impl RegistrationRecord {
    pub(crate) fn new(
        student_name: String,
        student_number: String,
        parent_phone: String,
        grade_level: String,
        center: String,
    ) -> Self {
        Self {
            student_name,
            student_number,
            parent_phone,
            grade_level,
            center,
            timestamp: iso_timestamp_now(),
        }
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    pub fn student_number(&self) -> &str {
        &self.student_number
    }

    pub fn parent_phone(&self) -> &str {
        &self.parent_phone
    }

    pub fn grade_level(&self) -> &str {
        &self.grade_level
    }

    pub fn center(&self) -> &str {
        &self.center
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// 当前 UTC 时间，ISO-8601 毫秒精度，例如 `2026-10-17T09:30:00.123Z`
pub fn iso_timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
