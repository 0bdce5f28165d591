//! 校验服务 - 业务能力层
//!
//! 只负责"判断字段是否合法"，不关心界面如何展示。
//!
//! - 空值（去除首尾空白后）视为"尚未填写"，不报错
//! - 非空值先检查格式，再检查长度
//! - 学号和家长电话都非空时不能相同，错误归属于当前正在校验的字段

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, ValidationError, ValidationReason};
use crate::models::{Field, FormInput, GradeCenterTable, RegistrationRecord};

/// 单个文本字段的长度和格式规则
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub min_length: usize,
    pub max_length: usize,
    pattern: Regex,
    pub pattern_description: String,
}

impl FieldRule {
    pub fn new(
        field: Field,
        min_length: usize,
        max_length: usize,
        pattern: &str,
        pattern_description: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if min_length == 0 || min_length > max_length {
            return Err(ConfigError::InvalidLengthRange {
                field,
                min: min_length,
                max: max_length,
            });
        }
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            field,
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            min_length,
            max_length,
            pattern,
            pattern_description: pattern_description.into(),
        })
    }

    /// 内置规则，正则为常量
    fn builtin(field: Field, min: usize, max: usize, pattern: &str, description: &str) -> Self {
        Self::new(field, min, max, pattern, description).expect("内置校验规则必须合法")
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// 检查已去除空白的非空值
    fn check(&self, value: &str) -> Result<(), ValidationReason> {
        if !self.pattern.is_match(value) {
            return Err(ValidationReason::Pattern);
        }
        let len = value.chars().count();
        if len < self.min_length || len > self.max_length {
            return Err(ValidationReason::Length {
                min: self.min_length,
                max: self.max_length,
            });
        }
        Ok(())
    }
}

/// 三个文本字段的规则集合
#[derive(Debug, Clone)]
pub struct ValidationRules {
    pub student_name: FieldRule,
    pub student_number: FieldRule,
    pub parent_phone: FieldRule,
}

impl ValidationRules {
    pub fn get(&self, field: Field) -> Option<&FieldRule> {
        match field {
            Field::StudentName => Some(&self.student_name),
            Field::StudentNumber => Some(&self.student_number),
            Field::ParentPhone => Some(&self.parent_phone),
            Field::GradeLevel | Field::Center => None,
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            student_name: FieldRule::builtin(
                Field::StudentName,
                2,
                50,
                r"^[A-Za-z\s]+$",
                "Letters and spaces only",
            ),
            student_number: FieldRule::builtin(
                Field::StudentNumber,
                3,
                20,
                r"^[A-Za-z0-9]+$",
                "Letters and numbers only",
            ),
            parent_phone: FieldRule::builtin(
                Field::ParentPhone,
                10,
                12,
                r"^[0-9]+$",
                "Numbers only (10-12 digits)",
            ),
        }
    }
}

/// 单个字段的校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// 空值，尚未填写
    Untouched,
    /// 合法，携带去除空白后的值
    Valid(String),
    /// 不合法
    Invalid(ValidationError),
}

impl FieldOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldOutcome::Valid(_))
    }

    /// 提交时使用：尚未填写视为必填错误
    pub fn into_result(self, field: Field) -> Result<String, ValidationError> {
        match self {
            FieldOutcome::Valid(value) => Ok(value),
            FieldOutcome::Invalid(err) => Err(err),
            FieldOutcome::Untouched => Err(ValidationError::new(field, ValidationReason::Required)),
        }
    }
}

/// 报名表校验器
///
/// 纯函数式：所有输入都通过参数传入，不读取任何外部状态。
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
    table: GradeCenterTable,
}

impl Validator {
    pub fn new(rules: ValidationRules, table: GradeCenterTable) -> Self {
        Self { rules, table }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn table(&self) -> &GradeCenterTable {
        &self.table
    }

    pub fn student_name(&self, raw: &str) -> FieldOutcome {
        check_text(Field::StudentName, &self.rules.student_name, raw, None)
    }

    /// `parent_phone` 为当前家长电话的值，用于交叉校验
    pub fn student_number(&self, raw: &str, parent_phone: &str) -> FieldOutcome {
        check_text(
            Field::StudentNumber,
            &self.rules.student_number,
            raw,
            Some(parent_phone),
        )
    }

    /// `student_number` 为当前学号的值，用于交叉校验
    pub fn parent_phone(&self, raw: &str, student_number: &str) -> FieldOutcome {
        check_text(
            Field::ParentPhone,
            &self.rules.parent_phone,
            raw,
            Some(student_number),
        )
    }

    pub fn grade_level(&self, raw: &str) -> FieldOutcome {
        let value = raw.trim();
        if value.is_empty() {
            return FieldOutcome::Untouched;
        }
        if !self.table.contains_grade(value) {
            return FieldOutcome::Invalid(ValidationError::new(
                Field::GradeLevel,
                ValidationReason::UnknownGrade,
            ));
        }
        FieldOutcome::Valid(value.to_string())
    }

    /// 年级无效时不校验教学点
    pub fn center(&self, grade: &str, raw: &str) -> FieldOutcome {
        let grade = grade.trim();
        let value = raw.trim();
        if value.is_empty() || !self.table.contains_grade(grade) {
            return FieldOutcome::Untouched;
        }
        if !self.table.centers(grade).iter().any(|c| c == value) {
            return FieldOutcome::Invalid(ValidationError::new(
                Field::Center,
                ValidationReason::CenterNotAllowed,
            ));
        }
        FieldOutcome::Valid(value.to_string())
    }

    /// 按当前表单快照校验单个字段
    pub fn validate_field(&self, field: Field, input: &FormInput) -> FieldOutcome {
        match field {
            Field::StudentName => self.student_name(&input.student_name),
            Field::StudentNumber => self.student_number(&input.student_number, &input.parent_phone),
            Field::ParentPhone => self.parent_phone(&input.parent_phone, &input.student_number),
            Field::GradeLevel => self.grade_level(&input.grade_level),
            Field::Center => self.center(&input.grade_level, &input.center),
        }
    }

    /// 提交前校验整张表单
    ///
    /// 每个字段独立校验，返回全部错误；全部通过时生成带时间戳的记录。
    pub fn validate_form(
        &self,
        input: &FormInput,
    ) -> Result<RegistrationRecord, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let mut take = |field: Field, outcome: FieldOutcome| match outcome.into_result(field) {
            Ok(value) => Some(value),
            Err(err) => {
                errors.push(err);
                None
            }
        };

        let name = take(Field::StudentName, self.validate_field(Field::StudentName, input));
        let number = take(
            Field::StudentNumber,
            self.validate_field(Field::StudentNumber, input),
        );
        let phone = take(
            Field::ParentPhone,
            self.validate_field(Field::ParentPhone, input),
        );
        let grade = take(
            Field::GradeLevel,
            self.validate_field(Field::GradeLevel, input),
        );
        // 年级有误时只报告年级本身
        let center = if grade.is_some() {
            take(Field::Center, self.validate_field(Field::Center, input))
        } else {
            None
        };

        match (name, number, phone, grade, center) {
            (Some(name), Some(number), Some(phone), Some(grade), Some(center))
                if errors.is_empty() =>
            {
                Ok(RegistrationRecord::new(name, number, phone, grade, center))
            }
            _ => {
                debug!("表单校验未通过: {:?}", errors);
                Err(errors)
            }
        }
    }
}

fn check_text(field: Field, rule: &FieldRule, raw: &str, other: Option<&str>) -> FieldOutcome {
    let value = raw.trim();
    if value.is_empty() {
        return FieldOutcome::Untouched;
    }
    if let Err(reason) = rule.check(value) {
        return FieldOutcome::Invalid(ValidationError::new(field, reason));
    }
    if let Some(other) = other.map(str::trim) {
        if !other.is_empty() && other == value {
            return FieldOutcome::Invalid(ValidationError::new(
                field,
                ValidationReason::DuplicateNumbers,
            ));
        }
    }
    FieldOutcome::Valid(value.to_string())
}
