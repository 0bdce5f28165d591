//! 面向用户的提示文案

use crate::error::{AppError, SubmissionError, ValidationReason};
use crate::models::Field;

pub const DUPLICATE_NUMBERS: &str = "Student number and parent phone number cannot be the same.";

pub const WEBHOOK_NOT_CONFIGURED: &str =
    "System configuration error. Please contact administrator.";
pub const SUBMISSION_FAILED: &str = "Failed to submit registration. Please try again.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";
pub const SUBMISSION_IN_PROGRESS: &str =
    "A registration is already being submitted. Please wait.";

pub const SUCCESS_TITLE: &str = "Registration Successful!";
pub const SUCCESS_MESSAGE: &str = "Welcome to our Mathematics Academy. We'll contact you soon!";
pub const SUCCESS_DETAILS: &str =
    "Your registration has been submitted and will be processed shortly.";

/// 字段为空时的提示
pub fn required_message(field: Field) -> &'static str {
    match field {
        Field::StudentName => "Student name is required.",
        Field::StudentNumber => "Student number is required.",
        Field::ParentPhone => "Parent phone number is required.",
        Field::GradeLevel => "Please select a grade level.",
        Field::Center => "Please select a study center.",
    }
}

/// 格式不符时的提示
pub fn invalid_message(field: Field) -> &'static str {
    match field {
        Field::StudentName => "Student name should contain only letters and spaces.",
        Field::StudentNumber => "Student number should contain only letters and numbers.",
        Field::ParentPhone => "Phone number should contain only numbers.",
        Field::GradeLevel => "Please select a valid grade level.",
        Field::Center => "Please select a valid study center for the chosen grade level.",
    }
}

/// 长度不符时的提示，范围取自当前生效的规则
pub fn length_message(field: Field, min: usize, max: usize) -> String {
    match field {
        Field::StudentName => {
            format!("Student name should be between {} and {} characters.", min, max)
        }
        Field::StudentNumber => {
            format!("Student number should be between {} and {} characters.", min, max)
        }
        Field::ParentPhone => {
            format!("Phone number should be between {} and {} digits.", min, max)
        }
        Field::GradeLevel | Field::Center => invalid_message(field).to_string(),
    }
}

pub fn validation_message(field: Field, reason: &ValidationReason) -> String {
    match reason {
        ValidationReason::Required => required_message(field).to_string(),
        ValidationReason::Pattern
        | ValidationReason::UnknownGrade
        | ValidationReason::CenterNotAllowed => invalid_message(field).to_string(),
        ValidationReason::Length { min, max } => length_message(field, *min, *max),
        ValidationReason::DuplicateNumbers => DUPLICATE_NUMBERS.to_string(),
    }
}

/// 提交失败时展示的提示，不包含底层传输错误的原文
pub fn submission_message(err: &SubmissionError) -> String {
    match err {
        SubmissionError::InProgress => SUBMISSION_IN_PROGRESS.to_string(),
        SubmissionError::Server { status, .. } if *status >= 500 => {
            format!("{} (HTTP {})", SERVER_ERROR, status)
        }
        SubmissionError::Server { status, .. } => {
            format!("{} (HTTP {})", SUBMISSION_FAILED, status)
        }
        SubmissionError::Network { .. } => NETWORK_ERROR.to_string(),
        SubmissionError::Serialize(_) => SUBMISSION_FAILED.to_string(),
    }
}

/// 任意应用错误对应的用户提示
pub fn user_message(err: &AppError) -> String {
    match err {
        AppError::Validation(errors) => errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| SUBMISSION_FAILED.to_string()),
        AppError::Config(_) => WEBHOOK_NOT_CONFIGURED.to_string(),
        AppError::Submission(e) => submission_message(e),
    }
}
