//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：输出启动信息、检查 webhook 配置、创建报名表
//! 2. **交互式填写**：逐项输入并实时校验，年级 → 教学点联动选择
//! 3. **单次提交**：从命令行参数直接构造表单并提交
//! 4. **结果展示**：把提示信息和字段错误渲染到终端

use anyhow::{anyhow, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use indicatif::ProgressBar;
use std::time::Duration;
use tracing::{info, warn};

use crate::clients::Confirmation;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{messages, Field, FormInput};
use crate::services::{resolver, FieldOutcome};
use crate::utils::logging;
use crate::workflow::{FieldState, Notice, NoticeKind, RegistrationForm};

/// 应用主结构
pub struct App {
    config: Config,
    form: RegistrationForm,
}

impl App {
    /// 初始化应用
    ///
    /// webhook 未配置不会导致初始化失败，只会禁用提交。
    pub fn initialize(config: Config) -> Self {
        logging::log_startup(&config);

        let form = RegistrationForm::new(&config);
        match form.flow().endpoint() {
            Ok(client) => info!("🔗 webhook: {}", client.endpoint()),
            Err(e) => warn!("⚠️ 提交已禁用: {}", e),
        }

        Self { config, form }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// 用命令行参数填写并提交一次
    pub async fn run_once(&mut self, input: FormInput) -> Result<Confirmation> {
        if let Some(notice) = self.blocking_notice() {
            print_notice(&notice);
            return Err(anyhow!(messages::WEBHOOK_NOT_CONFIGURED));
        }

        for field in Field::ALL {
            self.form.set_field(field, input.value(field));
        }

        self.submit_with_spinner().await
    }

    /// 交互式填写报名表，直到用户选择退出
    pub async fn run_interactive(&mut self) -> Result<()> {
        if let Some(notice) = self.blocking_notice() {
            print_notice(&notice);
            return Err(anyhow!(messages::WEBHOOK_NOT_CONFIGURED));
        }

        println!("{}", "Student Registration".bold());

        loop {
            for field in [Field::StudentName, Field::StudentNumber, Field::ParentPhone] {
                let value = self.prompt_text(field)?;
                self.form.set_field(field, &value);
            }

            let grade = self.prompt_grade()?;
            self.form.select_grade(&grade);
            let center = self.prompt_center()?;
            self.form.set_field(Field::Center, &center);

            match self.submit_with_spinner().await {
                Ok(_) => {
                    let again = Confirm::new()
                        .with_prompt("Register another student?")
                        .default(false)
                        .interact()?;
                    if !again {
                        return Ok(());
                    }
                }
                Err(e) => {
                    let fixable = matches!(
                        e.downcast_ref::<AppError>(),
                        Some(AppError::Validation(_)) | Some(AppError::Submission(_))
                    );
                    if !fixable {
                        return Err(e);
                    }
                    let retry = Confirm::new()
                        .with_prompt("Edit and submit again?")
                        .default(true)
                        .interact()?;
                    if !retry {
                        return Err(e);
                    }
                }
            }
        }
    }

    /// 输出某个年级可选的教学点
    pub fn print_centers(&self, grade: &str) -> Result<()> {
        let table = self.form.validator().table();
        let centers = resolver::allowed_centers(table, grade);
        if centers.is_empty() {
            let known: Vec<&str> = resolver::grade_options(table)
                .into_iter()
                .map(|(key, _)| key)
                .collect();
            return Err(anyhow!("未知年级: {} (可选: {})", grade, known.join(", ")));
        }
        for center in centers {
            println!("{:<16} {}", center, resolver::center_label(center));
        }
        Ok(())
    }

    /// 检查配置并输出当前规则
    pub fn check_config(&self) -> Result<()> {
        let validator = self.form.validator();
        for field in [Field::StudentName, Field::StudentNumber, Field::ParentPhone] {
            if let Some(rule) = validator.rules().get(field) {
                println!(
                    "{:<16} {}-{} chars, {} ({})",
                    field.label(),
                    rule.min_length,
                    rule.max_length,
                    rule.pattern_description,
                    rule.pattern()
                );
            }
        }
        for (key, label) in resolver::grade_options(validator.table()) {
            println!(
                "{:<16} {:<18} {}",
                key,
                label,
                resolver::allowed_centers(validator.table(), key).join(", ")
            );
        }

        match self.form.flow().endpoint() {
            Ok(client) => {
                println!("{} webhook: {}", "✓".green(), client.endpoint());
                Ok(())
            }
            Err(e) => {
                println!("{} {}", "✗".red(), e);
                Err(anyhow!(messages::WEBHOOK_NOT_CONFIGURED))
            }
        }
    }

    // ========== 内部辅助函数 ==========

    /// webhook 配置有误时返回应展示的提示
    fn blocking_notice(&self) -> Option<Notice> {
        if self.form.flow().endpoint().is_ok() {
            return None;
        }
        self.form.notice().cloned()
    }

    async fn submit_with_spinner(&mut self) -> Result<Confirmation> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Submitting...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.form.submit().await;
        spinner.finish_and_clear();

        match result {
            Ok(confirmation) => {
                if let Some(notice) = self.form.notice() {
                    print_notice(notice);
                }
                println!("{}", messages::SUCCESS_DETAILS);
                Ok(confirmation)
            }
            Err(AppError::Validation(errors)) => {
                print_field_errors(&self.form);
                Err(AppError::Validation(errors).into())
            }
            Err(e) => {
                if let Some(notice) = self.form.notice() {
                    print_notice(notice);
                }
                Err(e.into())
            }
        }
    }

    fn prompt_text(&self, field: Field) -> Result<String> {
        let validator = self.form.validator();
        let current = self.form.input().clone();

        let value = Input::<String>::new()
            .with_prompt(field.label())
            .with_initial_text(current.value(field).to_string())
            .validate_with(|raw: &String| -> Result<(), String> {
                let candidate = current.clone().with(field, raw.as_str());
                match validator.validate_field(field, &candidate) {
                    FieldOutcome::Invalid(err) => Err(err.to_string()),
                    _ => Ok(()),
                }
            })
            .interact_text()?;

        Ok(value)
    }

    fn prompt_grade(&self) -> Result<String> {
        let options = resolver::grade_options(self.form.validator().table());
        let labels: Vec<&str> = options.iter().map(|(_, label)| *label).collect();
        let current = options
            .iter()
            .position(|(key, _)| *key == self.form.input().grade_level)
            .unwrap_or(0);

        let selection = Select::new()
            .with_prompt(Field::GradeLevel.label())
            .items(&labels)
            .default(current)
            .interact()?;

        Ok(options[selection].0.to_string())
    }

    fn prompt_center(&self) -> Result<String> {
        let centers = self.form.allowed_centers();
        if centers.is_empty() {
            return Err(anyhow!(messages::required_message(Field::GradeLevel)));
        }
        let labels: Vec<String> = centers.iter().map(|c| resolver::center_label(c)).collect();
        let current = centers
            .iter()
            .position(|c| *c == self.form.input().center)
            .unwrap_or(0);

        let selection = Select::new()
            .with_prompt(Field::Center.label())
            .items(&labels)
            .default(current)
            .interact()?;

        Ok(centers[selection].clone())
    }
}

// ========== 终端渲染 ==========

fn print_notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Success => {
            if let Some(title) = &notice.title {
                println!("{}", title.green().bold());
            }
            println!("{}", notice.message.green());
        }
        NoticeKind::Error => println!("{}", notice.message.red()),
    }
}

fn print_field_errors(form: &RegistrationForm) {
    for field in Field::ALL {
        if let FieldState::Invalid(msg) = form.state().get(field) {
            println!("{} {}: {}", "✗".red(), field.label(), msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_centers_rejects_unknown_grade() {
        let app = App::initialize(Config::default());
        assert!(app.print_centers("3rd prep").is_ok());
        let err = app.print_centers("4th sec").unwrap_err();
        assert!(err.to_string().contains("1st prep"));
    }

    #[test]
    fn test_check_config_reports_placeholder() {
        let app = App::initialize(Config::default());
        assert!(app.check_config().is_err());

        let config = Config {
            webhook_url: "https://example.com/hook".to_string(),
            ..Config::default()
        };
        assert!(App::initialize(config).check_config().is_ok());
    }

    #[tokio::test]
    async fn test_run_once_refuses_without_endpoint() {
        let mut app = App::initialize(Config::default());
        let input = FormInput::default().with(Field::StudentName, "John Smith");
        let err = app.run_once(input).await.unwrap_err();
        assert_eq!(err.to_string(), messages::WEBHOOK_NOT_CONFIGURED);
        assert!(app.form().input().is_empty());
    }
}
