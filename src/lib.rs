//! # Student Registration
//!
//! 学生报名表：实时校验、年级 → 教学点联动，并把报名记录提交到表格 webhook。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 表单输入、报名记录、年级教学点表、提示文案
//!
//! ### ② 业务能力层（Services）
//! - `Validator` - 字段校验（含学号 / 家长电话不可相同）
//! - `resolver` - 年级 → 可选教学点
//! - `SheetWriter` - 表格接收端的写入约定
//!
//! ### ③ 客户端（Clients）
//! - `WebhookClient` - 一次 JSON POST，解释响应状态
//!
//! ### ④ 流程层（Workflow）
//! - `SubmissionFlow` - 槽位 → 配置检查 → 校验 → 提交
//! - `RegistrationForm` - 输入、字段状态和提示信息
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator::App` - 命令行 / 交互式终端
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{Confirmation, WebhookClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{FormInput, RegistrationRecord};
pub use orchestrator::App;
pub use services::Validator;
pub use workflow::{RegistrationForm, SubmissionFlow};
