//! 编排层（Orchestration Layer）
//!
//! 负责应用生命周期和终端交互，是整个系统的"指挥中心"。
//!
//! ```text
//! orchestrator::App (终端交互)
//!     ↓
//! workflow::RegistrationForm / SubmissionFlow (一次报名)
//!     ↓
//! services (能力层：validator / resolver)   clients (webhook)
//! ```

pub mod app;

pub use app::App;
