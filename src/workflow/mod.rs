pub mod form_state;
pub mod registration_form;
pub mod submission_flow;

pub use form_state::{FieldState, FormState, Notice, NoticeKind};
pub use registration_form::RegistrationForm;
pub use submission_flow::SubmissionFlow;
