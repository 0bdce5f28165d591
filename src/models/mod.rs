pub mod grade;
pub mod messages;
pub mod record;

pub use grade::{GradeCenterTable, GradeEntry};
pub use record::{iso_timestamp_now, Field, FormInput, RegistrationRecord};
