pub mod resolver;
pub mod sheet_writer;
pub mod validator;

pub use sheet_writer::{SheetResponse, SheetWriter};
pub use validator::{FieldOutcome, FieldRule, ValidationRules, Validator};
