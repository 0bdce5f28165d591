pub mod webhook_client;

pub use webhook_client::{check_endpoint, Confirmation, WebhookClient};
