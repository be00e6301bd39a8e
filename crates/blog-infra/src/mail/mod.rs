//! Mail sender implementations.

mod console;
mod memory;

pub use console::ConsoleMailSender;
pub use memory::InMemoryMailSender;

#[cfg(feature = "mail-webhook")]
mod webhook;
#[cfg(feature = "mail-webhook")]
pub use webhook::WebhookMailSender;
