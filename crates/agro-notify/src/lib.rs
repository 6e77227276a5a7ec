pub mod message;
pub mod notifier;
pub mod providers;
pub mod service;
pub mod store;

pub use message::{compose_body, compose_subject};
pub use notifier::{MockNotifier, Notifier, NotifyResult, OutboundMessage};
pub use providers::{DisabledNotifier, EmailConfig, EmailNotifier};
pub use service::NotificationService;
pub use store::{MemoryNotificationStore, NotificationStore};
