use crate::notifier::{Notifier, NotifyResult, OutboundMessage};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// 邮件通知
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

pub struct EmailNotifier {
    config: EmailConfig,
    enabled: bool,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            enabled: true,
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<NotifyResult> {
        use lettre::message::header::ContentType;
        use lettre::transport::smtp::authentication::Credentials;
        use lettre::{Message, SmtpTransport, Transport};

        let email = Message::builder()
            .from(self.config.from.parse()?)
            .to(message.to.parse()?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())?;

        let creds = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let mailer = SmtpTransport::relay(&self.config.smtp_host)?
            .credentials(creds)
            .port(self.config.smtp_port)
            .build();

        match mailer.send(&email) {
            Ok(_) => Ok(NotifyResult::success()),
            Err(e) => Ok(NotifyResult::failure(format!("Email send failed: {}", e))),
        }
    }

    fn name(&self) -> &str {
        "email"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

// ============================================================================
// 占位通知器（未配置邮件时使用，始终不发送）
// ============================================================================

pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, _message: &OutboundMessage) -> Result<NotifyResult> {
        Ok(NotifyResult::failure("notifier disabled"))
    }

    fn name(&self) -> &str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
