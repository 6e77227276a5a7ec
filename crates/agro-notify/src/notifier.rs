use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 外发通知内容
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// 通知结果
#[derive(Debug, Clone)]
pub struct NotifyResult {
    pub success: bool,
    pub message: String,
}

impl NotifyResult {
    pub fn success() -> Self {
        Self {
            success: true,
            message: "Notification sent successfully".to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// 通知器 trait
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 发送通知
    async fn send(&self, message: &OutboundMessage) -> Result<NotifyResult>;

    /// 通知器名称
    fn name(&self) -> &str;

    /// 是否启用
    fn is_enabled(&self) -> bool {
        true
    }
}

/// 测试用通知器：记录发送内容，可配置为固定失败
pub struct MockNotifier {
    sent: Arc<RwLock<Vec<OutboundMessage>>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail: true,
        }
    }

    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.read().await.clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<NotifyResult> {
        if self.fail {
            return Ok(NotifyResult::failure("mock transport failure"));
        }

        let mut sent = self.sent.write().await;
        sent.push(message.clone());
        Ok(NotifyResult::success())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
