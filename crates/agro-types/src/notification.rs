use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::{AlertEvent, AlertType};
use crate::farmer::Farmer;

/// 通知日志：每条告警事件固定写一条，无论是否实际发送，创建后不再更新
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationLog {
    pub id: String,
    pub event_id: String,
    pub farmer_id: i64,
    pub farmer_email: String,

    // 冷却窗口按 (作物, 告警类型) 查询，这里直接携带，省去与告警事件的关联查询
    pub crop_id: i64,
    pub alert_type: AlertType,

    /// 邮件是否实际发出
    pub email_sent: bool,
    pub email_sent_at: Option<DateTime<Utc>>,

    /// 通知正文
    pub message: String,

    pub created_at: DateTime<Utc>,
}

impl NotificationLog {
    /// 创建未发送状态的日志，发送成功后由调用方调用 `mark_sent`
    pub fn new(event: &AlertEvent, farmer: &Farmer, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event.id.clone(),
            farmer_id: farmer.id,
            farmer_email: farmer.email.clone().unwrap_or_default(),
            crop_id: event.crop_id,
            alert_type: event.alert_type,
            email_sent: false,
            email_sent_at: None,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn mark_sent(&mut self) {
        self.email_sent = true;
        self.email_sent_at = Some(Utc::now());
    }
}
