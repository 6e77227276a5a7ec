use agro_core::Result;
use agro_types::{AlertEvent, CropProfile, Farmer, NotificationLog};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::message::{compose_body, compose_subject};
use crate::notifier::{Notifier, OutboundMessage};
use crate::store::NotificationStore;

/// 默认冷却窗口：同一 (作物, 告警类型) 24 小时内至多发一封
pub const DEFAULT_COOLDOWN_HOURS: i64 = 24;

/// 通知服务：按 禁用 → 无收件人 → 冷却 的顺序做门控，
/// 每条告警事件无论是否实际发送都固定写入一条通知日志
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
    notifier: Arc<dyn Notifier>,
    cooldown: Duration,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            cooldown: Duration::hours(DEFAULT_COOLDOWN_HOURS),
        }
    }

    pub fn with_cooldown_hours(mut self, hours: i64) -> Self {
        self.cooldown = Duration::hours(hours);
        self
    }

    /// 处理一条新建告警事件，返回写入的通知日志
    pub async fn notify(
        &self,
        event: &AlertEvent,
        profile: &CropProfile,
        farmer: &Farmer,
    ) -> Result<NotificationLog> {
        let mut log = NotificationLog::new(event, farmer, compose_body(event));

        if self.should_send(event, profile, farmer).await? {
            let message = OutboundMessage {
                to: log.farmer_email.clone(),
                subject: compose_subject(event),
                body: log.message.clone(),
            };

            if self.notifier.is_enabled() {
                match self.notifier.send(&message).await {
                    Ok(result) if result.success => {
                        log.mark_sent();
                        info!(
                            farmer_email = %log.farmer_email,
                            crop_name = %event.crop_name,
                            alert_type = %event.alert_type,
                            "Email sent"
                        );
                    }
                    Ok(result) => {
                        error!(
                            farmer_email = %log.farmer_email,
                            reason = %result.message,
                            "Email send failed"
                        );
                    }
                    Err(e) => {
                        error!(farmer_email = %log.farmer_email, error = %e, "Email send error");
                    }
                }
            } else {
                warn!(
                    notifier = %self.notifier.name(),
                    farmer_email = %log.farmer_email,
                    "Notifier disabled, email not sent"
                );
            }
        }

        self.store.save(log.clone()).await?;
        Ok(log)
    }

    /// 门控判定，按固定优先级短路
    async fn should_send(
        &self,
        event: &AlertEvent,
        profile: &CropProfile,
        farmer: &Farmer,
    ) -> Result<bool> {
        // 1. 档案禁用了通知：直接放弃，不查冷却
        if !profile.email_enabled {
            info!(
                crop_name = %event.crop_name,
                "Email disabled for crop, skipping notification"
            );
            return Ok(false);
        }

        // 2. 无有效收件人
        if !farmer.has_valid_email() {
            warn!(
                crop_name = %event.crop_name,
                farmer_id = farmer.id,
                "Farmer has no email address, skipping notification"
            );
            return Ok(false);
        }

        // 3. 冷却窗口内已有成功发送
        let since = Utc::now() - self.cooldown;
        if self
            .store
            .find_recent_sent(event.crop_id, event.alert_type, since)
            .await?
            .is_some()
        {
            info!(
                crop_name = %event.crop_name,
                alert_type = %event.alert_type,
                cooldown_hours = self.cooldown.num_hours(),
                "Cooldown active, skipping email"
            );
            return Ok(false);
        }

        Ok(true)
    }
}
