use agro_core::Result;
use agro_types::{AlertType, NotificationLog};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// 通知日志存储接口
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn save(&self, log: NotificationLog) -> Result<()>;

    /// 查找某 (作物, 告警类型) 自 since 起最近一条实际发出的通知
    async fn find_recent_sent(
        &self,
        crop_id: i64,
        alert_type: AlertType,
        since: DateTime<Utc>,
    ) -> Result<Option<NotificationLog>>;

    async fn find_by_event(&self, event_id: &str) -> Result<Vec<NotificationLog>>;

    /// 级联清理：删除一批事件的全部通知日志
    async fn delete_by_events(&self, event_ids: &[String]) -> Result<()>;
}

/// 通知日志存储（内存实现）
pub struct MemoryNotificationStore {
    logs: Arc<RwLock<Vec<NotificationLog>>>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }

    pub async fn all(&self) -> Vec<NotificationLog> {
        self.logs.read().await.clone()
    }
}

impl Default for MemoryNotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn save(&self, log: NotificationLog) -> Result<()> {
        let mut logs = self.logs.write().await;
        logs.push(log);
        Ok(())
    }

    async fn find_recent_sent(
        &self,
        crop_id: i64,
        alert_type: AlertType,
        since: DateTime<Utc>,
    ) -> Result<Option<NotificationLog>> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .filter(|l| {
                l.crop_id == crop_id
                    && l.alert_type == alert_type
                    && l.email_sent
                    && l.email_sent_at.map(|at| at >= since).unwrap_or(false)
            })
            .max_by_key(|l| l.email_sent_at)
            .cloned())
    }

    async fn find_by_event(&self, event_id: &str) -> Result<Vec<NotificationLog>> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .filter(|l| l.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn delete_by_events(&self, event_ids: &[String]) -> Result<()> {
        let mut logs = self.logs.write().await;
        logs.retain(|l| !event_ids.contains(&l.event_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_types::{AlertEvent, Farmer};
    use chrono::Duration;

    fn sent_log(crop_id: i64, alert_type: AlertType) -> NotificationLog {
        let event = AlertEvent::new(1, crop_id, "Wheat", alert_type, 40.0, 0.0, 5.0, 35.0);
        let farmer = Farmer::new(1, "Ravi", "Pune").with_email("ravi@example.com");
        let mut log = NotificationLog::new(&event, &farmer, "body");
        log.mark_sent();
        log
    }

    #[tokio::test]
    async fn find_recent_sent_ignores_unsent_and_other_keys() {
        let store = MemoryNotificationStore::new();
        let since = Utc::now() - Duration::hours(24);

        // 未发送的日志不参与冷却判断
        let event = AlertEvent::new(1, 1, "Wheat", AlertType::HighTemperature, 40.0, 0.0, 5.0, 35.0);
        let farmer = Farmer::new(1, "Ravi", "Pune");
        store
            .save(NotificationLog::new(&event, &farmer, "body"))
            .await
            .unwrap();
        assert!(store
            .find_recent_sent(1, AlertType::HighTemperature, since)
            .await
            .unwrap()
            .is_none());

        store
            .save(sent_log(1, AlertType::HighTemperature))
            .await
            .unwrap();
        assert!(store
            .find_recent_sent(1, AlertType::HighTemperature, since)
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_recent_sent(1, AlertType::LowTemperature, since)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_recent_sent(2, AlertType::HighTemperature, since)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn sends_outside_window_do_not_match() {
        let store = MemoryNotificationStore::new();
        let mut log = sent_log(1, AlertType::HeavyRainfall);
        log.email_sent_at = Some(Utc::now() - Duration::hours(30));
        store.save(log).await.unwrap();

        let since = Utc::now() - Duration::hours(24);
        assert!(store
            .find_recent_sent(1, AlertType::HeavyRainfall, since)
            .await
            .unwrap()
            .is_none());
    }
}
