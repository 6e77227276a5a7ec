use agro_core::Result;
use agro_types::{AlertEvent, AlertType};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 告警事件存储接口
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// 该 (作物, 告警类型) 是否已有记录（永久去重检查）
    async fn exists(&self, crop_id: i64, alert_type: AlertType) -> Result<bool>;

    async fn insert(&self, event: AlertEvent) -> Result<()>;

    /// 按农户查询，按时间倒序
    async fn find_by_farmer(&self, farmer_id: i64) -> Result<Vec<AlertEvent>>;

    /// 按作物查询，按时间倒序
    async fn find_by_crop(&self, crop_id: i64) -> Result<Vec<AlertEvent>>;

    /// 删除某作物的全部事件，返回被删事件 id（供级联清理通知日志）
    async fn delete_by_crop(&self, crop_id: i64) -> Result<Vec<String>>;
}

/// 告警事件存储（内存实现）
pub struct MemoryAlertStore {
    events: Arc<RwLock<Vec<AlertEvent>>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }
}

impl Default for MemoryAlertStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn exists(&self, crop_id: i64, alert_type: AlertType) -> Result<bool> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .any(|e| e.crop_id == crop_id && e.alert_type == alert_type))
    }

    async fn insert(&self, event: AlertEvent) -> Result<()> {
        let mut events = self.events.write().await;
        events.push(event);
        Ok(())
    }

    async fn find_by_farmer(&self, farmer_id: i64) -> Result<Vec<AlertEvent>> {
        let events = self.events.read().await;
        let mut found: Vec<AlertEvent> = events
            .iter()
            .filter(|e| e.farmer_id == farmer_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.event_time.cmp(&a.event_time));
        Ok(found)
    }

    async fn find_by_crop(&self, crop_id: i64) -> Result<Vec<AlertEvent>> {
        let events = self.events.read().await;
        let mut found: Vec<AlertEvent> = events
            .iter()
            .filter(|e| e.crop_id == crop_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.event_time.cmp(&a.event_time));
        Ok(found)
    }

    async fn delete_by_crop(&self, crop_id: i64) -> Result<Vec<String>> {
        let mut events = self.events.write().await;
        let removed: Vec<String> = events
            .iter()
            .filter(|e| e.crop_id == crop_id)
            .map(|e| e.id.clone())
            .collect();
        events.retain(|e| e.crop_id != crop_id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(crop_id: i64, alert_type: AlertType) -> AlertEvent {
        AlertEvent::new(1, crop_id, "Wheat", alert_type, 40.0, 0.0, 5.0, 35.0)
    }

    #[tokio::test]
    async fn exists_is_keyed_on_crop_and_type() {
        let store = MemoryAlertStore::new();
        store
            .insert(event(1, AlertType::HighTemperature))
            .await
            .unwrap();

        assert!(store.exists(1, AlertType::HighTemperature).await.unwrap());
        assert!(!store.exists(1, AlertType::LowTemperature).await.unwrap());
        assert!(!store.exists(2, AlertType::HighTemperature).await.unwrap());
    }

    #[tokio::test]
    async fn delete_by_crop_returns_removed_ids() {
        let store = MemoryAlertStore::new();
        let e1 = event(1, AlertType::HighTemperature);
        let e1_id = e1.id.clone();
        store.insert(e1).await.unwrap();
        store.insert(event(2, AlertType::HeavyRainfall)).await.unwrap();

        let removed = store.delete_by_crop(1).await.unwrap();
        assert_eq!(removed, vec![e1_id]);
        assert_eq!(store.len().await, 1);
    }
}
