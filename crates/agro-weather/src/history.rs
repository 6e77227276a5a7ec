use agro_core::Result;
use agro_types::WeatherReading;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 天气读数存档接口
#[async_trait]
pub trait ReadingStore: Send + Sync {
    async fn save(&self, reading: WeatherReading) -> Result<()>;
    async fn find_by_location(&self, location: &str) -> Result<Vec<WeatherReading>>;
}

/// 读数存档（内存实现）
pub struct MemoryReadingStore {
    readings: Arc<RwLock<Vec<WeatherReading>>>,
}

impl MemoryReadingStore {
    pub fn new() -> Self {
        Self {
            readings: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.readings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.readings.read().await.is_empty()
    }
}

impl Default for MemoryReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadingStore for MemoryReadingStore {
    async fn save(&self, reading: WeatherReading) -> Result<()> {
        let mut readings = self.readings.write().await;
        readings.push(reading);
        Ok(())
    }

    async fn find_by_location(&self, location: &str) -> Result<Vec<WeatherReading>> {
        let readings = self.readings.read().await;
        Ok(readings
            .iter()
            .filter(|r| r.location == location)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_types::WeatherSample;

    #[tokio::test]
    async fn saves_and_filters_by_location() {
        let store = MemoryReadingStore::new();

        let pune = WeatherSample::new("Pune", 30.0, 1.0, 10.0);
        let nashik = WeatherSample::new("Nashik", 28.0, 0.0, 6.0);
        store.save(WeatherReading::from_sample(&pune)).await.unwrap();
        store
            .save(WeatherReading::from_sample(&nashik))
            .await
            .unwrap();

        assert_eq!(store.len().await, 2);
        let found = store.find_by_location("Pune").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].temp, 30.0);
    }
}
