use agro_core::{AgroError, Result};
use agro_types::WeatherSample;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// 天气数据源接口：按位置返回一次当前读数，可能瞬时失败
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_current(&self, location: &str) -> Result<WeatherSample>;
}

/// 测试用数据源：按位置返回预置读数，可指定故障位置
pub struct MockWeatherProvider {
    samples: Arc<RwLock<HashMap<String, WeatherSample>>>,
    failing: Arc<RwLock<HashSet<String>>>,
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        Self {
            samples: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub async fn set_sample(&self, location: impl Into<String>, sample: WeatherSample) {
        let mut samples = self.samples.write().await;
        samples.insert(location.into(), sample);
    }

    /// 让指定位置的采样固定失败
    pub async fn fail_location(&self, location: impl Into<String>) {
        let mut failing = self.failing.write().await;
        failing.insert(location.into());
    }
}

impl Default for MockWeatherProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn fetch_current(&self, location: &str) -> Result<WeatherSample> {
        {
            let failing = self.failing.read().await;
            if failing.contains(location) {
                return Err(AgroError::Fetch(format!(
                    "weather source unreachable for {}",
                    location
                )));
            }
        }

        let samples = self.samples.read().await;
        samples
            .get(location)
            .cloned()
            .ok_or_else(|| AgroError::Fetch(format!("no sample configured for {}", location)))
    }
}
