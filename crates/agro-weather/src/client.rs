use agro_core::{AgroError, Result};
use agro_types::WeatherSample;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::provider::WeatherProvider;

/// HTTP 天气数据源：调用外部天气服务的 `/weather/current` 接口
pub struct HttpWeatherProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpWeatherProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgroError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// 解析 `{"current": {...}}` 响应体
    fn parse_payload(location: &str, payload: &Value) -> Result<WeatherSample> {
        let current = payload
            .get("current")
            .ok_or_else(|| AgroError::Fetch("missing 'current' in weather response".to_string()))?;

        let temperature = current
            .get("temperature")
            .and_then(Value::as_f64)
            .ok_or_else(|| AgroError::Fetch("missing temperature in weather response".to_string()))?;

        // 降雨字段可能缺失，依次尝试 rainfall、rain，都没有按 0.0 处理
        let rainfall = current
            .get("rainfall")
            .or_else(|| current.get("rain"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        let wind_speed = current
            .get("windSpeed")
            .and_then(Value::as_f64)
            .ok_or_else(|| AgroError::Fetch("missing windSpeed in weather response".to_string()))?;

        let condition = current
            .get("condition")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        Ok(WeatherSample {
            location: location.to_string(),
            temperature,
            rainfall,
            wind_speed,
            condition: condition.to_string(),
            captured_at: Utc::now(),
        })
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    async fn fetch_current(&self, location: &str) -> Result<WeatherSample> {
        let url = format!("{}/weather/current", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("location", location)])
            .send()
            .await
            .map_err(|e| AgroError::Fetch(format!("weather request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AgroError::Fetch(format!("weather service returned error: {}", e)))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AgroError::Fetch(format!("invalid weather response body: {}", e)))?;

        let sample = Self::parse_payload(location, &payload)?;
        debug!(
            location = %location,
            temperature = sample.temperature,
            rainfall = sample.rainfall,
            wind_speed = sample.wind_speed,
            "Fetched current weather"
        );

        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_complete_payload() {
        let payload = json!({
            "current": {
                "temperature": 31.5,
                "rainfall": 2.0,
                "windSpeed": 12.0,
                "condition": "cloudy"
            }
        });

        let sample = HttpWeatherProvider::parse_payload("Pune", &payload).unwrap();
        assert_eq!(sample.location, "Pune");
        assert_eq!(sample.temperature, 31.5);
        assert_eq!(sample.rainfall, 2.0);
        assert_eq!(sample.wind_speed, 12.0);
        assert_eq!(sample.condition, "cloudy");
    }

    #[test]
    fn rainfall_falls_back_to_rain_key_then_zero() {
        let payload = json!({
            "current": { "temperature": 25.0, "rain": 4.5, "windSpeed": 8.0 }
        });
        let sample = HttpWeatherProvider::parse_payload("Pune", &payload).unwrap();
        assert_eq!(sample.rainfall, 4.5);
        assert_eq!(sample.condition, "unknown");

        let payload = json!({
            "current": { "temperature": 25.0, "windSpeed": 8.0 }
        });
        let sample = HttpWeatherProvider::parse_payload("Pune", &payload).unwrap();
        assert_eq!(sample.rainfall, 0.0);
    }

    #[test]
    fn missing_current_block_is_a_fetch_error() {
        let payload = json!({ "status": "ok" });
        let err = HttpWeatherProvider::parse_payload("Pune", &payload).unwrap_err();
        assert!(matches!(err, AgroError::Fetch(_)));
    }

    #[test]
    fn missing_temperature_is_a_fetch_error() {
        let payload = json!({ "current": { "windSpeed": 8.0 } });
        let err = HttpWeatherProvider::parse_payload("Pune", &payload).unwrap_err();
        assert!(matches!(err, AgroError::Fetch(_)));
    }
}
