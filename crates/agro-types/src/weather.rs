use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一次天气采样：某位置某时刻的读数，生成后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSample {
    pub location: String,

    /// 温度（°C）
    pub temperature: f64,

    /// 降雨量（mm）
    pub rainfall: f64,

    /// 风速（km/h）
    pub wind_speed: f64,

    /// 天气状况描述
    pub condition: String,

    pub captured_at: DateTime<Utc>,
}

impl WeatherSample {
    pub fn new(
        location: impl Into<String>,
        temperature: f64,
        rainfall: f64,
        wind_speed: f64,
    ) -> Self {
        Self {
            location: location.into(),
            temperature,
            rainfall,
            wind_speed,
            condition: "unknown".to_string(),
            captured_at: Utc::now(),
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }
}

/// 天气读数存档记录（历史数据，由采样路径顺带写入）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location: String,
    pub temp: f64,
    pub rain: f64,
    pub wind: f64,
    pub recorded_at: DateTime<Utc>,
}

impl WeatherReading {
    pub fn from_sample(sample: &WeatherSample) -> Self {
        Self {
            location: sample.location.clone(),
            temp: sample.temperature,
            rain: sample.rainfall,
            wind: sample.wind_speed,
            recorded_at: Utc::now(),
        }
    }
}
