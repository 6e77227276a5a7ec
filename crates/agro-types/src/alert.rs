use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 告警类型（封闭枚举，每个监测量最多高低两种）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    HighTemperature,
    LowTemperature,
    HeavyRainfall,
    LowRainfall,
    HighWindSpeed,
    LowWindSpeed,
}

impl AlertType {
    pub const ALL: [AlertType; 6] = [
        AlertType::HighTemperature,
        AlertType::LowTemperature,
        AlertType::HeavyRainfall,
        AlertType::LowRainfall,
        AlertType::HighWindSpeed,
        AlertType::LowWindSpeed,
    ];

    /// 面向用户的告警类型名称
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::HighTemperature => "High Temperature",
            AlertType::LowTemperature => "Low Temperature",
            AlertType::HeavyRainfall => "Heavy Rainfall",
            AlertType::LowRainfall => "Low Rainfall",
            AlertType::HighWindSpeed => "High Wind Speed",
            AlertType::LowWindSpeed => "Low Wind Speed",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 告警事件：每个 (作物, 告警类型) 至多存在一条，创建后不再更新
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub id: String,
    pub farmer_id: i64,
    pub crop_id: i64,
    pub crop_name: String,
    pub alert_type: AlertType,

    // 触发时刻的三项读数
    pub temperature: f64,
    pub rainfall: f64,
    pub wind: f64,

    /// 被突破的那条阈值
    pub threshold_value: f64,

    pub event_time: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(
        farmer_id: i64,
        crop_id: i64,
        crop_name: impl Into<String>,
        alert_type: AlertType,
        temperature: f64,
        rainfall: f64,
        wind: f64,
        threshold_value: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            farmer_id,
            crop_id,
            crop_name: crop_name.into(),
            alert_type,
            temperature,
            rainfall,
            wind,
            threshold_value,
            event_time: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_type_display_matches_user_facing_names() {
        assert_eq!(AlertType::HighTemperature.to_string(), "High Temperature");
        assert_eq!(AlertType::HeavyRainfall.to_string(), "Heavy Rainfall");
        assert_eq!(AlertType::LowWindSpeed.to_string(), "Low Wind Speed");
    }
}
