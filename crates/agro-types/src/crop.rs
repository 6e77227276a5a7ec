use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 作物阈值档案：每个被监控作物一份，任一边界都可以缺省（该侧不设限）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfile {
    pub id: i64,
    pub farmer_id: i64,
    pub crop_name: String,

    /// 种植季节（Kharif / Rabi / Zaid）
    pub season: String,

    // 温度阈值（°C）
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,

    // 降雨阈值（mm）
    pub min_rain: Option<f64>,
    pub max_rain: Option<f64>,

    // 风速阈值（km/h）
    pub min_wind: Option<f64>,
    pub max_wind: Option<f64>,

    /// 是否允许邮件告警
    pub email_enabled: bool,

    /// 是否允许短信告警（仅保留字段，发送通道不在本系统内）
    pub sms_enabled: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CropProfile {
    pub fn new(
        id: i64,
        farmer_id: i64,
        crop_name: impl Into<String>,
        season: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            farmer_id,
            crop_name: crop_name.into(),
            season: season.into(),
            min_temp: None,
            max_temp: None,
            min_rain: None,
            max_rain: None,
            min_wind: None,
            max_wind: None,
            email_enabled: true,
            sms_enabled: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_temp_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_temp = min;
        self.max_temp = max;
        self
    }

    pub fn with_rain_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_rain = min;
        self.max_rain = max;
        self
    }

    pub fn with_wind_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_wind = min;
        self.max_wind = max;
        self
    }

    pub fn with_email_enabled(mut self, enabled: bool) -> Self {
        self.email_enabled = enabled;
        self
    }
}
