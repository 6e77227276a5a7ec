use agro_core::{AgroError, Result};
use agro_notify::EmailConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 监控服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// 轮询间隔（秒）
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,

    /// 天气服务地址
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,

    /// 天气请求超时（毫秒）
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// 通知冷却窗口（小时）
    #[serde(default = "default_cooldown_hours")]
    pub cooldown_hours: i64,

    /// SMTP 邮件配置，缺省时不发送邮件
    #[serde(default)]
    pub email: Option<EmailConfig>,
}

fn default_check_interval_secs() -> u64 {
    3600
}

fn default_weather_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

fn default_cooldown_hours() -> i64 {
    24
}

impl MonitorConfig {
    /// 从文件加载配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| AgroError::Config(e.to_string()))?;
        Ok(config)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 3600,
            weather_base_url: "http://localhost:8081".to_string(),
            fetch_timeout_ms: 10_000,
            cooldown_hours: 24,
            email: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_hourly_with_24h_cooldown() {
        let config = MonitorConfig::default();
        assert_eq!(config.check_interval_secs, 3600);
        assert_eq!(config.cooldown_hours, 24);
        assert!(config.email.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: MonitorConfig = toml::from_str(
            r#"
            check_interval_secs = 600
            weather_base_url = "http://weather:8081"
            "#,
        )
        .unwrap();

        assert_eq!(config.check_interval_secs, 600);
        assert_eq!(config.weather_base_url, "http://weather:8081");
        assert_eq!(config.fetch_timeout_ms, 10_000);
        assert_eq!(config.cooldown_hours, 24);
    }

    #[test]
    fn email_section_is_parsed() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [email]
            smtp_host = "smtp.example.com"
            smtp_port = 587
            username = "alerts"
            password = "secret"
            from = "alerts@example.com"
            "#,
        )
        .unwrap();

        let email = config.email.unwrap();
        assert_eq!(email.smtp_host, "smtp.example.com");
        assert_eq!(email.smtp_port, 587);
    }
}
