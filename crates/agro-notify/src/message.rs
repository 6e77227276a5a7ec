use agro_types::AlertEvent;

/// 通知邮件主题
pub fn compose_subject(event: &AlertEvent) -> String {
    format!("Crop Alert: {}", event.crop_name)
}

/// 通知正文：作物、告警类型、触发时刻三项读数、被突破阈值与时间
pub fn compose_body(event: &AlertEvent) -> String {
    format!(
        "Alert for {}: {}\n\
         Current Temperature: {:.2}°C\n\
         Current Rainfall: {:.2} mm\n\
         Current Wind Speed: {:.2} km/h\n\
         Threshold: {:.2}\n\
         Time: {}",
        event.crop_name,
        event.alert_type,
        event.temperature,
        event.rainfall,
        event.wind,
        event.threshold_value,
        event.event_time,
    )
}
