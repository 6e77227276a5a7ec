use agro_types::{AlertType, CropProfile, WeatherSample};
use serde::{Deserialize, Serialize};

/// 单项阈值突破：告警类型 + 被突破的那条阈值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    pub alert_type: AlertType,
    pub threshold: f64,
}

/// 按固定顺序（温度、降雨、风速，各自先上界后下界）对一份档案评估一次采样。
/// 纯函数，无副作用；上下界相互独立，未配置的边界不参与判断。
/// 不校验 min < max，配置颠倒时高低两类告警可能同时触发。
pub fn evaluate(profile: &CropProfile, sample: &WeatherSample) -> Vec<Breach> {
    // 监测量映射表：读数、上界、下界、对应的高/低告警类型
    let checks: [(f64, Option<f64>, Option<f64>, AlertType, AlertType); 3] = [
        (
            sample.temperature,
            profile.max_temp,
            profile.min_temp,
            AlertType::HighTemperature,
            AlertType::LowTemperature,
        ),
        (
            sample.rainfall,
            profile.max_rain,
            profile.min_rain,
            AlertType::HeavyRainfall,
            AlertType::LowRainfall,
        ),
        (
            sample.wind_speed,
            profile.max_wind,
            profile.min_wind,
            AlertType::HighWindSpeed,
            AlertType::LowWindSpeed,
        ),
    ];

    let mut breaches = Vec::new();
    for (value, max, min, high, low) in checks {
        if let Some(limit) = max {
            if value > limit {
                breaches.push(Breach {
                    alert_type: high,
                    threshold: limit,
                });
            }
        }
        if let Some(limit) = min {
            if value < limit {
                breaches.push(Breach {
                    alert_type: low,
                    threshold: limit,
                });
            }
        }
    }

    breaches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> CropProfile {
        CropProfile::new(1, 1, "Wheat", "Rabi")
    }

    #[test]
    fn high_temperature_carries_its_own_threshold() {
        let profile = profile().with_temp_range(None, Some(35.0));
        let sample = WeatherSample::new("Pune", 40.0, 0.0, 5.0);

        let breaches = evaluate(&profile, &sample);
        assert_eq!(breaches.len(), 1);
        assert_eq!(breaches[0].alert_type, AlertType::HighTemperature);
        assert_eq!(breaches[0].threshold, 35.0);
    }

    #[test]
    fn no_bound_means_no_alert() {
        let profile = profile().with_temp_range(None, Some(35.0));
        let sample = WeatherSample::new("Pune", 20.0, 0.0, 5.0);

        assert!(evaluate(&profile, &sample).is_empty());
    }

    #[test]
    fn value_equal_to_bound_does_not_fire() {
        let profile = profile()
            .with_temp_range(Some(10.0), Some(35.0))
            .with_rain_range(Some(0.0), None);
        let sample = WeatherSample::new("Pune", 35.0, 0.0, 5.0);

        assert!(evaluate(&profile, &sample).is_empty());
    }

    #[test]
    fn multiple_quantities_breach_independently() {
        let profile = profile()
            .with_temp_range(None, Some(35.0))
            .with_wind_range(Some(10.0), None);
        let sample = WeatherSample::new("Pune", 40.0, 0.0, 5.0);

        let breaches = evaluate(&profile, &sample);
        assert_eq!(breaches.len(), 2);
        assert_eq!(breaches[0].alert_type, AlertType::HighTemperature);
        assert_eq!(breaches[0].threshold, 35.0);
        assert_eq!(breaches[1].alert_type, AlertType::LowWindSpeed);
        assert_eq!(breaches[1].threshold, 10.0);
    }

    #[test]
    fn evaluation_order_is_temperature_rain_wind() {
        let profile = profile()
            .with_temp_range(Some(50.0), None)
            .with_rain_range(None, Some(1.0))
            .with_wind_range(None, Some(2.0));
        let sample = WeatherSample::new("Pune", 40.0, 5.0, 9.0);

        let breaches = evaluate(&profile, &sample);
        let types: Vec<AlertType> = breaches.iter().map(|b| b.alert_type).collect();
        assert_eq!(
            types,
            vec![
                AlertType::LowTemperature,
                AlertType::HeavyRainfall,
                AlertType::HighWindSpeed,
            ]
        );
    }

    #[test]
    fn inverted_bounds_fire_both_sides() {
        // min > max 的错误配置不做防御，两侧同时触发
        let profile = profile().with_temp_range(Some(50.0), Some(10.0));
        let sample = WeatherSample::new("Pune", 30.0, 0.0, 5.0);

        let breaches = evaluate(&profile, &sample);
        assert_eq!(breaches.len(), 2);
        assert_eq!(breaches[0].alert_type, AlertType::HighTemperature);
        assert_eq!(breaches[0].threshold, 10.0);
        assert_eq!(breaches[1].alert_type, AlertType::LowTemperature);
        assert_eq!(breaches[1].threshold, 50.0);
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let profile = profile().with_rain_range(None, Some(10.0));
        let sample = WeatherSample::new("Pune", 25.0, 20.0, 5.0);

        assert_eq!(evaluate(&profile, &sample), evaluate(&profile, &sample));
    }
}
