use agro_core::Result;
use agro_types::{AlertEvent, CropProfile, WeatherSample};
use std::sync::Arc;
use tracing::{debug, info};

use crate::evaluator::{evaluate, Breach};
use crate::store::AlertStore;

/// 单次记录结果
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    /// 本次是否新建了记录（已存在时为 false）
    pub created: bool,
    pub event: AlertEvent,
}

/// 告警引擎：评估采样并对每个新触发的 (作物, 告警类型) 写入一条事件。
/// 存在性检查与插入不构成事务，并发评估可能产生少量重复记录，属可容忍行为。
pub struct AlertEngine {
    store: Arc<dyn AlertStore>,
}

impl AlertEngine {
    pub fn new(store: Arc<dyn AlertStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn AlertStore> {
        &self.store
    }

    /// 先查重后插入；已存在时不插入也不更新原记录
    pub async fn record_if_new(
        &self,
        profile: &CropProfile,
        sample: &WeatherSample,
        breach: &Breach,
    ) -> Result<RecordOutcome> {
        if self.store.exists(profile.id, breach.alert_type).await? {
            debug!(
                crop_id = profile.id,
                alert_type = %breach.alert_type,
                "Alert already recorded, skipping"
            );
            let event = build_event(profile, sample, breach);
            return Ok(RecordOutcome {
                created: false,
                event,
            });
        }

        let event = build_event(profile, sample, breach);
        self.store.insert(event.clone()).await?;
        info!(
            crop_id = profile.id,
            crop_name = %profile.crop_name,
            alert_type = %breach.alert_type,
            threshold = breach.threshold,
            "Alert recorded"
        );

        Ok(RecordOutcome {
            created: true,
            event,
        })
    }

    /// 对一份档案评估一次采样，返回本次新建的事件
    pub async fn check_sample(
        &self,
        profile: &CropProfile,
        sample: &WeatherSample,
    ) -> Result<Vec<AlertEvent>> {
        let mut created = Vec::new();

        for breach in evaluate(profile, sample) {
            let outcome = self.record_if_new(profile, sample, &breach).await?;
            if outcome.created {
                created.push(outcome.event);
            }
        }

        Ok(created)
    }
}

fn build_event(profile: &CropProfile, sample: &WeatherSample, breach: &Breach) -> AlertEvent {
    AlertEvent::new(
        profile.farmer_id,
        profile.id,
        profile.crop_name.clone(),
        breach.alert_type,
        sample.temperature,
        sample.rainfall,
        sample.wind_speed,
        breach.threshold,
    )
}
