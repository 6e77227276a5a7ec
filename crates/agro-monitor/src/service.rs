use agro_alert::{AlertEngine, AlertStore};
use agro_core::{AgroError, Result};
use agro_notify::{
    DisabledNotifier, EmailNotifier, NotificationService, NotificationStore, Notifier,
};
use agro_types::{AlertEvent, Farmer, WeatherReading};
use agro_weather::{HttpWeatherProvider, ReadingStore, WeatherProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::config::MonitorConfig;
use crate::directory::SubjectDirectory;

/// 一轮巡检的汇总
#[derive(Debug, Clone, Default)]
pub struct PassSummary {
    pub farmers_checked: usize,
    pub farmers_failed: usize,
    pub events_created: usize,
    pub notifications_sent: usize,
}

/// 后台监控任务句柄
pub struct MonitorTaskHandle {
    shutdown_tx: watch::Sender<bool>,
    join_handle: JoinHandle<()>,
}

impl MonitorTaskHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.join_handle.await;
    }

    pub fn abort(self) {
        self.join_handle.abort();
    }
}

/// 监控服务：定时驱动 采样 → 评估 → 记录 → 通知 流水线。
/// 定时全量巡检与按需单农户检查走同一条单农户流水线，
/// 单个农户的失败只记日志，不影响本轮其余农户。
pub struct MonitorService {
    directory: Arc<dyn SubjectDirectory>,
    provider: Arc<dyn WeatherProvider>,
    engine: AlertEngine,
    notifications: NotificationService,

    /// 读数存档（可选，存档失败不影响本次检查）
    readings: Option<Arc<dyn ReadingStore>>,

    /// 巡检间隔（秒）
    check_interval_secs: u64,
}

impl MonitorService {
    pub fn new(
        directory: Arc<dyn SubjectDirectory>,
        provider: Arc<dyn WeatherProvider>,
        engine: AlertEngine,
        notifications: NotificationService,
        check_interval_secs: u64,
    ) -> Self {
        Self {
            directory,
            provider,
            engine,
            notifications,
            readings: None,
            check_interval_secs,
        }
    }

    /// 每次成功采样后把读数归档到给定存储
    pub fn with_reading_store(mut self, store: Arc<dyn ReadingStore>) -> Self {
        self.readings = Some(store);
        self
    }

    /// 按配置组装服务：HTTP 天气源，配置了 SMTP 则用邮件通知器，否则不发送
    pub fn from_config(
        config: &MonitorConfig,
        directory: Arc<dyn SubjectDirectory>,
        alert_store: Arc<dyn AlertStore>,
        notification_store: Arc<dyn NotificationStore>,
        reading_store: Arc<dyn ReadingStore>,
    ) -> Result<Self> {
        let provider = HttpWeatherProvider::new(
            config.weather_base_url.clone(),
            Duration::from_millis(config.fetch_timeout_ms),
        )?;

        let notifier: Arc<dyn Notifier> = match &config.email {
            Some(email) => Arc::new(EmailNotifier::new(email.clone())),
            None => Arc::new(DisabledNotifier),
        };

        Ok(Self::new(
            directory,
            Arc::new(provider),
            AlertEngine::new(alert_store),
            NotificationService::new(notification_store, notifier)
                .with_cooldown_hours(config.cooldown_hours),
            config.check_interval_secs,
        )
        .with_reading_store(reading_store))
    }

    /// 全量巡检：顺序遍历所有农户，逐个执行单农户流水线
    pub async fn run_pass(&self) -> PassSummary {
        let mut summary = PassSummary::default();

        let farmers = match self.directory.list_farmers().await {
            Ok(farmers) => farmers,
            Err(e) => {
                error!(error = %e, "Failed to list farmers, skipping pass");
                return summary;
            }
        };

        for farmer in &farmers {
            if farmer.location.trim().is_empty() {
                debug!(farmer_id = farmer.id, "Farmer has no location, skipping");
                continue;
            }

            summary.farmers_checked += 1;
            match self.check_one(farmer).await {
                Ok((events, sent)) => {
                    summary.events_created += events.len();
                    summary.notifications_sent += sent;
                    debug!(
                        farmer_id = farmer.id,
                        location = %farmer.location,
                        events = events.len(),
                        "Checked weather for farmer"
                    );
                }
                Err(e) => {
                    summary.farmers_failed += 1;
                    error!(
                        farmer_id = farmer.id,
                        location = %farmer.location,
                        error = %e,
                        "Weather check failed for farmer"
                    );
                }
            }
        }

        info!(
            farmers_checked = summary.farmers_checked,
            farmers_failed = summary.farmers_failed,
            events_created = summary.events_created,
            notifications_sent = summary.notifications_sent,
            "Weather pass completed"
        );

        summary
    }

    /// 按需检查单个农户，错误直接返回给调用方
    pub async fn check_farmer(&self, farmer_id: i64) -> Result<Vec<AlertEvent>> {
        let farmer = self
            .directory
            .find_farmer(farmer_id)
            .await?
            .ok_or_else(|| AgroError::NotFound(format!("farmer {}", farmer_id)))?;

        if farmer.location.trim().is_empty() {
            return Err(AgroError::InvalidInput(format!(
                "farmer {} has no location",
                farmer_id
            )));
        }

        let (events, _) = self.check_one(&farmer).await?;
        Ok(events)
    }

    /// 单农户流水线：取样一次，评估该农户的全部作物档案，
    /// 对每条新建事件做门控通知
    async fn check_one(&self, farmer: &Farmer) -> Result<(Vec<AlertEvent>, usize)> {
        let sample = self.provider.fetch_current(&farmer.location).await?;

        if let Some(store) = &self.readings {
            if let Err(e) = store.save(WeatherReading::from_sample(&sample)).await {
                warn!(
                    location = %farmer.location,
                    error = %e,
                    "Failed to archive weather reading"
                );
            }
        }

        let crops = self.directory.crops_of(farmer.id).await?;

        let mut created = Vec::new();
        let mut sent = 0;

        for crop in &crops {
            let events = self.engine.check_sample(crop, &sample).await?;

            for event in events {
                // 通知链路的失败不终止该农户剩余告警的处理
                match self.notifications.notify(&event, crop, farmer).await {
                    Ok(log) if log.email_sent => sent += 1,
                    Ok(_) => {}
                    Err(e) => {
                        error!(
                            event_id = %event.id,
                            crop_id = crop.id,
                            error = %e,
                            "Failed to record notification for alert event"
                        );
                    }
                }
                created.push(event);
            }
        }

        Ok((created, sent))
    }

    /// 启动定时巡检任务，返回可关停的句柄
    pub fn start_monitoring(self: Arc<Self>) -> MonitorTaskHandle {
        info!(
            interval_secs = self.check_interval_secs,
            "Starting scheduled weather monitoring"
        );

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let service = self;

        let join_handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(service.check_interval_secs));

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        service.run_pass().await;
                    }
                    result = shutdown_rx.changed() => {
                        if result.is_err() || *shutdown_rx.borrow() {
                            info!("Monitor task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        MonitorTaskHandle {
            shutdown_tx,
            join_handle,
        }
    }
}
