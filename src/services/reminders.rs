//! Daily reminder scheduling
//!
//! Morning/evening verse reminders and the optional prayer alarms are
//! all daily-at-HH:MM jobs running on a cron scheduler. Job ids are
//! retained so a settings change cancels every live job before adding
//! the new set.

use crate::config;
use crate::error::{AppError, Result};
use crate::models::AppSettings;
use crate::services::notifications::{NotificationRequest, Notifier};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

/// Parse an "HH:MM" time-of-day string.
fn parse_time(value: &str) -> Result<(u32, u32)> {
    let (hour, minute) = value
        .split_once(':')
        .ok_or_else(|| AppError::InvalidTime(value.to_string()))?;

    let hour: u32 = hour
        .parse()
        .map_err(|_| AppError::InvalidTime(value.to_string()))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| AppError::InvalidTime(value.to_string()))?;

    if hour > 23 || minute > 59 {
        return Err(AppError::InvalidTime(value.to_string()));
    }

    Ok((hour, minute))
}

/// Cron expression for a daily job at the given time.
fn daily_cron(hour: u32, minute: u32) -> String {
    format!("0 {} {} * * *", minute, hour)
}

/// Scheduler for daily verse reminders and prayer alarms.
pub struct DailyReminderService {
    scheduler: Arc<RwLock<JobScheduler>>,
    notifier: Arc<dyn Notifier>,
    job_ids: Arc<RwLock<Vec<Uuid>>>,
}

impl DailyReminderService {
    pub async fn new(notifier: Arc<dyn Notifier>) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler: Arc::new(RwLock::new(scheduler)),
            notifier,
            job_ids: Arc::new(RwLock::new(Vec::new())),
        })
    }

    /// Start the underlying scheduler.
    pub async fn start(&self) -> Result<()> {
        let scheduler = self.scheduler.read().await;
        scheduler
            .start()
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to start scheduler: {}", e)))?;
        tracing::info!("Daily reminder scheduler started");
        Ok(())
    }

    /// Replace every scheduled reminder with the set derived from
    /// `settings`. Cancels first so a re-schedule never duplicates jobs.
    pub async fn reschedule(&self, settings: &AppSettings, user_name: &str) -> Result<()> {
        self.cancel_all().await?;

        if !settings.notifications_enabled {
            tracing::info!("Daily reminders disabled");
            return Ok(());
        }

        self.add_daily_job(
            &settings.morning_time,
            format!(
                "Bom dia, {}! Seu versículo de hoje está esperando por você.",
                user_name
            ),
            "daily-verse-morning",
        )
        .await?;

        self.add_daily_job(
            &settings.evening_time,
            format!(
                "Boa noite, {}! Que tal um momento com a Palavra antes de dormir?",
                user_name
            ),
            "daily-verse-evening",
        )
        .await?;

        let alarm = &settings.prayer_alarm;
        if alarm.enabled {
            if alarm.morning_enabled {
                self.add_daily_job(
                    &alarm.morning_time,
                    format!("{}, é hora da sua oração da manhã.", user_name),
                    "prayer-alarm-morning",
                )
                .await?;
            }
            if alarm.evening_enabled {
                self.add_daily_job(
                    &alarm.evening_time,
                    format!("{}, é hora da sua oração da noite.", user_name),
                    "prayer-alarm-evening",
                )
                .await?;
            }
        }

        let count = self.job_ids.read().await.len();
        tracing::info!("Scheduled {} daily reminders", count);
        Ok(())
    }

    async fn add_daily_job(&self, time: &str, body: String, tag: &str) -> Result<()> {
        let (hour, minute) = parse_time(time)?;
        let cron_expr = daily_cron(hour, minute);

        let notifier = Arc::clone(&self.notifier);
        let tag = tag.to_string();

        let job = Job::new_async(cron_expr.clone(), move |_uuid, _l| {
            let notifier = Arc::clone(&notifier);
            let body = body.clone();
            let tag = tag.clone();
            Box::pin(async move {
                let request = NotificationRequest {
                    title: config::NOTIFICATION_TITLE.to_string(),
                    body,
                    icon: Some("/favicon.ico".to_string()),
                    tag: Some(tag),
                    action: None,
                };
                if let Err(e) = notifier.notify(&request) {
                    tracing::error!("Failed to send daily reminder: {}", e);
                }
            })
        })
        .map_err(|e| AppError::Scheduler(format!("Failed to create job: {}", e)))?;

        let job_id = job.guid();

        let scheduler = self.scheduler.write().await;
        scheduler
            .add(job)
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to schedule job: {}", e)))?;

        self.job_ids.write().await.push(job_id);

        tracing::debug!("Scheduled daily job at {} ({})", time, cron_expr);
        Ok(())
    }

    /// Cancel every scheduled reminder.
    pub async fn cancel_all(&self) -> Result<()> {
        let mut job_ids = self.job_ids.write().await;

        if job_ids.is_empty() {
            return Ok(());
        }

        let scheduler = self.scheduler.write().await;
        for job_id in job_ids.drain(..) {
            scheduler
                .remove(&job_id)
                .await
                .map_err(|e| AppError::Scheduler(format!("Failed to remove job: {}", e)))?;
        }

        tracing::info!("Daily reminders cancelled");
        Ok(())
    }

    /// Shutdown the scheduler gracefully.
    pub async fn shutdown(&self) -> Result<()> {
        let mut scheduler = self.scheduler.write().await;
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to shutdown scheduler: {}", e)))?;
        tracing::info!("Daily reminder scheduler shutdown");
        Ok(())
    }

    #[cfg(test)]
    async fn job_count(&self) -> usize {
        self.job_ids.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrayerAlarmSettings;
    use crate::services::notifications::LogNotifier;

    #[test]
    fn test_parse_time_valid() {
        assert_eq!(parse_time("07:00").unwrap(), (7, 0));
        assert_eq!(parse_time("23:59").unwrap(), (23, 59));
    }

    #[test]
    fn test_parse_time_invalid() {
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("12:60").is_err());
        assert!(parse_time("noon").is_err());
        assert!(parse_time("7").is_err());
    }

    #[test]
    fn test_daily_cron_expression() {
        assert_eq!(daily_cron(7, 0), "0 0 7 * * *");
        assert_eq!(daily_cron(20, 30), "0 30 20 * * *");
    }

    #[tokio::test]
    async fn test_reschedule_adds_morning_and_evening_jobs() {
        let service = DailyReminderService::new(Arc::new(LogNotifier)).await.unwrap();

        service
            .reschedule(&AppSettings::default(), "Ana")
            .await
            .unwrap();

        assert_eq!(service.job_count().await, 2);
        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_disabled_notifications_schedule_nothing() {
        let service = DailyReminderService::new(Arc::new(LogNotifier)).await.unwrap();

        let settings = AppSettings {
            notifications_enabled: false,
            ..AppSettings::default()
        };
        service.reschedule(&settings, "Ana").await.unwrap();

        assert_eq!(service.job_count().await, 0);
        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_prayer_alarms_add_extra_jobs() {
        let service = DailyReminderService::new(Arc::new(LogNotifier)).await.unwrap();

        let settings = AppSettings {
            prayer_alarm: PrayerAlarmSettings {
                enabled: true,
                morning_enabled: true,
                evening_enabled: true,
                ..PrayerAlarmSettings::default()
            },
            ..AppSettings::default()
        };
        service.reschedule(&settings, "Ana").await.unwrap();

        assert_eq!(service.job_count().await, 4);
        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_reschedule_replaces_previous_jobs() {
        let service = DailyReminderService::new(Arc::new(LogNotifier)).await.unwrap();

        service
            .reschedule(&AppSettings::default(), "Ana")
            .await
            .unwrap();
        service
            .reschedule(&AppSettings::default(), "Ana")
            .await
            .unwrap();

        assert_eq!(service.job_count().await, 2);
        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_time_is_rejected() {
        let service = DailyReminderService::new(Arc::new(LogNotifier)).await.unwrap();

        let settings = AppSettings {
            morning_time: "25:00".to_string(),
            ..AppSettings::default()
        };

        assert!(service.reschedule(&settings, "Ana").await.is_err());
        service.shutdown().await.unwrap();
    }
}
