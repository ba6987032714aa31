//! Quiz notification scheduling
//!
//! A notifier port abstracts the host notification capability, and a
//! single self-rearming timer drives the "how are you feeling" quiz
//! reminder every three days. Each firing recomputes the elapsed time
//! from the persisted last-sent timestamp and re-arms itself; there is
//! no cron here.

use crate::config;
use crate::error::Result;
use crate::store::Store;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Host notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Unrequested,
    Granted,
    Denied,
}

/// What the host should do when the user activates a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Refocus the app and open the mood quiz.
    OpenQuiz,
}

/// A notification to present.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
    /// Deduplication tag: a new notification with the same tag replaces
    /// the previous one.
    pub tag: Option<String>,
    pub action: Option<ClickAction>,
}

/// Host notification capability. A host without any notification support
/// must report `Denied` once and keep reporting it for the session; the
/// scheduler never retries or polls for capability.
pub trait Notifier: Send + Sync {
    fn permission(&self) -> PermissionStatus;
    fn request_permission(&self) -> PermissionStatus;
    fn notify(&self, request: &NotificationRequest) -> Result<()>;
}

/// Notifier for headless hosts: always granted, writes to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn notify(&self, request: &NotificationRequest) -> Result<()> {
        tracing::info!("Notification: {} - {}", request.title, request.body);
        Ok(())
    }
}

/// Scheduler lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Uninitialized,
    PermissionUnrequested,
    PermissionDenied,
    Armed,
    Disarmed,
}

struct Inner {
    store: Store,
    notifier: Arc<dyn Notifier>,
    state: Mutex<SchedulerState>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    /// Send the quiz reminder if the interval has elapsed, persisting the
    /// new last-sent timestamp. Returns the delay until the next check.
    fn check_and_send(&self, user_name: &str) -> Duration {
        let last_sent: Option<DateTime<Utc>> = self.store.get(config::KEY_LAST_QUIZ_SENT, None);
        let last = last_sent.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let elapsed_days = (Utc::now() - last).num_days();

        if elapsed_days >= config::QUIZ_INTERVAL_DAYS {
            self.send_quiz(user_name);
            let now = Utc::now();
            self.store.set(config::KEY_LAST_QUIZ_SENT, &now);
            Duration::from_secs(config::QUIZ_INTERVAL_DAYS as u64 * 24 * 60 * 60)
        } else {
            let due = last + chrono::Duration::days(config::QUIZ_INTERVAL_DAYS);
            (due - Utc::now())
                .to_std()
                .unwrap_or(Duration::from_secs(1))
        }
    }

    fn send_quiz(&self, user_name: &str) {
        if self.notifier.permission() != PermissionStatus::Granted {
            return;
        }

        let messages = [
            format!("Olá {}, como você está se sentindo hoje?", user_name),
            format!("{}, que tal compartilhar como está seu coração?", user_name),
            format!("Oi {}, como Deus tem falado contigo hoje?", user_name),
        ];
        let index = rand::thread_rng().gen_range(0..messages.len());

        let request = NotificationRequest {
            title: config::NOTIFICATION_TITLE.to_string(),
            body: messages[index].clone(),
            icon: Some("/favicon.ico".to_string()),
            tag: Some(config::QUIZ_NOTIFICATION_TAG.to_string()),
            action: Some(ClickAction::OpenQuiz),
        };

        if let Err(e) = self.notifier.notify(&request) {
            tracing::error!("Failed to send quiz notification: {}", e);
        }
    }

    fn clear_timer(&self) {
        if let Some(handle) = self.timer.lock().unwrap().take() {
            handle.abort();
        }
    }
}

/// Quiz reminder scheduler. One instance per running app, owned by the
/// composition root; `stop()` releases the timer.
pub struct QuizNotificationService {
    inner: Arc<Inner>,
}

impl QuizNotificationService {
    pub fn new(store: Store, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                notifier,
                state: Mutex::new(SchedulerState::Uninitialized),
                timer: Mutex::new(None),
            }),
        }
    }

    pub fn state(&self) -> SchedulerState {
        *self.inner.state.lock().unwrap()
    }

    /// Ask the host for notification permission. Denial is recorded as a
    /// stable state and only surfaced when the user acts on notifications.
    pub fn request_permission(&self) -> bool {
        match self.inner.notifier.request_permission() {
            PermissionStatus::Granted => {
                let mut state = self.inner.state.lock().unwrap();
                if *state == SchedulerState::Uninitialized {
                    *state = SchedulerState::Disarmed;
                }
                true
            }
            _ => {
                *self.inner.state.lock().unwrap() = SchedulerState::PermissionDenied;
                false
            }
        }
    }

    /// Arm or disarm the recurring quiz reminder.
    ///
    /// The currently active timer is always cleared first so a
    /// re-schedule can never leave two timers firing. When armed, the
    /// first evaluation runs synchronously: an overdue reminder is sent
    /// before the timer chain starts.
    pub fn schedule(&self, user_name: &str, enabled: bool) {
        self.inner.clear_timer();

        let permission = self.inner.notifier.permission();
        if !enabled || permission != PermissionStatus::Granted {
            self.inner.store.remove(config::KEY_QUIZ_SCHEDULE);
            let mut state = self.inner.state.lock().unwrap();
            *state = match permission {
                PermissionStatus::Denied => SchedulerState::PermissionDenied,
                PermissionStatus::Unrequested => SchedulerState::PermissionUnrequested,
                PermissionStatus::Granted => SchedulerState::Disarmed,
            };
            tracing::info!("Quiz notifications disarmed");
            return;
        }

        *self.inner.state.lock().unwrap() = SchedulerState::Armed;
        self.inner.store.set(config::KEY_QUIZ_SCHEDULE, &"active");

        let mut delay = self.inner.check_and_send(user_name);

        let inner = Arc::clone(&self.inner);
        let name = user_name.to_string();
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(delay).await;
                delay = inner.check_and_send(&name);
            }
        });
        *self.inner.timer.lock().unwrap() = Some(handle);

        tracing::info!("Quiz notifications armed for {}", user_name);
    }

    /// Fire a quiz notification immediately; silent no-op when permission
    /// is not granted.
    pub fn send_quiz_notification(&self, user_name: &str) {
        self.inner.send_quiz(user_name);
    }

    /// Testing hook: identical to an immediate send.
    pub fn send_test_notification(&self, user_name: &str) {
        self.send_quiz_notification(user_name);
    }

    /// Clear the active timer. Called from `App::shutdown`.
    pub fn stop(&self) {
        self.inner.clear_timer();
        let mut state = self.inner.state.lock().unwrap();
        if *state == SchedulerState::Armed {
            *state = SchedulerState::Disarmed;
        }
    }
}

impl Drop for QuizNotificationService {
    fn drop(&mut self) {
        self.inner.clear_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};

    struct MockNotifier {
        permission: Mutex<PermissionStatus>,
        sent: Mutex<Vec<NotificationRequest>>,
    }

    impl MockNotifier {
        fn new(permission: PermissionStatus) -> Arc<Self> {
            Arc::new(Self {
                permission: Mutex::new(permission),
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    impl Notifier for MockNotifier {
        fn permission(&self) -> PermissionStatus {
            *self.permission.lock().unwrap()
        }

        fn request_permission(&self) -> PermissionStatus {
            let mut permission = self.permission.lock().unwrap();
            if *permission == PermissionStatus::Unrequested {
                *permission = PermissionStatus::Granted;
            }
            *permission
        }

        fn notify(&self, request: &NotificationRequest) -> Result<()> {
            self.sent.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn create_test_service(
        permission: PermissionStatus,
    ) -> (QuizNotificationService, Arc<MockNotifier>, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        let notifier = MockNotifier::new(permission);
        let service = QuizNotificationService::new(Store::new(backend.clone()), notifier.clone());
        (service, notifier, backend)
    }

    #[tokio::test]
    async fn test_first_schedule_sends_immediately_and_persists() {
        let (service, notifier, backend) = create_test_service(PermissionStatus::Granted);

        service.schedule("Ana", true);

        assert_eq!(service.state(), SchedulerState::Armed);
        assert_eq!(notifier.sent_count(), 1);
        assert!(backend.read(config::KEY_LAST_QUIZ_SENT).is_some());
        assert_eq!(
            backend.read(config::KEY_QUIZ_SCHEDULE).as_deref(),
            Some("\"active\"")
        );

        service.stop();
    }

    #[tokio::test]
    async fn test_recent_send_does_not_fire_again() {
        let (service, notifier, backend) = create_test_service(PermissionStatus::Granted);

        let store = Store::new(backend.clone());
        store.set(config::KEY_LAST_QUIZ_SENT, &Utc::now());

        service.schedule("Ana", true);

        assert_eq!(service.state(), SchedulerState::Armed);
        assert_eq!(notifier.sent_count(), 0);

        service.stop();
    }

    #[tokio::test]
    async fn test_disabled_schedule_disarms_and_clears_marker() {
        let (service, notifier, backend) = create_test_service(PermissionStatus::Granted);

        service.schedule("Ana", true);
        service.schedule("Ana", false);

        assert_eq!(service.state(), SchedulerState::Disarmed);
        assert!(backend.read(config::KEY_QUIZ_SCHEDULE).is_none());
        // Only the initial arm sent anything.
        assert_eq!(notifier.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_denied_permission_blocks_arming() {
        let (service, notifier, _backend) = create_test_service(PermissionStatus::Denied);

        service.schedule("Ana", true);

        assert_eq!(service.state(), SchedulerState::PermissionDenied);
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_unrequested_permission_blocks_arming() {
        let (service, notifier, _backend) = create_test_service(PermissionStatus::Unrequested);

        service.schedule("Ana", true);

        assert_eq!(service.state(), SchedulerState::PermissionUnrequested);
        assert_eq!(notifier.sent_count(), 0);
    }

    #[test]
    fn test_request_permission_denied_is_stable_state() {
        let (service, _notifier, _backend) = create_test_service(PermissionStatus::Denied);

        assert!(!service.request_permission());
        assert_eq!(service.state(), SchedulerState::PermissionDenied);
    }

    #[test]
    fn test_send_without_permission_is_silent() {
        let (service, notifier, _backend) = create_test_service(PermissionStatus::Unrequested);

        service.send_test_notification("Ana");

        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_notification_body_contains_user_name() {
        let (service, notifier, _backend) = create_test_service(PermissionStatus::Granted);

        service.send_quiz_notification("Marta");

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.contains("Marta"));
        assert_eq!(sent[0].tag.as_deref(), Some(config::QUIZ_NOTIFICATION_TAG));
        assert_eq!(sent[0].action, Some(ClickAction::OpenQuiz));
    }

    #[tokio::test]
    async fn test_reschedule_replaces_timer_without_double_send() {
        let (service, notifier, _backend) = create_test_service(PermissionStatus::Granted);

        service.schedule("Ana", true);
        service.schedule("Ana", true);

        // First arm fired; the second found a fresh last-sent timestamp.
        assert_eq!(notifier.sent_count(), 1);
        assert_eq!(service.state(), SchedulerState::Armed);

        service.stop();
    }
}
