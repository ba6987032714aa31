//! Application configuration constants
//!
//! Central location for storage keys, list caps, scheduler intervals,
//! and validation boundaries used throughout the application.

// ===== Persisted storage keys =====

/// User profile (absent until onboarding completes)
pub const KEY_USER: &str = "user";
/// Application settings object
pub const KEY_SETTINGS: &str = "settings";
/// Ordered note collection
pub const KEY_NOTES: &str = "notes";
/// Most-recently-viewed hymn numbers
pub const KEY_RECENT_HYMNS: &str = "recent-hymns";
/// Favourite hymn numbers
pub const KEY_HYMN_FAVORITES: &str = "hymn-favorites";
/// Selected colour theme
pub const KEY_THEME: &str = "theme";
/// Marker set while the quiz notification timer is armed
pub const KEY_QUIZ_SCHEDULE: &str = "quiz-schedule";
/// Timestamp of the last quiz notification sent
pub const KEY_LAST_QUIZ_SENT: &str = "last-quiz-sent";
/// User-created calendar events
pub const KEY_CALENDAR_EVENTS: &str = "calendar-events";
/// Recorded quiz responses
pub const KEY_QUIZ_RESPONSES: &str = "quiz-responses";

// ===== Recency tracking =====

/// Maximum entries kept in the recent-hymns list
pub const MAX_RECENT_HYMNS: usize = 7;

// ===== Quiz notifications =====

/// Days between quiz reminder notifications
pub const QUIZ_INTERVAL_DAYS: i64 = 3;

/// Notification deduplication tag for quiz reminders
pub const QUIZ_NOTIFICATION_TAG: &str = "quiz-reminder";

/// Notification title used for all app notifications
pub const NOTIFICATION_TITLE: &str = "Verso & Paz 💙";

// ===== Settings defaults =====

/// Default morning reminder time
pub const DEFAULT_MORNING_TIME: &str = "07:00";

/// Default evening reminder time
pub const DEFAULT_EVENING_TIME: &str = "20:00";

// ===== Payment boundaries =====

/// Payment provider API base URL
pub const PAYMENT_API_BASE: &str = "https://api.stripe.com";

/// Smallest accepted charge in centavos. Amounts at or below zero are
/// rejected before any provider request is made.
pub const MIN_PAYMENT_AMOUNT_CENTS: i64 = 1;
