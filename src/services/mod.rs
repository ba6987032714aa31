//! Services module
//!
//! Business logic services owned by the composition root.

pub mod calendar;
pub mod favorites;
pub mod notifications;
pub mod recent_hymns;
pub mod reminders;
pub mod state;

pub use calendar::CalendarService;
pub use favorites::HymnFavorites;
pub use notifications::{LogNotifier, Notifier, QuizNotificationService};
pub use recent_hymns::RecentHymns;
pub use reminders::DailyReminderService;
pub use state::{Phase, StateService};
