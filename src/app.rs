//! Application composition root
//!
//! All services are constructed here and owned by one `App` value; there
//! is no global mutable state. `shutdown()` releases every timer the
//! schedulers hold.

use crate::commerce::{PaymentClient, PaymentIntent, ProductCatalog};
use crate::content::ContentLibrary;
use crate::error::Result;
use crate::models::AppSettings;
use crate::services::{
    CalendarService, DailyReminderService, HymnFavorites, Notifier, QuizNotificationService,
    RecentHymns, StateService,
};
use crate::store::{FileStore, Store};
use std::path::Path;
use std::sync::Arc;

/// The assembled application.
pub struct App {
    pub store: Store,
    pub content: ContentLibrary,
    pub state: StateService,
    pub quiz_notifications: QuizNotificationService,
    pub daily_reminders: DailyReminderService,
    pub recent_hymns: RecentHymns,
    pub favorites: HymnFavorites,
    pub calendar: CalendarService,
    pub products: ProductCatalog,
    pub payment: PaymentClient,
}

impl App {
    /// Assemble the app with file-backed persistence under `data_dir`.
    pub async fn open(
        data_dir: &Path,
        notifier: Arc<dyn Notifier>,
        payment: PaymentClient,
    ) -> Result<Self> {
        tracing::info!("Initializing application, data dir: {:?}", data_dir);

        let backend = FileStore::open(data_dir.join("store"))?;
        let store = Store::new(Arc::new(backend));

        Self::assemble(store, notifier, payment).await
    }

    /// Assemble the app over an existing store (tests use the in-memory
    /// backend here).
    pub async fn assemble(
        store: Store,
        notifier: Arc<dyn Notifier>,
        payment: PaymentClient,
    ) -> Result<Self> {
        let content = ContentLibrary::load()?;
        let state = StateService::load(store.clone());
        let quiz_notifications =
            QuizNotificationService::new(store.clone(), Arc::clone(&notifier));
        let daily_reminders = DailyReminderService::new(notifier).await?;
        let recent_hymns = RecentHymns::load(store.clone());
        let favorites = HymnFavorites::load(store.clone());
        let calendar = CalendarService::load(store.clone());

        Ok(Self {
            store,
            content,
            state,
            quiz_notifications,
            daily_reminders,
            recent_hymns,
            favorites,
            calendar,
            products: ProductCatalog::builtin(),
            payment,
        })
    }

    /// Start background scheduling. With a completed onboarding and
    /// notifications enabled this arms the quiz timer and the daily
    /// reminder jobs.
    pub async fn start(&self) -> Result<()> {
        self.daily_reminders.start().await?;

        if let Some(user) = self.state.user() {
            let settings = self.state.settings();
            self.quiz_notifications
                .schedule(&user.name, settings.notifications_enabled);
            self.daily_reminders.reschedule(&settings, &user.name).await?;
        }

        tracing::info!("Application started");
        Ok(())
    }

    /// Replace settings and bring every scheduler in line with them.
    pub async fn apply_settings(&self, settings: AppSettings) -> Result<()> {
        self.state.set_settings(settings.clone());

        if let Some(user) = self.state.user() {
            self.quiz_notifications
                .schedule(&user.name, settings.notifications_enabled);
            self.daily_reminders.reschedule(&settings, &user.name).await?;
        }

        Ok(())
    }

    /// Start a checkout: look up the product and request a payment
    /// intent for its price.
    pub async fn begin_checkout(&self, product_id: u32) -> Result<PaymentIntent> {
        let info = self.products.get(product_id)?.info().clone();
        self.payment
            .create_payment_intent(info.price_cents, &info.name, info.id)
            .await
    }

    /// Stop every scheduler.
    pub async fn shutdown(&self) -> Result<()> {
        self.quiz_notifications.stop();
        self.daily_reminders.shutdown().await?;
        tracing::info!("Application shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::{LogNotifier, Phase};
    use crate::store::MemoryStore;

    async fn create_test_app() -> App {
        let store = Store::new(Arc::new(MemoryStore::new()));
        App::assemble(store, Arc::new(LogNotifier), PaymentClient::new(None))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_fresh_install_requires_onboarding() {
        let app = create_test_app().await;

        assert_eq!(app.state.phase(), Phase::Onboarding);
    }

    #[tokio::test]
    async fn test_checkout_unknown_product() {
        let app = create_test_app().await;

        let result = app.begin_checkout(42).await;

        assert!(matches!(result, Err(AppError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_checkout_without_payment_config() {
        let app = create_test_app().await;

        let result = app.begin_checkout(1).await;

        assert!(matches!(result, Err(AppError::PaymentNotConfigured)));
    }

    #[tokio::test]
    async fn test_shutdown_is_clean() {
        let app = create_test_app().await;

        app.start().await.unwrap();
        app.shutdown().await.unwrap();
    }
}
