//! Payment provider client
//!
//! Thin client for the hosted payment collaborator: the app's only job
//! is to request a payment intent and hand the returned client secret to
//! the provider-rendered widget. Provider errors are surfaced verbatim;
//! there are no silent retries and success is never fabricated.

use crate::config;
use crate::error::{AppError, Result};
use serde::Deserialize;

/// A created payment intent. The client secret is opaque and is consumed
/// by the provider's widget.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

/// Client for the payment provider's REST API.
pub struct PaymentClient {
    http: reqwest::Client,
    secret_key: Option<String>,
    base_url: String,
}

impl PaymentClient {
    /// `None` means the provider is not configured: checkout attempts
    /// fail with the distinct "payments temporarily unavailable" error
    /// rather than a generic provider failure.
    pub fn new(secret_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
            base_url: config::PAYMENT_API_BASE.to_string(),
        }
    }

    /// Read the secret key from `STRIPE_SECRET_KEY`.
    pub fn from_env() -> Self {
        Self::new(std::env::var("STRIPE_SECRET_KEY").ok())
    }

    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    /// Create a payment intent for a one-time charge.
    ///
    /// The amount is validated before any request is made, and a
    /// provider-reported error message is returned verbatim for the
    /// checkout screen to display.
    pub async fn create_payment_intent(
        &self,
        amount_cents: i64,
        product_name: &str,
        product_id: u32,
    ) -> Result<PaymentIntent> {
        if amount_cents < config::MIN_PAYMENT_AMOUNT_CENTS {
            return Err(AppError::InvalidAmount(amount_cents));
        }

        let secret_key = self
            .secret_key
            .as_deref()
            .ok_or(AppError::PaymentNotConfigured)?;

        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", "brl".to_string()),
            ("description", product_name.to_string()),
            ("metadata[product_id]", product_id.to_string()),
            ("metadata[product_name]", product_name.to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
        ];

        tracing::info!(
            "Creating payment intent: product {} ({} centavos)",
            product_id,
            amount_cents
        );

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.base_url))
            .basic_auth(secret_key, None::<&str>)
            .form(&params)
            .send()
            .await?;

        if response.status().is_success() {
            let intent: PaymentIntent = response.json().await?;
            tracing::info!("Payment intent created: {}", intent.id);
            return Ok(intent);
        }

        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error.message)
            .unwrap_or_else(|_| format!("payment provider returned {}", status));

        tracing::error!("Payment intent creation failed: {}", message);
        Err(AppError::Payment(message))
    }
}
