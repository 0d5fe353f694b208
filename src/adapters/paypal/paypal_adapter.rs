//! PayPal payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the PayPal REST API:
//! authorization-code exchange, OpenID userinfo, order creation and capture.
//!
//! # Security
//!
//! - Client credentials are held as `secrecy::SecretString`
//! - Access tokens never appear in logs
//! - Provider error bodies are logged here and kept out of client responses
//!
//! # Configuration
//!
//! ```ignore
//! let config = PayPalConfig::new(client_id, client_secret)
//!     .with_timeout(Duration::from_secs(15));
//! let adapter = PayPalPaymentAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::domain::checkout::{
    AccessToken, AuthorizationCode, CaptureResult, OrderCreation, OrderRequest,
};
use crate::domain::foundation::OrderId;
use crate::ports::{Identity, PaymentProvider, ProviderError, ProviderOperation};

use super::api_types::{PayPalCaptureResponse, PayPalOrder, PayPalTokenResponse, PayPalUserInfo};

/// PayPal sandbox REST endpoint.
pub const SANDBOX_BASE_URL: &str = "https://api-m.sandbox.paypal.com";

/// Default deadline for a single provider call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Longest provider body kept in an error detail.
const MAX_ERROR_BODY_LEN: usize = 2048;

/// PayPal API configuration.
#[derive(Clone)]
pub struct PayPalConfig {
    /// REST app client id.
    client_id: String,

    /// REST app secret.
    client_secret: SecretString,

    /// Base URL for the PayPal API (default: sandbox).
    api_base_url: String,

    /// Deadline applied to every outbound call.
    timeout: Duration,
}

impl PayPalConfig {
    /// Create a new PayPal configuration against the sandbox.
    pub fn new(client_id: impl Into<String>, client_secret: SecretString) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            api_base_url: SANDBOX_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom API base URL (live endpoint, or a local fake in tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

/// PayPal payment provider adapter.
pub struct PayPalPaymentAdapter {
    config: PayPalConfig,
    http_client: reqwest::Client,
}

impl PayPalPaymentAdapter {
    /// Create a new PayPal adapter; the HTTP client carries the configured deadline.
    pub fn new(config: PayPalConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    async fn send(
        &self,
        operation: ProviderOperation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ProviderError> {
        request.send().await.map_err(|e| {
            tracing::error!(%operation, error = %e, timeout = e.is_timeout(), "PayPal call failed");
            ProviderError::transport(operation, e.to_string())
        })
    }

    /// Turns a non-accepted status into `Rejected`, keeping the body for logs.
    async fn reject(operation: ProviderOperation, response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY_LEN {
            let mut cut = MAX_ERROR_BODY_LEN;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        tracing::error!(%operation, status = status.as_u16(), body = %body, "PayPal rejected request");
        ProviderError::rejected(operation, Some(status.as_u16()), body)
    }

    async fn parse<T: DeserializeOwned>(
        operation: ProviderOperation,
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::transport(operation, e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(%operation, error = %e, "Failed to parse PayPal response");
            ProviderError::protocol(operation, format!("unparseable response: {}", e))
        })
    }
}

#[async_trait]
impl PaymentProvider for PayPalPaymentAdapter {
    async fn exchange_authorization_code(
        &self,
        code: &AuthorizationCode,
    ) -> Result<AccessToken, ProviderError> {
        let operation = ProviderOperation::ExchangeAuthorizationCode;
        if code.is_empty() {
            return Err(ProviderError::rejected(
                operation,
                None,
                "authorization code is empty",
            ));
        }

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
        ];
        let request = self
            .http_client
            .post(self.url("/v1/oauth2/token"))
            .basic_auth(
                &self.config.client_id,
                Some(self.config.client_secret.expose_secret()),
            )
            .form(&params);

        let response = self.send(operation, request).await?;
        if !response.status().is_success() {
            return Err(Self::reject(operation, response).await);
        }

        let token: PayPalTokenResponse = Self::parse(operation, response).await?;
        if token.access_token.is_empty() {
            tracing::error!(%operation, "PayPal token response carried no access_token");
            return Err(ProviderError::protocol(
                operation,
                "success response without access_token",
            ));
        }

        tracing::debug!("Exchanged PayPal authorization code");
        Ok(AccessToken::new(token.access_token))
    }

    async fn fetch_identity(&self, token: &AccessToken) -> Result<Identity, ProviderError> {
        let operation = ProviderOperation::FetchIdentity;
        let request = self
            .http_client
            .get(self.url("/v1/identity/openidconnect/userinfo"))
            .query(&[("schema", "openid")])
            .bearer_auth(token.expose());

        let response = self.send(operation, request).await?;
        if !response.status().is_success() {
            return Err(Self::reject(operation, response).await);
        }

        let info: PayPalUserInfo = Self::parse(operation, response).await?;
        tracing::debug!("Fetched PayPal identity");
        Ok(Identity { email: info.email })
    }

    async fn create_order(
        &self,
        token: &AccessToken,
        order: &OrderRequest,
    ) -> Result<OrderCreation, ProviderError> {
        let operation = ProviderOperation::CreateOrder;
        let request = self
            .http_client
            .post(self.url("/v2/checkout/orders"))
            .bearer_auth(token.expose())
            .json(order);

        let response = self.send(operation, request).await?;
        if response.status() != StatusCode::CREATED {
            return Err(Self::reject(operation, response).await);
        }

        let created: PayPalOrder = Self::parse(operation, response).await?;
        tracing::info!(order_id = %created.id, status = %created.status, "PayPal order created");
        Ok(created.into())
    }

    async fn capture_order(
        &self,
        token: &AccessToken,
        order_id: &OrderId,
    ) -> Result<CaptureResult, ProviderError> {
        let operation = ProviderOperation::CaptureOrder;
        let request = self
            .http_client
            .post(self.url(&format!("/v2/checkout/orders/{}/capture", order_id)))
            .bearer_auth(token.expose())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("{}");

        let response = self.send(operation, request).await?;
        if response.status().as_u16() >= 300 {
            return Err(Self::reject(operation, response).await);
        }

        let captured: PayPalCaptureResponse = Self::parse(operation, response).await?;
        tracing::info!(order_id = %order_id, status = %captured.status, "PayPal order captured");
        Ok(captured.into())
    }
}
