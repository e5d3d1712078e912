// Hand-crafted async HTTP client for the weather-alert service.
//
// Base path: /api/
// Auth: Authorization: Bearer <token> (absent for the registration flow)

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    AlertCriteriaWire, AlertEventWire, ChannelVerification, CreateCriteriaRequest,
    NotificationPreferenceWire, RegisterRequest, RegisterUserResponse, ResendVerificationRequest,
    TokenRequest, TokenResponse, UpdateProfileRequest, UserAccount, VerifyEmailRequest,
    WeatherConditionWire,
};

/// Async client for the weather-alert REST API.
///
/// The bearer token is swappable at runtime: the session store installs it
/// on login and removes it on logout, and every subsequent request picks up
/// the current value. Requests without a token simply omit the
/// `Authorization` header (the registration endpoints are unauthenticated).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: ArcSwapOption<SecretString>,
}

impl ApiClient {
    /// Build a client for the given base URL (e.g. `https://alerts.example.com`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            token: ArcSwapOption::empty(),
        })
    }

    /// Wrap an existing `reqwest::Client` (used by tests).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            token: ArcSwapOption::empty(),
        })
    }

    /// Ensure the base URL ends with a single `/` so relative joins work.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// Install or replace the bearer token used for authenticated calls.
    pub fn set_token(&self, token: Option<SecretString>) {
        self.token.store(token.map(Arc::new));
    }

    /// Whether a bearer token is currently installed.
    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    // ── Request plumbing ─────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match self.token.load_full() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.request(Method::GET, url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.request(Method::GET, url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.request(Method::POST, url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn post_no_body<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.request(Method::POST, url).send().await?;
        Self::handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.request(Method::PUT, url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.request(Method::DELETE, url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            // Callers expecting a body on a 204 route get a deserialization
            // error with an empty body, not a panic.
            return serde_json::from_str("null").map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: String::new(),
            });
        }
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            let raw = resp.text().await.unwrap_or_default();
            Err(Error::from_response(status.as_u16(), &raw))
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let raw = resp.text().await.unwrap_or_default();
            Err(Error::from_response(status.as_u16(), &raw))
        }
    }

    // ── Authentication & registration ────────────────────────────────

    /// Exchange credentials for a bearer token. Does not install it --
    /// the session store owns the token lifecycle.
    pub async fn token(&self, req: &TokenRequest) -> Result<TokenResponse, Error> {
        self.post("api/auth/token", req).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisterUserResponse, Error> {
        self.post("api/auth/register", req).await
    }

    pub async fn verify_email(&self, req: &VerifyEmailRequest) -> Result<UserAccount, Error> {
        self.post("api/auth/register/verify-email", req).await
    }

    pub async fn resend_verification(
        &self,
        req: &ResendVerificationRequest,
    ) -> Result<ChannelVerification, Error> {
        self.post("api/auth/register/resend-verification", req)
            .await
    }

    // ── Current user ─────────────────────────────────────────────────

    pub async fn me(&self) -> Result<UserAccount, Error> {
        self.get("api/users/me").await
    }

    pub async fn update_me(&self, req: &UpdateProfileRequest) -> Result<UserAccount, Error> {
        self.put("api/users/me", req).await
    }

    pub async fn notification_preferences(&self) -> Result<NotificationPreferenceWire, Error> {
        self.get("api/users/me/notification-preferences").await
    }

    // ── Alert criteria ───────────────────────────────────────────────

    pub async fn criteria_for_user(&self, user_id: &str) -> Result<Vec<AlertCriteriaWire>, Error> {
        self.get(&format!("api/criteria/user/{user_id}")).await
    }

    pub async fn create_criteria(
        &self,
        req: &CreateCriteriaRequest,
    ) -> Result<AlertCriteriaWire, Error> {
        self.post("api/criteria", req).await
    }

    pub async fn delete_criteria(&self, criteria_id: &str) -> Result<(), Error> {
        self.delete(&format!("api/criteria/{criteria_id}")).await
    }

    // ── Triggered alerts ─────────────────────────────────────────────

    pub async fn alerts_for_user(&self, user_id: &str) -> Result<Vec<AlertEventWire>, Error> {
        self.get(&format!("api/alerts/user/{user_id}")).await
    }

    pub async fn acknowledge_alert(&self, alert_id: &str) -> Result<AlertEventWire, Error> {
        self.post_no_body(&format!("api/alerts/{alert_id}/acknowledge"))
            .await
    }

    // ── Weather ──────────────────────────────────────────────────────

    pub async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherConditionWire, Error> {
        self.get_with_params(
            "api/weather/conditions/current",
            &[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
            ],
        )
        .await
    }

    // ── Admin ────────────────────────────────────────────────────────

    pub async fn pending_users(&self) -> Result<Vec<UserAccount>, Error> {
        self.get("api/admin/users/pending").await
    }

    pub async fn approve_user(&self, user_id: &str) -> Result<UserAccount, Error> {
        self.post_no_body(&format!("api/admin/users/{user_id}/approve"))
            .await
    }
}
