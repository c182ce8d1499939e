//! HTTP client for the Haven API
//!
//! One [`ApiClient`] per process. Credentialed calls carry the session
//! cookie from the shared jar; [`ApiClient::install_session`] and
//! [`ApiClient::clear_session`] are the only writers. Handshake and session
//! tokens are never logged.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use haven_core::models::{
    CommunityReport, EmergencyAlert, EmergencyContact, NearbyZone, SafetyZone, Session, User,
};

use crate::error::{Error, Result};
use crate::protocol::{
    Ack, FakeCall, FakeCallRequest, NewContact, NewReport, SessionUser, TriggerAlertRequest,
};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_token";

/// Header carrying the one-time handshake token during the exchange
pub const HANDSHAKE_HEADER: &str = "X-Session-ID";

/// HTTP client for the Haven API
pub struct ApiClient {
    client: Client,
    jar: Arc<Jar>,
    base: Url,
}

impl ApiClient {
    /// Create a client against an API origin
    pub fn new(api_origin: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(api_origin)?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .timeout(timeout)
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self { client, jar, base })
    }

    // ========== Session ==========

    /// Exchange a one-time handshake token for a session
    ///
    /// The token travels in the `X-Session-ID` header, never the query
    /// string or body. Installing the returned cookie is the caller's move;
    /// a failed exchange must leave nothing behind.
    pub async fn exchange_session(&self, handshake_token: &str) -> Result<SessionUser> {
        debug!("exchanging handshake token for session");
        let response = self
            .client
            .post(self.url("/api/auth/session")?)
            .header(HANDSHAKE_HEADER, handshake_token)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Install the session cookie in the jar
    ///
    /// The provider lives on a different origin, so the production cookie is
    /// `Secure; SameSite=None`. Secure cookies are only presented over
    /// https, which would strand plain-http test servers.
    pub fn install_session(&self, token: &str) {
        let max_age = Session::LIFETIME_DAYS * 24 * 60 * 60;
        let mut cookie = format!("{}={}; Path=/; Max-Age={}", SESSION_COOKIE, token, max_age);
        if self.base.scheme() == "https" {
            cookie.push_str("; Secure; SameSite=None");
        }
        self.jar.add_cookie_str(&cookie, &self.base);
        debug!("session cookie installed");
    }

    /// Drop the session cookie
    pub fn clear_session(&self) {
        let cookie = format!("{}=; Path=/; Max-Age=0", SESSION_COOKIE);
        self.jar.add_cookie_str(&cookie, &self.base);
        debug!("session cookie cleared");
    }

    /// Current identity, if the presented cookie is valid
    pub async fn me(&self) -> Result<User> {
        self.get("/api/auth/me").await
    }

    /// Invalidate the session server-side
    pub async fn logout(&self) -> Result<()> {
        let _: Ack = self.post_empty("/api/auth/logout").await?;
        Ok(())
    }

    // ========== Emergency ==========

    /// The caller's active alert, if any
    ///
    /// The endpoint answers JSON `null` when nothing is active.
    pub async fn active_alert(&self) -> Result<Option<EmergencyAlert>> {
        self.get("/api/emergency/active").await
    }

    /// Open an alert
    pub async fn trigger_alert(&self, request: &TriggerAlertRequest) -> Result<EmergencyAlert> {
        self.post("/api/emergency/trigger", request).await
    }

    /// Close an alert by id
    pub async fn resolve_alert(&self, alert_id: &str) -> Result<()> {
        let _: Ack = self
            .post_empty(&format!("/api/emergency/resolve/{}", alert_id))
            .await?;
        Ok(())
    }

    /// Stage an incoming fake call
    pub async fn fake_call(&self, request: &FakeCallRequest) -> Result<FakeCall> {
        self.post("/api/fake-call", request).await
    }

    // ========== Contacts ==========

    /// List the caller's emergency contacts
    pub async fn contacts(&self) -> Result<Vec<EmergencyContact>> {
        self.get("/api/emergency/contacts").await
    }

    /// Add an emergency contact
    pub async fn create_contact(&self, contact: &NewContact) -> Result<EmergencyContact> {
        self.post("/api/emergency/contacts", contact).await
    }

    /// Remove an emergency contact
    pub async fn delete_contact(&self, contact_id: &str) -> Result<()> {
        let _: Ack = self
            .delete(&format!("/api/emergency/contacts/{}", contact_id))
            .await?;
        Ok(())
    }

    // ========== Community ==========

    /// Recent community reports, newest first
    pub async fn reports(&self, limit: u32) -> Result<Vec<CommunityReport>> {
        self.get(&format!("/api/community/reports?limit={}", limit))
            .await
    }

    /// Submit a community report
    pub async fn submit_report(&self, report: &NewReport) -> Result<CommunityReport> {
        self.post("/api/community/reports", report).await
    }

    // ========== Safety zones ==========

    /// All known safety zones
    pub async fn safety_zones(&self) -> Result<Vec<SafetyZone>> {
        self.get("/api/safety/zones").await
    }

    /// Zones within `radius_m` meters of a position
    pub async fn nearby_zones(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
    ) -> Result<Vec<NearbyZone>> {
        self.post_empty(&format!(
            "/api/safety/zones/nearby?latitude={}&longitude={}&radius={}",
            latitude, longitude, radius_m
        ))
        .await
    }

    // ========== Internal HTTP helpers ==========

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.url(path)?).send().await?;
        self.handle_response(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.url(path)?)
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.post(self.url(path)?).send().await?;
        self.handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.delete(self.url(path)?).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else if status == StatusCode::UNAUTHORIZED {
            Err(Error::Unauthorized)
        } else if status == StatusCode::NOT_FOUND {
            Err(Error::NotFound(response.text().await.unwrap_or_default()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
