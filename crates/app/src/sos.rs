//! SOS lifecycle controller
//!
//! One control, two states. `Idle` plus a press opens an alert, gated on
//! having a location reading; `Active` plus a press asks for confirmation
//! instead of resolving, so an accidental tap cannot cancel a real
//! emergency. Every failure leaves the state exactly where it was.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use haven_core::models::{AlertKind, Location};
use haven_net::protocol::TriggerAlertRequest;
use haven_net::ApiClient;

use crate::location::LocationProvider;
use crate::notifier::Notifier;

/// Controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SosState {
    Idle,
    Active { alert_id: String },
}

/// What a press of the SOS control did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Alert opened
    Triggered,
    /// No location reading yet; one was requested, press again
    LocationNeeded,
    /// Already active; the confirmation prompt should open
    ConfirmRequested,
}

/// Alert operation errors
///
/// The controller state is unchanged when these come back, so pressing
/// again is always safe.
#[derive(Debug, thiserror::Error)]
pub enum SosError {
    #[error("Trigger failed: {0}")]
    Trigger(#[source] haven_net::Error),
    #[error("Resolve failed: {0}")]
    Resolve(#[source] haven_net::Error),
}

struct SosInner {
    state: SosState,
    reading: Option<Location>,
    prompt_open: bool,
    /// Whether the idle/active answer was confirmed by the server
    status_confirmed: bool,
}

/// Idle/active alert state machine
pub struct SosController {
    client: Arc<ApiClient>,
    provider: Arc<dyn LocationProvider>,
    notifier: Notifier,
    inner: Mutex<SosInner>,
}

impl SosController {
    pub fn new(
        client: Arc<ApiClient>,
        provider: Arc<dyn LocationProvider>,
        notifier: Notifier,
    ) -> Self {
        Self {
            client,
            provider,
            notifier,
            inner: Mutex::new(SosInner {
                state: SosState::Idle,
                reading: None,
                prompt_open: false,
                status_confirmed: false,
            }),
        }
    }

    /// Current state snapshot
    pub async fn state(&self) -> SosState {
        self.inner.lock().await.state.clone()
    }

    /// Whether the idle/active answer has been confirmed by the server
    pub async fn status_confirmed(&self) -> bool {
        self.inner.lock().await.status_confirmed
    }

    /// Whether the resolve confirmation prompt should be showing
    pub async fn prompt_open(&self) -> bool {
        self.inner.lock().await.prompt_open
    }

    /// Last location reading, if any
    pub async fn last_reading(&self) -> Option<Location> {
        self.inner.lock().await.reading
    }

    /// Adopt the server's view of the active alert
    ///
    /// Runs on view entry and whenever local state is suspect; the server's
    /// answer overwrites whatever is held locally. One failed probe is
    /// retried once; after that the controller sits in `Idle` unconfirmed
    /// until some later call reaches the server.
    pub async fn sync(&self) {
        let mut inner = self.inner.lock().await;
        let result = match self.client.active_alert().await {
            Ok(active) => Ok(active),
            Err(first) => {
                warn!(error = %first, "active alert probe failed, retrying");
                self.client.active_alert().await
            }
        };

        match result {
            Ok(Some(alert)) if alert.is_active() => {
                info!(alert_id = %alert.alert_id, "active alert adopted");
                inner.state = SosState::Active {
                    alert_id: alert.alert_id,
                };
                inner.status_confirmed = true;
            }
            // nothing active, or a record already resolved server-side
            Ok(_) => {
                inner.state = SosState::Idle;
                inner.prompt_open = false;
                inner.status_confirmed = true;
            }
            Err(e) => {
                warn!(error = %e, "active alert probe failed twice");
                inner.state = SosState::Idle;
                inner.status_confirmed = false;
                self.notifier.alarm("Could not confirm alert status.");
            }
        }
    }

    /// Handle a press of the SOS control
    pub async fn press(&self) -> Result<PressOutcome, SosError> {
        let mut inner = self.inner.lock().await;

        if let SosState::Active { .. } = inner.state {
            // resolving is confirm-only
            inner.prompt_open = true;
            return Ok(PressOutcome::ConfirmRequested);
        }

        let reading = match inner.reading {
            Some(reading) => reading,
            None => {
                self.notifier.info("Getting your location...");
                drop(inner);
                self.refresh_location().await;
                return Ok(PressOutcome::LocationNeeded);
            }
        };

        let request = TriggerAlertRequest {
            kind: AlertKind::Manual,
            location: reading.into(),
        };
        match self.client.trigger_alert(&request).await {
            Ok(alert) => {
                info!(alert_id = %alert.alert_id, "alert opened");
                inner.state = SosState::Active {
                    alert_id: alert.alert_id,
                };
                inner.status_confirmed = true;
                self.notifier
                    .success("Emergency alert sent to your contacts.");
                Ok(PressOutcome::Triggered)
            }
            Err(e) => {
                warn!(error = %e, "trigger failed");
                self.notifier
                    .alarm("Could not send the alert. Please try again.");
                Err(SosError::Trigger(e))
            }
        }
    }

    /// Resolve the active alert; only effective while the prompt is open
    pub async fn confirm_resolve(&self) -> Result<(), SosError> {
        let mut inner = self.inner.lock().await;
        let alert_id = match &inner.state {
            SosState::Active { alert_id } if inner.prompt_open => alert_id.clone(),
            _ => return Ok(()),
        };

        match self.client.resolve_alert(&alert_id).await {
            Ok(()) => {
                info!(alert_id = %alert_id, "alert resolved");
                inner.state = SosState::Idle;
                inner.prompt_open = false;
                inner.status_confirmed = true;
                self.notifier.success("Emergency resolved. Stay safe.");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "resolve failed");
                self.notifier
                    .alarm("Could not resolve the emergency. Please try again.");
                Err(SosError::Resolve(e))
            }
        }
    }

    /// Keep the alert active and close the prompt
    pub async fn dismiss_prompt(&self) {
        self.inner.lock().await.prompt_open = false;
    }

    /// Single-shot location refresh
    ///
    /// Failure keeps the previous reading; it is never overwritten with a
    /// failure marker.
    pub async fn refresh_location(&self) {
        match self.provider.current().await {
            Ok(reading) => {
                let mut inner = self.inner.lock().await;
                inner.reading = Some(reading);
            }
            Err(e) => {
                warn!(error = %e, "location read failed");
                self.notifier
                    .alarm("Unable to get your location. Please enable GPS.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{FixedLocation, LocationError, NoLocation};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn alert_json(alert_id: &str) -> serde_json::Value {
        serde_json::json!({
            "alert_id": alert_id,
            "user_id": "u1",
            "type": "manual",
            "status": "active",
            "location": {"latitude": 40.0, "longitude": -73.0, "address": "Current Location"},
            "created_at": "2025-01-15T10:00:00Z",
            "contacts_notified": []
        })
    }

    fn reading() -> Location {
        Location {
            latitude: 40.0,
            longitude: -73.0,
            accuracy: None,
        }
    }

    fn controller_for(server: &MockServer, provider: Arc<dyn LocationProvider>) -> SosController {
        let client = Arc::new(
            ApiClient::new(&server.uri(), std::time::Duration::from_secs(5)).unwrap(),
        );
        let (notifier, _rx) = Notifier::channel();
        SosController::new(client, provider, notifier)
    }

    /// Provider that replays a script of responses, then fails
    struct ScriptedLocation {
        script: std::sync::Mutex<VecDeque<Result<Location, LocationError>>>,
    }

    impl ScriptedLocation {
        fn new(script: Vec<Result<Location, LocationError>>) -> Self {
            Self {
                script: std::sync::Mutex::new(script.into()),
            }
        }
    }

    #[async_trait]
    impl LocationProvider for ScriptedLocation {
        async fn current(&self) -> Result<Location, LocationError> {
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LocationError::Timeout))
        }
    }

    #[tokio::test]
    async fn test_sync_adopts_active_alert() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/emergency/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alert_json("a1")))
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(NoLocation));
        sos.sync().await;

        assert_eq!(
            sos.state().await,
            SosState::Active {
                alert_id: "a1".to_string()
            }
        );
        assert!(sos.status_confirmed().await);
    }

    #[tokio::test]
    async fn test_sync_confirms_idle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/emergency/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::Value::Null))
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(NoLocation));
        sos.sync().await;

        assert_eq!(sos.state().await, SosState::Idle);
        assert!(sos.status_confirmed().await);
    }

    #[tokio::test]
    async fn test_sync_ignores_resolved_record() {
        let server = MockServer::start().await;
        let mut body = alert_json("a1");
        body["status"] = "resolved".into();
        body["resolved_at"] = "2025-01-15T11:00:00Z".into();
        Mock::given(method("GET"))
            .and(path("/api/emergency/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(NoLocation));
        sos.sync().await;

        assert_eq!(sos.state().await, SosState::Idle);
        assert!(sos.status_confirmed().await);
    }

    #[tokio::test]
    async fn test_sync_double_failure_leaves_idle_unconfirmed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/emergency/active"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(NoLocation));
        sos.sync().await;

        assert_eq!(sos.state().await, SosState::Idle);
        assert!(!sos.status_confirmed().await);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);

        // a later successful sync restores confidence
        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/api/emergency/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::Value::Null))
            .mount(&server)
            .await;
        sos.sync().await;
        assert!(sos.status_confirmed().await);
    }

    #[tokio::test]
    async fn test_trigger_requires_location() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/emergency/trigger"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alert_json("a2")))
            .expect(0)
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(NoLocation));
        let outcome = sos.press().await.unwrap();

        assert_eq!(outcome, PressOutcome::LocationNeeded);
        assert_eq!(sos.state().await, SosState::Idle);
    }

    #[tokio::test]
    async fn test_second_press_triggers_once_location_arrives() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/emergency/trigger"))
            .and(body_partial_json(serde_json::json!({
                "type": "manual",
                "location": {"latitude": 40.0, "longitude": -73.0}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(alert_json("a2")))
            .expect(1)
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(FixedLocation(reading())));

        // first press has no reading; it requests one instead of triggering
        assert_eq!(sos.press().await.unwrap(), PressOutcome::LocationNeeded);
        assert_eq!(sos.last_reading().await, Some(reading()));

        // second press has the reading and fires
        assert_eq!(sos.press().await.unwrap(), PressOutcome::Triggered);
        assert_eq!(
            sos.state().await,
            SosState::Active {
                alert_id: "a2".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_press_while_active_asks_for_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/emergency/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alert_json("a1")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/emergency/resolve/a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})))
            .expect(0)
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(NoLocation));
        sos.sync().await;

        assert_eq!(sos.press().await.unwrap(), PressOutcome::ConfirmRequested);
        assert!(sos.prompt_open().await);
        assert_eq!(
            sos.state().await,
            SosState::Active {
                alert_id: "a1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_confirm_resolve_closes_alert() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/emergency/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alert_json("a2")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/emergency/resolve/a2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(NoLocation));
        sos.sync().await;

        sos.press().await.unwrap();
        sos.confirm_resolve().await.unwrap();

        assert_eq!(sos.state().await, SosState::Idle);
        assert!(!sos.prompt_open().await);
    }

    #[tokio::test]
    async fn test_confirm_resolve_needs_open_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/emergency/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alert_json("a1")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/emergency/resolve/a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})))
            .expect(0)
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(NoLocation));
        sos.sync().await;

        // no press, no prompt; a stray confirm must not resolve anything
        sos.confirm_resolve().await.unwrap();

        assert_eq!(
            sos.state().await,
            SosState::Active {
                alert_id: "a1".to_string()
            }
        );
        assert!(!sos.prompt_open().await);
    }

    #[tokio::test]
    async fn test_dismiss_keeps_alert_active() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/emergency/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alert_json("a1")))
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(NoLocation));
        sos.sync().await;
        sos.press().await.unwrap();

        sos.dismiss_prompt().await;
        assert!(!sos.prompt_open().await);
        assert_eq!(
            sos.state().await,
            SosState::Active {
                alert_id: "a1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_failed_trigger_leaves_state_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/emergency/trigger"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(FixedLocation(reading())));
        sos.refresh_location().await;

        let result = sos.press().await;
        assert!(matches!(result, Err(SosError::Trigger(_))));
        assert_eq!(sos.state().await, SosState::Idle);
    }

    #[tokio::test]
    async fn test_failed_resolve_stays_active() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/emergency/active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alert_json("a1")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/emergency/resolve/a1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let sos = controller_for(&server, Arc::new(NoLocation));
        sos.sync().await;
        sos.press().await.unwrap();

        let result = sos.confirm_resolve().await;
        assert!(matches!(result, Err(SosError::Resolve(_))));
        assert_eq!(
            sos.state().await,
            SosState::Active {
                alert_id: "a1".to_string()
            }
        );
        // the prompt stays up; dismissing remains the user's choice
        assert!(sos.prompt_open().await);
    }

    #[tokio::test]
    async fn test_location_failure_keeps_previous_reading() {
        let server = MockServer::start().await;
        let provider = ScriptedLocation::new(vec![
            Ok(reading()),
            Err(LocationError::Unavailable("gps off".to_string())),
        ]);

        let sos = controller_for(&server, Arc::new(provider));

        sos.refresh_location().await;
        assert_eq!(sos.last_reading().await, Some(reading()));

        sos.refresh_location().await;
        assert_eq!(sos.last_reading().await, Some(reading()));
    }
}
