//! Fake call side action
//!
//! Stages a believable incoming call so the user has a socially easy exit.
//! Stateless and independent of the alert lifecycle.

use std::sync::Arc;

use tracing::warn;

use haven_net::protocol::{FakeCall, FakeCallRequest};
use haven_net::ApiClient;

use crate::notifier::Notifier;

pub struct FakeCallAction {
    client: Arc<ApiClient>,
    notifier: Notifier,
}

impl FakeCallAction {
    pub fn new(client: Arc<ApiClient>, notifier: Notifier) -> Self {
        Self { client, notifier }
    }

    /// Request a staged call from `caller_name`; the server defaults the
    /// rest of the script
    pub async fn stage(&self, caller_name: Option<String>) -> Result<FakeCall, haven_net::Error> {
        let request = match caller_name {
            Some(caller_name) => FakeCallRequest { caller_name },
            None => FakeCallRequest::default(),
        };

        match self.client.fake_call(&request).await {
            Ok(call) => {
                self.notifier
                    .info(format!("Incoming call from {}...", call.caller));
                Ok(call)
            }
            Err(e) => {
                warn!(error = %e, "fake call failed");
                self.notifier.alarm("Could not start the call. Please try again.");
                Err(e)
            }
        }
    }
}
