use chrono::Utc;
use std::time::Instant;
use tracing::debug;

use crate::classify::{classify, ProbeOutcome};
use crate::config::Target;
use crate::models::CheckResult;
use crate::utils::elapsed_ms;

pub struct Prober {
    http_client: reqwest::Client,
}

impl Prober {
    /// Targets are internal, pre-trusted services: certificates are not verified and
    /// redirects are followed.
    pub fn new() -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .no_proxy()
            .build()?;
        Ok(Self { http_client })
    }

    pub async fn probe(&self, target: &Target) -> CheckResult {
        let timestamp = Utc::now();
        let start = Instant::now();

        let outcome = match self
            .http_client
            .get(&target.url)
            .timeout(target.timeout())
            .send()
            .await
        {
            // The body is downloaded under the same timeout and counts toward latency.
            Ok(response) => {
                let status_code = response.status().as_u16();
                match response.bytes().await {
                    Ok(_) => ProbeOutcome::Response { status_code },
                    Err(e) => outcome_from_error(&e),
                }
            }
            Err(e) => outcome_from_error(&e),
        };

        // A timed-out probe reports the configured timeout, not the measured wait.
        let latency_ms = match outcome {
            ProbeOutcome::Timeout => target.timeout_ms as f64,
            _ => elapsed_ms(start),
        };
        let status_code = match outcome {
            ProbeOutcome::Response { status_code } => status_code,
            _ => 0,
        };
        let (status, error) = classify(target.expected_status, &outcome);
        debug!(service = %target.name, %status, status_code, latency_ms, "probe finished");

        CheckResult {
            timestamp,
            name: target.name.clone(),
            url: target.url.clone(),
            status,
            latency_ms,
            status_code,
            error,
        }
    }
}

fn outcome_from_error(e: &reqwest::Error) -> ProbeOutcome {
    if e.is_timeout() {
        ProbeOutcome::Timeout
    } else if e.is_connect() {
        ProbeOutcome::ConnectError
    } else {
        ProbeOutcome::TransportError(e.to_string())
    }
}
