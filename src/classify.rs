use crate::models::HealthState;

/// What came back from one outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Response { status_code: u16 },
    Timeout,
    ConnectError,
    TransportError(String),
}

/// Health state plus the error text recorded alongside it.
pub fn classify(expected_status: u16, outcome: &ProbeOutcome) -> (HealthState, Option<String>) {
    match outcome {
        ProbeOutcome::Response { status_code } if *status_code == expected_status => {
            (HealthState::Up, None)
        }
        ProbeOutcome::Response { status_code } => (
            HealthState::Warning,
            Some(format!("Unexpected status code: {}", status_code)),
        ),
        ProbeOutcome::Timeout => (HealthState::Down, Some("Request timeout".into())),
        ProbeOutcome::ConnectError => (HealthState::Down, Some("Connection error".into())),
        ProbeOutcome::TransportError(msg) => (HealthState::Down, Some(msg.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_status_is_up() {
        assert_eq!(classify(200, &ProbeOutcome::Response { status_code: 200 }), (HealthState::Up, None));
        assert_eq!(classify(204, &ProbeOutcome::Response { status_code: 204 }).0, HealthState::Up);
    }

    #[test]
    fn mismatched_status_is_warning() {
        let (state, error) = classify(200, &ProbeOutcome::Response { status_code: 500 });
        assert_eq!(state, HealthState::Warning);
        assert_eq!(error.as_deref(), Some("Unexpected status code: 500"));

        // A 200 is still a mismatch when something else is expected.
        assert_eq!(classify(301, &ProbeOutcome::Response { status_code: 200 }).0, HealthState::Warning);
    }

    #[test]
    fn failures_are_down() {
        assert_eq!(
            classify(200, &ProbeOutcome::Timeout),
            (HealthState::Down, Some("Request timeout".into()))
        );
        assert_eq!(
            classify(200, &ProbeOutcome::ConnectError),
            (HealthState::Down, Some("Connection error".into()))
        );
        assert_eq!(
            classify(200, &ProbeOutcome::TransportError("invalid header".into())),
            (HealthState::Down, Some("invalid header".into()))
        );
    }
}
