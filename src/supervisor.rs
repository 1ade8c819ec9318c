//! The scheduling loop: fixed-period ticks, lifecycle state machine,
//! and error-notification damping.
//!
//! The supervisor is the only layer that decides notify-vs-suppress for
//! failures and the only owner of [`PollState`]. One cycle runs to
//! completion before the next is scheduled; there are no concurrent
//! cycles.

use std::fmt;
use std::time::Duration;

use chrono::Local;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::api::FetchStatus;
use crate::poll::{self, PollState, failure_message};
use crate::telegram::Notify;

/// Lifecycle states of the supervisor.
///
/// `STARTING → RUNNING ⇄ ERROR_BACKOFF`, with `STOPPED` terminal.
/// Being in `ErrorBackoff` *is* the consecutive-error streak: the one
/// error notification is sent on the `Running → ErrorBackoff` edge and
/// suppressed while the state stays there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Starting,
    Running,
    ErrorBackoff,
    Stopped,
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupervisorState::Starting => write!(f, "STARTING"),
            SupervisorState::Running => write!(f, "RUNNING"),
            SupervisorState::ErrorBackoff => write!(f, "ERROR_BACKOFF"),
            SupervisorState::Stopped => write!(f, "STOPPED"),
        }
    }
}

/// Events the supervisor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Startup checks passed.
    ConfigOk,
    /// Startup checks failed; no recovery path.
    ConfigMissing,
    /// A poll cycle completed, with or without notifications.
    CycleSucceeded,
    /// A poll cycle aborted with a [`CycleError`](crate::error::CycleError).
    CycleFailed,
}

/// Compute the next lifecycle state. Total over all pairs; events that
/// make no sense for the current state leave it unchanged, and `Stopped`
/// is terminal.
pub fn next_state(state: SupervisorState, event: Event) -> SupervisorState {
    match (state, event) {
        (SupervisorState::Stopped, _) => SupervisorState::Stopped,
        (SupervisorState::Starting, Event::ConfigOk) => SupervisorState::Running,
        (SupervisorState::Starting, Event::ConfigMissing) => SupervisorState::Stopped,
        (SupervisorState::Starting, _) => SupervisorState::Starting,
        (SupervisorState::Running | SupervisorState::ErrorBackoff, Event::CycleSucceeded) => {
            SupervisorState::Running
        }
        (SupervisorState::Running | SupervisorState::ErrorBackoff, Event::CycleFailed) => {
            SupervisorState::ErrorBackoff
        }
        (state, _) => state,
    }
}

/// Drives poll cycles on a fixed period.
pub struct Supervisor<F, N> {
    fetcher: F,
    notifier: N,
    period: Duration,
    state: SupervisorState,
    poll_state: PollState,
}

impl<F: FetchStatus, N: Notify> Supervisor<F, N> {
    pub fn new(fetcher: F, notifier: N, start_cursor: i64, period: Duration) -> Self {
        Self {
            fetcher,
            notifier,
            period,
            state: SupervisorState::Starting,
            poll_state: PollState::new(start_cursor),
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Announce startup and enter `RUNNING`. Configuration is validated
    /// before a supervisor exists, so the `STARTING` check here is the
    /// announcement itself; a failed delivery is logged, not fatal.
    pub async fn start(&mut self) {
        let text = format!(
            "Я начал свою работу: {}",
            Local::now().format("%d-%m-%Y %H:%M")
        );
        if let Err(e) = self.notifier.send(&text).await {
            error!(error = %e, "failed to deliver startup message");
        }
        self.state = next_state(self.state, Event::ConfigOk);
        info!(state = %self.state, period_secs = self.period.as_secs(), "supervisor started");
    }

    /// Execute one poll cycle and apply the damping policy: exactly one
    /// error notification per failure streak, silent recovery.
    pub async fn tick(&mut self) {
        match poll::run_cycle(&self.fetcher, &self.notifier, &mut self.poll_state).await {
            Ok(outcome) => {
                if self.state == SupervisorState::ErrorBackoff {
                    info!("error streak ended");
                }
                if !outcome.skipped.is_empty() {
                    warn!(
                        count = outcome.skipped.len(),
                        "cycle skipped records with undocumented statuses"
                    );
                }
                if outcome.notified == 0 {
                    debug!(cursor = self.poll_state.cursor, "no changes");
                }
                self.state = next_state(self.state, Event::CycleSucceeded);
            }
            Err(e) => {
                error!(error = %e, state = %self.state, "poll cycle failed");
                if self.state != SupervisorState::ErrorBackoff {
                    if let Err(send_err) = self.notifier.send(&failure_message(&e)).await {
                        error!(error = %send_err, "failed to deliver error notification");
                    }
                }
                self.state = next_state(self.state, Event::CycleFailed);
            }
        }
    }

    /// Announce startup, then tick forever on the fixed period.
    pub async fn run(&mut self) {
        self.start().await;
        loop {
            self.tick().await;
            sleep(self.period).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use crate::api::ApiError;
    use crate::telegram::NotifyError;

    struct ScriptedFetcher {
        responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    }

    impl ScriptedFetcher {
        fn new(responses: Vec<Result<Value, ApiError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    impl FetchStatus for ScriptedFetcher {
        async fn fetch(&self, _from_date: i64) -> Result<Value, ApiError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("fetcher script exhausted")
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Notify for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn unavailable() -> Result<Value, ApiError> {
        Err(ApiError::Endpoint {
            url: "https://example.test/".into(),
            status: 500,
        })
    }

    fn quiet() -> Result<Value, ApiError> {
        Ok(json!({"homeworks": []}))
    }

    fn supervisor(
        responses: Vec<Result<Value, ApiError>>,
    ) -> Supervisor<ScriptedFetcher, RecordingNotifier> {
        Supervisor::new(
            ScriptedFetcher::new(responses),
            RecordingNotifier::default(),
            0,
            Duration::from_secs(600),
        )
    }

    fn error_notifications(sent: &[String]) -> usize {
        sent.iter()
            .filter(|m| m.starts_with("Сбой в работе программы:"))
            .count()
    }

    #[test]
    fn transition_table() {
        use Event::*;
        use SupervisorState::*;

        assert_eq!(next_state(Starting, ConfigOk), Running);
        assert_eq!(next_state(Starting, ConfigMissing), Stopped);
        assert_eq!(next_state(Running, CycleSucceeded), Running);
        assert_eq!(next_state(Running, CycleFailed), ErrorBackoff);
        assert_eq!(next_state(ErrorBackoff, CycleFailed), ErrorBackoff);
        assert_eq!(next_state(ErrorBackoff, CycleSucceeded), Running);
        assert_eq!(next_state(Stopped, CycleSucceeded), Stopped);
        assert_eq!(next_state(Stopped, ConfigOk), Stopped);
    }

    #[test]
    fn state_display_matches_lifecycle_names() {
        assert_eq!(SupervisorState::Starting.to_string(), "STARTING");
        assert_eq!(SupervisorState::Running.to_string(), "RUNNING");
        assert_eq!(SupervisorState::ErrorBackoff.to_string(), "ERROR_BACKOFF");
        assert_eq!(SupervisorState::Stopped.to_string(), "STOPPED");
    }

    #[tokio::test]
    async fn start_announces_and_enters_running() {
        let mut sup = supervisor(vec![]);
        assert_eq!(sup.state(), SupervisorState::Starting);

        sup.start().await;

        assert_eq!(sup.state(), SupervisorState::Running);
        let sent = sup.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("Я начал свою работу:"));
    }

    #[tokio::test]
    async fn one_error_notification_per_streak() {
        // Ticks 1-3 fail, 4-5 succeed, 6 fails again.
        let mut sup = supervisor(vec![
            unavailable(),
            unavailable(),
            unavailable(),
            quiet(),
            quiet(),
            unavailable(),
        ]);
        sup.start().await;

        for _ in 0..6 {
            sup.tick().await;
        }

        assert_eq!(error_notifications(&sup.notifier.sent()), 2);
    }

    #[tokio::test]
    async fn failure_enters_backoff_and_success_recovers_silently() {
        let mut sup = supervisor(vec![unavailable(), quiet()]);
        sup.start().await;

        sup.tick().await;
        assert_eq!(sup.state(), SupervisorState::ErrorBackoff);

        sup.tick().await;
        assert_eq!(sup.state(), SupervisorState::Running);

        // Startup message + one error notification, no recovery message.
        assert_eq!(sup.notifier.sent().len(), 2);
    }

    #[tokio::test]
    async fn error_notification_carries_the_cause() {
        let mut sup = supervisor(vec![unavailable()]);
        sup.start().await;
        sup.tick().await;

        let sent = sup.notifier.sent();
        let failure = &sent[1];
        assert!(failure.contains("https://example.test/"));
        assert!(failure.contains("500"));
    }

    #[tokio::test]
    async fn status_changes_flow_through_the_supervisor() {
        let reviewing = json!({
            "homeworks": [{"id": 1, "homework_name": "hw.zip", "status": "reviewing"}]
        });
        let approved = json!({
            "homeworks": [{"id": 1, "homework_name": "hw.zip", "status": "approved"}]
        });
        let mut sup = supervisor(vec![Ok(reviewing), Ok(approved)]);
        sup.start().await;

        sup.tick().await;
        sup.tick().await;

        let sent = sup.notifier.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent[1].contains("Работа взята на проверку ревьюером."));
        assert!(sent[2].contains("Работа проверена: ревьюеру всё понравилось. Ура!"));
        assert_eq!(sup.state(), SupervisorState::Running);
    }

    #[tokio::test]
    async fn malformed_payload_is_damped_like_any_failure() {
        let mut sup = supervisor(vec![
            Ok(json!("not an object")),
            Ok(json!({"current_date": 1})),
        ]);
        sup.start().await;

        sup.tick().await;
        sup.tick().await;

        assert_eq!(sup.state(), SupervisorState::ErrorBackoff);
        assert_eq!(error_notifications(&sup.notifier.sent()), 1);
    }
}
