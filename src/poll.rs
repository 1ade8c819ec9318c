//! One poll cycle: fetch, validate, diff against last-known statuses,
//! notify on change.
//!
//! The cycle itself never retries and never sleeps; scheduling and error
//! damping belong to the [`Supervisor`](crate::supervisor::Supervisor).

use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use crate::api::{FetchStatus, Homework, check_response};
use crate::error::CycleError;
use crate::telegram::Notify;
use crate::verdict::HomeworkStatus;

/// Cross-cycle state. Owned and mutated exclusively by the supervisor.
#[derive(Debug)]
pub struct PollState {
    /// Last status a notification was delivered for, keyed by record id.
    /// Diffing per id means one process can follow several submissions
    /// without their transitions shadowing each other.
    last_notified: HashMap<i64, String>,
    /// Forward cursor passed as `from_date` on the next fetch.
    /// Advances monotonically.
    pub cursor: i64,
}

impl PollState {
    pub fn new(start_cursor: i64) -> Self {
        Self {
            last_notified: HashMap::new(),
            cursor: start_cursor,
        }
    }

    /// The status most recently notified for a record, if any.
    pub fn last_status(&self, id: i64) -> Option<&str> {
        self.last_notified.get(&id).map(String::as_str)
    }
}

/// What one successful cycle did.
#[derive(Debug, Default)]
pub struct CycleOutcome {
    /// Status-change notifications delivered.
    pub notified: usize,
    /// Raw status values outside the verdict table, reported and skipped.
    pub skipped: Vec<String>,
}

/// Notification text for a status change.
pub fn status_change_message(homework: &Homework, status: HomeworkStatus) -> String {
    format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework.homework_name,
        status.verdict()
    )
}

/// Notification text for the first failure of an error streak.
pub fn failure_message(error: &CycleError) -> String {
    format!("Сбой в работе программы: {error}")
}

/// Execute one fetch → validate → diff → notify pass.
///
/// Fetch and validation failures abort the cycle and propagate. An
/// undocumented status only skips its record. A failed delivery is logged
/// and leaves `last_notified` untouched, so the same transition is retried
/// on the next cycle rather than lost.
pub async fn run_cycle(
    fetcher: &impl FetchStatus,
    notifier: &impl Notify,
    state: &mut PollState,
) -> Result<CycleOutcome, CycleError> {
    let raw = fetcher.fetch(state.cursor).await?;
    let checked = check_response(&raw)?;

    let mut outcome = CycleOutcome::default();
    for homework in &checked.homeworks {
        let status = match HomeworkStatus::parse(&homework.status) {
            Ok(status) => status,
            Err(unknown) => {
                warn!(id = homework.id, %unknown, "skipping record");
                outcome.skipped.push(unknown.0);
                continue;
            }
        };

        if state.last_status(homework.id) == Some(homework.status.as_str()) {
            debug!(id = homework.id, %status, "status unchanged");
            continue;
        }

        let text = status_change_message(homework, status);
        match notifier.send(&text).await {
            Ok(()) => {
                info!(id = homework.id, %status, "delivered status-change notification");
                state
                    .last_notified
                    .insert(homework.id, homework.status.clone());
                outcome.notified += 1;
            }
            Err(e) => {
                error!(id = homework.id, error = %e, "failed to deliver notification");
            }
        }
    }

    if let Some(cursor) = checked.current_date
        && cursor > state.cursor
    {
        state.cursor = cursor;
    }

    Ok(outcome)
}
