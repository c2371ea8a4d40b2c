//! Draft service — debounced estimation for the in-progress form.
//!
//! DESIGN
//! ======
//! Each demo session owns one draft actor. Field updates replace the watched
//! tuple and re-arm a single debounce timer; only the final state of an edit
//! burst ever settles into a generation call. Every fired call is tagged with
//! a monotonically increasing generation, and completions whose generation is
//! no longer current are discarded, so a slow in-flight call for an earlier
//! form state can never overwrite the result of a later one.
//!
//! ERROR HANDLING
//! ==============
//! Insufficient input (missing area, floors, or material) silently skips
//! estimation. A failed generation call clears the result and records a
//! failed phase; it is not retried.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio::sync::{RwLock, mpsc, oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::llm::GenerateText;
use crate::services::estimate::{self, EstimateRequest, MaterialGrade};

const DEFAULT_DEBOUNCE_MS: u64 = 600;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

/// Prompt fallbacks applied when the optional text fields are blank.
const DEFAULT_PROJECT_NAME: &str = "Building Estimate";
const DEFAULT_LOCATION: &str = "India";

// =============================================================================
// TYPES
// =============================================================================

/// The watched field tuple of the estimation form. All fields optional while
/// the user is still typing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFields {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub floor_area_sq_m: Option<u32>,
    #[serde(default)]
    pub floors: Option<u32>,
    #[serde(default)]
    pub material: Option<MaterialGrade>,
}

impl DraftFields {
    /// Build a concrete estimation request, or `None` while the guarded
    /// fields (area, floors, material) are unset or non-positive.
    ///
    /// Blank name/location fall back to prompt defaults; what the user typed
    /// is kept verbatim in the draft itself.
    #[must_use]
    pub fn as_request(&self) -> Option<EstimateRequest> {
        let floor_area_sq_m = self.floor_area_sq_m.filter(|a| *a > 0)?;
        let floors = self.floors.filter(|f| *f > 0)?;
        let material = self.material?;

        let project_name = match self.project_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_PROJECT_NAME.to_string(),
        };
        let location = match self.location.as_deref().map(str::trim) {
            Some(loc) if !loc.is_empty() => loc.to_string(),
            _ => DEFAULT_LOCATION.to_string(),
        };

        Some(EstimateRequest { project_name, location, floor_area_sq_m, floors, material })
    }
}

/// Where the draft's estimate currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum EstimatePhase {
    /// No estimation has settled yet.
    Idle,
    /// A generation call is in flight.
    Calculating,
    /// The latest settled call produced a cost.
    Ready { estimated_cost: i64 },
    /// The latest settled call replied without a parseable number.
    NoValue,
    /// The latest settled call failed.
    Failed,
}

/// Published draft state. `generation` counts fired estimation calls.
#[derive(Debug, Clone, Serialize)]
pub struct DraftState {
    pub fields: DraftFields,
    #[serde(flatten)]
    pub phase: EstimatePhase,
    pub generation: u64,
}

impl DraftState {
    fn initial() -> Self {
        Self { fields: DraftFields::default(), phase: EstimatePhase::Idle, generation: 0 }
    }
}

type ReplaceMsg = (DraftFields, oneshot::Sender<DraftState>);

// =============================================================================
// HANDLE
// =============================================================================

/// Cheap handle to a draft actor. Dropping every handle stops the actor,
/// which also cancels any pending debounce timer.
#[derive(Clone)]
pub struct DraftHandle {
    tx: mpsc::Sender<ReplaceMsg>,
    state: watch::Receiver<DraftState>,
}

impl DraftHandle {
    /// Spawn a draft actor with the given estimator and debounce interval.
    #[must_use]
    pub fn spawn(estimator: Option<Arc<dyn GenerateText>>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<ReplaceMsg>(32);
        let (state_tx, state_rx) = watch::channel(DraftState::initial());
        tokio::spawn(run(rx, state_tx, estimator, debounce));
        Self { tx, state: state_rx }
    }

    /// Replace the watched field tuple. Returns the state observed once the
    /// update is applied; estimation settles asynchronously afterwards.
    pub async fn replace(&self, fields: DraftFields) -> DraftState {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send((fields, ack_tx)).await.is_ok() {
            if let Ok(state) = ack_rx.await {
                return state;
            }
        }
        self.snapshot()
    }

    /// Current draft state.
    #[must_use]
    pub fn snapshot(&self) -> DraftState {
        self.state.borrow().clone()
    }

    /// Watch receiver for observing settles as they land.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DraftState> {
        self.state.clone()
    }
}

// =============================================================================
// ACTOR LOOP
// =============================================================================

async fn run(
    mut rx: mpsc::Receiver<ReplaceMsg>,
    state_tx: watch::Sender<DraftState>,
    estimator: Option<Arc<dyn GenerateText>>,
    debounce: Duration,
) {
    let (done_tx, mut done_rx) = mpsc::channel::<(u64, Result<Option<i64>, crate::llm::GenError>)>(8);

    let timer = tokio::time::sleep(Duration::ZERO);
    tokio::pin!(timer);
    let mut armed = false;

    let mut fields = DraftFields::default();
    let mut generation: u64 = 0;

    loop {
        tokio::select! {
            maybe = rx.recv() => {
                let Some((next, ack)) = maybe else { break };

                if next != fields {
                    fields = next;
                    state_tx.send_modify(|s| s.fields = fields.clone());

                    if fields.as_request().is_some() {
                        timer.as_mut().reset(Instant::now() + debounce);
                        armed = true;
                    } else {
                        // Insufficient data: cancel any pending settle.
                        armed = false;
                    }
                }

                let _ = ack.send(state_tx.borrow().clone());
            }

            () = &mut timer, if armed => {
                armed = false;
                let Some(request) = fields.as_request() else { continue };

                generation += 1;
                let current = generation;
                state_tx.send_modify(|s| {
                    s.phase = EstimatePhase::Calculating;
                    s.generation = current;
                });

                match &estimator {
                    Some(client) => {
                        let client = Arc::clone(client);
                        let done = done_tx.clone();
                        tokio::spawn(async move {
                            let outcome = estimate::request_estimate(client.as_ref(), &request).await;
                            let _ = done.send((current, outcome)).await;
                        });
                    }
                    None => {
                        warn!(generation = current, "estimator not configured; draft settle failed");
                        state_tx.send_modify(|s| s.phase = EstimatePhase::Failed);
                    }
                }
            }

            Some((settled, outcome)) = done_rx.recv() => {
                if settled != generation {
                    debug!(settled, current = generation, "discarding stale estimate completion");
                    continue;
                }

                let phase = match outcome {
                    Ok(Some(cost)) => EstimatePhase::Ready { estimated_cost: cost },
                    Ok(None) => EstimatePhase::NoValue,
                    Err(e) => {
                        warn!(generation = settled, error = %e, "estimate call failed");
                        EstimatePhase::Failed
                    }
                };
                state_tx.send_modify(|s| s.phase = phase);
            }
        }
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Live draft sessions keyed by session token.
#[derive(Clone)]
pub struct DraftRegistry {
    inner: Arc<RwLock<HashMap<String, DraftHandle>>>,
}

impl DraftRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Look up the draft for a session, if one exists.
    pub async fn get(&self, token: &str) -> Option<DraftHandle> {
        self.inner.read().await.get(token).cloned()
    }

    /// Look up or lazily spawn the draft for a session.
    pub async fn get_or_spawn(&self, token: &str, estimator: Option<Arc<dyn GenerateText>>) -> DraftHandle {
        if let Some(handle) = self.get(token).await {
            return handle;
        }

        let mut drafts = self.inner.write().await;
        drafts
            .entry(token.to_string())
            .or_insert_with(|| {
                let debounce_ms = super::env_parse("DRAFT_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS);
                DraftHandle::spawn(estimator, Duration::from_millis(debounce_ms))
            })
            .clone()
    }

    /// Drop a session's draft. The actor exits once request-scoped handle
    /// clones are gone, cancelling any pending debounce timer with it.
    pub async fn remove(&self, token: &str) {
        self.inner.write().await.remove(token);
    }

    /// Drop every draft whose token is not in `active`. Returns the number
    /// of drafts evicted.
    pub async fn retain_tokens(&self, active: &HashSet<String>) -> usize {
        let mut drafts = self.inner.write().await;
        let before = drafts.len();
        drafts.retain(|token, _| active.contains(token));
        before - drafts.len()
    }
}

impl Default for DraftRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SWEEP
// =============================================================================

/// Periodically evict drafts whose demo session has expired or been deleted.
///
/// Logout and a successful save remove drafts eagerly; this sweep catches
/// sessions that were simply abandoned, so actor tasks do not accumulate for
/// the life of the process. Interval is `DRAFT_SWEEP_INTERVAL_SECS`
/// (default 300).
pub async fn run_sweeper(pool: PgPool, drafts: DraftRegistry) {
    let secs = super::env_parse("DRAFT_SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS);
    let mut tick = tokio::time::interval(Duration::from_secs(secs.max(1)));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tick.tick().await;

    loop {
        tick.tick().await;
        match crate::services::session::list_active_tokens(&pool).await {
            Ok(active) => {
                let active: HashSet<String> = active.into_iter().collect();
                let evicted = drafts.retain_tokens(&active).await;
                if evicted > 0 {
                    debug!(evicted, "swept drafts for expired sessions");
                }
            }
            Err(e) => warn!(error = %e, "draft sweep failed"),
        }
    }
}

#[cfg(test)]
#[path = "draft_test.rs"]
mod tests;
