//! # Deterministic Replay
//!
//! Runs a parsed script against a fresh court. Every operation carries its
//! own timestamp, so the same script always produces the same accounts,
//! periods and totals. A failed line is recorded and the replay moves on.

use crate::script::{ScriptLine, ScriptOp};
use ac_05_court_service::{
    handle_event, BusSubmissionRegistry, CourtApi, CourtConfig, CourtService, CourtSnapshot,
    IntakeResult, ResolveOutcome,
};
use serde::Serialize;
use serde_json::{json, Value};
use shared_bus::{CourtEvent, EventFilter, EventPublisher, InMemoryEventBus, Subscription};
use std::sync::Arc;
use tracing::{info, warn};

type Court = CourtService<BusSubmissionRegistry<InMemoryEventBus>, InMemoryEventBus>;

/// Result of one script line.
#[derive(Clone, Debug, Serialize)]
pub struct LineOutcome {
    pub line: usize,
    pub op: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Events the line put on the bus.
    pub events: Vec<CourtEvent>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReplayReport {
    pub lines: Vec<LineOutcome>,
    pub failures: usize,
    pub events_published: u64,
    #[serde(flatten)]
    pub state: CourtSnapshot,
    /// `None` when the pool totals reconcile with every account.
    pub audit_error: Option<String>,
}

pub struct ReplayRuntime {
    bus: Arc<InMemoryEventBus>,
    court: Arc<Court>,
    tap: Subscription,
}

impl ReplayRuntime {
    pub fn new(config: CourtConfig) -> Self {
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
        let tap = bus.subscribe(EventFilter::all());
        let registry = Arc::new(BusSubmissionRegistry::new(Arc::clone(&bus)));
        let court = Arc::new(CourtService::new(config, registry, Arc::clone(&bus)));
        Self { bus, court, tap }
    }

    pub fn court(&self) -> &Arc<Court> {
        &self.court
    }

    pub async fn run(mut self, script: Vec<ScriptLine>) -> ReplayReport {
        let mut lines = Vec::with_capacity(script.len());

        for entry in script {
            let outcome = match entry.op {
                Ok(op) => {
                    let name = op.name().to_string();
                    match self.apply(op).await {
                        Ok(result) => LineOutcome {
                            line: entry.number,
                            op: name,
                            ok: true,
                            result: Some(result),
                            error: None,
                            events: Vec::new(),
                        },
                        Err(error) => {
                            warn!(line = entry.number, op = %name, %error, "Operation rejected");
                            LineOutcome {
                                line: entry.number,
                                op: name,
                                ok: false,
                                result: None,
                                error: Some(error),
                                events: Vec::new(),
                            }
                        }
                    }
                }
                Err(error) => {
                    warn!(line = entry.number, %error, "Unparseable script line");
                    LineOutcome {
                        line: entry.number,
                        op: "unparsed".to_string(),
                        ok: false,
                        result: None,
                        error: Some(error),
                        events: Vec::new(),
                    }
                }
            };
            lines.push(LineOutcome {
                events: self.tap.drain(),
                ..outcome
            });
        }

        let failures = lines.iter().filter(|l| !l.ok).count();
        info!(lines = lines.len(), failures, "Replay finished");

        ReplayReport {
            failures,
            events_published: self.bus.events_published(),
            state: self.court.snapshot(),
            audit_error: self.court.audit().err().map(|e| e.to_string()),
            lines,
        }
    }

    async fn apply(&self, op: ScriptOp) -> Result<Value, String> {
        let court = self.court.as_ref();
        let value = match op {
            ScriptOp::Stake { account, amount, at } => {
                to_value(court.stake(&account, amount, at).await)?
            }
            ScriptOp::Unstake { account, amount, at } => {
                to_value(court.unstake(&account, amount, at).await)?
            }
            ScriptOp::SubmissionCreated {
                submission_id,
                author_id,
                at,
            } => {
                let event = CourtEvent::SubmissionCreated {
                    submission_id,
                    author_id,
                    created_at: at,
                };
                match handle_event(court, event).await {
                    IntakeResult::Started => json!("started"),
                    IntakeResult::Duplicate => json!("duplicate"),
                    IntakeResult::Ignored => json!("ignored"),
                    IntakeResult::Failed(err) => return Err(err.to_string()),
                }
            }
            ScriptOp::Attest {
                submission_id,
                attestor,
                choice,
                stake,
                at,
            } => {
                let id = court
                    .attest(&submission_id, &attestor, choice, stake, at)
                    .await
                    .map_err(|e| e.to_string())?;
                json!({ "attestation_id": id.to_hex() })
            }
            ScriptOp::Revoke {
                submission_id,
                attestor,
                at,
            } => {
                court
                    .revoke_attestation(&submission_id, &attestor, at)
                    .await
                    .map_err(|e| e.to_string())?;
                Value::Null
            }
            ScriptOp::Resolve { submission_id, at } => {
                match court.resolve(&submission_id, at).await.map_err(|e| e.to_string())? {
                    ResolveOutcome::Finalized(resolution) => to_value(Ok(resolution))?,
                    ResolveOutcome::AlreadyResolved => json!("already_resolved"),
                }
            }
            ScriptOp::Accrue { account, at } => {
                to_value(court.accrue_yield(&account, at).await)?
            }
            ScriptOp::Claim { account, at } => {
                to_value(court.claim_rewards(&account, at).await)?
            }
        };
        Ok(value)
    }
}

fn to_value<T: Serialize>(result: shared_types::CourtResult<T>) -> Result<Value, String> {
    let value = result.map_err(|e| e.to_string())?;
    serde_json::to_value(value).map_err(|e| e.to_string())
}
