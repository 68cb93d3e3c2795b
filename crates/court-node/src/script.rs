//! # Operation Scripts
//!
//! A replay script is JSON lines, one tagged operation per line. Blank
//! lines and lines starting with `#` are skipped.
//!
//! ```text
//! {"op":"stake","account":"alice","amount":1000,"at":0}
//! {"op":"submission_created","submission_id":"s1","author_id":"xavier","at":100}
//! {"op":"attest","submission_id":"s1","attestor":"alice","choice":"valid","stake":300,"at":110}
//! {"op":"resolve","submission_id":"s1","at":172900}
//! ```

use serde::{Deserialize, Serialize};
use shared_types::{amount_serde, AccountId, Amount, AttestationChoice, SubmissionId, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOp {
    Stake {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
        at: Timestamp,
    },
    Unstake {
        account: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
        at: Timestamp,
    },
    /// Delivered through submission intake, as the registry would.
    SubmissionCreated {
        submission_id: SubmissionId,
        author_id: AccountId,
        at: Timestamp,
    },
    Attest {
        submission_id: SubmissionId,
        attestor: AccountId,
        choice: AttestationChoice,
        #[serde(with = "amount_serde")]
        stake: Amount,
        at: Timestamp,
    },
    Revoke {
        submission_id: SubmissionId,
        attestor: AccountId,
        at: Timestamp,
    },
    Resolve {
        submission_id: SubmissionId,
        at: Timestamp,
    },
    Accrue {
        account: AccountId,
        at: Timestamp,
    },
    Claim {
        account: AccountId,
        at: Timestamp,
    },
}

impl ScriptOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stake { .. } => "stake",
            Self::Unstake { .. } => "unstake",
            Self::SubmissionCreated { .. } => "submission_created",
            Self::Attest { .. } => "attest",
            Self::Revoke { .. } => "revoke",
            Self::Resolve { .. } => "resolve",
            Self::Accrue { .. } => "accrue",
            Self::Claim { .. } => "claim",
        }
    }
}

/// One non-blank script line, parsed or not.
#[derive(Debug)]
pub struct ScriptLine {
    /// 1-based line number in the source.
    pub number: usize,
    pub op: Result<ScriptOp, String>,
}

pub fn parse_script(source: &str) -> Vec<ScriptLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            Some(ScriptLine {
                number: index + 1,
                op: serde_json::from_str(line).map_err(|e| e.to_string()),
            })
        })
        .collect()
}
