//! # Court Node
//!
//! Library half of the `court-node` binary.
//!
//! - `script` - JSON-lines operation log format
//! - `replay` - deterministic replay of a script against a fresh court

pub mod replay;
pub mod script;

pub use replay::{LineOutcome, ReplayReport, ReplayRuntime};
pub use script::{parse_script, ScriptLine, ScriptOp};
