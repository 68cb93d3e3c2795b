//! # Shared Types Crate
//!
//! Domain identifiers and the error taxonomy shared by every Attestation-Court
//! subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Typed Errors**: Every failure is one of `ValidationError`, `StateError`
//!   or `FundsError`, wrapped by `CourtError` at subsystem boundaries.
//! - **Caller-Supplied Time**: Nothing here reads a wall clock; `Timestamp`
//!   values always come from the execution context.
//! - **Lossless Amounts**: tagged wire types route `Amount` fields through
//!   `amount_serde`.

pub mod amount_serde;
pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
