//! Shared view-model types for the Relief platform.
//!
//! Every entity here is a read-only projection of remote contract state.
//! The contract is authoritative: a value held by a caller is a snapshot
//! that must be treated as stale after any confirmed mutation and refetched
//! rather than patched in place.

pub mod disaster;
pub mod donation;
pub mod proposal;
pub mod units;
pub mod vote;
