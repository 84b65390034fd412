//! Synchronization with the remote routine store.
//!
//! Two operations: fetch every routine for an identity, and submit one.
//! Responses are validated at this boundary.

pub mod client;
pub mod types;

#[cfg(test)]
mod types_tests;

pub use client::{fetch_url, routines_url, SyncClient, ROUTINES_SEGMENT};
pub use types::{parse_routines, RemoteRoutine, SyncError};
