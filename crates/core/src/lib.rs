//! `eventrelay-core`: shared error model for envelope dispatch.
//!
//! This crate has no IO and no transport concerns; every failure it describes
//! is local to a single inbound message.

pub mod error;

pub use error::{DispatchError, DispatchResult, HandlingError};
