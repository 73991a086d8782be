//! # carebook-contracts
//!
//! Shared types, lifecycle states, and error contracts for the carebook
//! runtime.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod billing;
pub mod booking;
pub mod error;
pub mod hospital;
pub mod patient;
pub mod payment;
pub mod report;
pub mod triage;
