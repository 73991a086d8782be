//! # carebook-gateway
//!
//! Simulated scheduling, payment, and report gateways for the carebook
//! runtime.
//!
//! ## Overview
//!
//! Each gateway implements the corresponding trait from
//! [`carebook_core::traits`], sleeps for a configurable [`Latency`], and
//! resolves. The payment gateway's failure behavior is injected through
//! [`fault::FaultStrategy`]: uniform-random for demos, scripted or fixed for
//! deterministic tests.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use carebook_gateway::{Latency, SimulatedPaymentGateway, fault::UniformFaults};
//!
//! let payments = SimulatedPaymentGateway::new(
//!     Latency::realistic(),
//!     Box::new(UniformFaults::default_rate()),
//! );
//! ```

pub mod fault;
pub mod simulated;

pub use fault::{AlwaysFail, FaultStrategy, NoFaults, ScriptedFaults, UniformFaults};
pub use simulated::{Latency, SimulatedPaymentGateway, SimulatedReportService, SimulatedScheduler};
