// src/lib.rs

#![cfg_attr(not(test), no_std)]

//! Driver for Acclima TDR soil moisture probes.
//!
//! The probes speak an SDI-12 style single-wire protocol: the datalogger
//! sends short ASCII command frames (`?!`, `aI!`, `aM!`, `aD0!`) and the
//! probe answers with CRLF-terminated ASCII lines. This crate implements
//! the command/response engine on top of two small capability traits
//! ([`ProbeBus`] and [`ProbeTimer`]), so it runs against any transport
//! that can push bytes onto the wire and read them back one at a time.

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod common;
pub mod probe;

// Re-export key types for convenience
pub use common::{Command, FrameBuffer, FrameLog, Measurement, MeasurementTiming, NullLog};
pub use common::{ProbeAddress, ProbeBus, ProbeInstant, ProbeTimer};
pub use common::{ResponseParseError, TdrError};
pub use probe::TdrProbe;
