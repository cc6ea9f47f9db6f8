// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod command;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod response;
pub mod timing;

// --- Re-export key types/traits/functions for easier access ---

// From address.rs
pub use address::ProbeAddress;

// From command.rs
pub use command::Command;

// From error.rs
pub use error::TdrError;

// From frame.rs
pub use frame::{FrameBuffer, FRAME_CAPACITY};

// From hal_traits.rs
pub use hal_traits::{FrameLog, NullLog, ProbeBus, ProbeInstant, ProbeTimer};

// From response/mod.rs (and its sub-modules via its own `pub use`)
pub use response::{
    parse_measurement_timing, parse_triple, Measurement, MeasurementTiming, ResponseParseError,
    ValueScanner,
};

// From timing.rs (constants - users can access via common::timing::*)
// No re-exports by default.
