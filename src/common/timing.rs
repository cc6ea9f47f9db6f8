// src/common/timing.rs

use core::time::Duration;

// Delay figures come from bench observation of TDR310/315 probes behind
// common RS-485 adapters rather than from the SDI-12 timing tables; the
// probes tolerate generous margins.

/// Settle time after bus activation before the first command may be sent.
pub const POST_ACTIVATE_SETTLE: Duration = Duration::from_millis(500);

/// Shorter settle used ahead of a measurement cycle.
pub const MEASUREMENT_SETTLE: Duration = Duration::from_millis(250);

/// Pause after every received line. 485 probes are misread through 485
/// adapters without it.
pub const POST_READ_SETTLE: Duration = Duration::from_millis(50);

/// Default timeout applied to each received byte.
pub const DEFAULT_BYTE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Interval between bus polls while waiting for the next byte.
pub const READ_POLL_INTERVAL_US: u32 = 100;
