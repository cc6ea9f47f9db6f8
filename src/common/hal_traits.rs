// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::Add;
use core::time::Duration;

/// A point on the platform's monotonic clock.
///
/// Deadlines are computed as `now() + timeout` and compared with `>=`,
/// so the instant type only needs addition and ordering.
pub trait ProbeInstant: Copy + Add<Duration, Output = Self> + PartialOrd {}

impl<T> ProbeInstant for T where T: Copy + Add<Duration, Output = T> + PartialOrd {}

/// Abstraction for timer/delay operations required by the driver.
pub trait ProbeTimer {
    /// Monotonic instant type used for read deadlines.
    type Instant: ProbeInstant;

    /// Returns the current instant of the monotonic clock.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Abstraction for the half-duplex probe bus.
///
/// Implementations own the physical encoding (bit-banged GPIO, UART behind
/// an RS-485 transceiver, ...); the driver only sends whole command frames
/// and reads response bytes back one at a time.
pub trait ProbeBus {
    /// Associated error type for transport errors.
    type Error: Debug;

    /// Powers up / claims the bus ahead of a command exchange.
    fn activate(&mut self) -> Result<(), Self::Error>;

    /// Releases the bus after the exchange completes.
    fn deactivate(&mut self) -> Result<(), Self::Error>;

    /// Transmits one complete command frame, including the `!` delimiter.
    fn send_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Attempts to read a single byte from the bus.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if no byte is available yet;
    /// the driver turns that into a deadline-bounded blocking read.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;
}

/// Sink for outbound command frames, for human inspection while debugging
/// wiring or addressing problems. Never required for correctness.
pub trait FrameLog {
    /// Called with the rendered frame just before it is transmitted.
    fn command_sent(&mut self, frame: &str);
}

/// The default log sink: discards everything.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullLog;

impl FrameLog for NullLog {
    fn command_sent(&mut self, _frame: &str) {}
}
