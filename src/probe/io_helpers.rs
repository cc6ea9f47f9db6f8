// src/probe/io_helpers.rs

use super::TdrProbe;
use crate::common::{
    error::TdrError,
    hal_traits::{FrameLog, ProbeBus, ProbeTimer},
    timing,
};
use core::fmt::Debug;
use core::time::Duration;

// Implementation block for byte-level I/O helpers
impl<IF, L> TdrProbe<IF, L>
where
    IF: ProbeBus + ProbeTimer,
    IF::Error: Debug,
    L: FrameLog,
{
    /// Polls the bus for one byte until it arrives or `timeout` elapses.
    pub(super) fn blocking_read_byte(
        &mut self,
        timeout: Duration,
    ) -> Result<u8, TdrError<IF::Error>> {
        let deadline = self.interface.now() + timeout;

        loop {
            match self.interface.read_byte() {
                Ok(byte) => return Ok(byte),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(TdrError::Timeout);
                    }
                    self.interface.delay_us(timing::READ_POLL_INTERVAL_US);
                }
                Err(nb::Error::Other(e)) => return Err(TdrError::Io(e)),
            }
        }
    }

    /// Reads one response line into the frame buffer.
    ///
    /// Accumulates bytes until the LF terminator, the buffer cap, or a
    /// byte timeout; `byte_timeout` bounds every byte individually. The
    /// CR half of the CRLF terminator is stripped from the result. A
    /// timeout before the first byte is an error; a timeout mid-line
    /// keeps the partial content.
    ///
    /// Returns the number of payload bytes captured; 0 means the probe
    /// sent an empty line.
    pub(super) fn read_line(
        &mut self,
        byte_timeout: Duration,
    ) -> Result<usize, TdrError<IF::Error>> {
        self.frame.clear();

        loop {
            match self.blocking_read_byte(byte_timeout) {
                Ok(b'\n') => break,
                // Probes occasionally emit stray NULs on noisy lines
                Ok(0) => continue,
                Ok(byte) => {
                    if !self.frame.push(byte) {
                        break;
                    }
                }
                Err(TdrError::Timeout) if !self.frame.is_empty() => break,
                Err(e) => return Err(e),
            }
        }

        // Drop the CR left behind by the CRLF terminator
        if self.frame.as_bytes().last() == Some(&b'\r') {
            self.frame.truncate(self.frame.len() - 1);
        }

        self.interface
            .delay_ms(self.post_read_settle.as_millis() as u32);

        Ok(self.frame.len())
    }
}
