//! Command frames understood by Acclima TDR probes.
//!
//! The probes implement the measurement subset of the SDI-12 command set:
//! address query (`?!`), identification (`aI!`), start measurement (`aM!`)
//! and send data (`aD0!`). Every frame ends with the `!` delimiter; the
//! transport adds no further framing.

use core::fmt;
use core::fmt::Write;

use arrayvec::ArrayString;

use super::{address::ProbeAddress, error::TdrError};

/// Capacity of the command formatting buffer; the longest frame (`aD0!`)
/// is four bytes.
pub const MAX_COMMAND_LEN: usize = 8;

/// Represents a command frame to be sent to a probe.
///
/// The `Display` implementation generates the exact wire format. The
/// address query is the one frame transmitted without an address prefix:
/// it exists to learn the address of an as-yet-unaddressed probe.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Address Query (`?!`) - asks the single probe on the bus to report its address.
    AddressQuery,

    /// Identify (`aI!`) - requests the probe's identification string.
    Identify { address: ProbeAddress },

    /// Start Measurement (`aM!`) - begins a measurement cycle; the probe
    /// answers with an `aTTTn` timing acknowledgment.
    StartMeasurement { address: ProbeAddress },

    /// Send Data (`aD0!`) - fetches the measured values. The probes return
    /// everything in the first data page, so only index 0 is ever used.
    SendData { address: ProbeAddress },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddressQuery => write!(f, "?!"),
            Command::Identify { address } => write!(f, "{}I!", address),
            Command::StartMeasurement { address } => write!(f, "{}M!", address),
            Command::SendData { address } => write!(f, "{}D0!", address),
        }
    }
}

impl Command {
    /// Returns the address the command is directed to.
    ///
    /// `None` for the address query, which is broadcast unaddressed.
    pub fn address(&self) -> Option<ProbeAddress> {
        match self {
            Command::AddressQuery => None,
            Command::Identify { address } => Some(*address),
            Command::StartMeasurement { address } => Some(*address),
            Command::SendData { address } => Some(*address),
        }
    }

    /// Formats the command into a stack buffer ready for transmission.
    pub fn format_into(&self) -> Result<ArrayString<MAX_COMMAND_LEN>, TdrError<()>> {
        let mut buffer = ArrayString::new();
        write!(buffer, "{}", self).map_err(|_| TdrError::CommandFormat)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    // Helper for creating commands in tests
    fn addr(c: char) -> ProbeAddress {
        ProbeAddress::new(c).unwrap()
    }

    #[test]
    fn test_command_formatting() {
        assert_eq!(Command::AddressQuery.to_string(), "?!");
        assert_eq!(Command::Identify { address: addr('1') }.to_string(), "1I!");
        assert_eq!(
            Command::StartMeasurement { address: addr('0') }.to_string(),
            "0M!"
        );
        assert_eq!(Command::SendData { address: addr('0') }.to_string(), "0D0!");
        assert_eq!(Command::SendData { address: addr('z') }.to_string(), "zD0!");
    }

    #[test]
    fn test_format_into() {
        let frame = Command::StartMeasurement { address: addr('4') }
            .format_into()
            .unwrap();
        assert_eq!(frame.as_str(), "4M!");
        assert_eq!(frame.as_bytes(), b"4M!");

        let frame = Command::AddressQuery.format_into().unwrap();
        assert_eq!(frame.as_bytes(), b"?!");
    }

    #[test]
    fn test_formatting_into_bounded_writer() {
        // The longest frame still fits a four-byte sink.
        let mut output = HeaplessString::<4>::new();
        assert!(write!(output, "{}", Command::SendData { address: addr('7') }).is_ok());
        assert_eq!(output.as_str(), "7D0!");
    }

    #[test]
    fn test_address_retrieval() {
        assert_eq!(Command::AddressQuery.address(), None);
        assert_eq!(
            Command::Identify { address: addr('8') }.address(),
            Some(addr('8'))
        );
        assert_eq!(
            Command::StartMeasurement { address: addr('3') }.address(),
            Some(addr('3'))
        );
        assert_eq!(
            Command::SendData { address: addr('6') }.address(),
            Some(addr('6'))
        );
    }
}
