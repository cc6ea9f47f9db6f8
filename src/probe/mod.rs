// src/probe/mod.rs

mod io_helpers;

use crate::common::{
    address::ProbeAddress,
    command::Command,
    error::TdrError,
    frame::FrameBuffer,
    hal_traits::{FrameLog, NullLog, ProbeBus, ProbeTimer},
    response::{parse_measurement_timing, Measurement, ResponseParseError, ValueScanner},
    timing,
};
use core::fmt::Debug;
use core::time::Duration;

/// A session with one Acclima TDR probe.
///
/// `IF` supplies the bus and timing capabilities; `L` is an optional
/// diagnostic sink for outbound frames and defaults to the silent
/// [`NullLog`]. The session owns the receive buffer and the saved probe
/// address; everything else is per-call.
#[derive(Debug)]
pub struct TdrProbe<IF, L = NullLog>
where
    IF: ProbeBus + ProbeTimer,
    IF::Error: Debug,
    L: FrameLog,
{
    interface: IF,
    log: L,
    address: ProbeAddress,
    frame: FrameBuffer,
    post_read_settle: Duration,
    byte_timeout: Duration,
}

impl<IF> TdrProbe<IF, NullLog>
where
    IF: ProbeBus + ProbeTimer,
    IF::Error: Debug,
{
    /// Creates a session with no known address; call
    /// [`find_address`](Self::find_address) before measuring.
    pub fn new(interface: IF) -> Self {
        Self::with_address(interface, ProbeAddress::QUERY)
    }

    /// Creates a session for a probe whose address is already known.
    pub fn with_address(interface: IF, address: ProbeAddress) -> Self {
        TdrProbe {
            interface,
            log: NullLog,
            address,
            frame: FrameBuffer::new(),
            post_read_settle: timing::POST_READ_SETTLE,
            byte_timeout: timing::DEFAULT_BYTE_TIMEOUT,
        }
    }
}

impl<IF, L> TdrProbe<IF, L>
where
    IF: ProbeBus + ProbeTimer,
    IF::Error: Debug,
    L: FrameLog,
{
    /// Replaces the diagnostic frame sink.
    pub fn attach_logger<L2: FrameLog>(self, log: L2) -> TdrProbe<IF, L2> {
        TdrProbe {
            interface: self.interface,
            log,
            address: self.address,
            frame: self.frame,
            post_read_settle: self.post_read_settle,
            byte_timeout: self.byte_timeout,
        }
    }

    /// The saved probe address; `'?'` until discovery succeeds.
    pub fn address(&self) -> ProbeAddress {
        self.address
    }

    /// Overrides the post-read settle pause. The 50 ms default suits the
    /// common RS-485 adapters; direct-wired targets can shorten it.
    pub fn set_post_read_settle(&mut self, settle: Duration) {
        self.post_read_settle = settle;
    }

    /// Overrides the default per-byte receive timeout.
    pub fn set_byte_timeout(&mut self, timeout: Duration) {
        self.byte_timeout = timeout;
    }

    /// Consumes the session and returns the interface.
    pub fn release(self) -> IF {
        self.interface
    }

    // --- Public Blocking Operations ---

    /// Queries the bus for the address of the attached probe (`?!`).
    ///
    /// On success the address is saved for subsequent operations and
    /// returned. An empty response line yields [`TdrError::EmptyFrame`],
    /// no response at all yields [`TdrError::Timeout`], and a
    /// non-alphanumeric reply yields [`TdrError::InvalidAddress`]; the
    /// saved address is left untouched in all three cases.
    pub fn find_address(&mut self) -> Result<ProbeAddress, TdrError<IF::Error>> {
        self.within_session(timing::POST_ACTIVATE_SETTLE, |probe| {
            probe.send_command(&Command::AddressQuery)?;
            let len = probe.read_line(probe.byte_timeout)?;
            if len == 0 {
                return Err(TdrError::EmptyFrame);
            }
            let first = probe.frame.as_bytes()[0] as char;
            let address =
                ProbeAddress::new(first).map_err(|_| TdrError::InvalidAddress(first))?;
            if address.is_query() {
                return Err(TdrError::InvalidAddress(first));
            }
            probe.address = address;
            Ok(address)
        })
    }

    /// Fetches the probe's identification string (`aI!`) into `out`.
    ///
    /// The string is copied verbatim, truncated to `out`; the number of
    /// bytes copied is returned.
    pub fn identify(&mut self, out: &mut [u8]) -> Result<usize, TdrError<IF::Error>> {
        self.ensure_addressed()?;
        self.within_session(timing::POST_ACTIVATE_SETTLE, |probe| {
            probe.send_command(&Command::Identify {
                address: probe.address,
            })?;
            probe.read_line(probe.byte_timeout)?;
            Ok(probe.frame.copy_to(out))
        })
    }

    /// Runs a full measurement cycle and returns the decoded reading.
    ///
    /// Sends `aM!`, parses the `aTTTn` acknowledgment, sits out the
    /// announced wait (the probe may cut it short with a service-request
    /// line), then fetches and decodes the data line from `aD0!`.
    ///
    /// The wait is a blocking read whose timeout is the announced number
    /// of seconds; the probe is genuinely unavailable for that interval,
    /// so there is no earlier cancellation point.
    pub fn read_values(&mut self) -> Result<Measurement, TdrError<IF::Error>> {
        self.ensure_addressed()?;
        self.within_session(timing::MEASUREMENT_SETTLE, |probe| {
            probe.send_command(&Command::StartMeasurement {
                address: probe.address,
            })?;
            let len = probe.read_line(probe.byte_timeout)?;
            if len == 0 {
                return Err(TdrError::EmptyFrame);
            }
            let ack = parse_measurement_timing(probe.frame.as_bytes(), probe.address)
                .map_err(map_parse_error)?;

            // Wait out the announced measurement time. A service request
            // line ends the wait early; expiry is the normal outcome.
            let wait = Duration::from_secs(u64::from(ack.wait_seconds));
            match probe.read_line(wait) {
                Ok(_) | Err(TdrError::Timeout) => {}
                Err(e) => return Err(e),
            }

            probe.send_command(&Command::SendData {
                address: probe.address,
            })?;
            let len = probe.read_line(probe.byte_timeout)?;
            if len == 0 {
                return Err(TdrError::EmptyFrame);
            }

            // Payload starts after the echoed address byte.
            let payload = &probe.frame.as_bytes()[1..];
            let mut scanner = ValueScanner::new(payload);
            let vol_water = scanner.next_f32().map_err(map_parse_error)?.unwrap_or(0.0);
            let temperature = scanner.next_f32().map_err(map_parse_error)?.unwrap_or(0.0);
            let permittivity = scanner.next_f32().map_err(map_parse_error)?.unwrap_or(0.0);
            let electrical_cond = scanner.next_u16().map_err(map_parse_error)?.unwrap_or(0);
            let pore_water_ec = scanner.next_u16().map_err(map_parse_error)?.unwrap_or(0);

            Ok(Measurement {
                vol_water,
                temperature,
                permittivity,
                electrical_cond,
                pore_water_ec,
                reported_values: ack.value_count,
            })
        })
    }

    // --- Protocol Helpers (Private) ---

    fn ensure_addressed(&self) -> Result<(), TdrError<IF::Error>> {
        if self.address.is_query() {
            Err(TdrError::InvalidAddress('?'))
        } else {
            Ok(())
        }
    }

    /// Brackets `body` with bus activation, settle delay and guaranteed
    /// deactivation. The body's error wins over a release error.
    fn within_session<T, F>(
        &mut self,
        settle: Duration,
        body: F,
    ) -> Result<T, TdrError<IF::Error>>
    where
        F: FnOnce(&mut Self) -> Result<T, TdrError<IF::Error>>,
    {
        self.interface.activate().map_err(TdrError::Io)?;
        self.interface.delay_ms(settle.as_millis() as u32);
        let outcome = body(self);
        let released = self.interface.deactivate();
        match (outcome, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(TdrError::Io(e)),
            (Err(e), _) => Err(e),
        }
    }

    fn send_command(&mut self, command: &Command) -> Result<(), TdrError<IF::Error>> {
        let frame = command.format_into().map_err(|_| TdrError::CommandFormat)?;
        self.log.command_sent(frame.as_str());
        self.interface
            .send_frame(frame.as_bytes())
            .map_err(TdrError::Io)
    }
}

fn map_parse_error<E: Debug>(e: ResponseParseError) -> TdrError<E> {
    match e {
        ResponseParseError::EmptyInput => TdrError::EmptyFrame,
        ResponseParseError::TooShort => TdrError::InvalidFormat,
        ResponseParseError::InvalidAddressChar => TdrError::InvalidFormat,
        ResponseParseError::AddressMismatch { expected, got } => {
            TdrError::AddressMismatch { expected, got }
        }
        ResponseParseError::MalformedNumber => TdrError::MalformedNumber,
    }
}
