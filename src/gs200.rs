//! The GS200 instrument session.

use log::{debug, warn};

use crate::args::{BncIn, BncOut, CurrentRange, OutputState, SourceFunction, SourceMode, VoltageRange};
use crate::commands as cmd;
use crate::error::{Error, Result};
use crate::scpi::{self, Response};
use crate::transport::Transport;

/// Write line terminator expected by the instrument.
pub const WRITE_TERMINATOR: char = '\r';
/// Read line terminator the instrument appends to replies.
pub const READ_TERMINATOR: char = '\n';

/// Identity substrings of the instruments this driver is written for.
const EXPECTED_MODELS: [&str; 2] = ["YOKOGAWA,GS210", "YOKOGAWA,GS211"];

/// Absolute source level bound in voltage mode, in volts.
pub const LEVEL_BOUND_VOLTAGE: f64 = 32.0;
/// Absolute source level bound in current mode, in amps.
pub const LEVEL_BOUND_CURRENT: f64 = 0.2;

/// A connected GS200.
///
/// Most methods mirror one SCPI command family and accept the same token in
/// both directions: a value token sets, the query marker `?` (or an empty
/// string) reads the current setting back. All validation happens before
/// transmission; an illegal argument is reported as an error and nothing is
/// put on the wire.
///
/// The session is single-owner and synchronous. Callers that need
/// concurrency serialize access externally.
pub struct Gs200<T: Transport> {
    transport: T,
    /// Echo every outgoing command through `log::debug!`.
    verbatim: bool,
    identity: String,
    identity_matched: bool,
    closed: bool,
}

impl<T: Transport> Gs200<T> {
    /// Open a session: configure terminators, confirm the device identity.
    ///
    /// An identity that names neither a GS210 nor a GS211 is tolerated
    /// (firmware strings vary) but logged as a warning and reported through
    /// [`identity_matched`](Self::identity_matched); some commands may not
    /// work on such a device.
    pub fn new(mut transport: T, verbatim: bool) -> Result<Self, T::Error> {
        transport.set_terminators(WRITE_TERMINATOR, READ_TERMINATOR);
        let mut session = Self {
            transport,
            verbatim,
            identity: String::new(),
            identity_matched: false,
            closed: false,
        };
        let identity = session.identify()?;
        session.identity_matched = EXPECTED_MODELS
            .iter()
            .any(|model| identity.contains(model));
        if session.identity_matched {
            debug!("connected to {identity}");
        } else {
            warn!(
                "{} identifies as {identity:?}, not a Yokogawa GS200 DC source; \
                 some commands may not work",
                session.transport.describe()
            );
        }
        session.identity = identity;
        Ok(session)
    }

    /// The `*IDN?` reply captured when the session opened.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Whether the identity named one of the supported models.
    pub fn identity_matched(&self) -> bool {
        self.identity_matched
    }

    /// Turn the per-command diagnostic echo on or off.
    pub fn set_verbatim(&mut self, verbatim: bool) {
        self.verbatim = verbatim;
    }

    /// Close the session. Every later command fails with
    /// [`Error::SessionClosed`].
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Dispatch a raw SCPI command.
    ///
    /// A command ending in `?` goes through the transport's
    /// request/response primitive and the reply is classified
    /// (see [`scpi::classify`]); anything else is written fire-and-forget
    /// and acknowledged with `Sent: <command>` for logging and tests.
    ///
    /// This is the escape hatch for commands the typed methods do not
    /// cover. No validation is applied here.
    pub fn send(&mut self, command: &str) -> Result<Response, T::Error> {
        if self.closed {
            return Err(Error::SessionClosed);
        }
        if self.verbatim {
            debug!("-> {command}");
        }
        if command.ends_with('?') {
            let raw = self.transport.query(command).map_err(Error::Transport)?;
            Ok(scpi::classify(&raw))
        } else {
            self.transport.write(command).map_err(Error::Transport)?;
            Ok(Response::Text(format!("Sent: {command}")))
        }
    }

    // ----- common commands -----

    /// Query the device identity (`*IDN?`).
    pub fn identify(&mut self) -> Result<String, T::Error> {
        Ok(self.send(cmd::IDENTIFY)?.to_string())
    }

    /// Wait for pending operations to finish (`*OPC?`).
    pub fn operation_complete(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::OPERATION_COMPLETE)
    }

    // ----- output commands -----

    /// Switch the output relay, or read it back.
    /// Accepts `on`/`true`, `off`/`false` or `?`.
    pub fn output(&mut self, state: &str) -> Result<Response, T::Error> {
        let fragment = scpi::format_enum::<OutputState>(state)?;
        self.send(&format!("{}{fragment}", cmd::OUTPUT))
    }

    // ----- source commands -----

    /// Select the source function, or read it back.
    /// Accepts `curr`/`current`, `volt`/`voltage` or `?`.
    ///
    /// Switching the function changes the legal ranges and level bounds, so
    /// any cached [`SourceMode`] is stale after a set through here.
    pub fn function(&mut self, kind: &str) -> Result<Response, T::Error> {
        let fragment = scpi::format_enum::<SourceFunction>(kind)?;
        self.send(&format!("{}{fragment}", cmd::SOURCE_FUNCTION))
    }

    /// Read the active source function from the device.
    pub fn mode(&mut self) -> Result<SourceMode, T::Error> {
        let reply = self.send(&format!("{}?", cmd::SOURCE_FUNCTION))?.to_string();
        SourceMode::from_reply(&reply).ok_or(Error::UnexpectedReply {
            command: cmd::SOURCE_FUNCTION,
            reply,
        })
    }

    /// Select the source range, or read it back. Legal values depend on the
    /// active function: 0.01/0.1/1/10/30 (volts) as a voltage source,
    /// 1/10/100/200 (milliamps) as a current source.
    ///
    /// The mode is queried from the device first; use
    /// [`source_range_in_mode`](Self::source_range_in_mode) to skip that
    /// round trip.
    pub fn source_range(&mut self, range: &str) -> Result<Response, T::Error> {
        let mode = self.mode()?;
        self.source_range_in_mode(range, mode)
    }

    /// [`source_range`](Self::source_range) with a caller-supplied mode.
    pub fn source_range_in_mode(
        &mut self,
        range: &str,
        mode: SourceMode,
    ) -> Result<Response, T::Error> {
        let fragment = match mode {
            SourceMode::Voltage => scpi::format_enum::<VoltageRange>(range)?,
            SourceMode::Current => scpi::format_enum::<CurrentRange>(range)?,
        };
        self.send(&format!("{}{fragment}", cmd::SOURCE_RANGE))
    }

    /// Set the source level (auto-ranging), or read it back. The bound is
    /// ±0.2 A as a current source and ±32 V as a voltage source.
    ///
    /// The mode is queried from the device first; use
    /// [`level_in_mode`](Self::level_in_mode) to skip that round trip.
    pub fn level(&mut self, level: &str) -> Result<Response, T::Error> {
        let mode = self.mode()?;
        self.level_in_mode(level, mode)
    }

    /// [`level`](Self::level) with a caller-supplied mode.
    pub fn level_in_mode(&mut self, level: &str, mode: SourceMode) -> Result<Response, T::Error> {
        let bound = match mode {
            SourceMode::Current => LEVEL_BOUND_CURRENT,
            SourceMode::Voltage => LEVEL_BOUND_VOLTAGE,
        };
        let fragment = scpi::format_numeric(level, 1.0, -bound, bound, "level")?;
        self.send(&format!("{}{fragment}", cmd::SOURCE_LEVEL))
    }

    /// Set the limiter voltage in volts (±32), or read it back.
    pub fn protection_voltage(&mut self, voltage: &str) -> Result<Response, T::Error> {
        let fragment = scpi::format_numeric(voltage, 1.0, -32.0, 32.0, "protection voltage")?;
        self.send(&format!("{}{fragment}", cmd::PROTECTION_VOLTAGE))
    }

    /// Set the limiter current in amps (±0.2), or read it back.
    pub fn protection_current(&mut self, current: &str) -> Result<Response, T::Error> {
        let fragment = scpi::format_numeric(current, 1.0, -0.2, 0.2, "protection current")?;
        self.send(&format!("{}{fragment}", cmd::PROTECTION_CURRENT))
    }

    // ----- read commands -----

    /// Arm the measurement trigger.
    pub fn initiate(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::INITIATE)
    }

    /// Fetch the most recent measurement.
    pub fn fetch(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::FETCH)
    }

    /// Trigger and fetch in one go.
    pub fn read(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::READ)
    }

    /// Arm, trigger and fetch in one go.
    pub fn measure(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::MEASURE)
    }

    // ----- route commands (BNC I/O) -----

    /// Select the signal on the BNC output connector, or read it back.
    /// Accepts `trig`/`trigger`, `output`/`outp`, `read`/`ready` or `?`.
    pub fn bnc_out(&mut self, option: &str) -> Result<Response, T::Error> {
        let fragment = scpi::format_enum::<BncOut>(option)?;
        self.send(&format!("{}{fragment}", cmd::BNC_OUT))
    }

    /// Select the signal on the BNC input connector, or read it back.
    /// Accepts `trig`/`trigger`, `output`/`outp` or `?`.
    pub fn bnc_in(&mut self, option: &str) -> Result<Response, T::Error> {
        let fragment = scpi::format_enum::<BncIn>(option)?;
        self.send(&format!("{}{fragment}", cmd::BNC_IN))
    }

    // ----- system commands -----

    /// Pop the oldest entry off the device error queue.
    pub fn error(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::SYSTEM_ERROR)
    }

    /// Return the front panel to local control.
    pub fn local(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::SYSTEM_LOCAL)
    }

    /// Lock the front panel for remote control.
    pub fn remote(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::SYSTEM_REMOTE)
    }

    /// Query the measured mains frequency. The GS200 measures this on its
    /// own; there is nothing to set.
    pub fn line_frequency(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::LINE_FREQUENCY)
    }

    // ----- status commands -----

    /// Query the status condition register.
    pub fn condition(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::STATUS_CONDITION)
    }

    /// Query (and clear) the status event register.
    pub fn event(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::STATUS_EVENT)
    }

    /// Set the status enable mask (0..=65535), or read it back.
    pub fn status_enable(&mut self, register: &str) -> Result<Response, T::Error> {
        let fragment = scpi::format_numeric(register, 1.0, 0.0, 65535.0, "status enable")?;
        self.send(&format!("{}{fragment}", cmd::STATUS_ENABLE))
    }

    /// Pop the oldest entry off the device error queue, through the status
    /// subsystem. Same queue as [`error`](Self::error).
    pub fn status_error(&mut self) -> Result<Response, T::Error> {
        self.send(cmd::STATUS_ERROR)
    }
}
