//! The connection seam between the driver and the outside world.
//!
//! [`Transport`] is what a [`Gs200`](crate::gs200::Gs200) session talks to:
//! plain text out, plain text back, terminators configured once at session
//! open. Address syntax, framing and timeouts all live on this side of the
//! seam.
//!
//! [`LineTransport`] is the provided implementation for byte streams. Wrap
//! a serial port (or any other [`embedded_io::Read`] + [`embedded_io::Write`]
//! type) in it and the GS200's line-oriented protocol is taken care of.

use embedded_io::Error as _;
use thiserror::Error;

/// A message-based instrument connection.
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Configure the write and read line terminators. Called once when a
    /// session opens.
    fn set_terminators(&mut self, write: char, read: char);

    /// Fire-and-forget command transmission.
    fn write(&mut self, command: &str) -> Result<(), Self::Error>;

    /// Request/response round trip. Blocks until a full reply arrives or
    /// the connection gives up.
    fn query(&mut self, command: &str) -> Result<String, Self::Error>;

    /// Best-effort identification of the far end (port name, address, ...)
    /// for log and warning messages.
    fn describe(&self) -> String {
        String::from("unnamed connection")
    }
}

/// Failures of the [`LineTransport`] adapter.
#[derive(Error, Debug)]
pub enum LineTransportError<E: embedded_io::Error> {
    /// The underlying byte stream failed.
    #[error("serial communication error: {0:?}")]
    Serial(E),
    /// The stream reached end-of-file before any reply bytes arrived.
    #[error("connection closed before a reply arrived")]
    Disconnected,
    /// The reply was not valid UTF-8.
    #[error("reply is not valid UTF-8")]
    NonUtf8,
}

/// Line-framing adapter over any byte stream.
///
/// Outgoing commands get the write terminator appended; replies are read
/// until the read terminator shows up. A timeout-flavoured read error with
/// partial data ends the reply instead of failing, since some serial
/// back-ends report end-of-transmission that way.
pub struct LineTransport<S> {
    io: S,
    write_term: char,
    read_term: char,
    /// Bytes received past the last terminator, kept for the next reply.
    pending: Vec<u8>,
    description: String,
}

impl<S: embedded_io::Read + embedded_io::Write> LineTransport<S> {
    /// Wrap a byte stream with the GS200 factory terminators (`\r` out,
    /// `\n` in).
    pub fn new(io: S) -> Self {
        Self {
            io,
            write_term: '\r',
            read_term: '\n',
            pending: Vec::new(),
            description: String::from("unnamed connection"),
        }
    }

    /// Attach a human-readable name (port path, host address) used in
    /// warnings and logs.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Access the wrapped byte stream.
    pub fn get_ref(&self) -> &S {
        &self.io
    }

    /// Mutable access to the wrapped byte stream.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.io
    }

    fn read_reply(&mut self) -> Result<String, LineTransportError<S::Error>> {
        let terminator = self.read_term as u8;
        let mut reply = core::mem::take(&mut self.pending);
        let mut chunk = [0u8; 64];
        loop {
            if let Some(pos) = reply.iter().position(|&b| b == terminator) {
                // Anything past the terminator belongs to the next reply.
                self.pending = reply.split_off(pos + 1);
                reply.truncate(pos);
                break;
            }
            match self.io.read(&mut chunk) {
                Ok(0) => {
                    if reply.is_empty() {
                        return Err(LineTransportError::Disconnected);
                    }
                    break;
                }
                Ok(n) => reply.extend_from_slice(&chunk[..n]),
                Err(e) => {
                    // Some back-ends signal "message complete" through a
                    // timeout once data stopped flowing.
                    if matches!(
                        e.kind(),
                        embedded_io::ErrorKind::TimedOut | embedded_io::ErrorKind::Other
                    ) && !reply.is_empty()
                    {
                        break;
                    }
                    return Err(LineTransportError::Serial(e));
                }
            }
        }
        while reply.last() == Some(&b'\r') {
            reply.pop();
        }
        String::from_utf8(reply).map_err(|_| LineTransportError::NonUtf8)
    }
}

impl<S: embedded_io::Read + embedded_io::Write> Transport for LineTransport<S> {
    type Error = LineTransportError<S::Error>;

    fn set_terminators(&mut self, write: char, read: char) {
        self.write_term = write;
        self.read_term = read;
    }

    fn write(&mut self, command: &str) -> Result<(), Self::Error> {
        let mut line = String::with_capacity(command.len() + 1);
        line.push_str(command);
        line.push(self.write_term);
        self.io
            .write_all(line.as_bytes())
            .map_err(LineTransportError::Serial)?;
        self.io.flush().map_err(LineTransportError::Serial)
    }

    fn query(&mut self, command: &str) -> Result<String, Self::Error> {
        self.write(command)?;
        self.read_reply()
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}
