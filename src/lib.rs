//! This crate provides an interface for communicating with and controlling the
//! Yokogawa GS200 series of programmable DC voltage/current sources.
//!
//! The driver speaks the instrument's SCPI dialect and validates every argument
//! against the device's legal ranges and keyword sets *before* anything is put
//! on the wire, so a typo'd setting never reaches the instrument.
//!
//! Instrument models this is written for:
//! * GS210
//! * GS211
//!
//! Other instruments that accept the GS200 command set will mostly work, but a
//! warning is logged when the `*IDN?` reply does not match.
//!
//! The driver is transport-agnostic: anything implementing [`transport::Transport`]
//! can carry the commands. [`transport::LineTransport`] adapts any
//! [`embedded_io::Read`] + [`embedded_io::Write`] byte stream (serial port, TCP
//! socket wrapper, ...) by handling line termination, which is all the GS200
//! needs over RS-232 or a raw-socket VISA resource.
//!
//! Factory communication settings for the serial route:
//! * Write terminator: `\r`
//! * Read terminator: `\n`

pub mod args;
pub mod error;
pub mod gs200;
pub mod scpi;
pub mod transport;

mod commands;

#[cfg(test)]
mod mock_serial;
