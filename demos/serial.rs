//! Drive a GS200 over a serial port: pick a port, source 1.5 V, read it back.
//!
//! Run with `RUST_LOG=debug` to see every command echoed.

use std::time::Duration;

use inquire::Select;
use serialport::SerialPort;
use yokogawa_gs200::gs200::Gs200;
use yokogawa_gs200::transport::LineTransport;

// The GS200 RS-232 port defaults to 9600 baud, 8N1.
const BAUD_RATE: u32 = 9600;
const SERIAL_TIMEOUT_MS: u64 = 500;
const STABILIZATION_DELAY_MS: u64 = 1000;

pub struct PortWrapper(Box<dyn SerialPort>);

#[derive(Debug)]
pub struct IoError(std::io::Error);

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl embedded_io::Error for IoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self.0.kind() {
            std::io::ErrorKind::TimedOut => embedded_io::ErrorKind::TimedOut,
            std::io::ErrorKind::NotFound => embedded_io::ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => embedded_io::ErrorKind::PermissionDenied,
            std::io::ErrorKind::BrokenPipe => embedded_io::ErrorKind::BrokenPipe,
            std::io::ErrorKind::InvalidData => embedded_io::ErrorKind::InvalidData,
            std::io::ErrorKind::Interrupted => embedded_io::ErrorKind::Interrupted,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for PortWrapper {
    type Error = IoError;
}

impl embedded_io::Read for PortWrapper {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        std::io::Read::read(&mut self.0, buf).map_err(IoError)
    }
}

impl embedded_io::Write for PortWrapper {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        std::io::Write::write(&mut self.0, buf).map_err(IoError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::Write::flush(&mut self.0).map_err(IoError)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let ports = serialport::available_ports()?;
    let names: Vec<String> = ports.into_iter().map(|p| p.port_name).collect();
    if names.is_empty() {
        return Err("no serial ports found".into());
    }
    let port_name = Select::new("Which port is the GS200 on?", names).prompt()?;

    let port = serialport::new(&port_name, BAUD_RATE)
        .timeout(Duration::from_millis(SERIAL_TIMEOUT_MS))
        .open()?;
    let transport = LineTransport::new(PortWrapper(port)).with_description(&port_name);

    let mut source = Gs200::new(transport, true)?;
    println!("Connected to: {}", source.identity());

    source.remote()?;
    source.function("voltage")?;
    source.source_range("10")?;
    source.protection_current("0.05")?;
    source.level("1.5")?;
    source.output("on")?;

    std::thread::sleep(Duration::from_millis(STABILIZATION_DELAY_MS));
    println!("Level readback: {}", source.level("?")?);
    println!("Measurement: {}", source.measure()?);
    println!("Status condition: {}", source.condition()?);

    source.output("off")?;
    source.local()?;
    source.close();
    Ok(())
}
