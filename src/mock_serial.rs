//! We use this mocking module in unit tests to emulate a serial port.

/// Our mock type used to emulate a serial port.
pub struct MockSerial {
    /// Bytes written to the mock port, in order.
    write_buffer: Vec<u8>,
    /// Pre-loaded reply bytes handed out by `read`.
    read_buffer: Vec<u8>,
    /// Current position in the read buffer.
    read_position: usize,
    /// Flag to simulate write errors.
    should_error_on_write: bool,
    /// Flag to simulate read errors.
    should_error_on_read: bool,
}

#[derive(Debug)]
pub enum MockSerialError {
    /// Simulated timeout error.
    Timeout,
    /// Generic simulated error for testing.
    SimulatedError,
    /// Would block - no data available.
    WouldBlock,
}

impl core::fmt::Display for MockSerialError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MockSerialError::Timeout => write!(f, "simulated timeout"),
            MockSerialError::SimulatedError => write!(f, "simulated error"),
            MockSerialError::WouldBlock => write!(f, "would block"),
        }
    }
}

impl core::error::Error for MockSerialError {}

impl embedded_io::Error for MockSerialError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            MockSerialError::Timeout => embedded_io::ErrorKind::TimedOut,
            MockSerialError::SimulatedError => embedded_io::ErrorKind::Interrupted,
            MockSerialError::WouldBlock => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = MockSerialError;
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.should_error_on_write {
            return Err(MockSerialError::SimulatedError);
        }
        self.write_buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.should_error_on_write {
            return Err(MockSerialError::SimulatedError);
        }
        Ok(())
    }
}

impl embedded_io::Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.should_error_on_read {
            return Err(MockSerialError::SimulatedError);
        }

        if self.read_position >= self.read_buffer.len() {
            return Err(MockSerialError::WouldBlock);
        }

        let available = self.read_buffer.len() - self.read_position;
        let count = core::cmp::min(buf.len(), available);
        buf[..count]
            .copy_from_slice(&self.read_buffer[self.read_position..self.read_position + count]);
        self.read_position += count;
        Ok(count)
    }
}

impl MockSerial {
    /// Create a new MockSerial instance with empty buffers.
    pub fn new() -> Self {
        Self {
            write_buffer: Vec::new(),
            read_buffer: Vec::new(),
            read_position: 0,
            should_error_on_write: false,
            should_error_on_read: false,
        }
    }

    /// Set the data that will be returned when read() is called.
    pub fn set_read_data(&mut self, data: &[u8]) {
        self.read_buffer.clear();
        self.read_position = 0;
        self.read_buffer.extend_from_slice(data);
    }

    /// Get the bytes that were written to this mock serial port.
    pub fn written_data(&self) -> &[u8] {
        &self.write_buffer
    }

    /// The written bytes as text, for command-level assertions.
    pub fn written_str(&self) -> &str {
        core::str::from_utf8(&self.write_buffer).expect("mock received non-UTF-8")
    }

    /// Clear the write buffer.
    pub fn clear_written_data(&mut self) {
        self.write_buffer.clear();
    }

    /// Configure whether write operations should fail with an error.
    pub fn set_write_error(&mut self, should_error: bool) {
        self.should_error_on_write = should_error;
    }

    /// Configure whether read operations should fail with an error.
    pub fn set_read_error(&mut self, should_error: bool) {
        self.should_error_on_read = should_error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::{Read, Write};

    #[test]
    fn test_write_data() {
        let mut mock = MockSerial::new();
        let test_data = b"*IDN?\r";

        let result = mock.write(test_data);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), test_data.len());
        assert_eq!(mock.written_data(), test_data);
    }

    #[test]
    fn test_write_accumulates() {
        let mut mock = MockSerial::new();
        mock.write(b"source:function").unwrap();
        mock.write(b" voltage\r").unwrap();
        assert_eq!(mock.written_str(), "source:function voltage\r");
    }

    #[test]
    fn test_read_data() {
        let mut mock = MockSerial::new();
        mock.set_read_data(b"VOLT\n");

        let mut buffer = [0u8; 16];
        let n = mock.read(&mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"VOLT\n");
    }

    #[test]
    fn test_read_would_block_after_data_exhausted() {
        let mut mock = MockSerial::new();
        mock.set_read_data(b"5\n");

        let mut buffer = [0u8; 16];
        assert!(mock.read(&mut buffer).is_ok());
        assert!(matches!(
            mock.read(&mut buffer).unwrap_err(),
            MockSerialError::WouldBlock
        ));
    }

    #[test]
    fn test_error_simulation() {
        let mut mock = MockSerial::new();
        mock.set_write_error(true);
        assert!(mock.write(b"x").is_err());
        assert_eq!(mock.written_data().len(), 0);

        mock.set_write_error(false);
        assert!(mock.write(b"x").is_ok());

        mock.set_read_data(b"data");
        mock.set_read_error(true);
        let mut buffer = [0u8; 4];
        assert!(mock.read(&mut buffer).is_err());
    }

    #[test]
    fn test_error_kinds() {
        use embedded_io::Error;
        assert_eq!(
            MockSerialError::Timeout.kind(),
            embedded_io::ErrorKind::TimedOut
        );
        assert_eq!(
            MockSerialError::SimulatedError.kind(),
            embedded_io::ErrorKind::Interrupted
        );
        assert_eq!(
            MockSerialError::WouldBlock.kind(),
            embedded_io::ErrorKind::Other
        );
    }

    #[test]
    fn test_set_read_data_clears_previous() {
        let mut mock = MockSerial::new();
        mock.set_read_data(b"first");
        mock.set_read_data(b"second");

        let mut buffer = [0u8; 16];
        let n = mock.read(&mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"second");
    }
}
