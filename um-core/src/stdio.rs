use std::io::{self, Read, Write};

use crate::{ByteSink, ByteSource};

/// The console's standard output, buffered line-wise like an interactive terminal.
pub struct Stdout {
    inner: io::Stdout,
}

impl Stdout {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: io::stdout() }
    }
}

impl Default for Stdout {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSink for Stdout {
    fn write_byte(&mut self, byte: u8) {
        // A short write to a console is not a recoverable condition for this
        // interpreter; losing output silently would be worse than panicking.
        self.inner
            .write_all(&[byte])
            .expect("write to stdout failed");
    }

    fn flush(&mut self) {
        let _ = self.inner.flush();
    }
}

/// The console's standard input, read one byte at a time.
///
/// EOF is sticky: once the underlying stream reports end-of-file, `read_byte`
/// keeps returning `None` without issuing further reads.
pub struct Stdin {
    inner: io::Stdin,
    eof: bool,
}

impl Stdin {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: io::stdin(),
            eof: false,
        }
    }
}

impl Default for Stdin {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for Stdin {
    fn read_byte(&mut self) -> Option<u8> {
        if self.eof {
            return None;
        }
        let mut buf = [0u8; 1];
        match self.inner.read(&mut buf) {
            Ok(0) => {
                self.eof = true;
                None
            }
            Ok(_) => Some(buf[0]),
            Err(_) => {
                self.eof = true;
                None
            }
        }
    }
}
