use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::diag::{DiagnosticSink, TracingSink};
use crate::error::{PacketError, Result};
use crate::link::{decode_incoming, Incoming, LinkConfig};
use crate::port::PortTimeouts;

const INITIAL_BUFFER_CAPACITY: usize = 512;
const READ_CHUNK_SIZE: usize = 256;

/// Reads complete link messages from any `Read` byte stream.
///
/// Handles partial reads internally, so callers always get complete messages.
/// Corrupt packets are reported to the reader's diagnostic sink and returned
/// as errors; the reader stays usable and continues with the next message.
pub struct LinkReader<T> {
    inner: T,
    buf: BytesMut,
    config: LinkConfig,
    sink: Box<dyn DiagnosticSink>,
}

impl<T: Read> LinkReader<T> {
    /// Create a new link reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, LinkConfig::default())
    }

    /// Create a new link reader with explicit configuration.
    pub fn with_config(inner: T, config: LinkConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
            sink: Box::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink used for corrupt packets.
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Read the next complete message (blocking).
    ///
    /// Returns `Err(PacketError::ConnectionClosed)` when EOF is reached.
    pub fn read_message(&mut self) -> Result<Incoming> {
        loop {
            if let Some(msg) = decode_incoming(&mut self.buf, &self.config, self.sink.as_ref())? {
                return Ok(msg);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(PacketError::Io(err)),
            };

            if read == 0 {
                return Err(PacketError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Number of received bytes not yet consumed by a message.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current link reader configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }
}

impl<T: Read + PortTimeouts> LinkReader<T> {
    /// Create a link reader and apply the read timeout from config to
    /// the port.
    pub fn with_port_config(inner: T, config: LinkConfig) -> Result<Self> {
        inner.set_read_timeout(config.read_timeout)?;
        Ok(Self::with_config(inner, config))
    }
}
