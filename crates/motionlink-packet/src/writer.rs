use std::io::{ErrorKind, Write};

use bytes::{BufMut, BytesMut};
use motionlink_opcodes::ControlCode;
use tracing::debug;

use crate::error::{PacketError, Result};
use crate::link::{encode_framed, LinkConfig};
use crate::port::PortTimeouts;

const INITIAL_BUFFER_CAPACITY: usize = 512;

/// Writes complete link messages to any `Write` byte stream.
pub struct LinkWriter<T> {
    inner: T,
    buf: BytesMut,
    config: LinkConfig,
}

impl<T: Write> LinkWriter<T> {
    /// Create a new link writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, LinkConfig::default())
    }

    /// Create a new link writer with explicit configuration.
    pub fn with_config(inner: T, config: LinkConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Frame, checksum and send a packet body.
    pub fn send_packet(&mut self, body: &[u8]) -> Result<()> {
        self.buf.clear();
        encode_framed(body, self.config.max_packet_len, &mut self.buf)?;
        debug!(len = self.buf.len(), "sending packet");
        self.write_buffered()
    }

    /// Send a single link-control byte.
    pub fn send_control(&mut self, code: ControlCode) -> Result<()> {
        self.buf.clear();
        self.buf.put_u8(code.to_byte());
        self.write_buffered()
    }

    /// Send a NUL-terminated debug message.
    ///
    /// Interior NUL bytes would end the message early on the receiving
    /// side, so the text is cut at the first one.
    pub fn send_debug(&mut self, text: &str) -> Result<()> {
        let text = text.as_bytes();
        let end = text
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(text.len())
            .min(self.config.max_debug_len);

        self.buf.clear();
        self.buf.put_u8(ControlCode::Debug.to_byte());
        self.buf.put_slice(&text[..end]);
        self.buf.put_u8(0);
        self.write_buffered()
    }

    /// Send an `ID` code followed by the identifier bytes.
    pub fn send_id(&mut self, id: &[u8]) -> Result<()> {
        if id.len() != self.config.id_len {
            return Err(PacketError::IdLength {
                len: id.len(),
                expected: self.config.id_len,
            });
        }

        self.buf.clear();
        self.buf.put_u8(ControlCode::Id.to_byte());
        self.buf.put_slice(id);
        self.write_buffered()
    }

    fn write_buffered(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(PacketError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(PacketError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(PacketError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current link writer configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }
}

impl<T: Write + PortTimeouts> LinkWriter<T> {
    /// Create a link writer and apply the write timeout from config to
    /// the port.
    pub fn with_port_config(inner: T, config: LinkConfig) -> Result<Self> {
        inner.set_write_timeout(config.write_timeout)?;
        Ok(Self::with_config(inner, config))
    }
}
