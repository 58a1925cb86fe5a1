//! Timeouts for the byte stream under a link.

use std::io;
use std::net::TcpStream;
use std::time::Duration;

/// A byte stream whose blocking reads and writes can be bounded.
///
/// Serial port handles implement this to honor `LinkConfig::read_timeout`
/// and `LinkConfig::write_timeout`. `TcpStream` covers serial-over-TCP
/// bridges such as ser2net.
pub trait PortTimeouts {
    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()>;
    fn set_write_timeout(&self, timeout: Option<Duration>) -> io::Result<()>;
}

impl PortTimeouts for TcpStream {
    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_read_timeout(self, timeout)
    }

    fn set_write_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_write_timeout(self, timeout)
    }
}

impl<P: PortTimeouts + ?Sized> PortTimeouts for &P {
    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        (**self).set_read_timeout(timeout)
    }

    fn set_write_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        (**self).set_write_timeout(timeout)
    }
}
