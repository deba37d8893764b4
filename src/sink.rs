//! The decoder-side primitives the feeder writes into.
//!
//! The hardware session layer (device open, format negotiation, trick-mode
//! control) lives outside this crate. The feeder only needs the two
//! primitives below, so that layer is modeled as a trait implemented over
//! whatever handle the platform provides.

use std::io;

/// One hardware decoder instance: a non-blocking byte sink plus the
/// decoder's internal PTS tracker.
///
/// Both methods map to ioctl-style calls on the platforms this crate
/// targets, so they use `std::io` errors directly.
pub trait DecoderHandle {
    /// Write up to `buf.len()` bytes into the decoder's ring buffer.
    ///
    /// Returns the number of bytes accepted, which may be less than
    /// `buf.len()` when the ring buffer is nearly full. A full buffer is
    /// reported as [`io::ErrorKind::WouldBlock`]; the caller retries later.
    /// Any other error is a hard failure for the current packet.
    ///
    /// Reporting more bytes than were offered is a contract violation and
    /// is treated as a hard failure by the feeder.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Register a timestamp with the decoder's clock tracker so it can pace
    /// frame output. Fast and non-suspending.
    fn checkin_pts(&mut self, pts: i64) -> io::Result<()>;
}
