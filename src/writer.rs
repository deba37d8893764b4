//! Write loops against the decoder's non-blocking byte sink.
//!
//! The two loops deliberately differ in backpressure policy. Headers are
//! small and bounded, so the header loop spins until the sink drains and
//! the header lands atomically ahead of its payload. Payloads can be far
//! larger than the sink's buffer, so the payload loop records its progress
//! on the packet and hands control back to the decode loop instead of
//! blocking.

use std::io;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::format::VideoFormat;
use crate::packet::Packet;
use crate::session::FeedProgress;
use crate::sink::DecoderHandle;

/// Write the packet's header bytes, if any, ahead of its payload.
///
/// Spins on would-block until the header is fully written. Succeeds as a
/// no-op when there is no header to inject or the payload already carries
/// its own framing.
pub(crate) fn write_header<H: DecoderHandle>(
    handle: &mut H,
    format: VideoFormat,
    pkt: &Packet,
) -> Result<()> {
    let Some(header) = pkt.header() else {
        return Ok(());
    };
    if header.is_empty() {
        return Ok(());
    }
    if format.payload_self_describing(pkt.payload()) {
        return Ok(());
    }

    let bytes = header.as_bytes();
    let mut off = 0;
    while off < bytes.len() {
        match handle.write(&bytes[off..]) {
            Ok(n) if n > bytes.len() - off => {
                warn!(claimed = n, offered = bytes.len() - off, "sink over-claimed header write");
                return Err(Error::write_failed("sink accepted more bytes than offered"));
            }
            Ok(n) => off += n,
            // header is small; spin until the ring buffer drains
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => continue,
            Err(err) => {
                warn!(%err, "header write failed");
                return Err(Error::write_failed(err.to_string()));
            }
        }
    }
    Ok(())
}

/// Stream the packet's payload into the decoder.
///
/// On would-block the cursor advances past everything the sink accepted in
/// this call and `Pending` is returned; the decode loop re-feeds the same
/// packet later and the write resumes byte-exactly. The packet is marked
/// complete once the sink has accepted every remaining byte.
pub(crate) fn write_payload<H: DecoderHandle>(
    handle: &mut H,
    pkt: &mut Packet,
) -> Result<FeedProgress> {
    if pkt.remaining() == 0 && pkt.is_valid() {
        pkt.complete();
        return Ok(FeedProgress::Complete);
    }

    // bytes the sink accepted from this packet in this invocation, in case
    // we get hit with would-block partway through
    let mut written = 0;
    while written < pkt.remaining() && pkt.is_valid() {
        match handle.write(&pkt.payload()[written..]) {
            Ok(n) if n > pkt.remaining() - written => {
                warn!(
                    claimed = n,
                    offered = pkt.remaining() - written,
                    "sink over-claimed payload write"
                );
                return Err(Error::write_failed("sink accepted more bytes than offered"));
            }
            Ok(n) => {
                written += n;
                if written == pkt.remaining() {
                    pkt.complete();
                    return Ok(FeedProgress::Complete);
                }
            }
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                // adjust for what was already accepted and yield; the packet
                // stays valid so the caller re-feeds it with the cursor
                // already advanced
                debug!(written, remaining = pkt.remaining() - written, "sink full, suspending");
                pkt.consume(written);
                return Ok(FeedProgress::Pending);
            }
            Err(err) => {
                warn!(written, %err, "payload write failed");
                return Err(Error::write_failed(err.to_string()));
            }
        }
    }
    Ok(FeedProgress::Complete)
}
