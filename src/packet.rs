//! One compressed access unit and its feed-state flags.

use bytes::{Buf, Bytes};

use crate::error::Result;
use crate::header::{HeaderBuffer, HDR_BUF_CAPACITY};

/// A single compressed access unit queued for the decoder.
///
/// The payload is caller-owned; the feeder only advances a read cursor over
/// it, so a packet suspended mid-write resumes exactly where it left off.
/// Timestamps are public fields with `None` as the absent marker.
#[derive(Debug)]
pub struct Packet {
    payload: Bytes,
    /// Presentation timestamp, if the container supplied one.
    pub pts: Option<i64>,
    /// Decode timestamp, if the container supplied one.
    pub dts: Option<i64>,
    /// Frame duration, used as the fallback timestamp multiplier.
    pub duration: Option<i64>,
    header: Option<HeaderBuffer>,
    fresh: bool,
    valid: bool,
    last_pts: Option<i64>,
}

impl Packet {
    /// Create a packet carrying one access unit.
    pub fn new(payload: Bytes) -> Self {
        Self {
            payload,
            pts: None,
            dts: None,
            duration: None,
            header: None,
            fresh: true,
            valid: true,
            last_pts: None,
        }
    }

    /// Create a header-only packet with no payload.
    ///
    /// Used to push codec extradata through the write machine at session
    /// start; the packet is not marked valid, so timestamp check-in and
    /// payload streaming are skipped.
    pub fn empty() -> Self {
        Self {
            valid: false,
            ..Self::new(Bytes::new())
        }
    }

    /// Set the presentation timestamp.
    pub fn with_pts(mut self, pts: i64) -> Self {
        self.pts = Some(pts);
        self
    }

    /// Set the decode timestamp.
    pub fn with_dts(mut self, dts: i64) -> Self {
        self.dts = Some(dts);
        self
    }

    /// Set the frame duration.
    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Re-arm a completed packet slot with a new access unit.
    ///
    /// Timestamps are cleared and the feed-state flags reset. A previously
    /// attached header buffer keeps its allocation so repeated
    /// [`attach_header`](Self::attach_header) calls amortize.
    pub fn refill(&mut self, payload: Bytes) {
        self.payload = payload;
        self.pts = None;
        self.dts = None;
        self.duration = None;
        self.fresh = true;
        self.valid = true;
    }

    /// Attach header bytes to inject ahead of this packet's payload.
    ///
    /// The first call allocates the header buffer; later calls reuse it,
    /// growing only when the new header is larger than any seen before.
    pub fn attach_header(&mut self, src: &[u8]) -> Result<()> {
        match &mut self.header {
            Some(hdr) => hdr.fill(src),
            slot @ None => slot
                .insert(HeaderBuffer::with_capacity(HDR_BUF_CAPACITY)?)
                .fill(src),
        }
    }

    /// Drop the attached header buffer, if any.
    pub fn clear_header(&mut self) {
        self.header = None;
    }

    /// Whether payload bytes remain to be accepted by the decoder.
    ///
    /// Once this turns false the slot may be reused via
    /// [`refill`](Self::refill) or dropped.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the header/timestamp step is still pending for this packet.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Payload bytes not yet accepted by the decoder.
    pub fn remaining(&self) -> usize {
        self.payload.len()
    }

    /// Last positive timestamp accepted by the decoder's clock tracker.
    pub fn last_pts(&self) -> Option<i64> {
        self.last_pts
    }

    pub(crate) fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub(crate) fn header(&self) -> Option<&HeaderBuffer> {
        self.header.as_ref()
    }

    /// Advance the read cursor past bytes the decoder has accepted.
    pub(crate) fn consume(&mut self, n: usize) {
        self.payload.advance(n);
    }

    /// All bytes accepted: invalidate the slot and drop the cursor.
    pub(crate) fn complete(&mut self) {
        self.valid = false;
        self.payload = Bytes::new();
    }

    pub(crate) fn clear_fresh(&mut self) {
        self.fresh = false;
    }

    pub(crate) fn record_pts(&mut self, pts: i64) {
        self.last_pts = Some(pts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_packet_is_fresh_and_valid() {
        let pkt = Packet::new(Bytes::from_static(b"abcd"));
        assert!(pkt.is_fresh());
        assert!(pkt.is_valid());
        assert_eq!(pkt.remaining(), 4);
        assert_eq!(pkt.last_pts(), None);
    }

    #[test]
    fn test_empty_packet_is_not_valid() {
        let pkt = Packet::empty();
        assert!(pkt.is_fresh());
        assert!(!pkt.is_valid());
        assert_eq!(pkt.remaining(), 0);
    }

    #[test]
    fn test_consume_advances_cursor() {
        let mut pkt = Packet::new(Bytes::from_static(b"abcdef"));
        pkt.consume(4);
        assert_eq!(pkt.remaining(), 2);
        assert_eq!(pkt.payload(), b"ef");
    }

    #[test]
    fn test_complete_resets_length() {
        let mut pkt = Packet::new(Bytes::from_static(b"abc"));
        pkt.complete();
        assert!(!pkt.is_valid());
        assert_eq!(pkt.remaining(), 0);
    }

    #[test]
    fn test_refill_rearms_slot_and_keeps_header() {
        let mut pkt = Packet::new(Bytes::from_static(b"abc")).with_pts(42).with_duration(3);
        pkt.attach_header(&[1, 2, 3]).unwrap();
        let cap = pkt.header().unwrap().capacity();
        pkt.clear_fresh();
        pkt.complete();

        pkt.refill(Bytes::from_static(b"wxyz"));
        assert!(pkt.is_fresh());
        assert!(pkt.is_valid());
        assert_eq!(pkt.remaining(), 4);
        assert_eq!(pkt.pts, None);
        assert_eq!(pkt.duration, None);
        assert_eq!(pkt.header().unwrap().capacity(), cap);
    }

    #[test]
    fn test_attach_header_reuses_buffer() {
        let mut pkt = Packet::empty();
        pkt.attach_header(&[1, 2, 3, 4]).unwrap();
        let cap = pkt.header().unwrap().capacity();

        pkt.attach_header(&[5, 6]).unwrap();
        assert_eq!(pkt.header().unwrap().as_bytes(), &[5, 6]);
        assert_eq!(pkt.header().unwrap().capacity(), cap);

        pkt.clear_header();
        assert!(pkt.header().is_none());
    }
}
