//! Feed session orchestration: one decoder instance, one bitstream.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::format::{StreamMode, VideoFormat};
use crate::packet::Packet;
use crate::pts::PtsState;
use crate::sink::DecoderHandle;
use crate::writer;

/// Recommended delay before re-feeding a packet after
/// [`FeedProgress::Pending`]. The engine itself never sleeps; pacing
/// belongs to the decode loop.
pub const FEED_RETRY_INTERVAL: Duration = Duration::from_millis(20);

/// Outcome of one [`FeedSession::feed`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedProgress {
    /// Every byte of the packet was accepted; the slot may be reused.
    Complete,
    /// The decoder's ring buffer filled up. The packet's cursor has
    /// advanced past everything accepted so far; feed the same packet
    /// again after a short delay.
    Pending,
}

/// Stream metadata snapshot taken once at session start.
///
/// `extradata` holds the codec's out-of-band header bytes (parameter sets)
/// exactly as the container carried them. Geometry is recorded for the
/// caller's hardware-init path and diagnostics; the feeder itself never
/// consults it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamInfo {
    /// Bitstream format.
    pub format: VideoFormat,
    /// Elementary or pre-multiplexed transport.
    pub mode: StreamMode,
    /// Codec extradata (parameter sets), possibly empty.
    pub extradata: Vec<u8>,
    /// Coded frame width in pixels.
    pub width: u32,
    /// Coded frame height in pixels.
    pub height: u32,
}

/// Feeds compressed packets into one hardware decoder instance.
///
/// The session owns the decoder handle for its lifetime, which serializes
/// all sink access through `&mut self`. A decode loop drives it like this:
///
/// ```no_run
/// # use bytes::Bytes;
/// # use vdec_feed::{DecoderHandle, FeedProgress, FeedSession, Packet, StreamInfo};
/// # use vdec_feed::{StreamMode, VideoFormat, FEED_RETRY_INTERVAL};
/// # fn demux() -> Option<(Bytes, i64)> { None }
/// # fn run<H: DecoderHandle>(handle: H, extradata: Vec<u8>) -> vdec_feed::Result<()> {
/// let info = StreamInfo {
///     format: VideoFormat::H264,
///     mode: StreamMode::Elementary,
///     extradata,
///     width: 1920,
///     height: 1080,
/// };
/// let mut session = FeedSession::new(handle, info);
/// session.pre_header_feed()?;
///
/// while let Some((payload, pts)) = demux() {
///     let mut pkt = Packet::new(payload).with_pts(pts);
///     while session.feed(&mut pkt)? == FeedProgress::Pending {
///         std::thread::sleep(FEED_RETRY_INTERVAL);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct FeedSession<H: DecoderHandle> {
    handle: H,
    format: VideoFormat,
    mode: StreamMode,
    extradata: Vec<u8>,
    pts: PtsState,
}

impl<H: DecoderHandle> FeedSession<H> {
    /// Open a feed session over a decoder handle, snapshotting the stream
    /// metadata.
    pub fn new(handle: H, info: StreamInfo) -> Self {
        debug!(
            format = ?info.format,
            mode = ?info.mode,
            width = info.width,
            height = info.height,
            extrasize = info.extradata.len(),
            "opening feed session"
        );
        Self {
            handle,
            format: info.format,
            mode: info.mode,
            extradata: info.extradata,
            pts: PtsState::default(),
        }
    }

    /// Bitstream format this session was opened with.
    pub fn format(&self) -> VideoFormat {
        self.format
    }

    /// Stream mode this session was opened with.
    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    /// Borrow the decoder handle, for collaborator calls outside the feed
    /// path (trick-mode control and the like).
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Mutably borrow the decoder handle.
    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    /// Tear down the session and give the decoder handle back. Session
    /// buffers and the extradata snapshot drop here, exactly once.
    pub fn close(self) -> H {
        debug!("closing feed session");
        self.handle
    }

    /// Inject the codec's extradata once, before any packets flow.
    ///
    /// Builds a header from the session's stored extradata and drives a
    /// synthetic header-only packet through the full write machine. The
    /// header buffer is scoped to this call and released regardless of
    /// outcome. Only elementary-stream sessions carry a bootstrap header;
    /// transport streams and WVC1 return immediately.
    pub fn pre_header_feed(&mut self) -> Result<()> {
        if self.mode != StreamMode::Elementary || !self.format.has_bootstrap_header() {
            return Ok(());
        }
        if self.extradata.is_empty() {
            return Err(Error::MissingResource("codec extradata"));
        }

        debug!(bytes = self.extradata.len(), "feeding stream header");
        let mut bootstrap = Packet::empty();
        bootstrap.attach_header(&self.extradata)?;
        self.feed(&mut bootstrap)?;
        Ok(())
    }

    /// Feed one packet, resuming transparently if it was suspended on a
    /// previous call.
    ///
    /// A fresh packet first has its timestamp checked in (elementary
    /// streams only; failures are escalated as write failures) and its
    /// header injected, in that order and exactly once. The payload is then
    /// streamed until done or until the sink would block, in which case
    /// [`FeedProgress::Pending`] asks the caller to come back with the same
    /// packet.
    pub fn feed(&mut self, pkt: &mut Packet) -> Result<FeedProgress> {
        if pkt.is_fresh() {
            if pkt.is_valid() && self.mode == StreamMode::Elementary {
                if self.pts.check_in(&mut self.handle, pkt).is_err() {
                    warn!("timestamp check-in failed, abandoning packet");
                    return Err(Error::write_failed("timestamp check-in failed"));
                }
            }
            writer::write_header(&mut self.handle, self.format, pkt)?;
            pkt.clear_fresh();
        }

        writer::write_payload(&mut self.handle, pkt)
    }
}
