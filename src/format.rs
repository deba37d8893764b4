//! Stream format and transport-mode variant sets.

/// Video bitstream format fed to the decoder.
///
/// Selected once at session start from the stream metadata. H.264 and HEVC
/// need their parameter-set extradata injected ahead of the first payload;
/// WVC1 elementary streams sometimes carry their own framing instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum VideoFormat {
    /// H.264 / AVC.
    H264,
    /// H.265 / HEVC.
    Hevc,
    /// VC-1 Advanced Profile (WVC1) legacy path.
    Wvc1,
}

impl VideoFormat {
    /// Whether the session bootstrap injects extradata for this format.
    pub(crate) fn has_bootstrap_header(self) -> bool {
        matches!(self, VideoFormat::H264 | VideoFormat::Hevc)
    }

    /// WVC1 elementary-stream frames that begin with a frame (0x0D) or
    /// field (0x0F) start code already carry their own framing; injecting
    /// a header in front of them would corrupt the bitstream.
    pub(crate) fn payload_self_describing(self, payload: &[u8]) -> bool {
        self == VideoFormat::Wvc1
            && payload.len() >= 4
            && payload[0] == 0
            && payload[1] == 0
            && payload[2] == 1
            && (payload[3] == 0x0d || payload[3] == 0x0f)
    }
}

/// How the stream reaches the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum StreamMode {
    /// Elementary stream: the feeder owns header injection and timestamp
    /// check-in.
    Elementary,
    /// Pre-multiplexed transport stream: timestamps travel in-band and
    /// check-in is bypassed entirely.
    Transport,
}
