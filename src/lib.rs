//! vdec-feed: elementary-stream packet feeder for hardware video decoders.
//!
//! This crate streams compressed H.264/HEVC access units into a hardware
//! decoder's ring buffer under flow control. It owns the byte-streaming and
//! timestamp-check-in discipline sitting above the decoder's non-blocking
//! write primitive; device setup, format negotiation, and rendering belong
//! to the platform layer behind the [`DecoderHandle`] trait.
//!
//! # Modules
//!
//! - `sink` - the decoder-side write and PTS check-in primitives
//! - `format` - bitstream format and stream-mode variant sets
//! - `header` - grow-only codec header buffer
//! - `packet` - one access unit with its feed-state flags
//! - `pts` - timestamp check-in with fallback rules
//! - `writer` - header and payload write loops
//! - `session` - per-decoder orchestration and the extradata bootstrap
//!
//! # Feeding discipline
//!
//! Each fresh packet goes through three strictly ordered steps: timestamp
//! check-in, one-time header injection, then payload streaming. Headers are
//! written with a short busy-wait because they are small and must land
//! atomically. Payloads suspend on a full ring buffer instead: the packet
//! records how far it got and [`FeedSession::feed`] returns
//! [`FeedProgress::Pending`] so the decode loop can pace its retries. A
//! packet resumed this way continues byte-exactly where it stopped, which
//! keeps the bitstream seen by the decoder gap-free and duplicate-free.

pub mod error;
pub mod format;
pub mod header;
pub mod packet;
mod pts;
pub mod session;
pub mod sink;
mod writer;

#[cfg(test)]
mod testutil;

pub use error::{Error, Result};
pub use format::{StreamMode, VideoFormat};
pub use header::HeaderBuffer;
pub use packet::Packet;
pub use session::{FeedProgress, FeedSession, StreamInfo, FEED_RETRY_INTERVAL};
pub use sink::DecoderHandle;
