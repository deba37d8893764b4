//! Scripted decoder handle for exercising the write loops.

use std::collections::VecDeque;
use std::io;

use crate::sink::DecoderHandle;

/// One scripted outcome for a sink write call.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Step {
    /// Accept at most this many bytes.
    Accept(usize),
    /// Accept everything offered.
    AcceptAll,
    /// Report a full ring buffer.
    WouldBlock,
    /// Report a hard sink error.
    Fail,
    /// Claim one byte more than was offered (contract violation).
    OverClaim,
}

/// Decoder handle that replays a script of write outcomes and records
/// everything it accepted. Once the script runs out it accepts everything.
pub(crate) struct ScriptedHandle {
    steps: VecDeque<Step>,
    /// Bytes accepted, in sink call order.
    pub written: Vec<u8>,
    /// Requested length of every write call.
    pub calls: Vec<usize>,
    /// Timestamps checked in, in order.
    pub pts_log: Vec<i64>,
    reject_pts: bool,
}

impl ScriptedHandle {
    pub fn scripted(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            written: Vec::new(),
            calls: Vec::new(),
            pts_log: Vec::new(),
            reject_pts: false,
        }
    }

    /// Handle that accepts every write in full.
    pub fn accepting() -> Self {
        Self::scripted(Vec::new())
    }

    /// Handle whose PTS tracker rejects every check-in.
    pub fn rejecting_pts() -> Self {
        Self {
            reject_pts: true,
            ..Self::scripted(Vec::new())
        }
    }
}

impl DecoderHandle for ScriptedHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls.push(buf.len());
        match self.steps.pop_front().unwrap_or(Step::AcceptAll) {
            Step::Accept(n) => {
                let n = n.min(buf.len());
                self.written.extend_from_slice(&buf[..n]);
                Ok(n)
            }
            Step::AcceptAll => {
                self.written.extend_from_slice(buf);
                Ok(buf.len())
            }
            Step::WouldBlock => Err(io::ErrorKind::WouldBlock.into()),
            Step::Fail => Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink failure")),
            Step::OverClaim => Ok(buf.len() + 1),
        }
    }

    fn checkin_pts(&mut self, pts: i64) -> io::Result<()> {
        if self.reject_pts {
            return Err(io::Error::new(io::ErrorKind::Other, "tracker rejected timestamp"));
        }
        self.pts_log.push(pts);
        Ok(())
    }
}
