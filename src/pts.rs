//! Timestamp check-in with fallback rules for timestampless packets.

use tracing::warn;

use crate::error::{Error, Result};
use crate::packet::Packet;
use crate::sink::DecoderHandle;

/// Per-session timestamp check-in state.
///
/// `last_duration` carries across packets within a session on purpose: a
/// packet arriving with only a decode timestamp is scaled by the duration
/// of the last packet that declared one. Each session owns its own copy,
/// so sessions cannot leak timing into each other.
#[derive(Debug, Default)]
pub(crate) struct PtsState {
    /// Set once the first check-in opportunity has passed.
    checked_first: bool,
    /// Duration of the last packet that declared one, as a fallback
    /// multiplier for dts-only packets. Zero until then.
    last_duration: i64,
}

impl PtsState {
    /// Check one packet's timestamp into the decoder's clock tracker.
    ///
    /// Priority order: presentation timestamp as-is, then decode timestamp
    /// scaled by `last_duration`, then a one-time zero bootstrap for the
    /// session's first packet. Timestampless packets after the first are
    /// skipped so zero is never reassigned.
    pub(crate) fn check_in<H: DecoderHandle>(
        &mut self,
        handle: &mut H,
        pkt: &mut Packet,
    ) -> Result<()> {
        let mut resolved: i64 = 0;

        if let Some(pts) = pkt.pts {
            resolved = pts;
            if let Err(err) = handle.checkin_pts(resolved) {
                warn!(pts = resolved, %err, "pts check-in rejected");
                return Err(Error::PtsCheckin);
            }
        } else if let Some(dts) = pkt.dts {
            resolved = dts.wrapping_mul(self.last_duration);
            if let Err(err) = handle.checkin_pts(resolved) {
                warn!(dts, pts = resolved, %err, "dts check-in rejected");
                return Err(Error::PtsCheckin);
            }
            self.last_duration = pkt.duration.filter(|&d| d != 0).unwrap_or(1);
        } else if !self.checked_first {
            if let Err(err) = handle.checkin_pts(0) {
                warn!(%err, "zero bootstrap check-in rejected");
                return Err(Error::PtsCheckin);
            }
        }

        self.checked_first = true;

        if resolved > 0 {
            pkt.record_pts(resolved);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScriptedHandle;
    use assert_matches::assert_matches;
    use bytes::Bytes;

    fn packet(pts: Option<i64>, dts: Option<i64>, duration: Option<i64>) -> Packet {
        let mut pkt = Packet::new(Bytes::from_static(b"x"));
        pkt.pts = pts;
        pkt.dts = dts;
        pkt.duration = duration;
        pkt
    }

    #[test]
    fn test_pts_checked_in_directly() {
        let mut state = PtsState::default();
        let mut handle = ScriptedHandle::accepting();
        let mut pkt = packet(Some(9000), Some(8000), Some(3));

        state.check_in(&mut handle, &mut pkt).unwrap();
        assert_eq!(handle.pts_log, vec![9000]);
        assert_eq!(pkt.last_pts(), Some(9000));
        // the pts branch never touches the duration fallback
        assert_eq!(state.last_duration, 0);
    }

    #[test]
    fn test_dts_scaled_by_last_duration() {
        let mut state = PtsState {
            checked_first: true,
            last_duration: 3,
        };
        let mut handle = ScriptedHandle::accepting();
        let mut pkt = packet(None, Some(100), None);

        state.check_in(&mut handle, &mut pkt).unwrap();
        assert_eq!(handle.pts_log, vec![300]);
        assert_eq!(pkt.last_pts(), Some(300));
        // no duration declared, so the multiplier resets to 1
        assert_eq!(state.last_duration, 1);
    }

    #[test]
    fn test_dts_with_zero_last_duration_collapses_to_zero() {
        let mut state = PtsState::default();
        let mut handle = ScriptedHandle::accepting();
        let mut pkt = packet(None, Some(500), Some(40));

        state.check_in(&mut handle, &mut pkt).unwrap();
        assert_eq!(handle.pts_log, vec![0]);
        assert_eq!(pkt.last_pts(), None);
        assert_eq!(state.last_duration, 40);
    }

    #[test]
    fn test_first_timestampless_packet_bootstraps_zero() {
        let mut state = PtsState::default();
        let mut handle = ScriptedHandle::accepting();

        let mut first = packet(None, None, None);
        state.check_in(&mut handle, &mut first).unwrap();
        assert_eq!(handle.pts_log, vec![0]);
        assert!(state.checked_first);

        let mut second = packet(None, None, None);
        state.check_in(&mut handle, &mut second).unwrap();
        // no repeat of the zero bootstrap
        assert_eq!(handle.pts_log, vec![0]);
    }

    #[test]
    fn test_first_flag_set_even_with_timestamped_packet() {
        let mut state = PtsState::default();
        let mut handle = ScriptedHandle::accepting();
        let mut pkt = packet(Some(100), None, None);

        state.check_in(&mut handle, &mut pkt).unwrap();
        assert!(state.checked_first);

        // a later timestampless packet must not bootstrap zero
        let mut bare = packet(None, None, None);
        state.check_in(&mut handle, &mut bare).unwrap();
        assert_eq!(handle.pts_log, vec![100]);
    }

    #[test]
    fn test_tracker_rejection_is_an_error() {
        let mut state = PtsState::default();
        let mut handle = ScriptedHandle::rejecting_pts();
        let mut pkt = packet(Some(100), None, None);

        let err = state.check_in(&mut handle, &mut pkt).unwrap_err();
        assert_matches!(err, Error::PtsCheckin);
        // the error path leaves the first-check-in flag unset
        assert!(!state.checked_first);
    }
}
