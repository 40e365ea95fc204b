use std::sync::mpsc::Receiver;

use crate::audio::PlaybackState;
use crate::mpris::MprisHandle;

/// Push the newest controller snapshot, if any arrived, to MPRIS.
pub fn sync_mpris(mpris: &MprisHandle, snapshots: &Receiver<PlaybackState>) -> bool {
    let Some(latest) = snapshots.try_iter().last() else {
        return false;
    };
    mpris.set_snapshot(&latest);
    true
}
