use crate::tracks::Track;
use tracing::debug;

/// Carry the held intent over to a fresh discovery of the same file.
///
/// Tracks are matched by native id. A fresh track with no held counterpart
/// is kept with no forced or default flag.
pub fn reconcile(mut fresh: Vec<Track>, held: &[Track]) -> Vec<Track> {
    for track in &mut fresh {
        match held.iter().find(|h| h.native_id == track.native_id) {
            Some(intent) => {
                track.removed = intent.removed;
                track.forced = intent.forced;
                track.default_audio = intent.default_audio;
                track.default_subtitle = intent.default_subtitle;
            }
            None => {
                debug!("Track {} was not in the edited layout, keeping it unflagged", track.native_id);
                track.removed = false;
                track.forced = false;
                track.default_audio = false;
                track.default_subtitle = false;
            }
        }
    }
    fresh
}
