use super::{Track, TrackKind};

/// Set the removed state of a track. Returns false for an unknown id.
pub fn set_removed(tracks: &mut [Track], native_id: u32, removed: bool) -> bool {
    match find_mut(tracks, native_id) {
        Some(track) => {
            track.removed = removed;
            true
        }
        None => false,
    }
}

/// Set the forced flag of a subtitle track. Only subtitles carry a forced
/// flag, so any other kind is rejected.
pub fn set_forced(tracks: &mut [Track], native_id: u32, forced: bool) -> bool {
    match find_mut(tracks, native_id) {
        Some(track) if track.is_subtitle() => {
            track.forced = forced;
            true
        }
        _ => false,
    }
}

/// Make one audio track the default, clearing the flag on every other audio track
pub fn set_default_audio(tracks: &mut [Track], native_id: u32) -> bool {
    if !has_kind(tracks, native_id, TrackKind::Audio) {
        return false;
    }
    for track in tracks.iter_mut().filter(|t| t.is_audio()) {
        track.default_audio = track.native_id == native_id;
    }
    true
}

/// Make one subtitle track the default, clearing the flag on every other subtitle track
pub fn set_default_subtitle(tracks: &mut [Track], native_id: u32) -> bool {
    if !has_kind(tracks, native_id, TrackKind::Subtitles) {
        return false;
    }
    for track in tracks.iter_mut().filter(|t| t.is_subtitle()) {
        track.default_subtitle = track.native_id == native_id;
    }
    true
}

fn find_mut(tracks: &mut [Track], native_id: u32) -> Option<&mut Track> {
    tracks.iter_mut().find(|t| t.native_id == native_id)
}

fn has_kind(tracks: &[Track], native_id: u32, kind: TrackKind) -> bool {
    tracks
        .iter()
        .any(|t| t.native_id == native_id && t.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<Track> {
        vec![
            Track::from_discovery(0, 0, TrackKind::Video, "V_MPEG4/ISO/AVC", "und", "", false, true),
            Track::from_discovery(1, 1, TrackKind::Audio, "A_AC3", "eng", "", false, true),
            Track::from_discovery(2, 2, TrackKind::Audio, "A_AAC", "jpn", "", false, false),
            Track::from_discovery(3, 3, TrackKind::Subtitles, "S_TEXT/UTF8", "eng", "", false, true),
            Track::from_discovery(4, 4, TrackKind::Subtitles, "S_TEXT/ASS", "eng", "Signs", true, false),
        ]
    }

    #[test]
    fn test_set_default_audio_keeps_single_default() {
        let mut tracks = layout();
        assert!(set_default_audio(&mut tracks, 2));
        let defaults: Vec<u32> = tracks
            .iter()
            .filter(|t| t.default_audio)
            .map(|t| t.native_id)
            .collect();
        assert_eq!(defaults, vec![2]);
        // subtitle default untouched
        assert!(tracks[3].default_subtitle);
    }

    #[test]
    fn test_set_default_subtitle_rejects_wrong_kind() {
        let mut tracks = layout();
        assert!(!set_default_subtitle(&mut tracks, 1));
        assert!(tracks[3].default_subtitle);

        assert!(set_default_subtitle(&mut tracks, 4));
        assert!(!tracks[3].default_subtitle);
        assert!(tracks[4].default_subtitle);
    }

    #[test]
    fn test_set_forced_only_on_subtitles() {
        let mut tracks = layout();
        assert!(!set_forced(&mut tracks, 1, true));
        assert!(!tracks[1].forced);
        assert!(set_forced(&mut tracks, 4, false));
        assert!(!tracks[4].forced);
        assert!(tracks[4].is_changed());
    }

    #[test]
    fn test_unknown_id_is_reported() {
        let mut tracks = layout();
        assert!(!set_removed(&mut tracks, 42, true));
        assert!(set_removed(&mut tracks, 2, true));
        assert!(tracks[2].removed);
        assert!(set_removed(&mut tracks, 2, false));
        assert!(!tracks[2].removed);
    }
}
