use super::ProcessFlags;
use crate::tracks::Track;

/// Build mkvmerge arguments. Tracks are addressed by native id and the
/// output clause plus source path always close the command.
pub fn build_args(
    program: String,
    source: &str,
    destination: &str,
    tracks: &[Track],
    flags: &ProcessFlags,
) -> Vec<String> {
    let mut args = vec![program];

    let all_audio: Vec<String> = ids(tracks.iter().filter(|t| t.is_audio()));
    let kept_audio: Vec<String> = ids(tracks.iter().filter(|t| is_kept_audio(t)));
    let all_subtitles: Vec<String> = ids(tracks.iter().filter(|t| t.is_subtitle()));
    let kept_subtitles: Vec<String> = ids(tracks.iter().filter(|t| is_kept_subtitle(t, flags)));

    // Audio selection
    if kept_audio.is_empty() {
        args.push("--no-audio".to_string());
    } else if kept_audio.len() != all_audio.len() {
        args.extend(["--audio-tracks".to_string(), kept_audio.join(",")]);
    }

    // Subtitle selection
    if flags.wipe_all || kept_subtitles.is_empty() {
        args.push("--no-subtitles".to_string());
    } else if kept_subtitles.len() != all_subtitles.len() {
        args.extend(["--subtitle-tracks".to_string(), kept_subtitles.join(",")]);
    }

    // Forced flags, explicit for every kept subtitle so source flags are overridden
    for track in tracks.iter().filter(|t| is_kept_subtitle(t, flags)) {
        let forced = track.forced && !flags.wipe_forced;
        args.extend([
            "--forced-track".to_string(),
            format!("{}:{}", track.native_id, yes_no(forced)),
        ]);
    }

    // Default flags for every kept audio and subtitle track
    for track in tracks {
        let default = if is_kept_audio(track) {
            track.default_audio
        } else if is_kept_subtitle(track, flags) {
            track.default_subtitle
        } else {
            continue;
        };
        args.extend([
            "--default-track".to_string(),
            format!("{}:{}", track.native_id, yes_no(default)),
        ]);
    }

    // Output and input file must come last
    args.extend([
        "-o".to_string(),
        destination.to_string(),
        source.to_string(),
    ]);
    args
}

fn is_kept_audio(track: &Track) -> bool {
    track.is_audio() && !track.removed
}

fn is_kept_subtitle(track: &Track, flags: &ProcessFlags) -> bool {
    track.is_subtitle() && !track.removed && !flags.wipe_all
}

fn ids<'a>(tracks: impl Iterator<Item = &'a Track>) -> Vec<String> {
    tracks.map(|t| t.native_id.to_string()).collect()
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
