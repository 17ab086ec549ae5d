use super::ProcessFlags;
use crate::tracks::Track;

/// Build ffmpeg stream-copy arguments.
///
/// Everything is mapped with `-map 0` and unwanted streams are removed with
/// negative maps by native id. Dispositions are then set per output stream,
/// addressed by the position among the kept streams of that kind.
pub fn build_args(
    program: String,
    source: &str,
    destination: &str,
    tracks: &[Track],
    flags: &ProcessFlags,
) -> Vec<String> {
    let mut args = vec![
        program,
        // Overwrite existing output without asking
        "-y".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-i".to_string(),
        source.to_string(),
        "-map".to_string(),
        "0".to_string(),
    ];

    // Negative maps for dropped streams
    for track in tracks.iter().filter(|t| is_excluded(t, flags)) {
        args.extend(["-map".to_string(), format!("-0:{}", track.native_id)]);
    }

    for (index, track) in kept(tracks, flags).filter(|t| t.is_audio()).enumerate() {
        let disposition = if track.default_audio { "default" } else { "0" };
        args.extend([format!("-disposition:a:{}", index), disposition.to_string()]);
    }

    for (index, track) in kept(tracks, flags).filter(|t| t.is_subtitle()).enumerate() {
        args.extend([
            format!("-disposition:s:{}", index),
            subtitle_disposition(track, flags),
        ]);
    }

    args.extend(["-c".to_string(), "copy".to_string(), destination.to_string()]);
    args
}

/// Tracks that stay in the output, in input order
fn kept<'a>(tracks: &'a [Track], flags: &'a ProcessFlags) -> impl Iterator<Item = &'a Track> {
    tracks.iter().filter(move |t| !is_excluded(t, flags))
}

fn is_excluded(track: &Track, flags: &ProcessFlags) -> bool {
    (track.is_audio() || track.is_subtitle())
        && (track.removed || (flags.wipe_all && track.is_subtitle()))
}

/// `forced`, `default`, both joined with `+`, or `0` to clear inherited flags
fn subtitle_disposition(track: &Track, flags: &ProcessFlags) -> String {
    let mut words = Vec::new();
    if track.forced && !flags.wipe_forced {
        words.push("forced");
    }
    if track.default_subtitle {
        words.push("default");
    }
    if words.is_empty() {
        "0".to_string()
    } else {
        words.join("+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::*;
    use crate::config::Backend;

    fn flags(wipe_all: bool, wipe_forced: bool) -> ProcessFlags {
        ProcessFlags {
            wipe_all,
            wipe_forced,
            backend: Backend::Ffmpeg,
        }
    }

    fn build(tracks: &[Track], flags: &ProcessFlags) -> Vec<String> {
        build_args("ffmpeg".to_string(), "in.mkv", "out.mkv", tracks, flags)
    }

    fn dispositions<'a>(cmd: &'a [String], prefix: &str) -> Vec<(&'a str, &'a str)> {
        cmd.windows(2)
            .filter(|w| w[0].starts_with(prefix))
            .map(|w| (w[0].as_str(), w[1].as_str()))
            .collect()
    }

    #[test]
    fn test_wipe_all_with_audio_only_kept() {
        let tracks = vec![audio(1, true), subtitle(2, true, false)];
        let cmd = build(&tracks, &flags(true, false));
        assert_eq!(
            cmd,
            vec![
                "ffmpeg",
                "-y",
                "-loglevel",
                "error",
                "-i",
                "in.mkv",
                "-map",
                "0",
                "-map",
                "-0:2",
                "-disposition:a:0",
                "default",
                "-c",
                "copy",
                "out.mkv",
            ]
        );
    }

    #[test]
    fn test_indices_count_kept_streams_not_native_ids() {
        let tracks = vec![
            video(0),
            removed(audio(1, true)),
            audio(2, false),
            audio(3, true),
            subtitle(4, false, false),
            removed(subtitle(5, false, false)),
            subtitle(6, true, true),
        ];
        let cmd = build(&tracks, &flags(false, false));

        assert_eq!(
            dispositions(&cmd, "-disposition:a:"),
            vec![("-disposition:a:0", "0"), ("-disposition:a:1", "default")]
        );
        assert_eq!(
            dispositions(&cmd, "-disposition:s:"),
            vec![("-disposition:s:0", "0"), ("-disposition:s:1", "forced+default")]
        );

        let negative: Vec<&str> = cmd
            .windows(2)
            .filter(|w| w[0] == "-map" && w[1].starts_with('-'))
            .map(|w| w[1].as_str())
            .collect();
        assert_eq!(negative, vec!["-0:1", "-0:5"]);
    }

    #[test]
    fn test_wipe_forced_keeps_default_word() {
        let tracks = vec![subtitle(2, true, true), subtitle(3, true, false)];
        let cmd = build(&tracks, &flags(false, true));
        assert_eq!(
            dispositions(&cmd, "-disposition:s:"),
            vec![("-disposition:s:0", "default"), ("-disposition:s:1", "0")]
        );
    }

    #[test]
    fn test_forced_only_subtitle() {
        let tracks = vec![subtitle(2, true, false)];
        let cmd = build(&tracks, &flags(false, false));
        assert_eq!(dispositions(&cmd, "-disposition:s:"), vec![("-disposition:s:0", "forced")]);
    }

    #[test]
    fn test_wipe_all_excludes_every_subtitle_from_dispositions() {
        let tracks = vec![
            subtitle(1, true, true),
            audio(2, false),
            removed(subtitle(3, false, false)),
            subtitle(4, false, false),
        ];
        let cmd = build(&tracks, &flags(true, false));
        assert!(dispositions(&cmd, "-disposition:s:").is_empty());
        assert_eq!(dispositions(&cmd, "-disposition:a:"), vec![("-disposition:a:0", "0")]);
        for id in [1, 3, 4] {
            assert!(cmd.contains(&format!("-0:{}", id)));
        }
    }

    #[test]
    fn test_video_is_never_excluded() {
        let mut video = video(0);
        video.removed = true;
        let cmd = build(&[video], &flags(true, true));
        assert!(!cmd.contains(&"-0:0".to_string()));
    }

    #[test]
    fn test_output_clause_closes_the_command() {
        let tracks = vec![audio(1, false), subtitle(2, false, false)];
        let cmd = build(&tracks, &flags(false, false));
        let n = cmd.len();
        assert_eq!(&cmd[n - 3..], &["-c", "copy", "out.mkv"]);
    }
}
