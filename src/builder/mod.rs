//! Command synthesis for the two rewrite backends.
//!
//! mkvmerge addresses tracks by their native id while ffmpeg addresses output
//! streams by their position among the kept streams of one kind. Each
//! algorithm lives in its own module and only [`build_command`] chooses
//! between them.

pub mod ffmpeg;
pub mod mkvmerge;

use crate::config::{Backend, Binaries};
use crate::tracks::Track;
use std::path::Path;

/// Global switches applied on top of the per-track intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessFlags {
    /// Drop every subtitle track regardless of its own state
    pub wipe_all: bool,
    /// Clear the forced flag on every kept subtitle track
    pub wipe_forced: bool,
    pub backend: Backend,
}

/// Build the full argument vector, program first, for rewriting `source`
/// into `destination`. The tracks must come from a discovery of `source`
/// made with the same backend.
pub fn build_command(
    source: &Path,
    destination: &Path,
    tracks: &[Track],
    flags: &ProcessFlags,
    binaries: &Binaries,
) -> Vec<String> {
    let program = binaries.writer(flags.backend).to_string();
    let source = source.to_string_lossy().into_owned();
    let destination = destination.to_string_lossy().into_owned();

    match flags.backend {
        Backend::Mkvmerge => mkvmerge::build_args(program, &source, &destination, tracks, flags),
        Backend::Ffmpeg => ffmpeg::build_args(program, &source, &destination, tracks, flags),
    }
}

/// Render an argument vector for logs and dry runs
pub fn display_command(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                format!("\"{}\"", arg)
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use std::path::PathBuf;

    fn binaries() -> Binaries {
        Binaries {
            mkvmerge: "mkvmerge".to_string(),
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }

    #[test]
    fn test_dispatch_uses_backend_program() {
        let tracks = vec![video(0), audio(1, true)];
        let src = PathBuf::from("in.mkv");
        let dst = PathBuf::from("out.mkv");

        let remux = ProcessFlags {
            backend: Backend::Mkvmerge,
            ..Default::default()
        };
        let copy = ProcessFlags {
            backend: Backend::Ffmpeg,
            ..Default::default()
        };

        assert_eq!(build_command(&src, &dst, &tracks, &remux, &binaries())[0], "mkvmerge");
        assert_eq!(build_command(&src, &dst, &tracks, &copy, &binaries())[0], "ffmpeg");
    }

    #[test]
    fn test_configured_program_path_is_used() {
        let mut bins = binaries();
        bins.mkvmerge = "/opt/mkvtoolnix/mkvmerge".to_string();
        let flags = ProcessFlags {
            backend: Backend::Mkvmerge,
            ..Default::default()
        };
        let cmd = build_command(Path::new("a.mkv"), Path::new("b.mkv"), &[], &flags, &bins);
        assert_eq!(cmd[0], "/opt/mkvtoolnix/mkvmerge");
    }

    #[test]
    fn test_builder_is_idempotent_and_leaves_input_alone() {
        let tracks = vec![
            video(0),
            audio(1, true),
            removed(audio(2, false)),
            subtitle(3, true, false),
        ];
        let before = tracks.clone();
        for backend in [Backend::Mkvmerge, Backend::Ffmpeg] {
            let flags = ProcessFlags {
                wipe_all: true,
                wipe_forced: true,
                backend,
            };
            let first = build_command(Path::new("in.mkv"), Path::new("out.mkv"), &tracks, &flags, &binaries());
            let second = build_command(Path::new("in.mkv"), Path::new("out.mkv"), &tracks, &flags, &binaries());
            assert_eq!(first, second);
        }
        assert_eq!(tracks, before);
    }

    #[test]
    fn test_display_command_quotes_spaces() {
        let args = vec!["mkvmerge".to_string(), "-o".to_string(), "My Movie.mkv".to_string()];
        assert_eq!(display_command(&args), "mkvmerge -o \"My Movie.mkv\"");
    }
}
