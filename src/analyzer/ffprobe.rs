use crate::error::AppError;
use crate::runner::run_command;
use crate::tracks::{Track, TrackKind};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Discover tracks with `ffprobe -show_streams`
pub async fn discover(ffprobe: &str, input_path: &Path) -> Result<Vec<Track>, AppError> {
    let args = vec![
        ffprobe.to_string(),
        "-v".to_string(),
        "quiet".to_string(),
        "-print_format".to_string(),
        "json".to_string(),
        "-show_streams".to_string(),
        input_path.to_string_lossy().into_owned(),
    ];

    let output = run_command(&args, true).await?;
    parse_tracks(&output)
}

/// Parse ffprobe JSON into tracks. Stream indices become native ids.
pub fn parse_tracks(json: &str) -> Result<Vec<Track>, AppError> {
    let data: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| AppError::Probe(format!("Failed to parse ffprobe output: {}", e)))?;

    let mut tracks = Vec::new();
    for (position, stream) in data.streams.into_iter().enumerate() {
        let Some(kind) = stream.codec_type.as_deref().and_then(TrackKind::parse) else {
            debug!("Skipping stream {} of type {:?}", position, stream.codec_type);
            continue;
        };

        let native_id = stream.index.unwrap_or(position as u32);
        let tags = stream.tags.unwrap_or_default();
        let disposition = stream.disposition.unwrap_or_default();

        tracks.push(Track::from_discovery(
            tracks.len(),
            native_id,
            kind,
            stream.codec_name.unwrap_or_default(),
            tags.language.unwrap_or_else(|| "und".to_string()),
            tags.title.unwrap_or_default(),
            disposition.forced != 0,
            disposition.default != 0,
        ));
    }

    Ok(tracks)
}

// JSON deserialization structures

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<RawStream>,
}

#[derive(Debug, Deserialize)]
struct RawStream {
    index: Option<u32>,
    codec_type: Option<String>,
    codec_name: Option<String>,
    tags: Option<StreamTags>,
    disposition: Option<Disposition>,
}

#[derive(Debug, Default, Deserialize)]
struct StreamTags {
    language: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Disposition {
    #[serde(default)]
    default: u8,
    #[serde(default)]
    forced: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            {"index": 0, "codec_name": "hevc", "codec_type": "video",
             "disposition": {"default": 1, "forced": 0}},
            {"index": 1, "codec_name": "eac3", "codec_type": "audio",
             "disposition": {"default": 1, "forced": 0},
             "tags": {"language": "eng", "title": "Surround 5.1"}},
            {"index": 2, "codec_name": "subrip", "codec_type": "subtitle",
             "disposition": {"default": 0, "forced": 1},
             "tags": {"language": "eng", "title": "Forced"}},
            {"index": 3, "codec_name": "ttf", "codec_type": "attachment",
             "tags": {"filename": "font.ttf"}},
            {"index": 4, "codec_name": "ass", "codec_type": "subtitle"}
        ]
    }"#;

    #[test]
    fn test_parse_streams() {
        let tracks = parse_tracks(SAMPLE).unwrap();
        assert_eq!(tracks.len(), 4);

        let audio = &tracks[1];
        assert_eq!(audio.native_id, 1);
        assert_eq!(audio.kind, TrackKind::Audio);
        assert_eq!(audio.codec, "eac3");
        assert_eq!(audio.name, "Surround 5.1");
        assert!(audio.default_audio && audio.orig_default_audio);

        let forced = &tracks[2];
        assert_eq!(forced.kind, TrackKind::Subtitles);
        assert!(forced.forced && !forced.default_subtitle);
    }

    #[test]
    fn test_attachments_are_skipped_and_ids_kept() {
        let tracks = parse_tracks(SAMPLE).unwrap();
        let last = tracks.last().unwrap();
        assert_eq!(last.native_id, 4);
        assert_eq!(last.display_index, 3);
        assert_eq!(last.language, "und");
        assert!(last.name.is_empty());
    }

    #[test]
    fn test_missing_index_falls_back_to_position() {
        let tracks = parse_tracks(r#"{"streams": [{"codec_type": "audio"}]}"#).unwrap();
        assert_eq!(tracks[0].native_id, 0);
    }

    #[test]
    fn test_malformed_output() {
        let err = parse_tracks("not json").unwrap_err();
        assert!(matches!(err, AppError::Probe(_)));
    }
}
