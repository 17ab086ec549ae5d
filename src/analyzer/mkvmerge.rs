use crate::error::AppError;
use crate::runner::run_command;
use crate::tracks::{Track, TrackKind};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Discover tracks with `mkvmerge -J`
pub async fn discover(mkvmerge: &str, input_path: &Path) -> Result<Vec<Track>, AppError> {
    let args = vec![
        mkvmerge.to_string(),
        "-J".to_string(),
        input_path.to_string_lossy().into_owned(),
    ];

    let output = run_command(&args, true).await?;
    parse_tracks(&output)
}

/// Parse mkvmerge identification JSON into tracks keyed by mkvmerge track id
pub fn parse_tracks(json: &str) -> Result<Vec<Track>, AppError> {
    let data: Identification = serde_json::from_str(json)
        .map_err(|e| AppError::Probe(format!("Failed to parse mkvmerge output: {}", e)))?;

    let mut tracks = Vec::new();
    for raw in data.tracks {
        let Some(kind) = TrackKind::parse(&raw.kind) else {
            debug!("Skipping track {} of type {}", raw.id, raw.kind);
            continue;
        };
        let properties = raw.properties;

        tracks.push(Track::from_discovery(
            tracks.len(),
            raw.id,
            kind,
            properties.codec_id.unwrap_or_default(),
            properties.language.unwrap_or_else(|| "und".to_string()),
            properties.track_name.unwrap_or_default(),
            properties.forced_track,
            properties.default_track,
        ));
    }

    Ok(tracks)
}

// JSON deserialization structures

#[derive(Debug, Deserialize)]
struct Identification {
    #[serde(default)]
    tracks: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    id: u32,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    properties: TrackProperties,
}

#[derive(Debug, Default, Deserialize)]
struct TrackProperties {
    codec_id: Option<String>,
    language: Option<String>,
    track_name: Option<String>,
    #[serde(default)]
    forced_track: bool,
    #[serde(default)]
    default_track: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "container": {"recognized": true, "supported": true},
        "tracks": [
            {"id": 0, "type": "video", "codec": "HEVC/H.265/MPEG-H",
             "properties": {"codec_id": "V_MPEGH/ISO/HEVC", "language": "und", "default_track": true}},
            {"id": 1, "type": "audio", "codec": "AC-3",
             "properties": {"codec_id": "A_AC3", "language": "jpn", "default_track": true, "forced_track": false}},
            {"id": 2, "type": "subtitles", "codec": "SubRip/SRT",
             "properties": {"codec_id": "S_TEXT/UTF8", "language": "eng", "track_name": "Signs & Songs",
                            "forced_track": true, "default_track": false}}
        ]
    }"#;

    #[test]
    fn test_parse_identification() {
        let tracks = parse_tracks(SAMPLE).unwrap();
        assert_eq!(tracks.len(), 3);

        assert_eq!(tracks[0].kind, TrackKind::Video);
        assert!(!tracks[0].default_audio && !tracks[0].default_subtitle);

        assert_eq!(tracks[1].codec, "A_AC3");
        assert_eq!(tracks[1].language, "jpn");
        assert!(tracks[1].default_audio);

        let sub = &tracks[2];
        assert_eq!(sub.native_id, 2);
        assert_eq!(sub.name, "Signs & Songs");
        assert!(sub.forced && sub.orig_forced);
        assert!(!sub.default_subtitle);
    }

    #[test]
    fn test_missing_properties_use_defaults() {
        let tracks = parse_tracks(r#"{"tracks": [{"id": 7, "type": "audio"}]}"#).unwrap();
        assert_eq!(tracks[0].native_id, 7);
        assert_eq!(tracks[0].language, "und");
        assert!(tracks[0].codec.is_empty());
        assert!(!tracks[0].forced);
    }

    #[test]
    fn test_track_without_id_is_malformed() {
        let err = parse_tracks(r#"{"tracks": [{"type": "audio"}]}"#).unwrap_err();
        assert!(matches!(err, AppError::Probe(_)));
    }
}
