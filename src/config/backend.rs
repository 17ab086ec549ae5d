use serde::{Deserialize, Serialize};

/// External tool family used for discovery and for the rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// MKVToolNix: lossless remux with `mkvmerge`
    Mkvmerge,
    /// FFmpeg: stream copy with `ffmpeg`, discovery with `ffprobe`
    #[default]
    Ffmpeg,
}

impl Backend {
    /// Display name for logs and summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            Backend::Mkvmerge => "mkvmerge (remux)",
            Backend::Ffmpeg => "ffmpeg (stream copy)",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Platform executable name for a bare tool name
pub fn executable_name(tool: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", tool)
    } else {
        tool.to_string()
    }
}
