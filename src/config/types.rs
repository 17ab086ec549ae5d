use super::backend::{Backend, executable_name};
use serde::{Deserialize, Serialize};

/// Commands (names on PATH or full paths) used to run each tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Binaries {
    pub mkvmerge: String,
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for Binaries {
    fn default() -> Self {
        Self {
            mkvmerge: executable_name("mkvmerge"),
            ffmpeg: executable_name("ffmpeg"),
            ffprobe: executable_name("ffprobe"),
        }
    }
}

impl Binaries {
    /// Program that rewrites files for a backend
    pub fn writer(&self, backend: Backend) -> &str {
        match backend {
            Backend::Mkvmerge => &self.mkvmerge,
            Backend::Ffmpeg => &self.ffmpeg,
        }
    }

    /// Program that reports track layouts for a backend
    pub fn prober(&self, backend: Backend) -> &str {
        match backend {
            Backend::Mkvmerge => &self.mkvmerge,
            Backend::Ffmpeg => &self.ffprobe,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory. Relative paths are resolved next to each source file.
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "cleaned".to_string(),
        }
    }
}

/// Performance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of files processed at the same time
    pub max_workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { max_workers: 4 }
    }
}
