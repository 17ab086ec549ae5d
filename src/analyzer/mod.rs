pub mod ffprobe;
pub mod mkvmerge;

use crate::config::{Backend, Binaries};
use crate::error::AppError;
use crate::tracks::Track;
use std::path::Path;

/// Discover the tracks of a file with the prober of the given backend.
///
/// Native ids are only valid for this file as it is right now, so callers
/// about to build a command should discover again instead of reusing an
/// older result.
pub async fn discover(path: &Path, backend: Backend, binaries: &Binaries) -> Result<Vec<Track>, AppError> {
    let prober = binaries.prober(backend);
    match backend {
        Backend::Mkvmerge => mkvmerge::discover(prober, path).await,
        Backend::Ffmpeg => ffprobe::discover(prober, path).await,
    }
}
