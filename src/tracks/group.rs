use super::{Track, layout_signature};
use std::path::PathBuf;

/// Files that share one track layout. `tracks` is the editable template taken
/// from the first file seen with this layout.
#[derive(Debug, Clone)]
pub struct LayoutGroup {
    pub signature: String,
    pub tracks: Vec<Track>,
    pub files: Vec<PathBuf>,
}

/// Group discovered files by layout signature, keeping first-seen order
pub fn group_by_layout(discovered: impl IntoIterator<Item = (PathBuf, Vec<Track>)>) -> Vec<LayoutGroup> {
    let mut groups: Vec<LayoutGroup> = Vec::new();

    for (path, tracks) in discovered {
        let signature = layout_signature(&tracks);
        match groups.iter_mut().find(|g| g.signature == signature) {
            Some(group) => {
                if !group.files.contains(&path) {
                    group.files.push(path);
                }
            }
            None => groups.push(LayoutGroup {
                signature,
                tracks,
                files: vec![path],
            }),
        }
    }

    groups
}
