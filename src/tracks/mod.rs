pub mod group;
pub mod language;
pub mod selection;

pub use group::group_by_layout;
pub use language::lang_to_flag;

/// Media kind of a track, spelled the way mkvmerge spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Video,
    Audio,
    Subtitles,
}

impl TrackKind {
    /// Parse a backend type name. ffprobe says `subtitle`, mkvmerge says `subtitles`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "video" => Some(TrackKind::Video),
            "audio" => Some(TrackKind::Audio),
            "subtitles" | "subtitle" => Some(TrackKind::Subtitles),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
            TrackKind::Subtitles => "subtitles",
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One media track of a source file together with the user's intent for it.
///
/// `native_id` is the id assigned by the backend that discovered the track and
/// is the only id ever written into a command line. `display_index` is the
/// position in the discovered list and is only used for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub display_index: usize,
    pub native_id: u32,
    pub kind: TrackKind,
    pub codec: String,
    pub language: String,
    pub name: String,
    pub removed: bool,
    pub forced: bool,
    pub default_audio: bool,
    pub default_subtitle: bool,
    pub orig_forced: bool,
    pub orig_default_audio: bool,
    pub orig_default_subtitle: bool,
}

impl Track {
    /// Build a freshly discovered track. The `orig_*` snapshots mirror the
    /// discovered dispositions and `default` is routed by kind.
    #[allow(clippy::too_many_arguments)]
    pub fn from_discovery(
        display_index: usize,
        native_id: u32,
        kind: TrackKind,
        codec: impl Into<String>,
        language: impl Into<String>,
        name: impl Into<String>,
        forced: bool,
        default: bool,
    ) -> Self {
        let default_audio = default && kind == TrackKind::Audio;
        let default_subtitle = default && kind == TrackKind::Subtitles;
        Self {
            display_index,
            native_id,
            kind,
            codec: codec.into(),
            language: language.into(),
            name: name.into(),
            removed: false,
            forced,
            default_audio,
            default_subtitle,
            orig_forced: forced,
            orig_default_audio: default_audio,
            orig_default_subtitle: default_subtitle,
        }
    }

    /// Key identifying this track's place in a file layout.
    pub fn signature(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}-{}",
            self.native_id,
            self.kind,
            self.codec,
            self.language,
            if self.forced { "F" } else { "" },
            self.name
        )
    }

    pub fn is_audio(&self) -> bool {
        self.kind == TrackKind::Audio
    }

    pub fn is_subtitle(&self) -> bool {
        self.kind == TrackKind::Subtitles
    }

    /// Whether any disposition differs from what discovery reported
    pub fn is_changed(&self) -> bool {
        self.forced != self.orig_forced
            || self.default_audio != self.orig_default_audio
            || self.default_subtitle != self.orig_default_subtitle
    }

    /// One-line description for listings, e.g.
    /// `#2 id 3: subtitles S_TEXT/UTF8 eng 🇬🇧 [forced, default] - Signs`
    pub fn display_name(&self) -> String {
        let flag = lang_to_flag(&self.language);
        let mut marks = Vec::new();
        if self.forced {
            marks.push("forced");
        }
        if self.default_audio || self.default_subtitle {
            marks.push("default");
        }
        if self.removed {
            marks.push("removed");
        }
        if self.is_changed() {
            marks.push("changed");
        }

        let mut line = format!(
            "#{} id {}: {} {} {}",
            self.display_index, self.native_id, self.kind, self.codec, self.language
        );
        if !flag.is_empty() {
            line.push(' ');
            line.push_str(&flag);
        }
        if !marks.is_empty() {
            line.push_str(&format!(" [{}]", marks.join(", ")));
        }
        if !self.name.is_empty() {
            line.push_str(&format!(" - {}", self.name));
        }
        line
    }
}

/// Signature of a whole file layout, used to group files with identical tracks
pub fn layout_signature(tracks: &[Track]) -> String {
    tracks
        .iter()
        .map(Track::signature)
        .collect::<Vec<_>>()
        .join(";")
}
