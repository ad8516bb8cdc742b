use std::path::Path;

/// Semantic kind of a capsule payload, with the stable `u32` tag stored in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Unclassified bytes.
    Raw,
    /// Plain text and text-based config.
    Text,
    /// BMP image.
    Bmp,
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// GIF image.
    Gif,
    /// WAV sound.
    Wav,
    /// MP3 sound.
    Mp3,
    /// Ogg Vorbis sound.
    Ogg,
    /// TrueType/OpenType font.
    Font,
    /// Tracker/MIDI music.
    Music,
    /// Opaque binary data file.
    Data,
}

const ALL: [AssetKind; 12] = [
    AssetKind::Raw,
    AssetKind::Text,
    AssetKind::Bmp,
    AssetKind::Png,
    AssetKind::Jpeg,
    AssetKind::Gif,
    AssetKind::Wav,
    AssetKind::Mp3,
    AssetKind::Ogg,
    AssetKind::Font,
    AssetKind::Music,
    AssetKind::Data,
];

impl AssetKind {
    /// Header tag for this kind.
    pub fn tag(self) -> u32 {
        match self {
            Self::Raw => 0,
            Self::Text => 1,
            Self::Bmp => 2,
            Self::Png => 3,
            Self::Jpeg => 4,
            Self::Gif => 5,
            Self::Wav => 6,
            Self::Mp3 => 7,
            Self::Ogg => 8,
            Self::Font => 9,
            Self::Music => 10,
            Self::Data => 11,
        }
    }

    /// Kind for a header tag; `None` for tags this build does not know.
    pub fn from_tag(tag: u32) -> Option<Self> {
        ALL.into_iter().find(|k| k.tag() == tag)
    }

    /// Classify by file extension (case-insensitive). Unknown or missing extensions are `Raw`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let Some(ext) = path.as_ref().extension().and_then(|s| s.to_str()) else {
            return Self::Raw;
        };
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "csv" | "json" | "ini" | "cfg" | "md" | "xml" => Self::Text,
            "bmp" => Self::Bmp,
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "gif" => Self::Gif,
            "wav" => Self::Wav,
            "mp3" => Self::Mp3,
            "ogg" => Self::Ogg,
            "ttf" | "otf" => Self::Font,
            "mid" | "midi" | "mod" | "xm" | "it" | "s3m" => Self::Music,
            "dat" | "bin" => Self::Data,
            _ => Self::Raw,
        }
    }

    /// Canonical file extension used when a payload is unpacked back to disk.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Text => "txt",
            Self::Bmp => "bmp",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Font => "ttf",
            Self::Music => "mod",
            Self::Data => "dat",
        }
    }

    /// Raster image kinds the image decoder accepts.
    pub fn is_image(self) -> bool {
        matches!(self, Self::Bmp | Self::Png | Self::Jpeg | Self::Gif)
    }

    /// Sound and music kinds.
    pub fn is_audio(self) -> bool {
        matches!(self, Self::Wav | Self::Mp3 | Self::Ogg | Self::Music)
    }

    /// Font kinds.
    pub fn is_font(self) -> bool {
        self == Self::Font
    }
}

#[cfg(test)]
#[path = "../../tests/unit/container/kind.rs"]
mod tests;
