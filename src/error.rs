//! Error types for OGZ decoding and encoding.

use std::path::PathBuf;

use thiserror::Error;

/// A contiguous region of the OGZ stream handled by one decoder.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Section {
    Header,
    HeaderTail,
    MapVars,
    GameIdentifier,
    ExtraEntityInfo,
    Extras,
    MostRecentlyUsed,
    Entities,
    EntityExtraInfo,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::HeaderTail => "header tail",
            Section::MapVars => "map variable",
            Section::GameIdentifier => "game identifier",
            Section::ExtraEntityInfo => "extra entity info size",
            Section::Extras => "extras",
            Section::MostRecentlyUsed => "'most recently used' section",
            Section::Entities => "entity",
            Section::EntityExtraInfo => "extra entity info",
        };
        f.write_str(name)
    }
}

/// Where in the stream a failing read started.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub section: Section,
    /// 0-based element index for repeated sections.
    pub index: Option<usize>,
    /// Absolute byte offset from the start of the stream.
    pub offset: u64,
}

impl Location {
    pub fn new(section: Section, offset: u64) -> Self {
        Self {
            section,
            index: None,
            offset,
        }
    }

    pub fn at(self, index: usize) -> Self {
        Self {
            index: Some(index),
            ..self
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(index) => write!(f, "{} at pos {}", self.section, index)?,
            None => write!(f, "{}", self.section)?,
        }
        write!(f, " (byte offset {})", self.offset)
    }
}

#[derive(Debug, Error)]
pub enum OgzError {
    #[error("reading OGZ header: wrong magic {found:?} (not a OGZ file?)")]
    BadMagic { found: [u8; 4] },

    #[error("reading OGZ header: too short ({size} bytes, need at least {min})", min = crate::header::MIN_HEADER_SIZE)]
    HeaderTooShort { size: i32 },

    #[error("reading {location}: stream ended early: {source}")]
    Truncated {
        location: Location,
        #[source]
        source: std::io::Error,
    },

    #[error("reading {location}: unknown type tag {tag}")]
    UnknownVarType { location: Location, tag: u8 },

    #[error("reading {location}: not zero-byte terminated (last byte is {found})")]
    MissingTerminator { location: Location, found: u8 },

    #[error("reading {location}: invalid count {count}")]
    InvalidCount { location: Location, count: i64 },

    #[error("reading {location}: {source}")]
    Io {
        location: Location,
        #[source]
        source: std::io::Error,
    },

    #[error("opening {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing {target}: {source}")]
    Output {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{count} entities do not fit a 32-bit entity count")]
    TooManyEntities { count: usize },
}

impl OgzError {
    /// The stream location of a decode failure, if it has one.
    pub fn location(&self) -> Option<Location> {
        match self {
            OgzError::Truncated { location, .. }
            | OgzError::UnknownVarType { location, .. }
            | OgzError::MissingTerminator { location, .. }
            | OgzError::InvalidCount { location, .. }
            | OgzError::Io { location, .. } => Some(*location),
            OgzError::BadMagic { .. } | OgzError::HeaderTooShort { .. } => {
                Some(Location::new(Section::Header, 0))
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, OgzError>;
