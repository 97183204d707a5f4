//! Reads the entity list out of uncompressed OGZ (Cube 2 octree map) files
//! and writes minimal OGZ files that only contain those entities.

pub mod entity;
pub mod error;
pub mod extras;
pub mod game;
pub mod header;
pub mod map;
pub mod report;
pub mod stream;
pub mod util;
pub mod vars;
pub mod writer;

pub use entity::Entity;
pub use error::{Location, OgzError, Result, Section};
pub use header::Header;
pub use map::OgzMap;
pub use report::{Diagnostics, write_report};
pub use stream::{OgzReader, TeeReader};
pub use vars::{MapVar, MapVarValue};
pub use writer::{encode_minimal, write_minimal};
