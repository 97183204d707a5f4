use std::io::Write;

use crate::map::OgzMap;

/// Which decoded values to print instead of writing map data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub version: bool,
    pub vars: bool,
    pub game: bool,
    pub ents: bool,
}

impl Diagnostics {
    pub fn any(&self) -> bool {
        self.version || self.vars || self.game || self.ents
    }
}

pub fn write_report<W: Write>(
    map: &OgzMap,
    diagnostics: &Diagnostics,
    out: &mut W,
) -> std::io::Result<()> {
    if diagnostics.version {
        writeln!(out, "OGZ file format version: {}", map.header.version)?;
    }
    if diagnostics.vars {
        for var in &map.vars {
            writeln!(out, "  {} = {}", var.name_str(), var.value)?;
        }
    }
    if diagnostics.game {
        writeln!(out, "game: {}", map.game)?;
    }
    if diagnostics.ents {
        for (i, entity) in map.entities.iter().enumerate() {
            writeln!(out, "  {:4}: {}", i, entity)?;
        }
    }
    out.flush()
}
