//! Sections between the game identifier and the entities that only need
//! to be stepped over: the extras blob and the "most recently used" list.

use std::io::Read;

use tracing::debug;

use crate::error::{Result, Section};
use crate::game::GAME_IDENT_VERSION;
use crate::stream::OgzReader;

/// First version that stores the MRU list as a counted u16 array.
pub const MRU_VERSION: i32 = 14;
/// Size of the fixed MRU block in older maps.
pub const OLD_MRU_LEN: u64 = 256;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtraEntityInfo {
    /// Bytes of game-specific data following every entity record.
    pub entity_extra_len: u16,
    /// Size of the game-specific extras blob, which is skipped.
    pub extras_len: u16,
}

impl ExtraEntityInfo {
    pub fn parse<R: Read>(reader: &mut OgzReader<R>, version: i32) -> Result<Self> {
        if version < GAME_IDENT_VERSION {
            return Ok(Self::default());
        }

        let location = reader.locate(Section::ExtraEntityInfo);
        let entity_extra_len = reader.read_u16_in(location)?;
        let extras_len = reader.read_u16_in(location)?;
        reader.skip(extras_len as u64, reader.locate(Section::Extras))?;

        debug!(entity_extra_len, extras_len, "skipped extras");
        Ok(Self {
            entity_extra_len,
            extras_len,
        })
    }
}

/// Steps over the editor's texture MRU list.
pub fn skip_most_recently_used<R: Read>(reader: &mut OgzReader<R>, version: i32) -> Result<()> {
    let location = reader.locate(Section::MostRecentlyUsed);
    if version < MRU_VERSION {
        return reader.skip(OLD_MRU_LEN, location);
    }

    let count = reader.read_u16_in(location)?;
    // one u16 slot index per entry
    reader.skip(count as u64 * 2, location)?;
    debug!(count, "skipped 'most recently used' section");
    Ok(())
}
