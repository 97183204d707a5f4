//! Writes a minimal OGZ only containing the entity data.
//!
//! Version 29 is used since it doesn't have `numvslots` and its header is
//! thus 4 bytes smaller than v30+. The file contains:
//!
//! | length in bytes | contents                             |
//! |----------------:|--------------------------------------|
//! |              36 | header                               |
//! |               5 | game identifier: 3, "fps", 0         |
//! |               2 | extra entity info size: 0            |
//! |               2 | extras length: 0                     |
//! |               2 | MRU count: 0                         |
//! |     24 * ents   | entities                             |

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::entity::{ENTITY_LEN, Entity};
use crate::error::{OgzError, Result};
use crate::game::DEFAULT_GAME;
use crate::header::{MAGIC, MIN_HEADER_SIZE, VARS_VERSION};

pub const MINIMAL_VERSION: i32 = VARS_VERSION;
/// Everything before the first entity record.
pub const MINIMAL_PREFIX_LEN: usize = MIN_HEADER_SIZE as usize + 5 + 2 + 2 + 2;

#[repr(C)]
#[derive(Copy, Clone, Debug, Serialize)]
struct MinimalHeader {
    magic: [u8; 4],
    version: i32,
    header_size: i32,
    world_size: i32,
    num_ents: i32,
    num_pvs: i32,
    num_lightmaps: i32,
    blendmap: i32,
    num_vars: i32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Serialize)]
struct MinimalTrailer {
    game_len: u8,
    game: [u8; 3],
    game_terminator: u8,
    entity_extra_len: u16,
    extras_len: u16,
    mru_count: u16,
}

fn serialize_into<W: Write, T: Serialize>(writer: &mut W, value: &T, target: &str) -> Result<()> {
    bincode::serialize_into(writer, value).map_err(|err| OgzError::Output {
        target: target.to_owned(),
        source: match *err {
            bincode::ErrorKind::Io(err) => err,
            other => std::io::Error::other(other),
        },
    })
}

/// Writes the minimal file for `entities` to `writer`.
pub fn write_minimal<W: Write>(entities: &[Entity], mut writer: W) -> Result<()> {
    let num_ents = i32::try_from(entities.len()).map_err(|_| OgzError::TooManyEntities {
        count: entities.len(),
    })?;

    let header = MinimalHeader {
        magic: *MAGIC,
        version: MINIMAL_VERSION,
        header_size: MIN_HEADER_SIZE,
        world_size: 1,
        num_ents,
        num_pvs: 0,
        num_lightmaps: 0,
        blendmap: 0,
        num_vars: 0,
    };
    serialize_into(&mut writer, &header, "header")?;

    let mut game = [0u8; 3];
    game.copy_from_slice(DEFAULT_GAME.as_bytes());
    let trailer = MinimalTrailer {
        game_len: game.len() as u8,
        game,
        game_terminator: 0,
        entity_extra_len: 0,
        extras_len: 0,
        mru_count: 0,
    };
    serialize_into(&mut writer, &trailer, "game identifier/extras/MRU size")?;

    for entity in entities {
        serialize_into(&mut writer, entity, "entities")?;
    }

    writer.flush().map_err(|source| OgzError::Output {
        target: "entities".to_owned(),
        source,
    })?;
    debug!(count = entities.len(), "wrote minimal OGZ");
    Ok(())
}

/// Encodes the minimal file in memory.
pub fn encode_minimal(entities: &[Entity]) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(MINIMAL_PREFIX_LEN + entities.len() * ENTITY_LEN);
    write_minimal(entities, &mut data)?;
    Ok(data)
}
