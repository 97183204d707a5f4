use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{OgzError, Result, Section};
use crate::stream::OgzReader;

pub const ENTITY_LEN: usize = 24;

/// A placed game object. Attribute meaning is up to the game.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Entity {
    pub position: [f32; 3],
    pub attrs: [i16; 5],
    pub ty: u8,
    pub reserved: u8,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a1, a2, a3, a4, a5] = self.attrs;
        let [x, y, z] = self.position;
        write!(
            f,
            "type: {:2}, attrs: {:3} {:3} {:3} {:3} {:3}, pos: {:.6} {:.6} {:.6}",
            self.ty, a1, a2, a3, a4, a5, x, y, z
        )
    }
}

/// Reads `num_ents` entity records, skipping `extra_len` trailing bytes after each.
pub fn parse_entities<R: Read>(
    reader: &mut OgzReader<R>,
    num_ents: i32,
    extra_len: u16,
) -> Result<Vec<Entity>> {
    if num_ents < 0 {
        return Err(OgzError::InvalidCount {
            location: reader.locate(Section::Entities),
            count: num_ents as i64,
        });
    }

    let mut entities = Vec::with_capacity((num_ents as usize).min(4096));
    for i in 0..num_ents as usize {
        let entity: Entity = reader.deserialize_in(reader.locate(Section::Entities).at(i))?;
        trace!(index = i, ty = entity.ty, "parsed entity");
        entities.push(entity);
        if extra_len > 0 {
            reader.skip(extra_len as u64, reader.locate(Section::EntityExtraInfo).at(i))?;
        }
    }
    debug!(count = entities.len(), "parsed entities");
    Ok(entities)
}
