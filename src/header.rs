use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OgzError, Result, Section};
use crate::stream::OgzReader;

pub const MAGIC: &[u8; 4] = b"OCTA";
pub const MIN_HEADER_SIZE: i32 = 36;

/// magic, version, headersize, worldsize, numents, numpvs, lightmaps
pub const FIXED_HEADER_LEN: i32 = 7 * 4;

/// First version with a map variables section (and a 32-bit header size).
pub const VARS_VERSION: i32 = 29;
/// First version whose header carries `numvslots`.
pub const VSLOTS_VERSION: i32 = 30;

/// The fixed header fields following the magic.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct HeaderFields {
    pub version: i32,
    pub header_size: i32,
    pub world_size: i32,
    pub num_ents: i32,
    pub num_pvs: i32,
    pub num_lightmaps: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub version: i32,
    /// Effective header size; the low byte of the raw field for versions before 29.
    pub header_size: i32,
    pub world_size: i32,
    pub num_ents: i32,
    pub num_pvs: i32,
    pub num_lightmaps: i32,
    pub num_vars: u32,
    /// Everything after the fixed fields, up to `header_size`.
    pub tail: Vec<u8>,
}

impl Header {
    pub fn parse<R: Read>(reader: &mut OgzReader<R>) -> Result<Self> {
        let location = reader.locate(Section::Header);
        let mut magic = [0u8; 4];
        reader.read_exact_in(&mut magic, location)?;
        if &magic != MAGIC {
            return Err(OgzError::BadMagic { found: magic });
        }

        let fields: HeaderFields = reader.deserialize_in(location)?;
        if fields.header_size < MIN_HEADER_SIZE {
            return Err(OgzError::HeaderTooShort {
                size: fields.header_size,
            });
        }

        let header_size = if fields.version < VARS_VERSION {
            // Old writers stored the header size as a uint8 followed by three
            // unrelated bytes, which we just read as part of an int32.
            fields.header_size & 0xFF
        } else {
            fields.header_size
        };
        if header_size < MIN_HEADER_SIZE {
            return Err(OgzError::HeaderTooShort { size: header_size });
        }

        let tail_location = reader.locate(Section::HeaderTail);
        let tail = reader.read_vec((header_size - FIXED_HEADER_LEN) as usize, tail_location)?;

        let num_vars = if fields.version < VARS_VERSION {
            0
        } else {
            // Second field of the tail, after blendmap.
            u32::from_le_bytes([tail[4], tail[5], tail[6], tail[7]])
        };

        debug!(
            version = fields.version,
            header_size,
            num_ents = fields.num_ents,
            num_vars,
            "parsed OGZ header"
        );

        Ok(Self {
            version: fields.version,
            header_size,
            world_size: fields.world_size,
            num_ents: fields.num_ents,
            num_pvs: fields.num_pvs,
            num_lightmaps: fields.num_lightmaps,
            num_vars,
            tail,
        })
    }

    fn tail_i32(&self, offset: usize) -> Option<i32> {
        let bytes = self.tail.get(offset..offset + 4)?;
        Some(i32::from_le_bytes(bytes.try_into().ok()?))
    }

    pub fn blendmap(&self) -> Option<i32> {
        if self.version < VARS_VERSION {
            return None;
        }
        self.tail_i32(0)
    }

    pub fn num_vslots(&self) -> Option<i32> {
        if self.version < VSLOTS_VERSION {
            return None;
        }
        self.tail_i32(8)
    }
}
