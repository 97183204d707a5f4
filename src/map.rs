use std::io::Read;

use tracing::info;

use crate::entity::{Entity, parse_entities};
use crate::error::Result;
use crate::extras::{ExtraEntityInfo, skip_most_recently_used};
use crate::game::parse_game_identifier;
use crate::header::Header;
use crate::stream::OgzReader;
use crate::vars::{MapVar, parse_map_vars};

/// Everything decoded from an OGZ stream up to the end of its entity list.
#[derive(Clone, Debug, PartialEq)]
pub struct OgzMap {
    pub header: Header,
    pub vars: Vec<MapVar>,
    pub game: String,
    pub extra_entity_info: ExtraEntityInfo,
    pub entities: Vec<Entity>,
    /// Bytes consumed from the stream, i.e. the offset right after the last entity.
    pub bytes_consumed: u64,
}

impl OgzMap {
    /// Decodes sections in file order and stops after the entities. World
    /// geometry that follows is never read.
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let mut reader = OgzReader::new(reader);
        let header = Header::parse(&mut reader)?;
        let vars = parse_map_vars(&mut reader, header.num_vars)?;
        let game = parse_game_identifier(&mut reader, header.version)?;
        let extra_entity_info = ExtraEntityInfo::parse(&mut reader, header.version)?;
        skip_most_recently_used(&mut reader, header.version)?;
        let entities = parse_entities(
            &mut reader,
            header.num_ents,
            extra_entity_info.entity_extra_len,
        )?;

        let bytes_consumed = reader.position();
        info!(
            version = header.version,
            entities = entities.len(),
            bytes_consumed,
            "decoded OGZ"
        );
        Ok(Self {
            header,
            vars,
            game,
            extra_entity_info,
            entities,
            bytes_consumed,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from(bytes)
    }
}
