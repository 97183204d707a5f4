use std::io::Read;

use tracing::debug;

use crate::error::{OgzError, Result, Section};
use crate::stream::OgzReader;
use crate::util::{escape_form_feeds, lossy_str};

pub const VAR_TYPE_INT: u8 = 0;
pub const VAR_TYPE_FLOAT: u8 = 1;
pub const VAR_TYPE_STRING: u8 = 2;

#[derive(Clone, Debug, PartialEq)]
pub enum MapVarValue {
    Int(i32),
    Float(f32),
    Str(Vec<u8>),
}

impl MapVarValue {
    pub fn type_tag(&self) -> u8 {
        match self {
            MapVarValue::Int(_) => VAR_TYPE_INT,
            MapVarValue::Float(_) => VAR_TYPE_FLOAT,
            MapVarValue::Str(_) => VAR_TYPE_STRING,
        }
    }
}

impl std::fmt::Display for MapVarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapVarValue::Int(value) => write!(f, "{}", value),
            MapVarValue::Float(value) => write!(f, "{}", value),
            MapVarValue::Str(value) => f.write_str(&escape_form_feeds(&lossy_str(value))),
        }
    }
}

/// A named map variable. Names are not guaranteed to be unique.
#[derive(Clone, Debug, PartialEq)]
pub struct MapVar {
    pub name: Vec<u8>,
    pub value: MapVarValue,
}

impl MapVar {
    pub fn name_str(&self) -> std::borrow::Cow<'_, str> {
        lossy_str(&self.name)
    }

    fn parse<R: Read>(reader: &mut OgzReader<R>, index: usize) -> Result<Self> {
        let location = reader.locate(Section::MapVars).at(index);
        let tag = reader.read_u8_in(location)?;
        let name_len = reader.read_u16_in(location)?;
        let name = reader.read_vec(name_len as usize, location)?;
        let value = match tag {
            VAR_TYPE_INT => MapVarValue::Int(reader.read_i32_in(location)?),
            VAR_TYPE_FLOAT => MapVarValue::Float(reader.read_f32_in(location)?),
            VAR_TYPE_STRING => {
                let value_len = reader.read_u16_in(location)?;
                MapVarValue::Str(reader.read_vec(value_len as usize, location)?)
            }
            tag => return Err(OgzError::UnknownVarType { location, tag }),
        };
        Ok(Self { name, value })
    }
}

/// Reads `num_vars` variables in file order.
pub fn parse_map_vars<R: Read>(reader: &mut OgzReader<R>, num_vars: u32) -> Result<Vec<MapVar>> {
    let mut vars = Vec::with_capacity((num_vars as usize).min(1024));
    for i in 0..num_vars as usize {
        vars.push(MapVar::parse(reader, i)?);
    }
    debug!(count = vars.len(), "parsed map variables");
    Ok(vars)
}
