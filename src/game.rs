use std::io::Read;

use tracing::debug;

use crate::error::{OgzError, Result, Section};
use crate::stream::OgzReader;
use crate::util::lossy_str;

/// Game identifier assumed for maps written before the field existed.
pub const DEFAULT_GAME: &str = "fps";

/// First version that stores the game identifier and extra entity info.
pub const GAME_IDENT_VERSION: i32 = 16;

/// Reads the length-prefixed, zero-terminated game identifier.
pub fn parse_game_identifier<R: Read>(reader: &mut OgzReader<R>, version: i32) -> Result<String> {
    if version < GAME_IDENT_VERSION {
        return Ok(DEFAULT_GAME.to_owned());
    }

    let location = reader.locate(Section::GameIdentifier);
    let len = reader.read_u8_in(location)? as usize;
    // label plus terminating zero byte
    let bytes = reader.read_vec(len + 1, location)?;
    if bytes[len] != 0 {
        return Err(OgzError::MissingTerminator {
            location,
            found: bytes[len],
        });
    }

    let game = lossy_str(&bytes[..len]).into_owned();
    debug!(%game, "parsed game identifier");
    Ok(game)
}
