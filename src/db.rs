// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Standalone NBT database files (`level.dat` and friends).

use crate::compress::{self, CompressionError, CompressionType};
use std::io;
use std::path::Path;
use thiserror::Error;

/// The first two bytes of a gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Errors from loading an NBT database file.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Compression(#[from] CompressionError),
}

/// Reads a whole NBT database file into memory.
///
/// Files starting with the gzip magic are inflated with the gzip framing;
/// anything else is returned as-is. The caller hands the bytes to the tag
/// codec ([`crate::nbt::parse::parse_named_tag`]).
pub fn load_db<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, DbError> {
    let data = std::fs::read(path)?;
    if data.len() >= 2 && data[..2] == GZIP_MAGIC {
        return Ok(compress::inflate(&data, CompressionType::Gzip)?);
    }
    Ok(data)
}
