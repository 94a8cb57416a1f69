// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read access to region files.

use crate::anvil::{ChunkId, ChunkLocation, RegionError, SECTOR_SIZE};
use crate::compress::{self, CompressionType};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// A memory-mapped Anvil region file.
///
/// Both header tables are decoded eagerly so chunk lookups are cheap;
/// chunk payloads are read lazily from the mapping.
pub struct Region {
    mmap: Mmap,
    locations: [ChunkLocation; 1024],
    timestamps: [u32; 1024],
}

impl Region {
    /// Opens an Anvil region file and memory-maps it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RegionError> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SECTOR_SIZE * 2 {
            return Err(RegionError::FileTooSmall(mmap.len() as u64));
        }

        let mut locations = [ChunkLocation::EMPTY; 1024];
        let mut timestamps = [0u32; 1024];

        for i in 0..1024 {
            let start = i * 4;
            let word = u32::from_be_bytes(mmap[start..start + 4].try_into().unwrap());
            locations[i] = ChunkLocation::from_word(word);
        }

        for i in 0..1024 {
            let start = SECTOR_SIZE + i * 4;
            timestamps[i] = u32::from_be_bytes(mmap[start..start + 4].try_into().unwrap());
        }

        Ok(Region {
            mmap,
            locations,
            timestamps,
        })
    }

    /// The offset-table entry for a chunk. Coordinates wrap modulo 32, so
    /// world-absolute chunk ids address their slot directly.
    pub fn location(&self, chunk: ChunkId) -> ChunkLocation {
        self.locations[chunk.local_index()]
    }

    /// The last-modification timestamp recorded for a chunk. Carried for
    /// inspection only; nothing in this crate writes it back.
    pub fn timestamp(&self, chunk: ChunkId) -> u32 {
        self.timestamps[chunk.local_index()]
    }

    /// Retrieves the decompressed payload of a chunk.
    ///
    /// Returns `Ok(None)` when the chunk was never generated (its offset
    /// word is zero) — a distinguished result, not an error.
    pub fn chunk_data(&self, chunk: ChunkId) -> Result<Option<Vec<u8>>, RegionError> {
        let location = self.location(chunk);
        if location.is_empty() {
            return Ok(None);
        }
        if location.offset < 2 {
            return Err(RegionError::IllegalRange);
        }

        let start = location.offset as usize * SECTOR_SIZE;
        if start + 5 > self.mmap.len() {
            return Err(RegionError::IllegalRange);
        }

        let length = u32::from_be_bytes(self.mmap[start..start + 4].try_into().unwrap());
        let compression_byte = self.mmap[start + 4];

        let compression =
            CompressionType::try_from(compression_byte).map_err(|_| RegionError::InvalidHeader {
                compression: compression_byte,
                length,
            })?;
        if length == 0 {
            return Err(RegionError::InvalidHeader {
                compression: compression_byte,
                length,
            });
        }

        // The stored length counts the compression byte, so the body is
        // length - 1 bytes. It must fit both its sector allocation and
        // the file.
        let body_len = length as usize - 1;
        if length as usize + 4 > location.sector_count as usize * SECTOR_SIZE
            || start + 5 + body_len > self.mmap.len()
        {
            return Err(RegionError::IllegalRange);
        }

        let body = &self.mmap[start + 5..start + 5 + body_len];
        let decoded = compress::inflate(body, compression)?;
        Ok(Some(decoded))
    }
}

/// Loads the decompressed payload of one chunk from a region directory.
///
/// Builds `<folder>/r.<rx>.<rz>.mca` from the chunk's region and reads the
/// chunk through [`Region`]. `Ok(None)` means the chunk was never
/// generated.
pub fn load_chunk<P: AsRef<Path>>(
    folder: P,
    chunk: ChunkId,
) -> Result<Option<Vec<u8>>, RegionError> {
    let path = folder.as_ref().join(chunk.region().file_name());
    let region = Region::open(path)?;
    region.chunk_data(chunk)
}
