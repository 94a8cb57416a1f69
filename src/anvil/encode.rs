// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Write access to region files: in-place chunk overwrites and whole-file
//! creation.

use crate::anvil::{ChunkId, ChunkLocation, RegionError, SECTOR_SIZE};
use crate::compress::{self, CompressionType};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

/// Replaces the payload of an already-generated chunk in place.
///
/// The rewrite reuses the chunk's existing sector run and compression
/// framing. If the compressed payload no longer fits the allocated
/// sectors, the call returns [`RegionError::InsufficientSpace`] and the
/// file is left byte-identical; growing a chunk is a policy decision left
/// to callers above this crate. The region file must already exist — this
/// crate never creates one here (see [`RegionWriter`] for that).
///
/// The timestamp table is deliberately not touched.
pub fn overwrite_chunk<P: AsRef<Path>>(
    folder: P,
    chunk: ChunkId,
    payload: &[u8],
) -> Result<(), RegionError> {
    let path = folder.as_ref().join(chunk.region().file_name());
    let mut file = File::options().read(true).write(true).open(path)?;

    file.seek(SeekFrom::Start(chunk.local_index() as u64 * 4))?;
    let location = ChunkLocation::from_word(file.read_u32::<BigEndian>()?);
    if location.is_empty() {
        return Err(RegionError::EmptyChunk);
    }
    if location.offset < 2 || location.sector_count == 0 {
        return Err(RegionError::IllegalRange);
    }

    // The existing header tells us which framing to keep.
    let sector_start = location.offset as u64 * SECTOR_SIZE as u64;
    file.seek(SeekFrom::Start(sector_start))?;
    let existing_length = file.read_u32::<BigEndian>()?;
    let compression_byte = file.read_u8()?;
    let compression =
        CompressionType::try_from(compression_byte).map_err(|_| RegionError::InvalidHeader {
            compression: compression_byte,
            length: existing_length,
        })?;

    let compressed = compress::deflate(payload, compression)?;

    let body_capacity = location.sector_count as usize * SECTOR_SIZE - 5;
    if compressed.len() + 1 > body_capacity {
        return Err(RegionError::InsufficientSpace {
            needed: compressed.len() + 1,
            capacity: body_capacity,
        });
    }

    // Header and body go out as one buffer at the original sector start,
    // after every check has passed; refusal paths never write. Trailing
    // sector padding is left as-is.
    let mut buf = Vec::with_capacity(5 + compressed.len());
    buf.write_u32::<BigEndian>(compressed.len() as u32 + 1)?;
    buf.write_u8(compression_byte)?;
    buf.extend_from_slice(&compressed);

    file.seek(SeekFrom::Start(sector_start))?;
    file.write_all(&buf)?;
    file.flush()?;
    Ok(())
}

/// A writer for creating complete Anvil region files.
pub struct RegionWriter<W: Write + Seek> {
    writer: W,
}

impl<W: Write + Seek> RegionWriter<W> {
    /// Creates a new `RegionWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        RegionWriter { writer }
    }

    /// Writes all provided chunks to the region file.
    ///
    /// Each payload is compressed with the given framing and laid out
    /// from sector 2 on, padded to sector boundaries; the offset table is
    /// filled accordingly and the timestamp table zeroed. Chunk ids wrap
    /// modulo 32 into their slots.
    pub fn write_all_chunks(
        &mut self,
        chunks: &[(ChunkId, &[u8])],
        compression: CompressionType,
    ) -> Result<(), RegionError> {
        let mut locations = [ChunkLocation::EMPTY; 1024];

        // Move past header space (offset table + timestamp table).
        self.writer.seek(SeekFrom::Start(SECTOR_SIZE as u64 * 2))?;
        let mut current_sector = 2u32;

        for (chunk, payload) in chunks {
            let compressed = compress::deflate(payload, compression)?;

            let total_len = compressed.len() + 1; // +1 for compression type byte
            let sectors_needed = (total_len + 4).div_ceil(SECTOR_SIZE);
            if sectors_needed > 0xFF {
                return Err(RegionError::IllegalRange);
            }

            locations[chunk.local_index()] = ChunkLocation {
                offset: current_sector,
                sector_count: sectors_needed as u8,
            };

            self.writer
                .seek(SeekFrom::Start(current_sector as u64 * SECTOR_SIZE as u64))?;
            self.writer.write_u32::<BigEndian>(total_len as u32)?;
            self.writer.write_u8(compression as u8)?;
            self.writer.write_all(&compressed)?;

            // Pad to the sector boundary.
            let padding = (sectors_needed * SECTOR_SIZE) - (total_len + 4);
            if padding > 0 {
                self.writer.write_all(&vec![0u8; padding])?;
            }

            current_sector += sectors_needed as u32;
        }

        // Write headers back at the start.
        self.writer.seek(SeekFrom::Start(0))?;
        for loc in &locations {
            self.writer.write_u32::<BigEndian>(loc.to_word())?;
        }

        // Timestamps (all zero; this crate never maintains them).
        for _ in 0..1024 {
            self.writer.write_all(&[0u8; 4])?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
