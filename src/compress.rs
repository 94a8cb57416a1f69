// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Gzip/zlib compression adapter.
//!
//! Anvil chunk payloads and standalone NBT databases use the same deflate
//! bitstream behind two different framings, selected by a one-byte tag in
//! the chunk header. This module unifies both behind a single
//! [`inflate`]/[`deflate`] pair operating on in-memory buffers.

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::ZlibEncoder;
use flate2::{Compression, GzBuilder};
use std::io::{self, Read, Write};
use thiserror::Error;

/// Supported compression framings for chunk data.
///
/// The discriminants are the on-disk compression-type byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompressionType {
    /// Gzip framing (standard for .dat databases, rare in .mca chunks).
    Gzip = 1,
    /// Zlib framing (standard for .mca chunks).
    Zlib = 2,
}

/// Error returned when a compression-type byte is outside the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown compression type: {0}")]
pub struct UnknownCompression(pub u8);

impl TryFrom<u8> for CompressionType {
    type Error = UnknownCompression;

    fn try_from(value: u8) -> Result<Self, UnknownCompression> {
        match value {
            1 => Ok(CompressionType::Gzip),
            2 => Ok(CompressionType::Zlib),
            _ => Err(UnknownCompression(value)),
        }
    }
}

/// Errors from the inflate/deflate primitives.
///
/// No partial output accompanies any of these; the caller either gets a
/// complete buffer or an error.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// The decoder failed mid-stream (corrupt or truncated input).
    #[error("decompression failed: {0}")]
    Decode(#[source] io::Error),
    /// The encoder failed while consuming input.
    #[error("compression failed: {0}")]
    Encode(#[source] io::Error),
    /// The encoder failed while finalizing the stream.
    #[error("compression could not be finalized: {0}")]
    Finish(#[source] io::Error),
}

/// Decompresses `data` with the given framing into a fresh buffer.
pub fn inflate(data: &[u8], compression: CompressionType) -> Result<Vec<u8>, CompressionError> {
    let mut decoded = Vec::with_capacity(data.len().saturating_mul(2));
    match compression {
        CompressionType::Gzip => {
            GzDecoder::new(data)
                .read_to_end(&mut decoded)
                .map_err(CompressionError::Decode)?;
        }
        CompressionType::Zlib => {
            ZlibDecoder::new(data)
                .read_to_end(&mut decoded)
                .map_err(CompressionError::Decode)?;
        }
    }
    Ok(decoded)
}

/// Compresses `data` with the given framing at the default level.
///
/// Gzip output is reproducible byte-for-byte across platforms: the header
/// carries mtime 0 and the OS-identification byte at offset 9 is forced to
/// `0x00` (FAT/DOS).
pub fn deflate(data: &[u8], compression: CompressionType) -> Result<Vec<u8>, CompressionError> {
    match compression {
        CompressionType::Gzip => {
            let mut encoder = GzBuilder::new()
                .mtime(0)
                .operating_system(0)
                .write(Vec::new(), Compression::default());
            encoder.write_all(data).map_err(CompressionError::Encode)?;
            encoder.finish().map_err(CompressionError::Finish)
        }
        CompressionType::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data).map_err(CompressionError::Encode)?;
            encoder.finish().map_err(CompressionError::Finish)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_zlib() {
        let data = b"chunk payload chunk payload chunk payload".to_vec();
        let compressed = deflate(&data, CompressionType::Zlib).unwrap();
        let restored = inflate(&compressed, CompressionType::Zlib).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_round_trip_gzip() {
        let data = b"chunk payload chunk payload chunk payload".to_vec();
        let compressed = deflate(&data, CompressionType::Gzip).unwrap();
        let restored = inflate(&compressed, CompressionType::Gzip).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_round_trip_empty() {
        for compression in [CompressionType::Gzip, CompressionType::Zlib] {
            let compressed = deflate(&[], compression).unwrap();
            assert_eq!(inflate(&compressed, compression).unwrap(), Vec::<u8>::new());
        }
    }

    #[test]
    fn test_gzip_deterministic() {
        let data = vec![7u8; 10_000];
        let a = deflate(&data, CompressionType::Gzip).unwrap();
        let b = deflate(&data, CompressionType::Gzip).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_gzip_header_magic_and_os_byte() {
        let compressed = deflate(b"level.dat", CompressionType::Gzip).unwrap();
        assert_eq!(&compressed[..2], &[0x1F, 0x8B]);
        assert_eq!(compressed[9], 0x00);
    }

    #[test]
    fn test_inflate_rejects_wrong_framing() {
        let compressed = deflate(b"data", CompressionType::Zlib).unwrap();
        assert!(inflate(&compressed, CompressionType::Gzip).is_err());
    }

    #[test]
    fn test_compression_type_from_byte() {
        assert_eq!(CompressionType::try_from(1), Ok(CompressionType::Gzip));
        assert_eq!(CompressionType::try_from(2), Ok(CompressionType::Zlib));
        assert_eq!(CompressionType::try_from(3), Err(UnknownCompression(3)));
    }
}
