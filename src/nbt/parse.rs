// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Manual recursive-descent parser for the NBT binary format.

use crate::nbt::{NbtList, NbtString, NbtTag, TagKind};
use indexmap::IndexMap;
use thiserror::Error;

/// Errors that can occur during NBT parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input ended before a tag or field could be fully read.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// An unknown NBT kind byte was encountered.
    #[error("invalid tag kind: {0}")]
    InvalidKind(u8),
    /// A list or array carried a negative element count.
    #[error("invalid length: {0}")]
    InvalidLength(i32),
}

/// A reader that maintains a cursor over a byte slice for manual parsing.
pub struct ByteReader<'a> {
    /// The remaining data to be read.
    pub data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, ParseError> {
        if self.data.is_empty() {
            return Err(ParseError::UnexpectedEof);
        }
        let b = self.data[0];
        self.data = &self.data[1..];
        Ok(b)
    }

    #[inline]
    fn read_i8(&mut self) -> Result<i8, ParseError> {
        self.read_u8().map(|b| b as i8)
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, ParseError> {
        if self.data.len() < 2 {
            return Err(ParseError::UnexpectedEof);
        }
        let bytes = [self.data[0], self.data[1]];
        self.data = &self.data[2..];
        Ok(u16::from_be_bytes(bytes))
    }

    #[inline]
    fn read_i16(&mut self) -> Result<i16, ParseError> {
        self.read_u16().map(|v| v as i16)
    }

    #[inline]
    fn read_i32(&mut self) -> Result<i32, ParseError> {
        if self.data.len() < 4 {
            return Err(ParseError::UnexpectedEof);
        }
        let bytes = [self.data[0], self.data[1], self.data[2], self.data[3]];
        self.data = &self.data[4..];
        Ok(i32::from_be_bytes(bytes))
    }

    #[inline]
    fn read_i64(&mut self) -> Result<i64, ParseError> {
        if self.data.len() < 8 {
            return Err(ParseError::UnexpectedEof);
        }
        let bytes: [u8; 8] = self.data[..8].try_into().unwrap();
        self.data = &self.data[8..];
        Ok(i64::from_be_bytes(bytes))
    }

    #[inline]
    fn read_f32(&mut self) -> Result<f32, ParseError> {
        self.read_i32().map(|v| f32::from_bits(v as u32))
    }

    #[inline]
    fn read_f64(&mut self) -> Result<f64, ParseError> {
        self.read_i64().map(|v| f64::from_bits(v as u64))
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ParseError> {
        if self.data.len() < len {
            return Err(ParseError::UnexpectedEof);
        }
        let bytes = &self.data[..len];
        self.data = &self.data[len..];
        Ok(bytes)
    }

    /// Reads a signed 32-bit element count, rejecting negative values.
    #[inline]
    fn read_len(&mut self) -> Result<usize, ParseError> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(ParseError::InvalidLength(len));
        }
        Ok(len as usize)
    }
}

/// Parses a length-prefixed raw string (a name or a string payload).
pub fn parse_nbt_string(reader: &mut ByteReader) -> Result<NbtString, ParseError> {
    let len = reader.read_u16()? as usize;
    let bytes = reader.read_bytes(len)?;
    Ok(NbtString::new(bytes.to_vec()))
}

/// Parses the payload of an NBT tag based on its kind.
pub fn parse_tag_payload(reader: &mut ByteReader, kind: TagKind) -> Result<NbtTag, ParseError> {
    match kind {
        TagKind::End => Ok(NbtTag::End),
        TagKind::Byte => Ok(NbtTag::Byte(reader.read_i8()?)),
        TagKind::Short => Ok(NbtTag::Short(reader.read_i16()?)),
        TagKind::Int => Ok(NbtTag::Int(reader.read_i32()?)),
        TagKind::Long => Ok(NbtTag::Long(reader.read_i64()?)),
        TagKind::Float => Ok(NbtTag::Float(reader.read_f32()?)),
        TagKind::Double => Ok(NbtTag::Double(reader.read_f64()?)),
        TagKind::ByteArray => {
            let len = reader.read_len()?;
            let bytes = reader.read_bytes(len)?;
            Ok(NbtTag::ByteArray(bytes.to_vec()))
        }
        TagKind::String => Ok(NbtTag::String(parse_nbt_string(reader)?)),
        TagKind::List => {
            let element_byte = reader.read_u8()?;
            let element_kind =
                TagKind::from_u8(element_byte).ok_or(ParseError::InvalidKind(element_byte))?;
            let size = reader.read_i32()?;
            if size < 0 {
                return Err(ParseError::InvalidLength(size));
            }
            // An End-kind list carries a size but no representable
            // elements; the declared size is kept for the composer.
            let mut elements = Vec::new();
            if element_kind != TagKind::End {
                elements.reserve(size as usize);
                for _ in 0..size {
                    elements.push(parse_tag_payload(reader, element_kind)?);
                }
            }
            Ok(NbtTag::List(NbtList {
                element_kind,
                size,
                elements,
            }))
        }
        TagKind::Compound => {
            let mut map = IndexMap::new();
            loop {
                let kind_byte = reader.read_u8()?;
                if kind_byte == 0 {
                    break;
                }
                let child_kind =
                    TagKind::from_u8(kind_byte).ok_or(ParseError::InvalidKind(kind_byte))?;
                let name = parse_nbt_string(reader)?;
                let payload = parse_tag_payload(reader, child_kind)?;
                map.insert(name, payload);
            }
            Ok(NbtTag::Compound(map))
        }
        TagKind::IntArray => {
            let len = reader.read_len()?;
            let byte_len = len
                .checked_mul(4)
                .ok_or(ParseError::InvalidLength(len as i32))?;
            let bytes = reader.read_bytes(byte_len)?;
            let mut ints = Vec::with_capacity(len);
            for chunk in bytes.chunks_exact(4) {
                ints.push(i32::from_be_bytes(chunk.try_into().unwrap()));
            }
            Ok(NbtTag::IntArray(ints))
        }
    }
}

/// Parses a named tag (kind byte + name + payload) from the input.
///
/// This is the entry point for parsing top-level NBT data (like
/// `level.dat` or a chunk body). On success, returns the raw name and the
/// tag, and advances `input` past the consumed bytes so callers can keep
/// reading; the consumed count is the difference in slice lengths. An End
/// kind byte consumes exactly one byte and yields an empty name.
pub fn parse_named_tag(input: &mut &[u8]) -> Result<(NbtString, NbtTag), ParseError> {
    let mut reader = ByteReader::new(input);
    let kind_byte = reader.read_u8()?;
    let Some(kind) = TagKind::from_u8(kind_byte) else {
        return Err(ParseError::InvalidKind(kind_byte));
    };
    if kind == TagKind::End {
        *input = reader.data;
        return Ok((NbtString::default(), NbtTag::End));
    }
    let name = parse_nbt_string(&mut reader)?;
    let payload = parse_tag_payload(&mut reader, kind)?;
    *input = reader.data;
    Ok((name, payload))
}
