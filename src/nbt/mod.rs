// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core NBT data structures and types.

pub mod encode;
pub mod mutf8;
pub mod parse;

use indexmap::IndexMap;
use std::fmt;

/// The kind byte of an NBT tag, as stored on disk.
///
/// This format generation has twelve kinds; any other byte value is a
/// parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
}

impl TagKind {
    /// Maps an on-disk kind byte to its `TagKind`, or `None` for an
    /// unknown byte.
    pub fn from_u8(id: u8) -> Option<TagKind> {
        match id {
            0 => Some(TagKind::End),
            1 => Some(TagKind::Byte),
            2 => Some(TagKind::Short),
            3 => Some(TagKind::Int),
            4 => Some(TagKind::Long),
            5 => Some(TagKind::Float),
            6 => Some(TagKind::Double),
            7 => Some(TagKind::ByteArray),
            8 => Some(TagKind::String),
            9 => Some(TagKind::List),
            10 => Some(TagKind::Compound),
            11 => Some(TagKind::IntArray),
            _ => None,
        }
    }
}

/// A raw NBT string: the on-disk bytes of a name or string payload.
///
/// NBT strings are Modified UTF-8 on disk. The codec passes them through
/// untouched so that every valid stream round-trips byte-for-byte; callers
/// that want text go through [`NbtString::to_str`] and
/// [`NbtString::from`](From::from).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NbtString(pub Vec<u8>);

impl NbtString {
    pub fn new(bytes: Vec<u8>) -> Self {
        NbtString(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes the bytes as Modified UTF-8.
    pub fn to_str(&self) -> Result<String, mutf8::Mutf8Error> {
        mutf8::decode_mutf8(&self.0)
    }
}

impl From<&str> for NbtString {
    fn from(s: &str) -> Self {
        NbtString(mutf8::encode_mutf8(s))
    }
}

impl fmt::Display for NbtString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_str() {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{:02X?}", self.0),
        }
    }
}

/// A list of unnamed payloads sharing one declared element kind.
///
/// Elements carry no per-element headers on disk; the kind byte and the
/// element count prefix the whole sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtList {
    /// The declared element kind.
    pub element_kind: TagKind,
    /// The declared on-disk element count. Only authoritative when
    /// `element_kind` is `End`, where elements cannot be materialized but
    /// the count must survive a round trip; for every other kind the
    /// composer writes `elements.len()`.
    pub size: i32,
    /// The elements, each a bare payload of `element_kind`.
    pub elements: Vec<NbtTag>,
}

impl NbtList {
    /// Builds a list whose declared size matches its elements.
    pub fn new(element_kind: TagKind, elements: Vec<NbtTag>) -> Self {
        let size = elements.len() as i32;
        NbtList {
            element_kind,
            size,
            elements,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Represents a Minecraft NBT (Named Binary Tag).
///
/// NBT is a tree-based storage format used by Minecraft for player data,
/// level data, and chunks. Each value exclusively owns its children; the
/// recursive teardown of the whole tree is `Drop`.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtTag {
    /// Marker tag used to signify the end of a `Compound` tag.
    End,
    /// A single signed byte.
    Byte(i8),
    /// A 16-bit signed integer.
    Short(i16),
    /// A 32-bit signed integer.
    Int(i32),
    /// A 64-bit signed integer.
    Long(i64),
    /// A 32-bit floating point number.
    Float(f32),
    /// A 64-bit floating point number.
    Double(f64),
    /// An array of bytes.
    ByteArray(Vec<u8>),
    /// A raw Modified UTF-8 string.
    String(NbtString),
    /// A list of payloads of the same kind.
    List(NbtList),
    /// A map of named tags. Uses `IndexMap` to preserve field order.
    Compound(IndexMap<NbtString, NbtTag>),
    /// An array of 32-bit signed integers.
    IntArray(Vec<i32>),
}

impl NbtTag {
    pub fn kind(&self) -> TagKind {
        match self {
            NbtTag::End => TagKind::End,
            NbtTag::Byte(_) => TagKind::Byte,
            NbtTag::Short(_) => TagKind::Short,
            NbtTag::Int(_) => TagKind::Int,
            NbtTag::Long(_) => TagKind::Long,
            NbtTag::Float(_) => TagKind::Float,
            NbtTag::Double(_) => TagKind::Double,
            NbtTag::ByteArray(_) => TagKind::ByteArray,
            NbtTag::String(_) => TagKind::String,
            NbtTag::List(_) => TagKind::List,
            NbtTag::Compound(_) => TagKind::Compound,
            NbtTag::IntArray(_) => TagKind::IntArray,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_bytes_round_trip() {
        for id in 0u8..=11 {
            let kind = TagKind::from_u8(id).unwrap();
            assert_eq!(kind as u8, id);
        }
        assert_eq!(TagKind::from_u8(12), None);
        assert_eq!(TagKind::from_u8(0xFF), None);
    }

    #[test]
    fn test_nbt_string_text_round_trip() {
        let s = NbtString::from("MineShaft");
        assert_eq!(s.as_bytes(), b"MineShaft");
        assert_eq!(s.to_str().unwrap(), "MineShaft");
    }

    #[test]
    fn test_list_new_sets_size() {
        let list = NbtList::new(TagKind::Byte, vec![NbtTag::Byte(1), NbtTag::Byte(2)]);
        assert_eq!(list.size, 2);
        assert_eq!(list.len(), 2);
    }
}
