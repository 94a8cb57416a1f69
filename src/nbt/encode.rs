// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Composer: the byte-exact inverse of the parser.

use crate::nbt::{NbtString, NbtTag, TagKind};
use byteorder::{BigEndian, WriteBytesExt};
use std::io::{Result, Write};

/// Writes a length-prefixed raw string (a name or a string payload).
pub fn write_nbt_string<W: Write>(writer: &mut W, s: &NbtString) -> Result<()> {
    writer.write_u16::<BigEndian>(s.len() as u16)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

/// Writes the payload of an NBT tag to the writer.
///
/// This does not include the kind byte or the name of the tag.
pub fn write_tag_payload<W: Write>(writer: &mut W, tag: &NbtTag) -> Result<()> {
    match tag {
        NbtTag::End => Ok(()),
        NbtTag::Byte(v) => writer.write_i8(*v),
        NbtTag::Short(v) => writer.write_i16::<BigEndian>(*v),
        NbtTag::Int(v) => writer.write_i32::<BigEndian>(*v),
        NbtTag::Long(v) => writer.write_i64::<BigEndian>(*v),
        NbtTag::Float(v) => writer.write_f32::<BigEndian>(*v),
        NbtTag::Double(v) => writer.write_f64::<BigEndian>(*v),
        NbtTag::ByteArray(v) => {
            writer.write_i32::<BigEndian>(v.len() as i32)?;
            writer.write_all(v)
        }
        NbtTag::String(v) => write_nbt_string(writer, v),
        NbtTag::List(list) => {
            // The element kind is stored, never inferred from the first
            // element: an empty list of Lists keeps kind 9 on disk, and an
            // End-kind list keeps its declared size.
            writer.write_u8(list.element_kind as u8)?;
            let size = if list.element_kind == TagKind::End {
                list.size
            } else {
                list.elements.len() as i32
            };
            writer.write_i32::<BigEndian>(size)?;
            for element in &list.elements {
                write_tag_payload(writer, element)?;
            }
            Ok(())
        }
        NbtTag::Compound(v) => {
            for (name, tag) in v {
                writer.write_u8(tag.kind() as u8)?;
                write_nbt_string(writer, name)?;
                write_tag_payload(writer, tag)?;
            }
            writer.write_u8(0)?; // Tag_End
            Ok(())
        }
        NbtTag::IntArray(v) => {
            writer.write_i32::<BigEndian>(v.len() as i32)?;
            for &i in v {
                writer.write_i32::<BigEndian>(i)?;
            }
            Ok(())
        }
    }
}

/// Writes a named tag (kind byte + name + payload) to the writer.
///
/// This is the standard way to encode a root NBT tag for storage. An End
/// tag composes to the single byte `0x00` with no name or payload.
pub fn write_named_tag<W: Write>(writer: &mut W, name: &NbtString, tag: &NbtTag) -> Result<()> {
    if let NbtTag::End = tag {
        return writer.write_u8(0);
    }
    writer.write_u8(tag.kind() as u8)?;
    write_nbt_string(writer, name)?;
    write_tag_payload(writer, tag)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nbt::NbtList;
    use crate::nbt::parse::parse_named_tag;
    use indexmap::IndexMap;

    #[test]
    fn test_write_string() {
        let mut buf = Vec::new();
        write_nbt_string(&mut buf, &NbtString::from("hi!")).unwrap();
        assert_eq!(buf, vec![0, 3, b'h', b'i', b'!']);
    }

    #[test]
    fn test_write_end_tag() {
        let mut buf = Vec::new();
        write_named_tag(&mut buf, &NbtString::default(), &NbtTag::End).unwrap();
        assert_eq!(buf, vec![0x00]);
    }

    #[test]
    fn test_compound_bytes() {
        let mut map = IndexMap::new();
        map.insert(NbtString::from("foo"), NbtTag::Byte(0x2A));
        let root = NbtTag::Compound(map);

        let mut buf = Vec::new();
        write_named_tag(&mut buf, &NbtString::default(), &root).unwrap();
        assert_eq!(
            buf,
            vec![0x0A, 0x00, 0x00, 0x01, 0x00, 0x03, b'f', b'o', b'o', 0x2A, 0x00]
        );
    }

    #[test]
    fn test_empty_list_keeps_element_kind() {
        let list = NbtTag::List(NbtList::new(TagKind::List, Vec::new()));
        let mut buf = Vec::new();
        write_tag_payload(&mut buf, &list).unwrap();
        assert_eq!(buf, vec![0x09, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_end_list_keeps_declared_size() {
        let list = NbtTag::List(NbtList {
            element_kind: TagKind::End,
            size: 5,
            elements: Vec::new(),
        });
        let mut buf = Vec::new();
        write_tag_payload(&mut buf, &list).unwrap();
        assert_eq!(buf, vec![0x00, 0x00, 0x00, 0x00, 0x05]);
    }

    #[test]
    fn test_int_array_is_big_endian() {
        let mut buf = Vec::new();
        write_tag_payload(&mut buf, &NbtTag::IntArray(vec![0x0102_0304])).unwrap();
        assert_eq!(buf, vec![0x00, 0x00, 0x00, 0x01, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_round_trip_compound() {
        let mut map = IndexMap::new();
        map.insert(NbtString::from("byte"), NbtTag::Byte(42));
        map.insert(
            NbtString::from("string"),
            NbtTag::String(NbtString::from("val")),
        );
        let root = NbtTag::Compound(map);

        let mut buf = Vec::new();
        write_named_tag(&mut buf, &NbtString::from("root"), &root).unwrap();

        let mut input = &buf[..];
        let (name, decoded) = parse_named_tag(&mut input).unwrap();

        assert_eq!(name, NbtString::from("root"));
        assert_eq!(decoded, root);
    }
}
