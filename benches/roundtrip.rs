// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use indexmap::IndexMap;
use mcsave::nbt::encode::write_named_tag;
use mcsave::nbt::parse::parse_named_tag;
use mcsave::nbt::{NbtList, NbtString, NbtTag, TagKind};

/// Builds a chunk-shaped tree: sections with block arrays plus an entity
/// list, roughly what a region chunk body looks like.
fn synthetic_chunk() -> (NbtString, NbtTag) {
    let mut sections = Vec::new();
    for y in 0..16i32 {
        let mut section = IndexMap::new();
        section.insert(NbtString::from("Y"), NbtTag::Byte(y as i8));
        section.insert(
            NbtString::from("Blocks"),
            NbtTag::ByteArray((0..4096).map(|i| (i % 251) as u8).collect()),
        );
        section.insert(
            NbtString::from("Heights"),
            NbtTag::IntArray((0..256).map(|i| i * y).collect()),
        );
        sections.push(NbtTag::Compound(section));
    }

    let mut level = IndexMap::new();
    level.insert(NbtString::from("xPos"), NbtTag::Int(12));
    level.insert(NbtString::from("zPos"), NbtTag::Int(-7));
    level.insert(NbtString::from("LastUpdate"), NbtTag::Long(123456789));
    level.insert(
        NbtString::from("Sections"),
        NbtTag::List(NbtList::new(TagKind::Compound, sections)),
    );

    let mut root = IndexMap::new();
    root.insert(NbtString::from("Level"), NbtTag::Compound(level));
    (NbtString::from(""), NbtTag::Compound(root))
}

fn bench_roundtrip(c: &mut Criterion) {
    let (name, tag) = synthetic_chunk();
    let mut stream = Vec::new();
    write_named_tag(&mut stream, &name, &tag).unwrap();

    let mut group = c.benchmark_group("roundtrip");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("parse", |b| {
        b.iter(|| {
            let mut input = &stream[..];
            black_box(parse_named_tag(&mut input).unwrap());
        })
    });

    group.bench_function("compose", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(stream.len());
            write_named_tag(&mut out, &name, &tag).unwrap();
            black_box(out);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
