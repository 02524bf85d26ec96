//! # Sparts Family Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Codec | encode + decode of a Part payload |
//! | Addressing | address derivation |
//! | Builder | sign a batch of N transactions |
//! | Processor | apply a create + relation batch |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{encode, AddressDeriver, Family, Payload};
use sp_01_batch_builder::{BatchBuilder, EntityPayload, PartPayload, TransactionBuilderApi};
use sp_03_state_transition::{InMemoryStateStore, ProcessorConfig, TransactionProcessor};

fn part() -> PartPayload {
    PartPayload {
        pt_name: "zlib".into(),
        checksum: "4ff941449631ace0d4d203e3483be9dbc9da454084111f97ea0a2114e19bf066".into(),
        version: "1.3".into(),
        src_uri: "https://zlib.net".into(),
        licensing: "Zlib".into(),
        ..PartPayload::new("p1")
    }
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let payload = part();
    let bytes = encode(&payload.values()).unwrap();

    group.bench_function("encode_part", |b| {
        b.iter(|| encode(black_box(&payload.values())).unwrap())
    });
    group.bench_function("decode_part", |b| {
        b.iter(|| Payload::decode(Family::Part, black_box(&bytes)).unwrap())
    });
    group.finish();
}

fn bench_addressing(c: &mut Criterion) {
    let deriver = AddressDeriver::for_family(Family::Part);
    c.bench_function("address/derive", |b| {
        b.iter(|| deriver.address(black_box("p1")))
    });
}

fn bench_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder");
    let builder = BatchBuilder::new(Secp256k1KeyPair::generate());

    for size in [1usize, 10, 100] {
        let payloads: Vec<PartPayload> = (0..size)
            .map(|i| PartPayload::add_supplier("p1", format!("s{i}")))
            .collect();
        let refs: Vec<&dyn EntityPayload> = payloads.iter().map(|p| p as &dyn EntityPayload).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch_list", size), &refs, |b, refs| {
            b.iter(|| builder.build_batch_list(black_box(refs)).unwrap())
        });
    }
    group.finish();
}

fn bench_processor(c: &mut Criterion) {
    let builder = BatchBuilder::new(Secp256k1KeyPair::generate());
    let processor = TransactionProcessor::with_families(&ProcessorConfig::default());
    let batch = builder
        .build_batch_list(&[
            &part(),
            &PartPayload::add_supplier("p1", "s1"),
            &PartPayload::add_category("p1", "c1"),
        ])
        .unwrap()
        .batches
        .remove(0);

    c.bench_function("processor/apply_batch", |b| {
        b.iter(|| {
            let store = InMemoryStateStore::new();
            processor.apply_batch(black_box(&batch), &store).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_codec,
    bench_addressing,
    bench_builder,
    bench_processor
);
criterion_main!(benches);
