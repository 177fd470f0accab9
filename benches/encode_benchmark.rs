//! Benchmarks for merge replay and cached subword lookup

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rustc_hash::FxHashMap;
use subword_prep::tokenizer::{
    encode, encode_word, escape, get_bpe_subwords, BpeData, MergeList, MergesCache, BPE,
};

fn merges() -> MergeList {
    let mut merges: MergeList = [
        ("g", "e"),
        ("ge", "t"),
        ("N", "a"),
        ("m", "e"),
        ("Na", "me"),
        ("s", "e"),
        ("se", "t"),
        ("V", "a"),
        ("l", "u"),
        ("Va", "lu"),
        ("Valu", "e"),
        ("i", "n"),
        ("in", "g"),
    ]
    .into_iter()
    .collect();
    // Filler rules that never match, to make the rule loop realistic in length.
    for i in 0..2000 {
        merges.push((format!("x{i}"), format!("y{i}")), 0);
    }
    merges
}

fn benchmark_encode_word(c: &mut Criterion) {
    let merges = merges();
    let word = escape("getNameSettingValue", true);

    let mut group = c.benchmark_group("encode_word");
    group.bench_function("identifier", |b| {
        b.iter(|| encode_word(black_box(&word), &merges).expect("encoding failed"))
    });
    let long_word = escape(&"getName".repeat(200), true);
    group.bench_function("long_identifier", |b| {
        b.iter(|| encode_word(black_box(&long_word), &merges).expect("encoding failed"))
    });
    group.finish();
}

fn benchmark_encode_corpus(c: &mut Criterion) {
    let merges = merges();
    let words: FxHashMap<String, u64> = (0..500)
        .map(|i| {
            let symbols: Vec<String> = format!("getValue{i}")
                .chars()
                .map(String::from)
                .collect();
            (format!("{} @", symbols.join(" ")), i)
        })
        .collect();

    c.bench_function("encode_corpus", |b| b.iter(|| encode(black_box(&words), &merges)));
}

fn benchmark_cached_lookup(c: &mut Criterion) {
    let mut data = BpeData::new(BPE::new(merges()), MergesCache::default());
    data.warm(["getName", "setValue"]).expect("warming failed");

    let mut group = c.benchmark_group("get_bpe_subwords");
    group.bench_function("cache_hit", |b| {
        b.iter(|| get_bpe_subwords(black_box("getName"), &data).expect("lookup failed"))
    });
    group.bench_function("cache_miss", |b| {
        b.iter(|| get_bpe_subwords(black_box("getting"), &data).expect("lookup failed"))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode_word,
    benchmark_encode_corpus,
    benchmark_cached_lookup
);
criterion_main!(benches);
