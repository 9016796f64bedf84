use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use term_gate::{DeletionDictionary, FuzzyTrie, Vocabulary};

/// Synthetic vocabulary of pronounceable 6-10 letter words.
fn synthetic_vocabulary(size: usize) -> Vocabulary {
    const SYLLABLES: &[&str] = &["me", "no", "pau", "se", "es", "tro", "gen", "hot", "fla", "sh"];
    let terms = (0..size).map(|i| {
        let mut n = i;
        let mut word = String::new();
        for _ in 0..4 {
            word.push_str(SYLLABLES[n % SYLLABLES.len()]);
            n /= SYLLABLES.len();
        }
        word
    });
    Vocabulary::from_terms(terms)
}

fn bench_lookup(c: &mut Criterion) {
    let vocab = synthetic_vocabulary(5_000);
    let queries = ["menopase", "estrogn", "hotflsh", "xyzxyz"];

    let mut group = c.benchmark_group("lookup");
    for max in [1usize, 2] {
        let trie = FuzzyTrie::from_words(vocab.iter(), max).unwrap();
        let dict = DeletionDictionary::new(vocab.clone(), max).unwrap();

        group.bench_with_input(BenchmarkId::new("trie", max), &queries, |b, qs| {
            b.iter(|| qs.iter().map(|q| trie.matches(black_box(q)).len()).sum::<usize>())
        });
        group.bench_with_input(BenchmarkId::new("deletion_dictionary", max), &queries, |b, qs| {
            b.iter(|| qs.iter().map(|q| dict.lookup(black_box(q)).len()).sum::<usize>())
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let vocab = synthetic_vocabulary(5_000);
    c.bench_function("build_deletion_dictionary_d2", |b| {
        b.iter(|| DeletionDictionary::new(black_box(vocab.clone()), 2).unwrap().key_count())
    });
    c.bench_function("build_trie", |b| {
        b.iter(|| FuzzyTrie::from_words(black_box(&vocab).iter(), 2).unwrap().node_count())
    });
}

criterion_group!(benches, bench_lookup, bench_build);
criterion_main!(benches);
