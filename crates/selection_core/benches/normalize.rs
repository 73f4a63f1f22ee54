use criterion::{Criterion, black_box, criterion_group, criterion_main};
use selection_core::{RawSelection, normalize};
use tokens::tokenize;

fn bench_normalize(c: &mut Criterion) {
    let sentence = "I bought this blender because the old one broke , but the lid never seals properly and the motor whines after a minute of use .";
    let seq = tokenize(&sentence.repeat(8));
    let len = seq.rendered_text().len();

    c.bench_function("normalize_mid_sentence", |b| {
        b.iter(|| normalize(black_box(RawSelection::new(len / 3, len / 2)), &seq))
    });

    c.bench_function("normalize_full_sentence", |b| {
        b.iter(|| normalize(black_box(RawSelection::new(0, len)), &seq))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
