use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ocean_core::model::STATEMENT_COUNT;
use ocean_core::report::render_body;
use ocean_core::responses::ResponseSet;
use ocean_core::scoring::score;
use ocean_core::RespondentProfile;

fn make_responses() -> ResponseSet {
    let values: Vec<u8> = (0..STATEMENT_COUNT).map(|i| (i % 5) as u8 + 1).collect();
    ResponseSet::from_values(&values).unwrap()
}

fn bench_score(c: &mut Criterion) {
    let responses = make_responses();

    c.bench_function("score_full_set", |b| {
        b.iter(|| score(black_box(&responses)).unwrap())
    });
}

fn bench_render_body(c: &mut Criterion) {
    let responses = make_responses();
    let scores = score(&responses).unwrap();
    let profile = RespondentProfile {
        name: "Bench".into(),
        ..Default::default()
    };

    c.bench_function("render_body", |b| {
        b.iter(|| render_body(black_box(&profile), black_box(&scores), black_box(&responses)))
    });
}

criterion_group!(benches, bench_score, bench_render_body);
criterion_main!(benches);
