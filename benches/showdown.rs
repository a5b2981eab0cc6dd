// benches/showdown.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use showdown_scrape::{
    specs::episode::parse_episode,
    specs::showdowns::extract_blocks,
    Pipeline, RawBlock,
};

const PAGE: &str = include_str!("../tests/fixtures/episode.html");

fn sample_blocks() -> Vec<RawBlock> {
    vec![
        RawBlock::new("SS #1", "$2,310 Maria Lopez 45 + 35 $1,175 JD Brooks 70 + 40 $3,413+ Terri 95 through to the showcase"),
        RawBlock::new("SS #2", "$1,000 Ann 50 30 $800 Bo 50 45 $900 Cy 15 + 10"),
        RawBlock::new("SS #3", "$1,000 Ann 35 + 40 $800 Bo 55 + 10 $900 Cy 1.00 bonus spin 1.00 $25,000"),
        RawBlock::new("SS #4", "$1,00 Ann 35 + 40 $2,500 BONUS $800 Bo 55 + 10"),
    ]
}

fn bench_pipeline(c: &mut Criterion) {
    let blocks = sample_blocks();
    let pipeline = Pipeline::default();

    c.bench_function("pipeline_process", |b| {
        b.iter(|| {
            let kept = blocks
                .iter()
                .map(|blk| pipeline.process(black_box(blk)))
                .filter(|r| r.is_kept())
                .count();
            black_box(kept)
        })
    });
}

fn bench_extract(c: &mut Criterion) {
    let lines: Vec<String> = PAGE.lines().map(str::to_string).collect();

    c.bench_function("extract_blocks", |b| {
        b.iter(|| {
            let blocks = extract_blocks(black_box(&lines));
            black_box(blocks.len())
        })
    });

    c.bench_function("parse_episode", |b| {
        b.iter(|| {
            let ep = parse_episode(black_box(PAGE), None);
            black_box(ep.showcase_showdowns.len())
        })
    });
}

criterion_group!(benches, bench_pipeline, bench_extract);
criterion_main!(benches);
