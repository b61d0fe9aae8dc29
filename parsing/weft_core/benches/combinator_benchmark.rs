use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use weft_core::combinators::{longest, or, plus};
use weft_core::scanners::{block_comment, identifier, integer, is_char, string, whitespaces};
use weft_core::{Parser, SourceLocator, Token};

fn make_list(items: usize) -> String {
    let mut source = String::from("[");
    for i in 0..items {
        if i > 0 {
            source.push_str(", ");
        }
        if i % 3 == 0 {
            source.push_str("/* item */ ");
        }
        source.push_str(&format!("name{}", i));
    }
    source.push(']');
    source
}

fn character_list() -> Parser<Vec<String>> {
    let ws = plus(vec![whitespaces(), block_comment("/*", "*/")]).skip_many();
    let item = identifier().source().followed_by(ws.clone());
    let comma = is_char(',').next(ws.clone());
    item.sep_by(comma).between(is_char('[').next(ws), is_char(']'))
}

fn token_list() -> Parser<usize> {
    let tokenizer = or(vec![
        identifier().source().tokenize(),
        integer().source().tokenize(),
        plus(vec![string("["), string("]"), string(",")]).source().tokenize(),
    ]);
    let delim = plus(vec![whitespaces(), block_comment("/*", "*/")]).skip_many();
    let punct = |text: &'static str| weft_core::combinators::token_eq(text.to_string());
    let name = weft_core::combinators::token("name", |token: &Token| {
        token
            .value_as::<String>()
            .filter(|text| text.starts_with("name"))
            .map(|_| ())
    });
    name.sep_by(punct(","))
        .between(punct("["), punct("]"))
        .map(|names| names.len())
        .from_with(tokenizer, delim)
}

fn bench_character_level(c: &mut Criterion) {
    let parser = character_list();
    let mut group = c.benchmark_group("character_level");
    for items in [10, 100, 1000] {
        let source = make_list(items);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &source, |b, source| {
            b.iter(|| parser.parse(black_box(source)))
        });
    }
    group.finish();
}

fn bench_token_level(c: &mut Criterion) {
    let parser = token_list();
    let mut group = c.benchmark_group("token_level");
    for items in [10, 100, 1000] {
        let source = make_list(items);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &source, |b, source| {
            b.iter(|| parser.parse(black_box(source)))
        });
    }
    group.finish();
}

fn bench_longest_match(c: &mut Criterion) {
    let ops = longest(vec![
        string("<").source(),
        string("<=").source(),
        string("<<").source(),
        string("<<=").source(),
    ]);
    let parser = ops.sep_by(is_char(' '));
    let source = vec!["<<="; 500].join(" ");
    c.bench_function("longest_match_operators", |b| {
        b.iter(|| parser.parse(black_box(&source)))
    });
}

fn bench_locator(c: &mut Criterion) {
    let source = "let x = 1;\n".repeat(5000);
    c.bench_function("locate_sequential", |b| {
        b.iter(|| {
            let locator = SourceLocator::new(&source);
            for index in (0..source.len()).step_by(7) {
                black_box(locator.locate(index).ok());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_character_level,
    bench_token_level,
    bench_longest_match,
    bench_locator
);
criterion_main!(benches);
