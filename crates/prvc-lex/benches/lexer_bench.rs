//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package prvc-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use prvc_lex::Lexer;
use prvc_util::Handler;

fn lexer_token_count(source: &str) -> usize {
    let mut handler = Handler::new();
    let lexer = Lexer::new(source, &mut handler);
    lexer.count()
}

fn bench_lexer_declarations(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_declarations");

    let source = "let total = 0\ntotal = total + 1\nreturn total";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_let", |b| {
        b.iter(|| lexer_token_count(black_box("let total = 0")))
    });

    group.bench_function("let_and_return", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_complex");

    let source = r#"
transforms compute_total
inputs
    items: List
outputs
    total: Integer
    ensures result >= 0
        know items is never empty in practice
        believe non-negative totals hold for all valid orders
    if items.len() == 0
        return 0
    let sum = 0
    for item in items
        sum = sum + item
    return sum
"#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("contract_function", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| {
        b.iter(|| lexer_token_count(black_box(r#"let s = "hello""#)))
    });

    group.bench_function("interpolated_string", |b| {
        b.iter(|| lexer_token_count(black_box(r#"let s = "total is {total} items""#)))
    });

    group.bench_function("long_string", |b| {
        let source =
            r#"let s = "This is a longer string used for benchmarking purposes only.""#;
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("integer", |b| {
        b.iter(|| lexer_token_count(black_box("let x = 123456")))
    });

    group.bench_function("decimal", |b| {
        b.iter(|| lexer_token_count(black_box("let x = 3.14159")))
    });

    group.bench_function("hex", |b| {
        b.iter(|| lexer_token_count(black_box("let x = 0xDEADBEEF")))
    });

    group.finish();
}

fn bench_lexer_identifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_identifiers");

    group.bench_function("short_ident", |b| {
        b.iter(|| lexer_token_count(black_box("let x = 42")))
    });

    group.bench_function("long_ident", |b| {
        b.iter(|| lexer_token_count(black_box("let very_long_variable_name = 42")))
    });

    group.bench_function("many_idents", |b| {
        b.iter(|| {
            lexer_token_count(black_box(
                "let a = 1\nlet b = 2\nlet c = 3\nlet d = 4\nlet e = 5",
            ))
        })
    });

    group.finish();
}

fn bench_lexer_indentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_indentation");

    let source = "if a\n    if b\n        if c\n            d\n        e\n    f\ng";
    group.bench_function("nested_blocks", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_declarations,
    bench_lexer_complex,
    bench_lexer_strings,
    bench_lexer_numbers,
    bench_lexer_identifiers,
    bench_lexer_indentation
);
criterion_main!(benches);
