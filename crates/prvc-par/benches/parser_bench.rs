//! Parser benchmarks.
//!
//! Run with `cargo bench --package prvc-par`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use prvc_lex::Lexer;
use prvc_par::{Module, Parser};
use prvc_util::Handler;

fn parse_source(source: &str) -> Module {
    let mut handler = Handler::new();
    let tokens = Lexer::new(source, &mut handler).tokenize();
    Parser::new(tokens, &handler, source).parse()
}

fn bench_parser_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_simple");

    let source = "const MAX_SIZE = 100\n";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("const_decl", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_functions");

    let source = "\
transforms double(x Integer) Integer\nfrom\n    x * 2\n\n\
transforms fib(n Integer) Integer\nfrom\n    if n <= 1\n        n\n    else\n        fib(n - 1) + fib(n - 2)\n";

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("functions", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_types");

    let source = "\
type Point = (x: Integer, y: Integer)\n\
type Sign = Zero | Positive | Negative\n\
type PositiveInt = Integer where result > 0\n";

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("type_decls", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_contracts(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_contracts");

    let source = "\
transforms safe_divide(a Integer, b Integer) Integer\n\
requires b != 0\n\
ensures result * b <= a\n\
know b != 0\n\
proof\n\
    no_overflow: result stays within range when a < 1000000\n\
from\n\
    a / b\n";

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("contract_clauses", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let source = "\
transforms process(n Integer) Integer\nfrom\n\
    if n < 0\n\
        -1\n\
    else if n == 0\n\
        0\n\
    else\n\
        match n\n\
            1 => 1\n\
            2 => 2\n\
            _ =>\n\
                let mut sum = 0\n\
                let mut i = 0\n\
                while i < n\n\
                    sum = sum + i\n\
                    i = i + 1\n\
                sum\n";

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("control_flow", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_complex");

    let source = "\
import std.io\n\
from std.collections import List, Map\n\n\
type Shape = Circle(Integer) | Rectangle(Integer, Integer)\n\n\
transforms area(shape Shape) Integer\nfrom\n\
    match shape\n\
        Circle(r) => r * r * 3\n\
        Rectangle(w, h) => w * h\n\n\
validates bounded(x Integer) Boolean\n\
ensures result == true\n\
from\n\
    x >= 0 && x <= 100\n\n\
main()\n\
    let shapes = [Circle(2), Rectangle(3, 4)]\n\
    for shape in shapes\n\
        area(shape) |> println\n";

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("complex_source", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_simple,
    bench_parser_functions,
    bench_parser_types,
    bench_parser_contracts,
    bench_parser_control_flow,
    bench_parser_complex
);
criterion_main!(benches);
