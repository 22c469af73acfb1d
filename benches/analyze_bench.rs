//! Analyze Benchmark
//!
//! Per-file throughput of the full pipeline, and of the checker alone on a
//! pre-built syntax tree and type table.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ctxlint::{builtin_analyzers, check_source, check_sources, logcheck};
use ctxlint_binder::BinderState;
use ctxlint_checker::{SourceFile, analyze};
use ctxlint_parser::ParserState;

// =============================================================================
// Test Sources
// =============================================================================

/// `functions` functions of `calls` logging calls each, a third of them
/// malformed.
fn generate_source(functions: usize, calls: usize) -> String {
    let mut source = String::from(
        "package bench\n\nimport (\n\t\"github.com/scionproto/scion/go/lib/log\"\n\t\"github.com/scionproto/scion/go/lib/serrors\"\n)\n\ntype key string\n\n",
    );
    for f in 0..functions {
        source.push_str(&format!("func fn{f}(n int, err error) error {{\n"));
        source.push_str("\tlogger := log.New(\"fn\", n)\n");
        for c in 0..calls {
            match c % 3 {
                0 => source.push_str(&format!("\tlog.Info(\"call\", \"n\", n, key(\"c\"), {c})\n")),
                1 => source.push_str(&format!("\tlogger.Debug(\"call\", n, {c})\n")),
                _ => source.push_str("\t_ = serrors.Wrap(\"call\", err, \"n\")\n"),
            }
        }
        source.push_str("\treturn serrors.WithCtx(err, \"n\", n)\n}\n\n");
    }
    source
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_check_source(c: &mut Criterion) {
    let analyzers = builtin_analyzers();
    let mut group = c.benchmark_group("check_source");
    for (functions, calls) in [(10, 5), (50, 10), (200, 10)] {
        let source = generate_source(functions, calls);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("pipeline", format!("{functions}fn_{calls}call")),
            &source,
            |b, source| b.iter(|| black_box(check_source("bench.go", source, &analyzers))),
        );
    }
    group.finish();
}

/// Checker only; parsing, binding and typing happen once outside the loop.
fn bench_analyze_only(c: &mut Criterion) {
    let source = generate_source(100, 10);
    let mut parser = ParserState::new("bench.go".to_string(), source.as_str());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    let types = ctxlint_solver::evaluate_file(&arena, &binder, root);
    let api = logcheck();

    let mut group = c.benchmark_group("analyze");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("logcheck_100fn", |b| {
        b.iter(|| {
            let file = SourceFile::new("bench.go", &source, &arena, &binder, root);
            black_box(analyze(file, &types, &api))
        })
    });
    group.finish();
}

fn bench_parallel_files(c: &mut Criterion) {
    let analyzers = builtin_analyzers();
    let files: Vec<(String, String)> = (0..64)
        .map(|i| (format!("file{i}.go"), generate_source(20, 10)))
        .collect();
    let bytes: usize = files.iter().map(|(_, text)| text.len()).sum();

    let mut group = c.benchmark_group("check_sources");
    group.throughput(Throughput::Bytes(bytes as u64));
    group.bench_function("64_files", |b| {
        b.iter(|| black_box(check_sources(&files, &analyzers)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_check_source,
    bench_analyze_only,
    bench_parallel_files
);
criterion_main!(benches);
