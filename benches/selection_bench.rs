use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::BTreeSet;
use std::hint::black_box;
use asset_selector::lexer::Lexer;
use asset_selector::{evaluate, parse_query, AssetMetadata, AssetPredicate};

const QUERIES: [(&str, &str); 4] = [
    ("simple", r#"kind:"dbt""#),
    ("and_or", r#"kind:"dbt" and group:"core" or kind:"spark" and owner:"team:data""#),
    ("quoted", r#"tag:"a or b" or tag:'c or d' or column_tag:"pii""#),
    ("wildcard", r#"key:"warehouse.sales_*" or key:"raw.orders_202?""#),
];

fn metadata() -> AssetMetadata {
    let set = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<BTreeSet<_>>();
    AssetMetadata {
        key: "warehouse.sales_2024".to_string(),
        kinds: set(&["dbt", "snowflake"]),
        groups: set(&["core"]),
        tags: set(&["dagster/kind/dbt", "dagster/kind/snowflake", "tier"]),
        owners: set(&["team:data"]),
        table_names: set(&["sales"]),
        columns: set(&["id", "amount", "email"]),
        column_tags: set(&["pii"]),
    }
}

// 基准测试：OR 子句切分
fn benchmark_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_performance");

    for (name, query) in QUERIES {
        group.bench_with_input(BenchmarkId::new("split", name), &query, |b, &query| {
            b.iter(|| {
                let clauses: Vec<_> = Lexer::new(black_box(query)).collect();
                black_box(clauses)
            })
        });
    }

    group.finish();
}

// 基准测试：解析
fn benchmark_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_performance");

    for (name, query) in QUERIES {
        group.bench_with_input(BenchmarkId::new("parse", name), &query, |b, &query| {
            b.iter(|| black_box(parse_query(black_box(query))))
        });
    }

    group.finish();
}

// 基准测试：对预解析查询求值，模拟一次列表过滤
fn benchmark_evaluation(c: &mut Criterion) {
    let metadata = metadata();
    let mut group = c.benchmark_group("evaluation_performance");

    for (name, query) in QUERIES {
        let parsed = parse_query(query);
        group.bench_with_input(BenchmarkId::new("matches", name), &parsed, |b, parsed| {
            b.iter(|| black_box(parsed.matches(black_box(&metadata))))
        });
    }

    group.finish();
}

// 基准测试：完整流程（解析 + 求值）
fn benchmark_end_to_end(c: &mut Criterion) {
    let metadata = metadata();
    let mut group = c.benchmark_group("end_to_end_performance");

    for (name, query) in QUERIES {
        group.bench_with_input(BenchmarkId::new("evaluate", name), &query, |b, &query| {
            b.iter(|| black_box(evaluate(black_box(query), &metadata)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_lexer,
    benchmark_parser,
    benchmark_evaluation,
    benchmark_end_to_end
);
criterion_main!(benches);
