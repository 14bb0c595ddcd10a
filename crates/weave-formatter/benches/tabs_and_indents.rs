//! Tabs-and-indents Performance Benchmarks
//!
//! Measures re-indenting a large synthetic compilation unit, both when every
//! line needs rewriting and when the unit is already formatted.
//!
//! Run with: `cargo bench --package weave-formatter`

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use weave_core::tree::build::*;
use weave_core::tree::{BinaryOperator, ClassKind};
use weave_core::{Node, TabsAndIndentsStyle};
use weave_formatter::TabsAndIndents;

/// Class with `methods` methods, each holding wrapped calls, a method chain
/// and a counted loop, all indented with two spaces per level
fn synthetic_unit(methods: usize) -> Node {
    let members = (0..methods)
        .map(|index| {
            let call = method_invocation(
                "\n    ",
                None,
                ident("", "log"),
                container(
                    "",
                    vec![
                        padded(literal("", "\"start\"")),
                        padded(ident("\n      ", "value")),
                    ],
                ),
            );
            let select = method_invocation(
                "",
                Some(padded_after(ident("", "builder"), "\n      ")),
                ident("", "add"),
                container("", vec![padded(ident("", "value"))]),
            );
            let chain = method_invocation(
                "\n    ",
                Some(padded_after(select, "\n      ")),
                ident("", "build"),
                container("", Vec::new()),
            );
            let loop_body = block(
                " ",
                vec![padded(return_statement(
                    "\n      ",
                    Some(binary(
                        " ",
                        ident("", "i"),
                        left(" ", BinaryOperator::Multiplication),
                        literal(" ", "2"),
                    )),
                ))],
                "\n    ",
            );
            let repeat = for_loop(
                "\n    ",
                for_control(
                    " ",
                    padded(ident("", "init")),
                    padded(ident("\n  ", "check")),
                    vec![padded(ident("\n  ", "step"))],
                ),
                padded(loop_body),
            );
            method_decl(
                "\n  ",
                Vec::new(),
                Some(ident("", "void")),
                ident(" ", &format!("method{index}")),
                container("", Vec::new()),
                Some(block(
                    " ",
                    vec![padded(call), padded(chain), padded(repeat)],
                    "\n  ",
                )),
            )
        })
        .map(padded)
        .collect();

    let class = class_decl(
        "",
        Vec::new(),
        left("", ClassKind::Class),
        ident(" ", "Synthetic"),
        block(" ", members, "\n"),
    );
    compilation_unit(None, Vec::new(), vec![class], "\n")
}

/// Benchmark: Re-indent every line of a large unit
fn bench_reindent_large_unit(c: &mut Criterion) {
    let unit = synthetic_unit(500);
    let formatter = TabsAndIndents::new(TabsAndIndentsStyle::default());

    c.bench_function("reindent_500_methods", |b| {
        b.iter(|| black_box(formatter.format(black_box(&unit)).unwrap()));
    });
}

/// Benchmark: Walk a large unit that needs no changes
fn bench_already_formatted_unit(c: &mut Criterion) {
    let formatter = TabsAndIndents::new(TabsAndIndentsStyle::default());
    let unit = formatter.format(&synthetic_unit(500)).unwrap();

    c.bench_function("unchanged_500_methods", |b| {
        b.iter(|| black_box(formatter.format(black_box(&unit)).unwrap()));
    });
}

/// Benchmark: Format a batch of units in parallel
fn bench_format_batch(c: &mut Criterion) {
    let units: Vec<Node> = (0..32).map(|_| synthetic_unit(50)).collect();
    let formatter = TabsAndIndents::new(TabsAndIndentsStyle::tabs(4));

    c.bench_function("format_all_32_units", |b| {
        b.iter(|| black_box(formatter.format_all(black_box(&units))));
    });
}

criterion_group!(
    benches,
    bench_reindent_large_unit,
    bench_already_formatted_unit,
    bench_format_batch
);
criterion_main!(benches);
