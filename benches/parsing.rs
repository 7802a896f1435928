use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn nested_rules(c: &mut Criterion) {
    let input = "a { color: red; .inner { margin: 0 auto; &:hover { top: 1px; } } }\n".repeat(512);
    c.bench_function("nested_rules", |b| {
        b.iter(|| thistle::parse(black_box(&input), &thistle::Options::default()))
    });
}

pub fn many_variable_declarations(c: &mut Criterion) {
    let input = "$a: 1px * 3 + 2px; $b: $a or blue; $c: (x: 1, y: $b);\n".repeat(512);
    c.bench_function("many_variable_declarations", |b| {
        b.iter(|| thistle::parse(black_box(&input), &thistle::Options::default()))
    });
}

pub fn long_strings(c: &mut Criterion) {
    let input = format!(
        "a {{ content: \"{}#{{$x}}{}\"; }}",
        "lorem ipsum ".repeat(2048),
        "dolor sit ".repeat(2048)
    );
    c.bench_function("long_strings", |b| {
        b.iter(|| thistle::parse(black_box(&input), &thistle::Options::default()))
    });
}

criterion_group!(benches, nested_rules, many_variable_declarations, long_strings);
criterion_main!(benches);
