use criterion::{criterion_group, criterion_main, Criterion};
use recipe_core::tokenizer::tokenize;

fn bench_tokenize(c: &mut Criterion) {
    let text = "Preheat oven to 350 degrees. Combine soy sauce, water, brown sugar, ginger and garlic \
                in a small saucepan and cover. Bring to a boil over medium heat. "
        .repeat(50);
    c.bench_function("tokenize_instructions", |b| b.iter(|| tokenize(&text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
