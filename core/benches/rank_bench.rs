use criterion::{criterion_group, criterion_main, Criterion};
use recipe_core::{build_index, EngineConfig, Recipe, RecipeRecord};

const WORDS: &[&str] = &[
    "chicken", "beef", "rice", "onion", "garlic", "tomato", "basil", "lemon", "butter", "flour",
    "pepper", "salt", "cumin", "ginger", "soy", "noodle", "carrot", "potato", "cream", "cheese",
];

fn corpus(n: usize) -> Vec<RecipeRecord> {
    (0..n)
        .map(|i| {
            let pick = |k: usize| WORDS[(i * 7 + k * 3) % WORDS.len()];
            RecipeRecord::from(
                Recipe::new(i.to_string(), format!("{} {}", pick(0), pick(1)))
                    .with_ingredients([pick(2), pick(3), pick(4)])
                    .with_instructions(format!("Cook the {} with {} and {}.", pick(5), pick(6), pick(7))),
            )
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let snapshot = build_index(corpus(10_000)).expect("build").into_snapshot();
    let config = EngineConfig::default();
    c.bench_function("search_10k", |b| b.iter(|| snapshot.search(&config, "garlic butter chicken", 10)));
    let wanted = vec!["garlic".to_string(), "cream".to_string()];
    c.bench_function("ingredients_10k", |b| b.iter(|| snapshot.search_by_ingredients(&config, &wanted, 10)));
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
