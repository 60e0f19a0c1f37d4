use crate::recipe::Recipe;

const TITLE_WEIGHT: usize = 3;
const CATEGORY_WEIGHT: usize = 2;
const AREA_WEIGHT: usize = 2;
const INGREDIENTS_WEIGHT: usize = 2;

fn repeat_block(out: &mut String, text: &str, times: usize) {
    for _ in 0..times {
        out.push_str(text);
        out.push(' ');
    }
}

/// Flatten a recipe into the single text blob that gets indexed.
///
/// Fields are repeated to bias term frequency: title x3, category x2, area x2,
/// the comma-joined ingredient list x2, instructions once. Absent fields are empty.
pub fn compose(recipe: &Recipe) -> String {
    let mut out = String::new();
    repeat_block(&mut out, &recipe.title, TITLE_WEIGHT);
    repeat_block(&mut out, recipe.category.as_deref().unwrap_or(""), CATEGORY_WEIGHT);
    repeat_block(&mut out, recipe.area.as_deref().unwrap_or(""), AREA_WEIGHT);
    repeat_block(&mut out, &recipe.joined_ingredients(", "), INGREDIENTS_WEIGHT);
    out.push_str(recipe.instructions.as_deref().unwrap_or(""));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_fields_with_weights() {
        let r = Recipe::new("1", "Pie")
            .with_category("Dessert")
            .with_area("British")
            .with_ingredients(["apple", "flour"])
            .with_instructions("Bake it.");
        assert_eq!(
            compose(&r),
            "Pie Pie Pie Dessert Dessert British British apple, flour apple, flour Bake it."
        );
    }

    #[test]
    fn missing_fields_are_empty() {
        let r = Recipe::new("1", "Pie");
        assert_eq!(compose(&r), format!("Pie Pie Pie {}", " ".repeat(6)));
    }
}
