use recipe_catalog::extract_recipe;
use std::env;

#[tokio::test]
#[ignore] // This test requires network access
async fn test_bbc_good_food_recipe() {
    env::set_var("RUST_LOG", "debug");
    let _ = env_logger::try_init();

    let url = "https://www.bbcgoodfood.com/recipes/classic-cottage-pie";
    match extract_recipe(url).await {
        Ok(recipe) => {
            println!("Recipe parsed successfully!");
            println!("Title: {}", recipe.title);
            println!("Ingredients: {:?}", recipe.ingredients);

            assert!(recipe.title.to_lowercase().contains("cottage pie"));
            assert_eq!(recipe.slug, recipe_catalog::slugify(&recipe.title));
            assert!(!recipe.ingredients.is_empty());
            assert!(!recipe.instructions.is_empty());
        }
        Err(e) => {
            panic!("Failed to fetch recipe: {}", e.user_message());
        }
    }
}
