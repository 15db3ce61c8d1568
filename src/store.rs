use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::RecipeError;
use crate::model::{MealType, StoredRecipe};

/// Persistence collaborator. Recipes are keyed by slug; saving a recipe whose
/// slug already exists replaces it.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn upsert(&self, recipe: StoredRecipe) -> Result<(), RecipeError>;
    async fn get(&self, slug: &str) -> Result<Option<StoredRecipe>, RecipeError>;
    async fn list(&self) -> Result<Vec<StoredRecipe>, RecipeError>;
}

#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<BTreeMap<String, StoredRecipe>>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn upsert(&self, recipe: StoredRecipe) -> Result<(), RecipeError> {
        if recipe.slug().is_empty() {
            let reason = if recipe.recipe.title.trim().is_empty() {
                "cannot save a recipe without a title".to_string()
            } else {
                format!("title '{}' produces an empty slug", recipe.recipe.title)
            };
            return Err(RecipeError::Store(reason));
        }
        self.recipes
            .write()
            .await
            .insert(recipe.slug().to_string(), recipe);
        Ok(())
    }

    async fn get(&self, slug: &str) -> Result<Option<StoredRecipe>, RecipeError> {
        Ok(self.recipes.read().await.get(slug).cloned())
    }

    async fn list(&self) -> Result<Vec<StoredRecipe>, RecipeError> {
        Ok(self.recipes.read().await.values().cloned().collect())
    }
}

/// Catalog sections in browsing order, each sorted by title. Empty sections are left out.
pub fn group_by_meal_type(recipes: Vec<StoredRecipe>) -> Vec<(MealType, Vec<StoredRecipe>)> {
    let mut grouped: BTreeMap<MealType, Vec<StoredRecipe>> = BTreeMap::new();
    for recipe in recipes {
        grouped.entry(recipe.meal_type).or_default().push(recipe);
    }

    grouped
        .into_iter()
        .map(|(meal_type, mut recipes)| {
            recipes.sort_by_key(|r| r.recipe.title.to_lowercase());
            (meal_type, recipes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParsedRecipe;
    use crate::normalizers::slugify;

    fn stored(title: &str, meal_type: MealType) -> StoredRecipe {
        StoredRecipe {
            recipe: ParsedRecipe {
                title: title.to_string(),
                slug: slugify(title),
                ..Default::default()
            },
            meal_type,
            image_path: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_slug() {
        let store = MemoryRecipeStore::new();
        store.upsert(stored("Pancakes", MealType::Breakfast)).await.unwrap();
        store.upsert(stored("pancakes!", MealType::Dessert)).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        let saved = store.get("pancakes").await.unwrap().unwrap();
        assert_eq!(saved.meal_type, MealType::Dessert);
        assert_eq!(saved.recipe.title, "pancakes!");
    }

    #[tokio::test]
    async fn test_upsert_requires_slug() {
        let store = MemoryRecipeStore::new();
        let err = store.upsert(stored("", MealType::Other)).await.unwrap_err();
        assert!(matches!(err, RecipeError::Store(ref msg) if msg.contains("without a title")));

        let err = store.upsert(stored("北京烤鸭", MealType::Dinner)).await.unwrap_err();
        assert!(matches!(err, RecipeError::Store(ref msg) if msg.contains("produces an empty slug")));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_group_by_meal_type() {
        let groups = group_by_meal_type(vec![
            stored("Tiramisu", MealType::Dessert),
            stored("omelette", MealType::Breakfast),
            stored("Brownies", MealType::Dessert),
            stored("Granola", MealType::Breakfast),
        ]);

        let summary: Vec<(MealType, Vec<&str>)> = groups
            .iter()
            .map(|(meal, recipes)| {
                (*meal, recipes.iter().map(|r| r.recipe.title.as_str()).collect())
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                (MealType::Breakfast, vec!["Granola", "omelette"]),
                (MealType::Dessert, vec!["Brownies", "Tiramisu"]),
            ]
        );
    }
}
