use recipe_catalog::{
    submit_recipe, ImageStore, LocalImageStore, MealType, MemoryRecipeStore, RecipeEdits,
    RecipeError, RecipeExtractor, RecipeStore, Submission,
};

fn recipe_page(image_url: &str) -> String {
    format!(
        r#"
        <html>
        <head>
            <script type="application/ld+json">
            {{
                "@context": "https://schema.org",
                "@type": "Recipe",
                "name": "Overnight Oats",
                "description": "Creamy oats",
                "image": "{image_url}",
                "recipeYield": "2",
                "recipeIngredient": ["1 cup oats", "1 cup milk"],
                "recipeInstructions": "Stir together.\nChill overnight."
            }}
            </script>
        </head>
        </html>
        "#
    )
}

#[tokio::test]
async fn test_submission_stores_image_and_applies_edits() {
    let mut server = mockito::Server::new_async().await;
    let image_url = format!("{}/oats.webp", server.url());
    let _page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body(recipe_page(&image_url))
        .create_async()
        .await;
    let image = server
        .mock("GET", "/oats.webp")
        .with_status(200)
        .with_header("content-type", "image/webp")
        .with_body("webp-bytes")
        .create_async()
        .await;

    let dir = std::env::temp_dir().join(format!("recipe-submit-{}", std::process::id()));
    let extractor = RecipeExtractor::builder().build().unwrap();
    let images = LocalImageStore::new(extractor.fetcher().client().clone(), &dir, "/images");
    let store = MemoryRecipeStore::new();

    let submission = Submission {
        url: format!("{}/recipe", server.url()),
        meal_type: MealType::Breakfast,
        edits: RecipeEdits {
            title: Some("Berry Overnight Oats".to_string()),
            servings: Some("4".to_string()),
            ..Default::default()
        },
    };
    let saved = submit_recipe(&extractor, submission, &images, &store)
        .await
        .unwrap();

    image.assert_async().await;
    assert_eq!(saved.recipe.slug, "berry-overnight-oats");
    assert_eq!(saved.recipe.servings, "4");
    assert_eq!(saved.recipe.description, "Creamy oats");
    assert_eq!(saved.image_path.as_deref(), Some("/images/berry-overnight-oats.webp"));
    assert!(dir.join("berry-overnight-oats.webp").exists());

    let fetched = store.get("berry-overnight-oats").await.unwrap().unwrap();
    assert_eq!(fetched, saved);
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_image_failure_does_not_block_saving() {
    let mut server = mockito::Server::new_async().await;
    let image_url = format!("{}/broken.jpg", server.url());
    let _page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body(recipe_page(&image_url))
        .create_async()
        .await;
    let _image = server
        .mock("GET", "/broken.jpg")
        .with_status(500)
        .create_async()
        .await;

    let extractor = RecipeExtractor::builder().build().unwrap();
    let images = LocalImageStore::new(extractor.fetcher().client().clone(), std::env::temp_dir(), "/images");
    let store = MemoryRecipeStore::new();

    let submission = Submission {
        url: format!("{}/recipe", server.url()),
        meal_type: MealType::Breakfast,
        ..Default::default()
    };
    let saved = submit_recipe(&extractor, submission, &images, &store)
        .await
        .unwrap();

    assert_eq!(saved.image_path, None);
    assert_eq!(saved.recipe.image_url, image_url);
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_resubmission_upserts_by_slug() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body(recipe_page(""))
        .create_async()
        .await;

    let extractor = RecipeExtractor::builder().build().unwrap();
    let images = LocalImageStore::new(extractor.fetcher().client().clone(), std::env::temp_dir(), "/images");
    let store = MemoryRecipeStore::new();
    let url = format!("{}/recipe", server.url());

    for meal_type in [MealType::Breakfast, MealType::Dessert] {
        let submission = Submission {
            url: url.clone(),
            meal_type,
            ..Default::default()
        };
        submit_recipe(&extractor, submission, &images, &store)
            .await
            .unwrap();
    }

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].meal_type, MealType::Dessert);
    assert_eq!(all[0].image_path, None);
}

#[tokio::test]
async fn test_failed_extraction_saves_nothing() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body("<html><body>No structured data</body></html>")
        .create_async()
        .await;

    let extractor = RecipeExtractor::builder().build().unwrap();
    let images = LocalImageStore::new(extractor.fetcher().client().clone(), std::env::temp_dir(), "/images");
    let store = MemoryRecipeStore::new();
    let submission = Submission {
        url: format!("{}/recipe", server.url()),
        ..Default::default()
    };

    let err = submit_recipe(&extractor, submission, &images, &store)
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::NoStructuredRecipeFound));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_image_store_trait_object() {
    let store: Box<dyn ImageStore> = Box::new(LocalImageStore::new(
        reqwest_client(),
        std::env::temp_dir(),
        "/images",
    ));
    let err = store.store("", "slug").await.unwrap_err();
    assert!(matches!(err, RecipeError::Image(_)));
}

fn reqwest_client() -> reqwest::Client {
    RecipeExtractor::builder()
        .build()
        .unwrap()
        .fetcher()
        .client()
        .clone()
}

#[tokio::test]
async fn test_title_without_slug_characters_is_not_saved() {
    let mut server = mockito::Server::new_async().await;
    let page = recipe_page("").replace("Overnight Oats", "北京烤鸭");
    let _page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body(page)
        .create_async()
        .await;

    let extractor = RecipeExtractor::builder().build().unwrap();
    let recipe = extractor.extract(&format!("{}/recipe", server.url())).await.unwrap();
    assert_eq!(recipe.title, "北京烤鸭");
    assert_eq!(recipe.slug, "");

    let images = LocalImageStore::new(extractor.fetcher().client().clone(), std::env::temp_dir(), "/images");
    let store = MemoryRecipeStore::new();
    let submission = Submission {
        url: format!("{}/recipe", server.url()),
        ..Default::default()
    };
    let err = submit_recipe(&extractor, submission, &images, &store)
        .await
        .unwrap_err();

    assert!(matches!(err, RecipeError::Store(ref msg) if msg.contains("produces an empty slug")));
    assert!(store.list().await.unwrap().is_empty());
}
