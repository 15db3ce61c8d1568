use recipe_catalog::{
    extract_recipe_with_timeout, ExtractorConfig, RecipeError, RecipeExtractor,
};
use std::time::Duration;

const PAGE: &str = r#"
    <html><head>
    <script type="application/ld+json">{"@type": "Recipe", "name": "Builder Soup", "totalTime": "PT1H"}</script>
    </head></html>
"#;

#[tokio::test]
async fn test_builder_extracts_with_custom_user_agent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/soup")
        .match_header("user-agent", "CatalogTest/2.0")
        .with_status(200)
        .with_body(PAGE)
        .create_async()
        .await;

    let extractor = RecipeExtractor::builder()
        .user_agent("CatalogTest/2.0")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let recipe = extractor
        .extract(&format!("{}/soup", server.url()))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(recipe.title, "Builder Soup");
    assert_eq!(recipe.total_time, "1 hour");
}

#[tokio::test]
async fn test_extractor_is_reusable_across_calls() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/soup")
        .with_status(200)
        .with_body(PAGE)
        .create_async()
        .await;
    let _err = server
        .mock("GET", "/down")
        .with_status(503)
        .create_async()
        .await;

    let extractor = RecipeExtractor::builder()
        .from_config(&ExtractorConfig::default())
        .build()
        .unwrap();
    let soup = format!("{}/soup", server.url());
    let down = format!("{}/down", server.url());
    let (first, second, third) = tokio::join!(
        extractor.extract(&soup),
        extractor.extract(&down),
        extractor.extract(&soup),
    );

    assert_eq!(first.unwrap().slug, "builder-soup");
    assert!(matches!(second, Err(RecipeError::Fetch(_))));
    assert_eq!(third.unwrap().slug, "builder-soup");
}

#[tokio::test]
async fn test_convenience_function_with_timeout() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/soup")
        .with_status(200)
        .with_body(PAGE)
        .create_async()
        .await;

    let recipe = extract_recipe_with_timeout(
        &format!("{}/soup", server.url()),
        Some(Duration::from_secs(3)),
    )
    .await
    .unwrap();
    assert_eq!(recipe.title, "Builder Soup");
}

#[tokio::test]
async fn test_zero_timeout_is_rejected() {
    let result = extract_recipe_with_timeout("https://example.com", Some(Duration::ZERO)).await;
    assert!(matches!(result, Err(RecipeError::Builder(_))));
}
