use log::{error, warn};
use serde::Serialize;
use std::env;
use std::process::ExitCode;

use recipe_catalog::{
    to_markdown, ExtractorConfig, ImageStore, LocalImageStore, MealType, ParsedRecipe,
    RecipeError, RecipeExtractor, StoredRecipe,
};

const USAGE: &str =
    "Usage: recipe-catalog <url> [--markdown] [--download-image] [--meal-type <breakfast|dinner|dessert|other>]";

#[derive(Debug, Default)]
struct Args {
    url: String,
    markdown: bool,
    download_image: bool,
    meal_type: MealType,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    recipe: &'a ParsedRecipe,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--markdown" => parsed.markdown = true,
            "--download-image" => parsed.download_image = true,
            "--meal-type" => {
                let value = args.next().ok_or("--meal-type needs a value")?;
                parsed.meal_type = value.parse()?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option: {flag}")),
            url if parsed.url.is_empty() => parsed.url = url.to_string(),
            extra => return Err(format!("unexpected argument: {extra}")),
        }
    }

    if parsed.url.is_empty() {
        return Err("Please provide a URL as an argument".to_string());
    }
    Ok(parsed)
}

async fn run(args: Args) -> Result<String, RecipeError> {
    let config = ExtractorConfig::load()?;
    let extractor = RecipeExtractor::builder().from_config(&config).build()?;
    let recipe = extractor.extract(&args.url).await?;

    let image = if args.download_image && !recipe.image_url.is_empty() {
        let store = LocalImageStore::from_config(extractor.fetcher().client().clone(), &config.images);
        match store.store(&recipe.image_url, &recipe.slug).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Could not download image: {}", e);
                None
            }
        }
    } else {
        None
    };

    if args.markdown {
        return Ok(to_markdown(&StoredRecipe {
            recipe,
            meal_type: args.meal_type,
            image_path: image,
        }));
    }

    let output = JsonOutput {
        recipe: &recipe,
        image: image.as_deref(),
    };
    serde_json::to_string_pretty(&output).map_err(|e| RecipeError::InvalidDocument(e.to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
