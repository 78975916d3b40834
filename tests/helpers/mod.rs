#![allow(dead_code)]

use std::path::Path;

use foodgram::{AppState, Config};
use foodgram_recipe::{IngredientAmountInput, RecipeInput, TagInput};
use foodgram_shared::Identity;
use foodgram_user::RegisterInput;

pub fn test_config(dir: &Path) -> anyhow::Result<Config> {
    let mut config = Config::load(Some(dir.join("missing.toml").display().to_string()))?;
    config.database.url = format!("sqlite:{}", dir.join("db.sqlite3").display());
    config.media.root = dir.join("media");
    config.media.base_url = "http://localhost:8000/media".to_string();
    config.server.base_url = "http://localhost:8000".to_string();

    Ok(config)
}

pub async fn setup_app(dir: &Path) -> anyhow::Result<AppState> {
    let config = test_config(dir)?;
    foodgram::migrate::migrate(&config).await?;

    AppState::connect(config).await
}

pub async fn create_user(app: &AppState, username: &str) -> anyhow::Result<String> {
    Ok(app
        .user_command()
        .register(RegisterInput {
            email: format!("{username}@foodgram.localhost"),
            username: username.to_owned(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
        })
        .await?)
}

pub async fn create_tag(app: &AppState, slug: &str) -> anyhow::Result<String> {
    Ok(app
        .recipe_command()
        .create_tag(TagInput {
            name: slug.to_uppercase(),
            slug: slug.to_owned(),
        })
        .await?)
}

pub fn recipe_input(ingredients: &[(&str, i64)], tag: &str) -> RecipeInput {
    RecipeInput {
        ingredients: ingredients
            .iter()
            .map(|(id, amount)| IngredientAmountInput {
                id: id.to_string(),
                amount: *amount,
            })
            .collect(),
        tags: vec![tag.to_owned()],
        image: "data:image/png;base64,aGVsbG8=".to_owned(),
        name: "Recipe".to_owned(),
        text: "Cook it.".to_owned(),
        cooking_time: 15,
    }
}

pub async fn create_recipe(
    app: &AppState,
    author: &str,
    ingredients: &[(&str, i64)],
    tag: &str,
) -> anyhow::Result<String> {
    Ok(app
        .recipe_command()
        .create(&Identity::user(author), recipe_input(ingredients, tag))
        .await?)
}
