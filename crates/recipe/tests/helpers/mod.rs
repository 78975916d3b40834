use std::{path::PathBuf, str::FromStr, sync::Arc};

use foodgram_recipe::{IngredientAmountInput, RecipeInput, TagInput};
use foodgram_shared::{FsBlobStore, State};
use foodgram_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::new(pool))
}

#[allow(dead_code)]
pub fn command(state: &State, media: PathBuf) -> foodgram_recipe::Command {
    let store = FsBlobStore::new(media, "http://localhost/media");

    foodgram_recipe::Command::new(state.clone(), Arc::new(store))
}

#[allow(dead_code)]
pub async fn create_user(state: &State, username: &str) -> anyhow::Result<String> {
    let cmd = foodgram_user::Command::new(state.clone());

    Ok(cmd
        .register(RegisterInput {
            email: format!("{username}@foodgram.localhost"),
            username: username.to_owned(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
        })
        .await?)
}

#[allow(dead_code)]
pub async fn create_ingredient(state: &State, name: &str, unit: &str) -> anyhow::Result<String> {
    let cmd = foodgram_ingredient::Command::new(state.clone());

    Ok(cmd
        .create(foodgram_ingredient::CreateInput {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        })
        .await?)
}

#[allow(dead_code)]
pub async fn create_tag(
    cmd: &foodgram_recipe::Command,
    name: &str,
    slug: &str,
) -> anyhow::Result<String> {
    Ok(cmd
        .create_tag(TagInput {
            name: name.to_owned(),
            slug: slug.to_owned(),
        })
        .await?)
}

#[allow(dead_code)]
pub fn recipe_input(name: &str, ingredients: &[(&str, i64)], tags: &[&str]) -> RecipeInput {
    RecipeInput {
        ingredients: ingredients
            .iter()
            .map(|(id, amount)| IngredientAmountInput {
                id: id.to_string(),
                amount: *amount,
            })
            .collect(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image: "data:image/png;base64,aGVsbG8=".to_owned(),
        name: name.to_owned(),
        text: "Mix everything.".to_owned(),
        cooking_time: 10,
    }
}
