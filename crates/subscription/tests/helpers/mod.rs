use std::{path::PathBuf, str::FromStr, sync::Arc};

use foodgram_recipe::{IngredientAmountInput, RecipeInput, TagInput};
use foodgram_shared::{FsBlobStore, Identity, State};
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

pub fn recipe_command(state: &State, media: PathBuf) -> foodgram_recipe::Command {
    let store = FsBlobStore::new(media, "http://localhost/media");

    foodgram_recipe::Command::new(state.clone(), Arc::new(store))
}

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

pub async fn create_ingredient(state: &State, name: &str, unit: &str) -> anyhow::Result<String> {
    let cmd = foodgram_ingredient::Command::new(state.clone());

    Ok(cmd
        .create(foodgram_ingredient::CreateInput {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        })
        .await?)
}

pub async fn create_recipe(state: &State, media: PathBuf, author: &str) -> anyhow::Result<String> {
    let cmd = recipe_command(state, media);
    let salt = create_ingredient(state, "salt", "g").await?;
    let tag = cmd
        .create_tag(TagInput {
            name: salt.to_owned(),
            slug: salt.to_lowercase(),
        })
        .await?;

    Ok(cmd
        .create(
            &Identity::user(author),
            RecipeInput {
                ingredients: vec![IngredientAmountInput {
                    id: salt,
                    amount: 1,
                }],
                tags: vec![tag],
                image: "data:image/png;base64,aGVsbG8=".to_owned(),
                name: "Soup".to_owned(),
                text: "Boil water.".to_owned(),
                cooking_time: 5,
            },
        )
        .await?)
}
