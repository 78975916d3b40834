use foodgram_shared::State;
use foodgram_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};

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
pub fn register_input(username: impl Into<String>) -> RegisterInput {
    let username = username.into();

    RegisterInput {
        email: format!("{username}@foodgram.localhost"),
        username,
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
    }
}

#[allow(dead_code)]
pub async fn create_user(state: &State, username: impl Into<String>) -> anyhow::Result<String> {
    let cmd = foodgram_user::Command::new(state.clone());

    Ok(cmd.register(register_input(username)).await?)
}
