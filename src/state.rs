use std::sync::Arc;

use foodgram_recipe::{LinkShortener, TinyUrl};
use foodgram_shared::{BlobStore, FsBlobStore, State};

use crate::Config;

/// Storage handles and collaborators shared by every command and query.
#[derive(Clone)]
pub struct AppState {
    pub state: State,
    pub blob: Arc<dyn BlobStore>,
    pub shortener: Arc<dyn LinkShortener>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Opens separate read and write pools; the database must already be migrated.
    pub async fn connect(config: Config) -> anyhow::Result<Self> {
        let write_db = crate::db::create_write_pool(&config.database.url).await?;
        let read_db =
            crate::db::create_read_pool(&config.database.url, config.database.max_connections)
                .await?;

        Ok(Self::new(State { read_db, write_db }, config))
    }

    pub fn new(state: State, config: Config) -> Self {
        let blob = FsBlobStore::new(&config.media.root, &config.media.base_url);

        Self {
            state,
            blob: Arc::new(blob),
            shortener: Arc::new(TinyUrl::default()),
            config: Arc::new(config),
        }
    }

    pub fn with_shortener(mut self, shortener: Arc<dyn LinkShortener>) -> Self {
        self.shortener = shortener;
        self
    }

    pub fn ingredient_command(&self) -> foodgram_ingredient::Command {
        foodgram_ingredient::Command::new(self.state.clone())
    }

    pub fn ingredient_query(&self) -> foodgram_ingredient::Query {
        foodgram_ingredient::Query::new(self.state.clone())
    }

    pub fn recipe_command(&self) -> foodgram_recipe::Command {
        foodgram_recipe::Command::new(self.state.clone(), self.blob.clone())
            .min_cooking_time(self.config.recipe.min_cooking_time)
    }

    pub fn recipe_query(&self) -> foodgram_recipe::Query {
        foodgram_recipe::Query::new(self.state.clone())
    }

    pub fn shopping_query(&self) -> foodgram_shopping::Query {
        foodgram_shopping::Query::new(self.state.clone())
            .font_path(self.config.document.font_path.clone())
    }

    pub fn user_command(&self) -> foodgram_user::Command {
        foodgram_user::Command::new(self.state.clone())
    }

    pub fn user_query(&self) -> foodgram_user::Query {
        foodgram_user::Query::new(self.state.clone())
    }

    pub fn subscription_command(&self) -> foodgram_subscription::Command {
        foodgram_subscription::Command::new(self.state.clone())
    }

    pub fn subscription_query(&self) -> foodgram_subscription::Query {
        foodgram_subscription::Query::new(self.state.clone())
    }

    /// Shortened public link of a recipe.
    pub async fn recipe_link(&self, id: &str) -> foodgram_shared::Result<String> {
        self.recipe_query()
            .short_link(self.shortener.as_ref(), &self.config.server.base_url, id)
            .await
    }
}
