mod create;
mod delete;
mod update;

use std::{collections::HashSet, ops::Deref, sync::Arc};

use foodgram_db::table::{Ingredient, Recipe, RecipeIngredient, RecipeTag, Tag};
use foodgram_shared::{BlobStore, State};
use sea_query::{Expr, ExprTrait, Func, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqliteConnection;
use validator::Validate;

pub const DEFAULT_MIN_COOKING_TIME: i64 = 1;
pub const MAX_COOKING_TIME: i64 = 32_767;
pub const MAX_AMOUNT: i64 = 32_767;

#[derive(Debug, Clone, Deserialize)]
pub struct IngredientAmountInput {
    pub id: String,
    pub amount: i64,
}

#[derive(Validate, Clone, Deserialize)]
pub struct RecipeInput {
    pub ingredients: Vec<IngredientAmountInput>,
    pub tags: Vec<String>,
    pub image: String,
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1))]
    pub text: String,
    pub cooking_time: i64,
}

#[derive(Clone)]
pub struct Command {
    state: State,
    blob: Arc<dyn BlobStore>,
    min_cooking_time: i64,
}

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: State, blob: Arc<dyn BlobStore>) -> Self {
        Self {
            state,
            blob,
            min_cooking_time: DEFAULT_MIN_COOKING_TIME,
        }
    }

    pub fn min_cooking_time(mut self, minutes: i64) -> Self {
        self.min_cooking_time = minutes;
        self
    }

    pub(crate) fn query(&self) -> crate::Query {
        crate::Query::new(self.state.clone())
    }

    /// Returns the stored image of a recipe owned by `user_id`.
    async fn owned_image(&self, id: &str, user_id: &str) -> foodgram_shared::Result<String> {
        let statement = SeaQuery::select()
            .columns([Recipe::AuthorId, Recipe::Image])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some((author_id, image)) = sqlx::query_as_with::<_, (String, String), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        else {
            foodgram_shared::not_found!("recipe");
        };

        if author_id != user_id {
            foodgram_shared::forbidden!("not author of recipe");
        }

        Ok(image)
    }

    /// Rejects the payload before any storage access.
    fn check_payload(&self, input: &RecipeInput) -> foodgram_shared::Result<()> {
        input.validate()?;

        if input.name.trim().is_empty() {
            foodgram_shared::invalid!("name", "name required");
        }

        if input.text.trim().is_empty() {
            foodgram_shared::invalid!("text", "text required");
        }

        if input.cooking_time < self.min_cooking_time {
            return Err(foodgram_shared::Error::Invalid {
                field: "cooking_time",
                message: format!(
                    "cooking time must be at least {} minute(s)",
                    self.min_cooking_time
                ),
            });
        }

        if input.cooking_time > MAX_COOKING_TIME {
            return Err(foodgram_shared::Error::Invalid {
                field: "cooking_time",
                message: format!("cooking time must be at most {MAX_COOKING_TIME} minutes"),
            });
        }

        if input.ingredients.is_empty() {
            foodgram_shared::invalid!("ingredients", "ingredients required");
        }

        let mut seen = HashSet::new();
        for item in input.ingredients.iter() {
            if !seen.insert(item.id.as_str()) {
                foodgram_shared::invalid!("ingredients", "duplicate ingredient");
            }

            if item.amount <= 0 {
                foodgram_shared::invalid!("ingredients", "amount must be > 0");
            }

            if item.amount > MAX_AMOUNT {
                return Err(foodgram_shared::Error::Invalid {
                    field: "ingredients",
                    message: format!("amount must be <= {MAX_AMOUNT}"),
                });
            }
        }

        if input.tags.is_empty() {
            foodgram_shared::invalid!("tags", "tags required");
        }

        let mut seen = HashSet::new();
        for tag in input.tags.iter() {
            if !seen.insert(tag.as_str()) {
                foodgram_shared::invalid!("tags", "duplicate tag");
            }
        }

        Ok(())
    }

    /// Every referenced ingredient and tag must exist.
    async fn check_references(&self, input: &RecipeInput) -> foodgram_shared::Result<()> {
        let ids = input
            .ingredients
            .iter()
            .map(|i| i.id.to_owned())
            .collect::<Vec<_>>();

        let statement = SeaQuery::select()
            .expr(Func::count(Expr::col(Ingredient::Id)))
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).is_in(ids.iter().cloned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (found,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        if found as usize != ids.len() {
            foodgram_shared::not_found!("ingredient");
        }

        let statement = SeaQuery::select()
            .expr(Func::count(Expr::col(Tag::Id)))
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).is_in(input.tags.iter().cloned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (found,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        if found as usize != input.tags.len() {
            foodgram_shared::not_found!("tag");
        }

        Ok(())
    }

    async fn release_image(&self, url: &str) {
        if let Err(e) = self.blob.delete(url).await {
            tracing::warn!(url, error = %e, "failed to release recipe image");
        }
    }
}

async fn write_links(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    input: &RecipeInput,
) -> anyhow::Result<()> {
    let mut statement = SeaQuery::insert()
        .into_table(RecipeIngredient::Table)
        .columns([
            RecipeIngredient::RecipeId,
            RecipeIngredient::IngredientId,
            RecipeIngredient::Amount,
        ])
        .to_owned();

    for item in input.ingredients.iter() {
        statement.values_panic([
            recipe_id.into(),
            item.id.to_owned().into(),
            item.amount.into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let mut statement = SeaQuery::insert()
        .into_table(RecipeTag::Table)
        .columns([RecipeTag::RecipeId, RecipeTag::TagId])
        .to_owned();

    for tag in input.tags.iter() {
        statement.values_panic([recipe_id.into(), tag.to_owned().into()]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

async fn clear_links(conn: &mut SqliteConnection, recipe_id: &str) -> anyhow::Result<()> {
    let statement = SeaQuery::delete()
        .from_table(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let statement = SeaQuery::delete()
        .from_table(RecipeTag::Table)
        .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}
