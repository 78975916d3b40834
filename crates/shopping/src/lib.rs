mod aggregation;
mod document;

pub use aggregation::*;
pub use document::{DOCUMENT_TITLE, render};

use std::{ops::Deref, path::PathBuf};

use foodgram_db::table::{Ingredient, RecipeIngredient, ShoppingCart};
use foodgram_shared::{Identity, State};
use sea_query::{Expr, ExprTrait, Func, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

pub const DOCUMENT_CONTENT_TYPE: &str = "application/pdf";
pub const DOCUMENT_FILENAME: &str = "shopping_list.pdf";

/// Aggregated shopping list of one user.
#[derive(Debug, Clone, PartialEq)]
pub enum ShoppingList {
    /// The cart holds no recipe.
    Empty,
    /// `lines` is empty when the cart's recipes lost all their ingredients.
    Ready {
        lines: Vec<ShoppingLine>,
        document: Vec<u8>,
    },
}

#[derive(Clone)]
pub struct Query {
    state: State,
    font_path: Option<PathBuf>,
}

impl Deref for Query {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Query {
    pub fn new(state: State) -> Self {
        Self {
            state,
            font_path: None,
        }
    }

    pub fn font_path(mut self, path: Option<PathBuf>) -> Self {
        self.font_path = path;
        self
    }

    /// Aggregated lines for every recipe in the user's cart.
    pub async fn lines(&self, user_id: impl Into<String>) -> anyhow::Result<Vec<ShoppingLine>> {
        let statement = SeaQuery::select()
            .column((Ingredient::Table, Ingredient::Name))
            .column((Ingredient::Table, Ingredient::MeasurementUnit))
            .column((RecipeIngredient::Table, RecipeIngredient::Amount))
            .from(ShoppingCart::Table)
            .inner_join(
                RecipeIngredient::Table,
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                    .equals((ShoppingCart::Table, ShoppingCart::RecipeId)),
            )
            .inner_join(
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(user_id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String, String, i64), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(aggregate(rows))
    }

    pub async fn cart_size(&self, user_id: impl Into<String>) -> anyhow::Result<i64> {
        let statement = SeaQuery::select()
            .expr(Func::count(Expr::col(ShoppingCart::RecipeId)))
            .from(ShoppingCart::Table)
            .and_where(Expr::col(ShoppingCart::UserId).eq(user_id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        Ok(count)
    }

    /// Aggregates the cart and renders it; a cart without recipes yields
    /// [`ShoppingList::Empty`] instead of a document.
    pub async fn shopping_list(&self, identity: &Identity) -> foodgram_shared::Result<ShoppingList> {
        let user_id = identity.require()?;

        if self.cart_size(user_id).await? == 0 {
            tracing::debug!(user_id, "shopping cart is empty");
            return Ok(ShoppingList::Empty);
        }

        let lines = self.lines(user_id).await?;

        let font_path = self.font_path.clone();
        let rendered = lines.clone();
        let document =
            tokio::task::spawn_blocking(move || render(&rendered, font_path.as_deref()))
                .await
                .map_err(anyhow::Error::from)??;

        tracing::info!(
            user_id,
            lines = lines.len(),
            size = document.len(),
            "shopping list rendered"
        );

        Ok(ShoppingList::Ready { lines, document })
    }
}
