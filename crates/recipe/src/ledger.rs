use std::collections::HashSet;

use foodgram_db::table::{Favorite, ShoppingCart};
use foodgram_shared::Identity;
use sea_query::{
    DynIden, Expr, ExprTrait, IntoIden, OnConflict, Query as SeaQuery, SelectStatement,
    SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;

use crate::RecipeShort;

/// Per-user recipe lists sharing the same add/remove contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Favorites,
    ShoppingCart,
}

impl ListKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::ShoppingCart => "shopping cart",
        }
    }

    fn table(self) -> DynIden {
        match self {
            Self::Favorites => Favorite::Table.into_iden(),
            Self::ShoppingCart => ShoppingCart::Table.into_iden(),
        }
    }

    fn user_id(self) -> DynIden {
        match self {
            Self::Favorites => Favorite::UserId.into_iden(),
            Self::ShoppingCart => ShoppingCart::UserId.into_iden(),
        }
    }

    fn recipe_id(self) -> DynIden {
        match self {
            Self::Favorites => Favorite::RecipeId.into_iden(),
            Self::ShoppingCart => ShoppingCart::RecipeId.into_iden(),
        }
    }

    fn created_at(self) -> DynIden {
        match self {
            Self::Favorites => Favorite::CreatedAt.into_iden(),
            Self::ShoppingCart => ShoppingCart::CreatedAt.into_iden(),
        }
    }

    /// Recipe ids listed by `user_id`, usable as a subquery.
    pub fn recipe_ids(self, user_id: &str) -> SelectStatement {
        SeaQuery::select()
            .column(self.recipe_id())
            .from(self.table())
            .and_where(Expr::col(self.user_id()).eq(user_id))
            .to_owned()
    }
}

impl crate::Command {
    pub async fn add_to(
        &self,
        kind: ListKind,
        identity: &Identity,
        recipe_id: &str,
    ) -> foodgram_shared::Result<RecipeShort> {
        let user_id = identity.require()?;

        let Some(recipe) = self.query().short(recipe_id).await? else {
            foodgram_shared::not_found!("recipe");
        };

        let statement = SeaQuery::insert()
            .into_table(kind.table())
            .columns([kind.user_id(), kind.recipe_id(), kind.created_at()])
            .values_panic([
                user_id.into(),
                recipe_id.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .on_conflict(
                OnConflict::columns([kind.user_id(), kind.recipe_id()])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            foodgram_shared::conflict!("already in list");
        }

        tracing::info!(user_id, recipe_id, list = kind.label(), "recipe listed");

        Ok(recipe)
    }

    pub async fn remove_from(
        &self,
        kind: ListKind,
        identity: &Identity,
        recipe_id: &str,
    ) -> foodgram_shared::Result<()> {
        let user_id = identity.require()?;

        if self.query().short(recipe_id).await?.is_none() {
            foodgram_shared::not_found!("recipe");
        }

        let statement = SeaQuery::delete()
            .from_table(kind.table())
            .and_where(Expr::col(kind.user_id()).eq(user_id))
            .and_where(Expr::col(kind.recipe_id()).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(foodgram_shared::Error::NotMember(format!(
                "recipe is not in {}",
                kind.label()
            )));
        }

        tracing::info!(user_id, recipe_id, list = kind.label(), "recipe unlisted");

        Ok(())
    }
}

impl crate::Query {
    pub async fn contains(
        &self,
        kind: ListKind,
        user_id: &str,
        recipe_id: &str,
    ) -> anyhow::Result<bool> {
        let listed = self.listed(kind, user_id, &[recipe_id.to_owned()]).await?;

        Ok(!listed.is_empty())
    }

    /// Subset of `recipe_ids` present in the user's list.
    pub(crate) async fn listed(
        &self,
        kind: ListKind,
        user_id: &str,
        recipe_ids: &[String],
    ) -> anyhow::Result<HashSet<String>> {
        let statement = kind
            .recipe_ids(user_id)
            .and_where(Expr::col(kind.recipe_id()).is_in(recipe_ids.iter().cloned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
