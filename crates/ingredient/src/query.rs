use std::ops::Deref;

use foodgram_db::table::Ingredient;
use foodgram_shared::State;
use sea_query::{Expr, ExprTrait, LikeExpr, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct IngredientRow {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Clone)]
pub struct Query(pub State);

impl Deref for Query {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    pub fn new(state: State) -> Self {
        Self(state)
    }

    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<IngredientRow>> {
        let statement = sea_query::Query::select()
            .columns([
                Ingredient::Id,
                Ingredient::Name,
                Ingredient::MeasurementUnit,
            ])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Ingredients whose name starts with `prefix`, ignoring case in any script, by name.
    pub async fn search(&self, prefix: Option<&str>) -> anyhow::Result<Vec<IngredientRow>> {
        let mut statement = sea_query::Query::select()
            .columns([
                Ingredient::Id,
                Ingredient::Name,
                Ingredient::MeasurementUnit,
            ])
            .from(Ingredient::Table)
            .order_by(Ingredient::Name, Order::Asc)
            .order_by(Ingredient::MeasurementUnit, Order::Asc)
            .to_owned();

        if let Some(prefix) = prefix.map(str::trim).filter(|p| !p.is_empty()) {
            let escaped = prefix
                .to_lowercase()
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            let pattern = LikeExpr::new(format!("{escaped}%")).escape('\\');
            statement.and_where(Expr::col(Ingredient::NameSearch).like(pattern));
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }
}
