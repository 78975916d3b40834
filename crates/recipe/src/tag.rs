use std::sync::LazyLock;

use foodgram_db::table::Tag;
use regex::Regex;
use sea_query::{Expr, ExprTrait, Order, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

static RE_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern"));

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TagRow {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Validate, Clone, Deserialize)]
pub struct TagInput {
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    #[validate(length(min = 1, max = 32), regex(path = *RE_SLUG, message = "Only letters, digits, - and _ are allowed."))]
    pub slug: String,
}

impl crate::Command {
    pub async fn create_tag(&self, input: TagInput) -> foodgram_shared::Result<String> {
        input.validate()?;

        let id = ulid::Ulid::new().to_string();
        let statement = SeaQuery::insert()
            .into_table(Tag::Table)
            .columns([Tag::Id, Tag::Name, Tag::Slug])
            .values_panic([
                id.to_owned().into(),
                input.name.trim().into(),
                input.slug.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if let Err(e) = sqlx::query_with(&sql, values).execute(&self.write_db).await {
            if foodgram_shared::is_unique_violation(&e) {
                foodgram_shared::conflict!("tag already exists");
            }

            return Err(e.into());
        }

        tracing::info!(tag_id = id, slug = input.slug, "tag created");

        Ok(id)
    }
}

impl crate::Query {
    pub async fn tags(&self) -> anyhow::Result<Vec<TagRow>> {
        let statement = SeaQuery::select()
            .columns([Tag::Id, Tag::Name, Tag::Slug])
            .from(Tag::Table)
            .order_by(Tag::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn tag(&self, id: impl Into<String>) -> anyhow::Result<Option<TagRow>> {
        let statement = SeaQuery::select()
            .columns([Tag::Id, Tag::Name, Tag::Slug])
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    pub(crate) async fn tags_by_ids(&self, ids: &[String]) -> anyhow::Result<Vec<TagRow>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = SeaQuery::select()
            .columns([Tag::Id, Tag::Name, Tag::Slug])
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).is_in(ids.iter().cloned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }
}
