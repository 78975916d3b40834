use std::{
    collections::{HashMap, HashSet},
    ops::Deref,
};

use foodgram_db::table::{Ingredient, Recipe, RecipeIngredient, RecipeTag, Tag};
use foodgram_shared::{Identity, Page, Pagination, State};
use foodgram_user::Profile;
use sea_query::{
    Cond, Expr, ExprTrait, Func, Order, Query as SeaQuery, SelectStatement, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::{ListKind, TagRow};

/// Compact recipe used by ledger responses and subscription listings.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RecipeShort {
    pub id: String,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct IngredientAmount {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub id: String,
    pub tags: Vec<TagRow>,
    pub author: Profile,
    pub ingredients: Vec<IngredientAmount>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
    pub pub_date: i64,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RecipeFilter {
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}

#[derive(FromRow)]
struct RecipeRow {
    id: String,
    author_id: String,
    name: String,
    text: String,
    cooking_time: i64,
    image: String,
    pub_date: i64,
}

#[derive(FromRow)]
struct IngredientLink {
    recipe_id: String,
    id: String,
    name: String,
    measurement_unit: String,
    amount: i64,
}

#[derive(FromRow)]
struct TagLink {
    recipe_id: String,
    id: String,
    name: String,
    slug: String,
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

    pub async fn find(
        &self,
        id: impl Into<String>,
        viewer: &Identity,
    ) -> anyhow::Result<Option<RecipeView>> {
        let statement = recipe_select()
            .and_where(Expr::col((Recipe::Table, Recipe::Id)).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(row) = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![row], viewer).await?.pop())
    }

    /// Newest first. Ledger filters select nothing for anonymous viewers when
    /// set to true and are ignored when set to false.
    pub async fn filter(
        &self,
        filter: &RecipeFilter,
        pagination: Pagination,
        viewer: &Identity,
    ) -> anyhow::Result<Page<RecipeView>> {
        let mut cond = Cond::all();

        if !filter.tags.is_empty() {
            let tagged = SeaQuery::select()
                .column((RecipeTag::Table, RecipeTag::RecipeId))
                .from(RecipeTag::Table)
                .inner_join(
                    Tag::Table,
                    Expr::col((Tag::Table, Tag::Id)).equals((RecipeTag::Table, RecipeTag::TagId)),
                )
                .and_where(Expr::col((Tag::Table, Tag::Slug)).is_in(filter.tags.iter().cloned()))
                .to_owned();

            cond = cond.add(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(tagged));
        }

        if let Some(author) = filter.author.as_ref() {
            cond = cond.add(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(author.to_owned()));
        }

        for (kind, flag) in [
            (ListKind::Favorites, filter.is_favorited),
            (ListKind::ShoppingCart, filter.is_in_shopping_cart),
        ] {
            match (flag, viewer.id()) {
                (Some(true), None) => return Ok(Page::empty()),
                (Some(flag), Some(user_id)) => {
                    let listed = kind.recipe_ids(user_id);
                    let column = Expr::col((Recipe::Table, Recipe::Id));

                    cond = cond.add(if flag {
                        column.in_subquery(listed)
                    } else {
                        column.not_in_subquery(listed)
                    });
                }
                _ => {}
            }
        }

        let statement = SeaQuery::select()
            .expr(Func::count(Expr::col((Recipe::Table, Recipe::Id))))
            .from(Recipe::Table)
            .cond_where(cond.clone())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let statement = recipe_select()
            .cond_where(cond)
            .order_by((Recipe::Table, Recipe::PubDate), Order::Desc)
            .order_by_expr(Expr::cust("\"recipe\".\"rowid\""), Order::Desc)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(Page {
            count,
            results: self.hydrate(rows, viewer).await?,
        })
    }

    pub async fn short(&self, id: impl Into<String>) -> anyhow::Result<Option<RecipeShort>> {
        let statement = SeaQuery::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::Image, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeShort, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Newest recipes of an author, capped at `limit` when given.
    pub async fn by_author(
        &self,
        author_id: impl Into<String>,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<RecipeShort>> {
        let mut statement = SeaQuery::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::Image, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id.into()))
            .order_by(Recipe::PubDate, Order::Desc)
            .order_by_expr(Expr::cust("\"rowid\""), Order::Desc)
            .to_owned();

        if let Some(limit) = limit {
            statement.limit(limit);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeShort, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn count_by_author(&self, author_id: impl Into<String>) -> anyhow::Result<i64> {
        let statement = SeaQuery::select()
            .expr(Func::count(Expr::col(Recipe::Id)))
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        Ok(count)
    }

    async fn hydrate(
        &self,
        rows: Vec<RecipeRow>,
        viewer: &Identity,
    ) -> anyhow::Result<Vec<RecipeView>> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let ids = rows.iter().map(|r| r.id.to_owned()).collect::<Vec<_>>();
        let mut ingredients = self.ingredient_links(&ids).await?;
        let mut tags = self.tag_links(&ids).await?;

        let author_ids = rows
            .iter()
            .map(|r| r.author_id.to_owned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        let authors = foodgram_user::Query::new(self.0.clone())
            .profiles(&author_ids, viewer)
            .await?
            .into_iter()
            .map(|p| (p.id.to_owned(), p))
            .collect::<HashMap<_, _>>();

        let (favorites, cart) = match viewer.id() {
            Some(user_id) => (
                self.listed(ListKind::Favorites, user_id, &ids).await?,
                self.listed(ListKind::ShoppingCart, user_id, &ids).await?,
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        let mut views = vec![];
        for row in rows {
            let Some(author) = authors.get(&row.author_id).cloned() else {
                anyhow::bail!("author {} of recipe {} not found", row.author_id, row.id);
            };

            views.push(RecipeView {
                tags: tags.remove(&row.id).unwrap_or_default(),
                ingredients: ingredients.remove(&row.id).unwrap_or_default(),
                is_favorited: favorites.contains(&row.id),
                is_in_shopping_cart: cart.contains(&row.id),
                author,
                id: row.id,
                name: row.name,
                image: row.image,
                text: row.text,
                cooking_time: row.cooking_time,
                pub_date: row.pub_date,
            });
        }

        Ok(views)
    }

    async fn ingredient_links(
        &self,
        ids: &[String],
    ) -> anyhow::Result<HashMap<String, Vec<IngredientAmount>>> {
        let statement = SeaQuery::select()
            .column((RecipeIngredient::Table, RecipeIngredient::RecipeId))
            .column((Ingredient::Table, Ingredient::Id))
            .column((Ingredient::Table, Ingredient::Name))
            .column((Ingredient::Table, Ingredient::MeasurementUnit))
            .column((RecipeIngredient::Table, RecipeIngredient::Amount))
            .from(RecipeIngredient::Table)
            .inner_join(
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .and_where(
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                    .is_in(ids.iter().cloned()),
            )
            .order_by((Ingredient::Table, Ingredient::Name), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let links = sqlx::query_as_with::<_, IngredientLink, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let mut grouped: HashMap<String, Vec<IngredientAmount>> = HashMap::new();
        for link in links {
            grouped
                .entry(link.recipe_id)
                .or_default()
                .push(IngredientAmount {
                    id: link.id,
                    name: link.name,
                    measurement_unit: link.measurement_unit,
                    amount: link.amount,
                });
        }

        Ok(grouped)
    }

    async fn tag_links(&self, ids: &[String]) -> anyhow::Result<HashMap<String, Vec<TagRow>>> {
        let statement = SeaQuery::select()
            .column((RecipeTag::Table, RecipeTag::RecipeId))
            .column((Tag::Table, Tag::Id))
            .column((Tag::Table, Tag::Name))
            .column((Tag::Table, Tag::Slug))
            .from(RecipeTag::Table)
            .inner_join(
                Tag::Table,
                Expr::col((Tag::Table, Tag::Id)).equals((RecipeTag::Table, RecipeTag::TagId)),
            )
            .and_where(Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).is_in(ids.iter().cloned()))
            .order_by((Tag::Table, Tag::Name), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let links = sqlx::query_as_with::<_, TagLink, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let mut grouped: HashMap<String, Vec<TagRow>> = HashMap::new();
        for link in links {
            grouped.entry(link.recipe_id).or_default().push(TagRow {
                id: link.id,
                name: link.name,
                slug: link.slug,
            });
        }

        Ok(grouped)
    }
}

fn recipe_select() -> SelectStatement {
    SeaQuery::select()
        .columns([
            (Recipe::Table, Recipe::Id),
            (Recipe::Table, Recipe::AuthorId),
            (Recipe::Table, Recipe::Name),
            (Recipe::Table, Recipe::Text),
            (Recipe::Table, Recipe::CookingTime),
            (Recipe::Table, Recipe::Image),
            (Recipe::Table, Recipe::PubDate),
        ])
        .from(Recipe::Table)
        .to_owned()
}
