use std::{collections::HashMap, ops::Deref};

use foodgram_db::table::{Subscription, User};
use foodgram_recipe::RecipeShort;
use foodgram_shared::{Identity, Page, Pagination, State};
use foodgram_user::Profile;
use sea_query::{Expr, ExprTrait, Func, Order, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;

/// A followed author with a slice of their recipes.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub author: Profile,
    pub recipes: Vec<RecipeShort>,
    pub recipes_count: i64,
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

    pub async fn view(
        &self,
        author_id: &str,
        viewer: &Identity,
        recipes_limit: Option<u64>,
    ) -> anyhow::Result<Option<SubscriptionView>> {
        let Some(author) = foodgram_user::Query::new(self.0.clone())
            .profile(author_id, viewer)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(self.with_recipes(author, recipes_limit).await?))
    }

    /// Authors followed by the requester, most recent subscription first.
    pub async fn subscriptions(
        &self,
        identity: &Identity,
        pagination: Pagination,
        recipes_limit: Option<u64>,
    ) -> foodgram_shared::Result<Page<SubscriptionView>> {
        let user_id = identity.require()?;

        let statement = SeaQuery::select()
            .expr(Func::count(Expr::col(Subscription::AuthorId)))
            .from(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let statement = SeaQuery::select()
            .column(Subscription::AuthorId)
            .from(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .order_by(Subscription::CreatedAt, Order::Desc)
            .order_by_expr(Expr::cust("\"rowid\""), Order::Desc)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let author_ids = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?
            .into_iter()
            .map(|(id,)| id)
            .collect::<Vec<_>>();

        let mut profiles = foodgram_user::Query::new(self.0.clone())
            .profiles(&author_ids, identity)
            .await?
            .into_iter()
            .map(|p| (p.id.to_owned(), p))
            .collect::<HashMap<_, _>>();

        let mut results = vec![];
        for id in author_ids {
            let Some(author) = profiles.remove(&id) else {
                continue;
            };

            results.push(self.with_recipes(author, recipes_limit).await?);
        }

        Ok(Page { count, results })
    }

    pub(crate) async fn author_exists(&self, author_id: &str) -> anyhow::Result<bool> {
        let statement = SeaQuery::select()
            .column(User::Id)
            .from(User::Table)
            .and_where(Expr::col(User::Id).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.is_some())
    }

    async fn with_recipes(
        &self,
        author: Profile,
        recipes_limit: Option<u64>,
    ) -> anyhow::Result<SubscriptionView> {
        let recipes = foodgram_recipe::Query::new(self.0.clone());

        Ok(SubscriptionView {
            recipes: recipes.by_author(&author.id, recipes_limit).await?,
            recipes_count: recipes.count_by_author(&author.id).await?,
            author,
        })
    }
}
