use std::ops::Deref;

use foodgram_db::table::{Subscription, User};
use foodgram_shared::{Identity, Page, Pagination, State};
use sea_query::{
    Alias, Expr, ExprTrait, Func, Order, Query as SeaQuery, SelectStatement, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub is_subscribed: bool,
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

    pub async fn profile(
        &self,
        id: impl Into<String>,
        viewer: &Identity,
    ) -> anyhow::Result<Option<Profile>> {
        let statement = profile_select(viewer)
            .and_where(Expr::col((User::Table, User::Id)).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Profile, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Profiles for the given ids, in no particular order.
    pub async fn profiles(&self, ids: &[String], viewer: &Identity) -> anyhow::Result<Vec<Profile>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = profile_select(viewer)
            .and_where(Expr::col((User::Table, User::Id)).is_in(ids.iter().cloned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Profile, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn list(
        &self,
        pagination: Pagination,
        viewer: &Identity,
    ) -> anyhow::Result<Page<Profile>> {
        let statement = SeaQuery::select()
            .expr(Func::count(Expr::col(User::Id)))
            .from(User::Table)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let statement = profile_select(viewer)
            .order_by((User::Table, User::Username), Order::Asc)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let results = sqlx::query_as_with::<_, Profile, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(Page { count, results })
    }
}

/// Base profile select; `is_subscribed` is relative to `viewer` and always
/// false for anonymous requests.
pub fn profile_select(viewer: &Identity) -> SelectStatement {
    let is_subscribed = match viewer.id() {
        Some(viewer) => Expr::exists(
            SeaQuery::select()
                .expr(Expr::val(1))
                .from(Subscription::Table)
                .and_where(Expr::col((Subscription::Table, Subscription::UserId)).eq(viewer))
                .and_where(
                    Expr::col((Subscription::Table, Subscription::AuthorId))
                        .equals((User::Table, User::Id)),
                )
                .to_owned(),
        ),
        None => Expr::val(false),
    };

    SeaQuery::select()
        .columns([
            (User::Table, User::Id),
            (User::Table, User::Email),
            (User::Table, User::Username),
            (User::Table, User::FirstName),
            (User::Table, User::LastName),
            (User::Table, User::Avatar),
        ])
        .expr_as(is_subscribed, Alias::new("is_subscribed"))
        .from(User::Table)
        .to_owned()
}
