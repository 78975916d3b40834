mod query;

pub use query::*;

use std::ops::Deref;

use foodgram_db::table::Subscription;
use foodgram_shared::{Identity, State};
use sea_query::{Expr, ExprTrait, OnConflict, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;

#[derive(Clone)]
pub struct Command(pub State);

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub fn new(state: State) -> Self {
        Self(state)
    }

    /// Follows `author_id` and returns the author with up to `recipes_limit`
    /// of their newest recipes.
    pub async fn subscribe(
        &self,
        identity: &Identity,
        author_id: &str,
        recipes_limit: Option<u64>,
    ) -> foodgram_shared::Result<SubscriptionView> {
        let user_id = identity.require()?;

        if user_id == author_id {
            foodgram_shared::conflict!("self-subscription");
        }

        let query = Query::new(self.0.clone());
        if !query.author_exists(author_id).await? {
            foodgram_shared::not_found!("user");
        }

        let statement = SeaQuery::insert()
            .into_table(Subscription::Table)
            .columns([
                Subscription::UserId,
                Subscription::AuthorId,
                Subscription::CreatedAt,
            ])
            .values_panic([
                user_id.into(),
                author_id.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .on_conflict(
                OnConflict::columns([Subscription::UserId, Subscription::AuthorId])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            foodgram_shared::conflict!("already subscribed");
        }

        tracing::info!(user_id, author_id, "subscribed");

        let Some(view) = query.view(author_id, identity, recipes_limit).await? else {
            foodgram_shared::not_found!("user");
        };

        Ok(view)
    }

    pub async fn unsubscribe(
        &self,
        identity: &Identity,
        author_id: &str,
    ) -> foodgram_shared::Result<()> {
        let user_id = identity.require()?;

        if !Query::new(self.0.clone()).author_exists(author_id).await? {
            foodgram_shared::not_found!("user");
        }

        let statement = SeaQuery::delete()
            .from_table(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .and_where(Expr::col(Subscription::AuthorId).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            foodgram_shared::not_member!("not subscribed");
        }

        tracing::info!(user_id, author_id, "unsubscribed");

        Ok(())
    }
}
