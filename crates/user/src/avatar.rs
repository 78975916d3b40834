use foodgram_db::table::User;
use foodgram_shared::{BlobStore, Identity};
use sea_query::{Expr, ExprTrait, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Stores a new avatar and returns its URL; the previous blob is released.
    pub async fn set_avatar(
        &self,
        store: &dyn BlobStore,
        identity: &Identity,
        image: &str,
    ) -> foodgram_shared::Result<String> {
        let user_id = identity.require()?;
        let previous = self.current_avatar(user_id).await?;

        let image =
            foodgram_shared::resolve_image(store, "users", image, previous.as_deref()).await?;

        if let Err(e) = self.write_avatar(user_id, Some(image.url().to_owned())).await {
            if image.is_uploaded() {
                release(store, image.url()).await;
            }
            return Err(e.into());
        }

        if let Some(previous) = previous.filter(|_| image.is_uploaded()) {
            release(store, &previous).await;
        }

        tracing::info!(user_id, "avatar updated");

        Ok(image.url().to_owned())
    }

    pub async fn delete_avatar(
        &self,
        store: &dyn BlobStore,
        identity: &Identity,
    ) -> foodgram_shared::Result<()> {
        let user_id = identity.require()?;
        let previous = self.current_avatar(user_id).await?;

        self.write_avatar(user_id, None).await?;

        if let Some(previous) = previous {
            release(store, &previous).await;
        }

        Ok(())
    }

    async fn current_avatar(&self, user_id: &str) -> foodgram_shared::Result<Option<String>> {
        let statement = SeaQuery::select()
            .column(User::Avatar)
            .from(User::Table)
            .and_where(Expr::col(User::Id).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some((avatar,)) = sqlx::query_as_with::<_, (Option<String>,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        else {
            foodgram_shared::not_found!("user");
        };

        Ok(avatar)
    }

    async fn write_avatar(&self, user_id: &str, avatar: Option<String>) -> anyhow::Result<()> {
        let statement = SeaQuery::update()
            .table(User::Table)
            .value(User::Avatar, avatar)
            .and_where(Expr::col(User::Id).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }
}

async fn release(store: &dyn BlobStore, url: &str) {
    if let Err(e) = store.delete(url).await {
        tracing::warn!(url, error = %e, "failed to release avatar blob");
    }
}
