use foodgram_db::table::Recipe;
use foodgram_shared::Identity;
use sea_query::{Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;

use super::RecipeInput;

impl super::Command {
    pub async fn create(
        &self,
        identity: &Identity,
        input: RecipeInput,
    ) -> foodgram_shared::Result<String> {
        let author_id = identity.require()?;

        self.check_payload(&input)?;
        self.check_references(&input).await?;

        let image =
            foodgram_shared::resolve_image(self.blob.as_ref(), "recipes", &input.image, None)
                .await?;

        let id = ulid::Ulid::new().to_string();
        if let Err(e) = self.insert(&id, author_id, &input, image.url()).await {
            self.release_image(image.url()).await;
            return Err(e);
        }

        tracing::info!(recipe_id = id, author_id, "recipe created");

        Ok(id)
    }

    async fn insert(
        &self,
        id: &str,
        author_id: &str,
        input: &RecipeInput,
        image: &str,
    ) -> foodgram_shared::Result<()> {
        let statement = SeaQuery::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::Id,
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Text,
                Recipe::CookingTime,
                Recipe::Image,
                Recipe::PubDate,
            ])
            .values_panic([
                id.into(),
                author_id.into(),
                input.name.trim().into(),
                input.text.to_owned().into(),
                input.cooking_time.into(),
                image.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .to_owned();

        let mut tx = self.write_db.begin().await?;

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        super::write_links(&mut tx, id, input).await?;

        tx.commit().await?;

        Ok(())
    }
}
