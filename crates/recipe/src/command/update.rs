use foodgram_db::table::Recipe;
use foodgram_shared::Identity;
use sea_query::{Expr, ExprTrait, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::RecipeInput;

impl super::Command {
    /// Replaces the scalar fields and the full ingredient and tag sets.
    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        input: RecipeInput,
    ) -> foodgram_shared::Result<()> {
        let user_id = identity.require()?;
        let previous_image = self.owned_image(id, user_id).await?;

        self.check_payload(&input)?;
        self.check_references(&input).await?;

        let image = foodgram_shared::resolve_image(
            self.blob.as_ref(),
            "recipes",
            &input.image,
            Some(&previous_image),
        )
        .await?;

        if let Err(e) = self.replace(id, &input, image.url()).await {
            if image.is_uploaded() {
                self.release_image(image.url()).await;
            }
            return Err(e);
        }

        if image.is_uploaded() {
            self.release_image(&previous_image).await;
        }

        tracing::info!(recipe_id = id, user_id, "recipe updated");

        Ok(())
    }

    async fn replace(
        &self,
        id: &str,
        input: &RecipeInput,
        image: &str,
    ) -> foodgram_shared::Result<()> {
        let statement = SeaQuery::update()
            .table(Recipe::Table)
            .values([
                (Recipe::Name, input.name.trim().into()),
                (Recipe::Text, input.text.to_owned().into()),
                (Recipe::CookingTime, input.cooking_time.into()),
                (Recipe::Image, image.into()),
            ])
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        let mut tx = self.write_db.begin().await?;

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        super::clear_links(&mut tx, id).await?;
        super::write_links(&mut tx, id, input).await?;

        tx.commit().await?;

        Ok(())
    }
}
