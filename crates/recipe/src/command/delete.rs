use foodgram_db::table::{Favorite, Recipe, RecipeIngredient, RecipeTag, ShoppingCart};
use foodgram_shared::Identity;
use sea_query::{Expr, ExprTrait, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Removes the recipe together with its links and every ledger entry
    /// pointing at it.
    pub async fn delete(&self, identity: &Identity, id: &str) -> foodgram_shared::Result<()> {
        let user_id = identity.require()?;
        let image = self.owned_image(id, user_id).await?;

        let statements = [
            SeaQuery::delete()
                .from_table(RecipeIngredient::Table)
                .and_where(Expr::col(RecipeIngredient::RecipeId).eq(id))
                .to_owned(),
            SeaQuery::delete()
                .from_table(RecipeTag::Table)
                .and_where(Expr::col(RecipeTag::RecipeId).eq(id))
                .to_owned(),
            SeaQuery::delete()
                .from_table(Favorite::Table)
                .and_where(Expr::col(Favorite::RecipeId).eq(id))
                .to_owned(),
            SeaQuery::delete()
                .from_table(ShoppingCart::Table)
                .and_where(Expr::col(ShoppingCart::RecipeId).eq(id))
                .to_owned(),
            SeaQuery::delete()
                .from_table(Recipe::Table)
                .and_where(Expr::col(Recipe::Id).eq(id))
                .to_owned(),
        ];

        let mut tx = self.write_db.begin().await?;

        for statement in statements {
            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        self.release_image(&image).await;

        tracing::info!(recipe_id = id, user_id, "recipe deleted");

        Ok(())
    }
}
