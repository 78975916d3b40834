mod import;
mod query;

pub use import::ImportReport;
pub use query::*;

use std::ops::Deref;

use foodgram_db::table::Ingredient;
use foodgram_shared::State;
use sea_query::{Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

#[derive(Validate, Clone, Debug)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(max = 256))]
    pub measurement_unit: String,
}

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

    pub async fn create(&self, input: CreateInput) -> foodgram_shared::Result<String> {
        input.validate()?;

        let name = input.name.trim();
        let id = ulid::Ulid::new().to_string();
        let statement = SeaQuery::insert()
            .into_table(Ingredient::Table)
            .columns([
                Ingredient::Id,
                Ingredient::Name,
                Ingredient::NameSearch,
                Ingredient::MeasurementUnit,
            ])
            .values_panic([
                id.to_owned().into(),
                name.into(),
                name.to_lowercase().into(),
                input.measurement_unit.trim().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(id)
    }
}
