mod avatar;
mod query;

pub use query::*;

use std::{ops::Deref, sync::LazyLock};

use foodgram_db::table::User;
use foodgram_shared::State;
use regex::Regex;
use sea_query::{Expr, ExprTrait, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use time::OffsetDateTime;
use validator::Validate;

static RE_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern"));

#[derive(Validate, Clone, Deserialize)]
pub struct RegisterInput {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 150), regex(path = *RE_USERNAME, message = "Only letters, digits and @/./+/-/_ are allowed."))]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
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

    pub async fn register(&self, input: RegisterInput) -> foodgram_shared::Result<String> {
        input.validate()?;

        let email = input.email.trim().to_lowercase();

        if self.exists(User::Email, &email).await? {
            foodgram_shared::conflict!("email already exists");
        }

        if self.exists(User::Username, &input.username).await? {
            foodgram_shared::conflict!("username already exists");
        }

        let id = ulid::Ulid::new().to_string();
        let statement = SeaQuery::insert()
            .into_table(User::Table)
            .columns([
                User::Id,
                User::Email,
                User::Username,
                User::FirstName,
                User::LastName,
                User::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                email.into(),
                input.username.to_owned().into(),
                input.first_name.trim().into(),
                input.last_name.trim().into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if let Err(e) = sqlx::query_with(&sql, values).execute(&self.write_db).await {
            if foodgram_shared::is_unique_violation(&e) {
                foodgram_shared::conflict!("user already exists");
            }

            return Err(e.into());
        }

        tracing::info!(user_id = id, username = input.username, "user registered");

        Ok(id)
    }

    async fn exists(&self, column: User, value: &str) -> anyhow::Result<bool> {
        let statement = SeaQuery::select()
            .column(User::Id)
            .from(User::Table)
            .and_where(Expr::col(column).eq(value))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.is_some())
    }
}
