use std::sync::Arc;

use foodgram_recipe::LinkShortener;
use foodgram_shared::{Identity, Pagination};
use temp_dir::TempDir;

mod helpers;

struct Fixed;

#[async_trait::async_trait]
impl LinkShortener for Fixed {
    async fn shorten(&self, _url: &str) -> anyhow::Result<String> {
        Ok("https://tinyurl.com/abc".to_string())
    }
}

#[tokio::test]
async fn test_migrate_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = helpers::test_config(dir.path())?;

    foodgram::migrate::migrate(&config).await?;
    foodgram::migrate::migrate(&config).await?;

    let app = foodgram::AppState::connect(config.clone()).await?;
    helpers::create_user(&app, "john").await?;
    app.state.read_db.close().await;
    app.state.write_db.close().await;

    foodgram::migrate::reset(&config).await?;

    let app = foodgram::AppState::connect(config).await?;
    let page = app
        .user_query()
        .list(Pagination::default(), &Identity::Anonymous)
        .await?;
    assert_eq!(page.count, 0);

    Ok(())
}

#[tokio::test]
async fn test_recipe_flow() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.path())
        .await?
        .with_shortener(Arc::new(Fixed));

    let john = helpers::create_user(&app, "john").await?;
    let jane = helpers::create_user(&app, "jane").await?;
    let salt = app
        .ingredient_command()
        .create(foodgram_ingredient::CreateInput {
            name: "salt".to_owned(),
            measurement_unit: "g".to_owned(),
        })
        .await?;
    let tag = helpers::create_tag(&app, "lunch").await?;
    let recipe = helpers::create_recipe(&app, &john, &[(&salt, 2)], &tag).await?;

    let view = app
        .recipe_query()
        .find(&recipe, &Identity::user(&jane))
        .await?
        .unwrap();
    assert!(view.image.starts_with("http://localhost:8000/media/recipes/"));
    assert!(!view.author.is_subscribed);

    app.subscription_command()
        .subscribe(&Identity::user(&jane), &john, Some(3))
        .await?;

    let view = app
        .recipe_query()
        .find(&recipe, &Identity::user(&jane))
        .await?
        .unwrap();
    assert!(view.author.is_subscribed);

    let link = app.recipe_link(&recipe).await?;
    assert_eq!(link, "https://tinyurl.com/abc");

    let mut input = helpers::recipe_input(&[(&salt, 2)], &tag);
    input.cooking_time = 0;
    let err = app
        .recipe_command()
        .create(&Identity::user(&john), input)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "cooking time must be at least 1 minute(s)");

    Ok(())
}
