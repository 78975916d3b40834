use axum::{http::StatusCode, response::IntoResponse};
use foodgram::AppError;
use foodgram_recipe::ListKind;
use foodgram_shared::Identity;
use http_body_util::BodyExt;
use temp_dir::TempDir;

mod helpers;

async fn respond(err: foodgram_shared::Error) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let response = AppError::from(err).into_response();
    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();

    Ok((status, serde_json::from_slice(&body)?))
}

#[tokio::test]
async fn test_domain_errors_map_to_status() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.path()).await?;
    let cmd = app.recipe_command();

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
    let recipe = helpers::create_recipe(&app, &john, &[(&salt, 1)], &tag).await?;

    cmd.add_to(ListKind::ShoppingCart, &Identity::user(&jane), &recipe)
        .await?;
    let err = cmd
        .add_to(ListKind::ShoppingCart, &Identity::user(&jane), &recipe)
        .await
        .unwrap_err();
    let (status, body) = respond(err).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "already in list");

    let err = cmd
        .remove_from(ListKind::Favorites, &Identity::user(&jane), &recipe)
        .await
        .unwrap_err();
    let (status, _) = respond(err).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let err = cmd
        .delete(&Identity::user(&jane), &recipe)
        .await
        .unwrap_err();
    let (status, _) = respond(err).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let err = cmd
        .delete(&Identity::Anonymous, &recipe)
        .await
        .unwrap_err();
    let (status, _) = respond(err).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let err = cmd
        .add_to(ListKind::Favorites, &Identity::user(&jane), "missing")
        .await
        .unwrap_err();
    let (status, body) = respond(err).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "recipe not found");

    let err = cmd
        .create(
            &Identity::user(&john),
            helpers::recipe_input(&[(&salt, 1), (&salt, 2)], &tag),
        )
        .await
        .unwrap_err();
    let (status, body) = respond(err).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "duplicate ingredient");
    assert_eq!(body["field"], "ingredients");

    let err = app
        .subscription_command()
        .subscribe(&Identity::user(&john), &john, None)
        .await
        .unwrap_err();
    let (status, body) = respond(err).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "self-subscription");

    Ok(())
}
