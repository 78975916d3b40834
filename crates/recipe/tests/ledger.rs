use foodgram_recipe::ListKind;
use foodgram_shared::{Error, Identity};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_add_and_remove() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, dir.child("media"));
    let query = foodgram_recipe::Query::new(state.clone());

    let john = helpers::create_user(&state, "john").await?;
    let salt = helpers::create_ingredient(&state, "salt", "g").await?;
    let tag = helpers::create_tag(&cmd, "Lunch", "lunch").await?;
    let identity = Identity::user(&john);

    let id = cmd
        .create(&identity, helpers::recipe_input("Soup", &[(&salt, 1)], &[&tag]))
        .await?;

    for kind in [ListKind::Favorites, ListKind::ShoppingCart] {
        let short = cmd.add_to(kind, &identity, &id).await?;
        assert_eq!(short.id, id);
        assert_eq!(short.name, "Soup");
        assert_eq!(short.cooking_time, 10);

        let err = cmd.add_to(kind, &identity, &id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(err.to_string(), "already in list");
    }

    let recipe = query.find(&id, &identity).await?.unwrap();
    assert!(recipe.is_favorited);
    assert!(recipe.is_in_shopping_cart);

    let recipe = query.find(&id, &Identity::Anonymous).await?.unwrap();
    assert!(!recipe.is_favorited);
    assert!(!recipe.is_in_shopping_cart);

    cmd.remove_from(ListKind::Favorites, &identity, &id).await?;
    assert!(!query.contains(ListKind::Favorites, &john, &id).await?);
    assert!(query.contains(ListKind::ShoppingCart, &john, &id).await?);

    let err = cmd
        .remove_from(ListKind::Favorites, &identity, &id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotMember(_)));
    assert_eq!(err.to_string(), "recipe is not in favorites");

    Ok(())
}

#[tokio::test]
async fn validate_ledger_requests() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, dir.child("media"));

    let john = helpers::create_user(&state, "john").await?;

    let err = cmd
        .add_to(ListKind::ShoppingCart, &Identity::user(&john), "missing")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "recipe not found");

    let err = cmd
        .remove_from(ListKind::ShoppingCart, &Identity::user(&john), "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = cmd
        .add_to(ListKind::Favorites, &Identity::Anonymous, "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));

    Ok(())
}

#[tokio::test]
async fn concurrent_adds_store_one_row() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, dir.child("media"));

    let john = helpers::create_user(&state, "john").await?;
    let salt = helpers::create_ingredient(&state, "salt", "g").await?;
    let tag = helpers::create_tag(&cmd, "Lunch", "lunch").await?;
    let identity = Identity::user(&john);

    let id = cmd
        .create(&identity, helpers::recipe_input("Soup", &[(&salt, 1)], &[&tag]))
        .await?;

    let (first, second) = tokio::join!(
        cmd.add_to(ListKind::ShoppingCart, &identity, &id),
        cmd.add_to(ListKind::ShoppingCart, &identity, &id),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(Error::Conflict(msg)) if msg == "already in list"))
    );

    let err = cmd
        .add_to(ListKind::ShoppingCart, &identity, &id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM shopping_cart WHERE user_id = ? AND recipe_id = ?",
    )
    .bind(&john)
    .bind(&id)
    .fetch_one(&state.read_db)
    .await?;
    assert_eq!(rows, 1);

    Ok(())
}
