use foodgram_recipe::{LinkShortener, ListKind, RecipeFilter, TagInput};
use foodgram_shared::{Error, Identity, Pagination};
use temp_dir::TempDir;

mod helpers;

struct Prefix;

#[async_trait::async_trait]
impl LinkShortener for Prefix {
    async fn shorten(&self, url: &str) -> anyhow::Result<String> {
        Ok(format!("https://short.localhost/{}", url.len()))
    }
}

struct Offline;

#[async_trait::async_trait]
impl LinkShortener for Offline {
    async fn shorten(&self, _url: &str) -> anyhow::Result<String> {
        anyhow::bail!("connection refused")
    }
}

fn names(page: &foodgram_shared::Page<foodgram_recipe::RecipeView>) -> Vec<&str> {
    page.results.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn test_filter() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, dir.child("media"));
    let query = foodgram_recipe::Query::new(state.clone());

    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;
    let salt = helpers::create_ingredient(&state, "salt", "g").await?;
    let breakfast = helpers::create_tag(&cmd, "Breakfast", "breakfast").await?;
    let dinner = helpers::create_tag(&cmd, "Dinner", "dinner").await?;
    let lunch = helpers::create_tag(&cmd, "Lunch", "lunch").await?;

    let omelette = cmd
        .create(
            &Identity::user(&john),
            helpers::recipe_input("Omelette", &[(&salt, 1)], &[&breakfast]),
        )
        .await?;
    cmd.create(
        &Identity::user(&john),
        helpers::recipe_input("Steak", &[(&salt, 2)], &[&dinner]),
    )
    .await?;
    let salad = cmd
        .create(
            &Identity::user(&jane),
            helpers::recipe_input("Salad", &[(&salt, 1)], &[&lunch, &dinner]),
        )
        .await?;

    let all = query
        .filter(&RecipeFilter::default(), Pagination::default(), &Identity::Anonymous)
        .await?;
    assert_eq!(all.count, 3);
    assert_eq!(names(&all), vec!["Salad", "Steak", "Omelette"]);

    let filter = RecipeFilter {
        tags: vec!["breakfast".to_owned(), "lunch".to_owned()],
        ..Default::default()
    };
    let page = query
        .filter(&filter, Pagination::default(), &Identity::Anonymous)
        .await?;
    assert_eq!(names(&page), vec!["Salad", "Omelette"]);

    let filter = RecipeFilter {
        author: Some(john.to_owned()),
        ..Default::default()
    };
    let page = query
        .filter(&filter, Pagination::default(), &Identity::Anonymous)
        .await?;
    assert_eq!(names(&page), vec!["Steak", "Omelette"]);

    cmd.add_to(ListKind::Favorites, &Identity::user(&jane), &omelette)
        .await?;
    cmd.add_to(ListKind::ShoppingCart, &Identity::user(&jane), &salad)
        .await?;

    let filter = RecipeFilter {
        is_favorited: Some(true),
        ..Default::default()
    };
    let page = query
        .filter(&filter, Pagination::default(), &Identity::user(&jane))
        .await?;
    assert_eq!(page.count, 1);
    assert_eq!(names(&page), vec!["Omelette"]);
    assert!(page.results[0].is_favorited);

    let page = query
        .filter(&filter, Pagination::default(), &Identity::Anonymous)
        .await?;
    assert_eq!(page.count, 0);
    assert!(page.results.is_empty());

    let filter = RecipeFilter {
        is_favorited: Some(false),
        is_in_shopping_cart: Some(false),
        ..Default::default()
    };
    let page = query
        .filter(&filter, Pagination::default(), &Identity::user(&jane))
        .await?;
    assert_eq!(names(&page), vec!["Steak"]);

    let page = query
        .filter(&filter, Pagination::default(), &Identity::Anonymous)
        .await?;
    assert_eq!(page.count, 3);

    let page = query
        .filter(
            &RecipeFilter::default(),
            Pagination {
                limit: 1,
                offset: 1,
            },
            &Identity::Anonymous,
        )
        .await?;
    assert_eq!(page.count, 3);
    assert_eq!(names(&page), vec!["Steak"]);

    let recipes = query.by_author(&john, Some(1)).await?;
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].name, "Steak");
    assert_eq!(query.count_by_author(&john).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_tags() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, dir.child("media"));
    let query = foodgram_recipe::Query::new(state.clone());

    let id = helpers::create_tag(&cmd, "Lunch", "lunch").await?;
    helpers::create_tag(&cmd, "Breakfast", "breakfast").await?;

    let err = cmd
        .create_tag(TagInput {
            name: "Lunch again".to_owned(),
            slug: "lunch".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let err = cmd
        .create_tag(TagInput {
            name: "Bad".to_owned(),
            slug: "bad slug".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let tags = query.tags().await?;
    let slugs = tags.iter().map(|t| t.slug.as_str()).collect::<Vec<_>>();
    assert_eq!(slugs, vec!["breakfast", "lunch"]);

    assert_eq!(query.tag(&id).await?.unwrap().name, "Lunch");
    assert!(query.tag("missing").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_short_link() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state, dir.child("media"));
    let query = foodgram_recipe::Query::new(state.clone());

    let john = helpers::create_user(&state, "john").await?;
    let salt = helpers::create_ingredient(&state, "salt", "g").await?;
    let tag = helpers::create_tag(&cmd, "Lunch", "lunch").await?;
    let id = cmd
        .create(
            &Identity::user(&john),
            helpers::recipe_input("Soup", &[(&salt, 1)], &[&tag]),
        )
        .await?;

    let full = format!("http://localhost:8000/recipes/{id}/");

    let link = query.short_link(&Prefix, "http://localhost:8000", &id).await?;
    assert_eq!(link, format!("https://short.localhost/{}", full.len()));

    let link = query.short_link(&Offline, "http://localhost:8000/", &id).await?;
    assert_eq!(link, full);

    let err = query
        .short_link(&Prefix, "http://localhost:8000", "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}
