use foodgram_recipe::RecipeFilter;
use foodgram_shared::pagination::PageArgs;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_filter() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_recipe::Command::new(state.clone());
    let query = foodgram_recipe::Query(state.clone());
    let catalog = helpers::create_catalog(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;
    let [breakfast, lunch, dinner] = catalog.tags[..] else {
        unreachable!()
    };
    let flour = catalog.ingredients[0];

    let omelette = cmd
        .create(john, helpers::recipe_input("Omelette", &[breakfast], &[(flour, 10)]))
        .await?;
    let bread = cmd
        .create(john, helpers::recipe_input("Bread", &[lunch, dinner], &[(flour, 500)]))
        .await?;
    let cake = cmd
        .create(albert, helpers::recipe_input("Cake", &[dinner], &[(flour, 300)]))
        .await?;

    let names = |page: &foodgram_shared::pagination::Page<foodgram_recipe::RecipeView>| {
        page.items.iter().map(|r| r.name.to_owned()).collect::<Vec<_>>()
    };

    let page = query
        .filter(None, RecipeFilter::default(), PageArgs::default())
        .await?;
    assert_eq!(page.count, 3);
    assert_eq!(names(&page), vec!["Bread", "Cake", "Omelette"]);

    let page = query
        .filter(
            None,
            RecipeFilter {
                author: Some(john),
                ..Default::default()
            },
            PageArgs::default(),
        )
        .await?;
    assert_eq!(names(&page), vec!["Bread", "Omelette"]);

    let page = query
        .filter(
            None,
            RecipeFilter {
                tags: vec!["breakfast".to_owned(), "lunch".to_owned()],
                ..Default::default()
            },
            PageArgs::default(),
        )
        .await?;
    assert_eq!(names(&page), vec!["Bread", "Omelette"]);

    let page = query
        .filter(
            None,
            RecipeFilter {
                tags: vec!["dinner".to_owned()],
                ..Default::default()
            },
            PageArgs::default(),
        )
        .await?;
    assert_eq!(page.count, 2);
    assert_eq!(names(&page), vec!["Bread", "Cake"]);

    cmd.favorite.save(john, cake).await?;
    sqlx::query("INSERT INTO shopping_cart (user_id, recipe_id, created_at) VALUES (?, ?, 0)")
        .bind(john)
        .bind(omelette)
        .execute(&state.write_db)
        .await?;

    let page = query
        .filter(
            Some(john),
            RecipeFilter {
                is_favorited: Some(false),
                ..Default::default()
            },
            PageArgs::default(),
        )
        .await?;
    assert_eq!(names(&page), vec!["Bread", "Omelette"]);

    let page = query
        .filter(
            Some(john),
            RecipeFilter {
                is_in_shopping_cart: Some(true),
                ..Default::default()
            },
            PageArgs::default(),
        )
        .await?;
    assert_eq!(names(&page), vec!["Omelette"]);
    assert!(page.items[0].is_in_shopping_cart);

    let page = query
        .filter(
            None,
            RecipeFilter {
                is_in_shopping_cart: Some(true),
                ..Default::default()
            },
            PageArgs::default(),
        )
        .await?;
    assert_eq!(page.count, 3);

    let page = query
        .filter(None, RecipeFilter::default(), PageArgs { page: 2, limit: 2 })
        .await?;
    assert_eq!(page.count, 3);
    assert!(!page.has_next());
    assert!(page.has_previous());
    assert_eq!(names(&page), vec!["Omelette"]);

    let short = query.find_short(bread).await?.unwrap();
    assert_eq!(short.name, "Bread");
    assert_eq!(short.cooking_time, 30);

    Ok(())
}
