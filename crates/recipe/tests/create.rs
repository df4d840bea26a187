use foodgram_shared::Error;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_create() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_recipe::Command::new(state.clone());
    let query = foodgram_recipe::Query(state.clone());
    let catalog = helpers::create_catalog(&state).await?;
    let john = helpers::create_user(&state, "john").await?;

    let id = cmd
        .create(
            john,
            helpers::recipe_input(
                "Pancakes",
                &[catalog.tags[0], catalog.tags[2]],
                &[(catalog.ingredients[0], 200), (catalog.ingredients[3], 2)],
            ),
        )
        .await?;

    let recipe = query.find(Some(john), id).await?.unwrap();
    assert_eq!(recipe.name, "Pancakes");
    assert_eq!(recipe.author.id, john);
    assert_eq!(recipe.author.username, "john");
    assert!(!recipe.is_favorited);
    assert!(!recipe.is_in_shopping_cart);

    let slugs: Vec<_> = recipe.tags.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["breakfast", "dinner"]);

    let lines: Vec<_> = recipe
        .ingredients
        .iter()
        .map(|i| (i.name.as_str(), i.measurement_unit.as_str(), i.amount))
        .collect();
    assert_eq!(lines, vec![("flour", "g", 200), ("egg", "pcs", 2)]);

    let image = query.image(id).await?.unwrap();
    assert_eq!(image.image_type, "image/png");
    assert!(!image.image.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_create_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_recipe::Command::new(state.clone());
    let catalog = helpers::create_catalog(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let flour = catalog.ingredients[0];

    let input = helpers::recipe_input("Bread", &[catalog.tags[0]], &[]);
    assert!(matches!(cmd.create(john, input).await, Err(Error::Validate(_))));

    let input = helpers::recipe_input("Bread", &[], &[(flour, 1)]);
    assert!(matches!(cmd.create(john, input).await, Err(Error::Validate(_))));

    let input = helpers::recipe_input("Bread", &[catalog.tags[0]], &[(flour, 0)]);
    assert!(matches!(cmd.create(john, input).await, Err(Error::Validate(_))));

    let input = helpers::recipe_input("Bread", &[catalog.tags[0]], &[(flour, 2147483648)]);
    assert!(matches!(cmd.create(john, input).await, Err(Error::Validate(_))));

    let mut input = helpers::recipe_input("Bread", &[catalog.tags[0]], &[(flour, 1)]);
    input.cooking_time = 0;
    assert!(matches!(cmd.create(john, input).await, Err(Error::Validate(_))));

    let input = helpers::recipe_input("Bread", &[catalog.tags[0]], &[(flour, 1), (flour, 2)]);
    assert!(matches!(
        cmd.create(john, input).await,
        Err(Error::Field("ingredients", _))
    ));

    let input = helpers::recipe_input("Bread", &[catalog.tags[0]], &[(9999, 1)]);
    assert!(matches!(
        cmd.create(john, input).await,
        Err(Error::Field("ingredients", _))
    ));

    let input = helpers::recipe_input("Bread", &[catalog.tags[0], catalog.tags[0]], &[(flour, 1)]);
    assert!(matches!(cmd.create(john, input).await, Err(Error::Field("tags", _))));

    let input = helpers::recipe_input("Bread", &[9999], &[(flour, 1)]);
    assert!(matches!(cmd.create(john, input).await, Err(Error::Field("tags", _))));

    let mut input = helpers::recipe_input("Bread", &[catalog.tags[0]], &[(flour, 1)]);
    input.image = None;
    assert!(matches!(cmd.create(john, input).await, Err(Error::Field("image", _))));

    let mut input = helpers::recipe_input("Bread", &[catalog.tags[0]], &[(flour, 1)]);
    input.image = Some("not an image".to_owned());
    assert!(matches!(cmd.create(john, input).await, Err(Error::Field("image", _))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipe")
        .fetch_one(&state.read_db)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}
