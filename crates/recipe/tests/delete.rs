use foodgram_shared::{Actor, Error};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_recipe::Command::new(state.clone());
    let query = foodgram_recipe::Query(state.clone());
    let catalog = helpers::create_catalog(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;

    let id = cmd
        .create(
            john,
            helpers::recipe_input("Pancakes", &[catalog.tags[0]], &[(catalog.ingredients[0], 200)]),
        )
        .await?;

    cmd.favorite.save(albert, id).await?;

    let resp = cmd
        .delete(
            Actor {
                id: albert,
                is_staff: false,
            },
            id,
        )
        .await;
    assert!(matches!(resp, Err(Error::Forbidden)));

    cmd.delete(
        Actor {
            id: john,
            is_staff: false,
        },
        id,
    )
    .await?;

    assert!(query.find(None, id).await?.is_none());

    let resp = cmd
        .delete(
            Actor {
                id: john,
                is_staff: false,
            },
            id,
        )
        .await;
    assert!(matches!(resp, Err(Error::NotFound(_))));

    for table in ["favorite", "recipe_tag", "recipe_ingredient"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&state.read_db)
            .await?;
        assert_eq!(count, 0, "{table} should be empty");
    }

    Ok(())
}
