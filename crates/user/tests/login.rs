use foodgram_user::{LoginInput, SetPasswordInput};
use temp_dir::TempDir;

mod helpers;

fn input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn test_login_failure() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_user::Command::new(state);

    let resp = cmd
        .login(input("john.doe@foodgram.localhost", "my_password"))
        .await;
    assert_eq!(
        resp.unwrap_err().to_string(),
        "Unable to log in with provided credentials."
    );

    helpers::create_user(&cmd, "john.doe").await?;

    let resp = cmd
        .login(input("john.doe@foodgram.localhost", "my_password3"))
        .await;
    assert_eq!(
        resp.unwrap_err().to_string(),
        "Unable to log in with provided credentials."
    );

    Ok(())
}

#[tokio::test]
async fn test_login_logout() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let query = foodgram_user::Query(state);

    let user = helpers::create_user(&cmd, "john.doe").await?;
    let (id, access_id) = cmd
        .login(input("John.Doe@foodgram.localhost", "my_password"))
        .await?;
    assert_eq!(id, user);

    let session = query.session(&access_id).await?.unwrap();
    assert_eq!(session.user_id, user);
    assert!(!session.is_staff);

    cmd.logout(&access_id).await?;
    assert!(query.session(&access_id).await?.is_none());
    assert!(cmd.logout(&access_id).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_set_password_revokes_other_sessions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let query = foodgram_user::Query(state);

    let user = helpers::create_user(&cmd, "john.doe").await?;
    let (_, current) = cmd
        .login(input("john.doe@foodgram.localhost", "my_password"))
        .await?;
    let (_, other) = cmd
        .login(input("john.doe@foodgram.localhost", "my_password"))
        .await?;

    let resp = cmd
        .set_password(
            user,
            &current,
            SetPasswordInput {
                current_password: "wrong_password".to_owned(),
                new_password: "my_new_password".to_owned(),
            },
        )
        .await;
    assert_eq!(resp.unwrap_err().to_string(), "Invalid password.");

    cmd.set_password(
        user,
        &current,
        SetPasswordInput {
            current_password: "my_password".to_owned(),
            new_password: "my_new_password".to_owned(),
        },
    )
    .await?;

    assert!(query.session(&current).await?.is_some());
    assert!(query.session(&other).await?.is_none());
    assert!(
        cmd.login(input("john.doe@foodgram.localhost", "my_password"))
            .await
            .is_err()
    );
    cmd.login(input("john.doe@foodgram.localhost", "my_new_password"))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_make_staff() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let query = foodgram_user::Query(state);

    let user = helpers::create_user(&cmd, "admin").await?;
    assert_eq!(cmd.make_staff("admin@foodgram.localhost").await?, user);
    assert!(cmd.make_staff("nobody@foodgram.localhost").await.is_err());

    let (_, access_id) = cmd
        .login(input("admin@foodgram.localhost", "my_password"))
        .await?;
    assert!(query.session(&access_id).await?.unwrap().is_staff);

    Ok(())
}
