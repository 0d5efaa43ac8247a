use payloads::requests::{CreateUser, UpdateUser};
use payloads::{Role, requests};
use reqwest::StatusCode;
use test_helpers::{assert_status_code, spawn_app};

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn me_returns_own_profile() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let me = app.client.me().await?;
    assert_eq!(me.username, "dusya");
    assert_eq!(me.role, Role::Superadmin);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn superadmin_manages_users() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let user_id = app
        .client
        .create_user(&CreateUser {
            username: "marat".into(),
            password: "maratspw".into(),
            role: Role::Admin,
            phone: Some("+996700333444".into()),
        })
        .await?;

    let profile = app.client.get_user(&user_id).await?;
    assert_eq!(profile.username, "marat");
    assert_eq!(profile.role, Role::Admin);
    assert_eq!(profile.phone.as_deref(), Some("+996700333444"));

    // promote and change the password
    let updated = app
        .client
        .update_user(
            &user_id,
            &UpdateUser {
                password: Some("newpw123".into()),
                role: Some(Role::Superadmin),
                phone: None,
            },
        )
        .await?;
    assert_eq!(updated.role, Role::Superadmin);
    // untouched field stays
    assert_eq!(updated.phone.as_deref(), Some("+996700333444"));

    // the new password works
    app.client.logout().await?;
    app.client
        .login(&requests::LoginCredentials {
            username: "marat".into(),
            password: "newpw123".into(),
        })
        .await?;

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn admin_cannot_manage_users() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;

    assert_status_code(
        app.client.list_users().await,
        StatusCode::FORBIDDEN,
    );
    assert_status_code(
        app.client
            .create_user(&CreateUser {
                username: "sneaky".into(),
                password: "pw".into(),
                role: Role::Superadmin,
                phone: None,
            })
            .await,
        StatusCode::FORBIDDEN,
    );

    // but the regular resources stay open
    app.client.me().await?;
    app.client.list_buildings().await?;

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn delete_user() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let superadmin_id = app.login_superadmin().await?;

    let user_id = app
        .client
        .create_user(&CreateUser {
            username: "temp".into(),
            password: "temppw".into(),
            role: Role::Admin,
            phone: None,
        })
        .await?;
    app.client.delete_user(&user_id).await?;
    assert_status_code(
        app.client.get_user(&user_id).await,
        StatusCode::NOT_FOUND,
    );

    // self-deletion is refused
    assert_status_code(
        app.client.delete_user(&superadmin_id).await,
        StatusCode::BAD_REQUEST,
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn duplicate_username_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let result = app
        .client
        .create_user(&CreateUser {
            username: "dusya".into(),
            password: "anotherpw".into(),
            role: Role::Admin,
            phone: None,
        })
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}
