use jiff::Span;
use test_helpers::spawn_app;

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn activity_marks_user_online() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let me = app.client.me().await?;
    assert!(me.is_online);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn requests_move_last_seen_forward() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let before = app.client.me().await?.last_seen;
    app.time_source.advance(Span::new().minutes(10));
    let after = app.client.me().await?.last_seen;

    assert!(after > before);
    assert_eq!(after, "2025-01-01T00:10:00Z".parse()?);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn last_seen_never_moves_backwards() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    app.time_source.advance(Span::new().minutes(10));
    let at_ten = app.client.me().await?.last_seen;

    // a request carrying an older clock must not regress the column
    app.time_source.set("2025-01-01T00:01:00Z".parse()?);
    let after_rewind = app.client.me().await?.last_seen;
    assert_eq!(after_rewind, at_ten);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn online_window_boundary() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let superadmin_id = app.login_superadmin().await?;

    // seed a second user who stays idle while the superadmin polls
    app.client
        .create_user(&payloads::requests::CreateUser {
            username: "marat".into(),
            password: "maratspw".into(),
            role: payloads::Role::Admin,
            phone: None,
        })
        .await?;

    app.time_source.advance(Span::new().seconds(299));
    let users = app.client.list_users().await?;
    let idle = users.iter().find(|u| u.username == "marat").unwrap();
    assert!(idle.is_online);

    app.time_source.advance(Span::new().seconds(2));
    let users = app.client.list_users().await?;
    let idle = users.iter().find(|u| u.username == "marat").unwrap();
    assert!(!idle.is_online);

    let active = users
        .iter()
        .find(|u| u.user_id == superadmin_id)
        .unwrap();
    assert!(active.is_online);

    Ok(())
}
