use jiff::civil::date;
use reqwest::StatusCode;
use test_helpers::{
    assert_status_code, booking_details_a, booking_for_dates, spawn_app,
};

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn mutations_leave_a_trail_newest_first() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let superadmin_id = app.login_superadmin().await?;
    let building_id = app.create_test_building().await?;
    let room_id = app.create_test_room(building_id).await?;

    // the mock clock must move or both entries share a timestamp
    app.time_source.advance(jiff::Span::new().seconds(1));
    app.client.delete_room(&room_id).await?;

    let entries = app.client.list_audit_log().await?;
    let room_entries: Vec<_> = entries
        .iter()
        .filter(|e| e.object_type == "Room")
        .collect();
    assert_eq!(room_entries.len(), 2);
    assert_eq!(room_entries[0].action, "Удаление");
    assert_eq!(room_entries[1].action, "Создание");
    assert_eq!(room_entries[0].object_id, room_id.0);
    assert_eq!(room_entries[0].user_id, Some(superadmin_id));
    assert!(room_entries[0].details.contains("101"));

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn booking_lifecycle_is_fully_logged() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let superadmin_id = app.login_superadmin().await?;
    let (_, room_id, guest_id) = app.create_booking_fixtures().await?;

    let booking_id = app
        .client
        .create_booking(&booking_details_a(guest_id, room_id))
        .await?;
    app.time_source.advance(jiff::Span::new().seconds(1));
    app.client
        .update_booking(
            &booking_id,
            &booking_for_dates(
                guest_id,
                room_id,
                date(2025, 6, 1),
                date(2025, 6, 6),
            ),
        )
        .await?;
    app.time_source.advance(jiff::Span::new().seconds(1));
    app.client.delete_booking(&booking_id).await?;

    let entries = app.client.list_audit_log().await?;
    let booking_entries: Vec<_> = entries
        .iter()
        .filter(|e| e.object_type == "Booking")
        .collect();
    assert_eq!(booking_entries.len(), 3);
    assert_eq!(booking_entries[0].action, "Удаление");
    assert_eq!(booking_entries[1].action, "Обновление");
    assert_eq!(booking_entries[2].action, "Создание");
    for entry in &booking_entries {
        assert_eq!(entry.object_id, booking_id.0);
        assert_eq!(entry.user_id, Some(superadmin_id));
        assert!(entry.details.contains("Айбек Джумабеков"));
    }

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn single_entry_fetch() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let guest_id = app.create_test_guest().await?;

    let entries = app.client.list_audit_log().await?;
    let entry = entries
        .iter()
        .find(|e| e.object_id == guest_id.0)
        .expect("guest creation entry");

    let fetched = app.client.get_audit_log_entry(&entry.id).await?;
    assert_eq!(fetched.action, "Создание");
    assert_eq!(fetched.object_type, "Guest");

    let missing = payloads::AuditLogId(uuid::Uuid::new_v4());
    assert_status_code(
        app.client.get_audit_log_entry(&missing).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn entries_survive_user_deletion() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let admin_id = app
        .client
        .create_user(&payloads::requests::CreateUser {
            username: "marat".into(),
            password: "maratspw".into(),
            role: payloads::Role::Admin,
            phone: None,
        })
        .await?;

    // the admin creates a guest, then loses their account
    app.client.logout().await?;
    app.client
        .login(&test_helpers::admin_login_credentials())
        .await?;
    let guest_id = app.create_test_guest().await?;

    app.client.logout().await?;
    app.client
        .login(&test_helpers::superadmin_login_credentials())
        .await?;
    app.client.delete_user(&admin_id).await?;

    let entries = app.client.list_audit_log().await?;
    let entry = entries
        .iter()
        .find(|e| e.object_id == guest_id.0)
        .expect("guest creation entry");
    assert_eq!(entry.user_id, None);

    Ok(())
}
