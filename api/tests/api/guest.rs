use payloads::requests::{MessageType, SendGuestMessage};
use reqwest::StatusCode;
use test_helpers::{
    assert_status_code, guest_details_a, guest_details_b, spawn_app,
};

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn create_normalizes_contact_fields() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    // phone with spaces, dashes, parentheses comes back canonical
    let guest_id = app.create_test_guest().await?;
    let guest = app.client.get_guest(&guest_id).await?;
    assert_eq!(guest.guest_details.phone, "+996555123456");
    assert_eq!(guest.guest_details.inn.as_deref(), Some("12345678901234"));

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn invalid_guest_reports_every_broken_field() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let mut details = guest_details_a();
    details.full_name = "А".into(); // too short
    details.phone = "555123456".into(); // missing leading +
    details.people_count = 0;

    let result = app.client.create_guest(&details).await;
    match result {
        Err(payloads::ClientError::APIError(code, body)) => {
            assert_eq!(code, StatusCode::BAD_REQUEST);
            assert!(body.contains("full_name"));
            assert!(body.contains("phone"));
            assert!(body.contains("people_count"));
        }
        _ => panic!("Expected APIError"),
    }
    assert!(app.client.list_guests().await?.is_empty());

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn create_read_update_delete_guest() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let guest_id = app.create_test_guest().await?;

    let updated =
        app.client.update_guest(&guest_id, &guest_details_b()).await?;
    assert_eq!(updated.guest_details.full_name, "Мария Петрова");
    assert_eq!(updated.guest_details.inn, None);

    app.client.delete_guest(&guest_id).await?;
    assert_status_code(
        app.client.get_guest(&guest_id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn send_message_records_audit_entry() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let guest_id = app.create_test_guest().await?;

    app.client
        .send_guest_message(&SendGuestMessage {
            guest_id,
            message_type: MessageType::Sms,
            message: "Ваш номер готов".into(),
        })
        .await?;

    let entries = app.client.list_audit_log().await?;
    let entry = entries
        .iter()
        .find(|e| e.action == "Отправка сообщения")
        .expect("message audit entry");
    assert_eq!(entry.object_type, "Guest");
    assert!(entry.details.contains("SMS"));
    assert!(entry.details.contains("Ваш номер готов"));

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn email_to_guest_without_address_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let guest_id = app.client.create_guest(&guest_details_b()).await?;

    let result = app
        .client
        .send_guest_message(&SendGuestMessage {
            guest_id,
            message_type: MessageType::Email,
            message: "Подтверждение брони".into(),
        })
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}
