use reqwest::StatusCode;
use test_helpers::{
    assert_status_code, room_details_a, room_details_b, spawn_app,
};

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn create_read_update_delete_room() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let building_id = app.create_test_building().await?;

    let room_id = app.create_test_room(building_id).await?;
    let room = app.client.get_room(&room_id).await?;
    assert_eq!(room.room_details, room_details_a(building_id));
    assert_eq!(room.building_name, "Главный корпус");

    let updated = app
        .client
        .update_room(&room_id, &room_details_b(building_id))
        .await?;
    assert_eq!(updated.room_details, room_details_b(building_id));

    app.client.delete_room(&room_id).await?;
    assert_status_code(
        app.client.get_room(&room_id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn bulk_create_rooms() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let building_id = app.create_test_building().await?;

    let rooms =
        vec![room_details_a(building_id), room_details_b(building_id)];
    let room_ids = app.client.create_rooms(&rooms).await?;
    assert_eq!(room_ids.len(), 2);

    let listed = app.client.list_rooms().await?;
    assert_eq!(listed.len(), 2);
    // sorted by room number
    assert_eq!(listed[0].room_details.number, "101");
    assert_eq!(listed[1].room_details.number, "201");

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn duplicate_room_number_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let building_id = app.create_test_building().await?;
    app.create_test_room(building_id).await?;

    let result = app.client.create_room(&room_details_a(building_id)).await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn bulk_create_is_atomic() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let building_id = app.create_test_building().await?;

    // second entry repeats the first number, so neither room must land
    let mut duplicate = room_details_b(building_id);
    duplicate.number = room_details_a(building_id).number;
    let rooms = vec![room_details_a(building_id), duplicate];

    let result = app.client.create_rooms(&rooms).await;
    assert_status_code(result, StatusCode::BAD_REQUEST);
    assert!(app.client.list_rooms().await?.is_empty());

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn room_for_unknown_building_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let missing = payloads::BuildingId(uuid::Uuid::new_v4());
    let result = app.client.create_room(&room_details_a(missing)).await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}
