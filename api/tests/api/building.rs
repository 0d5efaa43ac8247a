use reqwest::StatusCode;
use test_helpers::{
    assert_status_code, building_details_a, building_details_b, spawn_app,
};

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn create_read_update_delete_building() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let building_id = app.create_test_building().await?;
    let building = app.client.get_building(&building_id).await?;
    assert_eq!(building.building_details, building_details_a());

    let updated = app
        .client
        .update_building(&building_id, &building_details_b())
        .await?;
    assert_eq!(updated.building_details, building_details_b());

    app.client.delete_building(&building_id).await?;
    assert_status_code(
        app.client.get_building(&building_id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn blank_building_name_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let blank = payloads::Building {
        name: "   ".into(),
        address: Some("ул. Горная 12".into()),
    };
    let result = app.client.create_building(&blank).await;
    assert_status_code(result, StatusCode::BAD_REQUEST);
    match app.client.create_building(&blank).await {
        Err(payloads::ClientError::APIError(_, body)) => {
            assert!(body.contains("name"));
        }
        _ => panic!("Expected APIError"),
    }
    assert!(app.client.list_buildings().await?.is_empty());

    // renaming to a blank name is refused the same way
    let building_id = app.create_test_building().await?;
    let result = app.client.update_building(&building_id, &blank).await;
    assert_status_code(result, StatusCode::BAD_REQUEST);
    let building = app.client.get_building(&building_id).await?;
    assert_eq!(building.building_details, building_details_a());

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn buildings_list_sorted_by_name() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    app.client.create_building(&building_details_b()).await?;
    app.client.create_building(&building_details_a()).await?;

    let buildings = app.client.list_buildings().await?;
    assert_eq!(buildings.len(), 2);
    assert_eq!(buildings[0].building_details.name, "Главный корпус");
    assert_eq!(buildings[1].building_details.name, "Летний корпус");

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn deleting_building_removes_its_rooms() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;

    let building_id = app.create_test_building().await?;
    let room_id = app.create_test_room(building_id).await?;

    app.client.delete_building(&building_id).await?;

    assert_status_code(
        app.client.get_room(&room_id).await,
        StatusCode::NOT_FOUND,
    );
    assert!(app.client.list_rooms().await?.is_empty());

    Ok(())
}
