use jiff::civil::date;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use test_helpers::{
    assert_status_code, booking_details_a, booking_for_dates, spawn_app,
};

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn total_is_price_times_nights() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let superadmin_id = app.login_superadmin().await?;
    let (_, room_id, guest_id) = app.create_booking_fixtures().await?;

    // three nights at 1000 per night
    let booking_id = app
        .client
        .create_booking(&booking_details_a(guest_id, room_id))
        .await?;
    let booking = app.client.get_booking(&booking_id).await?;
    assert_eq!(booking.total_amount, Decimal::from(3000));
    assert_eq!(booking.created_by, Some(superadmin_id));
    assert_eq!(booking.guest.guest_id, guest_id);
    assert_eq!(booking.room.room_id, room_id);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn check_out_must_follow_check_in() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let (_, room_id, guest_id) = app.create_booking_fixtures().await?;

    // same-day stay
    let result = app
        .client
        .create_booking(&booking_for_dates(
            guest_id,
            room_id,
            date(2025, 6, 1),
            date(2025, 6, 1),
        ))
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    // reversed dates
    let result = app
        .client
        .create_booking(&booking_for_dates(
            guest_id,
            room_id,
            date(2025, 6, 4),
            date(2025, 6, 1),
        ))
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn overlapping_bookings_are_allowed() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let (_, room_id, guest_id) = app.create_booking_fixtures().await?;

    // bookings are advisory records; the admin resolves conflicts by hand
    app.client
        .create_booking(&booking_details_a(guest_id, room_id))
        .await?;
    app.client
        .create_booking(&booking_for_dates(
            guest_id,
            room_id,
            date(2025, 6, 3),
            date(2025, 6, 6),
        ))
        .await?;

    let bookings = app.client.list_bookings().await?;
    assert_eq!(bookings.len(), 2);
    // most recent check-in first, with guest and room summaries filled in
    assert_eq!(bookings[0].check_in, date(2025, 6, 3));
    for booking in &bookings {
        assert_eq!(booking.guest.full_name, "Айбек Джумабеков");
        assert_eq!(booking.room.number, "101");
        assert_eq!(booking.room.building_name, "Главный корпус");
    }

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn update_recomputes_total() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let (_, room_id, guest_id) = app.create_booking_fixtures().await?;

    let booking_id = app
        .client
        .create_booking(&booking_details_a(guest_id, room_id))
        .await?;

    // stretch the stay from three nights to five
    let updated = app
        .client
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
    assert_eq!(updated.total_amount, Decimal::from(5000));

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn delete_booking() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let (_, room_id, guest_id) = app.create_booking_fixtures().await?;

    let booking_id = app
        .client
        .create_booking(&booking_details_a(guest_id, room_id))
        .await?;
    app.client.delete_booking(&booking_id).await?;

    assert_status_code(
        app.client.get_booking(&booking_id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn deleting_guest_removes_their_bookings() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_superadmin().await?;
    let (_, room_id, guest_id) = app.create_booking_fixtures().await?;

    let booking_id = app
        .client
        .create_booking(&booking_details_a(guest_id, room_id))
        .await?;
    app.client.delete_guest(&guest_id).await?;

    assert_status_code(
        app.client.get_booking(&booking_id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}
