//! Integration tests against a live server and a per-test database.
//!
//! These need a Postgres instance at localhost:5433 (see test-helpers) and
//! are marked ignored so a plain `cargo test` run stays self-contained. Run
//! them with `cargo test -- --ignored`.

mod audit;
mod booking;
mod building;
mod guest;
mod presence;
mod room;
mod user;

use test_helpers::spawn_app;

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.health_check().await?;

    Ok(())
}
