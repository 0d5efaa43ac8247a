use super::*;
use jiff_sqlx::ToSqlx;
use payloads::BuildingId;
use sqlx::PgPool;

use crate::time::TimeSource;

pub async fn create_building(
    details: &payloads::Building,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<Building, StoreError> {
    Ok(sqlx::query_as::<_, Building>(
        "INSERT INTO buildings (name, address, created_at, updated_at)
         VALUES ($1, $2, $3, $3) RETURNING *",
    )
    .bind(&details.name)
    .bind(&details.address)
    .bind(time_source.now().to_sqlx())
    .fetch_one(pool)
    .await?)
}

pub(super) async fn get_building_row(
    building_id: &BuildingId,
    pool: &PgPool,
) -> Result<Building, StoreError> {
    sqlx::query_as::<_, Building>("SELECT * FROM buildings WHERE id = $1")
        .bind(building_id)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StoreError::BuildingNotFound,
            e => StoreError::Database(e),
        })
}

pub async fn get_building(
    building_id: &BuildingId,
    pool: &PgPool,
) -> Result<responses::Building, StoreError> {
    Ok(get_building_row(building_id, pool).await?.into())
}

pub async fn list_buildings(
    pool: &PgPool,
) -> Result<Vec<responses::Building>, StoreError> {
    let buildings = sqlx::query_as::<_, Building>(
        "SELECT * FROM buildings ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(buildings.into_iter().map(Into::into).collect())
}

pub async fn update_building(
    building_id: &BuildingId,
    details: &payloads::Building,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<responses::Building, StoreError> {
    sqlx::query_as::<_, Building>(
        "UPDATE buildings SET
            name = $2,
            address = $3,
            updated_at = $4
        WHERE id = $1
        RETURNING *",
    )
    .bind(building_id)
    .bind(&details.name)
    .bind(&details.address)
    .bind(time_source.now().to_sqlx())
    .fetch_one(pool)
    .await
    .map(Into::into)
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => StoreError::BuildingNotFound,
        e => StoreError::Database(e),
    })
}

/// Delete a building. Rooms and, transitively, their bookings go with it
/// (FK cascade).
pub async fn delete_building(
    building_id: &BuildingId,
    pool: &PgPool,
) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM buildings WHERE id = $1")
        .bind(building_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::BuildingNotFound);
    }
    Ok(())
}
