//! Camper persistence operations.

use camp_core::{Age, Camper, CamperId, CamperName};
use sqlx::PgPool;

use super::decode_error;

/// Insert a new camper.
pub async fn insert(pool: &PgPool, camper: &Camper) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO campers (id, name, age) VALUES ($1, $2, $3)")
        .bind(camper.id.get())
        .bind(camper.name.as_str())
        .bind(i32::from(camper.age.get()))
        .execute(pool)
        .await?;

    Ok(())
}

/// Overwrite the supplied columns of a camper; `None` keeps the stored
/// value. Returns `false` if no row matched.
pub async fn update_fields(
    pool: &PgPool,
    id: CamperId,
    name: Option<&CamperName>,
    age: Option<Age>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE campers SET name = COALESCE($1, name), age = COALESCE($2, age) WHERE id = $3",
    )
    .bind(name.map(CamperName::as_str))
    .bind(age.map(|age| i32::from(age.get())))
    .bind(id.get())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a camper. The schema nulls `camper_id` on its signups.
/// Returns `false` if no row matched.
pub async fn delete(pool: &PgPool, id: CamperId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM campers WHERE id = $1")
        .bind(id.get())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all campers, ordered by id.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Camper>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CamperRow>("SELECT id, name, age FROM campers ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(CamperRow::try_into_record).collect()
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct CamperRow {
    id: i64,
    name: String,
    age: i32,
}

impl CamperRow {
    fn try_into_record(self) -> Result<Camper, sqlx::Error> {
        Ok(Camper {
            id: CamperId::new(self.id),
            name: CamperName::new(self.name).map_err(decode_error)?,
            age: Age::new(i64::from(self.age)).map_err(decode_error)?,
        })
    }
}
