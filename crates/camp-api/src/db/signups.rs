//! Signup persistence operations.

use camp_core::{ActivityId, CamperId, Signup, SignupId, SignupTime};
use sqlx::PgPool;

use super::decode_error;

/// Insert a new signup. Fails with a foreign-key violation if the
/// activity or camper row is missing.
pub async fn insert(pool: &PgPool, signup: &Signup) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO signups (id, time, activity_id, camper_id) VALUES ($1, $2, $3, $4)")
        .bind(signup.id.get())
        .bind(i32::from(signup.time.get()))
        .bind(signup.activity_id.get())
        .bind(signup.camper_id.map(|c| c.get()))
        .execute(pool)
        .await?;

    Ok(())
}

/// Load all signups, ordered by id.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Signup>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SignupRow>(
        "SELECT id, time, activity_id, camper_id FROM signups ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(SignupRow::try_into_record).collect()
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct SignupRow {
    id: i64,
    time: i32,
    activity_id: i64,
    camper_id: Option<i64>,
}

impl SignupRow {
    fn try_into_record(self) -> Result<Signup, sqlx::Error> {
        Ok(Signup {
            id: SignupId::new(self.id),
            time: SignupTime::new(i64::from(self.time)).map_err(decode_error)?,
            activity_id: ActivityId::new(self.activity_id),
            camper_id: self.camper_id.map(CamperId::new),
        })
    }
}
