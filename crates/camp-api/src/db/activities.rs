//! Activity persistence operations.

use camp_core::{Activity, ActivityId};
use sqlx::PgPool;

/// Insert a new activity.
pub async fn insert(pool: &PgPool, activity: &Activity) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO activities (id, name, difficulty) VALUES ($1, $2, $3)")
        .bind(activity.id.get())
        .bind(&activity.name)
        .bind(activity.difficulty)
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete an activity and its signups in one transaction.
///
/// The signups are deleted explicitly rather than relying on the foreign
/// key's `ON DELETE CASCADE`, so the number cascaded can be reported.
/// Returns `None` if the activity did not exist, otherwise the number of
/// signups removed with it. The transaction rolls back if dropped early.
pub async fn delete_cascade(pool: &PgPool, id: ActivityId) -> Result<Option<u64>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let cascaded = sqlx::query("DELETE FROM signups WHERE activity_id = $1")
        .bind(id.get())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let deleted = sqlx::query("DELETE FROM activities WHERE id = $1")
        .bind(id.get())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    tx.commit().await?;
    Ok(Some(cascaded))
}

/// Load all activities, ordered by id.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Activity>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ActivityRow>(
        "SELECT id, name, difficulty FROM activities ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ActivityRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: i64,
    name: String,
    difficulty: i64,
}

impl ActivityRow {
    fn into_record(self) -> Activity {
        Activity {
            id: ActivityId::new(self.id),
            name: self.name,
            difficulty: self.difficulty,
        }
    }
}
