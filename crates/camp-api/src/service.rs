//! # Write-Through Operations
//!
//! Every mutation goes to Postgres first (when a pool is configured) and
//! is applied to the in-memory store only after the database accepted it,
//! so a failed write leaves the store unchanged. Route handlers and the
//! seed loader both mutate state through these methods.

use camp_core::{
    Activity, ActivityId, Camper, CamperId, CamperPatch, NewActivity, NewCamper, NewSignup,
    Signup, SignupId, ValidationError,
};
use thiserror::Error;

use crate::db;
use crate::state::AppState;
use crate::store::StoreError;

/// Failure of a write-through operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A referenced record does not exist.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// One or more patch fields were rejected. Nothing was written.
    #[error("invalid update: {0:?}")]
    Validation(Vec<ValidationError>),

    /// The database rejected or failed the write.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppState {
    /// Create an activity.
    pub async fn add_activity(&self, new: NewActivity) -> Result<Activity, ServiceError> {
        let activity = new.with_id(self.store.next_activity_id());
        if let Some(pool) = &self.db_pool {
            db::activities::insert(pool, &activity).await?;
        }
        self.store.put_activity(activity.clone());
        tracing::info!(activity_id = %activity.id, name = %activity.name, "activity created");
        Ok(activity)
    }

    /// Create a camper.
    pub async fn add_camper(&self, new: NewCamper) -> Result<Camper, ServiceError> {
        let camper = new.with_id(self.store.next_camper_id());
        if let Some(pool) = &self.db_pool {
            db::campers::insert(pool, &camper).await?;
        }
        self.store.put_camper(camper.clone());
        tracing::info!(camper_id = %camper.id, "camper created");
        Ok(camper)
    }

    /// Apply a partial update to a camper.
    ///
    /// Only the supplied columns are written to Postgres. Returns `None` if
    /// the camper does not exist.
    pub async fn update_camper(
        &self,
        id: CamperId,
        patch: &CamperPatch,
    ) -> Result<Option<Camper>, ServiceError> {
        let _writes = self.camper_writes.lock().await;

        let Some(mut preview) = self.store.camper(id) else {
            return Ok(None);
        };
        patch.apply(&mut preview).map_err(ServiceError::Validation)?;

        if let Some(pool) = &self.db_pool {
            let name = patch.name.as_ref().map(|_| &preview.name);
            let age = patch.age.map(|_| preview.age);
            if !db::campers::update_fields(pool, id, name, age).await? {
                tracing::warn!(camper_id = %id, "camper missing from database on update");
            }
        }

        let camper = match self.store.update_camper(id, patch) {
            Some(result) => result.map_err(ServiceError::Validation)?,
            None => return Ok(None),
        };
        tracing::info!(camper_id = %camper.id, "camper updated");
        Ok(Some(camper))
    }

    /// Create a signup, checking that its camper and activity exist.
    pub async fn add_signup(&self, new: NewSignup) -> Result<Signup, ServiceError> {
        let signup = self.store.prepare_signup(new)?;
        if let Some(pool) = &self.db_pool {
            db::signups::insert(pool, &signup).await?;
        }
        self.store.put_signup(signup.clone())?;
        tracing::info!(
            signup_id = %signup.id,
            activity_id = %signup.activity_id,
            "signup created"
        );
        Ok(signup)
    }

    /// Delete an activity and cascade to its signups.
    ///
    /// Returns `None` if the activity does not exist.
    pub async fn delete_activity(
        &self,
        id: ActivityId,
    ) -> Result<Option<(Activity, Vec<Signup>)>, ServiceError> {
        if self.store.activity(id).is_none() {
            return Ok(None);
        }
        if let Some(pool) = &self.db_pool {
            if db::activities::delete_cascade(pool, id).await?.is_none() {
                tracing::warn!(activity_id = %id, "activity missing from database on delete");
            }
        }
        let removed = self.store.remove_activity(id);
        if let Some((_, cascaded)) = &removed {
            tracing::info!(activity_id = %id, cascaded = cascaded.len(), "activity deleted");
        }
        Ok(removed)
    }

    /// Delete a camper. Its signups stay, with `camper_id` cleared.
    ///
    /// Returns `None` if the camper does not exist.
    pub async fn delete_camper(
        &self,
        id: CamperId,
    ) -> Result<Option<(Camper, Vec<SignupId>)>, ServiceError> {
        let _writes = self.camper_writes.lock().await;
        if self.store.camper(id).is_none() {
            return Ok(None);
        }
        if let Some(pool) = &self.db_pool {
            if !db::campers::delete(pool, id).await? {
                tracing::warn!(camper_id = %id, "camper missing from database on delete");
            }
        }
        let removed = self.store.remove_camper(id);
        if let Some((_, orphaned)) = &removed {
            tracing::info!(camper_id = %id, orphaned = orphaned.len(), "camper deleted");
        }
        Ok(removed)
    }
}
