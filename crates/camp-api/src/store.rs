//! # In-Memory Repository
//!
//! [`CampStore`] holds the three tables behind a single lock and enforces
//! the relationships between them:
//!
//! - a signup can only be stored if its activity and camper exist;
//! - removing an activity removes every signup referencing it;
//! - removing a camper keeps its signups and clears their `camper_id`.
//!
//! All operations are synchronous (the lock is `parking_lot`, not
//! `tokio::sync`) because the lock is never held across an `.await`.
//! One lock over all tables makes each cascade or reference check atomic
//! with the write it guards.

use std::collections::BTreeMap;
use std::sync::Arc;

use camp_core::{
    Activity, ActivityId, Camper, CamperId, CamperPatch, NewSignup, Signup, SignupId,
    ValidationError,
};
use parking_lot::RwLock;
use thiserror::Error;

/// Referential integrity violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced activity does not exist.
    #[error("activity {0} does not exist")]
    UnknownActivity(ActivityId),

    /// The referenced camper does not exist.
    #[error("camper {0} does not exist")]
    UnknownCamper(CamperId),
}

/// A camper together with its signups, each paired with its activity.
pub type CamperWithSignups = (Camper, Vec<(Signup, Activity)>);

/// An activity together with its signups, each paired with its camper
/// (absent once the camper has been deleted).
pub type ActivityWithSignups = (Activity, Vec<(Signup, Option<Camper>)>);

#[derive(Debug, Default)]
struct Tables {
    activities: BTreeMap<ActivityId, Activity>,
    campers: BTreeMap<CamperId, Camper>,
    signups: BTreeMap<SignupId, Signup>,
    // Last id handed out per table.
    last_activity_id: i64,
    last_camper_id: i64,
    last_signup_id: i64,
}

impl Tables {
    fn check_references(
        &self,
        activity_id: ActivityId,
        camper_id: Option<CamperId>,
    ) -> Result<(), StoreError> {
        if !self.activities.contains_key(&activity_id) {
            return Err(StoreError::UnknownActivity(activity_id));
        }
        if let Some(camper_id) = camper_id {
            if !self.campers.contains_key(&camper_id) {
                return Err(StoreError::UnknownCamper(camper_id));
            }
        }
        Ok(())
    }
}

/// Thread-safe, cloneable repository of activities, campers, and signups.
///
/// Clones share the same underlying tables.
#[derive(Debug, Clone, Default)]
pub struct CampStore {
    tables: Arc<RwLock<Tables>>,
}

impl CampStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of the store, resuming id sequences after the
    /// highest loaded id of each table.
    ///
    /// Signups whose activity is missing are dropped; a missing camper
    /// clears `camper_id`. Returns the number of signups dropped.
    pub fn load(
        &self,
        activities: Vec<Activity>,
        campers: Vec<Camper>,
        signups: Vec<Signup>,
    ) -> usize {
        let mut tables = self.tables.write();
        tables.activities = activities.into_iter().map(|a| (a.id, a)).collect();
        tables.campers = campers.into_iter().map(|c| (c.id, c)).collect();

        let mut dropped = 0;
        let mut kept = BTreeMap::new();
        for mut signup in signups {
            if !tables.activities.contains_key(&signup.activity_id) {
                dropped += 1;
                continue;
            }
            if let Some(camper_id) = signup.camper_id {
                if !tables.campers.contains_key(&camper_id) {
                    signup.camper_id = None;
                }
            }
            kept.insert(signup.id, signup);
        }
        tables.signups = kept;

        tables.last_activity_id = tables.activities.keys().last().map_or(0, |id| id.get());
        tables.last_camper_id = tables.campers.keys().last().map_or(0, |id| id.get());
        tables.last_signup_id = tables.signups.keys().last().map_or(0, |id| id.get());
        dropped
    }

    /// Whether all three tables are empty.
    pub fn is_empty(&self) -> bool {
        let tables = self.tables.read();
        tables.activities.is_empty() && tables.campers.is_empty() && tables.signups.is_empty()
    }

    // -- Id sequences ---------------------------------------------------------

    /// Reserve the next activity id. Ids are never handed out twice.
    pub fn next_activity_id(&self) -> ActivityId {
        let mut tables = self.tables.write();
        tables.last_activity_id += 1;
        ActivityId::new(tables.last_activity_id)
    }

    /// Reserve the next camper id.
    pub fn next_camper_id(&self) -> CamperId {
        let mut tables = self.tables.write();
        tables.last_camper_id += 1;
        CamperId::new(tables.last_camper_id)
    }

    /// Reserve the next signup id.
    pub fn next_signup_id(&self) -> SignupId {
        let mut tables = self.tables.write();
        tables.last_signup_id += 1;
        SignupId::new(tables.last_signup_id)
    }

    // -- Activities -----------------------------------------------------------

    /// All activities, ordered by id.
    pub fn activities(&self) -> Vec<Activity> {
        self.tables.read().activities.values().cloned().collect()
    }

    /// Retrieve an activity by id.
    pub fn activity(&self, id: ActivityId) -> Option<Activity> {
        self.tables.read().activities.get(&id).cloned()
    }

    /// Insert or replace an activity.
    pub fn put_activity(&self, activity: Activity) {
        self.tables.write().activities.insert(activity.id, activity);
    }

    /// Retrieve an activity with its signups and their campers.
    pub fn activity_with_signups(&self, id: ActivityId) -> Option<ActivityWithSignups> {
        let tables = self.tables.read();
        let activity = tables.activities.get(&id)?.clone();
        let signups = tables
            .signups
            .values()
            .filter(|s| s.is_for_activity(id))
            .map(|s| {
                let camper = s.camper_id.and_then(|c| tables.campers.get(&c).cloned());
                (s.clone(), camper)
            })
            .collect();
        Some((activity, signups))
    }

    /// Remove an activity and every signup referencing it.
    ///
    /// Returns the removed activity and the cascaded signups, or `None` if
    /// the activity did not exist.
    pub fn remove_activity(&self, id: ActivityId) -> Option<(Activity, Vec<Signup>)> {
        let mut tables = self.tables.write();
        let activity = tables.activities.remove(&id)?;
        let (cascaded, kept): (BTreeMap<_, _>, BTreeMap<_, _>) = std::mem::take(&mut tables.signups)
            .into_iter()
            .partition(|(_, s)| s.is_for_activity(id));
        tables.signups = kept;
        Some((activity, cascaded.into_values().collect()))
    }

    // -- Campers --------------------------------------------------------------

    /// All campers, ordered by id.
    pub fn campers(&self) -> Vec<Camper> {
        self.tables.read().campers.values().cloned().collect()
    }

    /// Retrieve a camper by id.
    pub fn camper(&self, id: CamperId) -> Option<Camper> {
        self.tables.read().campers.get(&id).cloned()
    }

    /// Insert or replace a camper.
    pub fn put_camper(&self, camper: Camper) {
        self.tables.write().campers.insert(camper.id, camper);
    }

    /// Apply a patch to a stored camper under the write lock.
    ///
    /// Returns `None` if the camper does not exist. A rejected patch leaves
    /// the stored camper unchanged.
    pub fn update_camper(
        &self,
        id: CamperId,
        patch: &CamperPatch,
    ) -> Option<Result<Camper, Vec<ValidationError>>> {
        let mut tables = self.tables.write();
        let camper = tables.campers.get_mut(&id)?;
        Some(patch.apply(camper).map(|()| camper.clone()))
    }

    /// Retrieve a camper with its signups and their activities.
    pub fn camper_with_signups(&self, id: CamperId) -> Option<CamperWithSignups> {
        let tables = self.tables.read();
        let camper = tables.campers.get(&id)?.clone();
        let signups = tables
            .signups
            .values()
            .filter(|s| s.is_for_camper(id))
            .filter_map(|s| {
                let activity = tables.activities.get(&s.activity_id)?.clone();
                Some((s.clone(), activity))
            })
            .collect();
        Some((camper, signups))
    }

    /// Remove a camper. Its signups stay, with `camper_id` cleared.
    ///
    /// Returns the removed camper and the ids of the signups it held, or
    /// `None` if the camper did not exist.
    pub fn remove_camper(&self, id: CamperId) -> Option<(Camper, Vec<SignupId>)> {
        let mut tables = self.tables.write();
        let camper = tables.campers.remove(&id)?;
        let mut orphaned = Vec::new();
        for signup in tables.signups.values_mut() {
            if signup.is_for_camper(id) {
                signup.camper_id = None;
                orphaned.push(signup.id);
            }
        }
        Some((camper, orphaned))
    }

    // -- Signups --------------------------------------------------------------

    /// All signups, ordered by id.
    pub fn signups(&self) -> Vec<Signup> {
        self.tables.read().signups.values().cloned().collect()
    }

    /// Retrieve a signup by id.
    pub fn signup(&self, id: SignupId) -> Option<Signup> {
        self.tables.read().signups.get(&id).cloned()
    }

    /// Check a draft's references and reserve an id for it, without storing.
    ///
    /// Used to validate before persisting elsewhere; [`put_signup`]
    /// re-checks the references when the signup is finally stored.
    ///
    /// [`put_signup`]: CampStore::put_signup
    pub fn prepare_signup(&self, new: NewSignup) -> Result<Signup, StoreError> {
        let mut tables = self.tables.write();
        tables.check_references(new.activity_id, Some(new.camper_id))?;
        tables.last_signup_id += 1;
        Ok(new.with_id(SignupId::new(tables.last_signup_id)))
    }

    /// Store a signup after checking that its references exist.
    pub fn put_signup(&self, signup: Signup) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        tables.check_references(signup.activity_id, signup.camper_id)?;
        tables.signups.insert(signup.id, signup);
        Ok(())
    }
}
