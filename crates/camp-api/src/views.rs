//! # Response Shapes
//!
//! Each entity has explicit external representations. Nested forms expand
//! only the far side of a relationship, so no representation can recurse:
//!
//! | Shape             | Fields                                                  |
//! |-------------------|---------------------------------------------------------|
//! | [`CamperSummary`]   | id, name, age                                         |
//! | [`ActivitySummary`] | id, name, difficulty                                  |
//! | [`SignupView`]      | id, time, activity_id, camper_id                      |
//! | [`CamperDetail`]    | summary + signups, each with its `activity` expanded  |
//! | [`ActivityDetail`]  | summary + signups, each with its `camper` expanded    |
//!
//! List endpoints return summaries, which carry no `signups` key at all.

use camp_core::{Activity, Camper, Signup};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{ActivityWithSignups, CamperWithSignups};

/// Shallow camper, without signups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CamperSummary {
    pub id: i64,
    pub name: String,
    pub age: u8,
}

impl From<&Camper> for CamperSummary {
    fn from(camper: &Camper) -> Self {
        Self {
            id: camper.id.get(),
            name: camper.name.to_string(),
            age: camper.age.get(),
        }
    }
}

/// Shallow activity, without signups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivitySummary {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
}

impl From<&Activity> for ActivitySummary {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.get(),
            name: activity.name.clone(),
            difficulty: activity.difficulty,
        }
    }
}

/// A signup with its parents referenced by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SignupView {
    pub id: i64,
    pub time: u8,
    pub activity_id: i64,
    /// `null` once the camper has been deleted.
    pub camper_id: Option<i64>,
}

impl From<&Signup> for SignupView {
    fn from(signup: &Signup) -> Self {
        Self {
            id: signup.id.get(),
            time: signup.time.get(),
            activity_id: signup.activity_id.get(),
            camper_id: signup.camper_id.map(|c| c.get()),
        }
    }
}

/// A signup as listed under its camper: the activity is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CamperSignup {
    pub id: i64,
    pub time: u8,
    pub activity_id: i64,
    pub camper_id: Option<i64>,
    pub activity: ActivitySummary,
}

/// A signup as listed under its activity: the camper is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivitySignup {
    pub id: i64,
    pub time: u8,
    pub activity_id: i64,
    pub camper_id: Option<i64>,
    pub camper: Option<CamperSummary>,
}

/// Full camper with its signups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CamperDetail {
    pub id: i64,
    pub name: String,
    pub age: u8,
    pub signups: Vec<CamperSignup>,
}

impl From<CamperWithSignups> for CamperDetail {
    fn from((camper, signups): CamperWithSignups) -> Self {
        let CamperSummary { id, name, age } = CamperSummary::from(&camper);
        let signups = signups
            .iter()
            .map(|(signup, activity)| {
                let SignupView {
                    id,
                    time,
                    activity_id,
                    camper_id,
                } = SignupView::from(signup);
                CamperSignup {
                    id,
                    time,
                    activity_id,
                    camper_id,
                    activity: ActivitySummary::from(activity),
                }
            })
            .collect();
        Self {
            id,
            name,
            age,
            signups,
        }
    }
}

/// Full activity with its signups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivityDetail {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
    pub signups: Vec<ActivitySignup>,
}

impl From<ActivityWithSignups> for ActivityDetail {
    fn from((activity, signups): ActivityWithSignups) -> Self {
        let ActivitySummary {
            id,
            name,
            difficulty,
        } = ActivitySummary::from(&activity);
        let signups = signups
            .iter()
            .map(|(signup, camper)| {
                let SignupView {
                    id,
                    time,
                    activity_id,
                    camper_id,
                } = SignupView::from(signup);
                ActivitySignup {
                    id,
                    time,
                    activity_id,
                    camper_id,
                    camper: camper.as_ref().map(CamperSummary::from),
                }
            })
            .collect();
        Self {
            id,
            name,
            difficulty,
            signups,
        }
    }
}

/// Confirmation returned after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use camp_core::{ActivityId, CamperId, NewActivity, NewCamper, NewSignup, SignupId};

    fn fixtures() -> (Activity, Camper, Signup) {
        let activity = NewActivity {
            name: "Archery".into(),
            difficulty: 3,
        }
        .with_id(ActivityId::new(1));
        let camper = NewCamper::from_raw(Some("Ana".into()), Some(12))
            .unwrap()
            .with_id(CamperId::new(2));
        let signup = NewSignup::from_raw(Some(9), Some(2), Some(1))
            .unwrap()
            .with_id(SignupId::new(3));
        (activity, camper, signup)
    }

    #[test]
    fn summaries_have_no_signups_key() {
        let (activity, camper, _) = fixtures();
        let camper_json = serde_json::to_value(CamperSummary::from(&camper)).unwrap();
        assert_eq!(
            camper_json,
            serde_json::json!({"id": 2, "name": "Ana", "age": 12})
        );
        let activity_json = serde_json::to_value(ActivitySummary::from(&activity)).unwrap();
        assert!(activity_json.get("signups").is_none());
    }

    #[test]
    fn signup_view_references_parents_by_id() {
        let (_, _, signup) = fixtures();
        let json = serde_json::to_value(SignupView::from(&signup)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "time": 9, "activity_id": 1, "camper_id": 2})
        );
    }

    #[test]
    fn camper_detail_expands_activity_but_not_camper() {
        let (activity, camper, signup) = fixtures();
        let detail = CamperDetail::from((camper, vec![(signup, activity)]));
        let json = serde_json::to_value(&detail).unwrap();
        let nested = &json["signups"][0];
        assert_eq!(nested["activity"]["name"], "Archery");
        assert!(nested.get("camper").is_none());
        assert!(nested["activity"].get("signups").is_none());
    }

    #[test]
    fn activity_detail_expands_camper_but_not_activity() {
        let (activity, camper, signup) = fixtures();
        let detail = ActivityDetail::from((activity, vec![(signup, Some(camper))]));
        let json = serde_json::to_value(&detail).unwrap();
        let nested = &json["signups"][0];
        assert_eq!(nested["camper"]["name"], "Ana");
        assert!(nested.get("activity").is_none());
        assert!(nested["camper"].get("signups").is_none());
    }

    #[test]
    fn orphaned_signup_shows_null_camper() {
        let (activity, _, mut signup) = fixtures();
        signup.camper_id = None;
        let detail = ActivityDetail::from((activity, vec![(signup, None)]));
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json["signups"][0]["camper"].is_null());
        assert!(json["signups"][0]["camper_id"].is_null());
    }
}
