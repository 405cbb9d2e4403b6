//! # Entities
//!
//! The three tables of the camp: [`Activity`], [`Camper`], and the
//! [`Signup`] join entity that owns both foreign keys.
//!
//! Relationships are not stored on the parents. A camper's or activity's
//! signups are found by filtering signups on the foreign key, which the
//! repository in `camp-api` does. The `New*` drafts hold validated fields
//! before the repository assigns an id.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::fields::{Age, CamperName, SignupTime};
use crate::identity::{ActivityId, CamperId, SignupId};

/// A camp activity. Deleting one deletes all of its signups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Identifier.
    pub id: ActivityId,
    /// Display name.
    pub name: String,
    /// Difficulty rating. Unconstrained.
    pub difficulty: i64,
}

/// An activity that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActivity {
    /// Display name.
    pub name: String,
    /// Difficulty rating.
    pub difficulty: i64,
}

impl NewActivity {
    /// Attach an id, producing the stored entity.
    pub fn with_id(self, id: ActivityId) -> Activity {
        Activity {
            id,
            name: self.name,
            difficulty: self.difficulty,
        }
    }
}

/// A camper. Deleting one keeps its signups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camper {
    /// Identifier.
    pub id: CamperId,
    /// Name, never empty.
    pub name: CamperName,
    /// Age, always within [`AGE_RANGE`](crate::AGE_RANGE).
    pub age: Age,
}

impl Camper {
    /// Replace the name. On error the camper is unchanged.
    pub fn set_name(&mut self, raw: impl Into<String>) -> Result<(), ValidationError> {
        self.name = CamperName::new(raw)?;
        Ok(())
    }

    /// Replace the age. On error the camper is unchanged.
    pub fn set_age(&mut self, raw: i64) -> Result<(), ValidationError> {
        self.age = Age::new(raw)?;
        Ok(())
    }
}

/// A camper that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCamper {
    /// Name.
    pub name: CamperName,
    /// Age.
    pub age: Age,
}

impl NewCamper {
    /// Validate raw creation input. Absent fields are errors.
    ///
    /// # Errors
    ///
    /// Returns the first failing field's [`ValidationError`].
    pub fn from_raw(name: Option<String>, age: Option<i64>) -> Result<Self, ValidationError> {
        let name = CamperName::new(name.ok_or(ValidationError::MissingField("name"))?)?;
        let age = Age::new(age.ok_or(ValidationError::MissingField("age"))?)?;
        Ok(Self { name, age })
    }

    /// Attach an id, producing the stored entity.
    pub fn with_id(self, id: CamperId) -> Camper {
        Camper {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

/// Partial update of a camper.
///
/// Every provided field is validated before any is assigned, so a patch
/// with one bad field leaves the camper untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamperPatch {
    /// Replacement name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement age.
    #[serde(default)]
    pub age: Option<i64>,
}

impl CamperPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }

    /// Validate every provided field and assign them all, or none.
    ///
    /// # Errors
    ///
    /// Returns every [`ValidationError`] raised, in field order.
    pub fn apply(&self, camper: &mut Camper) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            self.name.as_deref().map(CamperName::new).and_then(Result::err),
            self.age.map(Age::new).and_then(Result::err),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        // Every provided field passed; the setters cannot fail now.
        let mut staged = camper.clone();
        if let Some(name) = &self.name {
            staged.set_name(name.as_str()).map_err(|e| vec![e])?;
        }
        if let Some(age) = self.age {
            staged.set_age(age).map_err(|e| vec![e])?;
        }
        *camper = staged;
        Ok(())
    }
}

/// A camper's signup for an activity at a given hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    /// Identifier.
    pub id: SignupId,
    /// Hour of the day, always within [`TIME_RANGE`](crate::TIME_RANGE).
    pub time: SignupTime,
    /// Owning activity.
    pub activity_id: ActivityId,
    /// Camper, or `None` once the camper has been deleted.
    pub camper_id: Option<CamperId>,
}

impl Signup {
    /// Whether this signup belongs to the given activity.
    pub fn is_for_activity(&self, activity_id: ActivityId) -> bool {
        self.activity_id == activity_id
    }

    /// Whether this signup belongs to the given camper.
    pub fn is_for_camper(&self, camper_id: CamperId) -> bool {
        self.camper_id == Some(camper_id)
    }

    /// Move the signup to another hour. On error the signup is unchanged.
    pub fn set_time(&mut self, raw: i64) -> Result<(), ValidationError> {
        self.time = SignupTime::new(raw)?;
        Ok(())
    }
}

/// A signup that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSignup {
    /// Hour of the day.
    pub time: SignupTime,
    /// Activity signed up for.
    pub activity_id: ActivityId,
    /// Camper signing up.
    pub camper_id: CamperId,
}

impl NewSignup {
    /// Validate raw creation input. Absent fields are errors.
    ///
    /// Only field constraints are checked here; whether the referenced
    /// camper and activity exist is the repository's concern.
    ///
    /// # Errors
    ///
    /// Returns the first failing field's [`ValidationError`].
    pub fn from_raw(
        time: Option<i64>,
        camper_id: Option<i64>,
        activity_id: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let time = SignupTime::new(time.ok_or(ValidationError::MissingField("time"))?)?;
        let camper_id = camper_id
            .map(CamperId::new)
            .ok_or(ValidationError::MissingField("camper_id"))?;
        let activity_id = activity_id
            .map(ActivityId::new)
            .ok_or(ValidationError::MissingField("activity_id"))?;
        Ok(Self {
            time,
            activity_id,
            camper_id,
        })
    }

    /// Attach an id, producing the stored entity.
    pub fn with_id(self, id: SignupId) -> Signup {
        Signup {
            id,
            time: self.time,
            activity_id: self.activity_id,
            camper_id: Some(self.camper_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_camper() -> Camper {
        NewCamper::from_raw(Some("Ana".to_string()), Some(12))
            .unwrap()
            .with_id(CamperId::new(1))
    }

    #[test]
    fn new_camper_requires_both_fields() {
        assert_eq!(
            NewCamper::from_raw(None, Some(12)),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(
            NewCamper::from_raw(Some("Ana".into()), None),
            Err(ValidationError::MissingField("age"))
        );
    }

    #[test]
    fn new_camper_validates_age() {
        assert_eq!(
            NewCamper::from_raw(Some("Bo".into()), Some(5)),
            Err(ValidationError::AgeOutOfRange(5))
        );
    }

    #[test]
    fn patch_applies_all_valid_fields() {
        let mut camper = sample_camper();
        let patch = CamperPatch {
            name: Some("Ana Maria".into()),
            age: Some(13),
        };
        patch.apply(&mut camper).unwrap();
        assert_eq!(camper.name.as_str(), "Ana Maria");
        assert_eq!(camper.age.get(), 13);
    }

    #[test]
    fn patch_with_bad_field_changes_nothing() {
        let mut camper = sample_camper();
        let before = camper.clone();
        let patch = CamperPatch {
            name: Some("Renamed".into()),
            age: Some(40),
        };
        let errors = patch.apply(&mut camper).unwrap_err();
        assert_eq!(errors, vec![ValidationError::AgeOutOfRange(40)]);
        assert_eq!(camper, before);
    }

    #[test]
    fn patch_collects_every_error() {
        let mut camper = sample_camper();
        let patch = CamperPatch {
            name: Some("   ".into()),
            age: Some(3),
        };
        let errors = patch.apply(&mut camper).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::EmptyName, ValidationError::AgeOutOfRange(3)]
        );
    }

    #[test]
    fn empty_patch_is_noop() {
        let mut camper = sample_camper();
        let patch = CamperPatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut camper).unwrap();
        assert_eq!(camper, sample_camper());
    }

    #[test]
    fn new_signup_checks_time_before_references() {
        assert_eq!(
            NewSignup::from_raw(Some(30), None, None),
            Err(ValidationError::TimeOutOfRange(30))
        );
        assert_eq!(
            NewSignup::from_raw(Some(9), None, Some(1)),
            Err(ValidationError::MissingField("camper_id"))
        );
    }

    #[test]
    fn signup_ownership_predicates() {
        let signup = NewSignup::from_raw(Some(9), Some(2), Some(3))
            .unwrap()
            .with_id(SignupId::new(1));
        assert!(signup.is_for_activity(ActivityId::new(3)));
        assert!(!signup.is_for_activity(ActivityId::new(2)));
        assert!(signup.is_for_camper(CamperId::new(2)));
    }

    #[test]
    fn rejected_setter_leaves_camper_unchanged() {
        let mut camper = sample_camper();
        assert_eq!(camper.set_name(" "), Err(ValidationError::EmptyName));
        assert_eq!(camper.set_age(19), Err(ValidationError::AgeOutOfRange(19)));
        assert_eq!(camper, sample_camper());

        camper.set_age(8).unwrap();
        camper.set_name("Bo").unwrap();
        assert_eq!(camper.age.get(), 8);
        assert_eq!(camper.name.as_str(), "Bo");
    }

    #[test]
    fn set_time_accepts_only_hours_of_the_day() {
        let mut signup = NewSignup::from_raw(Some(9), Some(2), Some(3))
            .unwrap()
            .with_id(SignupId::new(1));
        assert_eq!(signup.set_time(24), Err(ValidationError::TimeOutOfRange(24)));
        assert_eq!(signup.set_time(-1), Err(ValidationError::TimeOutOfRange(-1)));
        assert_eq!(signup.time.get(), 9);

        signup.set_time(23).unwrap();
        assert_eq!(signup.time.get(), 23);
    }
}
