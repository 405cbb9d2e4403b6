//! # Validated Field Primitives
//!
//! Field values with constraints. Each type validates at construction time
//! and on deserialization, so holding one is proof the constraint holds.
//!
//! | Type           | Constraint                       |
//! |----------------|----------------------------------|
//! | [`CamperName`] | not blank                        |
//! | [`Age`]        | `8 ..= 18`                       |
//! | [`SignupTime`] | `0 ..= 23` (hour of the day)     |

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Accepted camper ages, inclusive.
pub const AGE_RANGE: RangeInclusive<i64> = 8..=18;

/// Accepted signup times, inclusive.
pub const TIME_RANGE: RangeInclusive<i64> = 0..=23;

/// Name of a camper. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CamperName(String);

impl CamperName {
    /// Create a camper name. The value is stored exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(value))
    }

    /// Access the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CamperName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CamperName> for String {
    fn from(name: CamperName) -> Self {
        name.0
    }
}

impl std::fmt::Display for CamperName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Age of a camper in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Age(u8);

impl Age {
    /// Create an age.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AgeOutOfRange`] unless `8 <= age <= 18`.
    pub fn new(age: i64) -> Result<Self, ValidationError> {
        if !AGE_RANGE.contains(&age) {
            return Err(ValidationError::AgeOutOfRange(age));
        }
        // In range, so the narrowing cannot truncate.
        Ok(Self(age as u8))
    }

    /// The age in years.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Age {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for i64 {
    fn from(age: Age) -> Self {
        i64::from(age.0)
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hour of the day a signup takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SignupTime(u8);

impl SignupTime {
    /// Create a signup time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TimeOutOfRange`] unless `0 <= time <= 23`.
    pub fn new(time: i64) -> Result<Self, ValidationError> {
        if !TIME_RANGE.contains(&time) {
            return Err(ValidationError::TimeOutOfRange(time));
        }
        Ok(Self(time as u8))
    }

    /// The hour, `0 ..= 23`.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for SignupTime {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SignupTime> for i64 {
    fn from(time: SignupTime) -> Self {
        i64::from(time.0)
    }
}

impl std::fmt::Display for SignupTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
