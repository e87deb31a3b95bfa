//! Roster domain types
//!
//! Field names follow the columns of the `students` table so rows can be
//! exchanged with the remote store without any mapping layer.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SharedError;

/// Table holding student rows in the remote store
pub const STUDENTS_TABLE: &str = "students";

/// Enrollment status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Active,
    Inactive,
}

impl StudentStatus {
    /// Wire form, as stored in the table
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StudentStatus::Active),
            "inactive" => Ok(StudentStatus::Inactive),
            _ => Err(SharedError::UnknownStatus { value: s.to_string() }),
        }
    }
}

/// A student row as returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Identifier assigned by the store; never generated client-side
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub cohort: String,
    /// Course labels in the order they were selected
    #[serde(default)]
    pub courses: Vec<String>,
    pub date_joined: String,
    pub last_login: String,
    pub status: StudentStatus,
}

/// A student that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub cohort: String,
    pub courses: Vec<String>,
    pub date_joined: String,
    pub last_login: String,
    pub status: StudentStatus,
}

impl NewStudent {
    /// Attach a store-assigned identifier
    pub fn with_id(self, id: impl Into<String>) -> Student {
        Student {
            id: id.into(),
            name: self.name,
            cohort: self.cohort,
            courses: self.courses,
            date_joined: self.date_joined,
            last_login: self.last_login,
            status: self.status,
        }
    }
}

/// Stores differ on identifier columns: uuid text or bigint identity.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// Filter fields an operator can set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    Cohort,
    Status,
    Courses,
    DateJoined,
}

impl FilterKey {
    pub const ALL: [FilterKey; 4] = [
        FilterKey::Cohort,
        FilterKey::Status,
        FilterKey::Courses,
        FilterKey::DateJoined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Cohort => "cohort",
            FilterKey::Status => "status",
            FilterKey::Courses => "courses",
            FilterKey::DateJoined => "date_joined",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SharedError::UnknownFilterKey { key: s.to_string() })
    }
}

/// Active filter values; an empty string leaves that field unfiltered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub cohort: String,
    pub status: String,
    pub courses: String,
    pub date_joined: String,
}

impl FilterSet {
    pub fn get(&self, key: FilterKey) -> &str {
        match key {
            FilterKey::Cohort => &self.cohort,
            FilterKey::Status => &self.status,
            FilterKey::Courses => &self.courses,
            FilterKey::DateJoined => &self.date_joined,
        }
    }

    /// Replace one field, leaving the others untouched
    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        match key {
            FilterKey::Cohort => self.cohort = value,
            FilterKey::Status => self.status = value,
            FilterKey::Courses => self.courses = value,
            FilterKey::DateJoined => self.date_joined = value,
        }
    }

    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Keys whose predicate is currently in effect
    pub fn active_keys(&self) -> Vec<FilterKey> {
        FilterKey::ALL
            .into_iter()
            .filter(|key| !self.get(*key).is_empty())
            .collect()
    }

    pub fn is_unset(&self) -> bool {
        FilterKey::ALL.iter().all(|key| self.get(*key).is_empty())
    }
}
