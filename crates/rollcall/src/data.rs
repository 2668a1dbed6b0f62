//! Data structures shared between the Rollcall backend and its clients.

use serde::{Deserialize, Serialize};

/// An ordered, duplicate-free list of participant emails.
///
/// Insertion order is signup order, and a given email can appear at most
/// once. The invariant is enforced here rather than at the call sites:
/// [`Roster::join`] refuses duplicates and [`Roster::leave`] refuses absent
/// members, so a roster that exists is a roster that is valid.
///
/// Serializes as a plain JSON array of email strings.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Roster(Vec<String>);

impl Roster {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a roster from a sequence of emails, keeping first occurrences
    /// and dropping any later duplicates.
    pub fn from_emails<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::new();
        for email in emails {
            let _ = roster.join(email.into());
        }
        roster
    }

    pub fn contains(&self, email: &str) -> bool {
        self.0.iter().any(|e| e == email)
    }

    /// Appends an email to the roster. Returns `false` (and leaves the
    /// roster unchanged) if the email is already present.
    pub fn join(&mut self, email: impl Into<String>) -> bool {
        let email = email.into();
        if self.contains(&email) {
            return false;
        }
        self.0.push(email);
        true
    }

    /// Removes an email from the roster. Returns `false` (and leaves the
    /// roster unchanged) if the email is not present.
    pub fn leave(&mut self, email: &str) -> bool {
        match self.0.iter().position(|e| e == email) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the roster in signup order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// A single extracurricular activity as served by the directory.
///
/// Activities are keyed by name in the directory mapping, so the name does
/// not appear in the record itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: usize,
    pub participants: Roster,
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: usize,
        participants: Roster,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants,
        }
    }

    /// How many spots remain, saturating at zero if a roster was seeded
    /// over capacity.
    pub fn spots_left(&self) -> usize {
        self.max_participants.saturating_sub(self.participants.len())
    }
}

/// Body returned by a successful signup or unregister request.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Confirmation {
    pub message: String,
}

/// Body returned for a rejected request.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    pub detail: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UptimeInfo {
    pub seconds: i64,
    pub human: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DirectoryInfo {
    pub activities: String,
    pub activity_count: usize,
    pub participant_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub started_at: String,
    pub uptime: UptimeInfo,
    pub services: DirectoryInfo,
}
