use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;

use rollcall::data::Activity;
use rollcall::errors::ActivityError;

/// A trait for the activity directory and its signup operations.
///
/// The activity set is fixed for the lifetime of the service (seeded at
/// construction, no create or delete), so the interface only covers reads
/// plus the two roster mutations. It is implementation-agnostic to allow
/// swapping the in-memory store for a persistent one later.
#[async_trait]
pub trait ActivityService {
    /// The error type returned by operations on this service.
    type Error;

    /// Returns the full directory, keyed by activity name.
    async fn list(&self) -> Result<BTreeMap<String, Activity>, Self::Error>;

    /// Retrieves a single activity by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no activity exists with the given name.
    async fn get(&self, name: &str) -> Result<Activity, Self::Error>;

    /// Adds a participant email to an activity's roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the activity doesn't exist, or if the email is
    /// already on the roster.
    async fn signup(&self, name: &str, email: &str) -> Result<(), Self::Error>;

    /// Removes a participant email from an activity's roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the activity doesn't exist, or if the email is
    /// not on the roster.
    async fn unregister(&self, name: &str, email: &str) -> Result<(), Self::Error>;
}

/// An in-memory implementation of the `ActivityService` trait.
///
/// Backed by a `DashMap`, so a signup's check-then-append runs under the
/// entry's write guard and two requests racing on the same activity cannot
/// both observe the email as absent. Requests touching different activities
/// proceed in parallel.
pub struct ActivityServiceInMemory {
    activities: DashMap<String, Activity>,
}

impl ActivityServiceInMemory {
    /// Creates a directory pre-populated with the school's seed catalog.
    pub fn seeded() -> Self {
        Self::with_activities(crate::seed::activities())
    }

    pub fn with_activities(entries: impl IntoIterator<Item = (String, Activity)>) -> Self {
        Self {
            activities: entries.into_iter().collect(),
        }
    }
}

impl Default for ActivityServiceInMemory {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl ActivityService for ActivityServiceInMemory {
    type Error = ActivityError;

    async fn list(&self) -> Result<BTreeMap<String, Activity>, Self::Error> {
        Ok(self
            .activities
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn get(&self, name: &str) -> Result<Activity, Self::Error> {
        self.activities
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ActivityError::NotFound(name.to_string()))
    }

    async fn signup(&self, name: &str, email: &str) -> Result<(), Self::Error> {
        let mut entry = self
            .activities
            .get_mut(name)
            .ok_or_else(|| ActivityError::NotFound(name.to_string()))?;

        if !entry.participants.join(email) {
            return Err(ActivityError::AlreadySignedUp {
                email: email.to_string(),
                activity: name.to_string(),
            });
        }
        Ok(())
    }

    async fn unregister(&self, name: &str, email: &str) -> Result<(), Self::Error> {
        let mut entry = self
            .activities
            .get_mut(name)
            .ok_or_else(|| ActivityError::NotFound(name.to_string()))?;

        if !entry.participants.leave(email) {
            return Err(ActivityError::NotSignedUp {
                email: email.to_string(),
                activity: name.to_string(),
            });
        }
        Ok(())
    }
}
