use std::collections::BTreeMap;
use std::path::Path;

use tokio::sync::Mutex;

use crate::database::seed_data;
use crate::error::SeedError;
use crate::models::Activity;

/// In-memory store of all activities for the lifetime of the process.
///
/// The set of activity names is fixed at construction, so lookups need no
/// lock. Each activity's record sits behind its own mutex, which the
/// registration service holds for the whole check-then-mutate step.
#[derive(Debug)]
pub struct ActivityRegistry {
    activities: BTreeMap<String, Mutex<Activity>>,
}

impl ActivityRegistry {
    pub fn new(seed: BTreeMap<String, Activity>) -> Result<Self, SeedError> {
        seed_data::validate_seed(&seed)?;
        let activities = seed
            .into_iter()
            .map(|(name, activity)| (name, Mutex::new(activity)))
            .collect();
        Ok(Self { activities })
    }

    /// Registry populated with the built-in school activities.
    pub fn with_default_seed() -> Result<Self, SeedError> {
        Self::new(seed_data::default_activities())
    }

    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        Self::new(seed_data::load_seed_file(path)?)
    }

    /// Copies every activity. Activities are locked one at a time, so the
    /// result is not an atomic view across activities.
    pub async fn list(&self) -> BTreeMap<String, Activity> {
        let mut out = BTreeMap::new();
        for (name, activity) in &self.activities {
            out.insert(name.clone(), activity.lock().await.clone());
        }
        out
    }

    pub async fn get(&self, name: &str) -> Option<Activity> {
        match self.activities.get(name) {
            Some(activity) => Some(activity.lock().await.clone()),
            None => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.activities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub(crate) fn entry(&self, name: &str) -> Option<&Mutex<Activity>> {
        self.activities.get(name)
    }
}
