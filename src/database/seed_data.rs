use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::SeedError;
use crate::models::Activity;

struct SeedActivity {
    name: &'static str,
    description: &'static str,
    schedule: &'static str,
    max_participants: usize,
    participants: &'static [&'static str],
}

const DEFAULT_SEED: &[SeedActivity] = &[
    SeedActivity {
        name: "Soccer",
        description: "Join the school soccer team and compete in inter-school matches",
        schedule: "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        max_participants: 22,
        participants: &["liam@mergington.edu", "noah@mergington.edu"],
    },
    SeedActivity {
        name: "Basketball",
        description: "Practice basketball skills and play in friendly games",
        schedule: "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
        max_participants: 15,
        participants: &["ava@mergington.edu", "mia@mergington.edu"],
    },
    SeedActivity {
        name: "Debate Club",
        description: "Develop public speaking and argumentation skills",
        schedule: "Fridays, 4:00 PM - 5:30 PM",
        max_participants: 12,
        participants: &["james@mergington.edu", "benjamin@mergington.edu"],
    },
    SeedActivity {
        name: "Math Olympiad",
        description: "Solve challenging problems and prepare for math competitions",
        schedule: "Tuesdays, 3:30 PM - 4:30 PM",
        max_participants: 10,
        participants: &["charlotte@mergington.edu", "henry@mergington.edu"],
    },
    SeedActivity {
        name: "Drama Club",
        description: "Act, direct, and produce plays and performances",
        schedule: "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
        max_participants: 20,
        participants: &["ella@mergington.edu", "scarlett@mergington.edu"],
    },
    SeedActivity {
        name: "Art Studio",
        description: "Explore painting, drawing, and sculpture",
        schedule: "Thursdays, 3:30 PM - 5:00 PM",
        max_participants: 15,
        participants: &["amelia@mergington.edu", "harper@mergington.edu"],
    },
    SeedActivity {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    SeedActivity {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    SeedActivity {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        max_participants: 30,
        participants: &["john@mergington.edu", "olivia@mergington.edu"],
    },
];

/// The built-in Mergington High School activity list.
pub fn default_activities() -> BTreeMap<String, Activity> {
    DEFAULT_SEED
        .iter()
        .map(|seed| {
            (
                seed.name.to_string(),
                Activity {
                    description: seed.description.to_string(),
                    schedule: seed.schedule.to_string(),
                    max_participants: seed.max_participants,
                    participants: seed.participants.iter().map(|p| p.to_string()).collect(),
                },
            )
        })
        .collect()
}

/// Every `name -> activity` entry of a seed object, in file order. Unlike a
/// map, repeated keys are kept so they can be reported.
struct SeedEntries(Vec<(String, Activity)>);

impl<'de> Deserialize<'de> for SeedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SeedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping activity names to activities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Activity>()? {
                    entries.push(entry);
                }
                Ok(SeedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Reads a seed file shaped like the `GET /activities` response body.
/// An activity name that appears twice is rejected instead of letting the
/// later entry silently replace the earlier one.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<BTreeMap<String, Activity>, SeedError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let SeedEntries(entries) = serde_json::from_str(&raw)?;

    let mut activities = BTreeMap::new();
    for (name, activity) in entries {
        if activities.contains_key(&name) {
            return Err(SeedError::Invalid {
                activity: name,
                reason: "activity is defined more than once".to_string(),
            });
        }
        activities.insert(name, activity);
    }
    Ok(activities)
}

pub fn validate_seed(activities: &BTreeMap<String, Activity>) -> Result<(), SeedError> {
    for (name, activity) in activities {
        let invalid = |reason: &str| SeedError::Invalid {
            activity: name.clone(),
            reason: reason.to_string(),
        };

        if name.trim().is_empty() {
            return Err(invalid("activity name is empty"));
        }
        if activity.max_participants == 0 {
            return Err(invalid("max_participants must be positive"));
        }

        let mut seen = HashSet::new();
        for email in &activity.participants {
            if !seen.insert(email.as_str()) {
                return Err(invalid(&format!("duplicate participant {}", email)));
            }
        }
    }
    Ok(())
}
