use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::database::ActivityRegistry;
use crate::error::{RegistrationError, RegistrationResult};
use crate::models::{Activity, MessageResponse};

pub async fn list_activities(registry: &ActivityRegistry) -> BTreeMap<String, Activity> {
    registry.list().await
}

pub async fn get_activity(
    registry: &ActivityRegistry,
    activity_name: &str,
) -> RegistrationResult<Activity> {
    registry
        .get(activity_name)
        .await
        .ok_or(RegistrationError::NotFound)
}

pub async fn signup(
    registry: &ActivityRegistry,
    activity_name: &str,
    email: &str,
) -> RegistrationResult<MessageResponse> {
    let email = require_email(email)?;
    let Some(entry) = registry.entry(activity_name) else {
        warn!(activity = activity_name, "Signup for unknown activity");
        return Err(RegistrationError::NotFound);
    };

    let mut activity = entry.lock().await;
    if activity.is_registered(email) {
        warn!(activity = activity_name, email, "Duplicate signup rejected");
        return Err(RegistrationError::AlreadySignedUp);
    }
    if activity.is_full() {
        warn!(
            activity = activity_name,
            email,
            max_participants = activity.max_participants,
            "Signup rejected, activity is full"
        );
        return Err(RegistrationError::ActivityFull);
    }

    activity.participants.push(email.to_string());
    info!(
        activity = activity_name,
        email,
        spots_left = activity.spots_left(),
        "Participant signed up"
    );

    Ok(MessageResponse {
        message: format!("Signed up {} for {}", email, activity_name),
    })
}

pub async fn unregister(
    registry: &ActivityRegistry,
    activity_name: &str,
    email: &str,
) -> RegistrationResult<MessageResponse> {
    let email = require_email(email)?;
    let Some(entry) = registry.entry(activity_name) else {
        warn!(activity = activity_name, "Unregister from unknown activity");
        return Err(RegistrationError::NotFound);
    };

    let mut activity = entry.lock().await;
    let Some(pos) = activity.participants.iter().position(|p| p == email) else {
        warn!(activity = activity_name, email, "Unregister of non-participant rejected");
        return Err(RegistrationError::NotRegistered);
    };

    activity.participants.remove(pos);
    info!(activity = activity_name, email, "Participant unregistered");

    Ok(MessageResponse {
        message: format!("Unregistered {} from {}", email, activity_name),
    })
}

// Presence only; the address format is not checked.
fn require_email(email: &str) -> RegistrationResult<&str> {
    if email.trim().is_empty() {
        return Err(RegistrationError::InvalidRequest(
            "email is required".to_string(),
        ));
    }
    Ok(email)
}
