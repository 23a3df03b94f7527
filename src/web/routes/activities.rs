use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::database::ActivityRegistry;
use crate::error::RegistrationResult;
use crate::models::{Activity, MessageResponse};
use crate::services::registration_service;

/// `email` is optional at the extractor so a missing parameter reaches the
/// service and comes back as a JSON `detail` error.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
}

pub async fn list_activities_handler(
    State(registry): State<Arc<ActivityRegistry>>,
) -> Json<BTreeMap<String, Activity>> {
    Json(registration_service::list_activities(&registry).await)
}

pub async fn activity_detail_handler(
    Path(activity_name): Path<String>,
    State(registry): State<Arc<ActivityRegistry>>,
) -> RegistrationResult<Json<Activity>> {
    let activity = registration_service::get_activity(&registry, &activity_name).await?;
    Ok(Json(activity))
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
    State(registry): State<Arc<ActivityRegistry>>,
) -> RegistrationResult<Json<MessageResponse>> {
    let res = registration_service::signup(&registry, &activity_name, query.email()).await?;
    Ok(Json(res))
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
    State(registry): State<Arc<ActivityRegistry>>,
) -> RegistrationResult<Json<MessageResponse>> {
    let res = registration_service::unregister(&registry, &activity_name, query.email()).await?;
    Ok(Json(res))
}
