//! Axum route handlers for the profile API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::profile::queries::{self, ProfileUpdate, DEFAULT_TOP_SKILLS};
use crate::profile::views::{FullProfileView, ProfileView, ProjectView, SearchView, SkillView};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    pub skill: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopSkillsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub profile: ProfileView,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectView>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<SkillView>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<FullProfileView>, AppError> {
    Ok(Json(queries::get_full_profile(&state.store).await?))
}

/// PUT /api/profile
///
/// Fields may come from the query string, a JSON body, or both. The body wins per field.
/// A request without a JSON content type has no body; a malformed JSON body is a 422.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    query: Result<Query<ProfileUpdate>, QueryRejection>,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<UpdateProfileResponse>, AppError> {
    let Query(from_query) = query?;
    let update = match body {
        Ok(Json(from_body)) => from_body.or(from_query),
        Err(JsonRejection::MissingJsonContentType(_)) => from_query,
        Err(rejection) => return Err(rejection.into()),
    };

    let profile = queries::update_profile(&state.store, update).await?;
    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
        profile,
    }))
}

/// GET /api/projects?skill=
pub async fn handle_list_projects(
    State(state): State<AppState>,
    query: Result<Query<ProjectsQuery>, QueryRejection>,
) -> Result<Json<ProjectsResponse>, AppError> {
    let Query(params) = query?;
    let projects = queries::list_projects(&state.store, params.skill).await?;
    Ok(Json(ProjectsResponse { projects }))
}

/// GET /api/skills/top?limit=
pub async fn handle_top_skills(
    State(state): State<AppState>,
    query: Result<Query<TopSkillsQuery>, QueryRejection>,
) -> Result<Json<SkillsResponse>, AppError> {
    let Query(params) = query?;
    let limit = params.limit.unwrap_or(DEFAULT_TOP_SKILLS);
    let skills = queries::top_skills(&state.store, limit).await?;
    Ok(Json(SkillsResponse { skills }))
}

/// GET /api/search?q=
pub async fn handle_search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchView>, AppError> {
    let Query(params) = query?;
    let q = params
        .q
        .ok_or_else(|| AppError::Validation("Query parameter 'q' is required".to_string()))?;
    Ok(Json(queries::search(&state.store, q).await?))
}
