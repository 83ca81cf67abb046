use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Separator written between technologies in `projects.technologies`.
pub const TECHNOLOGY_SEPARATOR: &str = ",";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: i64,
    pub profile_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub profile_id: i64,
    pub title: String,
    pub description: String,
    /// Comma-joined technology list. Use [`split_technologies`] to read it.
    pub technologies: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProjectLinkRow {
    pub id: i64,
    pub project_id: i64,
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub id: i64,
    pub profile_id: i64,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    /// Free-form, usually `YYYY-MM`.
    pub start_date: String,
    /// `None` while ongoing.
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkExperienceRow {
    pub id: i64,
    pub profile_id: i64,
    pub company: String,
    pub position: String,
    pub description: String,
    /// Free-form, usually `YYYY-MM`.
    pub start_date: String,
    /// `None` while ongoing.
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LinkRow {
    pub id: i64,
    pub profile_id: i64,
    pub platform: String,
    pub url: String,
}

/// Splits a stored technologies string into trimmed, non-empty tokens.
pub fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins a technology list into its stored form.
pub fn join_technologies<S: AsRef<str>>(technologies: &[S]) -> String {
    technologies
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(TECHNOLOGY_SEPARATOR)
}
