//! In-memory matching over projects and skills.

use crate::models::profile::{split_technologies, ProjectRow, SkillRow};

/// Normalizes an optional filter; blank input means "no filter".
pub fn normalize_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// True when one of the project's technology tokens equals `skill`, ignoring case.
/// Substrings do not count: "Python3" does not match "Python".
pub fn uses_technology(project: &ProjectRow, skill: &str) -> bool {
    let wanted = skill.trim().to_lowercase();
    if wanted.is_empty() {
        return false;
    }
    split_technologies(&project.technologies)
        .iter()
        .any(|token| token.to_lowercase() == wanted)
}

/// Case-insensitive substring match on title, description, or raw technologies.
pub fn project_matches(project: &ProjectRow, query: &str) -> bool {
    let needle = query.to_lowercase();
    [&project.title, &project.description, &project.technologies]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Case-insensitive substring match on the skill name.
pub fn skill_matches(skill: &SkillRow, query: &str) -> bool {
    skill.name.to_lowercase().contains(&query.to_lowercase())
}
