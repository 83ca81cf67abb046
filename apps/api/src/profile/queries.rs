//! Profile queries — loads the flat rows and assembles them into response documents.
//!
//! Every relation is an explicit query keyed on `profile_id` (or a JOIN for
//! project links). Collections keep insertion order (`ORDER BY id`).

use std::collections::HashMap;

use serde::Deserialize;
use sqlx::SqliteConnection;
use tracing::info;

use crate::db::Store;
use crate::errors::AppError;
use crate::models::profile::{
    EducationRow, LinkRow, ProfileRow, ProjectLinkRow, ProjectRow, SkillRow, WorkExperienceRow,
};
use crate::profile::filters::{normalize_filter, project_matches, skill_matches, uses_technology};
use crate::profile::views::{
    EducationView, FullProfileView, LinkView, ProfileView, ProjectView, SearchResults, SearchView,
    SkillView, WorkExperienceView,
};

pub const DEFAULT_TOP_SKILLS: usize = 10;

/// Profile fields a caller may overwrite. Absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl ProfileUpdate {
    /// Field-wise merge; `self` wins where it carries a value.
    pub fn or(self, fallback: ProfileUpdate) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.or(fallback.name),
            email: self.email.or(fallback.email),
            bio: self.bio.or(fallback.bio),
            location: self.location.or(fallback.location),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Returns the profile with skills, projects, education, work and links nested.
pub async fn get_full_profile(store: &Store) -> Result<FullProfileView, AppError> {
    store
        .with_session(|conn| Box::pin(load_full_profile(conn)))
        .await
}

/// Overwrites the non-empty fields of `update` and returns the resulting profile.
pub async fn update_profile(store: &Store, update: ProfileUpdate) -> Result<ProfileView, AppError> {
    store
        .with_session(|conn| {
            Box::pin(async move {
                let mut profile = fetch_profile(conn).await?;
                if !apply_update(&mut profile, &update) {
                    return Ok(ProfileView::from(profile));
                }

                sqlx::query(
                    "UPDATE profiles SET name = ?, email = ?, bio = ?, location = ? WHERE id = ?",
                )
                .bind(&profile.name)
                .bind(&profile.email)
                .bind(&profile.bio)
                .bind(&profile.location)
                .bind(profile.id)
                .execute(&mut *conn)
                .await?;

                info!("Updated profile {}", profile.id);
                Ok::<_, AppError>(ProfileView::from(profile))
            })
        })
        .await
}

/// Lists the profile's projects, keeping only those that use `skill` when one is given.
pub async fn list_projects(
    store: &Store,
    skill: Option<String>,
) -> Result<Vec<ProjectView>, AppError> {
    store
        .with_session(|conn| {
            Box::pin(async move {
                let profile = fetch_profile(conn).await?;
                let projects = load_projects(conn, profile.id).await?;
                let filter = normalize_filter(skill.as_deref());

                Ok::<Vec<ProjectView>, AppError>(projects
                    .into_iter()
                    .filter(|(row, _)| filter.map_or(true, |s| uses_technology(row, s)))
                    .map(|(row, links)| ProjectView::from_row(row, links))
                    .collect())
            })
        })
        .await
}

/// First `limit` skills in storage order. An empty store yields an empty list.
pub async fn top_skills(store: &Store, limit: usize) -> Result<Vec<SkillView>, AppError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    store
        .with_session(|conn| {
            Box::pin(async move {
                let rows = sqlx::query_as::<_, SkillRow>(
                    "SELECT id, profile_id, name FROM skills ORDER BY id LIMIT ?",
                )
                .bind(limit)
                .fetch_all(&mut *conn)
                .await?;
                Ok::<Vec<SkillView>, AppError>(rows.into_iter().map(SkillView::from).collect())
            })
        })
        .await
}

/// Free-text search over the profile's projects and skills. Both lists are returned even when empty.
pub async fn search(store: &Store, query: String) -> Result<SearchView, AppError> {
    if query.is_empty() {
        return Err(AppError::Validation(
            "Query parameter 'q' is required".to_string(),
        ));
    }

    store
        .with_session(|conn| {
            Box::pin(async move {
                let profile = fetch_profile(conn).await?;
                let projects = load_projects(conn, profile.id).await?;
                let skills = load_skills(conn, profile.id).await?;

                let results = SearchResults {
                    projects: projects
                        .into_iter()
                        .filter(|(row, _)| project_matches(row, &query))
                        .map(|(row, links)| ProjectView::from_row(row, links))
                        .collect(),
                    skills: skills
                        .into_iter()
                        .filter(|s| skill_matches(s, &query))
                        .map(SkillView::from)
                        .collect(),
                };
                Ok::<_, AppError>(SearchView { query, results })
            })
        })
        .await
}

// ────────────────────────────────────────────────────────────────────────────
// Session-scoped loaders
// ────────────────────────────────────────────────────────────────────────────

async fn load_full_profile(conn: &mut SqliteConnection) -> Result<FullProfileView, AppError> {
    let profile = fetch_profile(conn).await?;
    let id = profile.id;

    let skills = load_skills(conn, id).await?;
    let projects = load_projects(conn, id).await?;

    let education = sqlx::query_as::<_, EducationRow>(
        r#"
        SELECT id, profile_id, institution, degree, field_of_study, start_date, end_date
        FROM education
        WHERE profile_id = ?
        ORDER BY id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    let work = sqlx::query_as::<_, WorkExperienceRow>(
        r#"
        SELECT id, profile_id, company, position, description, start_date, end_date
        FROM work_experience
        WHERE profile_id = ?
        ORDER BY id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    let links = sqlx::query_as::<_, LinkRow>(
        "SELECT id, profile_id, platform, url FROM links WHERE profile_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(FullProfileView {
        profile: ProfileView::from(profile),
        skills: skills.into_iter().map(SkillView::from).collect(),
        projects: projects
            .into_iter()
            .map(|(row, links)| ProjectView::from_row(row, links))
            .collect(),
        education: education.into_iter().map(EducationView::from).collect(),
        work: work.into_iter().map(WorkExperienceView::from).collect(),
        links: links.into_iter().map(LinkView::from).collect(),
    })
}

/// The lowest-id profile, or NotFound on an empty store.
async fn fetch_profile(conn: &mut SqliteConnection) -> Result<ProfileRow, AppError> {
    sqlx::query_as::<_, ProfileRow>(
        "SELECT id, name, email, bio, location FROM profiles ORDER BY id LIMIT 1",
    )
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(AppError::profile_not_found)
}

async fn load_skills(conn: &mut SqliteConnection, profile_id: i64) -> Result<Vec<SkillRow>, AppError> {
    Ok(sqlx::query_as::<_, SkillRow>(
        "SELECT id, profile_id, name FROM skills WHERE profile_id = ? ORDER BY id",
    )
    .bind(profile_id)
    .fetch_all(&mut *conn)
    .await?)
}

/// Loads the profile's projects paired with their links.
async fn load_projects(
    conn: &mut SqliteConnection,
    profile_id: i64,
) -> Result<Vec<(ProjectRow, Vec<ProjectLinkRow>)>, AppError> {
    let projects = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT id, profile_id, title, description, technologies
        FROM projects
        WHERE profile_id = ?
        ORDER BY id
        "#,
    )
    .bind(profile_id)
    .fetch_all(&mut *conn)
    .await?;

    let links = sqlx::query_as::<_, ProjectLinkRow>(
        r#"
        SELECT pl.id, pl.project_id, pl.platform, pl.url
        FROM project_links pl
        JOIN projects p ON p.id = pl.project_id
        WHERE p.profile_id = ?
        ORDER BY pl.id
        "#,
    )
    .bind(profile_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut by_project: HashMap<i64, Vec<ProjectLinkRow>> = HashMap::new();
    for link in links {
        by_project.entry(link.project_id).or_default().push(link);
    }

    Ok(projects
        .into_iter()
        .map(|row| {
            let links = by_project.remove(&row.id).unwrap_or_default();
            (row, links)
        })
        .collect())
}

/// Applies non-empty fields onto `profile`. Returns whether anything was written.
fn apply_update(profile: &mut ProfileRow, update: &ProfileUpdate) -> bool {
    fn present(value: &Option<String>) -> Option<&String> {
        value.as_ref().filter(|v| !v.is_empty())
    }

    let mut changed = false;
    if let Some(name) = present(&update.name) {
        profile.name = name.clone();
        changed = true;
    }
    if let Some(email) = present(&update.email) {
        profile.email = email.clone();
        changed = true;
    }
    if let Some(bio) = present(&update.bio) {
        profile.bio = Some(bio.clone());
        changed = true;
    }
    if let Some(location) = present(&update.location) {
        profile.location = Some(location.clone());
        changed = true;
    }
    changed
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_store;
    use crate::models::profile::join_technologies;
    use crate::seed::{seed, SeedOutcome};

    async fn seeded_store() -> (Store, crate::seed::SeedReport) {
        let store = memory_store().await;
        let SeedOutcome::Inserted(report) = seed(&store).await.unwrap() else {
            panic!("fresh store must seed");
        };
        (store, report)
    }

    async fn insert_project(store: &Store, profile_id: i64, title: &str, technologies: &[&str]) {
        let title = title.to_string();
        let technologies = join_technologies(technologies);
        store
            .with_session(|conn| {
                Box::pin(async move {
                    sqlx::query(
                        "INSERT INTO projects (profile_id, title, description, technologies) VALUES (?, ?, '', ?)",
                    )
                    .bind(profile_id)
                    .bind(title)
                    .bind(technologies)
                    .execute(&mut *conn)
                    .await?;
                    Ok::<_, AppError>(())
                })
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_full_profile_matches_seeded_counts() {
        let (store, report) = seeded_store().await;
        let full = get_full_profile(&store).await.unwrap();

        assert_eq!(full.profile.id, report.profile_id);
        assert_eq!(full.skills.len(), report.skills);
        assert_eq!(full.projects.len(), report.projects);
        assert_eq!(full.education.len(), report.education);
        assert_eq!(full.work.len(), report.work);
        assert_eq!(full.links.len(), report.links);
        let nested_links: usize = full.projects.iter().map(|p| p.links.len()).sum();
        assert_eq!(nested_links, report.project_links);
    }

    #[tokio::test]
    async fn test_full_profile_keeps_insertion_order() {
        let (store, _) = seeded_store().await;
        let full = get_full_profile(&store).await.unwrap();
        let ids: Vec<i64> = full.skills.iter().map(|s| s.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(full.skills[0].name, "Python");
    }

    #[tokio::test]
    async fn test_update_name_only_changes_name() {
        let (store, _) = seeded_store().await;
        let before = get_full_profile(&store).await.unwrap().profile;

        let updated = update_profile(
            &store,
            ProfileUpdate {
                name: Some("X".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "X");
        assert_eq!(updated.email, before.email);
        assert_eq!(updated.bio, before.bio);
        assert_eq!(updated.location, before.location);
        assert_eq!(get_full_profile(&store).await.unwrap().profile, updated);
    }

    #[tokio::test]
    async fn test_empty_update_is_a_no_op() {
        let (store, _) = seeded_store().await;
        let before = get_full_profile(&store).await.unwrap().profile;

        let unchanged = update_profile(&store, ProfileUpdate::default()).await.unwrap();
        assert_eq!(unchanged, before);

        let blanks = ProfileUpdate {
            name: Some(String::new()),
            email: Some(String::new()),
            bio: Some(String::new()),
            location: Some(String::new()),
        };
        assert_eq!(update_profile(&store, blanks).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_skill_filter_requires_exact_token() {
        let (store, report) = seeded_store().await;
        insert_project(&store, report.profile_id, "Old Scripts", &["Python3", "Bash"]).await;

        let matches = list_projects(&store, Some("python".to_string())).await.unwrap();
        let titles: Vec<&str> = matches.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles.len(), 8);
        assert!(titles.contains(&"AI Chatbot"));
        assert!(!titles.contains(&"Old Scripts"));
    }

    #[tokio::test]
    async fn test_blank_skill_filter_lists_everything() {
        let (store, report) = seeded_store().await;
        let all = list_projects(&store, None).await.unwrap();
        assert_eq!(all.len(), report.projects);
        assert_eq!(
            list_projects(&store, Some("  ".to_string())).await.unwrap(),
            all
        );
    }

    #[tokio::test]
    async fn test_technologies_round_trip_through_store() {
        let (store, _) = seeded_store().await;
        let projects = list_projects(&store, Some("NLTK".to_string())).await.unwrap();
        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["AI Chatbot", "SMS Spam Classifier"]);
        assert_eq!(projects[0].technologies, vec!["Python", "NLTK", "NLP"]);
    }

    #[tokio::test]
    async fn test_search_matches_title_not_unrelated_skill() {
        let (store, _) = seeded_store().await;
        let found = search(&store, "react".to_string()).await.unwrap();

        assert_eq!(found.query, "react");
        assert!(found
            .results
            .projects
            .iter()
            .any(|p| p.title == "React Native To-Do App"));
        assert!(found.results.skills.iter().all(|s| s.name != "Java"));
        assert!(found.results.skills.iter().any(|s| s.name == "React"));
    }

    #[tokio::test]
    async fn test_search_returns_empty_lists_when_nothing_matches() {
        let (store, _) = seeded_store().await;
        let found = search(&store, "cobol".to_string()).await.unwrap();
        assert!(found.results.projects.is_empty());
        assert!(found.results.skills.is_empty());
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        let store = memory_store().await;
        let err = search(&store, String::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_search_accepts_whitespace_query() {
        let (store, _) = seeded_store().await;
        let found = search(&store, " ".to_string()).await.unwrap();
        assert_eq!(found.query, " ");
        assert!(found.results.skills.iter().any(|s| s.name == "Google Colab"));
        assert!(found.results.skills.iter().all(|s| s.name != "Python"));
    }

    #[tokio::test]
    async fn test_top_skills_is_positional() {
        let (store, report) = seeded_store().await;
        let top = top_skills(&store, 3).await.unwrap();
        let names: Vec<&str> = top.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Python", "C/C++", "Java"]);

        let all = top_skills(&store, 1000).await.unwrap();
        assert_eq!(all.len(), report.skills);
        assert!(top_skills(&store, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_reports_not_found() {
        let store = memory_store().await;
        assert!(matches!(
            get_full_profile(&store).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            update_profile(&store, ProfileUpdate::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            list_projects(&store, None).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            search(&store, "react".to_string()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(top_skills(&store, DEFAULT_TOP_SKILLS).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dates_are_served_as_stored() {
        let (store, _) = seeded_store().await;
        let full = get_full_profile(&store).await.unwrap();

        assert_eq!(full.education[0].start_date, "2021-08");
        assert_eq!(full.education[0].end_date, None);
        assert_eq!(full.work[1].start_date, "2025-01");
        assert_eq!(full.work[1].end_date.as_deref(), Some("2025-12"));
    }

    #[test]
    fn test_update_merge_prefers_primary() {
        let body = ProfileUpdate {
            name: Some("Body".to_string()),
            ..Default::default()
        };
        let query = ProfileUpdate {
            name: Some("Query".to_string()),
            email: Some("q@example.com".to_string()),
            ..Default::default()
        };
        let merged = body.or(query);
        assert_eq!(merged.name.as_deref(), Some("Body"));
        assert_eq!(merged.email.as_deref(), Some("q@example.com"));
        assert_eq!(merged.bio, None);
    }
}
