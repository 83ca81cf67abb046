//! Response documents assembled from the flat profile rows.

use serde::{Deserialize, Serialize};

use crate::models::profile::{
    split_technologies, EducationRow, LinkRow, ProfileRow, ProjectLinkRow, ProjectRow, SkillRow,
    WorkExperienceRow,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillView {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkView {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub links: Vec<LinkView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationView {
    pub id: i64,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperienceView {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

/// Flat profile fields, without nested collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub location: Option<String>,
}

/// The whole profile with every related collection nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullProfileView {
    #[serde(flatten)]
    pub profile: ProfileView,
    pub skills: Vec<SkillView>,
    pub projects: Vec<ProjectView>,
    pub education: Vec<EducationView>,
    pub work: Vec<WorkExperienceView>,
    pub links: Vec<LinkView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub projects: Vec<ProjectView>,
    pub skills: Vec<SkillView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub query: String,
    pub results: SearchResults,
}

impl From<ProfileRow> for ProfileView {
    fn from(row: ProfileRow) -> Self {
        ProfileView {
            id: row.id,
            name: row.name,
            email: row.email,
            bio: row.bio,
            location: row.location,
        }
    }
}

impl From<SkillRow> for SkillView {
    fn from(row: SkillRow) -> Self {
        SkillView {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<LinkRow> for LinkView {
    fn from(row: LinkRow) -> Self {
        LinkView {
            platform: row.platform,
            url: row.url,
        }
    }
}

impl From<ProjectLinkRow> for LinkView {
    fn from(row: ProjectLinkRow) -> Self {
        LinkView {
            platform: row.platform,
            url: row.url,
        }
    }
}

impl From<EducationRow> for EducationView {
    fn from(row: EducationRow) -> Self {
        EducationView {
            id: row.id,
            institution: row.institution,
            degree: row.degree,
            field_of_study: row.field_of_study,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

impl From<WorkExperienceRow> for WorkExperienceView {
    fn from(row: WorkExperienceRow) -> Self {
        WorkExperienceView {
            id: row.id,
            company: row.company,
            position: row.position,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

impl ProjectView {
    pub fn from_row(row: ProjectRow, links: Vec<ProjectLinkRow>) -> Self {
        ProjectView {
            id: row.id,
            technologies: split_technologies(&row.technologies),
            title: row.title,
            description: row.description,
            links: links.into_iter().map(LinkView::from).collect(),
        }
    }
}
