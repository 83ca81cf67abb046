//! Demo data seeding — populates an empty store with one profile and its records.
//!
//! Runs once at startup. A store that already holds a profile is left untouched.

use serde::Serialize;
use sqlx::SqliteConnection;
use tracing::info;

use crate::db::Store;
use crate::errors::AppError;
use crate::models::profile::join_technologies;

// ────────────────────────────────────────────────────────────────────────────
// Sample data
// ────────────────────────────────────────────────────────────────────────────

struct SeedProfile {
    name: &'static str,
    email: &'static str,
    bio: &'static str,
    location: &'static str,
}

struct SeedEducation {
    institution: &'static str,
    degree: &'static str,
    field_of_study: &'static str,
    start_date: &'static str,
    end_date: Option<&'static str>,
}

struct SeedWork {
    company: &'static str,
    position: &'static str,
    description: &'static str,
    start_date: &'static str,
    end_date: Option<&'static str>,
}

struct SeedProject {
    title: &'static str,
    description: &'static str,
    technologies: &'static [&'static str],
    links: &'static [(&'static str, &'static str)],
}

const PROFILE: SeedProfile = SeedProfile {
    name: "Ankit Sah",
    email: "an96.sah@gmail.com",
    bio: "Aspiring Software Engineer Intern with a strong foundation in computer science and a passion for building innovative solutions.",
    location: "New Delhi, India",
};

const SKILLS: &[&str] = &[
    "Python",
    "C/C++",
    "Java",
    "MySQL",
    "HTML",
    "CSS",
    "JavaScript",
    "Solidity",
    "React",
    "Django",
    "Flask",
    "FastAPI",
    "Streamlit",
    "TensorFlow",
    "PyTorch",
    "Scikit-learn",
    "OpenCV",
    "NLP",
    "Git",
    "Google Colab",
    "Jupyter Notebook",
];

const EDUCATION: &[SeedEducation] = &[
    SeedEducation {
        institution: "National Institute of Technology Delhi (NIT Delhi)",
        degree: "Bachelor of Technology",
        field_of_study: "Artificial Intelligence and Data Science",
        start_date: "2021-08",
        end_date: None,
    },
    SeedEducation {
        institution: "Rajkiya Pratibha Vikas Vidyalaya (RPVV), Karol Bagh",
        degree: "12th Standard",
        field_of_study: "Science",
        start_date: "2020-01",
        end_date: Some("2022-01"),
    },
    SeedEducation {
        institution: "Rajkiya Pratibha Vikas Vidyalaya (RPVV), Karol Bagh",
        degree: "10th Standard",
        field_of_study: "General",
        start_date: "2018-01",
        end_date: Some("2020-01"),
    },
];

const WORK: &[SeedWork] = &[
    SeedWork {
        company: "LeetCode & Competitive Programming",
        position: "Data Structure and Algorithm Specialist",
        description: "Solved 100+ questions on LeetCode, CodeForces, and other platforms. Strong foundation in DSA using Python.",
        start_date: "2023-01",
        end_date: None,
    },
    SeedWork {
        company: "CISCO Networking Basics",
        position: "Networking Certification",
        description: "Completed comprehensive course covering Networking basics, Protocols and networking systems.",
        start_date: "2025-01",
        end_date: Some("2025-12"),
    },
    SeedWork {
        company: "LinkedIn Learning - AI/ML Foundations",
        position: "Machine Learning Certification",
        description: "Learned core concepts of Machine Learning, Deep Learning, Computer Vision, and NLP using Python libraries such as TensorFlow and Ski-learn.",
        start_date: "2024-01",
        end_date: Some("2024-12"),
    },
];

const PROJECTS: &[SeedProject] = &[
    SeedProject {
        title: "AI Chatbot",
        description: "Built a chatbot using Python and NLTK to handle campus-related queries. Implemented intent recognition, keyword extraction, and rule-based responses.",
        technologies: &["Python", "NLTK", "NLP"],
        links: &[],
    },
    SeedProject {
        title: "Smart Monitoring System",
        description: "Developed a CNN-based deep learning model for detecting different objects, base reference model YOLOv8. Integrated with OpenCV, Web IP Cam, Fine tuning for specific objects, Upload detect method, real-time analysis with location.",
        technologies: &["Python", "OpenCV", "YOLOv8", "CNN", "Deep Learning"],
        links: &[],
    },
    SeedProject {
        title: "Expense Tracker and Management System",
        description: "Designed a desktop finance management app using Python, SQLite, and Tkinter. Implemented expense logging, category-wise summaries, and a basic analytics dashboard.",
        technologies: &["Python", "SQLite", "Tkinter", "GUI"],
        links: &[],
    },
    SeedProject {
        title: "SMS Spam Classifier",
        description: "Created a machine learning model using Scikit-learn and NLTK to classify SMS messages as spam or ham. Used process, TF-IDF vectorization, and Naive Bayes for high accuracy.",
        technologies: &["Python", "Scikit-learn", "NLTK", "Machine Learning", "NLP"],
        links: &[],
    },
    SeedProject {
        title: "React Native To-Do App",
        description: "Built a cross-platform to-do app in React Native for task management. Implemented features like task creation, editing, deletion, and local storage with a responsive UI.",
        technologies: &["React Native", "JavaScript", "Mobile Development"],
        links: &[],
    },
    SeedProject {
        title: "Decentralized Voting System",
        description: "A secure voting application built on the Ethereum blockchain. Features include candidate registration, voter verification, and tamper-proof vote counting.",
        technologies: &["Solidity", "JavaScript", "React", "Web3.js", "Blockchain"],
        links: &[],
    },
    SeedProject {
        title: "Library Management System",
        description: "Robust desktop application for managing library books and members. Handles issue/return cycles, fine calculation, and generates reports using a relational database.",
        technologies: &["Java", "MySQL", "JDBC", "Swing"],
        links: &[],
    },
    SeedProject {
        title: "High-Performance Matrix Multiplier",
        description: "Optimized matrix multiplication algorithms implemented to demonstrate memory management and pointer arithmetic. Benchmarked against standard libraries.",
        technologies: &["C/C++", "Make", "System Programming"],
        links: &[],
    },
    SeedProject {
        title: "E-Commerce API Service",
        description: "Scalable backend service for an online store. Features JWT authentication, product catalog management, and order processing.",
        technologies: &["Django", "Python", "SQL", "Rest API"],
        links: &[],
    },
    SeedProject {
        title: "Weather Forecasting Microservice",
        description: "Lightweight API that fetches real-time weather data and provides forecasted trends. Deployed using Docker containers for portability.",
        technologies: &["Flask", "Python", "Docker", "API", "Git"],
        links: &[],
    },
    SeedProject {
        title: "Stock Price Predictor Dashboard",
        description: "Interactive web dashboard for visualizing stock trends and predicting future prices using deep learning models.",
        technologies: &["Streamlit", "TensorFlow", "Python", "Pandas"],
        links: &[],
    },
    SeedProject {
        title: "Image Classification Research",
        description: "Research notebook demonstrating state-of-the-art image classification techniques. documented experiments with different hyperparameters.",
        technologies: &["PyTorch", "Jupyter Notebook", "Google Colab", "Computer Vision"],
        links: &[],
    },
    SeedProject {
        title: "Personal Portfolio Website",
        description: "Responsive personal portfolio website to showcase projects and skills. Implemented modern design principles and semantic markup.",
        technologies: &["HTML", "CSS", "JavaScript", "Git", "Responsive Design"],
        links: &[],
    },
    SeedProject {
        title: "FastAPI User Authentication System",
        description: "High-performance authentication microservice. Implements OAuth2 with JWT tokens, password hashing, and role-based access control.",
        technologies: &["FastAPI", "Python", "SQLAlchemy", "AsyncIO"],
        links: &[],
    },
    SeedProject {
        title: "Netflix Clone",
        description: "A pixel-perfect clone of Netflix with movie trailers (TMDB API), user authentication, and 'My List' feature. Optimized for performance and responsiveness.",
        technologies: &["React", "Redux", "Firebase", "TMDB API", "Tailwind CSS"],
        links: &[],
    },
    SeedProject {
        title: "Amazon Clone",
        description: "Full-stack e-commerce replica with user authentication, product basket, and Stripe payment processing. key functionality including checkout pipeline.",
        technologies: &["React", "Node.js", "Express", "Stripe API", "Firebase Auth"],
        links: &[],
    },
    SeedProject {
        title: "Modern Lo-Fi Landing Page",
        description: "A high-conversion landing page featuring a modern lo-fi aesthetic. Built with semantic HTML5 and advanced CSS3 animations (keyframes, transitions).",
        technologies: &["HTML", "CSS", "Flexbox", "Responsive Design"],
        links: &[],
    },
    SeedProject {
        title: "CSS Art Gallery",
        description: "A collection of artistic shapes and illustrations created entirely with Code. Demonstrates mastery of CSS pseudo-elements, gradients, and box-shadows without any images.",
        technologies: &["HTML", "CSS", "Pure CSS", "Art"],
        links: &[],
    },
    SeedProject {
        title: "Grid Dashboard UI",
        description: "A complex admin dashboard layout built exclusively with CSS Grid. Features a responsive sidebar, data widgets, and a layout that adapts seamlessly to mobile screens.",
        technologies: &["HTML", "CSS", "CSS Grid", "UI Design"],
        links: &[],
    },
    SeedProject {
        title: "Parallax Scrolling Website",
        description: "An immersive storytelling website utilizing CSS parallax effects and Scroll Snap API. Creates a depth-filled user experience without heavy JavaScript libraries.",
        technologies: &["HTML", "CSS", "Parallax", "Web Design"],
        links: &[],
    },
    SeedProject {
        title: "Responsive Email Templates",
        description: "A suite of cross-client compatible HTML email templates. Rigorously tested for rendering consistency across Outlook, Gmail, and Apple Mail.",
        technologies: &["HTML", "CSS", "Email Design", "Table Layouts"],
        links: &[],
    },
];

const LINKS: &[(&str, &str)] = &[
    ("github", "https://github.com/Slack-Hacker"),
    ("linkedin", "https://www.linkedin.com/in/slack-hacker"),
    (
        "resume",
        "https://drive.google.com/file/d/1DGYEl4zCxXKwzK-0sJ9XAcHSqe0zmTCy/view",
    ),
];

// ────────────────────────────────────────────────────────────────────────────
// Outcome
// ────────────────────────────────────────────────────────────────────────────

/// Row counts written by a seed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedReport {
    pub profile_id: i64,
    pub skills: usize,
    pub education: usize,
    pub work: usize,
    pub projects: usize,
    pub project_links: usize,
    pub links: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome {
    AlreadySeeded,
    Inserted(SeedReport),
}

// ────────────────────────────────────────────────────────────────────────────
// Seeding
// ────────────────────────────────────────────────────────────────────────────

/// Seeds the store unless a profile already exists. Everything is written in one session.
pub async fn seed(store: &Store) -> Result<SeedOutcome, AppError> {
    let outcome = store
        .with_session(|conn| Box::pin(seed_in_session(conn)))
        .await?;

    match &outcome {
        SeedOutcome::AlreadySeeded => info!("Profile already present, skipping seed"),
        SeedOutcome::Inserted(report) => info!(
            "Seeded profile {} ({} skills, {} projects, {} project links, {} education, {} work, {} links)",
            report.profile_id,
            report.skills,
            report.projects,
            report.project_links,
            report.education,
            report.work,
            report.links
        ),
    }
    Ok(outcome)
}

async fn seed_in_session(conn: &mut SqliteConnection) -> Result<SeedOutcome, AppError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(&mut *conn)
        .await?;
    if existing > 0 {
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let profile_id = sqlx::query("INSERT INTO profiles (name, email, bio, location) VALUES (?, ?, ?, ?)")
        .bind(PROFILE.name)
        .bind(PROFILE.email)
        .bind(PROFILE.bio)
        .bind(PROFILE.location)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

    for skill in SKILLS {
        sqlx::query("INSERT INTO skills (profile_id, name) VALUES (?, ?)")
            .bind(profile_id)
            .bind(*skill)
            .execute(&mut *conn)
            .await?;
    }

    for edu in EDUCATION {
        sqlx::query(
            r#"
            INSERT INTO education
                (profile_id, institution, degree, field_of_study, start_date, end_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(profile_id)
        .bind(edu.institution)
        .bind(edu.degree)
        .bind(edu.field_of_study)
        .bind(edu.start_date)
        .bind(edu.end_date)
        .execute(&mut *conn)
        .await?;
    }

    for job in WORK {
        sqlx::query(
            r#"
            INSERT INTO work_experience
                (profile_id, company, position, description, start_date, end_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(profile_id)
        .bind(job.company)
        .bind(job.position)
        .bind(job.description)
        .bind(job.start_date)
        .bind(job.end_date)
        .execute(&mut *conn)
        .await?;
    }

    let mut project_links = 0;
    for project in PROJECTS {
        let project_id = sqlx::query(
            "INSERT INTO projects (profile_id, title, description, technologies) VALUES (?, ?, ?, ?)",
        )
        .bind(profile_id)
        .bind(project.title)
        .bind(project.description)
        .bind(join_technologies(project.technologies))
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        for (platform, url) in project.links {
            sqlx::query("INSERT INTO project_links (project_id, platform, url) VALUES (?, ?, ?)")
                .bind(project_id)
                .bind(*platform)
                .bind(*url)
                .execute(&mut *conn)
                .await?;
            project_links += 1;
        }
    }

    for (platform, url) in LINKS {
        sqlx::query("INSERT INTO links (profile_id, platform, url) VALUES (?, ?, ?)")
            .bind(profile_id)
            .bind(*platform)
            .bind(*url)
            .execute(&mut *conn)
            .await?;
    }

    Ok(SeedOutcome::Inserted(SeedReport {
        profile_id,
        skills: SKILLS.len(),
        education: EDUCATION.len(),
        work: WORK.len(),
        projects: PROJECTS.len(),
        project_links,
        links: LINKS.len(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_store;

    const TABLES: &[&str] = &[
        "profiles",
        "skills",
        "projects",
        "project_links",
        "education",
        "work_experience",
        "links",
    ];

    async fn row_counts(store: &Store) -> Vec<i64> {
        store
            .with_session(|conn| {
                Box::pin(async move {
                    let mut counts = Vec::new();
                    for table in TABLES {
                        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                            .fetch_one(&mut *conn)
                            .await?;
                        counts.push(count);
                    }
                    Ok::<_, AppError>(counts)
                })
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_seed_inserts_expected_rows() {
        let store = memory_store().await;
        let outcome = seed(&store).await.unwrap();

        let SeedOutcome::Inserted(report) = outcome else {
            panic!("first seed must insert");
        };
        assert_eq!(report.skills, 21);
        assert_eq!(report.education, 3);
        assert_eq!(report.work, 3);
        assert_eq!(report.projects, 21);
        assert_eq!(report.project_links, 0);
        assert_eq!(report.links, 3);

        let counts = row_counts(&store).await;
        assert_eq!(counts, vec![1, 21, 21, 0, 3, 3, 3]);
    }

    #[tokio::test]
    async fn test_seed_twice_is_idempotent() {
        let store = memory_store().await;
        seed(&store).await.unwrap();
        let before = row_counts(&store).await;

        assert_eq!(seed(&store).await.unwrap(), SeedOutcome::AlreadySeeded);
        assert_eq!(row_counts(&store).await, before);
    }

    #[tokio::test]
    async fn test_seed_stores_technologies_comma_joined() {
        let store = memory_store().await;
        seed(&store).await.unwrap();

        let raw: String = store
            .with_session(|conn| {
                Box::pin(async move {
                    let raw: String = sqlx::query_scalar(
                        "SELECT technologies FROM projects WHERE title = 'AI Chatbot'",
                    )
                    .fetch_one(&mut *conn)
                    .await?;
                    Ok::<_, AppError>(raw)
                })
            })
            .await
            .unwrap();
        assert_eq!(raw, "Python,NLTK,NLP");
    }
}
