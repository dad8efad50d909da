use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: u32, // annual CTC in LPA
    pub skills: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub headline: String,
    pub skills: Vec<String>,
    pub score: u8,
}

/// Lifecycle stages of an application, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Submitted,
    Shortlisted,
    Interview,
    Offer,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Submitted,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
    ];

    /// Next stage in the pipeline; Offer is terminal and maps to itself.
    pub fn advanced(self) -> Self {
        match self {
            ApplicationStatus::Submitted => ApplicationStatus::Shortlisted,
            ApplicationStatus::Shortlisted => ApplicationStatus::Interview,
            ApplicationStatus::Interview => ApplicationStatus::Offer,
            ApplicationStatus::Offer => ApplicationStatus::Offer,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub job_title: String, // denormalized, captured at apply time
    pub company: String,   // denormalized, captured at apply time
    pub status: ApplicationStatus,
    pub resume: String,
    pub created_at: String,
}

impl Application {
    /// Builds a new Submitted application against `job`, snapshotting the
    /// job's title and company so later edits to the posting don't rewrite
    /// application history.
    pub fn submit(job: &Job, resume: &str) -> Self {
        Self {
            id: generate_id(),
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            status: ApplicationStatus::Submitted,
            resume: resume.to_string(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

// Millis keep ids roughly sorted by creation; the random suffix keeps two
// applies in the same millisecond from colliding.
fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u16 = rand::random();
    format!("APP-{}-{:04X}", millis, suffix)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Recruiter,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Candidate => f.write_str("candidate"),
            Role::Recruiter => f.write_str("recruiter"),
        }
    }
}

/// Mock sign-in state. There is no real auth in this demo; the flag and
/// role only gate which views the presentation layer shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub signed_in: bool,
    pub role: Role,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            signed_in: true,
            role: Role::Candidate,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub desired_role: Option<String>,
    pub location: Option<String>,
    pub min_lpa: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_order_reaches_offer_and_stays() {
        let mut status = ApplicationStatus::Submitted;
        let expected = [
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Interview,
            ApplicationStatus::Offer,
            ApplicationStatus::Offer, // terminal, idempotent
        ];
        for want in expected {
            status = status.advanced();
            assert_eq!(status, want);
        }
    }

    #[test]
    fn test_status_serializes_as_variant_name() {
        let json = serde_json::to_string(&ApplicationStatus::Shortlisted).unwrap();
        assert_eq!(json, "\"Shortlisted\"");
        let back: ApplicationStatus = serde_json::from_str("\"Offer\"").unwrap();
        assert_eq!(back, ApplicationStatus::Offer);
    }

    #[test]
    fn test_submit_snapshots_job_fields() {
        let job = Job {
            id: "J-1001".to_string(),
            title: "Full-Stack Engineer".to_string(),
            company: "Skybound Labs".to_string(),
            location: "Bengaluru, IN".to_string(),
            salary: 18,
            skills: vec!["React".to_string(), "Node".to_string()],
            description: String::new(),
        };
        let app = Application::submit(&job, "resume.pdf");
        assert_eq!(app.job_id, "J-1001");
        assert_eq!(app.job_title, "Full-Stack Engineer");
        assert_eq!(app.company, "Skybound Labs");
        assert_eq!(app.status, ApplicationStatus::Submitted);
        assert_eq!(app.resume, "resume.pdf");
        assert!(app.id.starts_with("APP-"));
    }

    #[test]
    fn test_generated_ids_are_distinct_in_same_millisecond() {
        let ids: Vec<String> = (0..50).map(|_| generate_id()).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }
}
