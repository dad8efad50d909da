use crate::models::{
    Application, ApplicationStatus, Candidate, Job, Preferences, Role, Session,
};
use crate::seed;
use crate::store::StorePort;

const KEY_SESSION: &str = "session";
const KEY_JOBS: &str = "jobs";
const KEY_APPLICATIONS: &str = "applications";
const KEY_CANDIDATES: &str = "candidates";
const KEY_PREFERENCES: &str = "preferences";

/// Owning container for the four entity collections.
///
/// Every mutation replaces the affected collection wholesale with a new
/// value derived from the previous one, then mirrors it to the store.
/// Nothing is mutated in place, so a reader holding the previous value
/// never observes a half-applied change. The store is injected so tests
/// run against `MemoryStore`.
pub struct Marketplace<S: StorePort> {
    session: Session,
    jobs: Vec<Job>,
    applications: Vec<Application>,
    candidates: Vec<Candidate>,
    preferences: Preferences,
    store: S,
}

impl<S: StorePort> Marketplace<S> {
    /// Hydrates from the store, falling back to the demo seed data for
    /// anything absent or undecodable.
    pub fn open(store: S) -> Self {
        Self {
            session: store.load(KEY_SESSION, Session::default()),
            jobs: store.load(KEY_JOBS, seed::demo_jobs()),
            applications: store.load(KEY_APPLICATIONS, Vec::new()),
            candidates: store.load(KEY_CANDIDATES, seed::demo_candidates()),
            preferences: store.load(KEY_PREFERENCES, Preferences::default()),
            store,
        }
    }

    /// True when any collection key has been written to the store. Tells a
    /// fresh store apart from one holding a prior session's data, since
    /// `open` falls back to seeds in memory either way.
    pub fn store_has_data(&self) -> bool {
        [
            KEY_SESSION,
            KEY_JOBS,
            KEY_APPLICATIONS,
            KEY_CANDIDATES,
            KEY_PREFERENCES,
        ]
        .iter()
        .any(|key| self.store.load_raw(key).is_some())
    }

    /// Restores the seed data and drops all applications.
    pub fn reset(&mut self) {
        self.session = Session::default();
        self.jobs = seed::demo_jobs();
        self.applications = Vec::new();
        self.candidates = seed::demo_candidates();
        self.preferences = Preferences::default();
        self.mirror_all();
    }

    // --- Read accessors ---

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    // --- Application lifecycle ---

    /// Creates a Submitted application against the given job. Applying to
    /// the same job twice is allowed and produces two independent entries.
    /// Returns None when the job id is unknown.
    pub fn apply(&mut self, job_id: &str, resume: &str) -> Option<Application> {
        let job = self.job(job_id)?;
        let application = Application::submit(job, resume);

        let mut next = self.applications.clone();
        next.push(application.clone());
        self.applications = next;
        self.store.save(KEY_APPLICATIONS, &self.applications);

        Some(application)
    }

    /// Moves one application a single step along the pipeline. Idempotent
    /// at Offer. Returns the status after the move, or None when the id is
    /// unknown, in which case the collection is left untouched.
    pub fn advance(&mut self, id: &str) -> Option<ApplicationStatus> {
        self.application(id)?;

        let next: Vec<Application> = self
            .applications
            .iter()
            .map(|a| {
                if a.id == id {
                    Application {
                        status: a.status.advanced(),
                        ..a.clone()
                    }
                } else {
                    a.clone()
                }
            })
            .collect();
        self.applications = next;
        self.store.save(KEY_APPLICATIONS, &self.applications);

        self.application(id).map(|a| a.status)
    }

    /// Removes an application. Returns false (collection untouched) when
    /// the id is unknown. No cascading effect on jobs or candidates.
    pub fn withdraw(&mut self, id: &str) -> bool {
        if self.application(id).is_none() {
            return false;
        }
        let next: Vec<Application> = self
            .applications
            .iter()
            .filter(|a| a.id != id)
            .cloned()
            .collect();
        self.applications = next;
        self.store.save(KEY_APPLICATIONS, &self.applications);
        true
    }

    // --- Session and preferences ---

    pub fn sign_in(&mut self) {
        self.replace_session(Session {
            signed_in: true,
            ..self.session.clone()
        });
    }

    pub fn sign_out(&mut self) {
        self.replace_session(Session {
            signed_in: false,
            ..self.session.clone()
        });
    }

    pub fn set_role(&mut self, role: Role) {
        self.replace_session(Session {
            role,
            ..self.session.clone()
        });
    }

    fn replace_session(&mut self, session: Session) {
        self.session = session;
        self.store.save(KEY_SESSION, &self.session);
    }

    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
        self.store.save(KEY_PREFERENCES, &self.preferences);
    }

    // --- Ranking ---

    /// Scores the board against the saved preferences and the directory's
    /// skill pool, best first.
    pub fn rank_jobs(&self, limit: usize) -> Vec<(&Job, f64)> {
        let mut scored: Vec<(&Job, f64)> = self
            .jobs
            .iter()
            .map(|job| (job, score_job(job, &self.preferences, &self.candidates)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        scored
    }

    fn mirror_all(&self) {
        self.store.save(KEY_SESSION, &self.session);
        self.store.save(KEY_JOBS, &self.jobs);
        self.store.save(KEY_APPLICATIONS, &self.applications);
        self.store.save(KEY_CANDIDATES, &self.candidates);
        self.store.save(KEY_PREFERENCES, &self.preferences);
    }
}

fn score_job(job: &Job, prefs: &Preferences, candidates: &[Candidate]) -> f64 {
    let mut score = 50.0; // Base score

    // Salary bonus, capped so pay never dominates skill fit
    score += (job.salary as f64).min(30.0);

    if let Some(min) = prefs.min_lpa {
        if job.salary < min {
            score -= 20.0;
        }
    }

    if let Some(location) = &prefs.location {
        if !location.is_empty() && job.location.to_lowercase().contains(&location.to_lowercase()) {
            score += 15.0;
        }
    }

    if let Some(role) = &prefs.desired_role {
        if !role.is_empty() && job.title.to_lowercase().contains(&role.to_lowercase()) {
            score += 15.0;
        }
    }

    // +5 per job skill the directory can supply
    for skill in &job.skills {
        let covered = candidates.iter().any(|c| {
            c.skills
                .iter()
                .any(|s| skills_match(s, skill))
        });
        if covered {
            score += 5.0;
        }
    }

    score.max(0.0)
}

// Exact match after case folding, or near-identical spelling ("NodeJS"
// vs "Node.js", "Postgres" vs "PostgreSQL"). Unrelated tags stay below
// the bar.
fn skills_match(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a == b || strsim::jaro_winkler(&a, &b) >= 0.9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn demo_market() -> Marketplace<MemoryStore> {
        Marketplace::open(MemoryStore::new())
    }

    #[test]
    fn test_open_seeds_defaults_when_store_empty() {
        let market = demo_market();
        assert_eq!(market.jobs().len(), 3);
        assert_eq!(market.candidates().len(), 3);
        assert!(market.applications().is_empty());
        assert!(market.session().signed_in);
        assert_eq!(market.session().role, Role::Candidate);
    }

    #[test]
    fn test_apply_snapshots_and_mirrors() {
        let mut market = demo_market();
        let app = market.apply("J-1001", "resume.pdf").unwrap();
        assert_eq!(app.job_title, "Full-Stack Engineer");
        assert_eq!(app.company, "Skybound Labs");
        assert_eq!(market.applications().len(), 1);

        // Mirrored collection hydrates an identical pipeline
        let stored: Vec<Application> = market.store.load("applications", Vec::new());
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, app.id);
    }

    #[test]
    fn test_apply_unknown_job_is_rejected() {
        let mut market = demo_market();
        assert!(market.apply("J-9999", "resume.pdf").is_none());
        assert!(market.applications().is_empty());
    }

    #[test]
    fn test_advance_walks_pipeline_and_parks_at_offer() {
        let mut market = demo_market();
        let id = market.apply("J-1001", "resume.pdf").unwrap().id;

        assert_eq!(market.advance(&id), Some(ApplicationStatus::Shortlisted));
        assert_eq!(market.advance(&id), Some(ApplicationStatus::Interview));
        assert_eq!(market.advance(&id), Some(ApplicationStatus::Offer));
        // Terminal state is idempotent
        assert_eq!(market.advance(&id), Some(ApplicationStatus::Offer));
        assert_eq!(market.advance(&id), Some(ApplicationStatus::Offer));
    }

    #[test]
    fn test_advance_unknown_id_leaves_collection_unchanged() {
        let mut market = demo_market();
        market.apply("J-1001", "resume.pdf").unwrap();
        market.apply("J-1002", "resume.pdf").unwrap();

        let before = serde_json::to_string(market.applications()).unwrap();
        assert_eq!(market.advance("APP-nope"), None);
        let after = serde_json::to_string(market.applications()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_withdraw_removes_exactly_one() {
        let mut market = demo_market();
        let first = market.apply("J-1001", "resume.pdf").unwrap().id;
        let second = market.apply("J-1002", "resume.pdf").unwrap().id;

        assert!(market.withdraw(&first));
        assert_eq!(market.applications().len(), 1);
        assert!(market.application(&first).is_none());
        assert!(market.application(&second).is_some());

        // Absent id: size unchanged
        assert!(!market.withdraw(&first));
        assert_eq!(market.applications().len(), 1);
    }

    #[test]
    fn test_duplicate_applications_advance_independently() {
        let mut market = demo_market();
        let first = market.apply("J-1001", "resume.pdf").unwrap().id;
        let second = market.apply("J-1001", "resume.pdf").unwrap().id;
        assert_ne!(first, second);

        market.advance(&first);
        assert_eq!(
            market.application(&first).unwrap().status,
            ApplicationStatus::Shortlisted
        );
        assert_eq!(
            market.application(&second).unwrap().status,
            ApplicationStatus::Submitted
        );
    }

    #[test]
    fn test_snapshot_survives_job_title_change() {
        let mut market = demo_market();
        let id = market.apply("J-1001", "resume.pdf").unwrap().id;

        market.jobs[0].title = "Renamed Role".to_string();
        market.jobs[0].company = "Renamed Co".to_string();

        let app = market.application(&id).unwrap();
        assert_eq!(app.job_title, "Full-Stack Engineer");
        assert_eq!(app.company, "Skybound Labs");
    }

    #[test]
    fn test_session_and_preferences_round_trip_through_store() {
        let mut market = demo_market();
        market.sign_out();
        market.set_role(Role::Recruiter);
        market.set_preferences(Preferences {
            desired_role: Some("Backend Developer".to_string()),
            location: Some("Hyderabad".to_string()),
            min_lpa: Some(15),
        });

        let session: Session = market.store.load("session", Session::default());
        assert!(!session.signed_in);
        assert_eq!(session.role, Role::Recruiter);
        let prefs: Preferences = market.store.load("preferences", Preferences::default());
        assert_eq!(prefs.min_lpa, Some(15));
    }

    #[test]
    fn test_store_has_data_distinguishes_fresh_store() {
        let mut market = demo_market();
        assert!(!market.store_has_data());

        // Preferences alone count as data; a reseed guard must not treat
        // the store as fresh just because no applications exist yet.
        market.set_preferences(Preferences {
            min_lpa: Some(15),
            ..Preferences::default()
        });
        assert!(market.applications().is_empty());
        assert!(market.store_has_data());
    }

    #[test]
    fn test_store_has_data_sees_session_only_writes() {
        let mut market = demo_market();
        market.sign_out();
        assert!(market.applications().is_empty());
        assert!(market.store_has_data());
    }

    #[test]
    fn test_reset_restores_seeds_and_clears_pipeline() {
        let mut market = demo_market();
        market.apply("J-1001", "resume.pdf").unwrap();
        market.sign_out();

        market.reset();
        assert!(market.applications().is_empty());
        assert_eq!(market.jobs().len(), 3);
        assert!(market.session().signed_in);

        // Mirror covers every key, so a reopen sees the reset state
        let reopened = Marketplace::open(std::mem::take(&mut market.store));
        assert!(reopened.applications().is_empty());
    }

    #[test]
    fn test_rank_prefers_matching_location_and_salary() {
        let mut market = demo_market();
        market.set_preferences(Preferences {
            desired_role: Some("Backend Developer".to_string()),
            location: Some("Hyderabad".to_string()),
            min_lpa: Some(15),
        });

        let ranked = market.rank_jobs(10);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].0.id, "J-1002"); // Hyderabad backend role
        // Remote frontend job misses the 15 LPA floor and both bonuses
        assert_eq!(ranked.last().unwrap().0.id, "J-1003");
    }

    #[test]
    fn test_rank_limit_truncates() {
        let market = demo_market();
        assert_eq!(market.rank_jobs(2).len(), 2);
    }
}
