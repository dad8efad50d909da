use crate::models::{Application, ApplicationStatus, Job};

/// Groups the job board by exact location string.
///
/// Output keeps first-occurrence scan order on purpose; callers that want
/// an alphabetic or by-count chart axis sort afterwards.
pub fn jobs_by_location(jobs: &[Job]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for job in jobs {
        match counts.iter_mut().find(|(loc, _)| *loc == job.location) {
            Some((_, n)) => *n += 1,
            None => counts.push((job.location.clone(), 1)),
        }
    }
    counts
}

/// Counts applications per pipeline stage.
///
/// Always emits all four stages in lifecycle order, zero-filled, so a
/// chart consumer gets a stable four-category axis even with no data.
pub fn pipeline_distribution(applications: &[Application]) -> [(ApplicationStatus, usize); 4] {
    let mut counts = ApplicationStatus::ALL.map(|status| (status, 0usize));
    for app in applications {
        for entry in counts.iter_mut() {
            if entry.0 == app.status {
                entry.1 += 1;
            }
        }
    }
    counts
}
