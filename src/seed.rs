use crate::models::{Candidate, Job};

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Demo job board. Postings are immutable once seeded; `init --force`
/// replaces the whole collection.
pub fn demo_jobs() -> Vec<Job> {
    vec![
        Job {
            id: "J-1001".to_string(),
            title: "Full-Stack Engineer".to_string(),
            company: "Skybound Labs".to_string(),
            location: "Bengaluru, IN".to_string(),
            salary: 18,
            skills: tags(&["React", "Node", "PostgreSQL", "Docker"]),
            description: "Build end-to-end features, own services, and collaborate \
                          cross-functionally. Experience with REST, caching, and CI/CD preferred."
                .to_string(),
        },
        Job {
            id: "J-1002".to_string(),
            title: "Backend Developer".to_string(),
            company: "Quanta Systems".to_string(),
            location: "Hyderabad, IN".to_string(),
            salary: 16,
            skills: tags(&["Node", "Express", "Redis", "AWS"]),
            description: "Design scalable APIs, optimize DB queries, and implement observability."
                .to_string(),
        },
        Job {
            id: "J-1003".to_string(),
            title: "Frontend Developer".to_string(),
            company: "Nimbus Tech".to_string(),
            location: "Remote".to_string(),
            salary: 14,
            skills: tags(&["Next.js", "TypeScript", "Tailwind"]),
            description: "Craft delightful UIs, SSR/ISR pages, and accessible components."
                .to_string(),
        },
    ]
}

/// Demo candidate directory. Read-only; scores are pre-computed.
pub fn demo_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            id: "C-2001".to_string(),
            name: "Aarav Kumar".to_string(),
            headline: "Full-stack | React • Node • AWS".to_string(),
            skills: tags(&["React", "Node", "PostgreSQL", "AWS"]),
            score: 86,
        },
        Candidate {
            id: "C-2002".to_string(),
            name: "Isha Patel".to_string(),
            headline: "Frontend | Next.js • TS • Tailwind".to_string(),
            skills: tags(&["Next.js", "TypeScript", "Tailwind"]),
            score: 91,
        },
        Candidate {
            id: "C-2003".to_string(),
            name: "Rohit Singh".to_string(),
            headline: "Backend | Express • Redis • Kafka".to_string(),
            skills: tags(&["Node", "Express", "Redis"]),
            score: 78,
        },
    ]
}
