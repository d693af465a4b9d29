use crate::models::{JobId, JobPosting, WorkArrangement};

/// The fixed set of postings for a session. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Catalog {
    jobs: Vec<JobPosting>,
}

impl Catalog {
    pub fn seeded() -> Self {
        let jobs = vec![
            posting(
                1,
                "Senior People Operations Manager",
                "TechFlow Inc",
                "San Francisco, CA",
                (120_000, 150_000),
                2,
                WorkArrangement::Hybrid,
                "Lead people operations initiatives, employee lifecycle management, and HR technology implementation.",
                &["People Operations", "HR Technology", "Employee Experience"],
                true,
            ),
            posting(
                2,
                "Talent Operations Specialist",
                "DataCorp",
                "Remote",
                (80_000, 100_000),
                1,
                WorkArrangement::Remote,
                "Optimize recruiting processes, manage ATS systems, and provide data-driven insights for talent acquisition.",
                &["Talent Operations", "ATS", "Data Analysis"],
                false,
            ),
            posting(
                3,
                "People Technology Analyst",
                "InnovateHR",
                "New York, NY",
                (65_000, 85_000),
                3,
                WorkArrangement::OnSite,
                "Support HRIS implementation, data analytics, and system integrations for people technology stack.",
                &["People Technology", "HRIS", "System Integration"],
                false,
            ),
            posting(
                4,
                "Recruiting Operations Manager",
                "ScaleUp Solutions",
                "Austin, TX",
                (100_000, 130_000),
                7,
                WorkArrangement::Hybrid,
                "Drive recruiting efficiency, manage vendor relationships, and build scalable hiring processes.",
                &["Recruiting Operations", "Process Optimization"],
                true,
            ),
            posting(
                5,
                "HR Operations Coordinator",
                "GrowthCo",
                "Chicago, IL",
                (50_000, 65_000),
                4,
                WorkArrangement::OnSite,
                "Support HR operations, employee onboarding, and compliance activities across the organization.",
                &["HR Operations", "Onboarding", "Compliance"],
                false,
            ),
        ];
        Self { jobs }
    }

    pub fn all(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn get(&self, id: JobId) -> Option<&JobPosting> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[cfg(test)]
    pub(crate) fn from_jobs(jobs: Vec<JobPosting>) -> Self {
        Self { jobs }
    }
}

#[allow(clippy::too_many_arguments)]
fn posting(
    id: JobId,
    title: &str,
    company: &str,
    location: &str,
    (salary_min, salary_max): (u32, u32),
    posted_days_ago: u32,
    work_arrangement: WorkArrangement,
    description: &str,
    tags: &[&str],
    featured: bool,
) -> JobPosting {
    debug_assert!(salary_min <= salary_max, "job #{} has an inverted salary range", id);
    JobPosting {
        id,
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        salary_min,
        salary_max,
        salary_display: salary_label(salary_min, salary_max),
        posted_days_ago,
        posted_display: posted_label(posted_days_ago),
        work_arrangement,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        featured,
    }
}

pub fn salary_label(min: u32, max: u32) -> String {
    format!("${}k - ${}k", min / 1000, max / 1000)
}

pub fn posted_label(days: u32) -> String {
    match days {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        7 => "1 week ago".to_string(),
        d => format!("{} days ago", d),
    }
}
