//! Plain-text rendering of core types, one line per item.

use models::{
    Application, Company, JobPosting, SessionIdentity, SkillAssignment, SkillCatalogEntry,
};

pub fn job_line(job: &JobPosting, applied: bool) -> String {
    let mut line = format!("#{:<5} {} [{}]", job.id, job.title, job.effective_status());

    let company = job.company_name();
    if !company.is_empty() {
        line.push_str(&format!(" @ {company}"));
    }
    if !job.location.is_empty() {
        line.push_str(&format!(" - {}", job.location));
    }
    if let Some(salary) = salary(job.salary_min, job.salary_max) {
        line.push_str(&format!(" ({salary})"));
    }
    if applied {
        line.push_str(" *applied*");
    }
    line
}

pub fn salary(min: Option<u64>, max: Option<u64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!("{min}-{max}")),
        (Some(min), None) => Some(format!("from {min}")),
        (None, Some(max)) => Some(format!("up to {max}")),
        (None, None) => None,
    }
}

pub fn application_line(application: &Application) -> String {
    let title = application
        .job_title
        .clone()
        .unwrap_or_else(|| format!("job {}", application.job_id));
    format!("#{:<5} {title} [{}]", application.id, application.status)
}

pub fn candidate_line(application: &Application) -> String {
    let name = application
        .applicant_name
        .clone()
        .unwrap_or_else(|| format!("user {}", application.applicant_id));
    let cv = application.cv_ref.as_deref().unwrap_or("no CV");
    format!("#{:<5} {name} [{}] {cv}", application.id, application.status)
}

pub fn company_line(company: &Company) -> String {
    let mut line = format!("#{:<5} {}", company.id, company.name);
    if let Some(industry) = &company.industry {
        line.push_str(&format!(" ({industry})"));
    }
    if !company.location.is_empty() {
        line.push_str(&format!(" - {}", company.location));
    }
    line
}

pub fn skill_line(skill: &SkillAssignment) -> String {
    format!(
        "#{:<5} {} level {}, {} years",
        skill.skill_id, skill.name, skill.level, skill.years_experience
    )
}

pub fn catalog_line(entry: &SkillCatalogEntry) -> String {
    format!("#{:<5} {}", entry.skill_id, entry.name)
}

pub fn identity_line(identity: &SessionIdentity) -> String {
    format!(
        "{} (user {}, {})",
        identity.display_name, identity.user_id, identity.role
    )
}

/// Print each line, or `empty` when there is nothing to show.
pub fn print_lines(lines: impl IntoIterator<Item = String>, empty: &str) {
    let mut printed = false;
    for line in lines {
        println!("{line}");
        printed = true;
    }
    if !printed {
        println!("{empty}");
    }
}
