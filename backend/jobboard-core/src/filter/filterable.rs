use models::{Application, Company, JobPosting, JobStatus, SkillId};

use std::borrow::Cow;

/// Fields the filter composer can look at.
pub trait Filterable {
    /// Strings the free-text query is matched against.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    fn location(&self) -> Option<&str> {
        None
    }

    /// Normalized publication status, for entities that have one.
    fn status(&self) -> Option<JobStatus> {
        None
    }

    fn skill_ids(&self) -> Vec<SkillId> {
        Vec::new()
    }
}

impl Filterable for JobPosting {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.title.as_str()),
            Cow::Borrowed(self.description.as_str()),
            Cow::Owned(self.company_name()),
        ]
    }

    fn location(&self) -> Option<&str> {
        Some(&self.location)
    }

    fn status(&self) -> Option<JobStatus> {
        Some(self.effective_status())
    }

    fn skill_ids(&self) -> Vec<SkillId> {
        self.skills.iter().map(|skill| skill.skill_id).collect()
    }
}

impl Filterable for Company {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Borrowed(self.name.as_str())];
        fields.extend(self.industry.as_deref().map(Cow::Borrowed));
        fields.extend(self.about.as_deref().map(Cow::Borrowed));
        fields
    }

    fn location(&self) -> Option<&str> {
        Some(&self.location)
    }
}

impl Filterable for Application {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        [self.job_title.as_deref(), self.applicant_name.as_deref()]
            .into_iter()
            .flatten()
            .map(Cow::Borrowed)
            .collect()
    }
}
