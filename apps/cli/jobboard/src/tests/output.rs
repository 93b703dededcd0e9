use crate::output::{
    application_line, candidate_line, company_line, identity_line, job_line, salary, skill_line,
};

use models::{
    Application, ApplicationStatus, Company, CompanyRef, JobPosting, Role, SessionIdentity,
    SkillAssignment,
};

fn company(id: u64, name: &str) -> Company {
    Company {
        id,
        name: name.to_string(),
        logo_url: None,
        website: None,
        industry: Some(String::from("Logistics")),
        size: None,
        location: String::from("Ha Noi"),
        about: None,
        jobs: Vec::new(),
    }
}

#[test]
fn given_full_job_when_rendered_then_status_company_location_and_salary_shown() {
    let job = JobPosting {
        location: String::from("Ha Noi"),
        salary_min: Some(1000),
        salary_max: Some(2000),
        is_open: Some(false),
        company: Some(CompanyRef::Name(String::from("Acme"))),
        ..JobPosting::new(42, "Rust Engineer")
    };

    assert_eq!(
        job_line(&job, true),
        "#42    Rust Engineer [closed] @ Acme - Ha Noi (1000-2000) *applied*"
    );
}

#[test]
fn given_bare_job_when_rendered_then_only_id_title_status() {
    assert_eq!(job_line(&JobPosting::new(7, "QA"), false), "#7     QA [open]");
}

#[test]
fn given_partial_salary_when_rendered_then_open_ended_wording() {
    assert_eq!(salary(Some(500), None).as_deref(), Some("from 500"));
    assert_eq!(salary(None, Some(900)).as_deref(), Some("up to 900"));
    assert_eq!(salary(None, None), None);
}

#[test]
fn given_application_without_title_when_rendered_then_job_id_used() {
    let application = Application {
        id: 3,
        job_id: 42,
        applicant_id: 11,
        status: ApplicationStatus::Interview,
        cv_ref: None,
        job_title: None,
        applicant_name: None,
    };

    assert_eq!(application_line(&application), "#3     job 42 [interview]");
    assert_eq!(candidate_line(&application), "#3     user 11 [interview] no CV");
}

#[test]
fn given_company_skill_and_identity_when_rendered_then_readable() {
    assert_eq!(company_line(&company(1, "Acme")), "#1     Acme (Logistics) - Ha Noi");

    let skill = SkillAssignment::new(7, "Rust", 4, 1.5).unwrap();
    assert_eq!(skill_line(&skill), "#7     Rust level 4, 1.5 years");

    let identity = SessionIdentity {
        user_id: 11,
        role: Role::Employer,
        display_name: String::from("Ann"),
    };
    assert_eq!(identity_line(&identity), "Ann (user 11, employer)");
}
