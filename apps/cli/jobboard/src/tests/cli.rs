use crate::cli::{Cli, Command, ReviewAction, SkillsCommand};

use jobboard_core::filter::StatusTab;
use models::ApplicationAction;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

#[test]
fn given_command_definition_when_checked_then_clap_accepts_it() {
    Cli::command().debug_assert();
}

#[test]
fn given_jobs_with_repeated_skill_when_parsed_then_all_ids_collected() {
    let cli = Cli::try_parse_from([
        "jobboard", "jobs", "--query", "rust", "--location", "Ha Noi", "--skill", "1", "--skill",
        "4",
    ])
    .unwrap();

    match cli.command {
        Command::Jobs(args) => {
            assert_eq!(args.query.as_deref(), Some("rust"));
            assert_eq!(args.location.as_deref(), Some("Ha Noi"));
            assert_eq!(args.skills, vec![1, 4]);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn given_my_jobs_tab_when_parsed_then_case_insensitive_status_tab() {
    let cli = Cli::try_parse_from(["jobboard", "my-jobs", "--tab", "Draft"]).unwrap();
    assert!(matches!(cli.command, Command::MyJobs(args) if args.tab == StatusTab::Draft));

    let cli = Cli::try_parse_from(["jobboard", "my-jobs"]).unwrap();
    assert!(matches!(cli.command, Command::MyJobs(args) if args.tab == StatusTab::All));
}

#[test]
fn given_unknown_tab_when_parsed_then_rejected() {
    assert!(Cli::try_parse_from(["jobboard", "my-jobs", "--tab", "archived"]).is_err());
}

#[test]
fn given_apply_with_cv_when_parsed_then_path_kept() {
    let cli = Cli::try_parse_from(["jobboard", "apply", "5", "--cv", "resume.pdf"]).unwrap();

    match cli.command {
        Command::Apply { job_id, cv } => {
            assert_eq!(job_id, 5);
            assert_eq!(cv, Some(PathBuf::from("resume.pdf")));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn given_review_action_when_parsed_then_maps_to_application_action() {
    let cli = Cli::try_parse_from(["jobboard", "review", "31", "reject"]).unwrap();

    match cli.command {
        Command::Review {
            application_id,
            action,
        } => {
            assert_eq!(application_id, 31);
            assert_eq!(action, ReviewAction::Reject);
            assert_eq!(ApplicationAction::from(action), ApplicationAction::Reject);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn given_skills_set_when_parsed_then_level_and_years_optional() {
    let cli = Cli::try_parse_from(["jobboard", "skills", "set", "7", "--level", "4"]).unwrap();

    match cli.command {
        Command::Skills(SkillsCommand::Set {
            skill_id,
            level,
            years,
        }) => {
            assert_eq!(skill_id, 7);
            assert_eq!(level, Some(4));
            assert_eq!(years, None);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn given_global_flags_after_subcommand_when_parsed_then_accepted() {
    let cli = Cli::try_parse_from([
        "jobboard",
        "whoami",
        "--config-dir",
        "/tmp/jobboard",
        "--user",
        "ann@acme.io",
        "-v",
    ])
    .unwrap();

    assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/jobboard")));
    assert_eq!(cli.user.as_deref(), Some("ann@acme.io"));
    assert!(cli.verbose);
    assert!(matches!(cli.command, Command::Whoami));
}
