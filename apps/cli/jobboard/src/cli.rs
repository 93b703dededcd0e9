//! Command line definition.

use jobboard_core::filter::StatusTab;
use models::{ApplicationAction, Role};

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "jobboard", version, about = "Browse and manage job board listings")]
pub struct Cli {
    /// Directory holding config.json, session.json and the log file
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Account e-mail; when set with a password, every command signs in first
    #[arg(long, global = true, env = "JOBBOARD_USER")]
    pub user: Option<String>,

    #[arg(long, global = true, env = "JOBBOARD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with --user/--password and remember who is signed in
    Login,

    /// Forget the signed-in user
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create an account with --user/--password
    Register(RegisterArgs),

    /// List open jobs
    Jobs(JobsArgs),

    /// List jobs of your company (employers)
    MyJobs(MyJobsArgs),

    /// Delete one of your company's jobs
    DeleteJob { job_id: u64 },

    /// Open a closed job or close an open one
    TogglePublish { job_id: u64 },

    /// Apply to a job, optionally with a CV (PDF/DOC/DOCX, at most 5 MB)
    Apply {
        job_id: u64,
        #[arg(long, value_name = "PATH")]
        cv: Option<PathBuf>,
    },

    /// List your applications
    Applications {
        #[arg(long)]
        query: Option<String>,
    },

    /// List candidates who applied to one of your jobs
    Candidates { job_id: u64 },

    /// Accept or reject an application
    Review {
        application_id: u64,
        #[arg(value_enum)]
        action: ReviewAction,
    },

    /// Manage your skills
    #[command(subcommand)]
    Skills(SkillsCommand),

    /// Browse companies
    Companies {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Register as an employer instead of a job seeker
    #[arg(long)]
    pub employer: bool,
}

impl RegisterArgs {
    pub fn role(&self) -> Role {
        if self.employer {
            Role::Employer
        } else {
            Role::Seeker
        }
    }
}

#[derive(Debug, Args)]
pub struct JobsArgs {
    /// Text matched against title, description and company
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// Only jobs requiring this skill id (repeatable)
    #[arg(long = "skill", value_name = "SKILL_ID")]
    pub skills: Vec<u64>,
}

#[derive(Debug, Args)]
pub struct MyJobsArgs {
    /// all, open, closed or draft
    #[arg(long, default_value = "all")]
    pub tab: StatusTab,

    #[arg(long)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReviewAction {
    Accept,
    Reject,
}

impl From<ReviewAction> for ApplicationAction {
    fn from(action: ReviewAction) -> Self {
        match action {
            ReviewAction::Accept => ApplicationAction::Accept,
            ReviewAction::Reject => ApplicationAction::Reject,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum SkillsCommand {
    /// Your skills
    List,

    /// Search the skill catalog
    Search { query: String },

    /// Add a catalog skill at level 1
    Add {
        skill_id: u64,
        #[arg(long)]
        name: String,
    },

    /// Change level (1-5) and/or years of experience
    Set {
        skill_id: u64,
        #[arg(long)]
        level: Option<u8>,
        #[arg(long)]
        years: Option<f32>,
    },

    Remove { skill_id: u64 },
}
