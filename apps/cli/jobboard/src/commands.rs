//! Command execution. Each command builds the view it needs, runs it once
//! and prints the result.

use crate::cli::{Cli, Command, JobsArgs, MyJobsArgs, RegisterArgs, SkillsCommand};
use crate::error::CliError;
use crate::output::{
    application_line, candidate_line, catalog_line, company_line, identity_line, job_line,
    print_lines, skill_line,
};

use jobboard_core::api_client::{Credentials, Registration};
use jobboard_core::apply_flow::{AppliedJobs, ApplyFlow, ApplyOutcome, CvFile};
use jobboard_core::config::ClientConfig;
use jobboard_core::optimistic::MutationOutcome;
use jobboard_core::views::{
    CandidateReview, CompanyDirectory, EmployerJobBoard, JobListings, MyApplications, SkillsPicker,
};
use jobboard_core::{JobBoardClient, SessionStore};

use models::{ApplicationAction, SessionIdentity, SkillCatalogEntry};

use std::path::{Path, PathBuf};

use log::{debug, info};

/// Everything a command needs, built once per invocation.
pub struct Context {
    pub config: ClientConfig,
    pub client: JobBoardClient,
    pub session: SessionStore,
    credentials: Option<Credentials>,
}

impl Context {
    pub fn new(
        config_dir: &Path,
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Self, CliError> {
        let config = ClientConfig::load_with_env(config_dir)?;
        let session = SessionStore::with_persistence(config_dir)?;
        let client = JobBoardClient::from_config(&config)?.with_session(session.clone());

        let credentials = match (user, password) {
            (Some(user), Some(password)) => Some(Credentials::new(user, password)),
            _ => None,
        };

        Ok(Self {
            config,
            client,
            session,
            credentials,
        })
    }

    /// The backend session cookie lives only as long as this process, so
    /// with credentials at hand every command signs in first.
    async fn signed_in(&self) -> Result<SessionIdentity, CliError> {
        if let Some(credentials) = &self.credentials {
            return Ok(self.client.login(credentials).await?);
        }

        self.session
            .current()
            .await
            .ok_or_else(|| CliError::usage("Not signed in. Run `jobboard login` first."))
    }

    async fn employer(&self) -> Result<SessionIdentity, CliError> {
        let identity = self.signed_in().await?;
        if !identity.is_employer() {
            return Err(CliError::usage("This command needs an employer account."));
        }
        Ok(identity)
    }
}

pub fn config_dir(cli: &Cli) -> Result<PathBuf, CliError> {
    match &cli.config_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(ClientConfig::default_dir()?),
    }
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let dir = config_dir(&cli)?;
    debug!("Using config directory {}", dir.display());
    let ctx = Context::new(&dir, cli.user, cli.password)?;

    match cli.command {
        Command::Login => login(&ctx).await,
        Command::Logout => {
            ctx.client.logout().await?;
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => {
            match ctx.session.current().await {
                Some(identity) => println!("{}", identity_line(&identity)),
                None => println!("Not signed in."),
            }
            Ok(())
        }
        Command::Register(args) => register(&ctx, &args).await,
        Command::Jobs(args) => jobs(&ctx, args).await,
        Command::MyJobs(args) => my_jobs(&ctx, args).await,
        Command::DeleteJob { job_id } => delete_job(&ctx, job_id).await,
        Command::TogglePublish { job_id } => toggle_publish(&ctx, job_id).await,
        Command::Apply { job_id, cv } => apply(&ctx, job_id, cv.as_deref()).await,
        Command::Applications { query } => applications(&ctx, query).await,
        Command::Candidates { job_id } => candidates(&ctx, job_id).await,
        Command::Review {
            application_id,
            action,
        } => review(&ctx, application_id, action.into()).await,
        Command::Skills(command) => skills(&ctx, command).await,
        Command::Companies { query, location } => companies(&ctx, query, location).await,
    }
}

async fn login(ctx: &Context) -> Result<(), CliError> {
    if ctx.credentials.is_none() {
        return Err(CliError::usage(
            "Login needs --user and --password (or JOBBOARD_USER / JOBBOARD_PASSWORD).",
        ));
    }
    let identity = ctx.signed_in().await?;
    println!("Signed in as {}", identity_line(&identity));
    Ok(())
}

async fn register(ctx: &Context, args: &RegisterArgs) -> Result<(), CliError> {
    let Some(credentials) = &ctx.credentials else {
        return Err(CliError::usage("Register needs --user and --password."));
    };

    let registration = Registration {
        full_name: args.name.clone(),
        email: credentials.username.clone(),
        phone: args.phone.clone(),
        password: credentials.password.clone(),
        role: args.role(),
    };
    ctx.client.register(&registration).await?;
    println!("Account created. You can now sign in.");
    Ok(())
}

async fn jobs(ctx: &Context, args: JobsArgs) -> Result<(), CliError> {
    ctx.signed_in().await?;

    let mut listings = JobListings::new(ctx.client.clone(), AppliedJobs::new());
    if let Some(query) = args.query {
        listings.set_query(query);
    }
    if let Some(location) = args.location {
        listings.set_location(location);
    }
    listings.apply_skill_filter(args.skills).await?;

    print_lines(
        listings
            .visible()
            .iter()
            .map(|job| job_line(job, listings.is_applied(job.id))),
        "No jobs found.",
    );
    Ok(())
}

async fn my_jobs(ctx: &Context, args: MyJobsArgs) -> Result<(), CliError> {
    ctx.employer().await?;

    let mut board = EmployerJobBoard::new(ctx.client.clone());
    board.set_tab(args.tab);
    if let Some(query) = args.query {
        board.set_query(query);
    }
    board.load().await?;

    print_lines(
        board.visible().iter().map(|job| job_line(job, false)),
        &format!("No jobs under '{}'.", args.tab),
    );
    Ok(())
}

async fn delete_job(ctx: &Context, job_id: u64) -> Result<(), CliError> {
    ctx.employer().await?;

    let board = EmployerJobBoard::new(ctx.client.clone());
    board.load().await?;
    report("Deleted", job_id, board.delete(job_id).await?);
    Ok(())
}

async fn toggle_publish(ctx: &Context, job_id: u64) -> Result<(), CliError> {
    ctx.employer().await?;

    let board = EmployerJobBoard::new(ctx.client.clone());
    board.load().await?;
    board.toggle_publish(job_id).await?;

    if let Some(job) = board.jobs().get(&job_id) {
        println!("{}", job_line(&job, false));
    }
    Ok(())
}

fn report<T>(verb: &str, id: u64, outcome: MutationOutcome<T>) {
    match outcome {
        MutationOutcome::Committed(_) => println!("{verb} #{id}."),
        MutationOutcome::Stale => info!("{verb} #{id}: view closed before the server answered"),
    }
}

async fn apply(ctx: &Context, job_id: u64, cv: Option<&Path>) -> Result<(), CliError> {
    ctx.signed_in().await?;

    let mut flow = ApplyFlow::new(job_id, AppliedJobs::new())
        .with_max_cv_bytes(ctx.config.upload.max_cv_bytes);

    let outcome = match cv {
        Some(path) => {
            flow.select_file(CvFile::from_path(path).await?)?;
            flow.submit(&ctx.client).await?
        }
        None => flow.apply_plain(&ctx.client).await?,
    };

    match outcome {
        ApplyOutcome::Applied(receipt) => match receipt.cv {
            Some(stored) => println!("Applied to job #{job_id} (CV stored as {stored})."),
            None => println!("Applied to job #{job_id}."),
        },
        ApplyOutcome::AlreadyApplied => println!("Already applied to job #{job_id}."),
    }
    Ok(())
}

async fn applications(ctx: &Context, query: Option<String>) -> Result<(), CliError> {
    ctx.signed_in().await?;

    let mut view = MyApplications::new(ctx.client.clone(), AppliedJobs::new());
    if let Some(query) = query {
        view.set_query(query);
    }
    view.load().await?;

    print_lines(
        view.visible().iter().map(application_line),
        "No applications yet.",
    );
    Ok(())
}

async fn candidates(ctx: &Context, job_id: u64) -> Result<(), CliError> {
    ctx.employer().await?;

    let view = CandidateReview::new(ctx.client.clone(), job_id);
    view.load().await?;

    print_lines(
        view.candidates().snapshot().iter().map(candidate_line),
        "No candidates yet.",
    );
    Ok(())
}

async fn review(
    ctx: &Context,
    application_id: u64,
    action: ApplicationAction,
) -> Result<(), CliError> {
    ctx.employer().await?;

    ctx.client.review_application(application_id, action).await?;
    println!(
        "Application #{application_id} is now {}.",
        action.target_status()
    );
    Ok(())
}

async fn skills(ctx: &Context, command: SkillsCommand) -> Result<(), CliError> {
    ctx.signed_in().await?;
    let picker = SkillsPicker::new(ctx.client.clone());

    match command {
        SkillsCommand::Search { query } => {
            let mut search = picker.catalog_search(ctx.config.debounce());
            search.set_query(query);
            let state = search.settled().await;
            print_lines(state.results.iter().map(catalog_line), "No matching skills.");
            return Ok(());
        }
        SkillsCommand::List => {}
        SkillsCommand::Add { skill_id, name } => {
            picker.load().await?;
            let entry = SkillCatalogEntry { skill_id, name };
            report("Added skill", skill_id, picker.add(&entry).await?);
        }
        SkillsCommand::Set {
            skill_id,
            level,
            years,
        } => {
            if level.is_none() && years.is_none() {
                return Err(CliError::usage("Nothing to change: pass --level and/or --years."));
            }
            picker.load().await?;
            if let Some(level) = level {
                report("Updated skill", skill_id, picker.set_level(skill_id, level).await?);
            }
            if let Some(years) = years {
                report("Updated skill", skill_id, picker.set_years(skill_id, years).await?);
            }
        }
        SkillsCommand::Remove { skill_id } => {
            picker.load().await?;
            report("Removed skill", skill_id, picker.remove(skill_id).await?);
        }
    }

    picker.load().await?;
    print_lines(
        picker.skills().snapshot().iter().map(skill_line),
        "No skills yet.",
    );
    Ok(())
}

async fn companies(
    ctx: &Context,
    query: Option<String>,
    location: Option<String>,
) -> Result<(), CliError> {
    let mut directory = CompanyDirectory::new(ctx.client.clone());
    if let Some(query) = query {
        directory.set_query(query);
    }
    if let Some(location) = location {
        directory.set_location(location);
    }
    directory.load().await?;

    print_lines(
        directory.visible().iter().map(company_line),
        "No companies found.",
    );
    Ok(())
}
