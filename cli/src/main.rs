use std::path::PathBuf;

use cityconnect::guard::{ACCESS_DENIED_DETAIL, GuardOutcome, Route};
use cityconnect::notify::Severity;
use cityconnect::services::{admin, auth, comments, issues, users};
use cityconnect::types::{
    Comment, ISSUE_CATEGORIES, Issue, IssueStatus, LoginRequest, NewIssue, ProfileUpdate,
    RegisterRequest, UserProfile,
};
use cityconnect::{
    ApiClient, ApiError, ClientConfig, Credential, FileStorage, SessionError, SessionManager, SessionState, TokenStore,
};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `cityconnect login` first")]
    LoginRequired,
    #[error("{0}")]
    Forbidden(String),
    #[error("no session file given and HOME is not set; pass --session-file or set CITYCONNECT_SESSION_FILE")]
    NoSessionFile,
    #[error(transparent)]
    Config(#[from] cityconnect::config::ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("unknown status `{0}`; expected one of PENDING, IN_PROGRESS, RESOLVED")]
    InvalidStatus(String),
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("refusing to delete the account without --yes")]
    ConfirmationRequired,
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "cityconnect", about = "Report and track municipal issues from the terminal")]
struct Cli {
    #[arg(long, env = "CITYCONNECT_API_URL", default_value = cityconnect::config::DEFAULT_API_URL)]
    api_url: String,

    /// Where the credential and profile are persisted between runs.
    #[arg(long, env = "CITYCONNECT_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Print raw JSON instead of formatted lines.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CITYCONNECT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in with it.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CITYCONNECT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show who is signed in.
    Status,
    /// Report a new issue.
    Submit(SubmitArgs),
    /// List issues you reported.
    MyIssues,
    /// Show one issue and its comments.
    Issue { id: i64 },
    /// Comment on an issue.
    Comment {
        id: i64,
        #[arg(long)]
        content: String,
    },
    Admin(AdminCommand),
    Profile(ProfileCommand),
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long, default_value = ISSUE_CATEGORIES[0])]
    category: String,
    #[arg(long, allow_negative_numbers = true)]
    latitude: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    longitude: Option<f64>,
    #[arg(long)]
    image_url: Option<String>,
}

/// Triage commands; require the admin role.
#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    List,
    Status { id: i64, status: String },
    Delete { id: i64 },
}

/// Manage your own account.
#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        email: String,
    },
    Delete {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

impl Command {
    /// Client route whose guard gates this command, if any.
    fn route(&self) -> Option<Route> {
        match self {
            Self::Login { .. } => Some(Route::Login),
            Self::Register { .. } => Some(Route::Register),
            Self::Logout | Self::Status => None,
            Self::Submit(_) => Some(Route::Submit),
            Self::MyIssues => Some(Route::MyIssues),
            Self::Issue { id } | Self::Comment { id, .. } => Some(Route::IssueDetail(*id)),
            Self::Admin(_) => Some(Route::Admin),
            Self::Profile(_) => Some(Route::Profile),
        }
    }
}

struct CliContext {
    api: ApiClient<FileStorage>,
    session: SessionManager<FileStorage>,
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ClientConfig::new(&cli.api_url)?;
    let session_file = resolve_session_file(cli.session_file, std::env::var_os("HOME").map(PathBuf::from))?;
    tracing::debug!(api_url = %config.api_url, session_file = %session_file.display(), "starting");

    let store = TokenStore::new(FileStorage::new(session_file));
    let mut ctx = CliContext {
        api: ApiClient::new(&config, store.clone()),
        session: SessionManager::restore(store),
        json: cli.json,
    };

    if let Some(route) = cli.command.route() {
        enforce(route.guard(ctx.session.state(), || ()))?;
    }

    match cli.command {
        Command::Login { username, password } => run_login(&mut ctx, username, password).await,
        Command::Register { username, email, password } => run_register(&mut ctx, username, email, password).await,
        Command::Logout => run_logout(&mut ctx),
        Command::Status => run_status(&ctx),
        Command::Submit(args) => run_submit(&ctx, args).await,
        Command::MyIssues => run_my_issues(&ctx).await,
        Command::Issue { id } => run_issue(&ctx, id).await,
        Command::Comment { id, content } => run_comment(&ctx, id, &content).await,
        Command::Admin(admin) => run_admin(&ctx, admin).await,
        Command::Profile(profile) => run_profile(&mut ctx, profile).await,
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).with_target(false).init();
}

fn resolve_session_file(explicit: Option<PathBuf>, home: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    home.map(|home| home.join(".cityconnect").join("session.json")).ok_or(CliError::NoSessionFile)
}

/// Turn a guard decision into a CLI error.
fn enforce(outcome: GuardOutcome<()>) -> Result<(), CliError> {
    match outcome {
        GuardOutcome::Allow(()) => Ok(()),
        GuardOutcome::RedirectToLogin => Err(CliError::LoginRequired),
        GuardOutcome::Forbidden(message) => Err(CliError::Forbidden(format!("{message}: {ACCESS_DENIED_DETAIL}"))),
    }
}

fn notice(severity: Severity, message: &str) {
    eprintln!("[{severity}] {message}");
}

async fn run_login(ctx: &mut CliContext, username: String, password: String) -> Result<(), CliError> {
    let resp = auth::login(&ctx.api, &LoginRequest { username, password }).await?;
    ctx.session.login(Credential::new(resp.token.clone()), resp.profile())?;
    notice(Severity::Success, "Login successful! Welcome back.");
    Ok(())
}

async fn run_register(ctx: &mut CliContext, username: String, email: String, password: String) -> Result<(), CliError> {
    let resp = auth::register(&ctx.api, &RegisterRequest { username, email: email.clone(), password }).await?;
    let profile = resp.profile().with_email(email);
    ctx.session.login(Credential::new(resp.token), profile)?;
    notice(Severity::Success, "Registration successful! You are now signed in.");
    Ok(())
}

fn run_logout(ctx: &mut CliContext) -> Result<(), CliError> {
    let was_signed_in = ctx.session.is_authenticated();
    ctx.session.logout()?;
    if was_signed_in {
        notice(Severity::Info, "Signed out.");
    }
    Ok(())
}

fn run_status(ctx: &CliContext) -> Result<(), CliError> {
    if ctx.json {
        let profile = ctx.session.profile().map(serde_json::to_value).transpose()?;
        return print_json(&serde_json::json!({ "authenticated": ctx.session.is_authenticated(), "profile": profile }));
    }
    println!("{}", describe_session(ctx.session.state()));
    Ok(())
}

fn describe_session(state: &SessionState) -> String {
    match state {
        SessionState::Authenticated(profile) => {
            let email = profile.email.as_deref().map(|e| format!(" <{e}>")).unwrap_or_default();
            let admin = if profile.role.is_admin() { " (admin)" } else { "" };
            format!("signed in as {}{email}{admin}", profile.username)
        }
        SessionState::Unknown | SessionState::Anonymous => "not signed in".to_owned(),
    }
}

async fn run_submit(ctx: &CliContext, args: SubmitArgs) -> Result<(), CliError> {
    let issue = build_new_issue(args)?;
    let created = issues::create(&ctx.api, &issue).await?;
    notice(Severity::Success, &format!("Successfully submitted issue! ID: {}", created.id));
    if ctx.json {
        return print_json(&serde_json::to_value(&created)?);
    }
    Ok(())
}

fn build_new_issue(args: SubmitArgs) -> Result<NewIssue, CliError> {
    if args.title.trim().is_empty() || args.description.trim().is_empty() {
        return Err(CliError::InvalidInput("title and description are required"));
    }
    let mut issue = NewIssue::new(args.title.trim(), args.description.trim(), args.category);
    if let Some(latitude) = args.latitude {
        issue.latitude = Some(latitude);
    }
    if let Some(longitude) = args.longitude {
        issue.longitude = Some(longitude);
    }
    issue.image_url = args.image_url;
    Ok(issue)
}

async fn run_my_issues(ctx: &CliContext) -> Result<(), CliError> {
    let mine = issues::my_issues(&ctx.api).await?;
    print_issues(ctx, &mine, "You have not reported any issues yet.")
}

async fn run_issue(ctx: &CliContext, id: i64) -> Result<(), CliError> {
    let issue = issues::get(&ctx.api, id).await?;
    // The page still renders without comments; surface the failure as a notice.
    let thread = match comments::list(&ctx.api, id).await {
        Ok(thread) => thread,
        Err(e) => {
            notice(Severity::Error, e.message());
            Vec::new()
        }
    };
    if ctx.json {
        return print_json(&serde_json::json!({ "issue": issue, "comments": thread }));
    }
    println!("{}", format_issue_detail(&issue));
    println!();
    if thread.is_empty() {
        println!("No comments yet.");
    }
    for comment in &thread {
        println!("{}", format_comment(comment));
    }
    Ok(())
}

async fn run_comment(ctx: &CliContext, id: i64, content: &str) -> Result<(), CliError> {
    let content = content.trim();
    if content.is_empty() {
        notice(Severity::Warning, "Comment cannot be empty.");
        return Err(CliError::InvalidInput("comment cannot be empty"));
    }
    let posted = comments::post(&ctx.api, id, content).await?;
    notice(Severity::Success, "Comment posted successfully!");
    if ctx.json {
        return print_json(&serde_json::to_value(&posted)?);
    }
    Ok(())
}

async fn run_admin(ctx: &CliContext, admin: AdminCommand) -> Result<(), CliError> {
    match admin.command {
        AdminSubcommand::List => {
            let all = admin::all_issues(&ctx.api).await?;
            print_issues(ctx, &all, "No issues reported.")
        }
        AdminSubcommand::Status { id, status } => {
            let parsed = IssueStatus::parse(&status).ok_or(CliError::InvalidStatus(status))?;
            let updated = admin::update_status(&ctx.api, id, parsed).await?;
            notice(Severity::Success, &format!("Issue {id} is now {}.", updated.status.label()));
            Ok(())
        }
        AdminSubcommand::Delete { id } => {
            admin::delete(&ctx.api, id).await?;
            notice(Severity::Success, &format!("Issue {id} deleted."));
            Ok(())
        }
    }
}

async fn run_profile(ctx: &mut CliContext, profile: ProfileCommand) -> Result<(), CliError> {
    match profile.command {
        ProfileSubcommand::Show => {
            let me = users::me(&ctx.api).await?;
            if ctx.json {
                return print_json(&serde_json::to_value(&me)?);
            }
            println!("{}", format_profile(&me));
            Ok(())
        }
        ProfileSubcommand::Update { email } => {
            let updated = users::update_me(&ctx.api, &ProfileUpdate { email }).await?;
            let merged = UserProfile::merge(ctx.session.profile(), updated);
            ctx.session.update_profile(merged)?;
            notice(Severity::Success, "Profile updated successfully!");
            Ok(())
        }
        ProfileSubcommand::Delete { yes } => {
            if !yes {
                return Err(CliError::ConfirmationRequired);
            }
            users::delete_me(&ctx.api).await?;
            notice(Severity::Info, "Your account has been successfully deleted.");
            ctx.session.logout()?;
            Ok(())
        }
    }
}

fn print_issues(ctx: &CliContext, list: &[Issue], empty: &str) -> Result<(), CliError> {
    if ctx.json {
        return print_json(&serde_json::to_value(list)?);
    }
    if list.is_empty() {
        println!("{empty}");
    }
    for issue in list {
        println!("{}", format_issue_line(issue));
    }
    Ok(())
}

fn format_issue_line(issue: &Issue) -> String {
    let by = issue.submitted_by_username.as_deref().unwrap_or("unknown");
    format!("#{:<5} {:<12} {} ({}) by {by}", issue.id, issue.status.as_wire(), issue.title, issue.category)
}

fn format_issue_detail(issue: &Issue) -> String {
    let mut lines = vec![
        format!("#{} {}", issue.id, issue.title),
        format!("Status:   {}", issue.status.label()),
        format!("Category: {}", issue.category),
    ];
    if let Some(by) = &issue.submitted_by_username {
        let on = issue.created_at.as_deref().map(|at| format!(" on {at}")).unwrap_or_default();
        lines.push(format!("Reported by: {by}{on}"));
    }
    if let (Some(lat), Some(lon)) = (issue.latitude, issue.longitude) {
        lines.push(format!("Location: {lat:.4}, {lon:.4}"));
    }
    if let Some(image) = &issue.image_url {
        lines.push(format!("Image:    {image}"));
    }
    lines.push(String::new());
    lines.push(issue.description.clone());
    lines.join("\n")
}

fn format_comment(comment: &Comment) -> String {
    let at = comment.created_at.as_deref().unwrap_or("");
    format!("{} {at}\n  {}", comment.username, comment.content)
}

fn format_profile(profile: &UserProfile) -> String {
    format!(
        "Username: {}\nEmail:    {}\nRole:     {}",
        profile.username,
        profile.email.as_deref().unwrap_or("-"),
        profile.role
    )
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{pretty}");
    Ok(())
}
