//! `campus` command-line front end.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each subcommand maps to one API helper in the `client` crate. The session
//! lives in the same storage file between runs, so `campus login` once and
//! later commands carry the bearer token automatically.
//!
//! Notifications go to stderr; a 401 clears the stored session and tells the
//! user to log in again. Successful calls print `data` as pretty JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use client::api::{auth, common, courses, forum};
use client::constants::{
    CourseStatus, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PostStatus, WEEKDAY_OPTIONS, Weekday,
    course_status_options, normalize_page_size, post_status_options,
};
use client::net::types::{CommentRequest, CourseQuery, LoginRequest, PageQuery, PostQuery};
use client::util::auth::should_redirect_unauth;
use client::util::notify::{Navigator, Notifier};
use client::util::storage::FileStorage;
use client::{ApiClient, ClientConfig, ClientError, SessionStore};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("payload must be a JSON object")]
    NotAnObject,
    #[error("not logged in; run `campus login` first")]
    NotLoggedIn,
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "campus", about = "Campus management API CLI")]
struct Cli {
    #[arg(long, global = true, env = "CAMPUS_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, global = true, env = "CAMPUS_STORAGE_PATH")]
    storage: Option<PathBuf>,

    #[arg(long, global = true, env = "CAMPUS_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session token.
    Login {
        #[arg(long, env = "CAMPUS_USERNAME")]
        username: String,
        #[arg(long, env = "CAMPUS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the stored session.
    Logout,
    /// Show the stored profile, or fetch it again with `--refresh`.
    Whoami {
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },
    Course(CourseCommand),
    Common(CommonCommand),
    Forum(ForumCommand),
    /// Print the static status, weekday and pagination tables.
    Constants,
}

#[derive(Args, Debug, Clone, Copy)]
struct PageArgs {
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
}

impl PageArgs {
    fn query(self) -> PageQuery {
        PageQuery::new(self.page, normalize_page_size(self.page_size))
    }
}

#[derive(Args, Debug)]
struct CourseCommand {
    #[command(subcommand)]
    command: CourseSubcommand,
}

#[derive(Subcommand, Debug)]
enum CourseSubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long, value_parser = parse_course_status)]
        status: Option<CourseStatus>,
        #[arg(long, value_parser = parse_weekday)]
        weekday: Option<Weekday>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        semester: Option<String>,
    },
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
    ByStatus {
        #[arg(value_parser = parse_course_status)]
        status: CourseStatus,
    },
    Schedule {
        #[arg(value_parser = parse_weekday)]
        day: Weekday,
    },
    Mine {
        #[command(flatten)]
        page: PageArgs,
    },
    Enroll {
        id: String,
    },
    Withdraw {
        id: String,
    },
}

#[derive(Args, Debug)]
struct CommonCommand {
    #[command(subcommand)]
    command: CommonSubcommand,
}

#[derive(Subcommand, Debug)]
enum CommonSubcommand {
    Departments,
    Semesters,
    Categories,
    Classrooms,
    Dict { kind: String },
}

#[derive(Args, Debug)]
struct ForumCommand {
    #[command(subcommand)]
    command: ForumSubcommand,
}

#[derive(Subcommand, Debug)]
enum ForumSubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, value_parser = parse_post_status)]
        status: Option<PostStatus>,
    },
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
    Like {
        id: String,
    },
    Comments {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    Comment {
        id: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        reply_to: Option<String>,
    },
    Categories,
}

// =============================================================================
// TERMINAL SEAMS
// =============================================================================

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

struct StderrNavigator;

impl Navigator for StderrNavigator {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "login redirect");
        eprintln!("{SESSION_EXPIRED_HINT}");
    }
}

const SESSION_EXPIRED_HINT: &str = "session expired; run `campus login` to sign in again";

// =============================================================================
// ENTRY
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = client_config(&cli)?;
    let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
    let session = Arc::new(SessionStore::load(storage));
    let api = ApiClient::new(config, session, Arc::new(StderrNotifier), Arc::new(StderrNavigator))?;

    let data = run(&api, cli.command).await?;
    print_json(&data)
}

/// Flags win over the environment; everything else falls through to it.
fn client_config(cli: &Cli) -> Result<ClientConfig, ClientError> {
    ClientConfig::from_lookup(|key| {
        let flag = match key {
            "CAMPUS_BASE_URL" => cli.base_url.clone(),
            "CAMPUS_STORAGE_PATH" => cli.storage.as_ref().map(|path| path.display().to_string()),
            "CAMPUS_TIMEOUT_MS" => cli.timeout_ms.map(|ms| ms.to_string()),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    })
}

async fn run(api: &ApiClient, command: Command) -> Result<Value, CliError> {
    match command {
        Command::Login { username, password } => {
            let response = auth::login(api, &LoginRequest { username, password }).await?;
            Ok(response.user)
        }
        Command::Logout => {
            auth::logout(api).await?;
            Ok(json!({ "loggedOut": true }))
        }
        Command::Whoami { refresh } => {
            if should_redirect_unauth(api.session()) {
                return Err(CliError::NotLoggedIn);
            }
            if refresh {
                Ok(auth::current_user(api).await?)
            } else {
                Ok(api.session().profile())
            }
        }
        Command::Course(course) => run_course(api, course.command).await,
        Command::Common(common) => run_common(api, common.command).await,
        Command::Forum(forum) => run_forum(api, forum.command).await,
        Command::Constants => Ok(constants_table()),
    }
}

async fn run_course(api: &ApiClient, command: CourseSubcommand) -> Result<Value, CliError> {
    let data = match command {
        CourseSubcommand::List { page, keyword, status, weekday, department, semester } => {
            let mut query = CourseQuery {
                page: page.query(),
                keyword,
                department_id: department,
                semester_id: semester,
                ..CourseQuery::default()
            };
            if let Some(status) = status {
                query = query.with_status(status);
            }
            if let Some(day) = weekday {
                query = query.with_weekday(day);
            }
            courses::list_courses(api, &query).await?
        }
        CourseSubcommand::Get { id } => courses::get_course(api, &id).await?,
        CourseSubcommand::Create { data } => courses::create_course(api, &parse_object(&data)?).await?,
        CourseSubcommand::Update { id, data } => courses::update_course(api, &id, &parse_object(&data)?).await?,
        CourseSubcommand::Delete { id } => courses::delete_course(api, &id).await?,
        CourseSubcommand::ByStatus { status } => courses::courses_by_status(api, status).await?,
        CourseSubcommand::Schedule { day } => courses::schedule_for(api, day).await?,
        CourseSubcommand::Mine { page } => courses::my_courses(api, &page.query()).await?,
        CourseSubcommand::Enroll { id } => courses::enroll(api, &id).await?,
        CourseSubcommand::Withdraw { id } => courses::withdraw(api, &id).await?,
    };
    Ok(data)
}

async fn run_common(api: &ApiClient, command: CommonSubcommand) -> Result<Value, CliError> {
    let data = match command {
        CommonSubcommand::Departments => common::departments(api).await?,
        CommonSubcommand::Semesters => common::semesters(api).await?,
        CommonSubcommand::Categories => common::categories(api).await?,
        CommonSubcommand::Classrooms => common::classrooms(api).await?,
        CommonSubcommand::Dict { kind } => common::dictionary(api, &kind).await?,
    };
    Ok(data)
}

async fn run_forum(api: &ApiClient, command: ForumSubcommand) -> Result<Value, CliError> {
    let data = match command {
        ForumSubcommand::List { page, keyword, category, author, status } => {
            let mut query = PostQuery {
                page: page.query(),
                keyword,
                category_id: category,
                author_id: author,
                ..PostQuery::default()
            };
            if let Some(status) = status {
                query = query.with_status(status);
            }
            forum::list_posts(api, &query).await?
        }
        ForumSubcommand::Get { id } => forum::get_post(api, &id).await?,
        ForumSubcommand::Create { data } => forum::create_post(api, &parse_object(&data)?).await?,
        ForumSubcommand::Update { id, data } => forum::update_post(api, &id, &parse_object(&data)?).await?,
        ForumSubcommand::Delete { id } => forum::delete_post(api, &id).await?,
        ForumSubcommand::Like { id } => forum::like_post(api, &id).await?,
        ForumSubcommand::Comments { id, page } => forum::list_comments(api, &id, &page.query()).await?,
        ForumSubcommand::Comment { id, content, reply_to } => {
            forum::add_comment(api, &id, &CommentRequest { content, reply_to }).await?
        }
        ForumSubcommand::Categories => forum::forum_categories(api).await?,
    };
    Ok(data)
}

// =============================================================================
// HELPERS
// =============================================================================

fn parse_object(raw: &str) -> Result<Value, CliError> {
    let value: Value = serde_json::from_str(raw)?;
    if value.is_object() { Ok(value) } else { Err(CliError::NotAnObject) }
}

/// Accept a numeric code (`1`) or a label (`in-progress`, `In progress`).
fn parse_course_status(raw: &str) -> Result<CourseStatus, String> {
    parse_coded(raw, &CourseStatus::ALL, CourseStatus::code, CourseStatus::label)
}

fn parse_post_status(raw: &str) -> Result<PostStatus, String> {
    parse_coded(raw, &PostStatus::ALL, PostStatus::code, PostStatus::label)
}

fn parse_weekday(raw: &str) -> Result<Weekday, String> {
    parse_coded(raw, &Weekday::ALL, Weekday::code, Weekday::label)
}

fn parse_coded<T: Copy>(
    raw: &str,
    all: &[T],
    code: fn(T) -> u8,
    label: fn(T) -> &'static str,
) -> Result<T, String> {
    let wanted = raw.trim();
    let normalized = wanted.to_ascii_lowercase().replace(['-', '_'], " ");
    all.iter()
        .copied()
        .find(|item| code(*item).to_string() == wanted || label(*item).to_ascii_lowercase() == normalized)
        .ok_or_else(|| {
            let known = all
                .iter()
                .map(|item| format!("{} ({})", code(*item), label(*item)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("unknown value `{raw}`; expected one of: {known}")
        })
}

fn constants_table() -> Value {
    json!({
        "courseStatus": course_status_options(),
        "postStatus": post_status_options(),
        "weekdays": WEEKDAY_OPTIONS,
        "pageSizeOptions": PAGE_SIZE_OPTIONS,
        "defaultPage": DEFAULT_PAGE,
        "defaultPageSize": DEFAULT_PAGE_SIZE,
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
