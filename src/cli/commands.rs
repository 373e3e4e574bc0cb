use clap::{Args, Parser, Subcommand};

use crate::model::task::{Priority, Status};

#[derive(Parser)]
#[command(
    name = "td",
    about = concat!("[\u{25A6}] taskdeck v", env!("CARGO_PKG_VERSION"), " - your team board in the terminal"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend URL (overrides the config file)
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register(RegisterArgs),
    /// Sign in and store the session token
    Login(LoginArgs),
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in profile
    Whoami,
    /// Update the signed-in profile
    Profile(ProfileArgs),
    /// Change the account password
    Passwd(PasswdArgs),
    /// Delete the signed-in account
    DeleteAccount,
    /// List tasks
    Tasks(TasksArgs),
    /// Show one task with its comments
    Show(ShowArgs),
    /// Show the kanban board grouped by status
    Board(BoardArgs),
    /// Show your tasks bucketed by due date
    Mine,
    /// List projects
    Projects,
    /// Create a project
    ProjectAdd(ProjectAddArgs),
    /// Rename or re-describe a project
    ProjectEdit(ProjectEditArgs),
    /// Delete a project
    ProjectRm(IdArg),
    /// Add a member to a project
    MemberAdd(MemberArgs),
    /// Remove a member from a project
    MemberRm(MemberArgs),
    /// Comment on a task
    Comment(CommentArgs),
    /// Edit one of your comments
    CommentEdit(CommentEditArgs),
    /// Delete one of your comments
    CommentRm(IdArg),
    /// List user accounts, or toggle one (admin)
    Users(UsersArgs),
    /// Create a user account (admin)
    UserAdd(UserAddArgs),
    /// Update a user account (admin)
    UserEdit(UserEditArgs),
    /// Delete a user account (admin)
    UserRm(IdArg),
    /// List notifications
    Notifications(NotificationsArgs),
    /// Show the activity feed
    Activity(ActivityArgs),
    /// Show a report summary
    Report(ReportArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    pub username: String,
    /// Password (read from stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    pub username: String,
    pub email: String,
    /// Password (read from stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    /// Avatar image to upload
    #[arg(long)]
    pub avatar: Option<std::path::PathBuf>,
}

#[derive(Args)]
pub struct PasswdArgs {
    #[arg(long)]
    pub old: String,
    #[arg(long)]
    pub new: String,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: i64,
}

#[derive(Args)]
pub struct IdArg {
    pub id: i64,
}

#[derive(Args)]
pub struct ProjectAddArgs {
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct ProjectEditArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct MemberArgs {
    pub project: i64,
    pub user: i64,
}

#[derive(Args)]
pub struct CommentArgs {
    pub task: i64,
    pub text: String,
    /// Reply under an existing comment
    #[arg(long)]
    pub reply_to: Option<i64>,
}

#[derive(Args)]
pub struct CommentEditArgs {
    pub id: i64,
    pub text: String,
}

#[derive(Args)]
pub struct UsersArgs {
    /// Show one user instead of listing
    #[arg(long)]
    pub show: Option<i64>,
    /// Toggle this user's active flag instead of listing
    #[arg(long)]
    pub toggle: Option<i64>,
}

#[derive(Args)]
pub struct UserAddArgs {
    pub username: String,
    pub email: String,
    /// Password (read from stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    /// Account role (admin|user)
    #[arg(long, value_parser = parse_role)]
    pub role: Option<crate::model::Role>,
    /// Avatar image to upload
    #[arg(long)]
    pub avatar: Option<std::path::PathBuf>,
}

#[derive(Args)]
pub struct UserEditArgs {
    pub id: i64,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long, value_parser = parse_role)]
    pub role: Option<crate::model::Role>,
}

#[derive(Args)]
pub struct TasksArgs {
    /// Filter by project id
    #[arg(long)]
    pub project: Option<i64>,
    /// Filter by assignee user id
    #[arg(long)]
    pub assignee: Option<i64>,
    /// Filter by status (todo|in_progress|completed)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,
    /// Filter by priority (low|medium|high)
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
    /// Only tasks assigned to you
    #[arg(long)]
    pub mine: bool,
}

#[derive(Args)]
pub struct BoardArgs {
    /// Restrict the board to one project
    #[arg(long)]
    pub project: Option<i64>,
}

#[derive(Args)]
pub struct NotificationsArgs {
    /// Only unread notifications
    #[arg(long)]
    pub unread: bool,
}

#[derive(Args)]
pub struct ActivityArgs {
    #[arg(long)]
    pub project: Option<i64>,
    #[arg(long)]
    pub task: Option<i64>,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Scope the summary to one project
    #[arg(long)]
    pub project: Option<i64>,
}

fn parse_status(s: &str) -> Result<Status, String> {
    Status::parse(s).ok_or_else(|| format!("unknown status '{}' (todo|in_progress|completed)", s))
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s).ok_or_else(|| format!("unknown priority '{}' (low|medium|high)", s))
}

fn parse_role(s: &str) -> Result<crate::model::Role, String> {
    match s {
        "admin" => Ok(crate::model::Role::Admin),
        "user" => Ok(crate::model::Role::User),
        _ => Err(format!("unknown role '{}' (admin|user)", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_arg_parses_wire_values() {
        assert_eq!(parse_status("in_progress"), Ok(Status::InProgress));
        assert!(parse_status("doing").is_err());
    }

    #[test]
    fn cli_parses_task_filters() {
        let cli = Cli::try_parse_from([
            "td", "tasks", "--project", "3", "--status", "todo", "--priority", "high",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Tasks(args)) => {
                assert_eq!(args.project, Some(3));
                assert_eq!(args.status, Some(Status::Todo));
                assert_eq!(args.priority, Some(Priority::High));
                assert!(!args.mine);
            }
            _ => panic!("expected tasks subcommand"),
        }
    }

    #[test]
    fn global_flags_apply_anywhere() {
        let cli = Cli::try_parse_from(["td", "projects", "--json"]).unwrap();
        assert!(cli.json);
    }
}
