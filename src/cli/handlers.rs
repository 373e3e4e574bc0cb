use std::fs;
use std::io::Read;

use chrono::Local;

use crate::api::{self, ApiClient, ApiError, Session, SessionStore};
use crate::cli::commands::*;
use crate::cli::output;
use crate::model::config::ClientConfig;
use crate::view::{TaskGroup, schedule_groups};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = load_config(cli.server.as_deref())?;
    let store = SessionStore::open()?;

    match cli.command {
        None => crate::tui::run(&config, &store),
        Some(Commands::Register(args)) => cmd_register(&config, &store, args),
        Some(Commands::Login(args)) => cmd_login(&config, &store, args),
        Some(Commands::Logout) => cmd_logout(&config, &store),
        Some(Commands::Whoami) => {
            let (client, _session) = signed_in(&config, &store)?;
            cmd_whoami(&client, json)
        }
        Some(Commands::DeleteAccount) => cmd_delete_account(&config, &store),
        Some(command) => {
            let (client, _session) = signed_in(&config, &store)?;
            match command {
                Commands::Profile(args) => cmd_profile(&client, args, json),
                Commands::Passwd(args) => cmd_passwd(&client, args),
                Commands::Tasks(args) => cmd_tasks(&client, args, json),
                Commands::Show(args) => cmd_show(&client, args, json),
                Commands::Board(args) => cmd_board(&client, args, json),
                Commands::Mine => cmd_mine(&client, json),
                Commands::Projects => cmd_projects(&client, json),
                Commands::ProjectAdd(args) => cmd_project_add(&client, args),
                Commands::ProjectEdit(args) => cmd_project_edit(&client, args),
                Commands::ProjectRm(args) => cmd_project_rm(&client, args),
                Commands::MemberAdd(args) => cmd_member(&client, args, true),
                Commands::MemberRm(args) => cmd_member(&client, args, false),
                Commands::Comment(args) => cmd_comment(&client, args),
                Commands::CommentEdit(args) => cmd_comment_edit(&client, args),
                Commands::CommentRm(args) => cmd_comment_rm(&client, args),
                Commands::Users(args) => cmd_users(&client, args, json),
                Commands::UserAdd(args) => cmd_user_add(&client, args),
                Commands::UserEdit(args) => cmd_user_edit(&client, args),
                Commands::UserRm(args) => cmd_user_rm(&client, args),
                Commands::Notifications(args) => cmd_notifications(&client, args, json),
                Commands::Activity(args) => cmd_activity(&client, args, json),
                Commands::Report(args) => cmd_report(&client, args, json),
                // Handled above
                Commands::Register(_)
                | Commands::Login(_)
                | Commands::Logout
                | Commands::Whoami
                | Commands::DeleteAccount => unreachable!(),
            }
        }
    }
}

/// Read config.toml from the session directory; missing file means
/// defaults. A `--server` flag wins over the file.
pub fn load_config(server_override: Option<&str>) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let store = SessionStore::open()?;
    let path = store.dir().join("config.toml");
    let mut config = match fs::read_to_string(&path) {
        Ok(text) => ClientConfig::from_toml(&text)
            .map_err(|e| format!("invalid config {}: {}", path.display(), e))?,
        Err(_) => ClientConfig::default(),
    };
    if let Some(url) = server_override {
        config.server.url = url.to_string();
    }
    Ok(config)
}

/// Build an authenticated client from the stored session
fn signed_in(
    config: &ClientConfig,
    store: &SessionStore,
) -> Result<(ApiClient, Session), Box<dyn std::error::Error>> {
    let session = store
        .load()
        .ok_or("not signed in — run `td login <username>` first")?;
    let mut client = ApiClient::new(&config.server)?;
    client.set_token(Some(session.token.clone()));
    client.set_csrf(session.csrf.clone());
    Ok((client, session))
}

// ---------------------------------------------------------------------------
// Auth commands
// ---------------------------------------------------------------------------

/// Read a password from the flag or, when omitted, from stdin
fn read_password(flag: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match flag {
        Some(password) => Ok(password),
        None => {
            eprint!("password: ");
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

fn cmd_register(
    config: &ClientConfig,
    store: &SessionStore,
    args: RegisterArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let password = read_password(args.password)?;
    let client = ApiClient::new(&config.server)?;
    let request = api::auth::RegisterRequest {
        username: args.username,
        email: args.email,
        password,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    let session = api::auth::register(&client, &request)?.into_session();
    store.save(&session)?;
    println!("registered and signed in as {}", session.user.display_name());
    Ok(())
}

fn cmd_login(
    config: &ClientConfig,
    store: &SessionStore,
    args: LoginArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let password = read_password(args.password)?;
    let client = ApiClient::new(&config.server)?;
    let session = api::auth::login(&client, &args.username, &password)?.into_session();
    store.save(&session)?;
    println!(
        "signed in as {} ({})",
        session.user.display_name(),
        config.server.url
    );
    Ok(())
}

fn cmd_logout(config: &ClientConfig, store: &SessionStore) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(session) = store.load() {
        let mut client = ApiClient::new(&config.server)?;
        client.set_token(Some(session.token.clone()));
        client.set_csrf(session.csrf.clone());
        // Best effort: clear locally even when the server call fails
        if let Err(e) = api::auth::logout(&client) {
            tracing::warn!(error = %e, "server-side logout failed");
        }
    }
    store.clear()?;
    println!("signed out");
    Ok(())
}

fn cmd_whoami(client: &ApiClient, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Ask the server rather than trusting the cached copy
    let user = match api::auth::profile(client) {
        Ok(user) => user,
        Err(ApiError::Unauthorized) => {
            return Err("session expired — run `td login` to sign in again".into());
        }
        Err(e) => return Err(e.into()),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!(
            "{} <{}> ({})",
            user.display_name(),
            user.email,
            user.role.label()
        );
    }
    Ok(())
}

fn cmd_profile(client: &ApiClient, args: ProfileArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let update = api::auth::ProfileUpdate {
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    let user = api::auth::update_profile(client, &update, args.avatar.as_deref())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!("profile updated: {} <{}>", user.display_name(), user.email);
    }
    Ok(())
}

fn cmd_passwd(client: &ApiClient, args: PasswdArgs) -> Result<(), Box<dyn std::error::Error>> {
    api::auth::change_password(client, &args.old, &args.new)?;
    println!("password changed");
    Ok(())
}

fn cmd_delete_account(
    config: &ClientConfig,
    store: &SessionStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let (client, _session) = signed_in(config, store)?;
    api::auth::delete_account(&client)?;
    store.clear()?;
    println!("account deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_tasks(client: &ApiClient, args: TasksArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = if args.mine {
        api::tasks::mine(client)?
    } else {
        let query = api::tasks::TaskQuery {
            project: args.project,
            assignee: args.assignee,
            status: args.status,
            priority: args.priority,
        };
        api::tasks::list(client, &query)?
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        output::print_tasks(&tasks);
    }
    Ok(())
}

fn cmd_board(client: &ApiClient, args: BoardArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = match args.project {
        Some(project) => api::tasks::by_project(client, project)?,
        None => api::tasks::list(client, &Default::default())?,
    };
    let groups = crate::view::group_tasks(&tasks, crate::view::GroupKey::Status);
    print_group_output(&groups, json)
}

fn cmd_mine(client: &ApiClient, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = api::tasks::mine(client)?;
    let groups = schedule_groups(&tasks, Local::now().date_naive());
    print_group_output(&groups, json)
}

fn print_group_output(groups: &[TaskGroup], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let value: Vec<serde_json::Value> = groups
            .iter()
            .map(|g| {
                serde_json::json!({
                    "label": g.label,
                    "tasks": g.tasks,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        output::print_groups(groups);
    }
    Ok(())
}

fn cmd_show(client: &ApiClient, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let task = api::tasks::get(client, args.id)?;
    let comments = api::comments::list_by_task(client, args.id)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "task": task,
                "comments": comments,
            }))?
        );
    } else {
        output::print_task_detail(&task, &crate::model::thread_order(&comments));
    }
    Ok(())
}

fn cmd_projects(client: &ApiClient, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let projects = api::projects::list(client)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else {
        output::print_projects(&projects);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Project admin
// ---------------------------------------------------------------------------

fn cmd_project_add(client: &ApiClient, args: ProjectAddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let write = crate::model::ProjectWrite {
        title: args.title,
        description: args.description,
        members: Vec::new(),
    };
    let project = api::projects::create(client, &write)?;
    println!("created project #{} '{}'", project.id, project.title);
    Ok(())
}

fn cmd_project_edit(client: &ApiClient, args: ProjectEditArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Full update: start from the current record, apply the changed fields
    let current = api::projects::get(client, args.id)?;
    let write = crate::model::ProjectWrite {
        title: args.title.unwrap_or(current.title),
        description: args.description.or(current.description),
        members: current.members,
    };
    let project = api::projects::update(client, args.id, &write)?;
    println!("updated project #{} '{}'", project.id, project.title);
    Ok(())
}

fn cmd_project_rm(client: &ApiClient, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    api::projects::delete(client, args.id)?;
    println!("deleted project #{}", args.id);
    Ok(())
}

fn cmd_member(client: &ApiClient, args: MemberArgs, add: bool) -> Result<(), Box<dyn std::error::Error>> {
    if add {
        api::projects::add_member(client, args.project, args.user)?;
        println!("added user #{} to project #{}", args.user, args.project);
    } else {
        api::projects::remove_member(client, args.project, args.user)?;
        println!("removed user #{} from project #{}", args.user, args.project);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

fn cmd_comment(client: &ApiClient, args: CommentArgs) -> Result<(), Box<dyn std::error::Error>> {
    let comment = api::comments::create(client, args.task, &args.text, args.reply_to)?;
    println!("comment #{} added to task #{}", comment.id, args.task);
    Ok(())
}

fn cmd_comment_edit(client: &ApiClient, args: CommentEditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let comment = api::comments::update(client, args.id, &args.text)?;
    println!("comment #{} updated", comment.id);
    Ok(())
}

fn cmd_comment_rm(client: &ApiClient, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    api::comments::delete(client, args.id)?;
    println!("comment #{} deleted", args.id);
    Ok(())
}

// ---------------------------------------------------------------------------
// User admin
// ---------------------------------------------------------------------------

fn cmd_users(client: &ApiClient, args: UsersArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(id) = args.show {
        let user = api::users::get(client, id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&user)?);
        } else {
            output::print_users(std::slice::from_ref(&user));
        }
        return Ok(());
    }
    if let Some(id) = args.toggle {
        let user = api::users::toggle_active(client, id)?;
        println!(
            "{} is now {}",
            user.username,
            if user.is_active { "active" } else { "inactive" }
        );
        return Ok(());
    }
    let users = api::users::list(client)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
    } else {
        output::print_users(&users);
    }
    Ok(())
}

fn cmd_user_add(client: &ApiClient, args: UserAddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let password = read_password(args.password)?;
    let form = api::users::UserForm {
        username: args.username,
        email: args.email,
        password: Some(password),
        first_name: args.first_name,
        last_name: args.last_name,
        role: args.role,
    };
    let user = api::users::create(client, form, args.avatar.as_deref())?;
    println!("created user #{} {}", user.id, user.username);
    Ok(())
}

fn cmd_user_edit(client: &ApiClient, args: UserEditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let patch = api::users::UserPatch {
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        role: args.role,
    };
    let user = api::users::patch(client, args.id, &patch)?;
    println!("updated user #{} {}", user.id, user.username);
    Ok(())
}

fn cmd_user_rm(client: &ApiClient, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    api::users::delete(client, args.id)?;
    println!("deleted user #{}", args.id);
    Ok(())
}

fn cmd_notifications(
    client: &ApiClient,
    args: NotificationsArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut notifications = api::notifications::list(client)?;
    if args.unread {
        notifications.retain(|n| !n.is_read);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&notifications)?);
    } else {
        output::print_notifications(&notifications);
    }
    Ok(())
}

fn cmd_activity(
    client: &ApiClient,
    args: ActivityArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = api::activity::ActivityQuery {
        project: args.project,
        task: args.task,
    };
    let entries = api::activity::list(client, &query)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        output::print_activity(&entries);
    }
    Ok(())
}

fn cmd_report(client: &ApiClient, args: ReportArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let summary = api::reports::summary(client, args.project)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::print_report(&summary);
    }
    Ok(())
}
