use std::collections::HashSet;
use std::io;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::api::{self, ApiClient, ApiError, Session, SessionStore};
use crate::model::{ClientConfig, Comment, Notification, Project, Status, Task, User};
use crate::view::{
    EditSession, FilterState, GroupKey, MoveGesture, SortDir, SortKey, TaskGroup, filter_tasks,
    group_tasks, schedule_groups, sort_tasks,
};

use super::input;
use super::render;
use super::theme::Theme;

/// How often the event loop wakes up without input
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Cadence of the read-only unread-notification badge refresh
const UNREAD_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Which view is currently displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Filterable, groupable table of every visible task
    Tasks,
    /// Kanban board, one column per status
    Board,
    /// "My Tasks" partitioned by due-date proximity
    Schedule,
    /// Project list
    Projects,
    /// Notification center
    Notifications,
    /// One task with description and threaded comments
    Detail { task_id: i64 },
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Inline cell edit in progress
    Edit,
    /// Typing a search pattern
    Search,
    /// A board task is picked up
    Move,
    /// Typing in the comment composer
    Comment,
}

/// A new task being typed: quick-create only needs a title; everything
/// else starts from defaults and gets edited in place afterwards.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub project: i64,
    pub buffer: String,
    pub cursor: usize,
}

/// One row of a flattened grouped list
#[derive(Debug, Clone)]
pub enum ListRow {
    Header {
        label: String,
        count: usize,
        collapsed: bool,
    },
    Task(Task),
}

/// Main application state
pub struct App {
    pub client: ApiClient,
    pub session: Session,
    pub theme: Theme,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    /// Message to print after the terminal is restored (e.g. auth expiry)
    pub fatal_message: Option<String>,

    // Entity caches, reloaded wholesale after every mutation
    pub tasks: Vec<Task>,
    pub my_tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub notifications: Vec<Notification>,
    /// Members of the project most recently opened for editing/mentions
    pub members: Vec<User>,
    pub detail_comments: Vec<Comment>,

    // View-model controls (ephemeral, reset on demand)
    pub filters: FilterState,
    pub sort_key: SortKey,
    pub sort_dir: SortDir,
    pub group_key: GroupKey,
    /// Collapsed bucket labels; lives only as long as the view
    pub collapsed: HashSet<String>,

    // Cursors
    pub tasks_cursor: usize,
    pub board_column: usize,
    pub board_cursor: usize,
    pub schedule_cursor: usize,
    pub projects_cursor: usize,
    pub notif_cursor: usize,
    pub detail_comment_cursor: usize,

    // In-flight gestures
    pub edit: Option<EditSession>,
    pub create: Option<CreateSession>,
    pub move_gesture: Option<MoveGesture>,

    // Search
    pub search_input: String,
    pub last_search: Option<String>,

    // Comment composer
    pub comment_input: String,
    pub comment_cursor: usize,
    pub reply_to: Option<i64>,
    pub mention_selected: usize,

    // Notification badge
    pub unread_count: u64,
    last_unread_poll: Option<Instant>,

    pub status_message: Option<String>,
    pub show_help: bool,
    pub show_key_hints: bool,
}

impl App {
    pub fn new(client: ApiClient, session: Session, config: &ClientConfig) -> Self {
        App {
            client,
            session,
            theme: Theme::from_config(&config.ui),
            view: View::Tasks,
            mode: Mode::Navigate,
            should_quit: false,
            fatal_message: None,
            tasks: Vec::new(),
            my_tasks: Vec::new(),
            projects: Vec::new(),
            notifications: Vec::new(),
            members: Vec::new(),
            detail_comments: Vec::new(),
            filters: FilterState::default(),
            sort_key: SortKey::default(),
            sort_dir: SortDir::default(),
            group_key: GroupKey::default(),
            collapsed: HashSet::new(),
            tasks_cursor: 0,
            board_column: 0,
            board_cursor: 0,
            schedule_cursor: 0,
            projects_cursor: 0,
            notif_cursor: 0,
            detail_comment_cursor: 0,
            edit: None,
            create: None,
            move_gesture: None,
            search_input: String::new(),
            last_search: None,
            comment_input: String::new(),
            comment_cursor: 0,
            reply_to: None,
            mention_selected: 0,
            unread_count: 0,
            last_unread_poll: None,
            status_message: None,
            show_help: false,
            show_key_hints: config.ui.show_key_hints,
        }
    }

    /// Local date truncated to midnight — the "now" every deadline bucket
    /// is computed against.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    // -----------------------------------------------------------------------
    // View-model derivations
    // -----------------------------------------------------------------------

    /// The filtered, sorted task list the table and board render from
    pub fn visible_tasks(&self) -> Vec<Task> {
        let mut visible = filter_tasks(&self.tasks, &self.filters, self.today());
        sort_tasks(&mut visible, self.sort_key, self.sort_dir);
        visible
    }

    pub fn grouped(&self) -> Vec<TaskGroup> {
        group_tasks(&self.visible_tasks(), self.group_key)
    }

    /// Flatten groups into display rows, hiding tasks of collapsed groups.
    /// Ungrouped lists skip the header row entirely.
    pub fn list_rows(&self) -> Vec<ListRow> {
        let groups = self.grouped();
        let mut rows = Vec::new();
        let show_headers = self.group_key != GroupKey::None;
        for group in groups {
            let collapsed = self.collapsed.contains(&group.label);
            if show_headers {
                rows.push(ListRow::Header {
                    label: group.label.clone(),
                    count: group.tasks.len(),
                    collapsed,
                });
            }
            if !collapsed {
                rows.extend(group.tasks.into_iter().map(ListRow::Task));
            }
        }
        rows
    }

    /// Board columns: the filtered set partitioned by status
    pub fn board_columns(&self) -> Vec<(Status, Vec<Task>)> {
        let visible = self.visible_tasks();
        Status::ALL
            .iter()
            .map(|status| {
                let tasks: Vec<Task> = visible
                    .iter()
                    .filter(|t| t.status == *status)
                    .cloned()
                    .collect();
                (*status, tasks)
            })
            .collect()
    }

    /// "My Tasks" rows, date-bucketed; empty buckets never appear
    pub fn schedule_rows(&self) -> Vec<ListRow> {
        let mut rows = Vec::new();
        for group in schedule_groups(&self.my_tasks, self.today()) {
            let collapsed = self.collapsed.contains(&group.label);
            rows.push(ListRow::Header {
                label: group.label.clone(),
                count: group.tasks.len(),
                collapsed,
            });
            if !collapsed {
                rows.extend(group.tasks.into_iter().map(ListRow::Task));
            }
        }
        rows
    }

    /// The task under the cursor in the current view
    pub fn cursor_task(&self) -> Option<Task> {
        match &self.view {
            View::Tasks => match self.list_rows().get(self.tasks_cursor) {
                Some(ListRow::Task(task)) => Some(task.clone()),
                _ => None,
            },
            View::Board => {
                let columns = self.board_columns();
                columns
                    .get(self.board_column)
                    .and_then(|(_, tasks)| tasks.get(self.board_cursor))
                    .cloned()
            }
            View::Schedule => match self.schedule_rows().get(self.schedule_cursor) {
                Some(ListRow::Task(task)) => Some(task.clone()),
                _ => None,
            },
            View::Detail { task_id } => self.find_task(*task_id),
            _ => None,
        }
    }

    pub fn find_task(&self, id: i64) -> Option<Task> {
        self.tasks
            .iter()
            .chain(self.my_tasks.iter())
            .find(|t| t.id == id)
            .cloned()
    }

    /// Compiled search pattern for highlighting, case-insensitive, falling
    /// back to a literal match when the input is not a valid regex.
    pub fn active_search_re(&self) -> Option<Regex> {
        let pattern = match self.mode {
            Mode::Search if !self.search_input.is_empty() => &self.search_input,
            _ => self.last_search.as_deref()?,
        };
        Regex::new(&format!("(?i){}", pattern))
            .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
            .ok()
    }

    // -----------------------------------------------------------------------
    // Data loading
    // -----------------------------------------------------------------------

    /// Initial load: every collection the dashboard shows
    pub fn load_all(&mut self) {
        self.reload_tasks();
        self.reload_my_tasks();
        self.reload_projects();
        self.reload_notifications();
        self.refresh_unread(true);
    }

    pub fn reload_tasks(&mut self) {
        match api::tasks::list(&self.client, &Default::default()) {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => self.handle_api_error("loading tasks", e),
        }
    }

    pub fn reload_my_tasks(&mut self) {
        match api::tasks::mine(&self.client) {
            Ok(tasks) => self.my_tasks = tasks,
            Err(e) => self.handle_api_error("loading my tasks", e),
        }
    }

    pub fn reload_projects(&mut self) {
        match api::projects::list(&self.client) {
            Ok(projects) => self.projects = projects,
            Err(e) => self.handle_api_error("loading projects", e),
        }
    }

    pub fn reload_notifications(&mut self) {
        match api::notifications::list(&self.client) {
            Ok(notifications) => self.notifications = notifications,
            Err(e) => self.handle_api_error("loading notifications", e),
        }
    }

    pub fn reload_comments(&mut self, task_id: i64) {
        match api::comments::list_by_task(&self.client, task_id) {
            Ok(comments) => self.detail_comments = crate::model::thread_order(&comments),
            Err(e) => self.handle_api_error("loading comments", e),
        }
    }

    /// Members of a task's project, for assignee cycling and @-mentions
    pub fn load_members(&mut self, project_id: i64) {
        match api::users::available(&self.client, project_id) {
            Ok(users) => self.members = users,
            Err(e) => {
                // Non-admins may not see the user directory; fall back to
                // an empty member list rather than blocking the view.
                tracing::debug!(error = %e, project_id, "member list unavailable");
                self.members = Vec::new();
            }
        }
    }

    /// The reload that follows every successful mutation. Local state is
    /// never patched in place; the server's answer is the new truth.
    pub fn reload_after_mutation(&mut self) {
        self.reload_tasks();
        self.reload_my_tasks();
        if let View::Detail { task_id } = self.view {
            self.reload_comments(task_id);
        }
        self.clamp_cursors();
    }

    /// Idempotent unread-badge refresh, rate-limited to the poll cadence
    pub fn refresh_unread(&mut self, force: bool) {
        let due = force
            || self
                .last_unread_poll
                .is_none_or(|at| at.elapsed() >= UNREAD_POLL_INTERVAL);
        if !due {
            return;
        }
        self.last_unread_poll = Some(Instant::now());
        match api::notifications::unread_count(&self.client) {
            Ok(count) => self.unread_count = count,
            // A failed badge poll is not worth a user-facing message
            Err(e) => tracing::debug!(error = %e, "unread poll failed"),
        }
    }

    /// Called every poll interval regardless of input
    pub fn tick(&mut self) {
        self.refresh_unread(false);
    }

    // -----------------------------------------------------------------------
    // Error surfacing
    // -----------------------------------------------------------------------

    /// Convert a failed request into a transient message. Mutation call
    /// sites go through here: nothing propagates past the view layer, and
    /// nothing is swallowed without a trace. An expired token ends the
    /// session — the terminal equivalent of the global login redirect.
    pub fn handle_api_error(&mut self, context: &str, error: ApiError) {
        tracing::warn!(context, error = %error, "request failed");
        if error.is_unauthorized() {
            self.fatal_message =
                Some("session expired — run `td login` to sign in again".to_string());
            self.should_quit = true;
            return;
        }
        self.status_message = Some(format!("{}: {}", context, error));
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    // -----------------------------------------------------------------------
    // Cursor upkeep
    // -----------------------------------------------------------------------

    /// Reloads can shrink any list; pull every cursor back in range.
    pub fn clamp_cursors(&mut self) {
        self.tasks_cursor = clamp(self.tasks_cursor, self.list_rows().len());
        let columns = self.board_columns();
        self.board_column = clamp(self.board_column, columns.len());
        let column_len = columns.get(self.board_column).map_or(0, |(_, t)| t.len());
        self.board_cursor = clamp(self.board_cursor, column_len);
        self.schedule_cursor = clamp(self.schedule_cursor, self.schedule_rows().len());
        self.projects_cursor = clamp(self.projects_cursor, self.projects.len());
        self.notif_cursor = clamp(self.notif_cursor, self.notifications.len());
        self.detail_comment_cursor = clamp(self.detail_comment_cursor, self.detail_comments.len());
    }
}

fn clamp(cursor: usize, len: usize) -> usize {
    if len == 0 { 0 } else { cursor.min(len - 1) }
}

/// Run the TUI against a saved session.
pub fn run(config: &ClientConfig, store: &SessionStore) -> Result<(), Box<dyn std::error::Error>> {
    let session = match store.load() {
        Some(session) => session,
        None => {
            eprintln!("not signed in — run `td login <username>` first");
            return Ok(());
        }
    };

    let mut client = ApiClient::new(&config.server)?;
    client.set_token(Some(session.token.clone()));
    client.set_csrf(session.csrf.clone());

    let mut app = App::new(client, session, config);
    app.load_all();
    if app.should_quit {
        // Initial load already failed auth; skip the terminal entirely
        if let Some(message) = &app.fatal_message {
            eprintln!("{}", message);
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal even if we panic mid-draw
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(message) = &app.fatal_message {
        eprintln!("{}", message);
    }

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        } else {
            app.tick();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
