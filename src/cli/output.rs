use crate::model::report::ReportSummary;
use crate::model::task::Task;
use crate::model::{ActivityEntry, Comment, Notification, Project, User};
use crate::util::unicode;
use crate::view::TaskGroup;

/// Print a task table: id, status, priority, title, due, assignee
pub fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }
    for task in tasks {
        println!("{}", task_row(task));
    }
}

/// Print grouped tasks with bucket headers
pub fn print_groups(groups: &[TaskGroup]) {
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} ({})", group.label, group.tasks.len());
        for task in &group.tasks {
            println!("  {}", task_row(task));
        }
    }
}

fn task_row(task: &Task) -> String {
    let due = task
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "#{:<5} {:<12} {:<7} {}  due:{}  {}",
        task.id,
        task.status.as_str(),
        task.priority.as_str(),
        unicode::fit_to_width(&task.title, 40),
        due,
        task.assignee_name(),
    )
}

/// Print one task in full, with its comment thread
pub fn print_task_detail(task: &Task, comments: &[Comment]) {
    println!("#{} {}", task.id, task.title);
    println!("  status:   {}", task.status.label());
    println!("  priority: {}", task.priority.label());
    println!(
        "  due:      {}",
        task.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("  assignee: {}", task.assignee_name());
    if let Some(description) = &task.description {
        println!("  {}", description);
    }
    if comments.is_empty() {
        return;
    }
    println!();
    for comment in comments {
        let indent = if comment.is_reply() { "    " } else { "  " };
        println!(
            "{}{}: {}",
            indent,
            comment.author.display_name(),
            comment.content
        );
    }
}

pub fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("no users");
        return;
    }
    for user in users {
        println!(
            "#{:<5} {:<16} {:<28} {:<6} {}",
            user.id,
            unicode::fit_to_width(&user.username, 16),
            unicode::fit_to_width(&user.email, 28),
            user.role.label(),
            if user.is_active { "" } else { "inactive" },
        );
    }
}

pub fn print_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("no projects");
        return;
    }
    for project in projects {
        println!(
            "#{:<5} {:<30} {:>4} tasks  {:>5.1}% done",
            project.id,
            unicode::fit_to_width(&project.title, 30),
            project.task_count,
            project.completion_percentage,
        );
    }
}

pub fn print_notifications(notifications: &[Notification]) {
    if notifications.is_empty() {
        println!("no notifications");
        return;
    }
    for notification in notifications {
        let marker = if notification.is_read { " " } else { "*" };
        let when = notification
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("{} {}  {}", marker, when, notification.message);
    }
}

pub fn print_activity(entries: &[ActivityEntry]) {
    if entries.is_empty() {
        println!("no activity");
        return;
    }
    for entry in entries {
        let when = entry
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{}  {:<20} {}",
            when,
            entry.actor.display_name(),
            entry.description
        );
    }
}

pub fn print_report(summary: &ReportSummary) {
    println!("tasks: {}", summary.total_tasks);
    println!(
        "  by status:   todo {}  in_progress {}  completed {}",
        summary.by_status.todo, summary.by_status.in_progress, summary.by_status.completed
    );
    println!(
        "  by priority: low {}  medium {}  high {}",
        summary.by_priority.low, summary.by_priority.medium, summary.by_priority.high
    );
    println!("  completion:  {:.1}%", summary.completion_percentage);
    println!("  overdue:     {}", summary.overdue);
}
