use ratatui::style::Color;

use crate::model::activity::ActivityKind;
use crate::model::config::UiConfig;
use crate::model::notification::NotificationKind;
use crate::model::task::{Priority, Status};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub blue: Color,
    pub purple: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x10, 0x18),
            text: Color::Rgb(0xC8, 0xC8, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x5E, 0x9C, 0xFF),
            dim: Color::Rgb(0x6A, 0x6A, 0x80),
            red: Color::Rgb(0xFF, 0x55, 0x55),
            yellow: Color::Rgb(0xF0, 0xC6, 0x40),
            green: Color::Rgb(0x50, 0xE0, 0x90),
            cyan: Color::Rgb(0x45, 0xD0, 0xE0),
            blue: Color::Rgb(0x5E, 0x9C, 0xFF),
            purple: Color::Rgb(0xC0, 0x70, 0xF0),
            selection_bg: Color::Rgb(0x28, 0x30, 0x48),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// How a single enum variant renders: marker glyph, color, label.
/// One table row per variant — adding a variant means adding one arm.
#[derive(Debug, Clone, Copy)]
pub struct StyleEntry {
    pub symbol: &'static str,
    pub color: Color,
    pub label: &'static str,
}

impl Theme {
    /// Create a theme from config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "cyan" => theme.cyan = color,
                    "blue" => theme.blue = color,
                    "purple" => theme.purple = color,
                    "selection_bg" => theme.selection_bg = color,
                    _ => {}
                }
            }
        }
        theme
    }

    pub fn status_style(&self, status: Status) -> StyleEntry {
        match status {
            Status::Todo => StyleEntry {
                symbol: "\u{25CB}",
                color: self.text,
                label: "To Do",
            },
            Status::InProgress => StyleEntry {
                symbol: "\u{25D0}",
                color: self.cyan,
                label: "In Progress",
            },
            Status::Completed => StyleEntry {
                symbol: "\u{25CF}",
                color: self.green,
                label: "Completed",
            },
        }
    }

    pub fn priority_style(&self, priority: Priority) -> StyleEntry {
        match priority {
            Priority::High => StyleEntry {
                symbol: "\u{25B2}",
                color: self.red,
                label: "High",
            },
            Priority::Medium => StyleEntry {
                symbol: "\u{25A0}",
                color: self.yellow,
                label: "Medium",
            },
            Priority::Low => StyleEntry {
                symbol: "\u{25BD}",
                color: self.blue,
                label: "Low",
            },
        }
    }

    pub fn notification_style(&self, kind: NotificationKind) -> StyleEntry {
        match kind {
            NotificationKind::TaskAssigned => StyleEntry {
                symbol: "\u{279C}",
                color: self.blue,
                label: "assigned",
            },
            NotificationKind::TaskUpdated => StyleEntry {
                symbol: "\u{270E}",
                color: self.yellow,
                label: "updated",
            },
            NotificationKind::CommentAdded => StyleEntry {
                symbol: "\u{1F5E8}",
                color: self.cyan,
                label: "comment",
            },
            NotificationKind::ProjectAdded => StyleEntry {
                symbol: "+",
                color: self.green,
                label: "project",
            },
            NotificationKind::Mention => StyleEntry {
                symbol: "@",
                color: self.purple,
                label: "mention",
            },
            NotificationKind::Other => StyleEntry {
                symbol: "\u{2022}",
                color: self.text,
                label: "other",
            },
        }
    }

    pub fn activity_style(&self, kind: ActivityKind) -> StyleEntry {
        match kind {
            ActivityKind::Created => StyleEntry {
                symbol: "+",
                color: self.green,
                label: "created",
            },
            ActivityKind::Updated => StyleEntry {
                symbol: "\u{270E}",
                color: self.yellow,
                label: "updated",
            },
            ActivityKind::Deleted => StyleEntry {
                symbol: "\u{2212}",
                color: self.red,
                label: "deleted",
            },
            ActivityKind::Commented => StyleEntry {
                symbol: "\u{1F5E8}",
                color: self.cyan,
                label: "commented",
            },
            ActivityKind::StatusChanged => StyleEntry {
                symbol: "\u{21C4}",
                color: self.blue,
                label: "moved",
            },
            ActivityKind::MemberAdded => StyleEntry {
                symbol: "+",
                color: self.green,
                label: "member added",
            },
            ActivityKind::MemberRemoved => StyleEntry {
                symbol: "\u{2212}",
                color: self.red,
                label: "member removed",
            },
            ActivityKind::Other => StyleEntry {
                symbol: "\u{2022}",
                color: self.text,
                label: "activity",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_color_accepts_rrggbb() {
        assert_eq!(parse_hex_color("#FF4444"), Some(Color::Rgb(0xFF, 0x44, 0x44)));
        assert_eq!(parse_hex_color("FF4444"), None);
        assert_eq!(parse_hex_color("#FF44"), None);
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
    }

    #[test]
    fn config_overrides_apply() {
        let mut ui = UiConfig::default();
        ui.colors.insert("highlight".into(), "#112233".into());
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.highlight, Color::Rgb(0x11, 0x22, 0x33));
        // untouched slots keep defaults
        assert_eq!(theme.text_bright, Color::Rgb(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn unknown_slot_is_ignored() {
        let mut ui = UiConfig::default();
        ui.colors.insert("nonsense".into(), "#112233".into());
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Theme::default().background);
    }

    #[test]
    fn status_table_covers_all_variants() {
        let theme = Theme::default();
        for status in Status::ALL {
            assert!(!theme.status_style(status).label.is_empty());
        }
        assert_eq!(theme.status_style(Status::Completed).color, theme.green);
    }

    #[test]
    fn priority_table_covers_all_variants() {
        let theme = Theme::default();
        assert_eq!(theme.priority_style(Priority::High).color, theme.red);
        assert_eq!(theme.priority_style(Priority::Low).color, theme.blue);
    }
}
