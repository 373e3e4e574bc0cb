use crate::model::user::User;

/// An `@`-mention being typed: where the trigger sits and the partial
/// token after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionQuery {
    /// Byte offset of the `@` character
    pub start: usize,
    /// Text between the `@` and the cursor
    pub query: String,
}

/// Scan backwards from the cursor for an active mention trigger.
///
/// The trigger is the nearest preceding `@` with no whitespace between it
/// and the cursor. An `@` glued to the end of a word (`user@host`) does
/// not trigger; one at the start of the text or after whitespace or
/// punctuation does.
pub fn mention_at_cursor(text: &str, cursor: usize) -> Option<MentionQuery> {
    let cursor = cursor.min(text.len());
    let before = &text[..cursor];
    for (idx, ch) in before.char_indices().rev() {
        if ch.is_whitespace() {
            return None;
        }
        if ch == '@' {
            let prev = before[..idx].chars().next_back();
            if prev.is_some_and(|p| p.is_alphanumeric() || p == '@') {
                return None;
            }
            return Some(MentionQuery {
                start: idx,
                query: before[idx + ch.len_utf8()..].to_string(),
            });
        }
    }
    None
}

/// Filter members for a mention query: case-insensitive prefix matches on
/// display name or username first, then substring matches, each group in
/// input order.
pub fn filter_members<'a>(members: &'a [User], query: &str) -> Vec<&'a User> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return members.iter().collect();
    }
    let mut prefix: Vec<&User> = Vec::new();
    let mut substring: Vec<&User> = Vec::new();
    for member in members {
        let name = member.display_name().to_lowercase();
        let username = member.username.to_lowercase();
        if name.starts_with(&needle) || username.starts_with(&needle) {
            prefix.push(member);
        } else if name.contains(&needle) || username.contains(&needle) {
            substring.push(member);
        }
    }
    prefix.extend(substring);
    prefix
}

/// Replace the active mention with `@username ` and return the new text
/// plus the new cursor position.
pub fn apply_mention(text: &str, cursor: usize, query: &MentionQuery, username: &str) -> (String, usize) {
    let cursor = cursor.min(text.len());
    let mut out = String::with_capacity(text.len() + username.len() + 2);
    out.push_str(&text[..query.start]);
    out.push('@');
    out.push_str(username);
    out.push(' ');
    let new_cursor = out.len();
    out.push_str(&text[cursor..]);
    (out, new_cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn member(id: i64, username: &str, first: &str, last: &str) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "username": username,
            "first_name": first,
            "last_name": last,
        }))
        .unwrap()
    }

    #[test]
    fn trigger_at_start_of_text() {
        let q = mention_at_cursor("@al", 3).unwrap();
        assert_eq!(q.start, 0);
        assert_eq!(q.query, "al");
    }

    #[test]
    fn trigger_after_whitespace() {
        let text = "ping @no";
        let q = mention_at_cursor(text, text.len()).unwrap();
        assert_eq!(q.start, 5);
        assert_eq!(q.query, "no");
    }

    #[test]
    fn bare_at_has_empty_query() {
        let q = mention_at_cursor("see @", 5).unwrap();
        assert_eq!(q.query, "");
    }

    #[test]
    fn whitespace_between_at_and_cursor_cancels() {
        assert_eq!(mention_at_cursor("@alice said hi", 14), None);
    }

    #[test]
    fn email_like_at_does_not_trigger() {
        let text = "mail me at bob@example";
        assert_eq!(mention_at_cursor(text, text.len()), None);
    }

    #[test]
    fn cursor_mid_text_uses_preceding_at() {
        let text = "hey @alice bye";
        // cursor right after "@al"
        let q = mention_at_cursor(text, 7).unwrap();
        assert_eq!(q.start, 4);
        assert_eq!(q.query, "al");
    }

    #[test]
    fn no_at_means_no_query() {
        assert_eq!(mention_at_cursor("plain text", 10), None);
    }

    #[test]
    fn filter_prefers_prefix_matches() {
        let members = vec![
            member(1, "salim", "Salim", "Odeh"),
            member(2, "alice", "Alice", "Baker"),
            member(3, "malik", "Malik", "Reed"),
        ];
        let hits: Vec<&str> = filter_members(&members, "al")
            .iter()
            .map(|u| u.username.as_str())
            .collect();
        // alice is a prefix hit; salim/malik match "al" as substring only
        assert_eq!(hits, vec!["alice", "salim", "malik"]);
    }

    #[test]
    fn filter_matches_display_name_too() {
        let members = vec![member(1, "abaker", "Alice", "Baker")];
        assert_eq!(filter_members(&members, "bak").len(), 1);
        assert_eq!(filter_members(&members, "zzz").len(), 0);
    }

    #[test]
    fn empty_query_lists_everyone() {
        let members = vec![member(1, "a", "", ""), member(2, "b", "", "")];
        assert_eq!(filter_members(&members, "").len(), 2);
    }

    #[test]
    fn apply_replaces_partial_token() {
        let text = "ping @al about this";
        let q = mention_at_cursor(text, 8).unwrap();
        let (out, cursor) = apply_mention(text, 8, &q, "alice");
        assert_eq!(out, "ping @alice  about this");
        assert_eq!(&out[..cursor], "ping @alice ");
    }
}
