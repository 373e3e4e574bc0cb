//! The task collection view-model: pure transforms from raw entity lists
//! plus user-controlled state to displayable structures, and the edit/move
//! reconciliation rules. No I/O happens here; the TUI and CLI layers feed
//! these functions and carry their outputs to the services layer.

pub mod board;
pub mod edit;
pub mod filter;
pub mod group;
pub mod mention;
pub mod schedule;
pub mod sort;

pub use board::{COLUMNS, MoveGesture, drop_target, drop_update};
pub use edit::{EditError, EditField, EditSession, SaveOutcome, save_outcome};
pub use filter::{AssigneeFilter, DueFilter, FilterState, filter_tasks};
pub use group::{GroupKey, TaskGroup, group_tasks};
pub use mention::{MentionQuery, apply_mention, filter_members, mention_at_cursor};
pub use schedule::{DateBucket, schedule_groups};
pub use sort::{SortDir, SortKey, sort_tasks};
