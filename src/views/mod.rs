//! Page-level view models driven by the shell.

pub mod detail;
pub mod editor;
pub mod header;
pub mod manage;
pub mod mypage;
pub mod tags;

pub use detail::PostDetailView;
pub use editor::PostEditor;
pub use header::{HeaderState, MenuItem};
pub use manage::{BoardManager, MutationOutcome};
pub use mypage::MyPage;
pub use tags::{random_tags, tag_location};
