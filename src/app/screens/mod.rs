//! Screen modules for StudyLog.
//!
//! Each screen reads commands from the console until the user navigates
//! elsewhere or input ends.

mod auth;
pub(crate) mod common;
mod listing;
mod manage;
mod mypage;
mod post;
mod schedule;

pub use auth::AuthScreen;
pub use common::{Console, ScreenContext};
pub use listing::ListingScreen;
pub use manage::ManageScreen;
pub use mypage::MyPageScreen;
pub use post::PostScreen;
pub use schedule::{month_grid, ScheduleScreen};

use crate::route::Location;

/// Result of a screen action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenResult {
    /// Show another location.
    Navigate(Location),
    /// Leave the application.
    Quit,
}
