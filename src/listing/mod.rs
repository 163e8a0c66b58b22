//! Post listing: paginated table or infinite card feed.
//!
//! [`ListingState`] holds the collection, page cursor and page-group window
//! and issues [`FetchTicket`]s; [`PostListView`] performs the fetches.

mod page_group;
mod scroll;
mod state;
mod view;

pub use page_group::{PageButton, PageGroup};
pub use scroll::ScrollObserver;
pub use state::{
    ApplyOutcome, FeedFooter, FetchMode, FetchTicket, ListingSettings, ListingState, ViewType,
};
pub use view::PostListView;
