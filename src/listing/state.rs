//! Post listing state machine.
//!
//! The state never performs I/O. Every operation that needs data returns a
//! [`FetchTicket`]; the caller performs the fetch and hands the result back to
//! [`ListingState::apply`]. Tickets are numbered and only the most recently
//! issued one is committed, so a slow response can never overwrite a newer one.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, error};

use super::page_group::{PageButton, PageGroup};
use crate::board::{Post, PostPage};
use crate::config::ListingConfig;
use crate::route::Location;
use crate::Result;

/// Presentation of the post collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    /// Fixed-size pages shown as a table with a page-group bar.
    #[default]
    Pagination,
    /// A card feed that grows as the last card becomes visible.
    Infinite,
}

impl ViewType {
    /// Configuration string for the view type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Pagination => "pagination",
            ViewType::Infinite => "infinite",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pagination" => Ok(ViewType::Pagination),
            "infinite" => Ok(ViewType::Infinite),
            _ => Err(format!("unknown view type: {s}")),
        }
    }
}

/// Page size and page-group width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSettings {
    /// Posts per page.
    pub page_size: u32,
    /// Page buttons per group.
    pub page_range: u32,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_range: 5,
        }
    }
}

impl From<&ListingConfig> for ListingSettings {
    fn from(config: &ListingConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            page_range: config.page_range.max(1),
        }
    }
}

/// How a fetched page is merged into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Replace the collection.
    Replace,
    /// Append to the collection.
    Append,
}

/// A fetch the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    /// Board filter.
    pub board_id: Option<i64>,
    /// Zero-based page to request.
    pub page: u32,
    /// Page size to request.
    pub size: u32,
    /// Merge mode for the response.
    pub mode: FetchMode,
}

impl FetchTicket {
    /// Sequence number; later tickets have larger numbers.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Result of handing a response back to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The response was merged into the collection.
    Committed,
    /// A newer ticket was issued since; the response was dropped.
    Stale,
    /// The fetch failed; prior state is unchanged.
    Failed,
}

/// Indicator shown below the card feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFooter {
    /// Nothing to show.
    None,
    /// More pages exist.
    Loading,
    /// The last page has been loaded.
    NoMore,
}

/// Listing state for one view instance.
#[derive(Debug, Clone)]
pub struct ListingState {
    view_type: ViewType,
    board_id: Option<i64>,
    initial_page: u32,
    settings: ListingSettings,
    posts: Vec<Post>,
    number: u32,
    total_pages: u32,
    group: PageGroup,
    in_flight: Option<u64>,
    latest_seq: u64,
}

impl ListingState {
    /// Create a listing; nothing is fetched until [`mount`](Self::mount).
    pub fn new(
        view_type: ViewType,
        board_id: Option<i64>,
        initial_page: u32,
        settings: ListingSettings,
    ) -> Self {
        Self {
            view_type,
            board_id,
            initial_page,
            settings,
            posts: Vec::new(),
            number: 0,
            total_pages: 0,
            group: PageGroup::containing(initial_page, settings.page_range),
            in_flight: None,
            latest_seq: 0,
        }
    }

    /// Presentation mode.
    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    /// Board filter.
    pub fn board_id(&self) -> Option<i64> {
        self.board_id
    }

    /// Posts currently displayed.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Zero-based number of the most recently loaded page.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Total number of pages reported by the backend.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Current page-group window.
    pub fn page_group(&self) -> PageGroup {
        self.group
    }

    /// Check if a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Check if a page after the current one exists.
    pub fn has_more(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    fn issue(&mut self, page: u32, mode: FetchMode) -> FetchTicket {
        self.latest_seq += 1;
        self.in_flight = Some(self.latest_seq);
        FetchTicket {
            seq: self.latest_seq,
            board_id: self.board_id,
            page,
            size: self.settings.page_size,
            mode,
        }
    }

    /// Reset the collection and request the first page to show.
    ///
    /// Pagination mode starts at the initial page, infinite mode at page 0.
    pub fn mount(&mut self) -> FetchTicket {
        self.posts.clear();
        self.number = 0;
        self.total_pages = 0;
        self.group = PageGroup::containing(self.initial_page, self.settings.page_range);

        let page = match self.view_type {
            ViewType::Pagination => self.initial_page,
            ViewType::Infinite => 0,
        };
        debug!(
            "Mounting {} listing board={:?} page={}",
            self.view_type, self.board_id, page
        );
        self.issue(page, FetchMode::Replace)
    }

    /// Change the inputs and remount if any of them differ.
    pub fn update_inputs(
        &mut self,
        view_type: ViewType,
        board_id: Option<i64>,
        initial_page: u32,
    ) -> Option<FetchTicket> {
        if self.view_type == view_type
            && self.board_id == board_id
            && self.initial_page == initial_page
        {
            return None;
        }
        self.view_type = view_type;
        self.board_id = board_id;
        self.initial_page = initial_page;
        Some(self.mount())
    }

    /// Request a specific page (pagination mode only).
    ///
    /// The page group moves only once the page is committed.
    pub fn select_page(&mut self, page: u32) -> Option<FetchTicket> {
        if self.view_type != ViewType::Pagination {
            return None;
        }
        Some(self.issue(page, FetchMode::Replace))
    }

    /// Handle a press on a pagination button.
    pub fn press(&mut self, button: PageButton) -> Option<FetchTicket> {
        let target = match button {
            PageButton::Page { index, .. } => Some(index),
            PageButton::First => Some(0),
            PageButton::JumpBack(page) | PageButton::JumpForward(page) => Some(page),
            PageButton::PrevGroup => self.group.prev_group_target(),
            PageButton::NextGroup => self.group.next_group_target(self.total_pages),
        };
        target.and_then(|page| self.select_page(page))
    }

    /// The last card came into view (infinite mode only).
    ///
    /// Returns `None` while a fetch is in flight or when no further page exists.
    pub fn on_last_card_visible(&mut self) -> Option<FetchTicket> {
        if self.view_type != ViewType::Infinite || self.is_loading() || !self.has_more() {
            return None;
        }
        let next = self.number.saturating_add(1);
        Some(self.issue(next, FetchMode::Append))
    }

    /// Merge a fetch result for `ticket`.
    pub fn apply(&mut self, ticket: &FetchTicket, result: Result<PostPage>) -> ApplyOutcome {
        if ticket.seq != self.latest_seq {
            debug!(
                "Dropping stale listing response seq={} latest={}",
                ticket.seq, self.latest_seq
            );
            return ApplyOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                match ticket.mode {
                    FetchMode::Replace => self.posts = page.content,
                    FetchMode::Append => self.posts.extend(page.content),
                }
                self.number = page.number;
                self.total_pages = page.total_pages;
                if !self.group.contains(self.number) {
                    self.group = PageGroup::containing(self.number, self.settings.page_range);
                }
                ApplyOutcome::Committed
            }
            Err(e) => {
                error!("Failed to load post list: {}", e);
                ApplyOutcome::Failed
            }
        }
    }

    /// Forget any outstanding ticket so its response is dropped.
    pub fn abandon(&mut self) {
        self.latest_seq += 1;
        self.in_flight = None;
    }

    /// Buttons of the pagination bar.
    pub fn page_buttons(&self) -> Vec<PageButton> {
        self.group.buttons(self.number, self.total_pages)
    }

    /// Indicator below the card feed.
    pub fn footer(&self) -> FeedFooter {
        if self.has_more() {
            FeedFooter::Loading
        } else if !self.posts.is_empty() {
            FeedFooter::NoMore
        } else {
            FeedFooter::None
        }
    }

    /// Location of a post's detail page, carrying the page for "back to list".
    pub fn detail_location(&self, post_id: i64) -> Location {
        let location = Location::new(format!("/posts/{post_id}"));
        match self.view_type {
            ViewType::Pagination => location.with_query("page", self.number.to_string()),
            ViewType::Infinite => location,
        }
    }
}
