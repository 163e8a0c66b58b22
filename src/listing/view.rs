//! Async driver for the post listing.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::page_group::PageButton;
use super::state::{ApplyOutcome, FetchTicket, ListingState, ViewType};
use crate::api::BoardApi;
use crate::route::Location;

/// A listing bound to a backend and the location it is displayed at.
pub struct PostListView<'a, A: BoardApi + ?Sized> {
    api: &'a A,
    state: ListingState,
    location: Location,
    cancel: CancellationToken,
}

impl<'a, A: BoardApi + ?Sized> PostListView<'a, A> {
    /// Create a view. `location`'s `page` parameter is the initial page.
    pub fn new(
        api: &'a A,
        view_type: ViewType,
        board_id: Option<i64>,
        location: Location,
        settings: super::ListingSettings,
    ) -> Self {
        let state = ListingState::new(view_type, board_id, location.page(), settings);
        Self {
            api,
            state,
            location,
            cancel: CancellationToken::new(),
        }
    }

    /// Listing state.
    pub fn state(&self) -> &ListingState {
        &self.state
    }

    /// Location kept in agreement with the displayed page.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Token that discards in-flight responses once cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Fetch the first page to show.
    pub async fn mount(&mut self) -> ApplyOutcome {
        let ticket = self.state.mount();
        self.run(ticket).await
    }

    /// Show a specific page and update the location's `page` parameter.
    pub async fn go_to_page(&mut self, page: u32) -> Option<ApplyOutcome> {
        let ticket = self.state.select_page(page)?;
        Some(self.run(ticket).await)
    }

    /// Handle a pagination button.
    pub async fn press(&mut self, button: PageButton) -> Option<ApplyOutcome> {
        let ticket = self.state.press(button)?;
        Some(self.run(ticket).await)
    }

    /// The last card became visible; load the next page if allowed.
    pub async fn on_last_card_visible(&mut self) -> Option<ApplyOutcome> {
        let ticket = self.state.on_last_card_visible()?;
        Some(self.run(ticket).await)
    }

    /// Stop committing responses for this view.
    pub fn unmount(&mut self) {
        self.cancel.cancel();
        self.state.abandon();
    }

    async fn run(&mut self, ticket: FetchTicket) -> ApplyOutcome {
        let result = self
            .api
            .list_posts(ticket.board_id, ticket.page, ticket.size)
            .await;

        if self.cancel.is_cancelled() {
            debug!("Listing unmounted; dropping page {}", ticket.page);
            return ApplyOutcome::Stale;
        }

        let outcome = self.state.apply(&ticket, result);
        if outcome == ApplyOutcome::Committed && self.state.view_type() == ViewType::Pagination {
            self.location.set("page", self.state.number().to_string());
        }
        outcome
    }
}
