//! Post list screen shared by the home and board pages.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::common::ScreenContext;
use super::ScreenResult;
use crate::board::{Board, Post};
use crate::listing::{
    FeedFooter, ListingSettings, PageButton, PostListView, ScrollObserver, ViewType,
};
use crate::route::Location;
use crate::views::{random_tags, tag_location};
use crate::Result;

/// Rows one card occupies in the feed.
const CARD_ROWS: u32 = 2;

/// Post list screen.
pub struct ListingScreen;

impl ListingScreen {
    /// Run the list at `location` in the given presentation.
    pub async fn run(
        ctx: &mut ScreenContext,
        location: &Location,
        view_type: ViewType,
        title_key: &str,
    ) -> Result<ScreenResult> {
        let api = Arc::clone(&ctx.api);
        let settings = ListingSettings::from(&ctx.config.listing);
        let mut view = PostListView::new(
            &*api,
            view_type,
            location.board_id(),
            location.clone(),
            settings,
        );

        let tags = random_tags(
            &*api,
            ctx.config.listing.tag_count,
            &mut StdRng::from_os_rng(),
        )
        .await;
        view.mount().await;

        let observer = ScrollObserver::new(ctx.config.listing.prefetch_margin);
        let mut viewport_bottom = ctx.config.terminal.height;
        let mut shown = 0;
        let mut redraw = true;

        loop {
            if redraw {
                ctx.send_line("").await?;
                let title = ctx.i18n.t(title_key).to_string();
                ctx.send_line(&format!("=== {title} ===")).await?;
                Self::render_tags(ctx, &tags).await?;
                shown = 0;
                redraw = false;
            }

            let posts = view.state().posts();
            match view_type {
                ViewType::Pagination => {
                    Self::render_cards(ctx, posts, 0).await?;
                    let bar = Self::page_bar(&view.state().page_buttons());
                    ctx.send_line(&bar).await?;
                }
                ViewType::Infinite => {
                    Self::render_cards(ctx, &posts[shown.min(posts.len())..], shown).await?;
                    shown = posts.len();
                    match view.state().footer() {
                        FeedFooter::Loading => ctx.send_key("listing.scroll_more").await?,
                        FeedFooter::NoMore => ctx.send_key("listing.no_more").await?,
                        FeedFooter::None => {}
                    }
                }
            }
            if view.state().posts().is_empty() {
                ctx.send_key("listing.no_posts").await?;
            }

            let help_key = match view_type {
                ViewType::Pagination => "listing.commands_pagination",
                ViewType::Infinite => "listing.commands_feed",
            };
            let Some(input) = ctx.prompt_key(help_key).await? else {
                view.unmount();
                return Ok(ScreenResult::Quit);
            };

            if let Some(result) = ctx.header_command(&input).await? {
                view.unmount();
                return Ok(result);
            }

            if input.is_empty() {
                if view_type == ViewType::Infinite {
                    viewport_bottom += ctx.config.terminal.height;
                    let count = view.state().posts().len() as u32;
                    let last_card_top = count.saturating_sub(1) * CARD_ROWS;
                    if observer.is_visible(last_card_top, viewport_bottom) {
                        view.on_last_card_visible().await;
                    }
                }
                continue;
            }

            if input.eq_ignore_ascii_case("w") {
                view.unmount();
                let mut target = Location::new("/posts/create");
                if let Some(board_id) = location.board_id() {
                    target.set("boardId", board_id.to_string());
                }
                return Ok(ScreenResult::Navigate(target));
            }

            if let Some(n) = input.strip_prefix(['t', 'T']).and_then(|n| n.parse::<usize>().ok()) {
                if let Some(id) = n.checked_sub(1).and_then(|i| tags.get(i)).and_then(|t| t.id) {
                    view.unmount();
                    return Ok(ScreenResult::Navigate(tag_location(id)));
                }
                ctx.alert_key("common.invalid_input").await?;
                continue;
            }

            if let Some(n) = input.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                let target = view.state().posts().get(n).map(|p| p.id);
                match target {
                    Some(id) => {
                        let next = view.state().detail_location(id);
                        view.unmount();
                        return Ok(ScreenResult::Navigate(next));
                    }
                    None => ctx.alert_key("common.invalid_input").await?,
                }
                continue;
            }

            if view_type == ViewType::Pagination {
                match Self::parse_page_command(&input, &view.state().page_buttons()) {
                    Some(button) => {
                        view.press(button).await;
                    }
                    None => ctx.alert_key("common.invalid_input").await?,
                }
                redraw = true;
            } else {
                ctx.alert_key("common.invalid_input").await?;
            }
        }
    }

    async fn render_tags(ctx: &mut ScreenContext, tags: &[Board]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let entries: Vec<String> = tags
            .iter()
            .enumerate()
            .map(|(i, tag)| format!("[T{}] #{}", i + 1, tag.category))
            .collect();
        let label = ctx.i18n.t("listing.tags").to_string();
        ctx.send_line(&format!("{label}: {}", entries.join(" "))).await
    }

    async fn render_cards(ctx: &mut ScreenContext, posts: &[Post], offset: usize) -> Result<()> {
        for (i, post) in posts.iter().enumerate() {
            let meta = ctx.i18n.t_with(
                "listing.card_meta",
                &[
                    ("author", &post.author_name),
                    ("date", &ctx.format_date(&post.created_at)),
                    ("views", &post.view_count.to_string()),
                ],
            );
            ctx.send_line(&format!("  {:>3}. {}", offset + i + 1, post.title))
                .await?;
            ctx.send_line(&format!("       {meta}")).await?;
        }
        Ok(())
    }

    /// Pagination bar: `[<] [1] [...] 11 12 *13* 14 15 [...] [>]`.
    fn page_bar(buttons: &[PageButton]) -> String {
        buttons
            .iter()
            .map(|button| match button {
                PageButton::Page { active: true, .. } => format!("*{}*", button.label()),
                PageButton::Page { .. } => button.label(),
                _ => format!("[{}]", button.label()),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Map a command to one of the available buttons.
    ///
    /// `<` / `>` move by group, `<<` goes to the first page, `-` / `+`
    /// jump a group back / forward, `pN` shows page N of the window.
    fn parse_page_command(input: &str, buttons: &[PageButton]) -> Option<PageButton> {
        let find = |pred: &dyn Fn(&PageButton) -> bool| buttons.iter().copied().find(|b| pred(b));
        match input {
            "<" => find(&|b| matches!(b, PageButton::PrevGroup)),
            ">" => find(&|b| matches!(b, PageButton::NextGroup)),
            "<<" => find(&|b| matches!(b, PageButton::First)),
            "-" => find(&|b| matches!(b, PageButton::JumpBack(_))),
            "+" => find(&|b| matches!(b, PageButton::JumpForward(_))),
            _ => {
                let page: u32 = input.strip_prefix(['p', 'P'])?.parse().ok()?;
                let index = page.checked_sub(1)?;
                find(&|b| matches!(b, PageButton::Page { index: i, .. } if *i == index))
            }
        }
    }
}
