//! Application module.
//!
//! Owns the shared services and runs the routing loop: render the header,
//! dispatch the current route to its screen, follow the screen's result.

pub mod screens;

pub use screens::{Console, ScreenContext, ScreenResult};

use std::sync::Arc;

use tracing::{debug, info};

use crate::api::{ApiClient, BoardApi, UserClient, UserDirectory};
use crate::config::Config;
use crate::i18n::I18n;
use crate::route::{Location, Route};
use crate::session::SessionStore;
use crate::Result;

use screens::{AuthScreen, ListingScreen, ManageScreen, MyPageScreen, PostScreen, ScheduleScreen};

/// Main application.
pub struct Application {
    /// Application configuration.
    config: Arc<Config>,
    /// Application backend.
    api: Arc<dyn BoardApi>,
    /// User directory.
    users: Arc<dyn UserDirectory>,
    /// Translations for the configured language.
    i18n: Arc<I18n>,
}

impl Application {
    /// Create an application over explicit backends.
    pub fn new(
        config: Arc<Config>,
        api: Arc<dyn BoardApi>,
        users: Arc<dyn UserDirectory>,
        i18n: Arc<I18n>,
    ) -> Self {
        Self {
            config,
            api,
            users,
            i18n,
        }
    }

    /// Create an application talking HTTP to the configured backends.
    pub fn from_config(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let users = UserClient::new(&config.api)?;
        let i18n = I18n::builtin_or_default(&config.locale.language);
        Ok(Self::new(
            Arc::new(config),
            Arc::new(api),
            Arc::new(users),
            Arc::new(i18n),
        ))
    }

    /// Get the configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Create a screen context for one console.
    pub fn create_context(&self, session: SessionStore, console: Console) -> ScreenContext {
        ScreenContext::new(
            Arc::clone(&self.config),
            Arc::clone(&self.api),
            Arc::clone(&self.users),
            Arc::clone(&self.i18n),
            session,
            console,
        )
    }

    /// Run the routing loop from `start` until a screen quits.
    pub async fn run(&self, ctx: &mut ScreenContext, start: Location) -> Result<()> {
        let mut location = start;
        info!("Starting at {}", location);

        loop {
            let route = location.route();
            debug!("Showing {} ({:?})", location, route);
            if route.shows_layout() {
                ctx.render_header().await?;
            }

            let result = Self::dispatch(ctx, &location, route).await?;
            match result {
                ScreenResult::Navigate(next) => location = next,
                ScreenResult::Quit => break,
            }
        }

        info!("Session ended");
        Ok(())
    }

    async fn dispatch(
        ctx: &mut ScreenContext,
        location: &Location,
        route: Route,
    ) -> Result<ScreenResult> {
        match route {
            Route::Home => {
                let view_type = ctx.config.listing.home_view;
                ListingScreen::run(ctx, location, view_type, "listing.home_title").await
            }
            Route::Board => {
                let view_type = ctx.config.listing.board_view;
                ListingScreen::run(ctx, location, view_type, "listing.board_title").await
            }
            Route::Login => AuthScreen::run_login(ctx).await,
            Route::Register => AuthScreen::run_register(ctx).await,
            Route::MyPage => MyPageScreen::run(ctx).await,
            Route::PostCreate => PostScreen::run_create(ctx, location).await,
            Route::PostDetail(id) => PostScreen::run_detail(ctx, location, id).await,
            Route::PostEdit(id) => PostScreen::run_edit(ctx, id).await,
            Route::BoardManage => {
                if !ctx.session.is_admin() {
                    ctx.alert_key("manage.admin_only").await?;
                    return Ok(ScreenResult::Navigate(Location::new("/")));
                }
                ManageScreen::run(ctx).await
            }
            Route::Schedule => ScheduleScreen::run(ctx).await,
            Route::NotFound(path) => {
                let message = ctx.i18n.t_with("common.not_found", &[("path", &path)]);
                ctx.alert(&message).await?;
                Ok(ScreenResult::Navigate(Location::new("/")))
            }
        }
    }
}

impl Clone for Application {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            api: Arc::clone(&self.api),
            users: Arc::clone(&self.users),
            i18n: Arc::clone(&self.i18n),
        }
    }
}
