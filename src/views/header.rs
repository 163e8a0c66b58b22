//! Header navigation affordances derived from the session.

use crate::route::Location;
use crate::session::SessionStore;

/// One header menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Home page.
    Home,
    /// Board page.
    Board,
    /// Schedule page.
    Schedule,
    /// My-page (logged in).
    MyPage,
    /// Log out (logged in).
    Logout,
    /// Log in (logged out).
    Login,
    /// Board management (admin).
    Manage,
}

impl MenuItem {
    /// Command key that selects the entry in the shell.
    pub fn key(&self) -> &'static str {
        match self {
            MenuItem::Home => "h",
            MenuItem::Board => "b",
            MenuItem::Schedule => "s",
            MenuItem::MyPage => "m",
            MenuItem::Logout => "o",
            MenuItem::Login => "l",
            MenuItem::Manage => "a",
        }
    }

    /// i18n key of the entry label.
    pub fn label_key(&self) -> &'static str {
        match self {
            MenuItem::Home => "menu.home",
            MenuItem::Board => "menu.board",
            MenuItem::Schedule => "menu.schedule",
            MenuItem::MyPage => "menu.mypage",
            MenuItem::Logout => "menu.logout",
            MenuItem::Login => "menu.login",
            MenuItem::Manage => "menu.manage",
        }
    }

    /// Where the entry navigates. Logout navigates home after clearing the session.
    pub fn target(&self) -> Location {
        Location::new(match self {
            MenuItem::Home | MenuItem::Logout => "/",
            MenuItem::Board => "/board",
            MenuItem::Schedule => "/schedule",
            MenuItem::MyPage => "/mypage",
            MenuItem::Login => "/login",
            MenuItem::Manage => "/boards/manage",
        })
    }
}

/// Login and admin state as seen by the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderState {
    /// A session record is present.
    pub logged_in: bool,
    /// The session role is "admin".
    pub is_admin: bool,
}

impl HeaderState {
    /// Read the state from the session store.
    pub fn from_session(session: &SessionStore) -> Self {
        Self {
            logged_in: session.is_logged_in(),
            is_admin: session.is_admin(),
        }
    }

    /// Menu entries in display order.
    pub fn menu(&self) -> Vec<MenuItem> {
        let mut items = vec![MenuItem::Home, MenuItem::Board, MenuItem::Schedule];
        if self.is_admin {
            items.push(MenuItem::Manage);
        }
        if self.logged_in {
            items.extend([MenuItem::MyPage, MenuItem::Logout]);
        } else {
            items.push(MenuItem::Login);
        }
        items
    }

    /// Find the entry selected by a command key.
    pub fn select(&self, key: &str) -> Option<MenuItem> {
        self.menu()
            .into_iter()
            .find(|item| item.key().eq_ignore_ascii_case(key))
    }
}
