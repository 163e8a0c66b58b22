//! Client-side routing.
//!
//! A [`Location`] is the path plus query string the shell is showing; a
//! [`Route`] is the page that path maps to.

use std::fmt;

use url::Url;

/// Page selected by a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/mypage`
    MyPage,
    /// `/board`
    Board,
    /// `/posts/create`
    PostCreate,
    /// `/posts/{id}`
    PostDetail(i64),
    /// `/post/edit/{id}`
    PostEdit(i64),
    /// `/boards/manage`
    BoardManage,
    /// `/schedule`
    Schedule,
    /// Anything else.
    NotFound(String),
}

impl Route {
    /// Map a path (without query) to a route.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["mypage"] => Route::MyPage,
            ["board"] => Route::Board,
            ["posts", "create"] => Route::PostCreate,
            ["posts", id] => id
                .parse()
                .map(Route::PostDetail)
                .unwrap_or_else(|_| Route::NotFound(path.to_string())),
            ["post", "edit", id] => id
                .parse()
                .map(Route::PostEdit)
                .unwrap_or_else(|_| Route::NotFound(path.to_string())),
            ["boards", "manage"] => Route::BoardManage,
            ["schedule"] => Route::Schedule,
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Whether the header and footer are shown around this route.
    pub fn shows_layout(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

/// Path plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Location for a path without query parameters.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: if path.is_empty() { "/".to_string() } else { path },
            query: Vec::new(),
        }
    }

    /// Parse `path?query`. Relative input (`?page=2`) keeps `current`'s path.
    pub fn parse(input: &str, current: Option<&Location>) -> Self {
        let input = input.trim();
        let base = Url::parse("http://localhost/").ok();

        let joined = match current {
            Some(cur) if input.starts_with('?') => format!("{}{}", cur.path, input),
            _ => input.to_string(),
        };

        let Some(url) = base.and_then(|b| b.join(&joined).ok()) else {
            return Self::new(joined);
        };

        Self {
            path: url.path().to_string(),
            query: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// Path component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Route for the path.
    pub fn route(&self) -> Route {
        Route::parse(&self.path)
    }

    /// Query parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a query parameter, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.query.push((key.to_string(), value)),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Zero-based page from the `page` parameter; 0 when absent or invalid.
    pub fn page(&self) -> u32 {
        self.get("page").and_then(|p| p.parse().ok()).unwrap_or(0)
    }

    /// Board filter from the `boardId` parameter.
    pub fn board_id(&self) -> Option<i64> {
        self.get("boardId").and_then(|b| b.parse().ok())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{sep}{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/register"), Route::Register);
        assert_eq!(Route::parse("/mypage"), Route::MyPage);
        assert_eq!(Route::parse("/board"), Route::Board);
        assert_eq!(Route::parse("/board/"), Route::Board);
        assert_eq!(Route::parse("/posts/create"), Route::PostCreate);
        assert_eq!(Route::parse("/posts/42"), Route::PostDetail(42));
        assert_eq!(Route::parse("/post/edit/42"), Route::PostEdit(42));
        assert_eq!(Route::parse("/boards/manage"), Route::BoardManage);
        assert_eq!(Route::parse("/schedule"), Route::Schedule);
        assert_eq!(
            Route::parse("/posts/abc"),
            Route::NotFound("/posts/abc".to_string())
        );
        assert!(matches!(Route::parse("/admin"), Route::NotFound(_)));
    }

    #[test]
    fn test_layout_hidden_on_auth_pages() {
        assert!(!Route::Login.shows_layout());
        assert!(!Route::Register.shows_layout());
        assert!(Route::Home.shows_layout());
        assert!(Route::PostDetail(1).shows_layout());
    }

    #[test]
    fn test_location_parse_and_display() {
        let location = Location::parse("/board?page=3&boardId=2", None);
        assert_eq!(location.path(), "/board");
        assert_eq!(location.page(), 3);
        assert_eq!(location.board_id(), Some(2));
        assert_eq!(location.to_string(), "/board?page=3&boardId=2");
    }

    #[test]
    fn test_relative_query_keeps_path() {
        let current = Location::parse("/board?page=1", None);
        let next = Location::parse("?page=4", Some(&current));
        assert_eq!(next.to_string(), "/board?page=4");
    }

    #[test]
    fn test_page_defaults_to_zero() {
        assert_eq!(Location::new("/board").page(), 0);
        assert_eq!(Location::parse("/board?page=abc", None).page(), 0);
        assert_eq!(Location::parse("/board?page=-2", None).page(), 0);
    }

    #[test]
    fn test_set_replaces_value() {
        let mut location = Location::new("/board").with_query("page", "1");
        location.set("page", "2");
        assert_eq!(location.to_string(), "/board?page=2");
    }

    #[test]
    fn test_query_values_are_encoded() {
        let location = Location::new("/search").with_query("q", "a b&c");
        assert_eq!(location.to_string(), "/search?q=a%20b%26c");
        let parsed = Location::parse(&location.to_string(), None);
        assert_eq!(parsed.get("q"), Some("a b&c"));
    }
}
