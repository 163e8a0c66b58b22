//! Common utilities for screen handlers.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::info;

use super::ScreenResult;
use crate::api::{BoardApi, UserDirectory};
use crate::config::Config;
use crate::i18n::I18n;
use crate::route::Location;
use crate::session::SessionStore;
use crate::views::{HeaderState, MenuItem};
use crate::Result;

/// Maximum number of lines in multiline input.
pub const MAX_MULTILINE_LINES: usize = 1000;

type Reader = Box<dyn AsyncBufRead + Unpin + Send>;
type Writer = Box<dyn AsyncWrite + Unpin + Send>;

/// Line-oriented terminal.
pub struct Console {
    reader: Reader,
    writer: Writer,
}

impl Console {
    /// Console over an arbitrary reader and writer.
    pub fn new<R, W>(reader: R, writer: W) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        Self {
            reader: Box::new(reader),
            writer: Box::new(writer),
        }
    }

    /// Console on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }

    /// Write text without a newline.
    pub async fn send(&mut self, data: &str) -> Result<()> {
        self.writer.write_all(data.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Write a line.
    pub async fn send_line(&mut self, data: &str) -> Result<()> {
        self.send(&format!("{data}\n")).await
    }

    /// Read one line without its terminator. `None` at end of input.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Shared context for screen handlers.
pub struct ScreenContext {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Application backend.
    pub api: Arc<dyn BoardApi>,
    /// User directory.
    pub users: Arc<dyn UserDirectory>,
    /// Current i18n instance.
    pub i18n: Arc<I18n>,
    /// Session record owner.
    pub session: SessionStore,
    console: Console,
}

impl ScreenContext {
    /// Create a new screen context.
    pub fn new(
        config: Arc<Config>,
        api: Arc<dyn BoardApi>,
        users: Arc<dyn UserDirectory>,
        i18n: Arc<I18n>,
        session: SessionStore,
        console: Console,
    ) -> Self {
        Self {
            config,
            api,
            users,
            i18n,
            session,
            console,
        }
    }

    pub async fn send(&mut self, data: &str) -> Result<()> {
        self.console.send(data).await
    }

    pub async fn send_line(&mut self, data: &str) -> Result<()> {
        self.console.send_line(data).await
    }

    /// Send a translated line.
    pub async fn send_key(&mut self, key: &str) -> Result<()> {
        let text = self.i18n.t(key).to_string();
        self.console.send_line(&text).await
    }

    /// Show a message the user must notice.
    pub async fn alert(&mut self, message: &str) -> Result<()> {
        self.console.send_line(&format!("! {message}")).await
    }

    /// Alert with a translated message.
    pub async fn alert_key(&mut self, key: &str) -> Result<()> {
        let text = self.i18n.t(key).to_string();
        self.alert(&text).await
    }

    pub async fn read_line(&mut self) -> Result<Option<String>> {
        self.console.read_line().await
    }

    /// Print `label: ` and read the answer, trimmed.
    pub async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.console.send(&format!("{label}: ")).await?;
        Ok(self.console.read_line().await?.map(|s| s.trim().to_string()))
    }

    /// Prompt with a translated label.
    pub async fn prompt_key(&mut self, key: &str) -> Result<Option<String>> {
        let label = self.i18n.t(key).to_string();
        self.prompt(&label).await
    }

    /// Ask a yes/no question; anything but `y` is no.
    pub async fn confirm(&mut self, question: &str) -> Result<bool> {
        let suffix = self.i18n.t("common.yes_no").to_string();
        let answer = self.prompt(&format!("{question} {suffix}")).await?;
        Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("y")))
    }

    /// Read lines until a line containing only ".".
    ///
    /// Returns `None` if the user cancels with "/c" or input ends.
    pub async fn read_multiline(&mut self) -> Result<Option<String>> {
        let mut lines = Vec::new();

        loop {
            self.console.send("> ").await?;
            let Some(line) = self.console.read_line().await? else {
                return Ok(None);
            };
            let trimmed = line.trim();

            if trimmed == "." {
                break;
            }
            if trimmed.eq_ignore_ascii_case("/c") || trimmed.eq_ignore_ascii_case("/cancel") {
                self.send_key("common.input_cancelled").await?;
                return Ok(None);
            }
            if lines.len() >= MAX_MULTILINE_LINES {
                let text = self.i18n.t_with(
                    "common.too_many_lines",
                    &[("max", &MAX_MULTILINE_LINES.to_string())],
                );
                self.send_line(&text).await?;
                return Ok(None);
            }

            lines.push(line);
        }

        Ok(Some(lines.join("\n")))
    }

    /// Separator line as wide as the terminal.
    pub fn rule(&self) -> String {
        "-".repeat(self.config.terminal.width)
    }

    /// Format a backend timestamp with the configured timezone.
    pub fn format_date(&self, timestamp: &str) -> String {
        crate::datetime::format_datetime(
            timestamp,
            &self.config.display.timezone,
            &self.config.display.date_format,
        )
    }

    /// Render the header menu.
    pub async fn render_header(&mut self) -> Result<()> {
        let header = HeaderState::from_session(&self.session);
        let entries: Vec<String> = header
            .menu()
            .iter()
            .map(|item| format!("[{}] {}", item.key().to_uppercase(), self.i18n.t(item.label_key())))
            .collect();
        let line = format!("StudyLog | {} | [Q] {}", entries.join(" "), self.i18n.t("menu.quit"));
        self.send_line("").await?;
        self.send_line(&line).await?;
        let rule = self.rule();
        self.send_line(&rule).await
    }

    /// Interpret input as a header command.
    ///
    /// Returns the screen result for a menu key or `q`, and `None` for
    /// anything else. Logout clears the session here.
    pub async fn header_command(&mut self, input: &str) -> Result<Option<ScreenResult>> {
        if input.eq_ignore_ascii_case("q") {
            return Ok(Some(ScreenResult::Quit));
        }
        let header = HeaderState::from_session(&self.session);
        let Some(item) = header.select(input) else {
            return Ok(None);
        };
        if item == MenuItem::Logout {
            crate::auth::logout(&mut self.session)?;
            info!("Logged out");
            self.send_key("auth.logged_out").await?;
        }
        Ok(Some(ScreenResult::Navigate(item.target())))
    }

    /// Alert that a login is needed and navigate to the login page.
    pub async fn require_login(&mut self) -> Result<ScreenResult> {
        self.alert_key("common.login_required").await?;
        Ok(ScreenResult::Navigate(Location::new("/login")))
    }
}
