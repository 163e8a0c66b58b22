//! Board management screen (admin).

use std::sync::Arc;

use super::common::ScreenContext;
use super::ScreenResult;
use crate::views::{BoardManager, MutationOutcome};
use crate::{Result, StudylogError};

/// Board management screen handler.
pub struct ManageScreen;

impl ManageScreen {
    /// Run the board management screen.
    pub async fn run(ctx: &mut ScreenContext) -> Result<ScreenResult> {
        let api = Arc::clone(&ctx.api);
        let mut manager = BoardManager::new(&*api);
        if !manager.load().await {
            ctx.alert_key("manage.load_failed").await?;
        }

        loop {
            ctx.send_line("").await?;
            let title = ctx.i18n.t("manage.title").to_string();
            ctx.send_line(&format!("=== {title} ===")).await?;
            if manager.boards().is_empty() {
                ctx.send_key("manage.empty").await?;
            }
            for (i, board) in manager.boards().iter().enumerate() {
                let marker = if manager.editing() == board.id { " *" } else { "" };
                ctx.send_line(&format!("  {:>3}. {}{marker}", i + 1, board.category))
                    .await?;
            }

            let Some(input) = ctx.prompt_key("manage.commands").await? else {
                return Ok(ScreenResult::Quit);
            };
            if let Some(result) = ctx.header_command(&input).await? {
                return Ok(result);
            }

            let (command, rest) = input.split_at(input.chars().next().map_or(0, char::len_utf8));
            let selected = rest
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| manager.boards().get(i))
                .and_then(|b| b.id);

            let outcome = match (command.to_ascii_lowercase().as_str(), selected) {
                ("n", _) => {
                    let Some(name) = ctx.prompt_key("manage.add_prompt").await? else {
                        return Ok(ScreenResult::Quit);
                    };
                    manager.add(&name).await
                }
                ("r", Some(id)) => {
                    manager.start_edit(id);
                    let Some(name) = ctx.prompt_key("manage.rename_prompt").await? else {
                        return Ok(ScreenResult::Quit);
                    };
                    if name.is_empty() {
                        manager.cancel_edit();
                        continue;
                    }
                    manager.save(id, &name).await
                }
                ("d", Some(id)) => {
                    let name = manager
                        .boards()
                        .iter()
                        .find(|b| b.id == Some(id))
                        .map(|b| b.category.clone())
                        .unwrap_or_default();
                    let question = ctx.i18n.t_with("manage.delete_confirm", &[("name", &name)]);
                    let accepted = ctx.confirm(&question).await?;
                    manager.delete(id, |_| accepted).await
                }
                _ => {
                    ctx.alert_key("common.invalid_input").await?;
                    continue;
                }
            };

            match outcome {
                Ok(MutationOutcome::Applied) => ctx.send_key("manage.saved").await?,
                Ok(MutationOutcome::Declined) => {}
                Ok(MutationOutcome::Failed) => ctx.alert_key("manage.failed").await?,
                Err(StudylogError::Validation(_)) => ctx.alert_key("manage.name_empty").await?,
                Err(e) => ctx.alert(&e.to_string()).await?,
            }
        }
    }
}
