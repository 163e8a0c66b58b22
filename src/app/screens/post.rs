//! Post detail and editor screens.

use std::sync::Arc;

use super::common::ScreenContext;
use super::ScreenResult;
use crate::route::Location;
use crate::views::editor;
use crate::views::{PostDetailView, PostEditor};
use crate::{Result, StudylogError};

/// Post detail screen.
pub struct PostScreen;

impl PostScreen {
    /// Show a post with its comments.
    pub async fn run_detail(
        ctx: &mut ScreenContext,
        location: &Location,
        post_id: i64,
    ) -> Result<ScreenResult> {
        let api = Arc::clone(&ctx.api);
        let mut view = PostDetailView::new(&*api, post_id, location.page());

        if !view.load(&ctx.session).await {
            ctx.alert_key("post.load_failed").await?;
            return Ok(ScreenResult::Navigate(view.back_location()));
        }

        loop {
            Self::render(ctx, &view).await?;

            let key = if view.edit_location().is_some() {
                "post.commands_admin"
            } else {
                "post.commands"
            };
            let Some(input) = ctx.prompt_key(key).await? else {
                view.unmount();
                return Ok(ScreenResult::Quit);
            };
            if let Some(result) = ctx.header_command(&input).await? {
                view.unmount();
                return Ok(result);
            }

            match input.to_ascii_lowercase().as_str() {
                "" | "r" => {
                    view.unmount();
                    return Ok(ScreenResult::Navigate(view.back_location()));
                }
                "e" => match view.edit_location() {
                    Some(target) => {
                        view.unmount();
                        return Ok(ScreenResult::Navigate(target));
                    }
                    None => ctx.alert_key("common.invalid_input").await?,
                },
                "c" => {
                    let Some(content) = ctx.prompt_key("post.comment_prompt").await? else {
                        view.unmount();
                        return Ok(ScreenResult::Quit);
                    };
                    view.set_draft(content);
                    match view.submit_comment(&ctx.session).await {
                        Ok(true) => ctx.send_key("post.comment_posted").await?,
                        Ok(false) => ctx.alert_key("post.comment_failed").await?,
                        Err(StudylogError::LoginRequired) => {
                            view.unmount();
                            return ctx.require_login().await;
                        }
                        Err(_) => ctx.alert_key("post.comment_empty").await?,
                    }
                }
                _ => ctx.alert_key("common.invalid_input").await?,
            }
        }
    }

    async fn render<A>(ctx: &mut ScreenContext, view: &PostDetailView<'_, A>) -> Result<()>
    where
        A: crate::api::BoardApi + ?Sized,
    {
        let Some(post) = view.post() else {
            return Ok(());
        };

        let rule = ctx.rule();
        ctx.send_line("").await?;
        ctx.send_line(&format!("=== {} ===", post.title)).await?;
        let meta = ctx.i18n.t_with(
            "post.meta",
            &[
                ("author", &post.author_name),
                ("date", &ctx.format_date(&post.created_at)),
                ("views", &post.view_count.to_string()),
            ],
        );
        ctx.send_line(&meta).await?;
        ctx.send_line(&rule).await?;
        for line in post.content.lines() {
            ctx.send_line(line).await?;
        }
        ctx.send_line(&rule).await?;

        let heading = ctx.i18n.t_with(
            "post.comments",
            &[("count", &view.comments().len().to_string())],
        );
        ctx.send_line(&heading).await?;
        if view.comments().is_empty() {
            ctx.send_key("post.no_comments").await?;
        }
        for comment in view.comments() {
            let author = comment
                .author
                .clone()
                .or_else(|| comment.author_id.map(|id| format!("#{id}")))
                .unwrap_or_default();
            let date = ctx.format_date(&comment.created_at);
            ctx.send_line(&format!("  - {author} ({date}): {}", comment.content))
                .await?;
        }
        Ok(())
    }

    /// New post form. The board comes from `boardId` or is asked for.
    pub async fn run_create(ctx: &mut ScreenContext, location: &Location) -> Result<ScreenResult> {
        if !ctx.session.is_logged_in() {
            return ctx.require_login().await;
        }

        ctx.send_line("").await?;
        let title = ctx.i18n.t("post.create_title").to_string();
        ctx.send_line(&format!("=== {title} ===")).await?;

        let board_id = match location.board_id() {
            Some(id) => id,
            None => {
                let Some(input) = ctx.prompt_key("post.board_prompt").await? else {
                    return Ok(ScreenResult::Quit);
                };
                match input.parse() {
                    Ok(id) => id,
                    Err(_) => {
                        ctx.alert_key("common.invalid_input").await?;
                        return Ok(ScreenResult::Navigate(Location::new("/board")));
                    }
                }
            }
        };

        let Some((title, content)) = Self::read_form(ctx).await? else {
            return Ok(ScreenResult::Navigate(Location::new("/board")));
        };

        let api = Arc::clone(&ctx.api);
        match editor::create(&*api, board_id, &title, &content, &ctx.session).await {
            Ok(target) => {
                ctx.send_key("post.created").await?;
                Ok(ScreenResult::Navigate(target))
            }
            Err(StudylogError::LoginRequired) => ctx.require_login().await,
            Err(StudylogError::Validation(_)) => {
                ctx.alert_key("post.fields_required").await?;
                Ok(ScreenResult::Navigate(location.clone()))
            }
            Err(_) => {
                ctx.alert_key("post.save_failed").await?;
                Ok(ScreenResult::Navigate(Location::new("/board")))
            }
        }
    }

    /// Edit form for admins.
    pub async fn run_edit(ctx: &mut ScreenContext, post_id: i64) -> Result<ScreenResult> {
        let api = Arc::clone(&ctx.api);
        let detail = Location::new(format!("/posts/{post_id}"));

        let mut post_editor = match PostEditor::load_for_edit(&*api, post_id, &ctx.session).await {
            Ok(post_editor) => post_editor,
            Err(StudylogError::LoginRequired) => {
                ctx.alert_key("post.admin_only").await?;
                return Ok(ScreenResult::Navigate(detail));
            }
            Err(_) => {
                ctx.alert_key("post.load_failed").await?;
                return Ok(ScreenResult::Navigate(detail));
            }
        };

        ctx.send_line("").await?;
        let heading = ctx.i18n.t("post.edit_title").to_string();
        ctx.send_line(&format!("=== {heading} ===")).await?;
        let current = ctx
            .i18n
            .t_with("post.current_title", &[("title", &post_editor.post().title)]);
        ctx.send_line(&current).await?;

        let Some((title, content)) = Self::read_form(ctx).await? else {
            return Ok(ScreenResult::Navigate(detail));
        };

        match post_editor.save(&title, &content).await {
            Ok(target) => {
                ctx.send_key("post.updated").await?;
                Ok(ScreenResult::Navigate(target))
            }
            Err(StudylogError::Validation(_)) => {
                ctx.alert_key("post.fields_required").await?;
                Ok(ScreenResult::Navigate(detail))
            }
            Err(_) => {
                ctx.alert_key("post.save_failed").await?;
                Ok(ScreenResult::Navigate(detail))
            }
        }
    }

    async fn read_form(ctx: &mut ScreenContext) -> Result<Option<(String, String)>> {
        let Some(title) = ctx.prompt_key("post.title_prompt").await? else {
            return Ok(None);
        };
        ctx.send_key("post.content_prompt").await?;
        let Some(content) = ctx.read_multiline().await? else {
            return Ok(None);
        };
        Ok(Some((title, content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeBoardApi, FakeUserDirectory};
    use crate::app::screens::common::testing::{context, output};
    use crate::session::{SessionStore, SessionUser};

    fn session(role: &str) -> SessionStore {
        let mut store = SessionStore::in_memory();
        store
            .set(SessionUser {
                id: "8".to_string(),
                name: "choi".to_string(),
                email: "choi@example.com".to_string(),
                role: role.to_string(),
            })
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_comment_then_back() {
        let api = Arc::new(FakeBoardApi::with_posts(5));
        let (mut ctx, out) = context(
            "c\ngreat notes\nr\n",
            Arc::clone(&api),
            Arc::new(FakeUserDirectory::default()),
            session("user"),
        );

        let result = PostScreen::run_detail(&mut ctx, &Location::parse("/posts/4?page=2", None), 4)
            .await
            .unwrap();

        assert_eq!(
            result,
            ScreenResult::Navigate(Location::parse("/board?page=2", None))
        );
        assert_eq!(api.comments.lock().unwrap().len(), 1);
        let text = output(ctx, out).await;
        assert!(text.contains("great notes"));
        assert!(text.contains("Comments (1)"));
    }

    #[tokio::test]
    async fn test_comment_without_login_goes_to_login() {
        let api = Arc::new(FakeBoardApi::with_posts(5));
        let (mut ctx, _out) = context(
            "c\nhello\n",
            Arc::clone(&api),
            Arc::new(FakeUserDirectory::default()),
            SessionStore::in_memory(),
        );

        let result = PostScreen::run_detail(&mut ctx, &Location::new("/posts/1"), 1)
            .await
            .unwrap();

        assert_eq!(result, ScreenResult::Navigate(Location::new("/login")));
        assert_eq!(api.count_calls("POST"), 0);
    }

    #[tokio::test]
    async fn test_edit_command_only_for_admin() {
        let api = Arc::new(FakeBoardApi::with_posts(5));
        let (mut ctx, _out) = context(
            "e\n",
            Arc::clone(&api),
            Arc::new(FakeUserDirectory::default()),
            session("admin"),
        );

        let result = PostScreen::run_detail(&mut ctx, &Location::new("/posts/2"), 2)
            .await
            .unwrap();
        assert_eq!(result, ScreenResult::Navigate(Location::new("/post/edit/2")));
    }

    #[tokio::test]
    async fn test_create_post_in_board() {
        let api = Arc::new(FakeBoardApi::with_posts(2));
        let (mut ctx, _out) = context(
            "Lifetimes\nfirst line\nsecond line\n.\n",
            Arc::clone(&api),
            Arc::new(FakeUserDirectory::default()),
            session("user"),
        );

        let result = PostScreen::run_create(
            &mut ctx,
            &Location::parse("/posts/create?boardId=2", None),
        )
        .await
        .unwrap();

        assert_eq!(result, ScreenResult::Navigate(Location::new("/posts/3")));
        let posts = api.posts.lock().unwrap();
        assert_eq!(posts[2].content, "first line\nsecond line");
        assert_eq!(posts[2].board_id, Some(2));
    }

    #[tokio::test]
    async fn test_edit_rejected_for_member() {
        let api = Arc::new(FakeBoardApi::with_posts(2));
        let (mut ctx, _out) = context(
            "",
            Arc::clone(&api),
            Arc::new(FakeUserDirectory::default()),
            session("user"),
        );

        let result = PostScreen::run_edit(&mut ctx, 1).await.unwrap();
        assert_eq!(result, ScreenResult::Navigate(Location::new("/posts/1")));
        assert_eq!(api.count_calls("PUT"), 0);
    }
}
