//! My-page screen.

use std::sync::Arc;

use super::common::ScreenContext;
use super::ScreenResult;
use crate::route::Location;
use crate::views::mypage::{comment_location, post_location, MyPage};
use crate::{Result, StudylogError};

/// My-page screen handler.
pub struct MyPageScreen;

impl MyPageScreen {
    /// Run the my-page screen.
    pub async fn run(ctx: &mut ScreenContext) -> Result<ScreenResult> {
        let api = Arc::clone(&ctx.api);
        let users = Arc::clone(&ctx.users);

        let page = match MyPage::load(&*api, &*users, &ctx.session).await {
            Ok(page) => page,
            Err(StudylogError::LoginRequired) => return ctx.require_login().await,
            Err(_) => {
                ctx.alert_key("mypage.load_failed").await?;
                return Ok(ScreenResult::Navigate(Location::new("/")));
            }
        };

        // Posts first, then comments; one numbering across both.
        let mut targets: Vec<Location> = Vec::new();

        ctx.send_line("").await?;
        let title = ctx.i18n.t("mypage.title").to_string();
        ctx.send_line(&format!("=== {title} ===")).await?;
        for (key, value) in [
            ("mypage.name", &page.profile.name),
            ("mypage.email", &page.profile.email),
            ("mypage.role", &page.profile.role),
        ] {
            let label = ctx.i18n.t(key).to_string();
            ctx.send_line(&format!("  {label}: {value}")).await?;
        }

        let heading = ctx
            .i18n
            .t_with("mypage.posts", &[("count", &page.posts.len().to_string())]);
        ctx.send_line(&heading).await?;
        for post in &page.posts {
            targets.push(post_location(post));
            let date = ctx.format_date(&post.created_at);
            ctx.send_line(&format!("  {:>3}. {} ({date})", targets.len(), post.title))
                .await?;
        }

        let heading = ctx.i18n.t_with(
            "mypage.comments",
            &[("count", &page.comments.len().to_string())],
        );
        ctx.send_line(&heading).await?;
        for comment in &page.comments {
            let Some(target) = comment_location(comment) else {
                ctx.send_line(&format!("    -. {}", comment.content)).await?;
                continue;
            };
            targets.push(target);
            ctx.send_line(&format!("  {:>3}. {}", targets.len(), comment.content))
                .await?;
        }

        loop {
            let Some(input) = ctx.prompt_key("mypage.commands").await? else {
                return Ok(ScreenResult::Quit);
            };
            if let Some(result) = ctx.header_command(&input).await? {
                return Ok(result);
            }
            let selected = input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| targets.get(i));
            match selected {
                Some(target) => return Ok(ScreenResult::Navigate(target.clone())),
                None => ctx.alert_key("common.invalid_input").await?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{post, FakeBoardApi, FakeUserDirectory};
    use crate::app::screens::common::testing::context;
    use crate::board::Comment;
    use crate::session::{SessionStore, SessionUser};

    #[tokio::test]
    async fn test_requires_login() {
        let (mut ctx, _out) = context(
            "",
            Arc::new(FakeBoardApi::new()),
            Arc::new(FakeUserDirectory::default()),
            SessionStore::in_memory(),
        );
        let result = MyPageScreen::run(&mut ctx).await.unwrap();
        assert_eq!(result, ScreenResult::Navigate(Location::new("/login")));
    }

    #[tokio::test]
    async fn test_select_comment_opens_its_post() {
        let api = Arc::new(FakeBoardApi::new());
        *api.posts.lock().unwrap() = vec![post(1, 1, "kim"), post(2, 1, "lee")];
        *api.comments.lock().unwrap() = vec![Comment {
            id: Some(1),
            post_id: Some(2),
            author_id: Some(3),
            author: Some("kim".to_string()),
            content: "agreed".to_string(),
            created_at: String::new(),
        }];
        let users = Arc::new(FakeUserDirectory::with_user(
            "3",
            "kim",
            "kim@example.com",
            "pw",
            "user",
        ));
        let mut session = SessionStore::in_memory();
        session
            .set(SessionUser {
                id: "3".to_string(),
                name: "kim".to_string(),
                email: "kim@example.com".to_string(),
                role: "user".to_string(),
            })
            .unwrap();

        let (mut ctx, _out) = context("2\n", api, users, session);
        let result = MyPageScreen::run(&mut ctx).await.unwrap();
        assert_eq!(result, ScreenResult::Navigate(Location::new("/posts/2")));
    }
}
