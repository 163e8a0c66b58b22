//! Login and registration screens.

use std::sync::Arc;

use super::common::ScreenContext;
use super::ScreenResult;
use crate::auth::{login, register, RegistrationError, RegistrationForm};
use crate::route::Location;
use crate::Result;

/// Login and registration screen handler.
pub struct AuthScreen;

impl AuthScreen {
    /// Login form. Empty email goes back home, `/register` switches forms.
    pub async fn run_login(ctx: &mut ScreenContext) -> Result<ScreenResult> {
        let users = Arc::clone(&ctx.users);

        loop {
            ctx.send_line("").await?;
            let title = ctx.i18n.t("auth.login_title").to_string();
            ctx.send_line(&format!("=== {title} ===")).await?;
            ctx.send_key("auth.login_hint").await?;

            let Some(email) = ctx.prompt_key("auth.email").await? else {
                return Ok(ScreenResult::Quit);
            };
            if email.is_empty() {
                return Ok(ScreenResult::Navigate(Location::new("/")));
            }
            if email.eq_ignore_ascii_case("/register") {
                return Ok(ScreenResult::Navigate(Location::new("/register")));
            }
            let Some(password) = ctx.prompt_key("auth.password").await? else {
                return Ok(ScreenResult::Quit);
            };

            match login(&*users, &mut ctx.session, &email, &password).await {
                Ok(user) => {
                    let welcome = ctx.i18n.t_with("auth.login_success", &[("name", &user.name)]);
                    ctx.send_line(&welcome).await?;
                    return Ok(ScreenResult::Navigate(Location::new("/")));
                }
                Err(e) => ctx.alert_key(e.message_key()).await?,
            }
        }
    }

    /// Registration form. Inline errors keep the user on the form.
    pub async fn run_register(ctx: &mut ScreenContext) -> Result<ScreenResult> {
        let users = Arc::clone(&ctx.users);

        loop {
            ctx.send_line("").await?;
            let title = ctx.i18n.t("auth.register_title").to_string();
            ctx.send_line(&format!("=== {title} ===")).await?;
            ctx.send_key("auth.register_hint").await?;

            let mut fields = Vec::with_capacity(4);
            for key in [
                "auth.fields.email",
                "auth.fields.password",
                "auth.fields.confirm_password",
                "auth.fields.name",
            ] {
                let Some(value) = ctx.prompt_key(key).await? else {
                    return Ok(ScreenResult::Quit);
                };
                if fields.is_empty() && value.eq_ignore_ascii_case("/login") {
                    return Ok(ScreenResult::Navigate(Location::new("/login")));
                }
                fields.push(value);
            }
            let [email, password, confirm, name]: [String; 4] = match fields.try_into() {
                Ok(fields) => fields,
                Err(_) => continue,
            };

            let form = RegistrationForm::new(email, password, confirm, name);
            match register(&*users, form).await {
                Ok(_) => {
                    ctx.send_key("auth.register_success").await?;
                    return Ok(ScreenResult::Navigate(Location::new("/login")));
                }
                Err(e) => {
                    let message = match &e {
                        RegistrationError::EmptyField(field) => {
                            let label = ctx.i18n.t(&format!("auth.fields.{field}")).to_string();
                            ctx.i18n.t_with(e.message_key(), &[("field", &label)])
                        }
                        _ => ctx.i18n.t(e.message_key()).to_string(),
                    };
                    if e.is_inline() {
                        ctx.send_line(&format!("  {message}")).await?;
                    } else {
                        ctx.alert(&message).await?;
                    }
                }
            }
        }
    }
}
