//! Schedule screen: a month calendar.

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use super::common::ScreenContext;
use super::ScreenResult;
use crate::Result;

/// Schedule screen handler.
pub struct ScheduleScreen;

impl ScheduleScreen {
    /// Show the current month in the configured timezone.
    pub async fn run(ctx: &mut ScreenContext) -> Result<ScreenResult> {
        let today = match ctx.config.display.timezone.parse::<Tz>() {
            Ok(tz) => Utc::now().with_timezone(&tz).date_naive(),
            Err(_) => Utc::now().date_naive(),
        };

        ctx.send_line("").await?;
        let title = ctx.i18n.t_with(
            "schedule.title",
            &[
                ("year", &today.year().to_string()),
                ("month", &today.month().to_string()),
            ],
        );
        ctx.send_line(&format!("=== {title} ===")).await?;
        let weekdays = ctx.i18n.t("schedule.weekdays").to_string();
        ctx.send_line(&weekdays).await?;
        for line in month_grid(today.year(), today.month(), Some(today.day())) {
            ctx.send_line(&line).await?;
        }

        loop {
            let Some(input) = ctx.prompt_key("common.menu_prompt").await? else {
                return Ok(ScreenResult::Quit);
            };
            if let Some(result) = ctx.header_command(&input).await? {
                return Ok(result);
            }
            ctx.alert_key("common.invalid_input").await?;
        }
    }
}

/// Calendar rows for a month, weeks starting on Sunday.
///
/// Each day takes four columns; `today` is wrapped in brackets.
pub fn month_grid(year: i32, month: u32, today: Option<u32>) -> Vec<String> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let days = next_month
        .map(|next| (next - first).num_days() as u32)
        .unwrap_or(31);

    let mut rows = Vec::new();
    let mut row = "    ".repeat(first.weekday().num_days_from_sunday() as usize);
    for day in 1..=days {
        if today == Some(day) {
            row.push_str(&format!("[{day:>2}]"));
        } else {
            row.push_str(&format!(" {day:>2} "));
        }
        if NaiveDate::from_ymd_opt(year, month, day)
            .is_some_and(|d| d.weekday().num_days_from_sunday() == 6)
        {
            rows.push(row.trim_end().to_string());
            row = String::new();
        }
    }
    if !row.is_empty() {
        rows.push(row.trim_end().to_string());
    }
    rows
}
