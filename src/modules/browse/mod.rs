//! Paginated result messages: rendering, navigation buttons, and the
//! per-message session lifecycle.

pub mod handler;
pub mod task;

use poise::serenity_prelude::{ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed};

use crate::paginator::{Page, PageSession};

pub const PREV_BUTTON: &str = "browse_prev";
pub const NEXT_BUTTON: &str = "browse_next";

pub fn render(session: &PageSession) -> CreateEmbed {
    let view = session.current();
    CreateEmbed::new()
        .title(format!("{} (Page {})", session.title, session.page_index + 1))
        .description(view.items.join("\n"))
        .colour(Colour::BLUE)
}

pub fn nav_row(view: &Page<'_, String>) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(PREV_BUTTON)
            .style(ButtonStyle::Secondary)
            .emoji('⬅')
            .disabled(!view.has_previous),
        CreateButton::new(NEXT_BUTTON)
            .style(ButtonStyle::Secondary)
            .emoji('➡')
            .disabled(!view.has_next),
    ])
}

pub fn disabled_nav_row() -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(PREV_BUTTON)
            .style(ButtonStyle::Secondary)
            .emoji('⬅')
            .disabled(true),
        CreateButton::new(NEXT_BUTTON)
            .style(ButtonStyle::Secondary)
            .emoji('➡')
            .disabled(true),
    ])
}

/// Sends the first page of a result list and registers its navigation
/// session. The sweep task withdraws navigation once the session idles out.
pub async fn start_session(
    ctx: crate::Context<'_>,
    title: impl Into<String>,
    lines: Vec<String>,
    page_size: usize,
) -> Result<(), crate::Error> {
    let session = PageSession::new(
        ctx.author().id.get(),
        ctx.channel_id().get(),
        title.into(),
        lines,
        page_size,
    );
    let view = session.current();

    let reply = poise::CreateReply::default()
        .embed(render(&session))
        .components(vec![nav_row(&view)]);
    let handle = ctx.send(reply).await?;
    let message = handle.message().await?;

    ctx.data().pages.insert(message.id.get(), session);
    Ok(())
}
