use crate::error::ApiError;
use crate::{Context, Error};
use poise::command;
use poise::serenity_prelude::{Colour, CreateEmbed};
use poise::CreateReply;
use tracing::error;

const DEFAULT_LIMIT: u32 = 5;

/// Get recent demos.tf uploads for a player
#[command(slash_command)]
pub async fn get_demos(
    ctx: Context<'_>,
    #[description = "Player SteamID64"] steam_id: String,
    #[description = "Maximum number of results (default 5)"] limit: Option<u32>,
) -> Result<(), Error> {
    ctx.defer().await?;

    if steam_id.trim().is_empty() {
        ctx.say("❌ Provide a SteamID64 to look up.").await?;
        return Ok(());
    }

    let demos = match ctx
        .data()
        .demos
        .recent(steam_id.trim(), limit.unwrap_or(DEFAULT_LIMIT))
        .await
    {
        Ok(demos) => demos,
        Err(e) => {
            if let ApiError::Gateway { status, body } = &e {
                error!("demos.tf lookup failed: status {}: {}", status, body);
            }
            ctx.say("There was an error fetching demos. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    if demos.is_empty() {
        ctx.say(format!("No demos found for `{}`.", steam_id.trim()))
            .await?;
        return Ok(());
    }

    let lines: Vec<String> = demos
        .iter()
        .map(|demo| format!("[{}]({}) | {}", demo.name, demo.page_url(), demo.map))
        .collect();

    let embed = CreateEmbed::new()
        .title(format!("Recent Demos for {}", steam_id.trim()))
        .colour(Colour::BLUE)
        .description(lines.join("\n"));
    ctx.send(CreateReply::default().embed(embed)).await?;

    Ok(())
}
