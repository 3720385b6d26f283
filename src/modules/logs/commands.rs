use super::gateway::LogSearchFilters;
use crate::error::ApiError;
use crate::modules::browse;
use crate::{Context, Error};
use poise::command;
use tracing::error;

const LOG_PAGE_SIZE: usize = 24;

/// Search logs.tf for match logs
#[command(slash_command)]
pub async fn get_logs(
    ctx: Context<'_>,
    #[description = "Match title to search for"] title: Option<String>,
    #[description = "Map name, full name"] map: Option<String>,
    #[description = "Uploader SteamID64"] uploader: Option<String>,
    #[description = "Player SteamID64"] player: Option<String>,
    #[description = "Maximum number of results"] limit: Option<u32>,
    #[description = "Result offset for older logs"] offset: Option<u32>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let filters = LogSearchFilters {
        title,
        map,
        uploader,
        player,
        limit,
        offset,
    };

    // an unfiltered search would be unbounded; require at least one filter
    if filters.is_empty() {
        ctx.say("❌ Provide at least one filter: title, map, uploader, or player.")
            .await?;
        return Ok(());
    }

    let logs = match ctx.data().logs.search(&filters).await {
        Ok(logs) => logs,
        Err(e) => {
            if let ApiError::Gateway { status, body } = &e {
                error!("logs.tf search failed: status {}: {}", status, body);
            }
            ctx.say("There was an error searching for logs. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    if logs.is_empty() {
        ctx.say("No logs found matching those filters.").await?;
        return Ok(());
    }

    let lines = logs
        .iter()
        .map(|log| {
            format!(
                "[{}]({}) | {} | {} players",
                log.title,
                log.url(),
                log.map,
                log.players
            )
        })
        .collect();

    browse::start_session(ctx, "Matching Logs", lines, LOG_PAGE_SIZE).await
}
