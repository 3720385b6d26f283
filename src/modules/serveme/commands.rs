use super::config::{config_name, ServerConfig};
use super::gateway::{ReservationRequest, ReservationUpdate, TimeWindow};
use super::record::ReservationRecord;
use super::region::{Region, DEFAULT_REGION};
use super::timestamp;
use crate::error::ApiError;
use crate::modules::browse;
use crate::{Context, Error};
use poise::command;
use poise::serenity_prelude::{Colour, CreateEmbed};
use poise::CreateReply;
use tracing::error;

const SERVER_PAGE_SIZE: usize = 10;

/// Converts a gateway failure into the user-facing reply for it. Raw detail
/// goes to the log; only rejected updates carry the remote body back to the
/// user, since that is where the actionable reason lives.
async fn report_failure(ctx: Context<'_>, action: &str, err: ApiError) -> Result<(), Error> {
    let message = match err {
        ApiError::InvalidFormat => {
            "❌ Invalid date or time. Dates are `YYYY-MM-DD` and times are 24-hour `HH:MM`, \
             for example `2024-04-09` and `21:30`."
                .to_string()
        }
        ApiError::NotFound => "❌ That reservation could not be found.".to_string(),
        ApiError::UpdateRejected { status, body } => {
            format!("❌ The API rejected the update (status {}): {}", status, body)
        }
        ApiError::Gateway { status, body } => {
            error!("Gateway failure while {}: status {}: {}", action, status, body);
            format!("There was an error {}. Please try again later.", action)
        }
    };
    ctx.say(message).await?;
    Ok(())
}

fn reservation_embed(
    title: &str,
    record: &ReservationRecord,
    starts_at: String,
    ends_at: String,
    config_label: &str,
) -> CreateEmbed {
    CreateEmbed::new()
        .title(title.to_string())
        .colour(Colour::DARK_GREEN)
        .field("Reservation ID", record.field("id"), true)
        .field("Start Time", starts_at, true)
        .field("End Time", ends_at, true)
        .field("Server IP", record.server_field("ip_and_port"), true)
        .field("SDR IP", record.sdr_address(), true)
        .field("Password", record.field("password"), true)
        .field("STV Password", record.field("tv_password"), true)
        .field("Starting Map", record.field("first_map"), true)
        .field("Plugins Enabled", record.field("enable_plugins"), true)
        .field("Demos Enabled", record.field("enable_demos_tf"), true)
        .field("Auto End Enabled", record.field("auto_end"), true)
        .field("Selected Config", config_label.to_string(), true)
}

/// Reserve a server
#[command(slash_command)]
#[allow(clippy::too_many_arguments)]
pub async fn reserve_server(
    ctx: Context<'_>,
    #[description = "Region hosting the reservation"] region: Region,
    #[description = "Start date, YYYY-MM-DD"] start_date: String,
    #[description = "Start time, 24-hour HH:MM in the region's local time"] start_time: String,
    #[description = "End date, YYYY-MM-DD"] end_date: String,
    #[description = "End time, 24-hour HH:MM in the region's local time"] end_time: String,
    #[description = "Server password for players"] password: String,
    #[description = "STV spectator password"] stv_password: String,
    #[description = "RCON password (sent to you in a DM, cannot be changed later)"] rcon: String,
    #[description = "Starting map, full name"] map: String,
    #[description = "Server id from /find_servers"] server_id: i64,
    #[description = "Starting config"] config: ServerConfig,
    #[description = "Enable server plugins"] enable_plugins: bool,
    #[description = "Upload STV demos to demos.tf"] enable_demos: bool,
    #[description = "End the reservation automatically when the server empties"] auto_end: bool,
    #[description = "Run the demo recording check"] demo_check: bool,
) -> Result<(), Error> {
    ctx.defer().await?;

    // catch bad input before spending a remote call on it, and keep the
    // epochs for the rich display timestamps
    let start_epoch =
        match timestamp::epoch_seconds(&start_date, &start_time, region.offset_hours()) {
            Ok(epoch) => epoch,
            Err(e) => return report_failure(ctx, "reserving the server", e).await,
        };
    let end_epoch = match timestamp::epoch_seconds(&end_date, &end_time, region.offset_hours()) {
        Ok(epoch) => epoch,
        Err(e) => return report_failure(ctx, "reserving the server", e).await,
    };

    let request = ReservationRequest {
        window: TimeWindow {
            start_date,
            start_time,
            end_date,
            end_time,
        },
        server_id,
        server_config_id: Some(config.id()),
        password,
        stv_password,
        rcon,
        first_map: map,
        enable_plugins,
        enable_demos,
        auto_end,
        demo_check,
    };

    let record = match ctx
        .data()
        .serveme
        .create_reservation(region, &request)
        .await
    {
        Ok(record) => record,
        Err(e) => return report_failure(ctx, "reserving the server", e).await,
    };

    if let Some(errors) = record.errors() {
        ctx.say(format!("❌ The reservation was rejected: {}", errors))
            .await?;
        return Ok(());
    }

    let embed = reservation_embed(
        "Server Reservation Successful",
        &record,
        timestamp::discord_format(start_epoch, "F"),
        timestamp::discord_format(end_epoch, "F"),
        config_name(config.id()),
    );
    ctx.send(CreateReply::default().embed(embed)).await?;

    // RCON goes out over DM only, never in the public response
    let dm = ctx
        .author()
        .create_dm_channel(ctx.serenity_context())
        .await?;
    dm.id
        .say(
            &ctx.serenity_context().http,
            format!(
                "**RCON Information**\nRCON Address: {}\nRCON Password: {}",
                record.server_field("ip_and_port"),
                record.field("rcon")
            ),
        )
        .await?;

    Ok(())
}

/// Find available servers for a time window
#[command(slash_command)]
pub async fn find_servers(
    ctx: Context<'_>,
    #[description = "Region to search"] region: Region,
    #[description = "Start date, YYYY-MM-DD"] start_date: String,
    #[description = "Start time, 24-hour HH:MM in the region's local time"] start_time: String,
    #[description = "End date, YYYY-MM-DD"] end_date: String,
    #[description = "End time, 24-hour HH:MM in the region's local time"] end_time: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let window = TimeWindow {
        start_date,
        start_time,
        end_date,
        end_time,
    };
    let servers = match ctx.data().serveme.find_servers(region, &window).await {
        Ok(servers) => servers,
        Err(e) => return report_failure(ctx, "finding servers", e).await,
    };

    if servers.is_empty() {
        ctx.say("No servers found matching the criteria.").await?;
        return Ok(());
    }

    let lines = servers
        .iter()
        .map(|s| {
            format!(
                "**{}** (ID: {}) | {} | `{}`",
                s.name, s.id, s.location, s.ip_and_port
            )
        })
        .collect();

    browse::start_session(ctx, "Available Servers", lines, SERVER_PAGE_SIZE).await
}

/// Update an existing reservation
#[command(slash_command)]
#[allow(clippy::too_many_arguments)]
pub async fn update_reservation(
    ctx: Context<'_>,
    #[description = "Reservation id from /reserve_server"] reservation_id: i64,
    #[description = "Region the reservation was made in (defaults to US Eastern)"] region: Option<
        Region,
    >,
    #[description = "New server id"] server_id: Option<i64>,
    #[description = "New start date, YYYY-MM-DD"] start_date: Option<String>,
    #[description = "New start time, 24-hour HH:MM"] start_time: Option<String>,
    #[description = "New end date, YYYY-MM-DD"] end_date: Option<String>,
    #[description = "New end time, 24-hour HH:MM"] end_time: Option<String>,
    #[description = "New server password"] password: Option<String>,
    #[description = "New STV password"] stv_password: Option<String>,
    #[description = "New starting map"] map: Option<String>,
    #[description = "New starting config"] config: Option<ServerConfig>,
    #[description = "Enable server plugins"] enable_plugins: Option<bool>,
    #[description = "Upload STV demos to demos.tf"] enable_demos: Option<bool>,
    #[description = "End the reservation automatically when the server empties"] auto_end: Option<
        bool,
    >,
) -> Result<(), Error> {
    ctx.defer().await?;

    let region = region.unwrap_or(DEFAULT_REGION);
    let update = ReservationUpdate {
        server_id,
        start_date,
        start_time,
        end_date,
        end_time,
        password,
        stv_password,
        first_map: map,
        server_config_id: config.map(|c| c.id()),
        enable_plugins,
        enable_demos,
        auto_end,
    };

    match ctx
        .data()
        .serveme
        .update_reservation(region, reservation_id, &update)
        .await
    {
        Ok(record) => {
            let config_label = record.config_id().map(config_name).unwrap_or("Unknown Config");
            let embed = reservation_embed(
                "Server Reservation Updated Successfully",
                &record,
                record.field("starts_at"),
                record.field("ends_at"),
                config_label,
            );
            ctx.send(CreateReply::default().embed(embed)).await?;
            Ok(())
        }
        Err(e) => report_failure(ctx, "updating the reservation", e).await,
    }
}

/// Show the API's prefilled reservation defaults
#[command(slash_command, ephemeral)]
pub async fn test_reservation(
    ctx: Context<'_>,
    #[description = "Region to query (defaults to US Eastern)"] region: Option<Region>,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let region = region.unwrap_or(DEFAULT_REGION);
    match ctx.data().serveme.prefilled_template(region).await {
        Ok(record) => {
            let embed = CreateEmbed::new()
                .title("Prefilled Reservation Details")
                .colour(Colour::DARK_GREEN)
                .field("Start Time", record.field("starts_at"), true)
                .field("End Time", record.field("ends_at"), true)
                .field("Server ID", record.field("server_id"), true)
                .field("Map", record.field("first_map"), true)
                .field("RCON Password", record.field("rcon"), false)
                .field("TV Password", record.field("tv_password"), false);
            ctx.send(CreateReply::default().embed(embed)).await?;
            Ok(())
        }
        Err(e) => report_failure(ctx, "fetching the prefilled reservation", e).await,
    }
}
