use crate::{Context, Error};
use poise::command;
use poise::serenity_prelude::{Colour, CreateEmbed};
use poise::CreateReply;

/// Get the latency of the bot
#[command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;
    let latency = ctx.ping().await;
    let embed = CreateEmbed::new()
        .title("Pong!")
        .field("🏓", format!("{}ms", latency.as_millis()), true)
        .colour(Colour::DARK_TEAL);
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Explains every command parameter and how to format it
#[command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;
    let embed = CreateEmbed::new()
        .title("Help")
        .field(
            "Region",
            "Determines which serveme.tf deployment hosts the reservation and the UTC offset \
             applied to your times. US zones run on na.serveme.tf; Europe, Southeast Asia and \
             Australia have their own deployments.",
            true,
        )
        .field(
            "Start Date",
            "Provide the date for when the reservation should start. Provided in the format \
             YYYY-MM-DD. Example: 2024-04-09 for April 9th, 2024.",
            true,
        )
        .field(
            "Start Time",
            "Provide the time for when the reservation should start. Provided in a 24 hour \
             clock style, in the region's local time. Example: 21:30 for 9:30 PM.",
            true,
        )
        .field(
            "End Date",
            "Provide the date for when the reservation should end. Provided in the format \
             YYYY-MM-DD. Example: 2024-06-09 for June 9th, 2024.",
            true,
        )
        .field(
            "End Time",
            "Provide the time for when the reservation should end. Provided in a 24 hour \
             clock style, in the region's local time. Example: 23:30 for 11:30 PM.",
            true,
        )
        .field(
            "Password",
            "This is the password for the server for both regular and SDR connects. The entire \
             US keyboard is supported for inputs.",
            true,
        )
        .field(
            "STV Password",
            "This is the password for STV. The entire US keyboard is supported for inputs.",
            true,
        )
        .field(
            "Rcon",
            "This is the password for remote console. It will be sent to the user who runs the \
             command. This CANNOT be changed without reserving a new server.",
            true,
        )
        .field(
            "Map",
            "This is where the map goes. The full map name is required. \
             Example: cp_snakewater_final1",
            true,
        )
        .field(
            "Server ID",
            "This is the server id that you can get by running /find_servers. You must use this \
             to get a server, names or server IPs will not work.",
            true,
        )
        .field(
            "Starting Config",
            "This is where you define the starting config. A list is provided with most RGL \
             configs, which you can just click.",
            true,
        )
        .field(
            "Enable Plugins",
            "A true/false option to enable server plugins, such as SOAPs.",
            true,
        )
        .field(
            "Enable Demos",
            "A true/false option to enable auto uploading STV demos to demos.tf.",
            true,
        )
        .field(
            "Auto End Enabled",
            "A true/false option to enable auto ending the reservation if the server is empty.",
            true,
        )
        .field(
            "Demo Check",
            "A true/false option for the demo recording check on the reserved server.",
            true,
        )
        .field(
            "Reservation ID",
            "This will be provided to you when you /reserve_server. You will need it for \
             /update_reservation.",
            true,
        )
        .field(
            "Command: /find_servers",
            "Fill out the required fields and it will return a list of available servers and \
             their server IDs.",
            true,
        )
        .field(
            "Command: /reserve_server",
            "Fill out the required fields and it will reserve a server. Most info will be \
             publicly displayed, RCON info will be sent to the user who ran the command.",
            true,
        )
        .field(
            "Command: /update_reservation",
            "Fill out the reservation id and any of the fields to update the reservation.",
            true,
        )
        .field(
            "Command: /get_logs",
            "Search logs.tf by title, map, uploader or player. At least one filter is required.",
            true,
        )
        .field(
            "Command: /get_demos",
            "List recent demos.tf uploads for a SteamID64.",
            true,
        )
        .field(
            "Command: /set_timezone",
            "Store your preferred US time zone and daylight savings choice.",
            true,
        )
        .field("Command: /ping", "Gets the latency of the bot.", true)
        .field("Command: /help", "Show this help message.", true)
        .colour(Colour::MAGENTA);
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}
