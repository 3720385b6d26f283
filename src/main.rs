use config::BotConfig;
use databases::Databases;
use events::EventManager;
use modules::{
    browse::{handler::PageNavigationHandler, task::PageSweepTask},
    demos::{commands::get_demos, gateway::DemosGateway},
    logs::{commands::get_logs, gateway::LogsGateway},
    misc::commands::{help, ping},
    prefs::commands::set_timezone,
    serveme::{
        commands::{find_servers, reserve_server, test_reservation, update_reservation},
        gateway::ServemeGateway,
    },
    system::events::ReadyHandler,
};
use paginator::PageSessions;
use poise::serenity_prelude::{self as serenity, CreateAllowedMentions};
use std::sync::Arc;
use tasks::TaskManager;
use tracing::{error, info, trace};
use transport::{HttpTransport, Transport};

mod config;
mod database;
mod databases;
mod error;
mod events;
mod modules;
mod paginator;
mod tasks;
mod transport;
mod utils;

#[derive(Clone, Debug)]
pub struct Data {
    pub dbs: Arc<Databases>,
    pub serveme: Arc<ServemeGateway>,
    pub logs: Arc<LogsGateway>,
    pub demos: Arc<DemosGateway>,
    pub pages: Arc<PageSessions>,
    pub task_manager: Arc<TaskManager>,
    pub event_manager: Arc<EventManager>,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_GUILD")]
async fn register(ctx: Context<'_>) -> Result<(), Error> {
    poise::builtins::register_application_commands_buttons(ctx).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    info!("starting quartermaster");

    let config = BotConfig::from_env();
    let token = config.discord_token.clone();
    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions::<Data, Error> {
            allowed_mentions: Some(CreateAllowedMentions::new().empty_roles().empty_users()),
            commands: vec![
                register(),
                reserve_server(),
                find_servers(),
                update_reservation(),
                test_reservation(),
                get_logs(),
                get_demos(),
                set_timezone(),
                help(),
                ping(),
            ],
            pre_command: |ctx| {
                Box::pin(async move {
                    trace!(
                        "Command {} used by {} in {}",
                        ctx.command().qualified_name,
                        ctx.author().tag(),
                        ctx.guild_id()
                            .map_or_else(|| "DM".to_string(), |id| id.to_string())
                    );
                })
            },
            post_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "Command {} completed for {} in {}",
                        ctx.command().qualified_name,
                        ctx.author().tag(),
                        ctx.guild_id()
                            .map_or_else(|| "DM".to_string(), |id| id.to_string())
                    );
                })
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!(
                                "Command {} failed for {} in {}: {:?}",
                                ctx.command().qualified_name,
                                ctx.author().tag(),
                                ctx.guild_id()
                                    .map_or_else(|| "DM".to_string(), |id| id.to_string()),
                                error
                            );
                        }
                        err => error!("Other framework error: {:?}", err),
                    }
                })
            },
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    data.event_manager.handle_event(ctx, &event).await;
                    Ok(())
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                info!("registering commands");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                let dbs = Arc::new(Databases::default().await?);
                let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new());
                let serveme = Arc::new(ServemeGateway::new(
                    transport.clone(),
                    config.serveme_keys.clone(),
                ));
                let logs = Arc::new(LogsGateway::new(transport.clone()));
                let demos = Arc::new(DemosGateway::new(transport));
                let pages = Arc::new(PageSessions::new());
                let task_manager = Arc::new(TaskManager::new());
                let event_manager = Arc::new(EventManager::new());

                event_manager.add_handler(ReadyHandler).await;
                event_manager
                    .add_handler(PageNavigationHandler::new(pages.clone()))
                    .await;

                task_manager.add_task(PageSweepTask::new(pages.clone())).await;
                task_manager.start_tasks(ctx.clone()).await;

                Ok(Data {
                    dbs,
                    serveme,
                    logs,
                    demos,
                    pages,
                    task_manager,
                    event_manager,
                })
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await;

    client.unwrap().start().await.unwrap();
}
