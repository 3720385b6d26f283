use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use poise::serenity_prelude::{ChannelId, Context, EditMessage, MessageId};
use tracing::{debug, warn};

use super::disabled_nav_row;
use crate::paginator::PageSessions;
use crate::tasks::Task;

/// Withdraws navigation from result messages whose session idled out, then
/// drops the session so the cache stays bounded.
#[derive(Clone)]
pub struct PageSweepTask {
    sessions: Arc<PageSessions>,
}

impl PageSweepTask {
    pub fn new(sessions: Arc<PageSessions>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl Task for PageSweepTask {
    fn name(&self) -> &str {
        "PageSweep"
    }

    fn schedule(&self) -> Option<Duration> {
        Some(Duration::from_secs(60))
    }

    async fn execute(
        &mut self,
        ctx: &Context,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let expired = self.sessions.take_expired();
        if expired.is_empty() {
            return Ok(());
        }

        debug!("Withdrawing navigation on {} result messages", expired.len());

        for (message_id, session) in expired {
            let channel = ChannelId::new(session.channel_id);
            let edit = EditMessage::new().components(vec![disabled_nav_row()]);
            if let Err(e) = channel
                .edit_message(&ctx.http, MessageId::new(message_id), edit)
                .await
            {
                warn!("Failed to withdraw navigation on message {}: {}", message_id, e);
            }
        }

        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Task> {
        Box::new(self.clone())
    }
}
