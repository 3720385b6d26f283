use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude::{
    Context, CreateInteractionResponse, CreateInteractionResponseMessage, FullEvent, Interaction,
};

use super::{nav_row, render, NEXT_BUTTON, PREV_BUTTON};
use crate::events::EventHandler;
use crate::paginator::{PageSessions, Turn};

/// Applies navigation-button presses to their message's page session.
#[derive(Debug, Clone)]
pub struct PageNavigationHandler {
    sessions: Arc<PageSessions>,
}

impl PageNavigationHandler {
    pub fn new(sessions: Arc<PageSessions>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl EventHandler for PageNavigationHandler {
    fn name(&self) -> &str {
        "PageNavigation"
    }

    async fn handle(
        &self,
        ctx: &Context,
        event: &FullEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let FullEvent::InteractionCreate {
            interaction: Interaction::Component(component),
        } = event
        else {
            return Ok(());
        };

        let turn = match component.data.custom_id.as_str() {
            PREV_BUTTON => Turn::Previous,
            NEXT_BUTTON => Turn::Next,
            _ => return Ok(()),
        };

        let message_id = component.message.id.get();
        let response = match self
            .sessions
            .turn(message_id, component.user.id.get(), turn)
        {
            Some(session) => {
                let view = session.current();
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .embed(render(&session))
                        .components(vec![nav_row(&view)]),
                )
            }
            // expired session, someone else's message, or an edge press
            None => CreateInteractionResponse::Acknowledge,
        };

        component.create_response(&ctx.http, response).await?;
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn EventHandler> {
        Box::new(self.clone())
    }
}
