use super::database::UserPreference;
use crate::{Context, Error};
use poise::command;

/// The US zone offsets users can pin as their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum TimeZoneChoice {
    #[name = "Atlantic (-04:00)"]
    Atlantic,
    #[name = "Eastern (-05:00)"]
    Eastern,
    #[name = "Central (-06:00)"]
    Central,
    #[name = "Mountain (-07:00)"]
    Mountain,
    #[name = "Pacific (-08:00)"]
    Pacific,
    #[name = "Alaskan (-09:00)"]
    Alaskan,
    #[name = "Hawaii (-10:00)"]
    Hawaii,
}

impl TimeZoneChoice {
    pub fn offset(&self) -> &'static str {
        match self {
            Self::Atlantic => "-04:00",
            Self::Eastern => "-05:00",
            Self::Central => "-06:00",
            Self::Mountain => "-07:00",
            Self::Pacific => "-08:00",
            Self::Alaskan => "-09:00",
            Self::Hawaii => "-10:00",
        }
    }
}

/// Set your time zone for reservation times
#[command(slash_command)]
pub async fn set_timezone(
    ctx: Context<'_>,
    #[description = "Your time zone"] timezone: TimeZoneChoice,
    #[description = "Account for daylight savings"] account_for_daylight_savings: bool,
    #[description = "Show the confirmation only to you"] private_response: bool,
) -> Result<(), Error> {
    if private_response {
        ctx.defer_ephemeral().await?;
    } else {
        ctx.defer().await?;
    }

    let preference = UserPreference {
        time_zone: timezone.offset().to_string(),
        daylight_savings: account_for_daylight_savings,
    };

    match ctx
        .data()
        .dbs
        .prefs
        .set_preference(ctx.author().id.get(), preference)
        .await
    {
        Ok(()) => {
            ctx.say(format!(
                "✅ Time zone set to **{}**.\nDaylight savings: **{}**.",
                timezone.offset(),
                if account_for_daylight_savings {
                    "Enabled"
                } else {
                    "Disabled"
                }
            ))
            .await?;
        }
        Err(e) => {
            tracing::error!("Failed to save timezone preference: {}", e);
            ctx.say("❌ An error occurred while saving your preferences. Please try again later.")
                .await?;
        }
    }

    Ok(())
}
