/// Unknown region ids resolve here rather than failing; matches the wire
/// offset the bot used before region selection existed.
pub const DEFAULT_REGION: Region = Region::UsEst;

/// Which of the stored serveme.tf API keys an operation authenticates with.
/// All seven US sub-zones ride the NA deployment and share its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    Na,
    Eu,
    Sea,
    Au,
}

/// A geographic deployment of the reservation service. Ids 1-7 are US
/// sub-zones that differ only in UTC offset; 8-10 are independently keyed
/// deployments with their own subdomains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum Region {
    #[name = "US Eastern (EDT, -04:00)"]
    UsEdt,
    #[name = "US Eastern/Central (EST/CDT, -05:00)"]
    UsEst,
    #[name = "US Central/Mountain (CST/MDT, -06:00)"]
    UsCst,
    #[name = "US Mountain/Pacific (MST/PDT, -07:00)"]
    UsMst,
    #[name = "US Pacific/Alaskan (PST/AKDT, -08:00)"]
    UsPst,
    #[name = "US Alaskan (AKST, -09:00)"]
    UsAkst,
    #[name = "US Hawaii (HST, -10:00)"]
    UsHst,
    #[name = "Europe (+01:00)"]
    Europe,
    #[name = "Southeast Asia (+11:00)"]
    SoutheastAsia,
    #[name = "Australia (+08:00)"]
    Australia,
}

impl Region {
    /// Total lookup: every integer maps to a region, unmapped ids fall back
    /// to [`DEFAULT_REGION`].
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => Self::UsEdt,
            2 => Self::UsEst,
            3 => Self::UsCst,
            4 => Self::UsMst,
            5 => Self::UsPst,
            6 => Self::UsAkst,
            7 => Self::UsHst,
            8 => Self::Europe,
            9 => Self::SoutheastAsia,
            10 => Self::Australia,
            _ => DEFAULT_REGION,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::UsEdt => 1,
            Self::UsEst => 2,
            Self::UsCst => 3,
            Self::UsMst => 4,
            Self::UsPst => 5,
            Self::UsAkst => 6,
            Self::UsHst => 7,
            Self::Europe => 8,
            Self::SoutheastAsia => 9,
            Self::Australia => 10,
        }
    }

    pub fn offset_hours(&self) -> i32 {
        match self {
            Self::UsEdt => -4,
            Self::UsEst => -5,
            Self::UsCst => -6,
            Self::UsMst => -7,
            Self::UsPst => -8,
            Self::UsAkst => -9,
            Self::UsHst => -10,
            Self::Europe => 1,
            Self::SoutheastAsia => 11,
            Self::Australia => 8,
        }
    }

    /// Offset in the `"-05:00"` form the reservation API expects appended to
    /// wall-clock timestamps.
    pub fn utc_offset(&self) -> String {
        format!("{:+03}:00", self.offset_hours())
    }

    pub fn endpoint_prefix(&self) -> &'static str {
        match self.credential() {
            CredentialKey::Na => "na.",
            CredentialKey::Eu => "",
            CredentialKey::Sea => "sea.",
            CredentialKey::Au => "au.",
        }
    }

    pub fn credential(&self) -> CredentialKey {
        match self {
            Self::UsEdt
            | Self::UsEst
            | Self::UsCst
            | Self::UsMst
            | Self::UsPst
            | Self::UsAkst
            | Self::UsHst => CredentialKey::Na,
            Self::Europe => CredentialKey::Eu,
            Self::SoutheastAsia => CredentialKey::Sea,
            Self::Australia => CredentialKey::Au,
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://{}serveme.tf", self.endpoint_prefix())
    }
}
