/// The RGL server configs the community actually runs, id to label. Display
/// lookups only; the API is the source of truth for what a config id does.
pub const CONFIG_NAMES: &[(i64, &str)] = &[
    (99, "RGL 6s 5CP Improved Timers"),
    (65, "RGL 6s 5CP Match Half 1"),
    (66, "RGL 6s 5CP Match Half 2"),
    (109, "RGL 6s 5CP Match Pro"),
    (69, "RGL 6s 5CP Scrim"),
    (67, "RGL 6s KOTH"),
    (68, "RGL 6s KOTH BO5"),
    (110, "RGL 6s KOTH Pro"),
    (113, "RGL 6s KOTH Scrim"),
    (33, "RGL 7s KOTH"),
    (32, "RGL 7s KOTH BO5"),
    (34, "RGL 7s Stopwatch"),
    (53, "RGL HL KOTH"),
    (54, "RGL HL KOTH BO5"),
    (55, "RGL HL Stopwatch"),
    (86, "RGL NR6s 5CP Match Half 1"),
    (87, "RGL NR6s 5CP Match Half 2"),
    (88, "RGL NR6s 5CP Scrim"),
    (91, "RGL NR6s KOTH"),
    (92, "RGL NR6s KOTH BO5"),
    (93, "RGL NR6s Stopwatch"),
];

pub fn config_name(id: i64) -> &'static str {
    CONFIG_NAMES
        .iter()
        .find(|(config_id, _)| *config_id == id)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown Config")
}

/// Slash-command choice mirror of [`CONFIG_NAMES`], so users pick a label
/// and commands receive the API id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum ServerConfig {
    #[name = "RGL 6s 5CP Improved Timers"]
    Sixes5cpImprovedTimers,
    #[name = "RGL 6s 5CP Match Half 1"]
    Sixes5cpMatchHalf1,
    #[name = "RGL 6s 5CP Match Half 2"]
    Sixes5cpMatchHalf2,
    #[name = "RGL 6s 5CP Match Pro"]
    Sixes5cpMatchPro,
    #[name = "RGL 6s 5CP Scrim"]
    Sixes5cpScrim,
    #[name = "RGL 6s KOTH"]
    SixesKoth,
    #[name = "RGL 6s KOTH BO5"]
    SixesKothBo5,
    #[name = "RGL 6s KOTH Pro"]
    SixesKothPro,
    #[name = "RGL 6s KOTH Scrim"]
    SixesKothScrim,
    #[name = "RGL 7s KOTH"]
    SevensKoth,
    #[name = "RGL 7s KOTH BO5"]
    SevensKothBo5,
    #[name = "RGL 7s Stopwatch"]
    SevensStopwatch,
    #[name = "RGL HL KOTH"]
    HighlanderKoth,
    #[name = "RGL HL KOTH BO5"]
    HighlanderKothBo5,
    #[name = "RGL HL Stopwatch"]
    HighlanderStopwatch,
    #[name = "RGL NR6s 5CP Match Half 1"]
    NoRestrictionSixes5cpMatchHalf1,
    #[name = "RGL NR6s 5CP Match Half 2"]
    NoRestrictionSixes5cpMatchHalf2,
    #[name = "RGL NR6s 5CP Scrim"]
    NoRestrictionSixes5cpScrim,
    #[name = "RGL NR6s KOTH"]
    NoRestrictionSixesKoth,
    #[name = "RGL NR6s KOTH BO5"]
    NoRestrictionSixesKothBo5,
    #[name = "RGL NR6s Stopwatch"]
    NoRestrictionSixesStopwatch,
}

impl ServerConfig {
    pub fn id(&self) -> i64 {
        match self {
            Self::Sixes5cpImprovedTimers => 99,
            Self::Sixes5cpMatchHalf1 => 65,
            Self::Sixes5cpMatchHalf2 => 66,
            Self::Sixes5cpMatchPro => 109,
            Self::Sixes5cpScrim => 69,
            Self::SixesKoth => 67,
            Self::SixesKothBo5 => 68,
            Self::SixesKothPro => 110,
            Self::SixesKothScrim => 113,
            Self::SevensKoth => 33,
            Self::SevensKothBo5 => 32,
            Self::SevensStopwatch => 34,
            Self::HighlanderKoth => 53,
            Self::HighlanderKothBo5 => 54,
            Self::HighlanderStopwatch => 55,
            Self::NoRestrictionSixes5cpMatchHalf1 => 86,
            Self::NoRestrictionSixes5cpMatchHalf2 => 87,
            Self::NoRestrictionSixes5cpScrim => 88,
            Self::NoRestrictionSixesKoth => 91,
            Self::NoRestrictionSixesKothBo5 => 92,
            Self::NoRestrictionSixesStopwatch => 93,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_resolve_to_labels() {
        assert_eq!(config_name(99), "RGL 6s 5CP Improved Timers");
        assert_eq!(config_name(93), "RGL NR6s Stopwatch");
    }

    #[test]
    fn unknown_ids_resolve_to_placeholder() {
        assert_eq!(config_name(0), "Unknown Config");
        assert_eq!(config_name(-1), "Unknown Config");
        assert_eq!(config_name(1000), "Unknown Config");
    }

    #[test]
    fn choice_ids_stay_in_the_catalog() {
        assert_eq!(config_name(ServerConfig::Sixes5cpScrim.id()), "RGL 6s 5CP Scrim");
        assert_eq!(config_name(ServerConfig::HighlanderKoth.id()), "RGL HL KOTH");
    }
}
