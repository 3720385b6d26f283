use crate::{database::Database, default_struct};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

default_struct! {
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreference {
    // NA default, same as unmapped region ids
    pub time_zone: String = "-05:00".to_string(),
    pub daylight_savings: bool = false,
}
}

#[derive(Default, Serialize, Deserialize, Clone, Debug)]
pub struct PrefsDatabase {
    pub users: HashMap<u64, UserPreference>,
}

impl Database<PrefsDatabase> {
    pub async fn set_preference(
        &self,
        user_id: u64,
        preference: UserPreference,
    ) -> Result<(), String> {
        self.transaction(|db| {
            db.users.insert(user_id, preference);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
    }

    pub async fn get_preference(&self, user_id: u64) -> Option<UserPreference> {
        self.read(|db| db.users.get(&user_id).cloned()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preference_is_the_na_offset() {
        let preference = UserPreference::default();
        assert_eq!(preference.time_zone, "-05:00");
        assert!(!preference.daylight_savings);
    }
}
