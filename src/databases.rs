use crate::database::Database;
use crate::modules::prefs::database::PrefsDatabase;

#[derive(Debug)]
pub struct Databases {
    pub prefs: Database<PrefsDatabase>,
}

impl Databases {
    pub async fn default() -> Result<Self, crate::database::DbError> {
        Ok(Self {
            prefs: Database::new("data/prefs.db").await?,
        })
    }
}
