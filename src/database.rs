use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::{fs, sync::RwLock};
use tracing::error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Codec(String),
    #[error("Database error: {0}")]
    Custom(String),
}

/// Flat-file store for one serializable value. `transaction` holds the write
/// lock across mutate-and-save, which serializes concurrent
/// read-modify-write cycles on the same file.
#[derive(Clone, Debug)]
pub struct Database<T: Serialize + DeserializeOwned + Default + Send + Sync + Clone + 'static> {
    path: Arc<PathBuf>,
    data: Arc<RwLock<T>>,
}

impl<T: Serialize + DeserializeOwned + Default + Send + Sync + Clone + 'static> Database<T> {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self, DbError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create database directory: {}", e);
                DbError::Io(e)
            })?;
        }

        let data = if path.exists() {
            match fs::read(&path).await {
                Ok(bytes) => match bincode::deserialize(&bytes) {
                    Ok(data) => data,
                    Err(e) => {
                        error!("Failed to deserialize database {}: {}", path.display(), e);
                        T::default()
                    }
                },
                Err(e) => {
                    error!("Failed to read database {}: {}", path.display(), e);
                    T::default()
                }
            }
        } else {
            T::default()
        };

        Ok(Self {
            path: Arc::new(path),
            data: Arc::new(RwLock::new(data)),
        })
    }

    pub async fn transaction<F, R>(&self, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&mut T) -> Result<R, String>,
    {
        let mut guard = self.data.write().await;
        let result = f(&mut guard).map_err(DbError::Custom)?;

        let bytes = bincode::serialize(&*guard).map_err(|e| DbError::Codec(e.to_string()))?;
        fs::write(self.path.as_ref(), bytes).await?;

        Ok(result)
    }

    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.data.read().await;
        f(&guard)
    }
}
