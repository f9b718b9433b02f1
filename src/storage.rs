use crate::errors::AppError;
use crate::models::AppData;
use std::path::{Path, PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::error;

/// Single JSON file holding the whole [`AppData`] document.
///
/// Every access goes through one lock, so a load-mutate-save in
/// [`Store::update`] cannot interleave with another request.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<AppData, AppError> {
        let _guard = self.lock.lock().await;
        load_data(&self.path).await
    }

    pub async fn save(&self, data: &AppData) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        persist_data(&self.path, data).await
    }

    pub async fn update<T>(&self, mutate: impl FnOnce(&mut AppData) -> T) -> Result<T, AppError> {
        let _guard = self.lock.lock().await;
        let mut data = load_data(&self.path).await?;
        let output = mutate(&mut data);
        persist_data(&self.path, &data).await?;
        Ok(output)
    }
}

/// Reads the document, or the default one when the file does not exist yet.
pub async fn load_data(path: &Path) -> Result<AppData, AppError> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
            error!("failed to parse data file {}: {err}", path.display());
            AppError::internal(err)
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(AppData::default()),
        Err(err) => {
            error!("failed to read data file {}: {err}", path.display());
            Err(AppError::internal(err))
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await.map_err(|err| {
        error!("failed to write data file {}: {err}", path.display());
        AppError::internal(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SleepEntry;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("absent").join("sleep.json"));

        let data = store.load().await.unwrap();
        assert_eq!(data, AppData::default());
        assert_eq!(data.goal, 8.0);
        assert!(data.entries.is_empty());
    }

    #[tokio::test]
    async fn save_creates_directories_and_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("sleep.json");
        let store = Store::new(&path);
        let data = AppData {
            goal: 7.25,
            entries: vec![
                SleepEntry {
                    date: "2024-01-02".into(),
                    slept: 6.5,
                    achieved: false,
                },
                SleepEntry {
                    date: "2024-01-01".into(),
                    slept: 9.0,
                    achieved: true,
                },
            ],
        };

        store.save(&data).await.unwrap();

        assert!(path.exists());
        assert_eq!(store.load().await.unwrap(), data);
    }

    #[tokio::test]
    async fn update_persists_mutation() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("sleep.json"));

        let outcome = store
            .update(|data| data.record_sleep("2024-01-01", 7.5))
            .await
            .unwrap();

        assert_eq!(outcome, crate::sleep::EntryOutcome::Added);
        let reloaded = load_data(store.path()).await.unwrap();
        assert_eq!(reloaded.entries.len(), 1);
        assert!(!reloaded.entries[0].achieved);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_are_not_lost() {
        let dir = tempdir().unwrap();
        let store = std::sync::Arc::new(Store::new(dir.path().join("sleep.json")));

        let tasks: Vec<_> = (1..=20)
            .map(|day| {
                let store = std::sync::Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .update(|data| data.record_sleep(&format!("2024-01-{day:02}"), 7.0))
                        .await
                        .unwrap()
                })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap(), crate::sleep::EntryOutcome::Added);
        }

        let data = store.load().await.unwrap();
        assert_eq!(data.entries.len(), 20);
        for day in 1..=20 {
            let date = format!("2024-01-{day:02}");
            assert!(data.entries.iter().any(|entry| entry.date == date), "lost {date}");
        }
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sleep.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = Store::new(&path).load().await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
    }

    #[tokio::test]
    async fn persisted_layout_uses_goal_and_entries_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sleep.json");
        let mut data = AppData::default();
        data.record_sleep("2024-01-01", 7.5);
        persist_data(&path, &data).await.unwrap();

        let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({
                "goal": 8.0,
                "entries": [{ "date": "2024-01-01", "slept": 7.5, "achieved": false }]
            })
        );
    }
}
