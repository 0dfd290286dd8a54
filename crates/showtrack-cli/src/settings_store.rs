//! Cloud settings persisted as a JSON file.

use std::path::PathBuf;

use showtrack_core::cloud::{CloudSettings, CloudSettingsData};
use showtrack_core::AuthUser;

/// File-backed [`CloudSettings`]. Every write goes to disk before the
/// in-memory copy changes, so a failed write leaves the previous values
/// (and a disabled cloud) in place.
#[derive(Debug, Clone)]
pub struct JsonCloudSettings {
    path: PathBuf,
    data: CloudSettingsData,
}

impl JsonCloudSettings {
    pub fn open(path: impl Into<PathBuf>) -> showtrack_core::Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            CloudSettingsData::default()
        };
        Ok(Self { path, data })
    }

    fn persist(
        &mut self,
        update: impl FnOnce(&mut CloudSettingsData) -> showtrack_core::Result<()>,
    ) -> showtrack_core::Result<()> {
        let mut next = self.data.clone();
        update(&mut next)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&next)?)?;

        tracing::debug!(path = %self.path.display(), "Saved cloud settings");
        self.data = next;
        Ok(())
    }
}

impl CloudSettings for JsonCloudSettings {
    fn is_cloud_enabled(&self) -> bool {
        self.data.is_cloud_enabled()
    }

    fn should_validate_account(&self) -> bool {
        self.data.should_validate_account()
    }

    fn account_name(&self) -> Option<String> {
        self.data.account_name()
    }

    fn has_completed_setup(&self) -> bool {
        self.data.has_completed_setup()
    }

    fn set_setup_incomplete(&mut self) -> showtrack_core::Result<()> {
        self.persist(CloudSettingsData::set_setup_incomplete)
    }

    fn set_setup_completed(&mut self) -> showtrack_core::Result<()> {
        self.persist(CloudSettingsData::set_setup_completed)
    }

    fn enable_cloud(&mut self, user: &AuthUser) -> showtrack_core::Result<()> {
        self.persist(|data| data.enable_cloud(user))
    }

    fn disable_cloud(&mut self) -> showtrack_core::Result<()> {
        self.persist(CloudSettingsData::disable_cloud)
    }

    fn remove_account(&mut self) -> showtrack_core::Result<()> {
        self.persist(CloudSettingsData::remove_account)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_starts_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = JsonCloudSettings::open(dir.path().join("cloud-settings.json")).unwrap();
        assert!(!settings.is_cloud_enabled());
        assert!(settings.has_completed_setup());
        assert_eq!(settings.account_name(), None);
    }

    #[test]
    fn writes_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cloud-settings.json");

        let mut settings = JsonCloudSettings::open(&path).unwrap();
        settings.set_setup_incomplete().unwrap();
        settings
            .enable_cloud(&AuthUser::new("u1", Some("me@example.com".to_string())))
            .unwrap();
        settings.set_setup_completed().unwrap();

        let reopened = JsonCloudSettings::open(&path).unwrap();
        assert!(reopened.is_cloud_enabled());
        assert!(reopened.has_completed_setup());
        assert_eq!(reopened.account_name().as_deref(), Some("me@example.com"));
    }

    #[test]
    fn failed_write_keeps_cloud_disabled() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("cloud-settings.json");
        let mut settings = JsonCloudSettings::open(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let result = settings.enable_cloud(&AuthUser::new("u1", None));
        assert!(result.is_err());
        assert!(!settings.is_cloud_enabled());
        assert_eq!(settings.account_name(), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cloud-settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonCloudSettings::open(&path),
            Err(showtrack_core::Error::Serialization(_))
        ));
    }
}
