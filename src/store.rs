use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::profile::Profile;

/// On-disk encoding of a profile, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Toml,
    Json,
}

impl ProfileFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ProfileFormat::Json,
            _ => ProfileFormat::Toml,
        }
    }
}

/// Loads and saves the profile at a fixed path.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
    fallback: Profile,
}

impl ProfileStore {
    /// `fallback` is returned by [`load`](Self::load) while no file exists at `path`.
    pub fn new(path: impl Into<PathBuf>, fallback: Profile) -> Self {
        Self {
            path: path.into(),
            fallback,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ProfileFormat {
        ProfileFormat::from_path(&self.path)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the stored profile. A file that cannot be read or is missing any
    /// required field is an error; nothing is partially loaded.
    pub fn load(&self) -> Result<Profile> {
        if !self.exists() {
            warn!(path = %self.path.display(), "no profile file, using built-in profile");
            return Ok(self.fallback.clone());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.invalid(e))?;
        let profile = match self.format() {
            ProfileFormat::Toml => toml::from_str(&content).map_err(|e| self.invalid(e))?,
            ProfileFormat::Json => serde_json::from_str(&content).map_err(|e| self.invalid(e))?,
        };
        info!(path = %self.path.display(), "loaded profile");
        Ok(profile)
    }

    pub fn save(&self, profile: &Profile) -> Result<()> {
        let content = match self.format() {
            ProfileFormat::Toml => toml::to_string_pretty(profile).map_err(|e| self.invalid(e))?,
            ProfileFormat::Json => {
                serde_json::to_string_pretty(profile).map_err(|e| self.invalid(e))?
            }
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        info!(path = %self.path.display(), "saved profile");
        Ok(())
    }

    fn invalid(&self, reason: impl ToString) -> Error {
        Error::Profile {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Profile {
        Profile::builtin().unwrap()
    }

    #[test]
    fn missing_file_returns_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.toml"), builtin());
        assert_eq!(store.load().unwrap(), builtin());
    }

    #[test]
    fn toml_round_trip_keeps_skill_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("nested/profile.toml"), builtin());

        let mut profile = builtin();
        profile.skills = profile.skills.reordered(&["Other", "Data Analysis"]);
        store.save(&profile).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, profile);
        assert_eq!(loaded.skills.categories().next(), Some("Other"));
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("cv_data.json"), builtin());
        assert_eq!(store.format(), ProfileFormat::Json);

        store.save(&builtin()).unwrap();
        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.trim_start().starts_with('{'));
        assert_eq!(store.load().unwrap(), builtin());
    }

    #[test]
    fn missing_required_key_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv_data.json");
        let mut value = serde_json::to_value(builtin()).unwrap();
        value.as_object_mut().unwrap().remove("courses");
        fs::write(&path, value.to_string()).unwrap();

        let err = ProfileStore::new(&path, builtin()).load().unwrap_err();
        match err {
            Error::Profile { path: reported, reason } => {
                assert_eq!(reported, path);
                assert!(reason.contains("courses"), "{}", reason);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_toml_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        fs::write(&path, "summary = [unterminated").unwrap();
        assert!(matches!(
            ProfileStore::new(&path, builtin()).load(),
            Err(Error::Profile { .. })
        ));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ProfileFormat::from_path(Path::new("a.JSON")), ProfileFormat::Json);
        assert_eq!(ProfileFormat::from_path(Path::new("a.toml")), ProfileFormat::Toml);
        assert_eq!(ProfileFormat::from_path(Path::new("profile")), ProfileFormat::Toml);
    }
}
