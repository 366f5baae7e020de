//! Local store of saved builds.
//!
//! Builds are kept in a single `builds.json` index inside the library
//! directory:
//!
//! ```json
//! { "version": 1, "builds": [ ... ] }
//! ```
//!
//! Every mutation rewrites the whole index. The new contents are written to a
//! sibling temporary file first and then renamed over the index, so a crash
//! never leaves a half-written file behind. The in-memory index only changes
//! once that write has succeeded.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use uuid::Uuid;

pub mod error;
mod record;

pub use error::{LibraryError, Result};
pub use record::*;

/// File name of the library index.
pub const LIBRARY_FILE_NAME: &str = "builds.json";

/// Current schema version of the library index.
pub const LIBRARY_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibraryIndex {
    version: u32,
    #[serde(default)]
    builds: Vec<BuildRecord>,
}

impl Default for LibraryIndex {
    fn default() -> Self {
        Self {
            version: LIBRARY_VERSION,
            builds: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct BuildLibrary {
    dir: Utf8PathBuf,
    index: LibraryIndex,
}

impl BuildLibrary {
    /// Open the library in `dir`, creating the directory if needed.
    ///
    /// A missing index is treated as an empty library; it is only written on
    /// the first mutation.
    pub fn open(dir: impl AsRef<Utf8Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let path = dir.join(LIBRARY_FILE_NAME);
        let index = if path.exists() {
            let index: LibraryIndex = serde_json::from_str(&fs::read_to_string(&path)?)?;
            if index.version > LIBRARY_VERSION {
                return Err(LibraryError::UnsupportedVersion(index.version));
            }
            index
        } else {
            LibraryIndex::default()
        };

        tracing::debug!("Opened build library at {} ({} builds)", path, index.builds.len());
        Ok(Self { dir, index })
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Path of the `builds.json` index.
    pub fn path(&self) -> Utf8PathBuf {
        self.dir.join(LIBRARY_FILE_NAME)
    }

    /// All builds in insertion order.
    pub fn builds(&self) -> &[BuildRecord] {
        &self.index.builds
    }

    pub fn get(&self, id: &str) -> Option<&BuildRecord> {
        self.index.builds.iter().find(|build| build.id == id)
    }

    /// Builds saved for `season`, newest first.
    pub fn season_builds(&self, season: u32) -> Vec<&BuildRecord> {
        self.newest_first(|build| build.season == season)
    }

    /// Builds saved by `user_id`, newest first.
    pub fn user_builds(&self, user_id: &str) -> Vec<&BuildRecord> {
        self.newest_first(|build| build.user_id == user_id)
    }

    pub fn create(&mut self, user_id: &str, build: NewBuild) -> Result<BuildRecord> {
        let title = validate_title(&build.title)?;

        let now = Utc::now();
        let record = BuildRecord {
            id: Uuid::new_v4().to_string(),
            season: build.season,
            hero_id: build.hero_id,
            build_id: build.build_id,
            title,
            description: build.description.trim().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            updated_at: now,
            submitted: false,
        };

        let mut index = self.index.clone();
        index.builds.push(record.clone());
        self.commit(index)?;

        tracing::info!("Saved build: {} (id={})", record.title, record.id);
        Ok(record)
    }

    /// Replace the token, title and description of a build.
    pub fn update(&mut self, id: &str, update: BuildUpdate) -> Result<BuildRecord> {
        let title = validate_title(&update.title)?;

        let mut index = self.index.clone();
        let record = find_mut(&mut index, id)?;
        if record.submitted {
            return Err(LibraryError::Submitted(id.to_string()));
        }

        record.hero_id = update.hero_id;
        record.build_id = update.build_id;
        record.title = title;
        record.description = update.description.trim().to_string();
        record.updated_at = Utc::now();

        let record = record.clone();
        self.commit(index)?;

        tracing::info!("Updated build: {} (id={})", record.title, record.id);
        Ok(record)
    }

    /// Mark a build as submitted. Submitted builds can no longer be updated.
    pub fn lock(&mut self, id: &str) -> Result<BuildRecord> {
        let mut index = self.index.clone();
        let record = find_mut(&mut index, id)?;
        record.submitted = true;
        record.updated_at = Utc::now();

        let record = record.clone();
        self.commit(index)?;

        tracing::info!("Locked build: {} (id={})", record.title, record.id);
        Ok(record)
    }

    pub fn delete(&mut self, id: &str) -> Result<BuildRecord> {
        let mut index = self.index.clone();
        let position = index
            .builds
            .iter()
            .position(|build| build.id == id)
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))?;

        let record = index.builds.remove(position);
        self.commit(index)?;

        tracing::info!("Deleted build: {} (id={})", record.title, record.id);
        Ok(record)
    }

    fn newest_first(&self, predicate: impl Fn(&BuildRecord) -> bool) -> Vec<&BuildRecord> {
        // Reverse first so records created in the same instant keep newest-first order
        let mut builds: Vec<&BuildRecord> = self
            .index
            .builds
            .iter()
            .rev()
            .filter(|build| predicate(*build))
            .collect();
        builds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        builds
    }

    /// Write `index` to disk, then make it the current index.
    fn commit(&mut self, index: LibraryIndex) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path();
        let temp_path = path.with_extension("json.tmp");
        let contents = serde_json::to_string_pretty(&index)?;
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &path)?;

        self.index = index;
        Ok(())
    }
}

fn find_mut<'a>(index: &'a mut LibraryIndex, id: &str) -> Result<&'a mut BuildRecord> {
    index
        .builds
        .iter_mut()
        .find(|build| build.id == id)
        .ok_or_else(|| LibraryError::NotFound(id.to_string()))
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LibraryError::EmptyTitle);
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn library_dir(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().join("library")).unwrap()
    }

    fn new_build(title: &str) -> NewBuild {
        NewBuild {
            season: 16,
            hero_id: 19,
            build_id: "AQATAAc".to_string(),
            title: title.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_open_empty_library() {
        let temp = TempDir::new().unwrap();
        let library = BuildLibrary::open(library_dir(&temp)).unwrap();

        assert!(library.builds().is_empty());
        assert!(library.dir().exists());
        assert!(!library.path().exists());
    }

    #[test]
    fn test_create_and_get() {
        let temp = TempDir::new().unwrap();
        let mut library = BuildLibrary::open(library_dir(&temp)).unwrap();

        let record = library.create("alice", new_build("  Tempo D.Va  ")).unwrap();
        assert_eq!(record.title, "Tempo D.Va");
        assert_eq!(record.user_id, "alice");
        assert!(!record.submitted);
        assert_eq!(record.created_at, record.updated_at);
        assert!(Uuid::parse_str(&record.id).is_ok());

        assert_eq!(library.get(&record.id), Some(&record));
        assert!(library.get("missing").is_none());
        assert!(library.path().exists());
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let temp = TempDir::new().unwrap();
        let mut library = BuildLibrary::open(library_dir(&temp)).unwrap();

        let error = library.create("alice", new_build("   ")).unwrap_err();
        assert!(matches!(error, LibraryError::EmptyTitle));
        assert!(library.builds().is_empty());
    }

    #[test]
    fn test_listing_newest_first() {
        let temp = TempDir::new().unwrap();
        let mut library = BuildLibrary::open(library_dir(&temp)).unwrap();

        let first = library.create("alice", new_build("First")).unwrap();
        let second = library.create("bob", new_build("Second")).unwrap();
        let third = library
            .create(
                "alice",
                NewBuild {
                    season: 17,
                    ..new_build("Third")
                },
            )
            .unwrap();

        let titles = |builds: Vec<&BuildRecord>| -> Vec<String> {
            builds.into_iter().map(|b| b.title.clone()).collect()
        };
        assert_eq!(titles(library.user_builds("alice")), vec!["Third", "First"]);
        assert_eq!(titles(library.season_builds(16)), vec!["Second", "First"]);
        assert!(library.user_builds("carol").is_empty());

        assert_eq!(library.builds()[0].id, first.id);
        assert_eq!(library.builds()[1].id, second.id);
        assert_eq!(library.builds()[2].id, third.id);
    }

    #[test]
    fn test_update() {
        let temp = TempDir::new().unwrap();
        let mut library = BuildLibrary::open(library_dir(&temp)).unwrap();
        let record = library.create("alice", new_build("Draft")).unwrap();

        let updated = library
            .update(
                &record.id,
                BuildUpdate {
                    hero_id: 5,
                    build_id: "AQAFAAc".to_string(),
                    title: "Final".to_string(),
                    description: "Shield bash all day".to_string(),
                },
            )
            .unwrap();

        assert_eq!(updated.id, record.id);
        assert_eq!(updated.hero_id, 5);
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.created_at, record.created_at);
        assert!(updated.updated_at >= record.updated_at);

        let error = library
            .update(
                "missing",
                BuildUpdate {
                    hero_id: 5,
                    build_id: String::new(),
                    title: "Final".to_string(),
                    description: String::new(),
                },
            )
            .unwrap_err();
        assert!(matches!(error, LibraryError::NotFound(_)));
    }

    #[test]
    fn test_lock_blocks_updates() {
        let temp = TempDir::new().unwrap();
        let mut library = BuildLibrary::open(library_dir(&temp)).unwrap();
        let record = library.create("alice", new_build("Draft")).unwrap();

        let locked = library.lock(&record.id).unwrap();
        assert!(locked.submitted);

        let error = library
            .update(
                &record.id,
                BuildUpdate {
                    hero_id: 19,
                    build_id: record.build_id.clone(),
                    title: "Changed".to_string(),
                    description: String::new(),
                },
            )
            .unwrap_err();
        assert!(matches!(error, LibraryError::Submitted(_)));
        assert_eq!(library.get(&record.id).unwrap().title, "Draft");
    }

    #[test]
    fn test_delete() {
        let temp = TempDir::new().unwrap();
        let mut library = BuildLibrary::open(library_dir(&temp)).unwrap();
        let record = library.create("alice", new_build("Draft")).unwrap();

        let deleted = library.delete(&record.id).unwrap();
        assert_eq!(deleted.id, record.id);
        assert!(library.get(&record.id).is_none());
        assert!(matches!(
            library.delete(&record.id),
            Err(LibraryError::NotFound(_))
        ));
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let dir = library_dir(&temp);

        let record = {
            let mut library = BuildLibrary::open(&dir).unwrap();
            let record = library.create("alice", new_build("Keeper")).unwrap();
            library.lock(&record.id).unwrap()
        };

        let library = BuildLibrary::open(&dir).unwrap();
        assert_eq!(library.get(&record.id), Some(&record));
        assert!(!dir.join("builds.json.tmp").exists());

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(library.path()).unwrap()).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["builds"][0]["heroId"], 19);
        assert_eq!(json["builds"][0]["submitted"], true);
    }

    #[test]
    fn test_failed_write_leaves_library_unchanged() {
        let temp = TempDir::new().unwrap();
        let dir = library_dir(&temp);
        let mut library = BuildLibrary::open(&dir).unwrap();
        let record = library.create("alice", new_build("Draft")).unwrap();

        // A plain file where the directory was makes every write fail
        fs::remove_dir_all(&dir).unwrap();
        fs::write(&dir, "").unwrap();

        assert!(matches!(
            library.create("alice", new_build("Second")),
            Err(LibraryError::Io(_))
        ));
        assert_eq!(library.builds().len(), 1);

        assert!(library.lock(&record.id).is_err());
        assert!(!library.get(&record.id).unwrap().submitted);

        assert!(library
            .update(
                &record.id,
                BuildUpdate {
                    hero_id: 5,
                    build_id: record.build_id.clone(),
                    title: "Changed".to_string(),
                    description: String::new(),
                },
            )
            .is_err());
        assert_eq!(library.get(&record.id), Some(&record));

        assert!(library.delete(&record.id).is_err());
        assert_eq!(library.get(&record.id), Some(&record));
    }

    #[test]
    fn test_rejects_newer_version() {
        let temp = TempDir::new().unwrap();
        let dir = library_dir(&temp);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(LIBRARY_FILE_NAME), r#"{ "version": 2, "builds": [] }"#).unwrap();

        assert!(matches!(
            BuildLibrary::open(&dir),
            Err(LibraryError::UnsupportedVersion(2))
        ));
    }
}
