use armory_catalog::HeroId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved build.
///
/// # JSON format
///
/// ```json
/// {
///   "id": "7f9c2d1e-6a55-4f0e-9f7b-0c1d2e3f4a5b",
///   "season": 16,
///   "heroId": 19,
///   "buildId": "AQATAAdlAAIA...",
///   "title": "Tempo D.Va",
///   "description": "",
///   "userId": "local",
///   "createdAt": "2026-10-01T18:00:00Z",
///   "updatedAt": "2026-10-01T18:00:00Z",
///   "submitted": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRecord {
    pub id: String,
    pub season: u32,
    pub hero_id: HeroId,

    /// The build token.
    pub build_id: String,

    pub title: String,
    #[serde(default)]
    pub description: String,

    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Submitted builds are locked against further edits.
    #[serde(default)]
    pub submitted: bool,
}

/// Fields supplied when saving a new build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBuild {
    pub season: u32,
    pub hero_id: HeroId,
    pub build_id: String,
    pub title: String,
    pub description: String,
}

/// Replacement values for an existing build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildUpdate {
    pub hero_id: HeroId,
    pub build_id: String,
    pub title: String,
    pub description: String,
}
