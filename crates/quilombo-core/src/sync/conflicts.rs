//! Persisted conflict set

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::models::Conflict;

/// Settings key holding the serialized conflict list.
pub const CONFLICTS_KEY: &str = "sync_conflicts";

/// Read the persisted conflict set; missing key means no conflicts.
pub async fn load_conflicts(settings: &impl SettingsRepository) -> Result<Vec<Conflict>> {
    match settings.get(CONFLICTS_KEY).await? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Replace the persisted conflict set wholesale.
pub async fn store_conflicts(
    settings: &impl SettingsRepository,
    conflicts: &[Conflict],
) -> Result<()> {
    settings
        .set(CONFLICTS_KEY, &serde_json::to_string(conflicts)?)
        .await
}

/// Drop the persisted conflict set entirely.
pub async fn clear_conflicts(settings: &impl SettingsRepository) -> Result<()> {
    settings.remove(CONFLICTS_KEY).await
}
