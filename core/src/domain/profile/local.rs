use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError,
    profile::entities::Profile,
    storage::{keys::profile_key, ports::KeyValueStore},
};

pub fn load_profile<KV: KeyValueStore + ?Sized>(
    store: &KV,
    user_id: &str,
) -> Result<Option<Profile>, CoreError> {
    let key = profile_key(user_id);
    let Some(raw) = store.get(&key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw).map(Some).map_err(|e| {
        warn!(%key, error = %e, "stored profile is unreadable");
        CoreError::StorageUnavailable(format!("unreadable record {}", key))
    })
}

pub fn save_profile<KV: KeyValueStore + ?Sized>(
    store: &KV,
    profile: &Profile,
) -> Result<(), CoreError> {
    let serialized = serde_json::to_string(profile).map_err(|e| {
        warn!(error = %e, "failed to serialize profile");
        CoreError::InternalServerError
    })?;

    store.set(&profile_key(&profile.user_id), &serialized)
}
