use tracing::{info, instrument, warn};

use crate::domain::{
    billing::ports::SubscriptionRepository,
    common::{entities::app_errors::CoreError, generate_timestamp, services::Service},
    food_analysis::ports::LLMClient,
    profile::{
        calculator::goals_for,
        entities::{NutritionGoals, Profile},
        local,
        ports::ProfileService,
        value_objects::{BiometricInput, Biometrics},
    },
    storage::{
        ports::{KeyValueStore, RemoteStore},
        value_objects::SyncJob,
    },
};

impl<KV, RS, LLM, SR> Service<KV, RS, LLM, SR>
where
    KV: KeyValueStore,
    RS: RemoteStore,
    LLM: LLMClient,
    SR: SubscriptionRepository,
{
    async fn fetch_remote_profile(&self, user_id: &str) -> Option<Profile> {
        if !self.remote_sync.is_enabled() {
            return None;
        }

        let fetch = self.remote_store.fetch_profile(user_id.to_string());
        match tokio::time::timeout(self.sync.timeout, fetch).await {
            Ok(Ok(profile)) => profile,
            Ok(Err(e)) => {
                warn!(error = %e, "remote profile lookup failed");
                None
            }
            Err(_) => {
                warn!("remote profile lookup timed out");
                None
            }
        }
    }
}

impl<KV, RS, LLM, SR> ProfileService for Service<KV, RS, LLM, SR>
where
    KV: KeyValueStore,
    RS: RemoteStore,
    LLM: LLMClient,
    SR: SubscriptionRepository,
{
    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: String) -> Result<Option<Profile>, CoreError> {
        if let Some(profile) = self.with_local(|store| local::load_profile(store, &user_id))? {
            return Ok(Some(profile));
        }

        let Some(profile) = self.fetch_remote_profile(&user_id).await else {
            return Ok(None);
        };

        // a record for another user never lands in this user's cache
        if profile.user_id != user_id {
            warn!(remote_user_id = %profile.user_id, "remote store returned a foreign profile");
            return Ok(None);
        }

        // a save may have landed while the fetch was in flight; it wins
        let cached = self.with_local(|store| {
            if let Some(current) = local::load_profile(store, &user_id)? {
                return Ok(Some(current));
            }
            local::save_profile(store, &profile)?;
            Ok(None)
        });

        match cached {
            Ok(Some(current)) => {
                info!("profile saved locally during remote lookup, keeping it");
                Ok(Some(current))
            }
            Ok(None) => {
                info!("profile restored from remote store");
                Ok(Some(profile))
            }
            Err(e) => {
                warn!(error = %e, "failed to cache remote profile locally");
                Ok(Some(profile))
            }
        }
    }

    #[instrument(skip(self, input))]
    async fn save_profile(
        &self,
        user_id: String,
        input: BiometricInput,
    ) -> Result<Profile, CoreError> {
        let biometrics = Biometrics::try_from(&input)?;
        let goals = goals_for(&biometrics);
        let (now, _) = generate_timestamp();

        let profile = self.with_local(|store| {
            let existing = match local::load_profile(store, &user_id) {
                Ok(existing) => existing,
                Err(e) => {
                    warn!(error = %e, "overwriting unreadable profile record");
                    None
                }
            };
            let created_at = existing.map(|p| p.created_at).unwrap_or(now);

            let profile = Profile {
                user_id: user_id.clone(),
                height_in: biometrics.height_in,
                weight_kg: biometrics.weight_kg,
                age_years: biometrics.age_years,
                gender: biometrics.gender,
                activity_level: biometrics.activity_level,
                goals: biometrics.goals.clone(),
                dietary_restrictions: input.dietary_restrictions.clone(),
                calories: goals.calories,
                macros: goals.macros,
                created_at,
                updated_at: now,
            };

            local::save_profile(store, &profile)?;
            self.remote_sync.enqueue(SyncJob::UpsertProfile {
                profile: profile.clone(),
            });
            Ok(profile)
        })?;

        info!(calories = profile.calories, "profile saved");
        Ok(profile)
    }

    async fn preview_goals(&self, input: BiometricInput) -> Result<NutritionGoals, CoreError> {
        let biometrics = Biometrics::try_from(&input)?;
        Ok(goals_for(&biometrics))
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::atomic::Ordering, time::Duration};

    use super::*;
    use crate::domain::{
        common::test_support::test_service,
        profile::entities::{ActivityLevel, Gender, Goal, Macros},
        storage::keys::profile_key,
    };

    const USER: &str = "user_2abc";

    fn form() -> BiometricInput {
        BiometricInput {
            height_in: Some(70.0),
            weight_kg: Some(70.0),
            age_years: Some(25),
            gender: Some(Gender::Male),
            activity_level: Some(ActivityLevel::Moderate),
            goals: [Goal::Maintain].into(),
            dietary_restrictions: ["vegetarian".to_string()].into(),
        }
    }

    #[tokio::test]
    async fn saved_profile_carries_computed_goals() {
        let service = test_service();

        let profile = service.save_profile(USER.into(), form()).await.unwrap();

        assert_eq!(profile.calories, 2537);
        assert_eq!(
            profile.macros,
            Macros {
                protein_g: 112,
                fat_g: 85,
                carbs_g: 331
            }
        );
        assert!(profile.dietary_restrictions.contains("vegetarian"));
        assert_eq!(
            service.get_profile(USER.into()).await.unwrap(),
            Some(profile)
        );
    }

    #[tokio::test]
    async fn changing_inputs_recomputes_goals_and_keeps_creation_time() {
        let service = test_service();
        let first = service.save_profile(USER.into(), form()).await.unwrap();

        let mut cutting = form();
        cutting.goals = [Goal::LoseWeight].into();
        let second = service.save_profile(USER.into(), cutting).await.unwrap();

        assert_eq!(second.calories, 2137);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn incomplete_form_is_rejected_without_writing() {
        let service = test_service();
        let mut input = form();
        input.gender = None;

        let err = service.save_profile(USER.into(), input).await.unwrap_err();

        assert_eq!(err, CoreError::MissingField("gender"));
        assert!(service.local_store.get(&profile_key(USER)).unwrap().is_none());
    }

    #[tokio::test]
    async fn saved_profile_is_mirrored_to_remote_store() {
        let service = test_service();
        service.save_profile(USER.into(), form()).await.unwrap();

        assert_eq!(service.flush_remote_sync().await, 0);
        assert!(service.remote_store.profiles.lock().unwrap().contains_key(USER));
    }

    #[tokio::test]
    async fn missing_local_profile_is_restored_from_remote() {
        let service = test_service();
        let saved = service.save_profile(USER.into(), form()).await.unwrap();
        service.flush_remote_sync().await;
        service.local_store.remove(&profile_key(USER)).unwrap();

        let restored = service.get_profile(USER.into()).await.unwrap();

        assert_eq!(restored, Some(saved));
        assert!(service.local_store.get(&profile_key(USER)).unwrap().is_some());
    }

    #[tokio::test]
    async fn save_during_slow_remote_lookup_is_kept() {
        let mut cutting = form();
        cutting.goals = [Goal::LoseWeight].into();
        let stale = test_service()
            .save_profile(USER.into(), cutting)
            .await
            .unwrap();

        let service = test_service();
        service
            .remote_store
            .profiles
            .lock()
            .unwrap()
            .insert(USER.to_string(), stale);
        service.remote_store.fetch_delay_ms.store(100, Ordering::SeqCst);

        let (looked_up, saved) = tokio::join!(service.get_profile(USER.into()), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            service.save_profile(USER.into(), form()).await
        });
        let saved = saved.unwrap();

        assert_eq!(saved.calories, 2537);
        assert_eq!(looked_up.unwrap(), Some(saved.clone()));
        assert_eq!(service.get_profile(USER.into()).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn unreadable_profile_is_surfaced_then_replaced_on_save() {
        let service = test_service();
        service
            .local_store
            .set(&profile_key(USER), "{not json")
            .unwrap();

        let err = service.get_profile(USER.into()).await.unwrap_err();
        assert!(matches!(err, CoreError::StorageUnavailable(_)));

        let saved = service.save_profile(USER.into(), form()).await.unwrap();
        assert_eq!(service.get_profile(USER.into()).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn unreachable_remote_means_no_profile() {
        let service = test_service();
        service.remote_store.failing.store(true, Ordering::SeqCst);

        assert_eq!(service.get_profile(USER.into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn preview_does_not_persist() {
        let service = test_service();

        let goals = service.preview_goals(form()).await.unwrap();

        assert_eq!(goals.calories, 2537);
        assert_eq!(service.get_profile(USER.into()).await.unwrap(), None);
    }
}
