use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    profile::{
        entities::{NutritionGoals, Profile},
        value_objects::BiometricInput,
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait ProfileService: Send + Sync {
    /// Local record first, then the remote store when the local cache is empty.
    fn get_profile(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<Option<Profile>, CoreError>> + Send;

    /// Recomputes the targets from `input` and stores the profile.
    fn save_profile(
        &self,
        user_id: String,
        input: BiometricInput,
    ) -> impl Future<Output = Result<Profile, CoreError>> + Send;

    fn preview_goals(
        &self,
        input: BiometricInput,
    ) -> impl Future<Output = Result<NutritionGoals, CoreError>> + Send;
}
