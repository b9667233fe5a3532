pub mod get_profile;
pub mod preview_goals;
pub mod update_profile;
