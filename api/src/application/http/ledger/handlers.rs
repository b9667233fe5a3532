pub mod add_entry;
pub mod delete_entry;
pub mod get_day;
pub mod get_day_progress;
pub mod get_week;
