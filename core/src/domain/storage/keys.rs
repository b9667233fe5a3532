use chrono::NaiveDate;

/// Key under which the pending remote sync jobs survive a restart.
pub const SYNC_BACKLOG_KEY: &str = "caltrax:sync:pending";

pub fn profile_key(user_id: &str) -> String {
    format!("caltrax:{}:profile", user_id)
}

pub fn day_key(user_id: &str, date: NaiveDate) -> String {
    format!("caltrax:{}:day:{}", user_id, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_key_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(day_key("user_1", date), "caltrax:user_1:day:2024-03-07");
    }

    #[test]
    fn keys_are_scoped_per_user() {
        assert_ne!(profile_key("a"), profile_key("b"));
    }
}
