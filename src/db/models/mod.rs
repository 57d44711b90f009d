//! Database operations, one file per entity.
//!
//! Each file holds the row struct plus an `impl Database` block with the
//! queries for that table. Everything is scoped by user_id.

pub mod achievement;
pub mod customer;
pub mod daily_plan;
pub mod goal;
pub mod learning;
pub mod note;
pub mod profile;
pub mod review;
pub mod session;
pub mod work_log;

pub use achievement::Achievement;
pub use customer::Customer;
pub use daily_plan::DailyPlan;
pub use goal::Goal;
pub use learning::LearningProgress;
pub use note::Note;
pub use profile::Profile;
pub use review::ReviewEntry;
pub use session::AuthSession;
pub use work_log::WorkLog;

/// Build a `%...%` LIKE pattern with `%`, `_` and `\` escaped.
/// Queries using it must carry `ESCAPE '\'`.
pub fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    for c in query.chars() {
        if c == '\\' || c == '%' || c == '_' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{}%", escaped)
}

/// Scratch database for tests. The TempDir must stay alive alongside it.
#[cfg(test)]
pub fn test_db() -> (tempfile::TempDir, crate::db::Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = crate::db::Database::new(dir.path().join("test.db").to_str().unwrap()).unwrap();
    (dir, db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
        assert_eq!(like_pattern("plain"), "%plain%");
    }
}
