

use sea_orm::DatabaseConnection;
use migration::MigratorTrait;

/// Connect and migrate, or `None` when the database is unavailable
/// (or `SKIP_DB_TESTS` is set) so the caller can skip.
pub(crate) async fn migrated_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match crate::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}
