use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::SqliteDatabase;

/// A database file name that no other test uses.
pub fn random_db_path() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/msg_test_{}.db", dir.display(), rand::random::<u64>())
}

pub async fn run_migrations(url: &str) {
    let mut db = SqliteDatabase::new_with_url(url, 1).await.expect("Error creating connection to database");
    db.migrate().await.expect("Error running DB migrations");
    db.close().await;
}

pub async fn create_database(url: &str) {
    if Sqlite::database_exists(url).await.unwrap_or(false) {
        if let Err(e) = Sqlite::drop_database(url).await {
            warn!("Error dropping database {url}: {e:?}");
        }
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("Created Sqlite database {url}");
}

pub async fn drop_database(url: &str) {
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("Error dropping database {url}: {e:?}");
    }
}
