#![allow(dead_code)]

use msg_common::SubjectId;
use msg_engine::SqliteDatabase;
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub async fn new_database() -> SqliteDatabase {
    let _ = env_logger::try_init();
    let url = format!("sqlite://{}/msg_engine_test_{}.db", std::env::temp_dir().display(), rand::random::<u64>());
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database");
    db.migrate().await.expect("Error running migrations");
    db
}

pub async fn tear_down(mut db: SqliteDatabase) {
    db.close().await;
    let _ = Sqlite::drop_database(db.url()).await;
}

pub fn subject(id: &str) -> SubjectId {
    SubjectId::new(id).unwrap()
}
