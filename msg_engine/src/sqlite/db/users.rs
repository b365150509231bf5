use log::debug;
use sqlx::{QueryBuilder, SqliteConnection};

use super::{new_id, timestamp};
use crate::db_types::{NewUser, ProfileUpdate, UserCredentials, UserProfile};

pub async fn insert_user(user: NewUser, conn: &mut SqliteConnection) -> Result<String, sqlx::Error> {
    let user_id = new_id();
    let now = timestamp();
    sqlx::query(
        r#"
            INSERT INTO users (
                user_id,
                login,
                email,
                hashed_password,
                name,
                surname,
                date_of_birth,
                phone_number,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(&user_id)
    .bind(&user.login)
    .bind(user.email)
    .bind(user.hashed_password)
    .bind(user.name)
    .bind(user.surname)
    .bind(user.date_of_birth)
    .bind(user.phone_number)
    .bind(now)
    .bind(now)
    .execute(conn)
    .await?;
    debug!("🧑️ User {} registered with id {user_id}", user.login);
    Ok(user_id)
}

pub async fn fetch_credentials(login: &str, conn: &mut SqliteConnection) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as("SELECT user_id, login, hashed_password FROM users WHERE login = $1")
        .bind(login)
        .fetch_optional(conn)
        .await
}

pub async fn fetch_profile(user_id: &str, conn: &mut SqliteConnection) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as(
        "SELECT login, email, name, surname, date_of_birth, phone_number FROM users WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(conn)
    .await
}

pub async fn update_profile(
    user_id: &str,
    update: ProfileUpdate,
    conn: &mut SqliteConnection,
) -> Result<bool, sqlx::Error> {
    let mut builder = QueryBuilder::new("UPDATE users SET updated_at = ");
    builder.push_bind(timestamp());
    if let Some(name) = update.name {
        builder.push(", name = ");
        builder.push_bind(name);
    }
    if let Some(surname) = update.surname {
        builder.push(", surname = ");
        builder.push_bind(surname);
    }
    if let Some(date_of_birth) = update.date_of_birth {
        builder.push(", date_of_birth = ");
        builder.push_bind(date_of_birth);
    }
    if let Some(email) = update.email {
        builder.push(", email = ");
        builder.push_bind(email);
    }
    if let Some(phone_number) = update.phone_number {
        builder.push(", phone_number = ");
        builder.push_bind(phone_number);
    }
    builder.push(" WHERE user_id = ");
    builder.push_bind(user_id);
    let updated = builder.build().execute(conn).await?.rows_affected();
    Ok(updated > 0)
}
