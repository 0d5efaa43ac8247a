use crate::store::{self, StoreError};
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    Version,
};
use secrecy::{ExposeSecret, SecretBox};
use sqlx::PgPool;

use crate::time::TimeSource;

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

#[derive(serde::Deserialize)]
pub struct Credentials {
    pub username: String,
    password: SecretBox<String>,
}

#[tracing::instrument(name = "Validate credentials", skip(credentials, pool))]
pub async fn validate_credentials(
    credentials: Credentials,
    pool: &PgPool,
) -> Result<payloads::UserId, AuthError> {
    let mut user_id = None;
    // fallback password hash to prevent timing differences
    let mut expected_password_hash = SecretBox::new(Box::new(
        "$argon2id$v=19$m=15000,t=2,p=1$\
        gZiV/M1gPc22ElAH/Jh1Hw$\
        CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
            .to_string(),
    ));

    if let Some((stored_user_id, stored_password_hash)) =
        get_stored_credentials(&credentials.username, pool).await?
    {
        user_id = Some(stored_user_id);
        expected_password_hash = stored_password_hash;
    }

    spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, credentials.password)
    })
    .await
    .context("Failed to spawn blocking task.")??;

    user_id
        .ok_or_else(|| anyhow::anyhow!("Unknown username."))
        .map_err(AuthError::InvalidCredentials)
}

#[tracing::instrument(name = "Get stored credentials", skip(username, pool))]
async fn get_stored_credentials(
    username: &str,
    pool: &PgPool,
) -> Result<Option<(payloads::UserId, SecretBox<String>)>, anyhow::Error> {
    let user = sqlx::query_as::<_, store::User>(
        r#"SELECT * FROM users WHERE username = $1;"#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .context("Failed to performed a query to retrieve stored credentials.")?
    .map(|user| (user.id, SecretBox::new(Box::new(user.password_hash))));
    Ok(user)
}

#[tracing::instrument(
    name = "Verify password hash",
    skip(expected_password_hash, password_candidate)
)]
fn verify_password_hash(
    expected_password_hash: SecretBox<String>,
    password_candidate: SecretBox<String>,
) -> Result<(), AuthError> {
    let expected_password_hash =
        PasswordHash::new(expected_password_hash.expose_secret())
            .context("Failed to parse hash in PHC string format.")?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .context("Invalid password.")
        .map_err(AuthError::InvalidCredentials)
}

/// Hash a candidate password off the async executor.
pub async fn hash_password(
    password: SecretBox<String>,
) -> Result<SecretBox<String>, anyhow::Error> {
    spawn_blocking_with_tracing(move || compute_password_hash(password))
        .await?
        .context("Failed to hash password")
}

#[tracing::instrument(
    name = "Create user",
    skip(password, pool, time_source),
    fields(user_id=tracing::field::Empty)
)]
pub async fn create_user(
    username: &str,
    password: SecretBox<String>,
    role: payloads::Role,
    phone: Option<&str>,
    pool: &PgPool,
    time_source: &TimeSource,
) -> Result<store::User, StoreError> {
    let password_hash = hash_password(password).await?;
    let user = store::insert_user(
        username,
        password_hash.expose_secret(),
        role,
        phone,
        pool,
        time_source,
    )
    .await?;
    tracing::Span::current()
        .record("user_id", tracing::field::display(&user.id));
    Ok(user)
}

fn compute_password_hash(
    password: SecretBox<String>,
) -> Result<SecretBox<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let password_hash = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).unwrap(),
    )
    .hash_password(password.expose_secret().as_bytes(), &salt)?
    .to_string();
    Ok(SecretBox::new(Box::new(password_hash)))
}
