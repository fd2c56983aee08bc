use tracing::{info, warn};

use crate::{
    auth::{
        password::{hash_password, verify_password},
        repo::UserStore,
        repo_types::User,
    },
    error::ApiError,
};

pub async fn register_user(
    users: &dyn UserStore,
    email: &str,
    password: &str,
    cost: u32,
) -> Result<User, ApiError> {
    if users.find_by_email(email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::EmailTaken);
    }

    let hash = hash_password(password, cost)?;

    // The unique constraint catches a concurrent registration that slipped past the lookup.
    let Some(user) = users.create(email, &hash).await? else {
        warn!(%email, "email registered concurrently");
        return Err(ApiError::EmailTaken);
    };

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn authenticate(
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    let Some(user) = users.find_by_email(email).await? else {
        warn!(%email, "login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash) {
        warn!(%email, user_id = user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::TEST_COST as COST;
    use crate::auth::repo::MemoryUserStore;

    #[tokio::test]
    async fn register_then_authenticate() {
        let users = MemoryUserStore::default();
        let created = register_user(&users, "kim@example.com", "pw", COST).await.unwrap();
        assert_ne!(created.password_hash, "pw");

        let user = authenticate(&users, "kim@example.com", "pw").await.unwrap();
        assert_eq!(user.id, created.id);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let users = MemoryUserStore::default();
        register_user(&users, "kim@example.com", "pw", COST).await.unwrap();
        let err = register_user(&users, "kim@example.com", "other", COST)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::EmailTaken));
    }

    #[tokio::test]
    async fn any_email_string_is_accepted() {
        let users = MemoryUserStore::default();
        register_user(&users, "alice", "pw", COST).await.unwrap();
        register_user(&users, " Mixed Case ", "pw", COST).await.unwrap();

        let user = authenticate(&users, "alice", "pw").await.unwrap();
        assert_eq!(user.email, "alice");
        assert!(authenticate(&users, "mixed case", "pw").await.is_err());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let users = MemoryUserStore::default();
        register_user(&users, "kim@example.com", "pw", COST).await.unwrap();

        let wrong_pw = authenticate(&users, "kim@example.com", "nope").await.unwrap_err();
        let unknown = authenticate(&users, "lee@example.com", "pw").await.unwrap_err();
        assert!(matches!(wrong_pw, ApiError::InvalidCredentials));
        assert!(matches!(unknown, ApiError::InvalidCredentials));
        assert_eq!(wrong_pw.to_string(), unknown.to_string());
    }
}
