use tracing::{info, warn};

use crate::auth::{
    error::AuthError,
    password::{hash_password_async, verify_password_async},
    repo::UserStore,
    repo_types::{NewUser, Role, User},
};

/// Accounts created at startup when seeding is enabled.
const DEFAULT_USERS: &[(&str, &str, &str, Role)] = &[
    ("admin", "admin@example.com", "admin123", Role::Admin),
    ("user", "user@example.com", "user123", Role::User),
];

/// Creates a `user`-role account. Duplicate email or username is rejected
/// both by the early lookup and by the store's atomic insert.
pub async fn register(
    store: &dyn UserStore,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    if store
        .find_by_email_or_username(email, username)
        .await?
        .is_some()
    {
        warn!(%email, %username, "registration for existing account");
        return Err(AuthError::UserExists);
    }

    let password_hash = hash_password_async(password.to_string()).await?;
    let user = store
        .insert(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::User,
        })
        .await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Unknown email and wrong password both yield `InvalidCredentials`.
pub async fn verify_credentials(
    store: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let Some(user) = store.find_by_email(email).await? else {
        warn!(%email, "login unknown email");
        return Err(AuthError::InvalidCredentials);
    };

    let ok = verify_password_async(password.to_string(), user.password_hash.clone()).await?;
    if !ok {
        warn!(%email, user_id = user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }
    Ok(user)
}

pub async fn seed_default_users(store: &dyn UserStore) -> Result<(), AuthError> {
    for (username, email, password, role) in DEFAULT_USERS {
        let password_hash = hash_password_async(password.to_string()).await?;
        store
            .insert(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role: *role,
            })
            .await?;
        info!(%username, %email, role = role.as_str(), "default user created");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::InMemoryUserStore;

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let store = InMemoryUserStore::new();
        let user = register(&store, "alice", "a@x.com", "secret1").await.unwrap();
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "secret1");

        let logged_in = verify_credentials(&store, "a@x.com", "secret1").await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(logged_in.username, "alice");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let store = InMemoryUserStore::new();
        register(&store, "alice", "a@x.com", "secret1").await.unwrap();

        let wrong = verify_credentials(&store, "a@x.com", "secret2").await.unwrap_err();
        let unknown = verify_credentials(&store, "b@x.com", "secret1").await.unwrap_err();
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn same_email_is_rejected_every_time() {
        let store = InMemoryUserStore::new();
        register(&store, "alice", "a@x.com", "secret1").await.unwrap();

        for (username, password) in [("alice2", "other"), ("someone", "secret1")] {
            let err = register(&store, username, "a@x.com", password).await.unwrap_err();
            assert!(matches!(err, AuthError::UserExists));
        }
        let err = register(&store, "alice", "new@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::UserExists));
    }

    #[tokio::test]
    async fn seeds_admin_and_user() {
        let store = InMemoryUserStore::new();
        seed_default_users(&store).await.unwrap();

        let admin = verify_credentials(&store, "admin@example.com", "admin123")
            .await
            .unwrap();
        assert_eq!(admin.id, 1);
        assert_eq!(admin.role, Role::Admin);

        let user = verify_credentials(&store, "user@example.com", "user123")
            .await
            .unwrap();
        assert_eq!(user.id, 2);
        assert_eq!(user.role, Role::User);

        let next = register(&store, "alice", "a@x.com", "secret1").await.unwrap();
        assert_eq!(next.id, 3);
    }
}
