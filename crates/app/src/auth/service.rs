//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tokio::task::spawn_blocking;
use tracing::info;
use zeroize::Zeroizing;

use crate::{
    auth::{
        AuthServiceError, Credentials,
        password::{hash_secret, verify_secret},
    },
    database::Db,
    domain::users::{models::NewUser, repository::PgUsersRepository},
    sessions::{SessionKey, SessionTable, UserInfo},
};

/// Wallet balance given to newly registered users unless configured otherwise.
pub const DEFAULT_STARTING_WALLET: i64 = 100;

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    sessions: SessionTable,
    repository: PgUsersRepository,
    starting_wallet: i64,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, sessions: SessionTable, starting_wallet: i64) -> Self {
        Self {
            db,
            sessions,
            repository: PgUsersRepository::new(),
            starting_wallet,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, credentials: Credentials) -> Result<UserInfo, AuthServiceError> {
        let secret = hash_off_runtime(credentials.secret).await?;

        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .create_user(
                &mut tx,
                &NewUser {
                    username: credentials.username,
                    secret,
                    wallet: self.starting_wallet,
                },
            )
            .await?;

        tx.commit().await?;

        info!(username = %user.username, "user registered");

        Ok(UserInfo {
            name: user.username,
            wallet: user.wallet,
        })
    }

    async fn login(
        &self,
        session: SessionKey,
        credentials: Credentials,
    ) -> Result<UserInfo, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user(&mut tx, &credentials.username)
            .await?;

        tx.commit().await?;

        let user = user.ok_or_else(|| AuthServiceError::NoSuchUser(credentials.username.clone()))?;

        if !verify_off_runtime(credentials.secret, user.secret).await? {
            return Err(AuthServiceError::BadCredentials);
        }

        let info = UserInfo {
            name: user.username,
            wallet: user.wallet,
        };

        self.sessions.with_state(session, |state| {
            state.user = Some(info.clone());
        });

        info!(username = %info.name, "user logged in");

        Ok(info)
    }

    async fn logout(&self, session: SessionKey) -> Result<(), AuthServiceError> {
        self.sessions.with_state(session, |state| {
            state.user = None;
        });

        Ok(())
    }

    async fn verify_session(
        &self,
        session: SessionKey,
        username: &str,
    ) -> Result<UserInfo, AuthServiceError> {
        let info = self
            .sessions
            .user(session)
            .filter(|info| info.name == username)
            .ok_or(AuthServiceError::SessionMismatch)?;

        let mut tx = self.db.begin().await?;

        let exists = self.repository.find_user(&mut tx, username).await?.is_some();

        tx.commit().await?;

        if !exists {
            return Err(AuthServiceError::NoSuchUser(username.to_string()));
        }

        Ok(info)
    }

    async fn current_user(&self, session: SessionKey) -> Option<UserInfo> {
        self.sessions.user(session)
    }
}

/// Argon2 work runs on the blocking pool.
async fn hash_off_runtime(secret: Zeroizing<String>) -> Result<String, AuthServiceError> {
    spawn_blocking(move || hash_secret(&secret))
        .await?
        .map_err(AuthServiceError::from)
}

async fn verify_off_runtime(
    secret: Zeroizing<String>,
    hash: String,
) -> Result<bool, AuthServiceError> {
    spawn_blocking(move || verify_secret(&secret, &hash))
        .await?
        .map_err(AuthServiceError::from)
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a user with a hashed secret and the starting wallet.
    async fn register(&self, credentials: Credentials) -> Result<UserInfo, AuthServiceError>;

    /// Check credentials and bind the user to the session.
    async fn login(
        &self,
        session: SessionKey,
        credentials: Credentials,
    ) -> Result<UserInfo, AuthServiceError>;

    /// Unbind whoever is logged in to the session.
    async fn logout(&self, session: SessionKey) -> Result<(), AuthServiceError>;

    /// Succeeds only when `username` is the session's user and still exists.
    async fn verify_session(
        &self,
        session: SessionKey,
        username: &str,
    ) -> Result<UserInfo, AuthServiceError>;

    /// The user bound to the session, if any.
    async fn current_user(&self, session: SessionKey) -> Option<UserInfo>;
}
