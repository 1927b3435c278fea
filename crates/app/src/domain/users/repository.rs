//! Users Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::users::models::{NewUser, User};

const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const LOCK_WALLET_SQL: &str = include_str!("sql/lock_wallet.sql");
const DEBIT_WALLET_SQL: &str = include_str!("sql/debit_wallet.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_USER_SQL)
            .bind(username)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(&user.username)
            .bind(&user.secret)
            .bind(user.wallet)
            .fetch_one(&mut **tx)
            .await
    }

    /// Read the wallet balance and hold the user's row lock until the
    /// transaction ends.
    pub(crate) async fn lock_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        query_scalar::<Postgres, i64>(LOCK_WALLET_SQL)
            .bind(username)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Subtract `amount` and return the new balance.
    pub(crate) async fn debit_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
        amount: i64,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(DEBIT_WALLET_SQL)
            .bind(username)
            .bind(amount)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            username: row.try_get("username")?,
            secret: row.try_get("secret")?,
            wallet: row.try_get("wallet")?,
        })
    }
}
