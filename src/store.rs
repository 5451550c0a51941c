//! Persistence capability for the SB import.
//!
//! The reconciliation loop only ever needs lookup, create, balance update and
//! batch verification counts; everything else about the data model (schema,
//! migrations, constraints) belongs to the database system.

use crate::errors::{AppError, ResultExt};
use crate::models::{NewAccount, NewUser};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Persisted user row, reduced to the fields reconciliation needs.
#[derive(Debug, FromRow)]
pub struct StoredUser {
    pub id: Uuid,
    pub full_name: String,
}

/// Persisted account row, reduced to the fields reconciliation needs.
#[derive(Debug, FromRow)]
pub struct StoredAccount {
    pub id: Uuid,
    pub balance: BigDecimal,
}

/// External persistence capability used by the reconciliation loop.
#[async_trait]
pub trait ImportStore {
    /// Find a user whose id number or contact number matches the candidate's.
    /// Either match counts as found.
    async fn find_user(
        &self,
        id_number: &str,
        contact_number: &str,
    ) -> Result<Option<StoredUser>, AppError>;

    async fn create_user(&self, user: &NewUser) -> Result<StoredUser, AppError>;

    async fn find_account(&self, account_number: &str) -> Result<Option<StoredAccount>, AppError>;

    /// Create an account owned by `user_id`. Account numbers are unique in the
    /// store; a concurrent duplicate must land as an update, never a second row.
    async fn create_account(
        &self,
        account: &NewAccount,
        user_id: Uuid,
    ) -> Result<StoredAccount, AppError>;

    /// Overwrite only the balance of an existing account.
    async fn update_account_balance(
        &self,
        account_id: Uuid,
        balance: &BigDecimal,
    ) -> Result<(), AppError>;

    async fn count_users(&self, user_type: &str) -> Result<i64, AppError>;

    async fn count_accounts(&self, account_type: &str) -> Result<i64, AppError>;
}

/// Postgres-backed store.
///
/// Uses sequential queries instead of complex CTEs for better sqlx
/// compatibility; account creation is the one place backed by the unique
/// constraint so a racing insert degrades to a balance update.
pub struct PgImportStore {
    pool: PgPool,
}

impl PgImportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImportStore for PgImportStore {
    async fn find_user(
        &self,
        id_number: &str,
        contact_number: &str,
    ) -> Result<Option<StoredUser>, AppError> {
        sqlx::query_as::<_, StoredUser>(
            "SELECT id, full_name FROM users WHERE id_number = $1 OR contact_number = $2 LIMIT 1",
        )
        .bind(id_number)
        .bind(contact_number)
        .fetch_optional(&self.pool)
        .await
        .context("user lookup failed")
    }

    async fn create_user(&self, user: &NewUser) -> Result<StoredUser, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO users (
                full_name, date_of_birth, gender, contact_number, email,
                address, id_type, id_number, user_type, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&user.full_name)
        .bind(user.date_of_birth)
        .bind(&user.gender)
        .bind(&user.contact_number)
        .bind(&user.email)
        .bind(&user.address)
        .bind(&user.id_type)
        .bind(&user.id_number)
        .bind(&user.user_type)
        .bind(user.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        Ok(StoredUser {
            id,
            full_name: user.full_name.clone(),
        })
    }

    async fn find_account(&self, account_number: &str) -> Result<Option<StoredAccount>, AppError> {
        sqlx::query_as::<_, StoredAccount>(
            "SELECT id, balance FROM user_accounts WHERE account_number = $1 LIMIT 1",
        )
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await
        .context("account lookup failed")
    }

    async fn create_account(
        &self,
        account: &NewAccount,
        user_id: Uuid,
    ) -> Result<StoredAccount, AppError> {
        // Unique-constraint-backed upsert: a duplicate account number can
        // never produce a second row, only a balance overwrite.
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO user_accounts (
                account_number, user_id, balance, interest_rate, opening_date,
                last_transaction_date, status, account_type
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (account_number) DO UPDATE
            SET balance = EXCLUDED.balance,
                last_transaction_date = EXCLUDED.last_transaction_date,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(&account.account_number)
        .bind(user_id)
        .bind(&account.balance)
        .bind(&account.interest_rate)
        .bind(account.opening_date)
        .bind(account.last_transaction_date)
        .bind(&account.status)
        .bind(&account.account_type)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        Ok(StoredAccount {
            id,
            balance: account.balance.clone(),
        })
    }

    async fn update_account_balance(
        &self,
        account_id: Uuid,
        balance: &BigDecimal,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE user_accounts SET balance = $2, updated_at = now() WHERE id = $1")
            .bind(account_id)
            .bind(balance)
            .execute(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(())
    }

    async fn count_users(&self, user_type: &str) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE user_type = $1")
            .bind(user_type)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    async fn count_accounts(&self, account_type: &str) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_accounts WHERE account_type = $1")
            .bind(account_type)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }
}
