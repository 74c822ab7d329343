//! Postgres store for SWIFT-code records.
//!
//! The store is a thin layer of parameterized queries against the single
//! `swift_codes` table. It never retries and never hides a failure: it
//! returns the most specific error it can detect (`NotFound`, `DuplicateKey`)
//! and otherwise wraps the sqlx error with operation context.

use crate::swift::models::SwiftRecord;
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("no SWIFT code found with the given value")]
    NotFound,
    #[error("SWIFT code already exists")]
    DuplicateKey,
    #[error("{op}: {source}")]
    Database {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Contract for the entity store. Cancellation propagates by dropping the
/// returned future, which aborts the in-flight query.
#[async_trait]
pub trait SwiftStore: Send + Sync {
    /// Exact match on `swift_code`; absent rows are not an error.
    async fn find_by_code(&self, code: &str) -> Result<Option<SwiftRecord>, RepoError>;

    /// All rows whose `swift_code` starts with the 8-character headquarters
    /// prefix and whose own flag is false. Natural table order.
    async fn find_branches(&self, hq_prefix: &str) -> Result<Vec<SwiftRecord>, RepoError>;

    /// Exact, case-sensitive match on `country_iso2` as stored.
    async fn find_by_country(&self, iso2: &str) -> Result<Vec<SwiftRecord>, RepoError>;

    async fn insert(&self, record: &SwiftRecord) -> Result<(), RepoError>;

    /// Fails with `NotFound` when zero rows are affected.
    async fn delete_by_code(&self, code: &str) -> Result<(), RepoError>;
}

pub struct PgSwiftStore {
    pool: PgPool,
}

impl PgSwiftStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "swift_code, bank_name, address, country_iso2, country_name, is_headquarter";

#[async_trait]
impl SwiftStore for PgSwiftStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<SwiftRecord>, RepoError> {
        sqlx::query_as::<_, SwiftRecord>(&format!(
            "SELECT {COLUMNS} FROM swift_codes WHERE swift_code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|source| RepoError::Database {
            op: "failed to fetch SWIFT code",
            source,
        })
    }

    async fn find_branches(&self, hq_prefix: &str) -> Result<Vec<SwiftRecord>, RepoError> {
        sqlx::query_as::<_, SwiftRecord>(&format!(
            "SELECT {COLUMNS} FROM swift_codes WHERE swift_code LIKE $1 AND is_headquarter = FALSE"
        ))
        .bind(format!("{hq_prefix}%"))
        .fetch_all(&self.pool)
        .await
        .map_err(|source| RepoError::Database {
            op: "failed to fetch branches",
            source,
        })
    }

    async fn find_by_country(&self, iso2: &str) -> Result<Vec<SwiftRecord>, RepoError> {
        sqlx::query_as::<_, SwiftRecord>(&format!(
            "SELECT {COLUMNS} FROM swift_codes WHERE country_iso2 = $1"
        ))
        .bind(iso2)
        .fetch_all(&self.pool)
        .await
        .map_err(|source| RepoError::Database {
            op: "failed to fetch SWIFT codes by country",
            source,
        })
    }

    async fn insert(&self, record: &SwiftRecord) -> Result<(), RepoError> {
        sqlx::query(
            r"
            INSERT INTO swift_codes
            (swift_code, bank_name, address, country_iso2, country_name, is_headquarter)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&record.swift_code)
        .bind(&record.bank_name)
        .bind(&record.address)
        .bind(&record.country_iso2)
        .bind(&record.country_name)
        .bind(record.is_headquarter)
        .execute(&self.pool)
        .await
        .map(|_| ())
        .map_err(|source| {
            if is_unique_violation(&source) {
                RepoError::DuplicateKey
            } else {
                RepoError::Database {
                    op: "failed to insert SWIFT code",
                    source,
                }
            }
        })
    }

    async fn delete_by_code(&self, code: &str) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM swift_codes WHERE swift_code = $1")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|source| RepoError::Database {
                op: "failed to delete SWIFT code",
                source,
            })?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
