//! Business rules for SWIFT-code operations.
//!
//! The service validates input, derives the headquarters/branch relationship,
//! normalizes country fields and shapes response projections. It talks to the
//! store through the [`SwiftStore`] trait so the rules can be tested against
//! an in-memory store.

use crate::swift::models::{
    CreateSwiftCodeRequest, SwiftCodeBranch, SwiftCodeResponse, SwiftCodeSummary,
    SwiftCodesByCountryResponse, SwiftRecord,
};
use crate::swift::repo::{RepoError, SwiftStore};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid SWIFT code: must be at least 8 characters")]
    InvalidFormat,
    #[error("{0} cannot be empty")]
    MissingField(&'static str),
    #[error("SWIFT code does not match the provided isHeadquarter value")]
    InconsistentFlag,
    #[error("SWIFT code already exists")]
    Duplicate,
    #[error("SWIFT code not found")]
    NotFound,
    #[error(transparent)]
    Storage(RepoError),
}

/// A code denotes a headquarters when it is exactly 11 bytes long and its
/// last three bytes are `XXX`.
#[must_use]
pub fn is_headquarter_code(code: &str) -> bool {
    code.len() == 11 && code.as_bytes()[8..] == *b"XXX"
}

#[derive(Clone)]
pub struct SwiftService {
    store: Arc<dyn SwiftStore>,
}

impl SwiftService {
    #[must_use]
    pub fn new(store: Arc<dyn SwiftStore>) -> Self {
        Self { store }
    }

    /// Details for a single SWIFT code, including branches when the code is a
    /// headquarters. `branches` is always populated, possibly empty.
    ///
    /// # Errors
    /// Returns `ServiceError::Storage` when the store fails.
    pub async fn get_details(&self, code: &str) -> Result<Option<SwiftCodeResponse>, ServiceError> {
        let Some(record) = self
            .store
            .find_by_code(code)
            .await
            .map_err(ServiceError::Storage)?
        else {
            return Ok(None);
        };

        let mut branches = Vec::new();
        if record.is_headquarter {
            // `get` guards against a prefix split inside a multi-byte character
            if let Some(prefix) = record.swift_code.get(..8) {
                for branch in self
                    .store
                    .find_branches(prefix)
                    .await
                    .map_err(ServiceError::Storage)?
                {
                    // Drop anything the store still flags as headquarters
                    if branch.is_headquarter {
                        continue;
                    }

                    branches.push(SwiftCodeBranch {
                        address: branch.address,
                        bank_name: branch.bank_name,
                        country_iso2: branch.country_iso2.to_uppercase(),
                        is_headquarter: branch.is_headquarter,
                        swift_code: branch.swift_code,
                    });
                }
            }
        }

        Ok(Some(SwiftCodeResponse {
            address: record.address,
            bank_name: record.bank_name,
            country_iso2: record.country_iso2.to_uppercase(),
            country_name: record.country_name.to_uppercase(),
            is_headquarter: record.is_headquarter,
            swift_code: record.swift_code,
            branches,
        }))
    }

    /// All SWIFT codes stored for a country. The query value is deliberately
    /// not normalized before the exact-match store call; stored values are
    /// upper-cased at creation time, so a lower-case parameter matches
    /// nothing. The top-level `countryISO2` echoes the upper-cased input and
    /// `countryName` comes from the first matched row.
    ///
    /// # Errors
    /// Returns `ServiceError::Storage` when the store fails.
    pub async fn get_by_country(
        &self,
        iso2: &str,
    ) -> Result<Option<SwiftCodesByCountryResponse>, ServiceError> {
        let records = self
            .store
            .find_by_country(iso2)
            .await
            .map_err(ServiceError::Storage)?;

        let Some(first) = records.first() else {
            return Ok(None);
        };

        let country_name = first.country_name.to_uppercase();

        let swift_codes = records
            .into_iter()
            .map(|record| SwiftCodeSummary {
                address: record.address,
                bank_name: record.bank_name,
                country_iso2: record.country_iso2,
                is_headquarter: record.is_headquarter,
                swift_code: record.swift_code,
            })
            .collect();

        Ok(Some(SwiftCodesByCountryResponse {
            country_iso2: iso2.to_uppercase(),
            country_name,
            swift_codes,
        }))
    }

    /// Validate and persist a new SWIFT code.
    ///
    /// # Errors
    /// `InvalidFormat` when the code is shorter than 8 characters,
    /// `MissingField` when required fields are empty, `InconsistentFlag` when
    /// the `isHeadquarter` flag does not match the code suffix, `Duplicate`
    /// when the code already exists.
    pub async fn create(&self, request: CreateSwiftCodeRequest) -> Result<(), ServiceError> {
        if request.swift_code.len() < 8 {
            return Err(ServiceError::InvalidFormat);
        }
        if request.country_iso2.is_empty() || request.country_name.is_empty() {
            return Err(ServiceError::MissingField("countryISO2 and countryName"));
        }
        if request.bank_name.is_empty() || request.address.is_empty() {
            return Err(ServiceError::MissingField("bankName and address"));
        }

        if is_headquarter_code(&request.swift_code) != request.is_headquarter {
            return Err(ServiceError::InconsistentFlag);
        }

        let record = SwiftRecord {
            swift_code: request.swift_code,
            bank_name: request.bank_name,
            address: request.address,
            country_iso2: request.country_iso2.to_uppercase(),
            country_name: request.country_name.to_uppercase(),
            is_headquarter: request.is_headquarter,
        };

        self.store.insert(&record).await.map_err(|err| match err {
            RepoError::DuplicateKey => ServiceError::Duplicate,
            other => ServiceError::Storage(other),
        })
    }

    /// Delete a SWIFT code by exact value.
    ///
    /// # Errors
    /// `InvalidFormat` when the code is shorter than 8 characters, `NotFound`
    /// when no row matches.
    pub async fn delete(&self, code: &str) -> Result<(), ServiceError> {
        if code.len() < 8 {
            return Err(ServiceError::InvalidFormat);
        }

        self.store
            .delete_by_code(code)
            .await
            .map_err(|err| match err {
                RepoError::NotFound => ServiceError::NotFound,
                other => ServiceError::Storage(other),
            })
    }
}
