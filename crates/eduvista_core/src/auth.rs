//! crates/eduvista_core/src/auth.rs
//!
//! The account store: registered credentials plus the single active session.
//! Built against the [`StorageService`] port so the medium can be swapped
//! for an in-memory map in tests.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::{Account, Session, UserRole};
use crate::ports::{StorageService, StoreError, StoreResult};

const USERS_KEY: &str = "eduvista_users";
const SESSION_KEY: &str = "eduvista_user";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Why a registration attempt was rejected. The messages are the user-facing
/// inline texts shown next to the signup form.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Name must be at least 2 characters.")]
    NameTooShort,
    #[error("Please enter a valid email address.")]
    EmailInvalid,
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,
    #[error("An account with this email already exists.")]
    DuplicateAccount,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owns the set of registered accounts and the persisted session.
///
/// Construct one per process with the storage backend injected, and pass it
/// to whatever consumes it.
#[derive(Clone)]
pub struct AccountStore {
    storage: Arc<dyn StorageService>,
}

impl AccountStore {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self { storage }
    }

    /// Registers a new account after validating the inputs.
    ///
    /// Name and email are trimmed, and the email is lowercased before the
    /// uniqueness check, so case and whitespace variants of a registered
    /// address are rejected as duplicates. Nothing is persisted on failure.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<(), RegisterError> {
        let name = name.trim();
        let email = email.trim().to_lowercase();

        if name.chars().count() < 2 {
            return Err(RegisterError::NameTooShort);
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(RegisterError::EmailInvalid);
        }
        if password.chars().count() < 6 {
            return Err(RegisterError::PasswordTooShort);
        }

        let mut accounts = self.load_accounts()?;
        if accounts.iter().any(|a| a.email == email) {
            return Err(RegisterError::DuplicateAccount);
        }

        debug!(%email, "registering new account");
        accounts.push(Account {
            email,
            password: password.to_string(),
            name: name.to_string(),
            role,
        });
        self.save_accounts(&accounts)?;
        Ok(())
    }

    /// Checks the credentials against the registered accounts.
    ///
    /// On a match the session is persisted and returned; on no match the
    /// result is `None`; invalid credentials are not an error.
    pub fn authenticate(&self, email: &str, password: &str) -> StoreResult<Option<Session>> {
        let email = email.trim().to_lowercase();
        let accounts = self.load_accounts()?;

        let Some(account) = accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
        else {
            return Ok(None);
        };

        let session = Session {
            name: account.name.clone(),
            role: account.role,
            email: account.email.clone(),
        };
        let raw = serde_json::to_string(&session)?;
        self.storage.write(SESSION_KEY, &raw)?;
        Ok(Some(session))
    }

    /// Returns the persisted session, if any. Pure read; never seeds.
    pub fn current_session(&self) -> StoreResult<Option<Session>> {
        match self.storage.read(SESSION_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Clears the persisted session. Safe to call with no active session.
    pub fn end_session(&self) -> StoreResult<()> {
        self.storage.remove(SESSION_KEY)?;
        Ok(())
    }

    /// Reads the account collection, seeding the two demo accounts on the
    /// first read of an empty medium.
    fn load_accounts(&self) -> StoreResult<Vec<Account>> {
        if let Some(raw) = self.storage.read(USERS_KEY)? {
            return Ok(serde_json::from_str(&raw)?);
        }
        debug!("no account collection found; seeding demo accounts");
        let accounts = default_accounts();
        self.save_accounts(&accounts)?;
        Ok(accounts)
    }

    fn save_accounts(&self, accounts: &[Account]) -> StoreResult<()> {
        let raw = serde_json::to_string(accounts)?;
        self.storage.write(USERS_KEY, &raw)?;
        Ok(())
    }
}

/// The two demo accounts present on a fresh medium: one mentor, one student.
fn default_accounts() -> Vec<Account> {
    vec![
        Account {
            email: "mentor@eduvista.edu".into(),
            password: "mentor123".into(),
            name: "Dr. Sarah Chen".into(),
            role: UserRole::Mentor,
        },
        Account {
            email: "student@eduvista.edu".into(),
            password: "student123".into(),
            name: "Alex Johnson".into(),
            role: UserRole::Student,
        },
    ]
}
