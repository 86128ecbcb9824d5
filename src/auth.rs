use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::{debug, info};
use uuid::Uuid;

/// The minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

/// An authenticated session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: Uuid,
    pub user: User,
}

/// `AuthBackend` is the account service the shell signs in against.
pub trait AuthBackend: Send + Sync {
    /// Signs in with a password, replacing any current session.
    fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Creates an account and signs in to it.
    fn sign_up(&self, email: &str, password: &str) -> Result<Session>;

    /// Ends the current session, if any.
    fn sign_out(&self) -> Result<()>;

    /// The current session, if signed in.
    fn current_session(&self) -> Result<Option<Session>>;
}

fn validate(email: &str, password: &str) -> Result<()> {
    let valid_email = email
        .split_once('@')
        .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.') && !domain.starts_with('.'));
    if !valid_email {
        return Err(Error::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::WeakPassword {
            min_len: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

#[derive(Default)]
struct Accounts {
    users: HashMap<String, (User, String)>,
    session: Option<Session>,
}

/// An [`AuthBackend`] which keeps accounts in memory. Nothing is verified beyond matching the
/// stored password.
#[derive(Default)]
pub struct MemoryAuthBackend {
    accounts: Mutex<Accounts>,
}

impl MemoryAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with one account.
    pub fn with_account(email: &str, password: &str) -> Result<Self> {
        let backend = Self::new();
        backend.sign_up(email, password)?;
        backend.sign_out()?;
        Ok(backend)
    }

    fn accounts(&self) -> MutexGuard<'_, Accounts> {
        match self.accounts.lock() {
            Ok(accounts) => accounts,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl AuthBackend for MemoryAuthBackend {
    fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim().to_lowercase();
        let mut accounts = self.accounts();
        let user = match accounts.users.get(&email) {
            Some((user, stored)) if stored == password => user.clone(),
            _ => return Err(Error::InvalidCredentials),
        };
        let session = Session {
            access_token: Uuid::new_v4(),
            user,
        };
        accounts.session = Some(session.clone());
        Ok(session)
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim().to_lowercase();
        validate(&email, password)?;
        let mut accounts = self.accounts();
        if accounts.users.contains_key(&email) {
            return Err(Error::AccountExists);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.clone(),
        };
        accounts
            .users
            .insert(email, (user.clone(), password.to_string()));
        let session = Session {
            access_token: Uuid::new_v4(),
            user,
        };
        accounts.session = Some(session.clone());
        Ok(session)
    }

    fn sign_out(&self) -> Result<()> {
        self.accounts().session = None;
        Ok(())
    }

    fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.accounts().session.clone())
    }
}

/// The authentication state the views read: the session, whether a request is in flight, and
/// the last error.
#[derive(Clone)]
pub struct AuthState {
    backend: Arc<dyn AuthBackend>,
    session: Option<Session>,
    loading: bool,
    error: Option<String>,
}

impl AuthState {
    /// Creates the state for a backend. It is loading until [`AuthState::restore`] runs.
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            session: None,
            loading: true,
            error: None,
        }
    }

    /// Picks up the backend's current session.
    pub fn restore(&mut self) -> Result<()> {
        let result = self.backend.current_session();
        self.loading = false;
        self.session = result?;
        debug!(signed_in = self.session.is_some(), "restored session");
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    /// Whether a request is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Marks a request as started, so views can show it before it completes.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// The message of the last failed request.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        self.loading = false;
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<()> {
        self.begin();
        let result = self.backend.sign_in(email, password);
        let session = self.finish(result)?;
        info!(email = %session.user.email, "signed in");
        self.session = Some(session);
        Ok(())
    }

    pub fn sign_up(&mut self, email: &str, password: &str) -> Result<()> {
        self.begin();
        let result = self.backend.sign_up(email, password);
        let session = self.finish(result)?;
        info!(email = %session.user.email, "signed up");
        self.session = Some(session);
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.begin();
        let result = self.backend.sign_out();
        self.finish(result)?;
        self.session = None;
        Ok(())
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("session", &self.session)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}
