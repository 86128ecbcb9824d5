//! # rivena-chat
//!
//! A terminal shell for the Rivena chat assistant, built with [`rivena`]: a sidebar with
//! timeline, goals and memories tabs, a chat view and a login form.
//!
//! ```
//! use rivena_chat::{App, AppConfig, AuthState, MemoryAuthBackend};
//! use rivena::{MemoryThemeStore, ThemeProvider};
//! use std::sync::Arc;
//!
//! let config = AppConfig {
//!     width: Some(100),
//!     ..Default::default()
//! };
//! let mut auth = AuthState::new(Arc::new(MemoryAuthBackend::new()));
//! auth.restore().unwrap();
//! let theme = ThemeProvider::new(Arc::new(MemoryThemeStore::new())).load();
//! let app = App::new(&config, auth, theme);
//! assert!(app.render().unwrap().to_string().contains("Rivena Chat"));
//! ```

mod app;
mod auth;
mod command;
mod config;
mod error;
mod router;
mod state;

pub mod data;
pub mod views;

pub use app::*;
pub use auth::*;
pub use command::*;
pub use config::*;
pub use error::*;
pub use router::*;
pub use state::*;
