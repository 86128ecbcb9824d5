use serde::{Deserialize, Serialize};
use std::fmt;

/// The views the shell can show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "param", rename_all = "snake_case")]
pub enum Route {
    Chat,
    ChatDetail(String),
    Login,
    NotFound(String),
}

impl Route {
    /// Resolves a path to a route. `/` redirects to `/chat`, and trailing slashes are ignored.
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["chat"] => Self::Chat,
            ["chat", id] => Self::ChatDetail(id.to_string()),
            ["login"] => Self::Login,
            _ => Self::NotFound(trimmed.to_string()),
        }
    }

    /// The canonical path of the route.
    pub fn path(&self) -> String {
        match self {
            Self::Chat => "/chat".to_string(),
            Self::ChatDetail(id) => format!("/chat/{}", id),
            Self::Login => "/login".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Whether the route shows the sidebar layout.
    pub fn has_sidebar(&self) -> bool {
        matches!(self, Self::Chat | Self::ChatDetail(_))
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::Chat
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(Route::resolve("/"), Route::Chat);
        assert_eq!(Route::resolve(""), Route::Chat);
        assert_eq!(Route::resolve("/chat"), Route::Chat);
        assert_eq!(Route::resolve("/chat/"), Route::Chat);
        assert_eq!(Route::resolve("/chat/42"), Route::ChatDetail("42".into()));
        assert_eq!(Route::resolve("/login"), Route::Login);
        assert_eq!(Route::resolve("/chat/42/edit"), Route::NotFound("/chat/42/edit".into()));
        assert_eq!(Route::resolve("/settings"), Route::NotFound("/settings".into()));
    }

    #[test]
    fn test_path() {
        assert_eq!(Route::resolve("/").path(), "/chat");
        assert_eq!(Route::ChatDetail("abc".into()).to_string(), "/chat/abc");
        assert_eq!(Route::resolve("/nope").path(), "/nope");
    }
}
