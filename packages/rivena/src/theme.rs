use crate::{
    context::{provide, Scope},
    element::Node,
    error::{Error, Result},
    style::{Palette, Stylesheet},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    env, fmt, fs, io,
    path::PathBuf,
    str::FromStr,
    sync::{Arc, Mutex},
};
use tracing::{debug, warn};

/// The storage key used when none is given.
pub const DEFAULT_STORAGE_KEY: &str = "rivena-ui-theme";

/// A theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    /// Follow the terminal's appearance.
    #[default]
    System,
}

impl Theme {
    /// Every theme, in display order.
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    /// The theme's name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::System => "system",
        }
    }

    /// Resolves the theme to a concrete appearance. [`Theme::System`] asks the terminal.
    pub fn appearance(&self) -> Appearance {
        match self {
            Self::Dark => Appearance::Dark,
            Self::Light => Appearance::Light,
            Self::System => system_appearance(),
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "system" => Ok(Self::System),
            _ => Err(Error::UnknownTheme(s.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete light or dark appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Appearance {
    Dark,
    Light,
}

impl Appearance {
    /// The palette for this appearance.
    pub fn palette(&self) -> Palette {
        match self {
            Self::Dark => Palette::dark(),
            Self::Light => Palette::light(),
        }
    }
}

/// Reads the appearance from a `COLORFGBG` value such as `15;0`. The last field is the
/// background color index: 0 to 6 and 8 are dark backgrounds.
pub fn appearance_from_colorfgbg(value: &str) -> Option<Appearance> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(match background {
        0..=6 | 8 => Appearance::Dark,
        _ => Appearance::Light,
    })
}

/// The terminal's appearance, from `COLORFGBG`. Defaults to dark when unknown.
pub fn system_appearance() -> Appearance {
    env::var("COLORFGBG")
        .ok()
        .and_then(|value| appearance_from_colorfgbg(&value))
        .unwrap_or(Appearance::Dark)
}

/// `ThemeStore` persists theme preferences under a storage key.
pub trait ThemeStore: Send + Sync {
    /// Loads the stored theme, if one was saved.
    fn load(&self, key: &str) -> Result<Option<Theme>>;

    /// Saves a theme.
    fn save(&self, key: &str, theme: Theme) -> Result<()>;
}

/// A [`ThemeStore`] which keeps preferences in memory.
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    entries: Mutex<HashMap<String, Theme>>,
}

impl MemoryThemeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self, key: &str) -> Result<Option<Theme>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| Error::ThemeStore(e.to_string()))?;
        Ok(entries.get(key).copied())
    }

    fn save(&self, key: &str, theme: Theme) -> Result<()> {
        self.entries
            .lock()
            .map_err(|e| Error::ThemeStore(e.to_string()))?
            .insert(key.to_string(), theme);
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StoredTheme {
    theme: Theme,
}

/// A [`ThemeStore`] which writes one JSON file per key, as `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileThemeStore {
    dir: PathBuf,
}

impl FileThemeStore {
    /// Creates a store in the given directory. The directory is created on the first save.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(Error::ThemeStore(format!("invalid storage key `{}`", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self, key: &str) -> Result<Option<Theme>> {
        let path = self.path(key)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredTheme = serde_json::from_str(&contents)?;
        Ok(Some(stored.theme))
    }

    fn save(&self, key: &str, theme: Theme) -> Result<()> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_string_pretty(&StoredTheme { theme })?)?;
        debug!(path = %path.display(), %theme, "saved theme");
        Ok(())
    }
}

/// `ThemeProvider` configures where the theme preference comes from.
///
/// ```
/// # use rivena::prelude::*;
/// # use std::sync::Arc;
/// let store = Arc::new(MemoryThemeStore::new());
/// let state = ThemeProvider::new(store.clone()).default_theme(Theme::Dark).load();
/// assert_eq!(state.theme(), Theme::Dark);
///
/// state.set_theme(Theme::Light).unwrap();
/// assert_eq!(store.load(DEFAULT_STORAGE_KEY).unwrap(), Some(Theme::Light));
/// ```
#[derive(Clone)]
pub struct ThemeProvider {
    default_theme: Theme,
    storage_key: String,
    store: Arc<dyn ThemeStore>,
}

impl ThemeProvider {
    /// Creates a provider backed by `store`, with the `system` default theme and the default
    /// storage key.
    pub fn new(store: Arc<dyn ThemeStore>) -> Self {
        Self {
            default_theme: Theme::System,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            store,
        }
    }

    /// Sets the theme used when nothing is stored.
    pub fn default_theme(mut self, theme: Theme) -> Self {
        self.default_theme = theme;
        self
    }

    /// Sets the key the preference is stored under.
    pub fn storage_key<S: Into<String>>(mut self, key: S) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Loads the initial state: the stored theme, or the default theme if nothing usable is
    /// stored.
    pub fn load(&self) -> ThemeState {
        let theme = match self.store.load(&self.storage_key) {
            Ok(Some(theme)) => theme,
            Ok(None) => self.default_theme,
            Err(e) => {
                warn!(key = %self.storage_key, error = %e, "failed to load stored theme");
                self.default_theme
            }
        };
        ThemeState {
            theme: Arc::new(Mutex::new(theme)),
            storage_key: self.storage_key.clone(),
            store: self.store.clone(),
        }
    }
}

/// The current theme, shared by every clone. Provided to components with [`provide_theme`].
#[derive(Clone)]
pub struct ThemeState {
    theme: Arc<Mutex<Theme>>,
    storage_key: String,
    store: Arc<dyn ThemeStore>,
}

impl ThemeState {
    /// The current theme preference.
    pub fn theme(&self) -> Theme {
        match self.theme.lock() {
            Ok(theme) => *theme,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// The key the preference is stored under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The appearance the current theme resolves to.
    pub fn appearance(&self) -> Appearance {
        self.theme().appearance()
    }

    /// The palette of the current appearance.
    pub fn palette(&self) -> Palette {
        self.appearance().palette()
    }

    /// A stylesheet for the current appearance.
    pub fn stylesheet(&self) -> Stylesheet {
        Stylesheet::new(self.palette())
    }

    /// Changes the theme and writes it to the store. The new theme applies even if the write
    /// fails.
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        match self.theme.lock() {
            Ok(mut current) => *current = theme,
            Err(poisoned) => *poisoned.into_inner() = theme,
        }
        self.store.save(&self.storage_key, theme).inspect_err(|e| {
            warn!(key = %self.storage_key, error = %e, "failed to persist theme");
        })
    }
}

impl fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeState")
            .field("theme", &self.theme())
            .field("storage_key", &self.storage_key)
            .finish()
    }
}

/// Provides `state` and its stylesheet to `children`.
pub fn provide_theme<N: Into<Node>>(state: &ThemeState, children: N) -> Node {
    provide(state.clone(), provide(state.stylesheet(), children))
}

/// Returns the theme state provided by an enclosing [`provide_theme`].
pub fn use_theme<'a>(scope: &Scope<'a>) -> Result<&'a ThemeState> {
    scope.context::<ThemeState>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn temp_dir() -> PathBuf {
        env::temp_dir().join(format!("rivena-theme-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" system ".parse::<Theme>().unwrap(), Theme::System);
        assert!(matches!("blue".parse::<Theme>(), Err(Error::UnknownTheme(_))));
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_colorfgbg() {
        assert_eq!(appearance_from_colorfgbg("15;0"), Some(Appearance::Dark));
        assert_eq!(appearance_from_colorfgbg("0;15"), Some(Appearance::Light));
        assert_eq!(appearance_from_colorfgbg("15;default;8"), Some(Appearance::Dark));
        assert_eq!(appearance_from_colorfgbg("0;7"), Some(Appearance::Light));
        assert_eq!(appearance_from_colorfgbg("garbage"), None);
    }

    #[test]
    fn test_default_and_stored_theme() {
        let store = Arc::new(MemoryThemeStore::new());
        let provider = ThemeProvider::new(store.clone());
        assert_eq!(provider.load().theme(), Theme::System);

        store.save(DEFAULT_STORAGE_KEY, Theme::Light).unwrap();
        assert_eq!(provider.load().theme(), Theme::Light);

        let state = provider.load();
        assert_eq!(state.storage_key(), "rivena-ui-theme");
        assert_eq!(store.load("vite-ui-theme").unwrap(), None);

        // a different key doesn't see it
        let other = ThemeProvider::new(store).storage_key("other").default_theme(Theme::Dark);
        assert_eq!(other.load().theme(), Theme::Dark);
    }

    #[test]
    fn test_set_theme_is_shared_and_persisted() {
        let store = Arc::new(MemoryThemeStore::new());
        let state = ThemeProvider::new(store.clone()).load();
        let clone = state.clone();
        state.set_theme(Theme::Dark).unwrap();
        assert_eq!(clone.theme(), Theme::Dark);
        assert_eq!(clone.appearance(), Appearance::Dark);
        assert_eq!(store.load(DEFAULT_STORAGE_KEY).unwrap(), Some(Theme::Dark));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = temp_dir();
        let store = FileThemeStore::new(&dir);
        assert_eq!(store.load("rivena-ui-theme").unwrap(), None);
        store.save("rivena-ui-theme", Theme::Light).unwrap();
        assert_eq!(store.load("rivena-ui-theme").unwrap(), Some(Theme::Light));
        assert!(store.save("../escape", Theme::Dark).is_err());

        fs::write(dir.join("broken.json"), "not json").unwrap();
        assert!(matches!(store.load("broken"), Err(Error::Json(_))));
        let state = ThemeProvider::new(Arc::new(store))
            .storage_key("broken")
            .default_theme(Theme::Dark)
            .load();
        assert_eq!(state.theme(), Theme::Dark);

        fs::remove_dir_all(dir).unwrap();
    }

    struct ThemeName;

    impl Component for ThemeName {
        fn render(&self, _props: Props, scope: &Scope) -> Result<Node> {
            Ok(Node::text(use_theme(scope)?.theme().to_string()))
        }
    }

    #[test]
    fn test_provide_theme() {
        let state = ThemeProvider::new(Arc::new(MemoryThemeStore::new()))
            .default_theme(Theme::Light)
            .load();
        let tree = render(
            provide_theme(&state, element!(ThemeName)),
            &Scope::root(),
            None,
        )
        .unwrap();
        assert_eq!(tree.to_string(), "light\n");

        let err = render(element!(ThemeName), &Scope::root(), None).unwrap_err();
        assert!(matches!(err, Error::MissingContext { .. }));
    }
}
