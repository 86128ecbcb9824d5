use crate::{
    auth::AuthState,
    config::{AppConfig, UserProfile},
    error::Result,
    router::Route,
    state::{Action, AppState, Dispatcher},
    views::{Root, ViewContext},
};
use futures::channel::mpsc::{self, UnboundedReceiver};
use rivena::{
    components::{tooltip_provider, TooltipConfig},
    element, provide, provide_theme, render, Event, Node, RenderedTree, Scope, ThemeState,
};
use tracing::{debug, info, warn};

/// `App` owns the state of the shell and applies the actions its views send.
pub struct App {
    state: AppState,
    auth: AuthState,
    theme: ThemeState,
    profile: UserProfile,
    width: Option<usize>,
    dispatcher: Dispatcher,
    actions: UnboundedReceiver<Action>,
}

impl App {
    /// Creates the app at the configured route.
    pub fn new(config: &AppConfig, auth: AuthState, theme: ThemeState) -> Self {
        let (tx, actions) = mpsc::unbounded();
        let state = AppState {
            route: Route::resolve(&config.route),
            theme: theme.theme(),
            ..Default::default()
        };
        Self {
            state,
            auth,
            theme,
            profile: config.user.clone(),
            width: config.width,
            dispatcher: Dispatcher::new(tx),
            actions,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// A dispatcher for queueing actions from outside the views.
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Sets the width frames are rendered at.
    pub fn set_width(&mut self, width: Option<usize>) {
        self.width = width;
    }

    /// Applies a single action.
    pub fn apply(&mut self, action: Action) {
        if !matches!(action, Action::SetLoginPassword(_)) {
            debug!(?action, "applying action");
        }
        match action {
            Action::Navigate(path) => self.navigate(&path),
            Action::SelectTab(tab) => self.state.sidebar.active_tab = tab,
            Action::ToggleSection { tab, section } => {
                if let Err(e) = self.state.sidebar.toggle(tab, &section) {
                    warn!("{}", e);
                }
            }
            Action::SetDraft(draft) => self.state.chat.draft = draft,
            Action::SubmitMessage(text) => {
                if let Some(message) = self.state.chat.submit(&text) {
                    debug!(id = message.id, "message sent");
                }
            }
            Action::SetLoginEmail(email) => self.state.login.email = email,
            Action::SetLoginPassword(password) => self.state.login.password = password,
            Action::SubmitLogin => {
                let login = &self.state.login;
                let result = self.auth.sign_in(&login.email, &login.password);
                self.finish_login(result);
            }
            Action::SubmitSignUp => {
                let login = &self.state.login;
                let result = self.auth.sign_up(&login.email, &login.password);
                self.finish_login(result);
            }
            Action::LoginWithGoogle => {
                self.state.login.error = Some("Google sign-in is not available".into());
            }
            Action::SignOut => match self.auth.sign_out() {
                Ok(()) => {
                    info!("signed out");
                    self.navigate("/login");
                }
                Err(e) => warn!("failed to sign out: {}", e),
            },
            Action::SetTheme(theme) => {
                if let Err(e) = self.theme.set_theme(theme) {
                    warn!("failed to set theme: {}", e);
                }
                self.state.theme = self.theme.theme();
            }
        }
    }

    fn finish_login(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                self.state.login = Default::default();
                self.navigate("/chat");
            }
            Err(e) => self.state.login.error = Some(e.to_string()),
        }
    }

    fn navigate(&mut self, path: &str) {
        let route = Route::resolve(path);
        info!(from = %self.state.route, to = %route, "navigating");
        self.state.route = route;
    }

    /// Applies every queued action, returning how many there were.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(Some(action)) = self.actions.try_next() {
            self.apply(action);
            applied += 1;
        }
        applied
    }

    /// Builds the element tree for the current state.
    pub fn view(&self) -> Node {
        let ctx = ViewContext {
            state: self.state.clone(),
            auth: self.auth.clone(),
            profile: self.profile.clone(),
            dispatcher: self.dispatcher.clone(),
        };
        provide_theme(
            &self.theme,
            provide(
                ctx,
                tooltip_provider(TooltipConfig::default(), element!(Root)),
            ),
        )
    }

    /// Renders the current state.
    pub fn render(&self) -> Result<RenderedTree> {
        Ok(render(self.view(), &Scope::root(), self.width)?)
    }

    /// Renders the current state, sends `event` to the element with the given `id`, and applies
    /// the actions it produced. Returns whether any handler ran.
    pub fn dispatch(&mut self, id: &str, event: &Event) -> Result<bool> {
        let tree = self.render()?;
        let handled = tree.dispatch(id, event);
        if !handled {
            debug!(id, ?event, "no handler");
        }
        self.apply_pending();
        Ok(handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::MemoryAuthBackend, state::Tab};
    use rivena::{MemoryThemeStore, Theme, ThemeProvider};
    use std::sync::Arc;

    fn app(route: &str) -> App {
        let backend = MemoryAuthBackend::with_account("ada@example.com", "analytical").unwrap();
        let mut auth = AuthState::new(Arc::new(backend));
        auth.restore().unwrap();
        let theme = ThemeProvider::new(Arc::new(MemoryThemeStore::new()))
            .default_theme(Theme::Dark)
            .load();
        let config = AppConfig {
            route: route.into(),
            width: Some(90),
            ..Default::default()
        };
        App::new(&config, auth, theme)
    }

    fn click(app: &mut App, id: &str) -> bool {
        app.dispatch(id, &Event::Click).unwrap()
    }

    #[test]
    fn test_root_redirects_to_chat() {
        let app = app("/");
        assert_eq!(app.state().route, Route::Chat);
        assert_eq!(app.state().theme, Theme::Dark);
        assert!(app.render().unwrap().to_string().contains("Rivena Chat"));
    }

    #[test]
    fn test_tabs_and_sections() {
        let mut app = app("/chat");
        assert!(click(&mut app, "tab-goals"));
        assert_eq!(app.state().sidebar.active_tab, Tab::Goals);
        assert!(app.render().unwrap().to_string().contains("Progress Tracking"));

        assert!(click(&mut app, "toggle-goals-habits"));
        assert!(!app.state().sidebar.is_expanded(Tab::Goals, "habits"));

        // sections of other tabs have no header on screen
        assert!(!click(&mut app, "toggle-timeline-today"));
        assert!(app.state().sidebar.is_expanded(Tab::Timeline, "today"));
    }

    #[test]
    fn test_composer() {
        let mut app = app("/chat");
        assert!(app
            .dispatch("composer-input", &Event::Input { value: "Hi".into() })
            .unwrap());
        assert_eq!(app.state().chat.draft, "Hi");
        assert!(click(&mut app, "composer-send"));
        let messages = &app.state().chat.messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, "Hi");
        assert_eq!(messages[1].id, 2);
        assert_eq!(app.state().chat.draft, "");

        // blank submissions are ignored
        assert!(app
            .dispatch("composer", &Event::Submit { value: "  ".into() })
            .unwrap());
        assert_eq!(app.state().chat.messages.len(), 2);
    }

    #[test]
    fn test_login_flow() {
        let mut app = app("/login");
        app.apply(Action::SetLoginEmail("ada@example.com".into()));
        app.apply(Action::SetLoginPassword("wrong".into()));
        assert!(click(&mut app, "login-submit"));
        assert_eq!(app.state().route, Route::Login);
        assert_eq!(
            app.state().login.error.as_deref(),
            Some("Invalid login credentials")
        );
        assert!(app.render().unwrap().to_string().contains("Invalid login credentials"));

        app.apply(Action::SetLoginPassword("analytical".into()));
        assert!(app
            .dispatch("login-form", &Event::Submit { value: String::new() })
            .unwrap());
        assert_eq!(app.state().route, Route::Chat);
        assert_eq!(app.auth().user().unwrap().email, "ada@example.com");
        assert_eq!(app.state().login.error, None);

        assert!(click(&mut app, "sign-out"));
        assert_eq!(app.state().route, Route::Login);
        assert!(app.auth().user().is_none());
    }

    #[test]
    fn test_google_login_is_unavailable() {
        let mut app = app("/login");
        assert!(click(&mut app, "login-google"));
        assert!(app.state().login.error.is_some());
    }

    #[test]
    fn test_set_theme_persists() {
        let store = Arc::new(MemoryThemeStore::new());
        let theme = ThemeProvider::new(store.clone()).load();
        let mut auth = AuthState::new(Arc::new(MemoryAuthBackend::new()));
        auth.restore().unwrap();
        let mut app = App::new(&AppConfig::default(), auth, theme);
        assert_eq!(app.state().theme, Theme::System);

        app.dispatcher().send(Action::SetTheme(Theme::Light));
        assert_eq!(app.apply_pending(), 1);
        assert_eq!(app.state().theme, Theme::Light);
        assert_eq!(
            rivena::ThemeStore::load(store.as_ref(), rivena::DEFAULT_STORAGE_KEY).unwrap(),
            Some(Theme::Light)
        );
    }
}
