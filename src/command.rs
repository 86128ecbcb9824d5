//! The commands of the interactive shell.

use crate::{
    app::App,
    error::{Error, Result},
    router::Route,
    state::{Action, Tab},
    views::section_toggle_id,
};
use rivena::{Event, Theme};
use std::str::FromStr;

/// Help shown by `/help`.
pub const HELP: &str = "\
/tab <timeline|goals|memories>  switch the sidebar tab
/toggle <section>               expand or collapse a section of the current tab
/go <path>                      open a route, like /chat/42 or /login
/theme <dark|light|system>      change and save the theme
/login <email> <password>       sign in
/signup <email> <password>      create an account and sign in
/logout                         sign out
/quit                           exit
anything else                   send a chat message";

/// A line of input to the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Tab(Tab),
    Toggle(String),
    Go(String),
    Theme(Theme),
    Login { email: String, password: String },
    SignUp { email: String, password: String },
    Logout,
    Help,
    Quit,
    Message(String),
}

fn usage(text: &str) -> Error {
    Error::InvalidCommand(format!("usage: {}", text))
}

fn credentials(args: &[&str], name: &str) -> Result<(String, String)> {
    match args {
        [email, password] => Ok((email.to_string(), password.to_string())),
        _ => Err(usage(&format!("/{} <email> <password>", name))),
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Message(line.to_string()));
        };
        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        match (name, args.as_slice()) {
            ("tab", [tab]) => Ok(Self::Tab(tab.parse()?)),
            ("tab", _) => Err(usage("/tab <timeline|goals|memories>")),
            ("toggle", [section]) => Ok(Self::Toggle(section.to_string())),
            ("toggle", _) => Err(usage("/toggle <section>")),
            ("go", [path]) => Ok(Self::Go(path.to_string())),
            ("go", _) => Err(usage("/go <path>")),
            ("theme", [theme]) => Ok(Self::Theme(theme.parse()?)),
            ("theme", _) => Err(usage("/theme <dark|light|system>")),
            ("login", args) => {
                let (email, password) = credentials(args, "login")?;
                Ok(Self::Login { email, password })
            }
            ("signup", args) => {
                let (email, password) = credentials(args, "signup")?;
                Ok(Self::SignUp { email, password })
            }
            ("logout", []) => Ok(Self::Logout),
            ("help", _) => Ok(Self::Help),
            ("quit" | "exit" | "q", []) => Ok(Self::Quit),
            (name, _) => Err(Error::InvalidCommand(format!(
                "unknown command \"/{}\", try /help",
                name
            ))),
        }
    }
}

/// What the shell should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Draw the next frame.
    Redraw,
    /// Print a message instead of redrawing.
    Notice(String),
    Quit,
}

impl Command {
    /// Runs the command against the app. Clicks and submissions go through the rendered tree,
    /// so they only work for elements on screen.
    pub fn run(self, app: &mut App) -> Result<Outcome> {
        let outcome = match self {
            Self::Tab(tab) => click(app, &format!("tab-{}", tab))?,
            Self::Toggle(section) => {
                let tab = app.state().sidebar.active_tab;
                click(app, &section_toggle_id(tab, &section))?
            }
            Self::Go(path) => {
                app.apply(Action::Navigate(path));
                Outcome::Redraw
            }
            Self::Theme(theme) => {
                app.apply(Action::SetTheme(theme));
                Outcome::Redraw
            }
            Self::Login { email, password } => {
                app.apply(Action::SetLoginEmail(email));
                app.apply(Action::SetLoginPassword(password));
                app.apply(Action::SubmitLogin);
                Outcome::Redraw
            }
            Self::SignUp { email, password } => {
                app.apply(Action::SetLoginEmail(email));
                app.apply(Action::SetLoginPassword(password));
                app.apply(Action::SubmitSignUp);
                Outcome::Redraw
            }
            Self::Logout => {
                app.apply(Action::SignOut);
                Outcome::Redraw
            }
            Self::Help => Outcome::Notice(HELP.to_string()),
            Self::Quit => Outcome::Quit,
            Self::Message(text) => {
                if app.state().route != Route::Chat {
                    return Ok(Outcome::Notice("messages can only be sent from /chat".into()));
                }
                app.dispatch("composer", &Event::Submit { value: text })?;
                Outcome::Redraw
            }
        };
        Ok(outcome)
    }
}

fn click(app: &mut App, id: &str) -> Result<Outcome> {
    Ok(if app.dispatch(id, &Event::Click)? {
        Outcome::Redraw
    } else {
        Outcome::Notice(format!("nothing to click for \"{}\" here", id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{AuthState, MemoryAuthBackend},
        config::AppConfig,
    };
    use rivena::{MemoryThemeStore, ThemeProvider};
    use std::sync::Arc;

    fn app() -> App {
        let mut auth = AuthState::new(Arc::new(MemoryAuthBackend::new()));
        auth.restore().unwrap();
        let theme = ThemeProvider::new(Arc::new(MemoryThemeStore::new())).load();
        let config = AppConfig {
            width: Some(100),
            ..Default::default()
        };
        App::new(&config, auth, theme)
    }

    #[test]
    fn test_parse() {
        assert_eq!("/tab goals".parse::<Command>().unwrap(), Command::Tab(Tab::Goals));
        assert_eq!(
            "/login a@b.co hunter2".parse::<Command>().unwrap(),
            Command::Login {
                email: "a@b.co".into(),
                password: "hunter2".into()
            }
        );
        assert_eq!("/theme light".parse::<Command>().unwrap(), Command::Theme(Theme::Light));
        assert_eq!("  hello  ".parse::<Command>().unwrap(), Command::Message("hello".into()));
        assert_eq!("/quit".parse::<Command>().unwrap(), Command::Quit);
        assert!(matches!("/tab".parse::<Command>(), Err(Error::InvalidCommand(_))));
        assert!(matches!("/tab settings".parse::<Command>(), Err(Error::UnknownTab(_))));
        assert!(matches!("/login a@b.co".parse::<Command>(), Err(Error::InvalidCommand(_))));
        assert!(matches!("/dance".parse::<Command>(), Err(Error::InvalidCommand(_))));
    }

    #[test]
    fn test_run() {
        let mut app = app();
        let run = |app: &mut App, line: &str| line.parse::<Command>().unwrap().run(app).unwrap();

        assert_eq!(run(&mut app, "/tab memories"), Outcome::Redraw);
        assert_eq!(app.state().sidebar.active_tab, Tab::Memories);
        assert_eq!(run(&mut app, "/toggle insights"), Outcome::Redraw);
        assert!(app.state().sidebar.is_expanded(Tab::Memories, "insights"));
        assert!(matches!(run(&mut app, "/toggle today"), Outcome::Notice(_)));

        assert_eq!(run(&mut app, "Hello there"), Outcome::Redraw);
        assert_eq!(app.state().chat.messages.last().unwrap().text, "Hello there");

        assert_eq!(run(&mut app, "/signup new@example.com longenough"), Outcome::Redraw);
        assert_eq!(app.auth().user().unwrap().email, "new@example.com");
        assert_eq!(run(&mut app, "/logout"), Outcome::Redraw);
        assert_eq!(app.state().route, Route::Login);
        assert!(matches!(run(&mut app, "hi"), Outcome::Notice(_)));

        assert_eq!(run(&mut app, "/go /chat/9"), Outcome::Redraw);
        assert_eq!(app.state().route, Route::ChatDetail("9".into()));
        assert_eq!(run(&mut app, "/quit"), Outcome::Quit);
    }
}
