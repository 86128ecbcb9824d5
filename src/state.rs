//! Application state and the actions which change it.
//!
//! Views never mutate state. Their handlers send [`Action`]s through a [`Dispatcher`], and
//! [`App`](crate::App) applies them between renders.

use crate::error::{Error, Result};
use crate::router::Route;
use futures::channel::mpsc::UnboundedSender;
use rivena::{Event, Handler, Theme};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};
use tracing::debug;

/// A sidebar tab.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Timeline,
    Goals,
    Memories,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Timeline, Tab::Goals, Tab::Memories];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeline => "timeline",
            Self::Goals => "goals",
            Self::Memories => "memories",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Timeline => "Timeline",
            Self::Goals => "Goals",
            Self::Memories => "Memories",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Timeline => "◷",
            Self::Goals => "◎",
            Self::Memories => "✱",
        }
    }

    /// The collapsible sections of the tab and whether each starts expanded.
    pub fn default_sections(&self) -> &'static [(&'static str, bool)] {
        match self {
            Self::Timeline => &[("today", true), ("yesterday", true), ("thisWeek", false)],
            Self::Goals => &[("overview", true), ("workGoals", true), ("habits", true)],
            Self::Memories => &[
                ("facts", true),
                ("preferences", true),
                ("goals", true),
                ("insights", false),
                ("achievements", false),
            ],
        }
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownTab(s.to_string()))
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which sidebar tab is showing, and which sections of each tab are expanded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarState {
    pub active_tab: Tab,
    expanded: BTreeMap<Tab, BTreeMap<String, bool>>,
}

impl Default for SidebarState {
    fn default() -> Self {
        let expanded = Tab::ALL
            .into_iter()
            .map(|tab| {
                let sections = tab
                    .default_sections()
                    .iter()
                    .map(|(name, open)| (name.to_string(), *open))
                    .collect();
                (tab, sections)
            })
            .collect();
        Self {
            active_tab: Tab::default(),
            expanded,
        }
    }
}

impl SidebarState {
    pub fn is_expanded(&self, tab: Tab, section: &str) -> bool {
        self.expanded
            .get(&tab)
            .and_then(|sections| sections.get(section))
            .copied()
            .unwrap_or(false)
    }

    /// Flips a section between expanded and collapsed, returning the new state.
    pub fn toggle(&mut self, tab: Tab, section: &str) -> Result<bool> {
        let open = self
            .expanded
            .get_mut(&tab)
            .and_then(|sections| sections.get_mut(section))
            .ok_or_else(|| Error::UnknownSection {
                tab: tab.to_string(),
                section: section.to_string(),
            })?;
        *open = !*open;
        Ok(*open)
    }
}

/// Who sent a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    System,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
}

/// The messages of the chat view and the composer's draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub draft: String,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            messages: vec![Message {
                id: 1,
                text: "Hello, how can I help you today?".into(),
                sender: Sender::System,
            }],
            draft: String::new(),
        }
    }
}

impl ChatState {
    /// Appends `text` as a user message and clears the draft. Blank text is ignored.
    pub fn submit(&mut self, text: &str) -> Option<&Message> {
        if text.trim().is_empty() {
            return None;
        }
        let id = self.messages.len() as u64 + 1;
        self.messages.push(Message {
            id,
            text: text.to_string(),
            sender: Sender::User,
        });
        self.draft.clear();
        self.messages.last()
    }
}

/// The fields of the login form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginState {
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub error: Option<String>,
}

/// Everything the views show, apart from authentication.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub route: Route,
    pub sidebar: SidebarState,
    pub chat: ChatState,
    pub login: LoginState,
    pub theme: Theme,
}

/// A change requested by a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    SelectTab(Tab),
    ToggleSection { tab: Tab, section: String },
    SetDraft(String),
    SubmitMessage(String),
    SetLoginEmail(String),
    SetLoginPassword(String),
    SubmitLogin,
    SubmitSignUp,
    LoginWithGoogle,
    SignOut,
    SetTheme(Theme),
}

/// `Dispatcher` sends actions from event handlers to the app.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    tx: UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn new(tx: UnboundedSender<Action>) -> Self {
        Self { tx }
    }

    /// Queues an action. Actions sent after the app is gone are dropped.
    pub fn send(&self, action: Action) {
        if let Err(e) = self.tx.unbounded_send(action) {
            debug!(action = ?e.into_inner(), "app is gone, dropping action");
        }
    }

    /// Returns a handler which sends the action built from each event.
    pub fn on<F>(&self, f: F) -> Handler
    where
        F: Fn(&Event) -> Option<Action> + Send + Sync + 'static,
    {
        let dispatcher = self.clone();
        Handler::new(move |event| {
            if let Some(action) = f(event) {
                dispatcher.send(action);
            }
        })
    }

    /// Returns a handler which sends `action` on every event.
    pub fn send_on(&self, action: Action) -> Handler {
        self.on(move |_| Some(action.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;

    #[test]
    fn test_tab_from_str() {
        assert_eq!("goals".parse::<Tab>().unwrap(), Tab::Goals);
        assert_eq!(" Memories ".parse::<Tab>().unwrap(), Tab::Memories);
        assert!(matches!("settings".parse::<Tab>(), Err(Error::UnknownTab(_))));
    }

    #[test]
    fn test_sidebar_defaults_and_toggle() {
        let mut sidebar = SidebarState::default();
        assert_eq!(sidebar.active_tab, Tab::Timeline);
        assert!(sidebar.is_expanded(Tab::Timeline, "today"));
        assert!(!sidebar.is_expanded(Tab::Timeline, "thisWeek"));
        assert!(!sidebar.is_expanded(Tab::Memories, "insights"));
        assert!(sidebar.is_expanded(Tab::Memories, "goals"));

        assert!(!sidebar.toggle(Tab::Timeline, "today").unwrap());
        assert!(!sidebar.is_expanded(Tab::Timeline, "today"));
        assert!(sidebar.toggle(Tab::Timeline, "today").unwrap());
        assert!(matches!(
            sidebar.toggle(Tab::Goals, "today"),
            Err(Error::UnknownSection { .. })
        ));
    }

    #[test]
    fn test_chat_submit() {
        let mut chat = ChatState {
            draft: "hi".into(),
            ..Default::default()
        };
        assert!(chat.submit("   ").is_none());
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.draft, "hi");

        let message = chat.submit("hi").unwrap().clone();
        assert_eq!(message.id, 2);
        assert_eq!(message.sender, Sender::User);
        assert_eq!(chat.draft, "");
        assert_eq!(chat.submit("again").unwrap().id, 3);
    }

    #[test]
    fn test_state_serializes() {
        let state = AppState::default();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["route"]["view"], "chat");
        assert_eq!(json["sidebar"]["active_tab"], "timeline");
        assert_eq!(json["sidebar"]["expanded"]["memories"]["insights"], false);
        assert_eq!(json["chat"]["messages"][0]["sender"], "system");
        assert_eq!(json["theme"], "system");
        let back: AppState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_dispatcher_handlers() {
        let (tx, mut rx) = mpsc::unbounded();
        let dispatcher = Dispatcher::new(tx);
        let on_input = dispatcher.on(|event| event.value().map(|v| Action::SetDraft(v.to_string())));
        on_input(&Event::Input { value: "x".into() });
        on_input(&Event::Click);
        dispatcher.send_on(Action::SignOut)(&Event::Click);

        assert_eq!(rx.try_next().unwrap(), Some(Action::SetDraft("x".into())));
        assert_eq!(rx.try_next().unwrap(), Some(Action::SignOut));
        assert!(rx.try_next().is_err());
    }
}
