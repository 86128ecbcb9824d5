//! The views of the chat shell.
//!
//! Views are components which read a [`ViewContext`] snapshot from their scope and send
//! [`Action`]s for anything the user does.

use crate::{
    auth::AuthState,
    config::UserProfile,
    router::Route,
    state::{Action, AppState, Dispatcher, Tab},
};
use rivena::prelude::*;

mod chat;
mod goals;
mod layout;
mod login;
mod memories;
mod sidebar;
mod timeline;

pub use chat::*;
pub use goals::*;
pub use layout::*;
pub use login::*;
pub use memories::*;
pub use sidebar::*;
pub use timeline::*;

/// What every view can see while rendering: a snapshot of the app state and the means to
/// change it.
#[derive(Clone, Debug)]
pub struct ViewContext {
    pub state: AppState,
    pub auth: AuthState,
    pub profile: UserProfile,
    pub dispatcher: Dispatcher,
}

/// Returns the [`ViewContext`] provided above `scope`.
pub fn use_view<'a>(scope: &Scope<'a>) -> rivena::Result<&'a ViewContext> {
    scope.context::<ViewContext>()
}

/// `Root` picks the view for the current route.
pub struct Root;

impl Component for Root {
    fn render(&self, _props: Props, scope: &Scope<'_>) -> rivena::Result<Node> {
        let ctx = use_view(scope)?;
        Ok(match &ctx.state.route {
            Route::Chat => element! {
                ChatLayout {
                    ChatView
                }
            },
            Route::ChatDetail(id) => element! {
                ChatLayout {
                    ChatDetail(id: id)
                }
            },
            Route::Login => element! {
                div(class: "flex justify-center py-4") {
                    div(style: style! { "width": 48 }) {
                        LoginForm
                    }
                }
            },
            Route::NotFound(path) => element!(NotFound(path: path)),
        })
    }
}

/// The id of the header which toggles a sidebar section.
pub fn section_toggle_id(tab: Tab, section: &str) -> String {
    format!("toggle-{}-{}", tab, section)
}

/// A clickable header which expands or collapses a sidebar section.
pub(crate) fn section_header(
    ctx: &ViewContext,
    tab: Tab,
    section: &str,
    title: &str,
    detail: Option<String>,
) -> Node {
    let open = ctx.state.sidebar.is_expanded(tab, section);
    let on_click = ctx.dispatcher.send_on(Action::ToggleSection {
        tab,
        section: section.to_string(),
    });
    element! {
        div(
            id: section_toggle_id(tab, section),
            class: "flex justify-between items-center px-3 bg-muted",
            onClick: on_click,
            "aria-expanded": open,
        ) {
            span(class: "font-medium") { #(Node::text(title)) }
            span(class: "gap-2") {
                #(detail.map(|detail| element!(span(class: "text-gray-500 mr-2") { #(Node::text(detail)) })))
                span(class: "text-gray-500") { #(Node::text(if open { "▾" } else { "▸" })) }
            }
        }
    }
}

/// Draws a horizontal bar `width` cells wide, filled to `percent`.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::auth::MemoryAuthBackend;
    use futures::channel::mpsc::{self, UnboundedReceiver};
    use std::sync::Arc;

    pub fn context(state: AppState) -> (ViewContext, UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded();
        let mut auth = AuthState::new(Arc::new(MemoryAuthBackend::new()));
        auth.restore().unwrap();
        let ctx = ViewContext {
            state,
            auth,
            profile: UserProfile::default(),
            dispatcher: Dispatcher::new(tx),
        };
        (ctx, rx)
    }

    pub fn render_view<N: Into<Node>>(ctx: &ViewContext, node: N, width: usize) -> RenderedTree {
        render(provide(ctx.clone(), node), &Scope::root(), Some(width)).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "░░░░");
        assert_eq!(progress_bar(50, 4), "██░░");
        assert_eq!(progress_bar(80, 10), "████████░░");
        assert_eq!(progress_bar(255, 3), "███");
    }

    #[test]
    fn test_section_header_toggles() {
        let (ctx, mut rx) = context(AppState::default());
        let tree = render_view(
            &ctx,
            section_header(&ctx, Tab::Timeline, "today", "Today", None),
            20,
        );
        assert_eq!(tree.to_string(), " Today            ▾\n");
        assert!(tree.dispatch("toggle-timeline-today", &Event::Click));
        assert_eq!(
            rx.try_next().unwrap(),
            Some(Action::ToggleSection {
                tab: Tab::Timeline,
                section: "today".into()
            })
        );
    }

    #[test]
    fn test_root_requires_context() {
        let err = render(element!(Root), &Scope::root(), Some(40)).unwrap_err();
        assert!(matches!(err, rivena::Error::MissingContext { .. }));
    }

    #[test]
    fn test_root_routes() {
        let mut state = AppState::default();
        state.route = Route::resolve("/chat/7");
        let (ctx, _rx) = context(state);
        let tree = render_view(&ctx, element!(Root), 80);
        assert!(tree.to_string().contains("Chat with ID: 7"));

        let mut state = AppState::default();
        state.route = Route::resolve("/nowhere");
        let (ctx, _rx) = context(state);
        let tree = render_view(&ctx, element!(Root), 60);
        assert!(tree.to_string().contains("No page at /nowhere"));
    }
}
