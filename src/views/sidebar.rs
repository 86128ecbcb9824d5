use crate::{
    data,
    state::{Action, Tab},
    views::{use_view, GoalsContent, MemoriesContent, TimelineContent},
};
use rivena::prelude::*;
use tracing::debug;

/// The width of the sidebar in cells.
pub const SIDEBAR_WIDTH: i64 = 34;

/// `TeamSwitcher` shows the active team's `name` and `plan`.
pub struct TeamSwitcher;

impl Component for TeamSwitcher {
    fn render(&self, props: Props, _scope: &Scope<'_>) -> rivena::Result<Node> {
        let name = props.get_str("name").unwrap_or_default().to_string();
        let plan = props.get_str("plan").unwrap_or_default().to_string();
        Ok(element! {
            div(class: "flex items-center gap-4") {
                span(class: "bg-purple-600 text-white px-4") { "⌘" }
                div {
                    h2(class: "font-semibold") { #(Node::text(name)) }
                    p(class: "text-gray-500") { #(Node::text(plan)) }
                }
            }
        })
    }
}

/// `SearchForm` is the conversation search box.
pub struct SearchForm;

impl Component for SearchForm {
    fn render(&self, props: Props, scope: &Scope<'_>) -> rivena::Result<Node> {
        let ctx = use_view(scope)?;
        let on_submit = ctx.dispatcher.on(|event| {
            debug!(query = event.value().unwrap_or_default(), "search submitted");
            None
        });
        Ok(element! {
            div(class: props.class().unwrap_or_default()) {
                form(id: "search", onSubmit: on_submit) {
                    Input(id: "search-input", type: "text", placeholder: "⌕ Search conversations...")
                }
            }
        })
    }
}

/// `TabButton` styles a tab's button for whether its `tab` is the active one.
///
/// The caller supplies the button, usually with its own `onClick`. Both the caller's handler and
/// the tab's own handler run when it's clicked.
pub struct TabButton;

impl Component for TabButton {
    fn render(&self, mut props: Props, _scope: &Scope<'_>) -> rivena::Result<Node> {
        let tab = props
            .remove("tab")
            .and_then(|tab| tab.as_str().map(str::to_string))
            .unwrap_or_default();
        let active = props.get_bool("active");
        props.remove("active");

        let class = if active {
            "flex-1 justify-center font-medium text-purple-600 border-b border-purple-600"
        } else {
            "flex-1 justify-center font-medium text-gray-500"
        };
        props.set("class", class);
        props.set(
            "onClick",
            Handler::new(move |_| debug!(tab = %tab, "tab clicked")),
        );
        Ok(slot(props))
    }
}

/// `NavUser` shows the signed in user, or the configured profile if nobody is signed in.
pub struct NavUser;

impl Component for NavUser {
    fn render(&self, _props: Props, scope: &Scope<'_>) -> rivena::Result<Node> {
        let ctx = use_view(scope)?;
        let (name, email) = match ctx.auth.user() {
            Some(user) => {
                let name = user.email.split('@').next().unwrap_or_default().to_string();
                (name, user.email.clone())
            }
            None => (ctx.profile.name.clone(), ctx.profile.email.clone()),
        };
        let sign_out = ctx.auth.user().map(|_| {
            element! {
                Button(id: "sign-out", variant: "ghost", size: "sm", onClick: ctx.dispatcher.send_on(Action::SignOut)) {
                    "Sign out"
                }
            }
        });
        Ok(element! {
            div(class: "flex items-center gap-4 px-4 border-t") {
                Avatar(name: &name)
                div(class: "flex-1") {
                    p(class: "font-medium") { #(Node::text(name)) }
                    p(class: "text-gray-500") { #(Node::text(email)) }
                }
                #(sign_out)
                Tooltip {
                    TooltipTrigger {
                        span(class: "text-gray-500") { "⇅" }
                    }
                    TooltipContent { "Account" }
                }
            }
        })
    }
}

/// `AppSidebar` is the navigation column: team, search, tabs, tab content and user.
pub struct AppSidebar;

impl Component for AppSidebar {
    fn render(&self, _props: Props, scope: &Scope<'_>) -> rivena::Result<Node> {
        let ctx = use_view(scope)?;
        let active = ctx.state.sidebar.active_tab;
        let team = data::teams().into_iter().next();

        let tabs = Tab::ALL.into_iter().map(|tab| {
            let label = format!("{} {}", tab.icon(), tab.label());
            element! {
                TabButton(tab: tab.as_str(), active: tab == active) {
                    button(id: format!("tab-{}", tab), onClick: ctx.dispatcher.send_on(Action::SelectTab(tab))) {
                        #(Node::text(label))
                    }
                }
            }
        });

        let content = match active {
            Tab::Timeline => element!(TimelineContent),
            Tab::Goals => element!(GoalsContent),
            Tab::Memories => element!(MemoriesContent),
        };

        Ok(element! {
            div(class: "flex-col border-r", style: style! { "width": SIDEBAR_WIDTH, "flex_shrink": 0 }) {
                div(class: "px-4 pt-4 pb-4 border-b") {
                    #(team.map(|team| element!(TeamSwitcher(name: team.name, plan: team.plan))))
                    SearchForm(class: "mt-4")
                }
                div(class: "flex border-b") {
                    #(tabs)
                }
                div(class: "flex-1") {
                    #(content)
                }
                NavUser
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::AppState, views::test_support::*};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_tab_button_runs_both_handlers() {
        let clicked = Arc::new(Mutex::new(0));
        let on_click = Handler::new({
            let clicked = clicked.clone();
            move |_| *clicked.lock().unwrap() += 1
        });
        let host = resolve(
            element! {
                TabButton(tab: "goals", active: true) {
                    button(id: "tab-goals", class: "px-3", onClick: on_click) { "Goals" }
                }
            },
            &Scope::root(),
        )
        .unwrap();
        let props = host[0].props().unwrap();
        assert_eq!(host[0].tag(), Some("button"));
        assert_eq!(props.get_str("id"), Some("tab-goals"));
        assert!(props.class().unwrap().starts_with("flex-1 justify-center"));
        assert!(props.class().unwrap().ends_with("border-purple-600 px-3"));
        assert!(!props.contains("tab"));

        props.handler("onClick").unwrap()(&Event::Click);
        assert_eq!(*clicked.lock().unwrap(), 1);
    }

    #[test]
    fn test_sidebar_switches_tabs() {
        let (ctx, mut rx) = context(AppState::default());
        let tree = render_view(&ctx, element!(AppSidebar), 34);
        let text = tree.to_string();
        assert!(text.contains("Rivena AI"));
        assert!(text.contains("Your Companion"));
        assert!(text.contains("Conversation History"));
        assert!(text.contains("shadcn"));
        assert!(text.contains("m@example.com"));

        assert!(tree.dispatch("tab-memories", &Event::Click));
        assert_eq!(rx.try_next().unwrap(), Some(Action::SelectTab(Tab::Memories)));

        let mut state = AppState::default();
        state.sidebar.active_tab = Tab::Memories;
        let (ctx, _rx) = context(state);
        let text = render_view(&ctx, element!(AppSidebar), 34).to_string();
        assert!(text.contains("What I Know About You"));
        assert!(!text.contains("Conversation History"));
    }

    #[test]
    fn test_nav_user_shows_signed_in_user() {
        let (mut ctx, mut rx) = context(AppState::default());
        ctx.auth.sign_up("ada@example.com", "analytical").unwrap();
        let tree = render_view(&ctx, element!(NavUser), 40);
        let text = tree.to_string();
        assert!(text.contains("ada@example.com"));
        assert!(text.contains("Sign out"));
        assert!(tree.dispatch("sign-out", &Event::Click));
        assert_eq!(rx.try_next().unwrap(), Some(Action::SignOut));
    }
}
