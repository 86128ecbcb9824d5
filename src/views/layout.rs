use crate::{
    state::Action,
    views::{use_view, AppSidebar},
};
use rivena::prelude::*;

/// `ChatLayout` places its children next to the sidebar.
pub struct ChatLayout;

impl Component for ChatLayout {
    fn render(&self, props: Props, _scope: &Scope<'_>) -> rivena::Result<Node> {
        let (children, _) = props.split_children();
        Ok(element! {
            div(class: "flex w-full bg-background") {
                AppSidebar
                main(class: "flex-1 flex-col") {
                    #(children)
                }
            }
        })
    }
}

/// `NotFound` is shown for paths no route matches.
pub struct NotFound;

impl Component for NotFound {
    fn render(&self, props: Props, scope: &Scope<'_>) -> rivena::Result<Node> {
        let ctx = use_view(scope)?;
        let path = props.get_str("path").unwrap_or_default();
        let go_home = ctx.dispatcher.send_on(Action::Navigate("/chat".into()));
        Ok(element! {
            div(class: "flex-col gap-4 px-4 py-4") {
                h1 { "Not found" }
                p(class: "text-muted-foreground") { #(Node::text(format!("No page at {}", path))) }
                div(class: "flex") {
                    Button(variant: "link", as_child: true) {
                        a(id: "go-home", href: "/chat", onClick: go_home) { "Back to chat" }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{router::Route, state::AppState, views::test_support::*};

    #[test]
    fn test_not_found_links_home() {
        let mut state = AppState::default();
        state.route = Route::resolve("/missing");
        let (ctx, mut rx) = context(state);
        let tree = render_view(&ctx, element!(NotFound(path: "/missing")), 40);
        assert_eq!(
            tree.to_string(),
            "\n Not found\n\n No page at /missing\n\n  Back to chat\n\n"
        );
        assert!(tree.dispatch("go-home", &Event::Click));
        assert_eq!(rx.try_next().unwrap(), Some(Action::Navigate("/chat".into())));
    }

    #[test]
    fn test_layout_places_content_beside_sidebar() {
        let (ctx, _rx) = context(AppState::default());
        let tree = render_view(&ctx, element!(ChatLayout { h1 { "Main" } }), 80);
        let line = tree
            .to_string()
            .lines()
            .find(|line| line.contains("Main"))
            .map(str::to_string)
            .unwrap();
        assert!(line.find("Main").unwrap() >= crate::views::SIDEBAR_WIDTH as usize);
    }
}
