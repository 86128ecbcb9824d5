use crate::{
    data::{memory_categories, Memory},
    state::Tab,
    views::{section_header, use_view},
};
use rivena::prelude::*;

fn memory_item(memory: &Memory) -> Node {
    element! {
        div(class: "flex items-start gap-4 pl-4 pr-2 mb-2") {
            span { #(Node::text(memory.kind.icon())) }
            div(class: "flex-1") {
                p(class: "text-gray-800") { #(Node::text(memory.content)) }
                p(class: "text-gray-500 gap-2") {
                    span { #(Node::text(format!("◷ {}", memory.learned_label()))) }
                    span(class: "bg-gray-200 px-1") { #(Node::text(format!("{}%", memory.confidence_percent()))) }
                }
            }
        }
    }
}

/// `MemoriesContent` shows what the assistant has learned, grouped by category.
pub struct MemoriesContent;

impl Component for MemoriesContent {
    fn render(&self, _props: Props, scope: &Scope<'_>) -> rivena::Result<Node> {
        let ctx = use_view(scope)?;
        let categories = memory_categories().into_iter().map(|category| {
            let header = section_header(
                ctx,
                Tab::Memories,
                category.key,
                category.label,
                Some(category.items.len().to_string()),
            );
            let items = ctx
                .state
                .sidebar
                .is_expanded(Tab::Memories, category.key)
                .then(|| element!(div(class: "px-2") { #(category.items.iter().map(memory_item)) }));
            element! {
                div(class: "mb-2") {
                    #(header)
                    #(items)
                }
            }
        });

        Ok(element! {
            div {
                div(class: "flex justify-between items-center px-3 py-2") {
                    div(class: "font-medium text-muted-foreground") { "What I Know About You" }
                    div(class: "flex gap-1") {
                        Button(variant: "ghost", size: "sm") { "▥" }
                        Button(variant: "ghost", size: "sm") { "✧" }
                    }
                }
                #(categories)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::AppState, views::test_support::*};

    #[test]
    fn test_memories_content() {
        let (ctx, mut rx) = context(AppState::default());
        let tree = render_view(&ctx, element!(MemoriesContent), 60);
        let text = tree.to_string();
        assert!(text.contains("What I Know About You"));
        assert!(text.contains("Personal Facts"));
        assert!(text.contains("Learned Feb 15"));
        assert!(text.contains("95%"));
        // insights start collapsed
        assert!(text.contains("Insights & Patterns"));
        assert!(!text.contains("procrastinate"));

        assert!(tree.dispatch("toggle-memories-insights", &Event::Click));
        assert_eq!(
            rx.try_next().unwrap(),
            Some(crate::state::Action::ToggleSection {
                tab: Tab::Memories,
                section: "insights".into()
            })
        );
    }
}
