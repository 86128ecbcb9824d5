use crate::{
    data::{timeline_sections, Conversation, ConversationKind},
    state::Tab,
    views::{section_header, use_view},
};
use rivena::prelude::*;

fn conversation(conv: &Conversation) -> Node {
    let time = match conv.duration {
        Some(duration) => format!("{} · {}", conv.time, duration),
        None => conv.time.to_string(),
    };
    let actions = (conv.kind == ConversationKind::Voice).then(|| {
        element! {
            div(class: "flex items-center gap-4 mt-1") {
                button(class: "bg-blue-50 text-blue-600 px-2") { "▶ Play" }
                button(class: "bg-gray-50 text-gray-600 px-2") { "☰ Transcript" }
            }
        }
    });
    let tags = (!conv.tags.is_empty()).then(|| {
        let initials = conv.tags.iter().enumerate().map(|(i, tag)| {
            let class = if i == 0 {
                "bg-green-200 text-green-700 font-bold"
            } else {
                "bg-blue-200 text-blue-700 font-bold"
            };
            let initial: String = tag.chars().take(1).collect();
            element!(span(class: class) { #(Node::text(initial)) })
        });
        element! {
            div(class: "flex items-center gap-4 mt-1") {
                span { #(initials) }
                span(class: "text-gray-500") { #(Node::text(conv.tags.join(", "))) }
            }
        }
    });

    element! {
        div(class: "px-3 mx-2 border-l border-purple-500") {
            div(class: "flex items-center justify-between") {
                span(class: "gap-2") {
                    span { #(Node::text(conv.kind.icon())) }
                    span(class: "font-medium") { #(Node::text(conv.title)) }
                }
                span(class: "text-gray-500") { #(Node::text(time)) }
            }
            p(class: "text-gray-600") { #(Node::text(conv.description)) }
            #(actions)
            #(tags)
        }
    }
}

/// `TimelineContent` lists past conversations by day.
pub struct TimelineContent;

impl Component for TimelineContent {
    fn render(&self, _props: Props, scope: &Scope<'_>) -> rivena::Result<Node> {
        let ctx = use_view(scope)?;
        let sections = timeline_sections().into_iter().map(|section| {
            let open = ctx.state.sidebar.is_expanded(Tab::Timeline, section.id);
            let header = section_header(ctx, Tab::Timeline, section.id, section.title, None);
            let body = open.then(|| {
                element! {
                    div(class: "flex-col gap-4 py-2") {
                        #(section.conversations.iter().map(conversation))
                    }
                }
            });
            element! {
                div(class: "mb-4") {
                    #(header)
                    #(body)
                }
            }
        });

        Ok(element! {
            div {
                div(class: "flex justify-between items-center px-3 py-2") {
                    h3(class: "font-medium text-gray-700") { "Conversation History" }
                    span(class: "text-gray-500") { "⧩" }
                }
                #(sections)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::AppState, views::test_support::*};

    #[test]
    fn test_timeline_sections() {
        let (ctx, _rx) = context(AppState::default());
        let text = render_view(&ctx, element!(TimelineContent), 60).to_string();
        assert!(text.contains("Today"));
        assert!(text.contains("Morning Check-in"));
        assert!(text.contains("12:30 PM · 12 min"));
        assert!(text.contains("▶ Play"));
        assert!(text.contains("Work, Exercise"));
        assert!(text.contains("Daily Summary"));
    }

    #[test]
    fn test_collapsed_section_hides_conversations() {
        let mut state = AppState::default();
        state.sidebar.toggle(Tab::Timeline, "today").unwrap();
        let (ctx, _rx) = context(state);
        let text = render_view(&ctx, element!(TimelineContent), 60).to_string();
        assert!(text.contains("Today"));
        assert!(!text.contains("Morning Check-in"));
        assert!(text.contains("Daily Summary"));
    }
}
