use crate::{
    state::{Action, Message, Sender},
    views::use_view,
};
use rivena::prelude::*;

fn message(message: &Message) -> Node {
    let (row, bubble) = match message.sender {
        Sender::User => (
            "flex justify-end",
            "rounded px-4 max-w-[80%] bg-primary text-primary-foreground",
        ),
        Sender::System => ("flex justify-start", "rounded px-4 max-w-[80%] bg-muted"),
    };
    element! {
        div(class: row) {
            div(class: bubble) { #(Node::text(&message.text)) }
        }
    }
}

/// `ChatView` is the conversation with the assistant: a header, the messages and a composer.
pub struct ChatView;

impl Component for ChatView {
    fn render(&self, _props: Props, scope: &Scope<'_>) -> rivena::Result<Node> {
        let ctx = use_view(scope)?;
        let chat = &ctx.state.chat;
        let dispatcher = &ctx.dispatcher;

        let on_submit =
            dispatcher.on(|event| event.value().map(|value| Action::SubmitMessage(value.to_string())));
        let on_input =
            dispatcher.on(|event| event.value().map(|value| Action::SetDraft(value.to_string())));
        let on_send = dispatcher.send_on(Action::SubmitMessage(chat.draft.clone()));

        Ok(element! {
            div(class: "flex-col") {
                header(class: "flex items-center border-b px-6") {
                    h1(class: "font-semibold") { "Rivena Chat" }
                }
                div(class: "flex-1 px-6 py-4") {
                    div(class: "flex-col gap-4") {
                        #(chat.messages.iter().map(message))
                    }
                }
                div(class: "border-t px-4 py-4") {
                    form(id: "composer", class: "flex items-center gap-2", onSubmit: on_submit) {
                        Input(
                            id: "composer-input",
                            type: "text",
                            placeholder: "Type your message...",
                            value: &chat.draft,
                            class: "flex-1",
                            onInput: on_input,
                        )
                        Button(id: "composer-send", type: "submit", onClick: on_send) { "Send" }
                    }
                }
            }
        })
    }
}

/// `ChatDetail` shows a single conversation, selected by its `id` prop.
pub struct ChatDetail;

impl Component for ChatDetail {
    fn render(&self, props: Props, _scope: &Scope<'_>) -> rivena::Result<Node> {
        let id = props.get_str("id").unwrap_or_default();
        Ok(element! {
            div(class: "px-6 py-4") {
                h1 { #(Node::text(format!("Chat with ID: {}", id))) }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::AppState, views::test_support::*};

    #[test]
    fn test_chat_view() {
        let mut state = AppState::default();
        state.chat.submit("Hi there");
        state.chat.draft = "draft".into();
        let (ctx, mut rx) = context(state);
        let tree = render_view(&ctx, element!(ChatView), 60);
        let text = tree.to_string();
        assert!(text.contains("Rivena Chat"));
        assert!(text.contains("Hello, how can I help you today?"));
        assert!(text.contains("Hi there"));
        assert!(text.contains("draft"));
        assert!(text.contains("Send"));

        // user messages are pushed to the right edge
        let line = text.lines().find(|line| line.contains("Hi there")).unwrap();
        assert!(line.starts_with("    "));

        assert!(tree.dispatch("composer", &Event::Submit { value: "typed".into() }));
        assert!(tree.dispatch("composer-input", &Event::Input { value: "ty".into() }));
        assert!(tree.dispatch("composer-send", &Event::Click));
        assert_eq!(rx.try_next().unwrap(), Some(Action::SubmitMessage("typed".into())));
        assert_eq!(rx.try_next().unwrap(), Some(Action::SetDraft("ty".into())));
        assert_eq!(rx.try_next().unwrap(), Some(Action::SubmitMessage("draft".into())));
    }

    #[test]
    fn test_chat_detail() {
        let tree = render(element!(ChatDetail(id: "42")), &Scope::root(), Some(30)).unwrap();
        assert_eq!(tree.to_string(), "\n  Chat with ID: 42\n\n");
    }
}
