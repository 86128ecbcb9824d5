use crate::{state::Action, views::use_view};
use rivena::prelude::*;

/// `LoginForm` signs the user in with an email and password.
pub struct LoginForm;

impl Component for LoginForm {
    fn render(&self, props: Props, scope: &Scope<'_>) -> rivena::Result<Node> {
        let ctx = use_view(scope)?;
        let login = &ctx.state.login;
        let dispatcher = &ctx.dispatcher;
        let loading = ctx.auth.loading();

        let error = login.error.as_ref().map(|error| {
            element! {
                div(class: "mb-4 px-2 text-red-500 bg-red-50 rounded") {
                    #(Node::text(error))
                }
            }
        });
        let on_email =
            dispatcher.on(|event| event.value().map(|v| Action::SetLoginEmail(v.to_string())));
        let on_password =
            dispatcher.on(|event| event.value().map(|v| Action::SetLoginPassword(v.to_string())));

        Ok(element! {
            div(class: cn(["flex flex-col gap-6", props.class().unwrap_or_default()])) {
                Card {
                    CardHeader {
                        CardTitle { "Login to your account" }
                        CardDescription { "Enter your email below to login to your account" }
                    }
                    CardContent {
                        form(id: "login-form", onSubmit: dispatcher.send_on(Action::SubmitLogin)) {
                            #(error)
                            div(class: "flex flex-col gap-4") {
                                div(class: "flex flex-col") {
                                    Label(for: "email") { "Email" }
                                    Input(
                                        id: "email",
                                        type: "email",
                                        placeholder: "m@example.com",
                                        value: &login.email,
                                        required: true,
                                        onInput: on_email,
                                    )
                                }
                                div(class: "flex flex-col") {
                                    div(class: "flex items-center justify-between") {
                                        Label(for: "password") { "Password" }
                                        a(href: "#", class: "text-muted-foreground") { "Forgot your password?" }
                                    }
                                    Input(
                                        id: "password",
                                        type: "password",
                                        value: &login.password,
                                        required: true,
                                        onInput: on_password,
                                    )
                                }
                                div(class: "flex flex-col gap-3") {
                                    Button(
                                        id: "login-submit",
                                        type: "submit",
                                        class: "w-full",
                                        disabled: loading,
                                        onClick: dispatcher.send_on(Action::SubmitLogin),
                                    ) {
                                        #(Node::text(if loading { "Logging in..." } else { "Login" }))
                                    }
                                    Button(
                                        id: "login-google",
                                        type: "button",
                                        variant: "outline",
                                        class: "w-full",
                                        onClick: dispatcher.send_on(Action::LoginWithGoogle),
                                    ) {
                                        "Login with Google"
                                    }
                                }
                            }
                            div(class: "flex justify-center gap-1 mt-4") {
                                "Don't have an account?"
                                a(id: "sign-up", href: "#", onClick: dispatcher.send_on(Action::SubmitSignUp)) {
                                    "Sign up"
                                }
                            }
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::MemoryAuthBackend, auth::AuthState, state::AppState, views::test_support::*};
    use std::sync::Arc;

    #[test]
    fn test_login_form() {
        let mut state = AppState::default();
        state.login.email = "ada@example.com".into();
        state.login.password = "secret".into();
        state.login.error = Some("Invalid login credentials".into());
        let (ctx, mut rx) = context(state);
        let tree = render_view(&ctx, element!(LoginForm), 60);
        let text = tree.to_string();
        assert!(text.contains("Login to your account"));
        assert!(text.contains("ada@example.com"));
        assert!(text.contains("••••••"));
        assert!(!text.contains("secret"));
        assert!(text.contains("Invalid login credentials"));
        assert!(text.contains("Login with Google"));
        assert!(text.contains("Don't have an account? Sign up"));

        assert!(tree.dispatch("email", &Event::Input { value: "a@b.co".into() }));
        assert!(tree.dispatch("login-form", &Event::Submit { value: String::new() }));
        assert!(tree.dispatch("login-google", &Event::Click));
        assert_eq!(rx.try_next().unwrap(), Some(Action::SetLoginEmail("a@b.co".into())));
        assert_eq!(rx.try_next().unwrap(), Some(Action::SubmitLogin));
        assert_eq!(rx.try_next().unwrap(), Some(Action::LoginWithGoogle));
    }

    #[test]
    fn test_loading_disables_login() {
        let (mut ctx, _rx) = context(AppState::default());
        // a fresh auth state is loading until its session is restored
        ctx.auth = AuthState::new(Arc::new(MemoryAuthBackend::new()));
        let tree = render_view(&ctx, element!(LoginForm), 60);
        let text = tree.to_string();
        assert!(text.contains("Logging in..."));
        assert!(!tree.handles("login-submit", "onClick"));
        assert!(tree.handles("login-google", "onClick"));
    }
}
