use crate::{
    component::Component,
    components::{slot, with_base_class},
    context::Scope,
    element::{Element, Node},
    error::Result,
    merge::cn,
    props::Props,
};

/// The visual variants of a [`Button`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// A filled primary button.
    #[default]
    Default,
    /// A button for destructive actions.
    Destructive,
    /// A bordered button.
    Outline,
    /// A muted button.
    Secondary,
    /// A button without a background.
    Ghost,
    /// A button styled as a link.
    Link,
}

impl ButtonVariant {
    /// Parses a variant name. Unknown names give the default variant.
    pub fn from_name(name: &str) -> Self {
        match name {
            "destructive" => Self::Destructive,
            "outline" => Self::Outline,
            "secondary" => Self::Secondary,
            "ghost" => Self::Ghost,
            "link" => Self::Link,
            _ => Self::Default,
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Self::Default => "bg-primary text-primary-foreground",
            Self::Destructive => "bg-destructive text-white",
            Self::Outline => "border",
            Self::Secondary => "bg-muted text-foreground",
            Self::Ghost => "",
            Self::Link => "text-primary",
        }
    }
}

/// The sizes of a [`Button`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Regular padding.
    #[default]
    Default,
    /// Tight padding.
    Small,
    /// Wide padding.
    Large,
    /// No padding, for single glyphs.
    Icon,
}

impl ButtonSize {
    /// Parses a size name. Unknown names give the default size.
    pub fn from_name(name: &str) -> Self {
        match name {
            "sm" => Self::Small,
            "lg" => Self::Large,
            "icon" => Self::Icon,
            _ => Self::Default,
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Self::Default => "px-4",
            Self::Small => "px-3",
            Self::Large => "px-8",
            Self::Icon => "",
        }
    }
}

/// `Button` renders a `button` element styled by its `variant` and `size` props.
///
/// With `as_child: true` it renders no element of its own: its props, styling included, are
/// forwarded onto its child through a [`Slot`](crate::components::Slot).
pub struct Button;

impl Component for Button {
    fn render(&self, mut props: Props, _scope: &Scope<'_>) -> Result<Node> {
        let variant = ButtonVariant::from_name(props.get_str("variant").unwrap_or_default());
        let size = ButtonSize::from_name(props.get_str("size").unwrap_or_default());
        let as_child = props.get_bool("as_child");
        for key in ["variant", "size", "as_child"] {
            props.remove(key);
        }

        let base = cn(["flex items-center justify-center", variant.class(), size.class()]);
        let props = with_base_class(props, &base);
        Ok(if as_child {
            slot(props)
        } else {
            Element::new("button", props).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_button_classes() {
        let host = resolve(
            element!(Button(variant: "outline", class: "w-full", id: "b") { "Go" }),
            &Scope::root(),
        )
        .unwrap();
        assert_eq!(host[0].tag(), Some("button"));
        let props = host[0].props().unwrap();
        assert_eq!(
            props.class(),
            Some("flex items-center justify-center border px-4 w-full")
        );
        assert!(!props.contains("variant"));
        assert_eq!(props.get_str("id"), Some("b"));
    }

    #[test]
    fn test_button_as_child() {
        let host = resolve(
            element! {
                Button(as_child: true, variant: "link") {
                    a(href: "/chat", class: "underline") { "Chats" }
                }
            },
            &Scope::root(),
        )
        .unwrap();
        assert_eq!(host[0].tag(), Some("a"));
        let props = host[0].props().unwrap();
        assert_eq!(
            props.class(),
            Some("flex items-center justify-center text-primary px-4 underline")
        );
        assert_eq!(props.get_str("href"), Some("/chat"));
        assert_eq!(host[0].text_content(), "Chats");
    }

    #[test]
    fn test_button_as_child_with_slottable() {
        let host = resolve(
            element! {
                Button(as_child: true, variant: "link") {
                    Slottable {
                        a(id: "home", href: "/chat") { "Home" }
                    }
                }
            },
            &Scope::root(),
        )
        .unwrap();
        assert_eq!(host.len(), 1);
        assert_eq!(host[0].tag(), Some("a"));
        let props = host[0].props().unwrap();
        assert_eq!(
            props.class(),
            Some("flex items-center justify-center text-primary px-4")
        );
        assert_eq!(props.get_str("id"), Some("home"));
        assert_eq!(host[0].text_content(), "Home");
    }

    #[test]
    fn test_button_renders_label() {
        let tree = render(element!(Button(variant: "ghost") { "Login" }), &Scope::root(), None).unwrap();
        assert_eq!(tree.to_string(), " Login\n");
    }
}
