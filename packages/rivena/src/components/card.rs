use crate::{
    component::Component,
    components::with_base_class,
    context::Scope,
    element::{Element, Node},
    error::Result,
    props::Props,
};

macro_rules! styled_component {
    ($(#[$attr:meta])* $name:ident, $tag:literal, $base:literal) => {
        $(#[$attr])*
        pub struct $name;

        impl Component for $name {
            fn render(&self, props: Props, _scope: &Scope<'_>) -> Result<Node> {
                Ok(Element::new($tag, with_base_class(props, $base)).into())
            }
        }
    };
}

styled_component!(
    /// A bordered container grouping related content.
    Card,
    "div",
    "rounded border bg-card"
);
styled_component!(
    /// The heading area of a [`Card`].
    CardHeader,
    "div",
    "flex flex-col px-6 py-4"
);
styled_component!(
    /// The title of a [`Card`].
    CardTitle,
    "h3",
    "font-semibold"
);
styled_component!(
    /// Secondary text beneath a [`CardTitle`].
    CardDescription,
    "p",
    "text-muted-foreground"
);
styled_component!(
    /// The body of a [`Card`].
    CardContent,
    "div",
    "px-6 pb-4"
);
styled_component!(
    /// The footer of a [`Card`], laid out in a row.
    CardFooter,
    "div",
    "flex items-center px-6 pb-4"
);

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use indoc::indoc;

    #[test]
    fn test_card() {
        let node = element! {
            Card {
                CardHeader(class: "px-0 py-0") {
                    CardTitle { "Title" }
                    CardDescription { "Body" }
                }
            }
        };
        let tree = render(node, &Scope::root(), Some(8)).unwrap();
        assert_eq!(
            tree.to_string(),
            indoc! {"
                ╭──────╮
                │Title │
                │Body  │
                ╰──────╯
            "}
        );
    }
}
