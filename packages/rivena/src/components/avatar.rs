use crate::{
    component::Component,
    components::with_base_class,
    context::Scope,
    element::{Element, Node},
    error::Result,
    props::Props,
};

/// Returns the initials of a name: the first letter of each word, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// `Avatar` shows a user's initials, taken from its `name` prop.
///
/// Terminals can't show the image a graphical avatar would, so the initials fallback is always
/// used. Children, if given, replace the initials.
pub struct Avatar;

impl Component for Avatar {
    fn render(&self, mut props: Props, _scope: &Scope<'_>) -> Result<Node> {
        let name = props
            .remove("name")
            .and_then(|name| name.as_str().map(initials))
            .unwrap_or_default();
        if props.children().is_empty() {
            props.set_children(name);
        }
        Ok(Element::new("span", with_base_class(props, "bg-muted px-1 font-bold")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("  grace   brewster hopper "), "GBH");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_avatar() {
        let tree = render(element!(Avatar(name: "Ada Lovelace")), &Scope::root(), None).unwrap();
        assert_eq!(tree.to_string(), " AL\n");

        let tree = render(element!(Avatar(name: "Ada") { "?" }), &Scope::root(), None).unwrap();
        assert_eq!(tree.to_string(), " ?\n");
    }
}
