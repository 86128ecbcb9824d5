use crate::{
    component::Component,
    context::Scope,
    element::{Element, ElementType, Node, Renderable},
    error::Result,
    merge::merge_props,
    props::Props,
};
use tracing::debug;

/// `Slot` forwards its props onto a single child element instead of rendering an element of its
/// own.
///
/// Without a [`Slottable`] child, the props are merged onto the first child, which must be an
/// element. With a [`Slottable`] child, the element inside the marker becomes the render target
/// and takes the place of the whole children list: its own children are spliced in where the
/// marker was, next to the marker's siblings.
///
/// Props are merged with [`merge_props`]: handlers on both sides run (the child's first), class
/// lists and style maps combine, and the child's own value wins for everything else.
///
/// # Example
///
/// ```
/// # use rivena::prelude::*;
/// let node = element! {
///     Slot(class: "x") {
///         span { "icon" }
///         Slottable {
///             a(href: "#") { "Sign up" }
///         }
///     }
/// };
/// let Node::Element(target) = slot(node.as_element().unwrap().props().clone()) else {
///     panic!("expected an element");
/// };
/// assert_eq!(target.ty(), &ElementType::from("a"));
/// assert_eq!(target.props().class(), Some("x"));
/// ```
pub struct Slot;

impl Component for Slot {
    fn render(&self, props: Props, _scope: &Scope<'_>) -> Result<Node> {
        Ok(slot(props))
    }
}

/// `SlotClone` merges its props onto its first child element. Renders nothing if there is no
/// such element.
pub struct SlotClone;

impl Component for SlotClone {
    fn render(&self, props: Props, _scope: &Scope<'_>) -> Result<Node> {
        let (children, forwarded) = props.split_children();
        Ok(slot_clone(&forwarded, children))
    }
}

/// `Slottable` marks which child of a [`Slot`] receives the forwarded props.
///
/// Outside of a slot it is transparent and renders its children unchanged.
pub struct Slottable;

impl Slottable {
    /// Wraps `children` in the marker.
    pub fn wrap<N: Into<Node>>(children: N) -> Node {
        Node::Slottable(Box::new(children.into()))
    }
}

impl Renderable for Slottable {
    fn into_node(self, mut props: Props) -> Node {
        Self::wrap(props.take_children())
    }
}

enum Target {
    Unmarked,
    Element(ElementType, Props),
    Opaque,
}

/// Resolves a slot's props into the node it renders.
pub fn slot(props: Props) -> Node {
    let (children, forwarded) = props.split_children();
    let children = children.into_list();

    let mut target = Target::Unmarked;
    let mut new_children = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Node::Slottable(inner) if matches!(target, Target::Unmarked) => {
                // `element!` wraps the marker's content in a fragment.
                let mut content = inner.into_list();
                match content.pop() {
                    Some(Node::Element(element)) if content.is_empty() => {
                        let (ty, mut props) = element.into_parts();
                        new_children.push(props.take_children());
                        target = Target::Element(ty, props);
                    }
                    _ => target = Target::Opaque,
                }
            }
            child => new_children.push(child),
        }
    }

    match target {
        Target::Unmarked => slot_clone(&forwarded, Node::Fragment(new_children)),
        Target::Element(ty, props) => {
            let target = Element::new(ty, props.with_children(new_children));
            slot_clone(&forwarded, target.into())
        }
        Target::Opaque => {
            debug!(
                forwarded = forwarded.len(),
                "slottable content is not an element, rendering its siblings only"
            );
            Node::Fragment(new_children)
        }
    }
}

/// Merges `forwarded` onto the first element of `children`, or returns [`Node::Empty`] if the
/// first child is not an element.
pub fn slot_clone(forwarded: &Props, children: Node) -> Node {
    match children.into_list().into_iter().next() {
        Some(Node::Element(element)) => {
            let (ty, props) = element.into_parts();
            Element::new(ty, merge_props(forwarded, &props)).into()
        }
        Some(_) | None => {
            debug!("slot has no element to forward props onto");
            Node::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{handler::Event, handler::Handler, prelude::*};
    use std::sync::{Arc, Mutex};

    fn target_of(node: Node) -> Element {
        match node {
            Node::Element(e) => e,
            other => panic!("expected an element, got {:?}", other),
        }
    }

    #[test]
    fn test_merges_onto_only_child() {
        let props = Props::new()
            .with("class", "x")
            .with("id", "forwarded")
            .with_children(element!(button(id: "own", class: "y") { "Go" }));
        let target = target_of(slot(props));
        assert_eq!(target.ty(), &ElementType::from("button"));
        assert_eq!(target.props().class(), Some("x y"));
        assert_eq!(target.props().get_str("id"), Some("own"));
        assert_eq!(target.children().clone().into_list(), vec![Node::text("Go")]);
    }

    #[test]
    fn test_slottable_retargets() {
        let a = element!(span { "A" });
        let c = element!(i { "C" });
        let props = Props::new().with("class", "x").with_children(vec![
            a.clone(),
            Slottable::wrap(Element::host("b").with_children(c.clone())),
        ]);

        let target = target_of(slot(props));
        assert_eq!(target.ty(), &ElementType::from("b"));
        assert_eq!(target.children().clone().into_list(), vec![a, c]);
        assert_eq!(target.props().class(), Some("x"));
    }

    #[test]
    fn test_macro_built_slottable_retargets() {
        let node = element! {
            Slot(class: "x") {
                span { "icon" }
                Slottable {
                    a(href: "#", class: "link") { "Sign up" }
                }
            }
        };
        let target = target_of(slot(node.as_element().unwrap().props().clone()));
        assert_eq!(target.ty(), &ElementType::from("a"));
        assert_eq!(target.props().class(), Some("x link"));
        assert_eq!(target.props().get_str("href"), Some("#"));
        assert_eq!(
            target.children().clone().into_list(),
            vec![element!(span { "icon" }), Node::text("Sign up")]
        );
    }

    #[test]
    fn test_marker_with_several_nodes_renders_siblings() {
        let node = element! {
            Slot(class: "x") {
                span { "icon" }
                Slottable {
                    a { "one" }
                    b { "two" }
                }
            }
        };
        assert_eq!(
            slot(node.as_element().unwrap().props().clone()),
            Node::Fragment(vec![element!(span { "icon" })])
        );
    }

    #[test]
    fn test_first_marker_wins() {
        let props = Props::new().with("class", "x").with_children(vec![
            Slottable::wrap(Element::host("first")),
            Slottable::wrap(Element::host("second")),
        ]);
        let target = target_of(slot(props));
        assert_eq!(target.ty(), &ElementType::from("first"));
        assert_eq!(
            target.children().clone().into_list(),
            vec![Slottable::wrap(Element::host("second"))]
        );
    }

    #[test]
    fn test_opaque_marker_renders_siblings() {
        let props = Props::new().with("class", "x").with_children(vec![
            Node::text("before"),
            Slottable::wrap(Node::Empty),
            Node::text("after"),
        ]);
        assert_eq!(
            slot(props),
            Node::Fragment(vec![Node::text("before"), Node::text("after")])
        );
    }

    #[test]
    fn test_empty_children_render_nothing() {
        assert_eq!(slot(Props::new().with("class", "x")), Node::Empty);
        assert_eq!(
            slot(Props::new().with_children(Node::Fragment(vec![]))),
            Node::Empty
        );
        assert_eq!(slot(Props::new().with_children("just text")), Node::Empty);
    }

    #[test]
    fn test_handlers_run_through_slot() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let wrapper = Handler::new({
            let log = log.clone();
            move |_: &Event| log.lock().unwrap().push("wrapper")
        });
        let caller = Handler::new({
            let log = log.clone();
            move |_: &Event| log.lock().unwrap().push("caller")
        });

        let node = element! {
            Slot(onClick: wrapper) {
                button(onClick: caller) { "Press" }
            }
        };
        let tree = render(
            element!(div { #(node) }),
            &Scope::root(),
            None,
        )
        .unwrap();
        assert_eq!(tree.to_string(), "Press\n");

        let target = target_of(slot(
            element!(Slot(onClick: Handler::new(|_| {})) { button(id: "b") })
                .as_element()
                .unwrap()
                .props()
                .clone(),
        ));
        assert!(target.props().handler("onClick").is_some());
    }

    #[test]
    fn test_slot_component_dispatch() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let wrapper = Handler::new({
            let log = log.clone();
            move |_: &Event| log.lock().unwrap().push("wrapper")
        });
        let caller = Handler::new({
            let log = log.clone();
            move |_: &Event| log.lock().unwrap().push("caller")
        });
        let tree = render(
            element! {
                Slot(onClick: wrapper) {
                    button(id: "go", onClick: caller) { "Go" }
                }
            },
            &Scope::root(),
            None,
        )
        .unwrap();
        assert!(tree.dispatch("go", &Event::Click));
        assert_eq!(*log.lock().unwrap(), vec!["caller", "wrapper"]);
    }

    #[test]
    fn test_slottable_outside_slot_is_transparent() {
        let x = element!(div(class: "p-1") { "X" });
        let scope = Scope::root();
        assert_eq!(
            resolve(Slottable::wrap(x.clone()), &scope).unwrap(),
            resolve(x.clone(), &scope).unwrap()
        );
        assert_eq!(
            element!(Slottable { #(x.clone()) }),
            Node::Slottable(Box::new(Node::Fragment(vec![x])))
        );
    }

    #[test]
    fn test_slot_clone_component() {
        let node = element! {
            SlotClone(class: "x") {
                "not an element"
            }
        };
        let tree = render(node, &Scope::root(), None).unwrap();
        assert_eq!(tree.to_string(), "");
    }
}
