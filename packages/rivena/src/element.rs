use crate::{
    component::{Component, ComponentRef},
    context::Provider,
    props::{PropValue, Props},
};
use std::{borrow::Cow, fmt};

/// The renderable type of an [`Element`]: either a primitive host tag or a component.
#[derive(Clone, PartialEq)]
pub enum ElementType {
    /// A primitive tag such as `div`, `button` or `input`.
    Host(Cow<'static, str>),
    /// A component, compared by type identity.
    Component(ComponentRef),
}

impl ElementType {
    /// Creates an element type for the given component.
    pub fn component<C: Component>(component: C) -> Self {
        Self::Component(ComponentRef::new(component))
    }

    /// Returns the host tag name, if this is a host type.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Host(tag) => Some(tag),
            Self::Component(_) => None,
        }
    }

    /// Returns `true` if this is the given component type.
    pub fn is<C: Component>(&self) -> bool {
        match self {
            Self::Host(_) => false,
            Self::Component(c) => c.is::<C>(),
        }
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(tag) => write!(f, "<{}>", tag),
            Self::Component(c) => write!(f, "<{}>", c.name()),
        }
    }
}

impl From<&'static str> for ElementType {
    fn from(tag: &'static str) -> Self {
        Self::Host(Cow::Borrowed(tag))
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        Self::Host(Cow::Owned(tag))
    }
}

impl From<ComponentRef> for ElementType {
    fn from(c: ComponentRef) -> Self {
        Self::Component(c)
    }
}

/// An immutable rendering-tree node: a renderable type plus a flat prop map.
///
/// Elements are never modified in place. The builder methods consume the element and return a
/// new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    ty: ElementType,
    props: Props,
}

impl Element {
    /// Creates an element from a type and its props.
    pub fn new<T: Into<ElementType>>(ty: T, props: Props) -> Self {
        Self {
            ty: ty.into(),
            props,
        }
    }

    /// Creates a host element with no props.
    pub fn host(tag: &'static str) -> Self {
        Self::new(tag, Props::new())
    }

    /// Returns a copy of this element with the given prop set.
    pub fn with_prop<K: Into<String>, V: Into<PropValue>>(self, key: K, value: V) -> Self {
        Self {
            ty: self.ty,
            props: self.props.with(key, value),
        }
    }

    /// Returns a copy of this element with its children replaced.
    pub fn with_children<N: Into<Node>>(self, children: N) -> Self {
        Self {
            ty: self.ty,
            props: self.props.with_children(children),
        }
    }

    /// The element's renderable type.
    pub fn ty(&self) -> &ElementType {
        &self.ty
    }

    /// The element's props, children included.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// The element's children.
    pub fn children(&self) -> &Node {
        self.props.children()
    }

    /// Splits the element into its type and props.
    pub fn into_parts(self) -> (ElementType, Props) {
        (self.ty, self.props)
    }
}

/// A node of a declarative element tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Node {
    /// Renders nothing.
    #[default]
    Empty,
    /// A run of text.
    Text(String),
    /// An element.
    Element(Element),
    /// A list of nodes rendered in order without a wrapper.
    Fragment(Vec<Node>),
    /// The marker tagging which child of a `Slot` receives the forwarded props. Rendered
    /// anywhere else, it is transparent.
    Slottable(Box<Node>),
    /// Provides a context value to its subtree.
    Provider(Provider),
}

impl Node {
    /// Creates a text node.
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Text(text.into())
    }

    /// Returns `true` for [`Node::Empty`] and for fragments which contain only empty nodes.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Fragment(nodes) => nodes.iter().all(Node::is_empty),
            _ => false,
        }
    }

    /// Returns `true` if this node is the slottable marker.
    pub fn is_slottable(&self) -> bool {
        matches!(self, Self::Slottable(_))
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Realizes the node into an ordered list of children, flattening fragments and dropping
    /// empty nodes.
    pub fn into_list(self) -> Vec<Node> {
        let mut ret = Vec::new();
        self.flatten_into(&mut ret);
        ret
    }

    fn flatten_into(self, dest: &mut Vec<Node>) {
        match self {
            Self::Empty => {}
            Self::Fragment(nodes) => {
                for node in nodes {
                    node.flatten_into(dest);
                }
            }
            node => dest.push(node),
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Self::Element(e)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Fragment(nodes)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(node: Option<T>) -> Self {
        node.map_or(Self::Empty, Into::into)
    }
}

/// Types which may appear as the type of an element in the `element!` macro.
pub trait Renderable {
    /// Builds the node for this type with the given props.
    fn into_node(self, props: Props) -> Node;
}

impl<C: Component> Renderable for C {
    fn into_node(self, props: Props) -> Node {
        Element::new(ElementType::component(self), props).into()
    }
}

/// Used by the `element!` macro to extend a collection with nodes.
#[doc(hidden)]
pub trait ExtendWithNodes {
    fn extend<E: Extend<Node>>(self, dest: &mut E);
}

impl ExtendWithNodes for Node {
    fn extend<E: Extend<Node>>(self, dest: &mut E) {
        dest.extend([self]);
    }
}

impl ExtendWithNodes for Element {
    fn extend<E: Extend<Node>>(self, dest: &mut E) {
        dest.extend([self.into()]);
    }
}

impl<U, I> ExtendWithNodes for I
where
    I: IntoIterator<Item = U>,
    U: Into<Node>,
{
    fn extend<E: Extend<Node>>(self, dest: &mut E) {
        dest.extend(self.into_iter().map(|e| e.into()));
    }
}

/// Used by the `element!` macro to extend a collection with nodes.
#[doc(hidden)]
pub fn extend_with_nodes<T, U>(dest: &mut T, nodes: U)
where
    T: Extend<Node>,
    U: ExtendWithNodes,
{
    nodes.extend(dest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_list_flattens() {
        let node = Node::Fragment(vec![
            Node::text("a"),
            Node::Empty,
            Node::Fragment(vec![Node::text("b"), Node::Fragment(vec![Node::text("c")])]),
        ]);
        assert_eq!(
            node.into_list(),
            vec![Node::text("a"), Node::text("b"), Node::text("c")]
        );
        assert!(Node::Fragment(vec![Node::Empty]).is_empty());
    }

    #[test]
    fn test_builders_produce_new_nodes() {
        let original = Element::host("div").with_prop("class", "a");
        let updated = original.clone().with_prop("class", "b");
        assert_eq!(original.props().class(), Some("a"));
        assert_eq!(updated.props().class(), Some("b"));
        assert_eq!(updated.ty(), &ElementType::from("div"));
    }

    #[test]
    fn test_extend_with_nodes() {
        let mut nodes: Vec<Node> = Vec::new();
        extend_with_nodes(&mut nodes, Node::text("a"));
        extend_with_nodes(&mut nodes, Element::host("hr"));
        extend_with_nodes(&mut nodes, Some(Node::text("b")));
        extend_with_nodes(&mut nodes, vec!["c", "d"]);
        assert_eq!(nodes.len(), 5);
    }
}
