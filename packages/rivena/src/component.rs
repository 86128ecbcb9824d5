use crate::{context::Scope, element::Node, error::Result, props::Props};
use std::{
    any::{type_name, Any, TypeId},
    fmt,
    sync::Arc,
};

/// `Component` defines a reusable piece of UI.
///
/// A component receives its props, children included, and the current [`Scope`], and returns
/// the node it renders to. Rendering must be a pure function of those two inputs: the same
/// props and contexts always produce the same node.
///
/// Components are usually unit structs, which lets them appear directly in `element!`:
///
/// ```
/// # use rivena::prelude::*;
/// struct Greeting;
///
/// impl Component for Greeting {
///     fn render(&self, props: Props, _scope: &Scope) -> Result<Node> {
///         let name = props.get_str("name").unwrap_or("world");
///         Ok(Node::text(format!("Hello, {}!", name)))
///     }
/// }
///
/// let node = element!(Greeting(name: "Rivena"));
/// assert_eq!(render(node, &Scope::root(), None).unwrap().to_string(), "Hello, Rivena!\n");
/// ```
pub trait Component: Any + Send + Sync {
    /// Renders the component.
    fn render(&self, props: Props, scope: &Scope<'_>) -> Result<Node>;
}

/// A shared, type-identified reference to a component, used as an element's type.
#[derive(Clone)]
pub struct ComponentRef {
    type_id: TypeId,
    name: &'static str,
    component: Arc<dyn Component>,
}

impl ComponentRef {
    /// Wraps a component.
    pub fn new<C: Component>(component: C) -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: short_type_name(type_name::<C>()),
            component: Arc::new(component),
        }
    }

    /// The component's type name, without its module path.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this refers to a component of type `C`.
    pub fn is<C: Component>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }

    pub(crate) fn render(&self, props: Props, scope: &Scope<'_>) -> Result<Node> {
        self.component.render(props, scope)
    }
}

impl PartialEq for ComponentRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentRef").field(&self.name).finish()
    }
}

fn short_type_name(name: &'static str) -> &'static str {
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    impl Component for A {
        fn render(&self, _props: Props, _scope: &Scope) -> Result<Node> {
            Ok(Node::text("a"))
        }
    }

    impl Component for B {
        fn render(&self, _props: Props, _scope: &Scope) -> Result<Node> {
            Ok(Node::text("b"))
        }
    }

    #[test]
    fn test_identity() {
        let a = ComponentRef::new(A);
        assert_eq!(a, ComponentRef::new(A));
        assert_ne!(a, ComponentRef::new(B));
        assert!(a.is::<A>());
        assert_eq!(a.name(), "A");
        assert_eq!(
            a.render(Props::new(), &Scope::root()).unwrap(),
            Node::text("a")
        );
    }
}
