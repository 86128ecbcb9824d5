use crate::{
    element::Node,
    error::{Error, Result},
};
use std::{
    any::{type_name, Any},
    fmt,
    sync::Arc,
};

/// A context value which can be provided to a subtree.
#[derive(Clone)]
pub struct ContextValue {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl ContextValue {
    /// Wraps a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// The type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns a reference to the value if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }
}

impl PartialEq for ContextValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextValue").field(&self.type_name).finish()
    }
}

/// The payload of [`Node::Provider`]: a context value and the subtree which can see it.
#[derive(Clone, Debug, PartialEq)]
pub struct Provider {
    value: ContextValue,
    children: Box<Node>,
}

impl Provider {
    /// Splits the provider into its value and children.
    pub fn into_parts(self) -> (ContextValue, Node) {
        (self.value, *self.children)
    }
}

/// Returns a node which provides `value` to every component rendered within `children`.
///
/// Providers nest: a component sees the innermost value of each type.
pub fn provide<T, N>(value: T, children: N) -> Node
where
    T: Any + Send + Sync,
    N: Into<Node>,
{
    provide_value(ContextValue::new(value), children)
}

/// Like [`provide`], for an already wrapped value.
pub fn provide_value<N: Into<Node>>(value: ContextValue, children: N) -> Node {
    Node::Provider(Provider {
        value,
        children: Box::new(children.into()),
    })
}

/// The chain of contexts visible to a component while it renders.
///
/// Scopes are threaded explicitly through rendering. Each provider pushes a child scope for its
/// subtree; lookups walk from the innermost scope outwards.
#[derive(Clone, Copy, Default)]
pub enum Scope<'a> {
    /// The empty scope at the top of a render pass.
    #[default]
    Root,
    /// A scope with one more context than its parent.
    Child {
        /// The enclosing scope.
        parent: &'a Scope<'a>,
        /// The context this scope adds.
        context: &'a ContextValue,
    },
}

impl<'a> Scope<'a> {
    /// Creates an empty scope.
    pub fn root() -> Self {
        Self::Root
    }

    /// Creates a child scope which adds `context`.
    pub fn with_context(&'a self, context: &'a ContextValue) -> Self {
        Self::Child {
            parent: self,
            context,
        }
    }

    /// Returns the innermost context of type `T`, if any.
    pub fn try_context<T: Any>(&self) -> Option<&'a T> {
        match *self {
            Self::Root => None,
            Self::Child { parent, context } => context
                .downcast_ref::<T>()
                .or_else(|| parent.try_context::<T>()),
        }
    }

    /// Returns the innermost context of type `T`.
    ///
    /// Fails with [`Error::MissingContext`] if no ancestor provides one.
    pub fn context<T: Any>(&self) -> Result<&'a T> {
        self.try_context().ok_or(Error::MissingContext {
            type_name: type_name::<T>(),
        })
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut scope = self;
        while let Scope::Child { parent, context } = *scope {
            list.entry(&context.type_name());
            scope = parent;
        }
        list.finish()
    }
}
