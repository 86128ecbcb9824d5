use core::ops::Deref;
use std::{fmt, sync::Arc};

/// An event delivered to a handler prop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The element was activated, e.g. a button press.
    Click,
    /// A form was submitted with the given value.
    Submit {
        /// The submitted value.
        value: String,
    },
    /// An input's value changed.
    Input {
        /// The new value.
        value: String,
    },
}

impl Event {
    /// The prop key under which handlers for this event are stored.
    pub fn handler_key(&self) -> &'static str {
        match self {
            Self::Click => "onClick",
            Self::Submit { .. } => "onSubmit",
            Self::Input { .. } => "onInput",
        }
    }

    /// The value carried by the event, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Click => None,
            Self::Submit { value } | Self::Input { value } => Some(value),
        }
    }
}

/// `Handler` is an event handler which can be stored in a prop map and invoked using function
/// call syntax.
///
/// Handlers are cheap to clone. Any `Fn(&Event)` closure which is `Send + Sync + 'static` can be
/// converted into a `Handler`.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(&Event) + Send + Sync + 'static>);

impl Handler {
    /// Creates a handler from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Creates a handler which invokes `first` and then `second` with the same event.
    pub fn chain(first: &Handler, second: &Handler) -> Self {
        let first = first.clone();
        let second = second.clone();
        Self::new(move |event| {
            first(event);
            second(event);
        })
    }

    /// Returns `true` if both handlers refer to the same closure.
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }
}

impl<F> From<F> for Handler
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl Deref for Handler {
    type Target = dyn Fn(&Event) + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}
