use crate::{element::Node, handler::Handler};
use std::collections::{btree_map, BTreeMap};

/// The reserved prop name under which an element's children are stored.
pub const CHILDREN: &str = "children";

static EMPTY_NODE: Node = Node::Empty;

/// A single scalar entry of a [`StyleMap`].
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// A string value such as a color name or a percentage.
    Str(String),
    /// An integer value, usually a length in terminal cells.
    Int(i64),
    /// A floating point value.
    Float(f64),
    /// A flag.
    Bool(bool),
}

impl StyleValue {
    /// Returns the value as a string slice if it holds a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a number if it holds an integer or a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a flag if it holds a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for StyleValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for StyleValue {
    fn from(i: i32) -> Self {
        Self::Int(i as _)
    }
}

impl From<u32> for StyleValue {
    fn from(i: u32) -> Self {
        Self::Int(i as _)
    }
}

impl From<f64> for StyleValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A flat key/value style description, attached to elements under the `style` prop.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleMap(BTreeMap<String, StyleValue>);

impl StyleMap {
    /// Creates an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the map with the given entry set.
    pub fn with<K: Into<String>, V: Into<StyleValue>>(mut self, key: K, value: V) -> Self {
        self.set(key, value);
        self
    }

    /// Sets an entry, replacing any previous value.
    pub fn set<K: Into<String>, V: Into<StyleValue>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    /// Gets an entry.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    /// Returns `true` if no entries are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Shallow-merges `other` over `self`. Keys set in `other` win.
    pub fn merged(&self, other: &StyleMap) -> StyleMap {
        let mut ret = self.clone();
        ret.extend(other.clone());
        ret
    }
}

impl Extend<(String, StyleValue)> for StyleMap {
    fn extend<T: IntoIterator<Item = (String, StyleValue)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for StyleMap {
    type Item = (String, StyleValue);
    type IntoIter = btree_map::IntoIter<String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Builds a [`StyleMap`] from `key: value` pairs.
///
/// ```
/// # use rivena::*;
/// let style = style! { "color": "blue", "padding": 1 };
/// assert_eq!(style.get("padding"), Some(&StyleValue::Int(1)));
/// ```
#[macro_export]
macro_rules! style {
    ($($key:literal : $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut style = $crate::StyleMap::new();
        $(style.set($key, $value);)*
        style
    }};
}

/// A single prop value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    /// A string, e.g. `class`, `id` or `placeholder`.
    Str(String),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A flag, e.g. `disabled`.
    Bool(bool),
    /// A style mapping.
    Style(StyleMap),
    /// An event handler.
    Handler(Handler),
    /// A nested node, most commonly the children.
    Node(Node),
}

impl PropValue {
    /// Returns the value as a string slice if it holds a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the handler if the value holds one.
    pub fn as_handler(&self) -> Option<&Handler> {
        match self {
            Self::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Returns the style mapping if the value holds one.
    pub fn as_style(&self) -> Option<&StyleMap> {
        match self {
            Self::Style(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for PropValue {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<i64> for PropValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for PropValue {
    fn from(i: i32) -> Self {
        Self::Int(i as _)
    }
}

impl From<u32> for PropValue {
    fn from(i: u32) -> Self {
        Self::Int(i as _)
    }
}

impl From<u64> for PropValue {
    fn from(i: u64) -> Self {
        Self::Int(i as _)
    }
}

impl From<usize> for PropValue {
    fn from(i: usize) -> Self {
        Self::Int(i as _)
    }
}

impl From<f64> for PropValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<StyleMap> for PropValue {
    fn from(s: StyleMap) -> Self {
        Self::Style(s)
    }
}

impl From<Handler> for PropValue {
    fn from(h: Handler) -> Self {
        Self::Handler(h)
    }
}

impl From<Node> for PropValue {
    fn from(n: Node) -> Self {
        Self::Node(n)
    }
}

/// The flat prop map of an element, including its children under [`CHILDREN`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    /// Creates an empty prop map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the map with the given prop set.
    pub fn with<K: Into<String>, V: Into<PropValue>>(mut self, key: K, value: V) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the map with its children replaced.
    pub fn with_children<N: Into<Node>>(mut self, children: N) -> Self {
        self.set_children(children);
        self
    }

    /// Sets a prop, replacing any previous value.
    pub fn set<K: Into<String>, V: Into<PropValue>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    /// Gets a prop.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Removes a prop, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.remove(key)
    }

    /// Returns `true` if the prop is set.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of props, children included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no props are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the props in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Gets a string prop.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    /// Gets a boolean prop. Unset props read as `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(self.get(key), Some(PropValue::Bool(true)))
    }

    /// Gets an integer prop.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            PropValue::Int(i) => Some(*i),
            PropValue::Float(f) => Some(*f as _),
            _ => None,
        }
    }

    /// Gets a handler prop.
    pub fn handler(&self, key: &str) -> Option<&Handler> {
        self.get(key).and_then(PropValue::as_handler)
    }

    /// Gets the `class` prop.
    pub fn class(&self) -> Option<&str> {
        self.get_str("class")
    }

    /// Gets the `style` prop.
    pub fn style(&self) -> Option<&StyleMap> {
        self.get("style").and_then(PropValue::as_style)
    }

    /// Gets the children, or [`Node::Empty`] if none are set.
    pub fn children(&self) -> &Node {
        match self.get(CHILDREN) {
            Some(PropValue::Node(node)) => node,
            _ => &EMPTY_NODE,
        }
    }

    /// Replaces the children.
    pub fn set_children<N: Into<Node>>(&mut self, children: N) {
        self.set(CHILDREN, children.into());
    }

    /// Removes and returns the children.
    pub fn take_children(&mut self) -> Node {
        match self.remove(CHILDREN) {
            Some(PropValue::Node(node)) => node,
            _ => Node::Empty,
        }
    }

    /// Separates the children from the rest of the props.
    pub fn split_children(mut self) -> (Node, Props) {
        let children = self.take_children();
        (children, self)
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = btree_map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_accessors() {
        let mut props = Props::new().with("class", "x");
        assert_eq!(props.children(), &Node::Empty);

        props.set_children("hello");
        assert_eq!(props.children(), &Node::text("hello"));

        let (children, rest) = props.split_children();
        assert_eq!(children, Node::text("hello"));
        assert!(!rest.contains(CHILDREN));
        assert_eq!(rest.class(), Some("x"));
    }

    #[test]
    fn test_typed_getters() {
        let props = Props::new()
            .with("disabled", true)
            .with("count", 3)
            .with("ratio", 1.5)
            .with("style", style! { "color": "red" });
        assert!(props.get_bool("disabled"));
        assert!(!props.get_bool("hidden"));
        assert_eq!(props.get_int("count"), Some(3));
        assert_eq!(props.get_int("ratio"), Some(1));
        assert_eq!(
            props.style().and_then(|s| s.get("color")),
            Some(&StyleValue::Str("red".into()))
        );
    }

    #[test]
    fn test_style_merged() {
        let a = style! { "color": "red" };
        let b = style! { "color": "blue", "size": 1 };
        assert_eq!(a.merged(&b), style! { "color": "blue", "size": 1 });
    }
}
