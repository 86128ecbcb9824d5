use rivena::{element, Component, Element, ElementType, Event, Handler, Node, Props, Result, Scope};

struct MyComponent;

impl Component for MyComponent {
    fn render(&self, props: Props, _scope: &Scope) -> Result<Node> {
        Ok(props.children().clone())
    }
}

#[test]
fn host_element() {
    let node = element!(div);
    assert_eq!(node, Node::Element(Element::host("div")));
}

#[test]
fn props_and_keyword_keys() {
    let email = String::from("ada@example.com");
    let node = element!(input(type: "email", value: &email, "data-state": "closed", disabled: true, size: 3));
    let element = node.as_element().unwrap();
    assert_eq!(element.ty(), &ElementType::from("input"));
    assert_eq!(element.props().get_str("type"), Some("email"));
    assert_eq!(element.props().get_str("value"), Some("ada@example.com"));
    assert_eq!(element.props().get_str("data-state"), Some("closed"));
    assert!(element.props().get_bool("disabled"));
    assert_eq!(element.props().get_int("size"), Some(3));
}

#[test]
fn handlers() {
    let node = element!(button(onClick: |_: &Event| {}, onSubmit: Handler::new(|_| {})));
    let props = node.as_element().unwrap().props();
    assert!(props.handler("onClick").is_some());
    assert!(props.handler("onSubmit").is_some());
}

#[test]
fn children() {
    let maybe: Option<Node> = None;
    let items = vec!["a", "b"];
    let node = element! {
        MyComponent(foo: "bar") {
            "text"
            span { "nested" }
            #(maybe)
            #(items.iter().map(|item| element!(i { #(Node::text(*item)) })))
        }
    };
    let element = node.as_element().unwrap();
    assert!(element.ty().is::<MyComponent>());
    assert_eq!(element.props().get_str("foo"), Some("bar"));
    let children = element.children().clone().into_list();
    assert_eq!(children.len(), 4);
    assert_eq!(children[0], Node::text("text"));
    assert_eq!(
        children[1],
        Node::Element(Element::host("span").with_children(vec![Node::text("nested")]))
    );
}

#[test]
fn no_children_prop_without_children() {
    let node = element!(MyComponent);
    assert!(!node.as_element().unwrap().props().contains("children"));
}
