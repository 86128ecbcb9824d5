use crate::{
    component::Component,
    components::with_base_class,
    context::Scope,
    element::{Element, Node},
    error::Result,
    props::Props,
};

/// `Input` renders a single-line text field.
///
/// It shows its `value` prop, masked when `type` is `password`, or its `placeholder` when the
/// value is empty. Typing is reported through `onInput` and enter through `onSubmit`, as
/// dispatched by the host application.
pub struct Input;

impl Component for Input {
    fn render(&self, props: Props, _scope: &Scope<'_>) -> Result<Node> {
        Ok(Element::new("input", with_base_class(props, "border-input w-full")).into())
    }
}

/// `Label` renders a caption for a form control.
pub struct Label;

impl Component for Label {
    fn render(&self, props: Props, _scope: &Scope<'_>) -> Result<Node> {
        Ok(Element::new("label", with_base_class(props, "font-medium")).into())
    }
}
