use crate::{
    component::Component,
    components::{slot, with_base_class},
    context::{provide, Scope},
    element::{Element, Node},
    error::Result,
    props::Props,
    style,
};

/// The defaults a [`TooltipProvider`] gives every tooltip beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TooltipConfig {
    /// Milliseconds from when the pointer enters a trigger until its tooltip opens.
    pub delay_duration: u64,
    /// Milliseconds in which another trigger can be entered without incurring the delay again.
    pub skip_delay_duration: u64,
    /// When `true`, hovering the content closes the tooltip once the pointer leaves the trigger.
    pub disable_hoverable_content: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            delay_duration: 700,
            skip_delay_duration: 300,
            disable_hoverable_content: false,
        }
    }
}

fn duration_prop(props: &Props, key: &str) -> Option<u64> {
    props.get_int(key).and_then(|ms| u64::try_from(ms).ok())
}

/// Provides `config` to every tooltip within `children`.
pub fn tooltip_provider<N: Into<Node>>(config: TooltipConfig, children: N) -> Node {
    provide(config, children)
}

/// `TooltipProvider` sets the defaults of the tooltips beneath it from its `delay_duration`,
/// `skip_delay_duration` and `disable_hoverable_content` props. Omitted props keep the
/// defaults: 700, 300 and `false`.
pub struct TooltipProvider;

impl Component for TooltipProvider {
    fn render(&self, props: Props, _scope: &Scope<'_>) -> Result<Node> {
        let defaults = TooltipConfig::default();
        let config = TooltipConfig {
            delay_duration: duration_prop(&props, "delay_duration").unwrap_or(defaults.delay_duration),
            skip_delay_duration: duration_prop(&props, "skip_delay_duration")
                .unwrap_or(defaults.skip_delay_duration),
            disable_hoverable_content: props.get_bool("disable_hoverable_content"),
        };
        let (children, _) = props.split_children();
        Ok(tooltip_provider(config, children))
    }
}

/// The resolved settings of one [`Tooltip`], visible to its trigger and content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TooltipSettings {
    /// Milliseconds before the tooltip opens.
    pub open_delay: u64,
    /// Milliseconds in which a neighboring trigger opens without delay.
    pub skip_delay: u64,
    /// See [`TooltipConfig::disable_hoverable_content`].
    pub disable_hoverable_content: bool,
    /// Distance between the trigger and the content, in the units of the class spacing scale.
    pub gutter: u32,
    /// Whether the content is shown.
    pub open: bool,
}

impl TooltipSettings {
    /// The gutter in terminal cells.
    pub fn gutter_cells(&self) -> i64 {
        (self.gutter as i64 + 3) / 4
    }
}

/// `Tooltip` groups a [`TooltipTrigger`] with its [`TooltipContent`].
///
/// Its `delay_duration` and `disable_hoverable_content` props override the enclosing
/// provider's values, and `open` controls whether the content is drawn. Without a provider the
/// provider defaults apply.
pub struct Tooltip;

impl Component for Tooltip {
    fn render(&self, props: Props, scope: &Scope<'_>) -> Result<Node> {
        let config = scope
            .try_context::<TooltipConfig>()
            .copied()
            .unwrap_or_default();
        let settings = TooltipSettings {
            open_delay: duration_prop(&props, "delay_duration").unwrap_or(config.delay_duration),
            skip_delay: config.skip_delay_duration,
            disable_hoverable_content: match props.get("disable_hoverable_content") {
                Some(_) => props.get_bool("disable_hoverable_content"),
                None => config.disable_hoverable_content,
            },
            gutter: 4,
            open: props.get_bool("open"),
        };
        let (children, _) = props.split_children();
        Ok(provide(
            settings,
            Element::new("div", Props::new().with("class", "flex flex-col")).with_children(children),
        ))
    }
}

fn settings(scope: &Scope<'_>) -> TooltipSettings {
    scope
        .try_context::<TooltipSettings>()
        .copied()
        .unwrap_or_else(|| {
            let config = TooltipConfig::default();
            TooltipSettings {
                open_delay: config.delay_duration,
                skip_delay: config.skip_delay_duration,
                disable_hoverable_content: config.disable_hoverable_content,
                gutter: 4,
                open: false,
            }
        })
}

/// `TooltipTrigger` is the element the tooltip is anchored to.
///
/// It forwards its props onto its child through a [`Slot`](crate::components::Slot), adding a
/// `data-state` of `delayed-open` or `closed`. Without an element child it renders a `button`
/// around its children instead.
pub struct TooltipTrigger;

impl Component for TooltipTrigger {
    fn render(&self, mut props: Props, scope: &Scope<'_>) -> Result<Node> {
        let state = if settings(scope).open {
            "delayed-open"
        } else {
            "closed"
        };
        props.set("data-state", state);
        let has_element = props
            .children()
            .clone()
            .into_list()
            .first()
            .is_some_and(|child| matches!(child, Node::Element(_) | Node::Slottable(_)));
        Ok(if has_element {
            slot(props)
        } else {
            Element::new("button", props).into()
        })
    }
}

/// `TooltipContent` draws the tooltip's content beneath the trigger while the tooltip is open.
pub struct TooltipContent;

impl Component for TooltipContent {
    fn render(&self, mut props: Props, scope: &Scope<'_>) -> Result<Node> {
        let settings = settings(scope);
        if !settings.open {
            return Ok(Node::Empty);
        }
        props.set("role", "tooltip");
        let style = style! { "margin_top": settings.gutter_cells() };
        let style = match props.style() {
            Some(explicit) => style.merged(explicit),
            None => style,
        };
        props.set("style", style);
        Ok(Element::new(
            "div",
            with_base_class(
                props,
                "rounded border bg-popover px-3 text-popover-foreground",
            ),
        )
        .into())
    }
}

/// `TooltipArrow` draws a small pointer toward the trigger while the tooltip is open.
pub struct TooltipArrow;

impl Component for TooltipArrow {
    fn render(&self, props: Props, scope: &Scope<'_>) -> Result<Node> {
        if !settings(scope).open {
            return Ok(Node::Empty);
        }
        let props = with_base_class(props, "fill-popover");
        Ok(Element::new("span", props.with_children("▲")).into())
    }
}
