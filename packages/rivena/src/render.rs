use crate::{
    canvas::{Canvas, TextStyle},
    context::Scope,
    element::{ElementType, Node},
    error::Result,
    handler::{Event, Handler},
    merge::is_handler_key,
    props::{Props, StyleMap},
    style::{layout_style, Edges, Palette, Stylesheet, Visual, Weight},
};
use std::{
    collections::HashMap,
    fmt::{self, Display},
    io::{self, Write},
};
use taffy::{
    style::{Dimension, Display as LayoutDisplay, FlexDirection},
    AvailableSpace, NodeId, Point, Size, Style, TaffyTree,
};
use tracing::{debug, trace_span};
use unicode_width::UnicodeWidthStr;

/// A node of a resolved tree: components have been rendered away, leaving only host elements
/// and text.
#[derive(Clone, Debug, PartialEq)]
pub enum HostNode {
    /// A run of text.
    Text(String),
    /// A host element and its resolved children.
    Element {
        /// The element's tag.
        tag: String,
        /// The element's props, without `children`.
        props: Props,
        /// The resolved children.
        children: Vec<HostNode>,
    },
}

impl HostNode {
    /// The tag, for elements.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Element { tag, .. } => Some(tag),
        }
    }

    /// The props, for elements.
    pub fn props(&self) -> Option<&Props> {
        match self {
            Self::Text(_) => None,
            Self::Element { props, .. } => Some(props),
        }
    }

    /// The concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut ret = String::new();
        self.collect_text(&mut ret);
        ret
    }

    fn collect_text(&self, dest: &mut String) {
        match self {
            Self::Text(text) => dest.push_str(text),
            Self::Element { children, .. } => {
                for child in children {
                    child.collect_text(dest);
                }
            }
        }
    }

    /// Finds the first element, in tree order, whose `id` prop is `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&HostNode> {
        match self {
            Self::Text(_) => None,
            Self::Element {
                props, children, ..
            } => {
                if props.get_str("id") == Some(id) {
                    return Some(self);
                }
                children.iter().find_map(|child| child.find_by_id(id))
            }
        }
    }
}

/// Resolves a node into host nodes by rendering every component in it.
///
/// Providers make their value visible to components beneath them, and the slottable marker is
/// transparent here: it resolves to whatever it wraps.
pub fn resolve<N: Into<Node>>(node: N, scope: &Scope<'_>) -> Result<Vec<HostNode>> {
    let mut ret = Vec::new();
    resolve_into(node.into(), scope, &mut ret)?;
    Ok(ret)
}

fn resolve_into(node: Node, scope: &Scope<'_>, dest: &mut Vec<HostNode>) -> Result<()> {
    match node {
        Node::Empty => {}
        Node::Text(text) => dest.push(HostNode::Text(text)),
        Node::Fragment(nodes) => {
            for node in nodes {
                resolve_into(node, scope, dest)?;
            }
        }
        Node::Slottable(inner) => resolve_into(*inner, scope, dest)?,
        Node::Provider(provider) => {
            let (value, children) = provider.into_parts();
            let scope = scope.with_context(&value);
            resolve_into(children, &scope, dest)?;
        }
        Node::Element(element) => {
            let (ty, mut props) = element.into_parts();
            match ty {
                ElementType::Host(tag) => {
                    let mut children = Vec::new();
                    resolve_into(props.take_children(), scope, &mut children)?;
                    dest.push(HostNode::Element {
                        tag: tag.into_owned(),
                        props,
                        children,
                    });
                }
                ElementType::Component(component) => {
                    let rendered = {
                        let span = trace_span!("render", component = component.name());
                        let _enter = span.enter();
                        component.render(props, scope)?
                    };
                    resolve_into(rendered, scope, dest)?;
                }
            }
        }
    }
    Ok(())
}

/// Defaults applied to host tags before their classes and explicit styles.
fn tag_style(tag: &str) -> StyleMap {
    match tag {
        "button" | "span" | "a" | "label" | "b" | "strong" | "i" | "em" | "small" | "code" => {
            crate::style! { "flex_direction": "row" }
        }
        "h1" | "h2" | "h3" | "th" => crate::style! { "weight": "bold" },
        "input" | "textarea" => crate::style! { "border": "single", "min_width": 10, "padding_x": 1 },
        _ => StyleMap::new(),
    }
}

fn wrap_lines(text: &str, width: Option<usize>) -> Vec<String> {
    text.lines()
        .flat_map(|line| match width {
            Some(width) => textwrap::wrap(line, width.max(1))
                .into_iter()
                .map(|line| line.into_owned())
                .collect::<Vec<_>>(),
            None => vec![line.to_string()],
        })
        .collect()
}

fn measure_text(
    text: &str,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    let max_width = known_dimensions.width.map(|w| w as usize).or(match available_space.width {
        AvailableSpace::Definite(w) => Some(w as usize),
        AvailableSpace::MinContent => Some(
            text.split_whitespace()
                .map(UnicodeWidthStr::width)
                .max()
                .unwrap_or(0),
        ),
        AvailableSpace::MaxContent => None,
    });
    let lines = wrap_lines(text, max_width);
    let width = lines.iter().map(|line| line.width()).max().unwrap_or(0);
    Size {
        width: known_dimensions.width.unwrap_or(width as _),
        height: known_dimensions.height.unwrap_or(lines.len() as _),
    }
}

#[derive(Default)]
struct LayoutContext {
    text: Option<String>,
}

type LayoutEngine = TaffyTree<LayoutContext>;

enum LayoutKind {
    Text(String),
    Box(Vec<LayoutNode>),
}

struct LayoutNode {
    node_id: NodeId,
    visual: Visual,
    hidden: bool,
    kind: LayoutKind,
}

struct TreeBuilder<'a> {
    engine: LayoutEngine,
    stylesheet: Option<&'a Stylesheet>,
    handlers: HashMap<String, HashMap<String, Handler>>,
}

impl TreeBuilder<'_> {
    fn palette(&self) -> Palette {
        self.stylesheet.map(|s| *s.palette()).unwrap_or_default()
    }

    fn text_leaf(&mut self, text: String, inherited: TextStyle) -> Result<LayoutNode> {
        let node_id = self.engine.new_leaf_with_context(
            Style::default(),
            LayoutContext {
                text: Some(text.clone()),
            },
        )?;
        Ok(LayoutNode {
            node_id,
            visual: Visual {
                text: inherited,
                ..Default::default()
            },
            hidden: false,
            kind: LayoutKind::Text(text),
        })
    }

    /// Builds layout nodes for a list of children. Adjacent text runs are joined into one leaf.
    fn children(&mut self, children: Vec<HostNode>, inherited: TextStyle) -> Result<Vec<LayoutNode>> {
        let mut ret = Vec::with_capacity(children.len());
        let mut text: Option<String> = None;
        for child in children {
            match child {
                HostNode::Text(t) => text.get_or_insert_with(String::new).push_str(&t),
                element => {
                    if let Some(text) = text.take().filter(|t| !t.is_empty()) {
                        ret.push(self.text_leaf(text, inherited)?);
                    }
                    ret.push(self.element(element, inherited)?);
                }
            }
        }
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            ret.push(self.text_leaf(text, inherited)?);
        }
        Ok(ret)
    }

    fn element(&mut self, node: HostNode, inherited: TextStyle) -> Result<LayoutNode> {
        let (tag, props, children) = match node {
            HostNode::Text(text) => return self.text_leaf(text, inherited),
            HostNode::Element {
                tag,
                props,
                children,
            } => (tag, props, children),
        };

        if let Some(id) = props.get_str("id") {
            let handlers: HashMap<_, _> = props
                .iter()
                .filter(|(key, _)| is_handler_key(key))
                .filter_map(|(key, value)| Some((key.to_string(), value.as_handler()?.clone())))
                .collect();
            if !handlers.is_empty() && !props.get_bool("disabled") {
                self.handlers.entry(id.to_string()).or_insert(handlers);
            }
        }

        let mut style = tag_style(&tag);
        if let Some(class) = props.class() {
            let resolved = match self.stylesheet {
                Some(sheet) => sheet.resolve(class),
                None => Stylesheet::default().resolve(class),
            };
            style = style.merged(&resolved);
        }
        if let Some(explicit) = props.style() {
            style = style.merged(explicit);
        }

        let mut visual = Visual::from_style(&style, inherited);
        if !visual.border.is_none() {
            visual.border_color = visual.border_color.or(self.palette().border);
        }
        let layout_style = layout_style(&style, &visual);
        let hidden = layout_style.display == LayoutDisplay::None;

        let children = if tag == "input" || tag == "textarea" {
            self.input_content(&props, visual.text)?
        } else {
            self.children(children, visual.text)?
        };
        let child_ids: Vec<_> = children.iter().map(|c| c.node_id).collect();
        let node_id = self.engine.new_with_children(layout_style, &child_ids)?;

        Ok(LayoutNode {
            node_id,
            visual,
            hidden,
            kind: LayoutKind::Box(children),
        })
    }

    /// The text shown inside an input: its value, masked for passwords, or else its placeholder.
    fn input_content(&mut self, props: &Props, inherited: TextStyle) -> Result<Vec<LayoutNode>> {
        let value = props.get_str("value").unwrap_or_default();
        let (text, style) = if value.is_empty() {
            let placeholder = props.get_str("placeholder").unwrap_or_default();
            let muted = TextStyle {
                color: self.palette().muted_foreground.or(inherited.color),
                weight: Weight::Light,
            };
            (placeholder.to_string(), muted)
        } else if props.get_str("type") == Some("password") {
            ("•".repeat(value.chars().count()), inherited)
        } else {
            (value.to_string(), inherited)
        };
        // an empty input still needs a line for the cursor
        let text = if text.is_empty() { " ".to_string() } else { text };
        Ok(vec![self.text_leaf(text, style)?])
    }
}

impl LayoutNode {
    fn draw(&self, engine: &LayoutEngine, canvas: &mut Canvas, offset: Point<f32>) -> Result<()> {
        if self.hidden {
            return Ok(());
        }
        let layout = engine.layout(self.node_id)?;
        let x = offset.x + layout.location.x;
        let y = offset.y + layout.location.y;
        let (left, top) = (x.max(0.0) as usize, y.max(0.0) as usize);
        let (width, height) = (layout.size.width as usize, layout.size.height as usize);

        if let Some(color) = self.visual.background {
            canvas.set_background_color(left, top, width, height, color);
        }
        self.draw_border(canvas, left, top, width, height);

        match &self.kind {
            LayoutKind::Text(text) => {
                for (i, line) in wrap_lines(text, Some(width)).iter().enumerate().take(height) {
                    canvas.set_text(left, top + i, line, self.visual.text);
                }
            }
            LayoutKind::Box(children) => {
                for child in children {
                    child.draw(engine, canvas, Point { x, y })?;
                }
            }
        }
        Ok(())
    }

    fn draw_border(&self, canvas: &mut Canvas, x: usize, y: usize, width: usize, height: usize) {
        let Some(border) = self.visual.border.border_characters() else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }
        let edges = self.visual.border_edges;
        let style = TextStyle {
            color: self.visual.border_color,
            weight: Weight::Normal,
        };
        let (right, bottom) = (x + width - 1, y + height - 1);
        let has = |edge| edges.contains(edge);

        if has(Edges::Top) {
            for cx in x..=right {
                canvas.set_char(cx, y, border.top, style);
            }
        }
        if has(Edges::Bottom) {
            for cx in x..=right {
                canvas.set_char(cx, bottom, border.bottom, style);
            }
        }
        if has(Edges::Left) {
            for cy in y..=bottom {
                canvas.set_char(x, cy, border.left, style);
            }
        }
        if has(Edges::Right) {
            for cy in y..=bottom {
                canvas.set_char(right, cy, border.right, style);
            }
        }
        if has(Edges::Top | Edges::Left) {
            canvas.set_char(x, y, border.top_left, style);
        }
        if has(Edges::Top | Edges::Right) {
            canvas.set_char(right, y, border.top_right, style);
        }
        if has(Edges::Bottom | Edges::Left) {
            canvas.set_char(x, bottom, border.bottom_left, style);
        }
        if has(Edges::Bottom | Edges::Right) {
            canvas.set_char(right, bottom, border.bottom_right, style);
        }
    }
}

/// The result of a render pass: the drawn canvas and the event handlers of every element with
/// an `id`.
pub struct RenderedTree {
    canvas: Canvas,
    handlers: HashMap<String, HashMap<String, Handler>>,
}

impl RenderedTree {
    /// The drawn canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Invokes the handler for `event` on the element whose `id` prop is `id`. Returns `false`
    /// if there is no such element, it is disabled, or it has no handler for the event.
    ///
    /// If several elements share an id, the first one in tree order receives the event.
    pub fn dispatch(&self, id: &str, event: &Event) -> bool {
        match self
            .handlers
            .get(id)
            .and_then(|handlers| handlers.get(event.handler_key()))
        {
            Some(handler) => {
                debug!(id, key = event.handler_key(), "dispatching event");
                handler(event);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the element with the given id handles `key`, such as `onClick`.
    pub fn handles(&self, id: &str, key: &str) -> bool {
        self.handlers
            .get(id)
            .is_some_and(|handlers| handlers.contains_key(key))
    }

    /// Writes the canvas with ANSI escape codes.
    pub fn write_ansi<W: Write>(&self, w: W) -> io::Result<()> {
        self.canvas.write_ansi(w)
    }

    /// Writes the canvas as plain text.
    pub fn write<W: Write>(&self, w: W) -> io::Result<()> {
        self.canvas.write(w)
    }
}

impl Display for RenderedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.canvas.fmt(f)
    }
}

impl fmt::Debug for RenderedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedTree")
            .field("width", &self.canvas.width())
            .field("height", &self.canvas.height())
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Renders a node: resolves it, lays it out and draws it.
///
/// The root lays its children out in a column. If `max_width` is given, the root is exactly that
/// wide and text wraps to fit. Otherwise everything takes its natural width.
///
/// Class lists are resolved with the [`Stylesheet`] found in `scope`, if any.
pub fn render<N: Into<Node>>(node: N, scope: &Scope<'_>, max_width: Option<usize>) -> Result<RenderedTree> {
    let span = trace_span!("render_pass", max_width);
    let _enter = span.enter();

    let host = resolve(node, scope)?;
    let stylesheet = scope.try_context::<Stylesheet>();
    let mut builder = TreeBuilder {
        engine: LayoutEngine::new(),
        stylesheet,
        handlers: HashMap::new(),
    };
    let root_text = TextStyle {
        color: builder.palette().foreground,
        weight: Weight::Normal,
    };
    let children = builder.children(host, root_text)?;
    let child_ids: Vec<_> = children.iter().map(|c| c.node_id).collect();
    let root_style = Style {
        flex_direction: FlexDirection::Column,
        size: Size {
            width: max_width
                .map(|w| Dimension::Length(w as _))
                .unwrap_or(Dimension::Auto),
            height: Dimension::Auto,
        },
        ..Default::default()
    };
    let root_id = builder.engine.new_with_children(root_style, &child_ids)?;

    builder.engine.compute_layout_with_measure(
        root_id,
        Size {
            width: max_width
                .map(|w| AvailableSpace::Definite(w as _))
                .unwrap_or(AvailableSpace::MaxContent),
            height: AvailableSpace::MaxContent,
        },
        |known_dimensions, available_space, _node_id, node_context, _style| {
            match node_context.and_then(|cx| cx.text.as_deref()) {
                Some(text) => measure_text(text, known_dimensions, available_space),
                None => Size::ZERO,
            }
        },
    )?;

    let root_layout = builder.engine.layout(root_id)?;
    let mut canvas = Canvas::new(
        root_layout.size.width as _,
        root_layout.size.height as _,
    );
    for child in &children {
        child.draw(&builder.engine, &mut canvas, Point { x: 0.0, y: 0.0 })?;
    }

    Ok(RenderedTree {
        canvas,
        handlers: builder.handlers,
    })
}
