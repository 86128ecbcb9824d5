use crate::{
    canvas::TextStyle,
    props::{StyleMap, StyleValue},
};
use bitflags::bitflags;
use taffy::{
    geometry,
    style::{Dimension, LengthPercentage, LengthPercentageAuto},
    Rect, Style,
};

// Re-export basic enum types.
pub use crossterm::style::Color;
pub use taffy::style::{AlignItems, Display, FlexDirection, JustifyContent};

/// The weight of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Weight {
    /// Regular text.
    #[default]
    Normal,
    /// Bold text.
    Bold,
    /// Dimmed text.
    Light,
}

/// The characters used to draw a border.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    /// No border.
    #[default]
    None,
    /// `┌─┐`
    Single,
    /// `╔═╗`
    Double,
    /// `╭─╮`
    Round,
    /// `┏━┓`
    Bold,
}

/// The characters of a [`BorderStyle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderCharacters {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub left: char,
    pub right: char,
    pub top: char,
    pub bottom: char,
}

impl BorderStyle {
    /// Returns `true` for [`BorderStyle::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the characters to draw this border with.
    pub fn border_characters(&self) -> Option<BorderCharacters> {
        Some(match self {
            Self::None => return None,
            Self::Single => BorderCharacters {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                left: '│',
                right: '│',
                top: '─',
                bottom: '─',
            },
            Self::Double => BorderCharacters {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                left: '║',
                right: '║',
                top: '═',
                bottom: '═',
            },
            Self::Round => BorderCharacters {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                left: '│',
                right: '│',
                top: '─',
                bottom: '─',
            },
            Self::Bold => BorderCharacters {
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                left: '┃',
                right: '┃',
                top: '━',
                bottom: '━',
            },
        })
    }

    fn parse(s: &str) -> Self {
        match s {
            "single" => Self::Single,
            "double" => Self::Double,
            "round" => Self::Round,
            "bold" => Self::Bold,
            _ => Self::None,
        }
    }
}

bitflags! {
    /// The edges of a box which carry a border.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Edges: u8 {
        const Top = 0b00000001;
        const Right = 0b00000010;
        const Bottom = 0b00000100;
        const Left = 0b00001000;
    }
}

impl Edges {
    fn parse(s: &str) -> Self {
        s.split(',').fold(Edges::empty(), |edges, edge| {
            edges
                | match edge.trim() {
                    "all" => Edges::all(),
                    "top" => Edges::Top,
                    "right" => Edges::Right,
                    "bottom" => Edges::Bottom,
                    "left" => Edges::Left,
                    "x" => Edges::Left | Edges::Right,
                    "y" => Edges::Top | Edges::Bottom,
                    _ => Edges::empty(),
                }
        })
    }
}

/// Parses a color name, or a `#rrggbb` hex code.
pub fn parse_color(s: &str) -> Option<Color> {
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }
    Some(match s {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark_magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark_cyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        _ => return None,
    })
}

/// Formats a color so that [`parse_color`] reads it back.
pub fn color_name(color: Color) -> String {
    match color {
        Color::Reset => "reset".into(),
        Color::Black => "black".into(),
        Color::DarkGrey => "dark_grey".into(),
        Color::Red => "red".into(),
        Color::DarkRed => "dark_red".into(),
        Color::Green => "green".into(),
        Color::DarkGreen => "dark_green".into(),
        Color::Yellow => "yellow".into(),
        Color::DarkYellow => "dark_yellow".into(),
        Color::Blue => "blue".into(),
        Color::DarkBlue => "dark_blue".into(),
        Color::Magenta => "magenta".into(),
        Color::DarkMagenta => "dark_magenta".into(),
        Color::Cyan => "cyan".into(),
        Color::DarkCyan => "dark_cyan".into(),
        Color::White => "white".into(),
        Color::Grey => "grey".into(),
        Color::Rgb { r, g, b } => format!("#{:02x}{:02x}{:02x}", r, g, b),
        Color::AnsiValue(_) => "reset".into(),
    }
}

fn dimension(value: Option<&StyleValue>, default: Dimension) -> Dimension {
    match value {
        Some(StyleValue::Int(i)) => Dimension::Length(*i as _),
        Some(StyleValue::Float(f)) => Dimension::Length(*f as _),
        Some(StyleValue::Str(s)) => match s.as_str() {
            "auto" => Dimension::Auto,
            "full" => Dimension::Percent(1.0),
            s => match s.strip_suffix('%').and_then(|p| p.parse::<f32>().ok()) {
                Some(p) => Dimension::Percent(p / 100.0),
                None => default,
            },
        },
        _ => default,
    }
}

fn length(value: Option<&StyleValue>) -> Option<f32> {
    value.and_then(StyleValue::as_f64).map(|v| v as f32)
}

/// Resolves an edge-specific length such as `padding_left`, falling back to the axis shorthand
/// (`padding_x`) and then to the plain key (`padding`).
fn edge_length(style: &StyleMap, key: &str, edge: &str, axis: &str) -> f32 {
    length(style.get(&format!("{}_{}", key, edge)))
        .or_else(|| length(style.get(&format!("{}_{}", key, axis))))
        .or_else(|| length(style.get(key)))
        .unwrap_or(0.0)
}

fn edge_rect(style: &StyleMap, key: &str) -> Rect<f32> {
    Rect {
        left: edge_length(style, key, "left", "x"),
        right: edge_length(style, key, "right", "x"),
        top: edge_length(style, key, "top", "y"),
        bottom: edge_length(style, key, "bottom", "y"),
    }
}

/// The resolved visual attributes of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Visual {
    pub text: TextStyle,
    pub background: Option<Color>,
    pub border: BorderStyle,
    pub border_edges: Edges,
    pub border_color: Option<Color>,
}

impl Visual {
    /// Resolves the visual attributes of a box. Text attributes fall back to `inherited`.
    pub fn from_style(style: &StyleMap, inherited: TextStyle) -> Self {
        let color = |key: &str| style.get(key).and_then(StyleValue::as_str).and_then(parse_color);
        let border = style
            .get("border")
            .and_then(StyleValue::as_str)
            .map(BorderStyle::parse)
            .unwrap_or_default();
        let border = match border {
            BorderStyle::Single if style.get("rounded").and_then(StyleValue::as_bool) == Some(true) => {
                BorderStyle::Round
            }
            border => border,
        };
        Self {
            text: TextStyle {
                color: color("color").or(inherited.color),
                weight: match style.get("weight").and_then(StyleValue::as_str) {
                    Some("bold") => Weight::Bold,
                    Some("light") => Weight::Light,
                    Some("normal") => Weight::Normal,
                    _ => inherited.weight,
                },
            },
            background: color("background"),
            border,
            border_edges: match style.get("border_edges").and_then(StyleValue::as_str) {
                _ if border.is_none() => Edges::empty(),
                Some(edges) => Edges::parse(edges),
                None => Edges::all(),
            },
            border_color: color("border_color"),
        }
    }
}

/// Converts a resolved style map and its border into a flexbox layout style.
pub(crate) fn layout_style(style: &StyleMap, visual: &Visual) -> Style {
    let str_of = |key: &str| style.get(key).and_then(StyleValue::as_str);
    let padding = edge_rect(style, "padding");
    let margin = edge_rect(style, "margin");
    let gap = length(style.get("gap")).unwrap_or(0.0);
    let border = |edge: Edges| {
        LengthPercentage::Length(if visual.border_edges.contains(edge) {
            1.0
        } else {
            0.0
        })
    };

    Style {
        display: match str_of("display") {
            Some("none") => Display::None,
            _ => Display::Flex,
        },
        size: geometry::Size {
            width: dimension(style.get("width"), Dimension::Auto),
            height: dimension(style.get("height"), Dimension::Auto),
        },
        min_size: geometry::Size {
            width: dimension(style.get("min_width"), Dimension::Auto),
            height: dimension(style.get("min_height"), Dimension::Auto),
        },
        max_size: geometry::Size {
            width: dimension(style.get("max_width"), Dimension::Auto),
            height: dimension(style.get("max_height"), Dimension::Auto),
        },
        padding: Rect {
            left: LengthPercentage::Length(padding.left),
            right: LengthPercentage::Length(padding.right),
            top: LengthPercentage::Length(padding.top),
            bottom: LengthPercentage::Length(padding.bottom),
        },
        margin: Rect {
            left: LengthPercentageAuto::Length(margin.left),
            right: LengthPercentageAuto::Length(margin.right),
            top: LengthPercentageAuto::Length(margin.top),
            bottom: LengthPercentageAuto::Length(margin.bottom),
        },
        border: Rect {
            left: border(Edges::Left),
            right: border(Edges::Right),
            top: border(Edges::Top),
            bottom: border(Edges::Bottom),
        },
        gap: geometry::Size {
            width: LengthPercentage::Length(gap),
            height: LengthPercentage::Length(gap),
        },
        flex_direction: match str_of("flex_direction") {
            Some("row") => FlexDirection::Row,
            _ => FlexDirection::Column,
        },
        flex_grow: length(style.get("flex_grow")).unwrap_or(0.0),
        flex_shrink: length(style.get("flex_shrink")).unwrap_or(1.0),
        justify_content: match str_of("justify_content") {
            Some("start") => Some(JustifyContent::FlexStart),
            Some("end") => Some(JustifyContent::FlexEnd),
            Some("center") => Some(JustifyContent::Center),
            Some("space_between") => Some(JustifyContent::SpaceBetween),
            Some("space_around") => Some(JustifyContent::SpaceAround),
            _ => None,
        },
        align_items: match str_of("align_items") {
            Some("start") => Some(AlignItems::FlexStart),
            Some("end") => Some(AlignItems::FlexEnd),
            Some("center") => Some(AlignItems::Center),
            Some("stretch") => Some(AlignItems::Stretch),
            _ => None,
        },
        ..Default::default()
    }
}

/// The named colors a theme assigns to semantic roles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub card: Option<Color>,
    pub primary: Option<Color>,
    pub primary_foreground: Option<Color>,
    pub muted: Option<Color>,
    pub muted_foreground: Option<Color>,
    pub accent: Option<Color>,
    pub border: Option<Color>,
    pub destructive: Option<Color>,
}

impl Default for Palette {
    /// A palette which leaves every role uncolored.
    fn default() -> Self {
        Self {
            background: None,
            foreground: None,
            card: None,
            primary: None,
            primary_foreground: None,
            muted: None,
            muted_foreground: None,
            accent: None,
            border: None,
            destructive: None,
        }
    }
}

impl Palette {
    /// The palette for dark terminals.
    pub fn dark() -> Self {
        Self {
            background: None,
            foreground: Some(Color::White),
            card: None,
            primary: Some(Color::Magenta),
            primary_foreground: Some(Color::Black),
            muted: Some(Color::DarkGrey),
            muted_foreground: Some(Color::Grey),
            accent: Some(Color::Magenta),
            border: Some(Color::DarkGrey),
            destructive: Some(Color::Red),
        }
    }

    /// The palette for light terminals.
    pub fn light() -> Self {
        Self {
            background: None,
            foreground: Some(Color::Black),
            card: None,
            primary: Some(Color::DarkMagenta),
            primary_foreground: Some(Color::White),
            muted: Some(Color::Grey),
            muted_foreground: Some(Color::DarkGrey),
            accent: Some(Color::DarkMagenta),
            border: Some(Color::Grey),
            destructive: Some(Color::DarkRed),
        }
    }

    fn role(&self, name: &str) -> Option<Option<Color>> {
        Some(match name {
            "background" => self.background,
            "foreground" => self.foreground,
            "card" | "popover" => self.card,
            "primary" => self.primary,
            "primary-foreground" => self.primary_foreground,
            "muted" => self.muted,
            "muted-foreground" => self.muted_foreground,
            "accent" => self.accent,
            "border" | "input" => self.border,
            "destructive" => self.destructive,
            _ => return None,
        })
    }
}

/// Maps utility-class color families onto terminal colors. Shades of 500 and above use the
/// darker variant.
fn family_color(family: &str, shade: u32) -> Option<Color> {
    let dark = shade >= 500;
    Some(match family {
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "slate" | "zinc" => {
            if dark {
                Color::DarkGrey
            } else {
                Color::Grey
            }
        }
        "red" => if dark { Color::DarkRed } else { Color::Red },
        "green" | "emerald" => if dark { Color::DarkGreen } else { Color::Green },
        "amber" | "yellow" => if dark { Color::DarkYellow } else { Color::Yellow },
        "blue" => if dark { Color::DarkBlue } else { Color::Blue },
        "purple" | "violet" => if dark { Color::DarkMagenta } else { Color::Magenta },
        _ => return None,
    })
}

/// Converts a utility spacing value (in quarter units, as in `p-4`) to terminal cells.
fn spacing_cells(value: &str) -> Option<i64> {
    let value: f32 = value.parse().ok()?;
    Some((value / 4.0).ceil() as i64)
}

/// `Stylesheet` resolves class lists into style maps.
///
/// It understands a small set of utility classes: layout (`flex`, `flex-col`, `flex-1`,
/// `items-center`, `justify-between`, `hidden`, `w-full`, `max-w-[80%]`), spacing (`p-4`, `px-2`,
/// `mt-1`, `gap-2`), borders (`border`, `border-b`, `rounded`), weights (`font-bold`,
/// `font-semibold`) and colors, either semantic roles of the palette (`text-primary`,
/// `bg-muted`) or color families (`text-gray-500`, `bg-purple-600`). Unknown classes are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stylesheet {
    palette: Palette,
}

impl Stylesheet {
    /// Creates a stylesheet for a palette.
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// The palette colors are resolved against.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn color(&self, name: &str) -> Option<Option<Color>> {
        if let Some(color) = self.palette.role(name) {
            return Some(color);
        }
        let (family, shade) = match name.rsplit_once('-') {
            Some((family, shade)) => (family, shade.parse().ok()?),
            None => (name, 0),
        };
        family_color(family, shade).map(Some)
    }

    /// Resolves a whitespace separated class list.
    pub fn resolve(&self, class: &str) -> StyleMap {
        let mut style = StyleMap::new();
        let tokens: Vec<&str> = class.split_whitespace().collect();
        // `flex` only picks the row direction, so it must not override `flex-col`
        if tokens.contains(&"flex") {
            style.set("flex_direction", "row");
        }
        for token in tokens {
            self.apply(token, &mut style);
        }
        style
    }

    fn apply(&self, token: &str, style: &mut StyleMap) {
        match token {
            "flex" | "grid" | "block" => {}
            "hidden" => style.set("display", "none"),
            "flex-row" => style.set("flex_direction", "row"),
            "flex-col" => style.set("flex_direction", "column"),
            "flex-1" | "grow" => style.set("flex_grow", 1),
            "shrink-0" => style.set("flex_shrink", 0),
            "items-center" => style.set("align_items", "center"),
            "items-start" => style.set("align_items", "start"),
            "items-end" => style.set("align_items", "end"),
            "justify-between" => style.set("justify_content", "space_between"),
            "justify-center" => style.set("justify_content", "center"),
            "justify-start" => style.set("justify_content", "start"),
            "justify-end" => style.set("justify_content", "end"),
            "w-full" => style.set("width", "100%"),
            "h-full" => {}
            "border" => style.set("border", "single"),
            "border-t" => self.border_edge(style, "top"),
            "border-b" => self.border_edge(style, "bottom"),
            "border-l" => self.border_edge(style, "left"),
            "border-r" => self.border_edge(style, "right"),
            "border-y" => self.border_edge(style, "y"),
            "border-x" => self.border_edge(style, "x"),
            "font-bold" | "font-semibold" => style.set("weight", "bold"),
            "font-medium" | "font-normal" => style.set("weight", "normal"),
            "font-light" => style.set("weight", "light"),
            token if token.starts_with("rounded") => style.set("rounded", true),
            token => self.apply_prefixed(token, style),
        }
    }

    fn border_edge(&self, style: &mut StyleMap, edge: &str) {
        style.set("border", "single");
        let edges = match style.get("border_edges").and_then(StyleValue::as_str) {
            Some(existing) => format!("{},{}", existing, edge),
            None => edge.to_string(),
        };
        style.set("border_edges", edges);
    }

    fn apply_prefixed(&self, token: &str, style: &mut StyleMap) {
        let Some((prefix, value)) = token.split_once('-') else {
            return;
        };
        if let Some(width) = value
            .strip_prefix("w-[")
            .and_then(|v| v.strip_suffix(']'))
            .filter(|_| prefix == "max")
        {
            style.set("max_width", width);
            return;
        }
        let key = match prefix {
            "p" => "padding",
            "px" => "padding_x",
            "py" => "padding_y",
            "pt" => "padding_top",
            "pb" => "padding_bottom",
            "pl" => "padding_left",
            "pr" => "padding_right",
            "m" => "margin",
            "mx" => "margin_x",
            "my" => "margin_y",
            "mt" => "margin_top",
            "mb" => "margin_bottom",
            "ml" => "margin_left",
            "mr" => "margin_right",
            "gap" => "gap",
            "w" => "width",
            "text" | "bg" | "border" => {
                let key = match prefix {
                    "text" => "color",
                    "bg" => "background",
                    _ => "border_color",
                };
                match self.color(value) {
                    Some(Some(color)) => style.set(key, color_name(color)),
                    Some(None) | None => {}
                }
                return;
            }
            _ => return,
        };
        if let Some(cells) = spacing_cells(value) {
            style.set(key, cells);
        }
    }
}
