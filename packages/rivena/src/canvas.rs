use crate::style::{Color, Weight};
use crossterm::{
    csi,
    style::{Attribute, Colored},
};
use std::{
    fmt::{self, Display},
    io::{self, Write},
};
use unicode_width::UnicodeWidthChar;

#[derive(Clone, Debug, PartialEq)]
struct Character {
    value: char,
    style: TextStyle,
}

/// The style of a run of text on a [`Canvas`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextStyle {
    /// The foreground color.
    pub color: Option<Color>,
    /// The font weight.
    pub weight: Weight,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Cell {
    background_color: Option<Color>,
    character: Option<Character>,
}

impl Cell {
    fn is_empty(&self) -> bool {
        self.background_color.is_none() && self.character.is_none()
    }
}

/// `Canvas` is the grid of styled cells a tree is drawn onto.
///
/// It can be written out as plain text with [`Canvas::write`] or with ANSI escape codes with
/// [`Canvas::write_ansi`]. Its [`Display`] implementation produces the plain text form.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    cells: Vec<Vec<Cell>>,
}

impl Canvas {
    /// Creates a blank canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            cells: vec![vec![Cell::default(); width]; height],
        }
    }

    /// The width of the canvas in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height of the canvas in rows.
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Fills a rectangle with a background color. The rectangle is clipped to the canvas.
    pub fn set_background_color(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color) {
        for row in self.cells.iter_mut().skip(y).take(h) {
            for cell in row.iter_mut().skip(x).take(w) {
                cell.background_color = Some(color);
            }
        }
    }

    /// Writes text starting at the given position. Characters past the right edge are dropped.
    pub fn set_text(&mut self, x: usize, y: usize, text: &str, style: TextStyle) {
        let Some(row) = self.cells.get_mut(y) else {
            return;
        };
        let mut x = x;
        for c in text.chars() {
            let width = c.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            if x + width > row.len() {
                break;
            }
            row[x].character = Some(Character { value: c, style });
            x += width;
        }
    }

    /// Writes a single character.
    pub fn set_char(&mut self, x: usize, y: usize, value: char, style: TextStyle) {
        if let Some(cell) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            cell.character = Some(Character { value, style });
        }
    }

    fn write_impl<W: Write>(&self, mut w: W, ansi: bool) -> io::Result<()> {
        if ansi {
            write!(w, csi!("0m"))?;
        }

        let mut background_color = None;
        let mut text_style = TextStyle::default();

        for row in &self.cells {
            let last_non_empty = row.iter().rposition(|cell| !cell.is_empty());
            let mut skip = 0;
            for cell in row.iter().take(last_non_empty.map_or(0, |i| i + 1)) {
                if ansi {
                    // For certain changes, we need to reset all attributes.
                    let mut needs_reset = false;
                    if let Some(c) = &cell.character {
                        if c.style.weight != text_style.weight && c.style.weight == Weight::Normal {
                            needs_reset = true;
                        }
                    }
                    if needs_reset {
                        write!(w, csi!("0m"))?;
                        background_color = None;
                        text_style = TextStyle::default();
                    }

                    if cell.background_color != background_color {
                        write!(
                            w,
                            csi!("{}m"),
                            Colored::BackgroundColor(cell.background_color.unwrap_or(Color::Reset))
                        )?;
                        background_color = cell.background_color;
                    }

                    if let Some(c) = &cell.character {
                        if c.style.color != text_style.color {
                            write!(
                                w,
                                csi!("{}m"),
                                Colored::ForegroundColor(c.style.color.unwrap_or(Color::Reset))
                            )?;
                        }

                        if c.style.weight != text_style.weight {
                            match c.style.weight {
                                Weight::Bold => write!(w, csi!("{}m"), Attribute::Bold.sgr())?,
                                Weight::Normal => {}
                                Weight::Light => write!(w, csi!("{}m"), Attribute::Dim.sgr())?,
                            }
                        }

                        text_style = c.style;
                    }
                }

                // wide characters occupy the following cell
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                if let Some(c) = &cell.character {
                    write!(w, "{}", c.value)?;
                    skip = c.value.width().unwrap_or(1).saturating_sub(1);
                } else {
                    w.write_all(b" ")?;
                }
            }
            if ansi {
                // clear until end of line
                write!(w, csi!("K"))?;
                // add a carriage return in case we're in raw mode
                w.write_all(b"\r\n")?;
            } else {
                w.write_all(b"\n")?;
            }
        }
        if ansi {
            write!(w, csi!("0m"))?;
        }
        w.flush()?;
        Ok(())
    }

    /// Writes the canvas with ANSI escape codes for colors and weights.
    pub fn write_ansi<W: Write>(&self, w: W) -> io::Result<()> {
        self.write_impl(w, true)
    }

    /// Writes the canvas as plain text.
    pub fn write<W: Write>(&self, w: W) -> io::Result<()> {
        self.write_impl(w, false)
    }
}

impl Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::with_capacity(self.width * self.cells.len());
        self.write(&mut buf).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_trailing_cells() {
        let mut canvas = Canvas::new(10, 2);
        canvas.set_text(2, 0, "hi", TextStyle::default());
        canvas.set_text(0, 1, "truncated text", TextStyle::default());
        assert_eq!(canvas.to_string(), "  hi\ntruncated \n");
    }

    #[test]
    fn test_background_only_cells_are_kept() {
        let mut canvas = Canvas::new(4, 1);
        canvas.set_background_color(0, 0, 3, 5, Color::Blue);
        assert_eq!(canvas.to_string(), "   \n");
    }

    #[test]
    fn test_ansi_output() {
        let mut canvas = Canvas::new(4, 1);
        canvas.set_text(
            0,
            0,
            "ok",
            TextStyle {
                color: Some(Color::Green),
                weight: Weight::Bold,
            },
        );
        let mut out = Vec::new();
        canvas.write_ansi(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("ok"));
        assert!(out.starts_with("\x1b[0m"));
        assert!(out.ends_with("\r\n\x1b[0m"));
    }
}
