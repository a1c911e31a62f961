//! Rendering backends.
//!
//! The drawing core talks to a backend only through [`Renderer`]: a
//! stateful attribute dictionary with save/restore scoping, a small set
//! of drawing primitives, and text measurement queries. Device
//! coordinates are y-up; backends whose native space is y-down (SVG)
//! flip at emission.

mod svg;

pub use svg::SvgBackend;

use crate::geom::{BoundingBox, Point};
use crate::style::Color;

/// A style attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Num(f64),
    Str(String),
    Color(Color),
}

impl StyleValue {
    pub fn as_num(&self) -> Option<f64> {
        match self {
            StyleValue::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Map legacy attribute spellings onto canonical keys. Applied inside
/// [`Renderer::set`]/[`Renderer::get`] implementations via
/// [`canonical_key`].
const KEY_ALIASES: &[(&str, &str)] = &[
    ("linecolor", "color"),
    ("textcolor", "color"),
    ("linekind", "linetype"),
    ("symbolkind", "symboltype"),
    ("textsize", "fontsize"),
];

/// Resolve a style key through the alias table.
pub fn canonical_key(key: &str) -> &str {
    for (alias, canon) in KEY_ALIASES {
        if *alias == key {
            return canon;
        }
    }
    key
}

/// The drawing surface interface consumed by the plotting core.
///
/// Attribute state is scoped: `save_state` opens a scope and
/// `restore_state` discards every attribute set since the matching save.
pub trait Renderer {
    /// Set a style attribute in the current scope.
    fn set(&mut self, key: &str, value: StyleValue);

    /// Look up a style attribute, searching enclosing scopes.
    fn get(&self, key: &str) -> Option<StyleValue>;

    fn save_state(&mut self);

    fn restore_state(&mut self);

    /// The drawable device area.
    fn bbox(&self) -> BoundingBox;

    fn line(&mut self, p: Point, q: Point);

    /// Polyline through the paired coordinate slices.
    fn curve(&mut self, x: &[f64], y: &[f64]);

    /// Closed filled polygon.
    fn polygon(&mut self, points: &[Point]);

    fn rect(&mut self, p: Point, q: Point);

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, angle: f64);

    /// Circular arc around `center` from `p0` to `p1`.
    fn arc(&mut self, center: Point, p0: Point, p1: Point);

    /// One marker at `p`, styled by the symboltype/symbolsize attributes.
    fn symbol(&mut self, p: Point);

    fn symbols(&mut self, x: &[f64], y: &[f64]);

    /// Text anchored at `p` per the current text alignment attributes.
    fn text(&mut self, p: Point, s: &str);

    /// Width of `s` at the current font size.
    fn text_width(&self, s: &str) -> f64;

    /// Height of `s` at the current font size.
    fn text_height(&self, s: &str) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_resolution() {
        assert_eq!(canonical_key("linecolor"), "color");
        assert_eq!(canonical_key("symbolkind"), "symboltype");
        assert_eq!(canonical_key("fontsize"), "fontsize");
    }
}
