//! SVG rendering backend.

use std::collections::HashMap;

use super::{canonical_key, Renderer, StyleValue};
use crate::geom::{BoundingBox, Point};
use crate::style::Color;

/// Escape text for inclusion in SVG.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// A [`Renderer`] that accumulates an SVG document.
///
/// Device space is y-up with the origin at the lower left; every emitted
/// coordinate is flipped to SVG's y-down space.
#[derive(Debug)]
pub struct SvgBackend {
    width: f64,
    height: f64,
    content: Vec<String>,
    /// Attribute scopes; `get` searches innermost first.
    state: Vec<HashMap<String, StyleValue>>,
}

impl SvgBackend {
    pub fn new(width: f64, height: f64) -> Self {
        SvgBackend {
            width,
            height,
            content: Vec::new(),
            state: vec![HashMap::new()],
        }
    }

    fn flip(&self, p: Point) -> Point {
        (p.0, self.height - p.1)
    }

    fn num(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(|v| v.as_num()).unwrap_or(default)
    }

    fn string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(StyleValue::Str(s)) => s,
            _ => default.to_string(),
        }
    }

    fn color_css(&self) -> String {
        match self.get("color") {
            Some(StyleValue::Color(c)) => c.css(),
            Some(StyleValue::Str(s)) => Color::from(s.as_str()).css(),
            _ => "#000000".to_string(),
        }
    }

    fn stroke_attrs(&self) -> String {
        let dash = match self.string("linetype", "solid").as_str() {
            "dashed" => " stroke-dasharray=\"6,4\"",
            "dotted" => " stroke-dasharray=\"1,3\"",
            "dotdashed" => " stroke-dasharray=\"6,3,1,3\"",
            _ => "",
        };
        format!(
            "stroke=\"{}\" stroke-width=\"{}\" fill=\"none\"{}",
            self.color_css(),
            self.num("linewidth", 1.0),
            dash
        )
    }

    fn push(&mut self, element: String) {
        self.content.push(element);
    }

    /// Assemble the final SVG document.
    pub fn render(self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\">\n  {content}\n</svg>",
            w = self.width,
            h = self.height,
            content = self.content.join("\n  ")
        )
    }
}

impl Renderer for SvgBackend {
    fn set(&mut self, key: &str, value: StyleValue) {
        let key = canonical_key(key).to_string();
        self.state.last_mut().unwrap().insert(key, value);
    }

    fn get(&self, key: &str) -> Option<StyleValue> {
        let key = canonical_key(key);
        self.state
            .iter()
            .rev()
            .find_map(|scope| scope.get(key).cloned())
    }

    fn save_state(&mut self) {
        self.state.push(HashMap::new());
    }

    fn restore_state(&mut self) {
        if self.state.len() > 1 {
            self.state.pop();
        }
    }

    fn bbox(&self) -> BoundingBox {
        BoundingBox::from_points((0.0, 0.0), (self.width, self.height))
    }

    fn line(&mut self, p: Point, q: Point) {
        let p = self.flip(p);
        let q = self.flip(q);
        let attrs = self.stroke_attrs();
        self.push(format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}/>",
            p.0, p.1, q.0, q.1, attrs
        ));
    }

    fn curve(&mut self, x: &[f64], y: &[f64]) {
        if x.is_empty() {
            return;
        }
        let points: String = x
            .iter()
            .zip(y.iter())
            .map(|(&x0, &y0)| {
                let (u, v) = self.flip((x0, y0));
                format!("{:.2},{:.2}", u, v)
            })
            .collect::<Vec<_>>()
            .join(" ");
        let attrs = self.stroke_attrs();
        self.push(format!("<polyline points=\"{}\" {}/>", points, attrs));
    }

    fn polygon(&mut self, points: &[Point]) {
        if points.is_empty() {
            return;
        }
        let pts: String = points
            .iter()
            .map(|&p| {
                let (u, v) = self.flip(p);
                format!("{:.2},{:.2}", u, v)
            })
            .collect::<Vec<_>>()
            .join(" ");
        let fill = self.color_css();
        self.push(format!("<polygon points=\"{}\" fill=\"{}\"/>", pts, fill));
    }

    fn rect(&mut self, p: Point, q: Point) {
        let p = self.flip(p);
        let q = self.flip(q);
        let (x0, x1) = (p.0.min(q.0), p.0.max(q.0));
        let (y0, y1) = (p.1.min(q.1), p.1.max(q.1));
        let attrs = self.stroke_attrs();
        self.push(format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>",
            x0,
            y0,
            x1 - x0,
            y1 - y0,
            attrs
        ));
    }

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64, angle: f64) {
        let c = self.flip(center);
        let attrs = self.stroke_attrs();
        let transform = if angle != 0.0 {
            // SVG rotation is clockwise in y-down space; negate to keep
            // the device-space convention.
            format!(" transform=\"rotate({:.2},{:.2},{:.2})\"", -angle, c.0, c.1)
        } else {
            String::new()
        };
        self.push(format!(
            "<ellipse cx=\"{:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" {}{}/>",
            c.0, c.1, rx, ry, attrs, transform
        ));
    }

    fn arc(&mut self, center: Point, p0: Point, p1: Point) {
        let r = ((p0.0 - center.0).powi(2) + (p0.1 - center.1).powi(2)).sqrt();
        let s = self.flip(p0);
        let e = self.flip(p1);
        let attrs = self.stroke_attrs();
        self.push(format!(
            "<path d=\"M {:.2} {:.2} A {:.2} {:.2} 0 0 0 {:.2} {:.2}\" {}/>",
            s.0, s.1, r, r, e.0, e.1, attrs
        ));
    }

    fn symbol(&mut self, p: Point) {
        let size = self.num("symbolsize", 3.0);
        let kind = self.string("symboltype", "circle");
        let (cx, cy) = self.flip(p);
        let color = self.color_css();
        let element = match kind.as_str() {
            "filled circle" | "dot" => {
                let r = if kind == "dot" { size / 3.0 } else { size };
                format!(
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
                    cx, cy, r, color
                )
            }
            "square" | "filled square" => {
                let fill = if kind == "filled square" { &color } else { "none" };
                format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" \
                     stroke=\"{}\" fill=\"{}\"/>",
                    cx - size,
                    cy - size,
                    2.0 * size,
                    2.0 * size,
                    color,
                    fill
                )
            }
            "diamond" => format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" \
                 stroke=\"{}\" fill=\"none\" transform=\"rotate(45,{:.2},{:.2})\"/>",
                cx - size,
                cy - size,
                2.0 * size,
                2.0 * size,
                color,
                cx,
                cy
            ),
            "triangle" => format!(
                "<polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" \
                 stroke=\"{}\" fill=\"none\"/>",
                cx,
                cy - size,
                cx - size,
                cy + size,
                cx + size,
                cy + size,
                color
            ),
            "cross" => format!(
                "<path d=\"M {x0:.2} {y0:.2} L {x1:.2} {y1:.2} M {x0:.2} {y1:.2} L {x1:.2} {y0:.2}\" \
                 stroke=\"{c}\" fill=\"none\"/>",
                x0 = cx - size,
                y0 = cy - size,
                x1 = cx + size,
                y1 = cy + size,
                c = color
            ),
            "plus" => format!(
                "<path d=\"M {:.2} {cy:.2} L {:.2} {cy:.2} M {cx:.2} {:.2} L {cx:.2} {:.2}\" \
                 stroke=\"{c}\" fill=\"none\"/>",
                cx - size,
                cx + size,
                cy - size,
                cy + size,
                cx = cx,
                cy = cy,
                c = color
            ),
            _ => format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" stroke=\"{}\" fill=\"none\"/>",
                cx, cy, size, color
            ),
        };
        self.push(element);
    }

    fn symbols(&mut self, x: &[f64], y: &[f64]) {
        for (&x0, &y0) in x.iter().zip(y.iter()) {
            self.symbol((x0, y0));
        }
    }

    fn text(&mut self, p: Point, s: &str) {
        if s.is_empty() {
            return;
        }
        let (x, y) = self.flip(p);
        let size = self.num("fontsize", 12.0);
        let anchor = match self.string("texthalign", "center").as_str() {
            "left" => "start",
            "right" => "end",
            _ => "middle",
        };
        let baseline = match self.string("textvalign", "center").as_str() {
            "top" => "hanging",
            "bottom" => "text-after-edge",
            _ => "middle",
        };
        let angle = self.num("textangle", 0.0);
        let transform = if angle != 0.0 {
            format!(" transform=\"rotate({:.2},{:.2},{:.2})\"", -angle, x, y)
        } else {
            String::new()
        };
        let color = self.color_css();
        self.push(format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.1}\" fill=\"{}\" \
             text-anchor=\"{}\" dominant-baseline=\"{}\"{}>{}</text>",
            x,
            y,
            size,
            color,
            anchor,
            baseline,
            transform,
            escape_xml(s)
        ));
    }

    fn text_width(&self, s: &str) -> f64 {
        // Approximate: average glyph advance of 0.6 em. Pixel-accurate
        // metrics are the embedding application's concern.
        0.6 * self.num("fontsize", 12.0) * s.chars().count() as f64
    }

    fn text_height(&self, _s: &str) -> f64 {
        self.num("fontsize", 12.0)
    }
}
