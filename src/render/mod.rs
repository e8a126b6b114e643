//! Chart description and rendering.
//!
//! Reports build a [`Figure`] (plain positions, colours and labels in
//! data units) and hand it to [`chart::render_to_file`], which is the only
//! place that talks to the plotting backend.

pub mod chart;
pub mod layout;

use crate::config::HexColor;
use crate::render::layout::Tick;

/// One filled rectangle, centred on `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub width: f64,
    pub bottom: f64,
    pub top: f64,
    pub color: HexColor,
    /// Set on the first bar of each category only.
    pub legend: Option<String>,
}

impl Bar {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointSeries {
    pub points: Vec<(f64, f64)>,
    pub color: HexColor,
    pub legend: Option<String>,
}

/// Text drawn just above `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub x: f64,
    pub color: HexColor,
    pub legend: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub y_desc: String,
    pub x_range: (f64, f64),
    pub y_max: f64,
    /// y is a count axis; tick labels are whole numbers.
    pub integer_y: bool,
    pub bars: Vec<Bar>,
    pub line: Option<PointSeries>,
    pub annotations: Vec<Annotation>,
    pub ticks: Vec<Tick>,
    pub transition: Option<ReferenceLine>,
}

impl Figure {
    pub fn has_legend(&self) -> bool {
        self.bars.iter().any(|b| b.legend.is_some())
            || self.line.as_ref().is_some_and(|l| l.legend.is_some())
            || self.transition.as_ref().is_some_and(|t| t.legend.is_some())
    }

    pub fn annotation_at(&self, x: f64) -> Option<&Annotation> {
        self.annotations.iter().find(|a| (a.x - x).abs() < 1e-9)
    }
}
