//! Chart normalization for the temperature / rain-probability trend chart
//!
//! Both series share one horizontal placement ([`ChartLayout::x`]) but keep
//! independent vertical scales: temperature is scaled to its own min/max
//! ([`TemperatureScale`]) while probability always uses a fixed 0-100 range
//! ([`ChartLayout::y_rain`]).

pub mod svg;

use crate::format::{self, round_label};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::warn;

/// Canvas dimensions and styling constants for the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Number of tick intervals on the temperature axis
    pub y_ticks: u32,
    /// Bar width as a fraction of the per-sample slot
    pub bar_fraction: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 260.0,
            padding: 36.0,
            y_ticks: 4,
            bar_fraction: 0.5,
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    #[must_use]
    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// Bottom edge of the plotting area
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.padding + self.inner_height()
    }

    /// Horizontal position of sample `index` out of `count`
    #[must_use]
    pub fn x(&self, index: usize, count: usize) -> f64 {
        let span = count.saturating_sub(1).max(1) as f64;
        self.padding + (index as f64 / span) * self.inner_width()
    }

    /// Vertical position of a probability on the fixed 0-100 scale
    #[must_use]
    pub fn y_rain(&self, pop: f64) -> f64 {
        self.baseline() - (pop.clamp(0.0, 100.0) / 100.0) * self.inner_height()
    }

    fn tick_count(&self) -> u32 {
        self.y_ticks.max(1)
    }

    /// Normalize parallel series into chart geometry.
    ///
    /// Series of unequal length are cut to the shortest of `temps` and
    /// `rains`; a missing label renders as the placeholder.
    #[must_use]
    pub fn normalize(
        &self,
        temps: &[f64],
        rains: &[f64],
        labels: &[Option<NaiveDate>],
    ) -> ChartGeometry {
        if temps.len() != rains.len() || temps.len() != labels.len() {
            warn!(
                temps = temps.len(),
                rains = rains.len(),
                labels = labels.len(),
                "Chart series lengths differ, truncating"
            );
        }

        let n = temps.len().min(rains.len());
        if n == 0 {
            return ChartGeometry::default();
        }
        let temps = &temps[..n];
        let rains = &rains[..n];

        let scale = TemperatureScale::from_series(temps);
        let slot = self.inner_width() / n as f64;
        let bar_width = slot * self.bar_fraction;

        let points: Vec<ChartPoint> = temps
            .iter()
            .enumerate()
            .map(|(i, &value)| ChartPoint {
                x: self.x(i, n),
                y: scale.y(self, value),
                value,
            })
            .collect();

        let bars = rains
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let y_top = self.y_rain(value);
                ChartBar {
                    x: self.x(i, n),
                    y_top,
                    width: bar_width,
                    height: self.baseline() - y_top,
                    value,
                }
            })
            .collect();

        let axis_ticks: Vec<AxisTick> = (0..=self.tick_count())
            .map(|i| scale.tick(self, i, self.tick_count()))
            .collect();
        let grid_lines = axis_ticks.iter().map(|tick| tick.y).collect();

        let x_labels = (0..n)
            .map(|i| XLabel {
                x: self.x(i, n),
                text: format::month_day(labels.get(i).copied().flatten()),
            })
            .collect();

        let line_path = line_path(&points);

        ChartGeometry {
            points,
            bars,
            axis_ticks,
            grid_lines,
            x_labels,
            line_path,
            temp_min: Some(scale.min),
            temp_max: Some(scale.max),
        }
    }
}

/// Normalize with the default layout
#[must_use]
pub fn normalize(temps: &[f64], rains: &[f64], labels: &[Option<NaiveDate>]) -> ChartGeometry {
    ChartLayout::default().normalize(temps, rains, labels)
}

/// Data-driven vertical scale for the temperature line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureScale {
    pub min: f64,
    pub max: f64,
}

impl TemperatureScale {
    #[must_use]
    pub fn from_series(temps: &[f64]) -> Self {
        let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self { min, max }
    }

    /// Never below 1 so a flat series does not divide by zero
    #[must_use]
    pub fn range(&self) -> f64 {
        (self.max - self.min).max(1.0)
    }

    #[must_use]
    pub fn y(&self, layout: &ChartLayout, value: f64) -> f64 {
        layout.baseline() - ((value - self.min) / self.range()) * layout.inner_height()
    }

    fn tick(&self, layout: &ChartLayout, index: u32, count: u32) -> AxisTick {
        let fraction = f64::from(index) / f64::from(count);
        AxisTick {
            y: layout.padding + fraction * layout.inner_height(),
            label: round_label(self.max - fraction * (self.max - self.min)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Probability bar centred on its sample's `x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub x: f64,
    pub y_top: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
}

impl ChartBar {
    #[must_use]
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub y: f64,
    pub label: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XLabel {
    pub x: f64,
    pub text: String,
}

/// Renderable geometry; empty when there is nothing to plot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub points: Vec<ChartPoint>,
    pub bars: Vec<ChartBar>,
    pub axis_ticks: Vec<AxisTick>,
    pub grid_lines: Vec<f64>,
    pub x_labels: Vec<XLabel>,
    pub line_path: String,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
}

impl ChartGeometry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// SVG path data through the points in order: `M x y L x y ...`
#[must_use]
pub fn line_path(points: &[ChartPoint]) -> String {
    let mut path = String::new();
    for (i, point) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            path.push(' ');
        }
        let _ = write!(path, "{cmd} {:.2} {:.2}", point.x, point.y);
    }
    path
}
