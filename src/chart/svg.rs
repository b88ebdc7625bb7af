//! Standalone SVG rendering of chart geometry

use super::{ChartGeometry, ChartLayout};
use std::fmt::Write;

const TEMP_COLOR: &str = "#f97316";
const RAIN_COLOR: &str = "#60a5fa";
const GRID_COLOR: &str = "#e5e7eb";
const LABEL_COLOR: &str = "#6b7280";
const PLACEHOLDER_FILL: &str = "#f3f4f6";

/// Render geometry as an SVG document; empty geometry gives a placeholder box.
#[must_use]
pub fn render(geometry: &ChartGeometry, layout: &ChartLayout) -> String {
    let mut svg = String::new();
    let _ = write_svg(&mut svg, geometry, layout);
    svg
}

fn write_svg(out: &mut String, geometry: &ChartGeometry, layout: &ChartLayout) -> std::fmt::Result {
    let (w, h, pad) = (layout.width, layout.height, layout.padding);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" font-family="sans-serif" font-size="11">"#
    )?;

    if geometry.is_empty() {
        writeln!(
            out,
            r#"  <rect x="0" y="0" width="{w}" height="{h}" rx="12" fill="{PLACEHOLDER_FILL}"/>"#
        )?;
        writeln!(
            out,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" fill="{LABEL_COLOR}">No chart data</text>"#,
            w / 2.0,
            h / 2.0
        )?;
        return writeln!(out, "</svg>");
    }

    for (y, tick) in geometry.grid_lines.iter().zip(&geometry.axis_ticks) {
        writeln!(
            out,
            r#"  <line x1="{pad}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{GRID_COLOR}"/>"#,
            w - pad
        )?;
        writeln!(
            out,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="end" fill="{LABEL_COLOR}">{}°C</text>"#,
            pad - 6.0,
            y + 4.0,
            tick.label
        )?;
    }

    for bar in &geometry.bars {
        writeln!(
            out,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="3" fill="{RAIN_COLOR}" opacity="0.6"/>"#,
            bar.left(),
            bar.y_top,
            bar.width,
            bar.height
        )?;
    }

    writeln!(
        out,
        r#"  <path d="{}" fill="none" stroke="{TEMP_COLOR}" stroke-width="2.5"/>"#,
        geometry.line_path
    )?;
    for point in &geometry.points {
        writeln!(
            out,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="3.5" fill="{TEMP_COLOR}"/>"#,
            point.x, point.y
        )?;
    }

    for label in &geometry.x_labels {
        writeln!(
            out,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" fill="{LABEL_COLOR}">{}</text>"#,
            label.x,
            h - pad / 3.0,
            label.text
        )?;
    }

    writeln!(
        out,
        r#"  <text x="{:.2}" y="{:.2}" text-anchor="end" fill="{RAIN_COLOR}">% rain</text>"#,
        w - pad,
        pad - 10.0
    )?;
    writeln!(out, "</svg>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::normalize;
    use chrono::NaiveDate;

    #[test]
    fn test_render_empty_placeholder() {
        let svg = render(&ChartGeometry::default(), &ChartLayout::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("No chart data"));
        assert!(!svg.contains("<path"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_chart() {
        let labels = [NaiveDate::from_ymd_opt(2024, 5, 6), NaiveDate::from_ymd_opt(2024, 5, 7)];
        let geometry = normalize(&[20.0, 30.0], &[40.0, 85.0], &labels);
        let svg = render(&geometry, &ChartLayout::default());

        assert!(svg.contains(r#"<path d="M 36.00 224.00 L 964.00 36.00""#));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<line").count(), 5);
        assert!(svg.contains(">30°C</text>"));
        assert!(svg.contains(">05/07</text>"));
        assert!(svg.contains("% rain"));
    }
}
