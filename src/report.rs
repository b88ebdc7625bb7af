//! Plain-text dashboard report for the terminal

use crate::dashboard::DashboardView;
use std::fmt::Write;

#[must_use]
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = write_report(&mut out, view);
    out
}

fn write_report(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    let hero = &view.hero;
    writeln!(out, "📍 {}", view.location)?;
    writeln!(out, "{}", hero.date)?;
    writeln!(
        out,
        "{} {}  {} (feels like {})",
        hero.icon, hero.temperature, hero.description, hero.feels_like
    )?;
    writeln!(out, "H: {}  L: {}", hero.high, hero.low)?;

    if let Some(error) = &view.error {
        writeln!(out, "\n⚠ {error}")?;
    }

    writeln!(out)?;
    for metric in view.metrics.iter().chain(&view.highlights) {
        match &metric.detail {
            Some(detail) => writeln!(out, "  {:<15} {} ({detail})", metric.label, metric.value)?,
            None => writeln!(out, "  {:<15} {}", metric.label, metric.value)?,
        }
    }

    if !view.days.is_empty() {
        writeln!(out, "\nOutlook")?;
    }
    for day in &view.days {
        let advisory = &day.advisory;
        writeln!(
            out,
            "  {:<6} {:<12} {} {} / {}  rain {}  [{}]",
            advisory.display_label, day.date, day.icon, day.high, day.low, day.rain, advisory.level
        )?;
        if !advisory.items.is_empty() {
            let items: Vec<String> = advisory.items.iter().map(ToString::to_string).collect();
            writeln!(out, "         {}", items.join(", "))?;
        }
        for callout in &day.callouts {
            writeln!(out, "         {callout}")?;
        }
    }

    if let Some(panel) = &view.analytics {
        writeln!(out, "\nAnalytics ({} confidence)", panel.confidence)?;
        writeln!(out, "  Temperature trend: {} {}", panel.trend_badge, panel.slope)?;
        if !panel.temperature_outlook.is_empty() {
            let temps: Vec<String> = panel
                .temperature_outlook
                .iter()
                .map(|t| format!("{t}°C"))
                .collect();
            writeln!(out, "  Next days: {}", temps.join(" "))?;
        }
        writeln!(
            out,
            "  Avg rain chance: {}  High-risk days: {}",
            panel.avg_rain_prob, panel.high_risk_days
        )?;
        for insight in &panel.insights {
            writeln!(out, "  • {insight}")?;
        }
        writeln!(out, "  {}", panel.footer)?;
    }

    Ok(())
}
