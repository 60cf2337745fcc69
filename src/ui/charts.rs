//! Chart rendering for answers that carry a chart request.
//!
//! [`render`] is the single dispatch point: it picks the drawing strategy
//! for a [`ChartRequest`] by kind and returns a [`ChartView`] widget, or
//! nothing for kinds this client does not know how to draw. Views hold only
//! precomputed geometry, so the same request always renders the same way.

use std::f64::consts::TAU;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Points};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::chart::{ChartKind, ChartRequest, DataPoint};

/// Segment colors for pie charts, assigned by position.
pub const PIE_PALETTE: [Color; 4] = [
    Color::Rgb(0x00, 0x88, 0xFE),
    Color::Rgb(0x00, 0xC4, 0x9F),
    Color::Rgb(0xFF, 0xBB, 0x28),
    Color::Rgb(0xFF, 0x80, 0x42),
];

/// Stroke and fill color of line and bar series.
pub const SERIES_COLOR: Color = Color::Rgb(0x88, 0x84, 0xD8);

const BAR_WIDTH: f64 = 0.6;
const BAR_SAMPLES: usize = 13;
const PIE_RADIUS_MARGIN: f64 = 1.05;
const MAX_PLOT_SPAN: f64 = 1e300;
/// 2^-1000
const PLOT_SPAN_SCALE: f64 = 9.332636185032189e-302;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub frame_style: Style,
    pub axis_style: Style,
    pub label_style: Style,
    pub series_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            frame_style: Style::default(),
            axis_style: Style::default(),
            label_style: Style::default(),
            series_color: SERIES_COLOR,
        }
    }
}

/// Color of the pie segment at `index`.
pub fn pie_color(index: usize) -> Color {
    PIE_PALETTE[index % PIE_PALETTE.len()]
}

/// Select the drawing strategy for a chart request.
pub fn render(request: &ChartRequest, style: &ChartStyle) -> Option<ChartView> {
    match &request.kind {
        ChartKind::Line => Some(ChartView::Line(CartesianView::new(&request.series, *style))),
        ChartKind::Bar => Some(ChartView::Bar(CartesianView::new(&request.series, *style))),
        ChartKind::Pie => Some(ChartView::Pie(PieView::new(&request.series, *style))),
        ChartKind::Unrecognized(_) => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Line(CartesianView),
    Bar(CartesianView),
    Pie(PieView),
}

impl ChartView {
    pub fn title(&self) -> &'static str {
        match self {
            ChartView::Line(_) => "line chart",
            ChartView::Bar(_) => "bar chart",
            ChartView::Pie(_) => "pie chart",
        }
    }

    /// Rows the view wants in the transcript.
    pub fn preferred_height(&self, cartesian_height: u16) -> u16 {
        match self {
            ChartView::Line(_) | ChartView::Bar(_) => cartesian_height,
            ChartView::Pie(pie) => {
                let legend_rows = u16::try_from(pie.segments.len()).unwrap_or(u16::MAX);
                cartesian_height
                    .saturating_add(2)
                    .max(legend_rows.saturating_add(2))
                    .min(cartesian_height.saturating_mul(2))
            }
        }
    }

    fn frame(&self, style: &ChartStyle) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(style.frame_style)
            .title(Line::styled(format!(" {} ", self.title()), style.label_style))
    }
}

impl Widget for &ChartView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.width < 3 || area.height < 3 {
            return;
        }
        match self {
            ChartView::Line(view) => view.render_as(GraphType::Line, self.frame(&view.style), area, buf),
            ChartView::Bar(view) => view.render_as(GraphType::Bar, self.frame(&view.style), area, buf),
            ChartView::Pie(view) => view.render_into(self.frame(&view.style), area, buf),
        }
    }
}

/// Render a view off-screen and return its rows as plain text.
pub fn render_to_lines(view: &ChartView, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf);

    (0..height)
        .map(|y| {
            let mut row = String::new();
            let mut skip = 0usize;
            for x in 0..width {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let symbol = buf.cell((x, y)).map(|cell| cell.symbol()).unwrap_or(" ");
                skip = symbol.width().saturating_sub(1);
                row.push_str(symbol);
            }
            row.trim_end().to_string()
        })
        .collect()
}

/// Line and bar geometry: one category slot per data point.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianView {
    labels: Vec<String>,
    points: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    /// Factor applied to plotted values to keep the y span plottable.
    y_scale: f64,
    style: ChartStyle,
}

impl CartesianView {
    fn new(series: &[DataPoint], style: ChartStyle) -> Self {
        // The outer slots stay empty so that category `i` sits under label
        // slot `i + 1` of an axis with `n + 2` evenly spaced labels.
        let x_bounds = if series.is_empty() {
            [0.0, 1.0]
        } else {
            [-1.5, series.len() as f64 + 0.5]
        };

        let (lo, hi) = series
            .iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)));
        // The canvas multiplies the span by a row count, so it must stay
        // well below f64::MAX. Power-of-two scaling keeps labels exact.
        let y_scale = if hi - lo <= MAX_PLOT_SPAN {
            1.0
        } else {
            PLOT_SPAN_SCALE
        };
        let (lo, hi) = (lo * y_scale, hi * y_scale);
        let points: Vec<(f64, f64)> = series
            .iter()
            .enumerate()
            .map(|(index, point)| (index as f64, point.value * y_scale))
            .collect();

        let y_bounds = if hi - lo < f64::EPSILON {
            [lo, lo + 1.0]
        } else {
            [lo, hi]
        };

        Self {
            labels: series.iter().map(|point| point.name.clone()).collect(),
            points,
            x_bounds,
            y_bounds,
            y_scale,
            style,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Plotted points, in axis units.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        self.x_bounds
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        self.y_bounds
    }

    fn y_labels(&self) -> Vec<String> {
        let [lo, hi] = self.y_bounds;
        [lo, lo / 2.0 + hi / 2.0, hi]
            .into_iter()
            .map(|tick| format_value(tick / self.y_scale))
            .collect()
    }

    fn x_labels(&self, area_width: u16, y_label_width: usize) -> Vec<String> {
        if self.labels.is_empty() {
            return Vec::new();
        }
        let slots = self.labels.len() + 2;
        let graph_width = usize::from(area_width).saturating_sub(y_label_width + 3);
        let slot_width = (graph_width / slots).saturating_sub(1);

        let mut labels = Vec::with_capacity(slots);
        labels.push(String::new());
        labels.extend(
            self.labels
                .iter()
                .map(|label| truncate_to_width(label, slot_width)),
        );
        labels.push(String::new());
        labels
    }

    fn bar_columns(&self) -> Vec<(f64, f64)> {
        let step = BAR_WIDTH / (BAR_SAMPLES - 1) as f64;
        self.points
            .iter()
            .flat_map(|&(x, y)| {
                (0..BAR_SAMPLES).map(move |i| (x - BAR_WIDTH / 2.0 + step * i as f64, y))
            })
            .collect()
    }

    fn render_as(&self, graph_type: GraphType, frame: Block<'_>, area: Rect, buf: &mut Buffer) {
        let series_style = Style::default().fg(self.style.series_color);
        let bars;
        let datasets = match graph_type {
            GraphType::Bar => {
                bars = self.bar_columns();
                vec![Dataset::default()
                    .marker(Marker::Block)
                    .graph_type(GraphType::Bar)
                    .style(series_style)
                    .data(&bars)]
            }
            _ => vec![
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(series_style)
                    .data(&self.points),
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(series_style)
                    .data(&self.points),
            ],
        };

        let y_labels = self.y_labels();
        let y_label_width = y_labels.iter().map(|l| l.width()).max().unwrap_or(0);

        let mut x_axis = Axis::default()
            .style(self.style.axis_style)
            .bounds(self.x_bounds);
        let x_labels = self.x_labels(area.width, y_label_width);
        if !x_labels.is_empty() {
            x_axis = x_axis.labels(x_labels);
        }
        let y_axis = Axis::default()
            .style(self.style.axis_style)
            .bounds(self.y_bounds)
            .labels(y_labels);

        Chart::new(datasets)
            .block(frame)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSegment {
    pub name: String,
    pub value: f64,
    /// Fraction of the whole, in `0.0..=1.0`.
    pub share: f64,
    pub start_angle: f64,
    pub sweep: f64,
    pub color: Color,
}

/// Pie geometry: segments proportional to each entry's magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct PieView {
    segments: Vec<PieSegment>,
    style: ChartStyle,
}

impl PieView {
    fn new(series: &[DataPoint], style: ChartStyle) -> Self {
        let mut total: f64 = series.iter().map(|point| point.value.abs()).sum();
        let mut unit = 1.0;
        if !total.is_finite() {
            // Sum relative to the largest magnitude instead.
            unit = series
                .iter()
                .map(|point| point.value.abs())
                .fold(0.0, f64::max);
            total = series.iter().map(|point| point.value.abs() / unit).sum();
        }

        let mut start_angle = 0.0;
        let segments = series
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let share = if total > 0.0 {
                    point.value.abs() / unit / total
                } else {
                    0.0
                };
                let segment = PieSegment {
                    name: point.name.clone(),
                    value: point.value,
                    share,
                    start_angle,
                    sweep: share * TAU,
                    color: pie_color(index),
                };
                start_angle += segment.sweep;
                segment
            })
            .collect();

        Self { segments, style }
    }

    pub fn segments(&self) -> &[PieSegment] {
        &self.segments
    }

    /// Index of the segment covering `angle` (radians, counter-clockwise
    /// from the positive x axis).
    pub fn segment_at(&self, angle: f64) -> Option<usize> {
        let angle = angle.rem_euclid(TAU);
        self.segments
            .iter()
            .rposition(|segment| segment.sweep > 0.0 && angle >= segment.start_angle)
    }

    /// Sample the unit disc at braille resolution for a `cols` x `rows`
    /// cell area, grouping points by segment. Bounds keep the disc round on
    /// cells twice as tall as they are wide.
    pub fn rasterize(&self, cols: u16, rows: u16) -> (Vec<Vec<(f64, f64)>>, [f64; 2], [f64; 2]) {
        let mut coords = vec![Vec::new(); self.segments.len()];
        if cols == 0 || rows == 0 {
            return (coords, [-1.0, 1.0], [-1.0, 1.0]);
        }

        let aspect = f64::from(cols) / (2.0 * f64::from(rows));
        let (x_half, y_half) = if aspect >= 1.0 {
            (PIE_RADIUS_MARGIN * aspect, PIE_RADIUS_MARGIN)
        } else {
            (PIE_RADIUS_MARGIN, PIE_RADIUS_MARGIN / aspect)
        };

        let dots_x = usize::from(cols) * 2;
        let dots_y = usize::from(rows) * 4;
        for py in 0..dots_y {
            let y = -y_half + (py as f64 + 0.5) * 2.0 * y_half / dots_y as f64;
            for px in 0..dots_x {
                let x = -x_half + (px as f64 + 0.5) * 2.0 * x_half / dots_x as f64;
                if x * x + y * y > 1.0 {
                    continue;
                }
                if let Some(index) = self.segment_at(y.atan2(x)) {
                    coords[index].push((x, y));
                }
            }
        }

        (coords, [-x_half, x_half], [-y_half, y_half])
    }

    fn legend_lines(&self) -> Vec<Line<'static>> {
        self.segments
            .iter()
            .map(|segment| {
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(segment.color)),
                    Span::styled(
                        format!(
                            "{} {} ({:.0}%)",
                            segment.name,
                            format_value(segment.value),
                            segment.share * 100.0
                        ),
                        self.style.label_style,
                    ),
                ])
            })
            .collect()
    }

    fn render_into(&self, frame: Block<'_>, area: Rect, buf: &mut Buffer) {
        let inner = frame.inner(area);
        frame.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let pie_cols = inner
            .height
            .saturating_mul(2)
            .saturating_add(2)
            .min(inner.width.saturating_mul(3) / 5)
            .max(1);
        let [pie_area, legend_area] =
            Layout::horizontal([Constraint::Length(pie_cols), Constraint::Min(0)]).areas(inner);

        let (coords, x_bounds, y_bounds) = self.rasterize(pie_area.width, pie_area.height);
        let outline = self.style.axis_style.fg.unwrap_or(Color::Gray);
        let empty = self.segments.iter().all(|segment| segment.sweep == 0.0);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                if empty {
                    ctx.draw(&Circle {
                        x: 0.0,
                        y: 0.0,
                        radius: 1.0,
                        color: outline,
                    });
                }
                for (segment, points) in self.segments.iter().zip(&coords) {
                    ctx.draw(&Points {
                        coords: points,
                        color: segment.color,
                    });
                }
            })
            .render(pie_area, buf);

        Paragraph::new(self.legend_lines()).render(legend_area, buf);
    }
}

/// Compact numeric label: integers without decimals, otherwise at most two.
/// Magnitudes from 1e15 up use exponent notation.
pub fn format_value(value: f64) -> String {
    if value.abs() >= 1e15 {
        format!("{value:.2e}")
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let fixed = format!("{value:.2}");
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: ChartKind, values: &[(&str, f64)]) -> ChartRequest {
        ChartRequest::new(
            kind,
            values
                .iter()
                .map(|(name, value)| DataPoint::new(*name, *value))
                .collect(),
        )
    }

    fn pie(values: &[(&str, f64)]) -> PieView {
        match render(&request(ChartKind::Pie, values), &ChartStyle::default()) {
            Some(ChartView::Pie(view)) => view,
            other => panic!("expected pie view, got {other:?}"),
        }
    }

    fn cartesian(kind: ChartKind, values: &[(&str, f64)]) -> CartesianView {
        match render(&request(kind, values), &ChartStyle::default()) {
            Some(ChartView::Line(view)) | Some(ChartView::Bar(view)) => view,
            other => panic!("expected cartesian view, got {other:?}"),
        }
    }

    #[test]
    fn dispatches_by_kind() {
        let style = ChartStyle::default();
        let data = [("a", 1.0)];
        assert!(matches!(render(&request(ChartKind::Line, &data), &style), Some(ChartView::Line(_))));
        assert!(matches!(render(&request(ChartKind::Bar, &data), &style), Some(ChartView::Bar(_))));
        assert!(matches!(render(&request(ChartKind::Pie, &data), &style), Some(ChartView::Pie(_))));
        assert!(render(
            &request(ChartKind::Unrecognized("scatter".to_string()), &data),
            &style
        )
        .is_none());
    }

    #[test]
    fn cartesian_plots_categories_against_values() {
        let view = cartesian(ChartKind::Bar, &[("Q1", 10.0), ("Q2", 20.0)]);
        assert_eq!(view.labels(), ["Q1".to_string(), "Q2".to_string()]);
        assert_eq!(view.points(), [(0.0, 10.0), (1.0, 20.0)]);
        assert_eq!(view.x_bounds(), [-1.5, 2.5]);
        assert_eq!(view.y_bounds(), [0.0, 20.0]);
    }

    #[test]
    fn value_axis_includes_zero_and_negative_values() {
        let view = cartesian(ChartKind::Line, &[("a", -5.0), ("b", 3.0)]);
        assert_eq!(view.y_bounds(), [-5.0, 3.0]);

        let flat = cartesian(ChartKind::Line, &[("a", 0.0), ("b", 0.0)]);
        assert_eq!(flat.y_bounds(), [0.0, 1.0]);
    }

    #[test]
    fn x_labels_pad_outer_slots_and_truncate() {
        let view = cartesian(ChartKind::Bar, &[("January", 1.0), ("February", 2.0)]);
        let labels = view.x_labels(30, 1);
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[0], "");
        assert_eq!(labels[3], "");
        assert!(labels[1].ends_with('…'));
        assert!(labels[1].width() <= 5);
    }

    #[test]
    fn pie_colors_cycle_through_palette() {
        let values: Vec<(String, f64)> = (0..10).map(|i| (format!("s{i}"), 1.0)).collect();
        let borrowed: Vec<(&str, f64)> = values.iter().map(|(n, v)| (n.as_str(), *v)).collect();
        let view = pie(&borrowed);

        assert!(view.segments().len() > PIE_PALETTE.len());
        for (index, segment) in view.segments().iter().enumerate() {
            assert_eq!(segment.color, PIE_PALETTE[index % PIE_PALETTE.len()]);
            assert_eq!(segment.color, pie_color(index));
        }
        assert_eq!(view.segments()[4].color, view.segments()[0].color);
    }

    #[test]
    fn pie_segments_are_proportional_and_tile_the_circle() {
        let view = pie(&[("a", 1.0), ("b", 3.0)]);
        let shares: Vec<f64> = view.segments().iter().map(|s| s.share).collect();
        assert_eq!(shares, vec![0.25, 0.75]);
        let last = &view.segments()[1];
        assert!((last.start_angle + last.sweep - TAU).abs() < 1e-9);

        assert_eq!(view.segment_at(0.1), Some(0));
        assert_eq!(view.segment_at(TAU / 2.0), Some(1));
        assert_eq!(view.segment_at(-0.1), Some(1));
    }

    #[test]
    fn zero_total_pie_has_no_filled_segments() {
        let view = pie(&[("a", 0.0), ("b", 0.0)]);
        assert!(view.segments().iter().all(|s| s.sweep == 0.0));
        assert_eq!(view.segment_at(1.0), None);
        let (coords, _, _) = view.rasterize(10, 5);
        assert!(coords.iter().all(Vec::is_empty));
    }

    #[test]
    fn rasterized_pie_assigns_points_to_every_visible_segment() {
        let view = pie(&[("a", 1.0), ("b", 1.0), ("c", 2.0)]);
        let (coords, x_bounds, y_bounds) = view.rasterize(20, 10);
        assert!(coords.iter().all(|points| !points.is_empty()));
        assert_eq!(y_bounds, [-PIE_RADIUS_MARGIN, PIE_RADIUS_MARGIN]);
        assert_eq!(x_bounds, [-PIE_RADIUS_MARGIN, PIE_RADIUS_MARGIN]);
        let c_points = coords[2].len() as f64;
        let total: usize = coords.iter().map(Vec::len).sum();
        assert!((c_points / total as f64 - 0.5).abs() < 0.05);
    }

    #[test]
    fn pie_colors_are_stable_across_renders() {
        let first = pie(&[("x", 2.0), ("y", 5.0), ("z", 1.0)]);
        let second = pie(&[("x", 2.0), ("y", 5.0), ("z", 1.0)]);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_series_render_an_empty_frame() {
        for kind in [ChartKind::Line, ChartKind::Bar, ChartKind::Pie] {
            let view = render(&request(kind, &[]), &ChartStyle::default()).expect("view");
            let lines = render_to_lines(&view, 40, 12);
            assert_eq!(lines.len(), 12);
            assert!(lines[0].contains(view.title()), "missing title in {lines:?}");
            assert!(lines[0].starts_with('┌'));
        }
    }

    #[test]
    fn bar_chart_draws_category_labels() {
        let view = render(
            &request(ChartKind::Bar, &[("Q1", 10.0), ("Q2", 20.0)]),
            &ChartStyle::default(),
        )
        .expect("view");
        let text = render_to_lines(&view, 60, 12).join("\n");
        assert!(text.contains("Q1"));
        assert!(text.contains("Q2"));
        assert!(text.contains("20"));
    }

    #[test]
    fn pie_legend_lists_entries_with_shares() {
        let view = render(
            &request(ChartKind::Pie, &[("North", 1.0), ("South", 3.0)]),
            &ChartStyle::default(),
        )
        .expect("view");
        let text = render_to_lines(&view, 60, 14).join("\n");
        assert!(text.contains("North 1 (25%)"));
        assert!(text.contains("South 3 (75%)"));
    }

    #[test]
    fn tiny_areas_do_not_panic() {
        let view = render(
            &request(ChartKind::Pie, &[("a", 1.0), ("b", 2.0)]),
            &ChartStyle::default(),
        )
        .expect("view");
        for (w, h) in [(0, 0), (1, 1), (2, 5), (3, 3), (5, 4)] {
            let _ = render_to_lines(&view, w, h);
        }
        let line = render(&request(ChartKind::Line, &[("a", 1.0)]), &ChartStyle::default())
            .expect("view");
        for (w, h) in [(0, 0), (3, 3), (6, 4)] {
            let _ = render_to_lines(&line, w, h);
        }
    }

    #[test]
    fn preferred_height_grows_with_pie_legend() {
        let small = render(&request(ChartKind::Pie, &[("a", 1.0)]), &ChartStyle::default())
            .expect("view");
        assert_eq!(small.preferred_height(12), 14);

        let values: Vec<(String, f64)> = (0..20).map(|i| (format!("s{i}"), 1.0)).collect();
        let borrowed: Vec<(&str, f64)> = values.iter().map(|(n, v)| (n.as_str(), *v)).collect();
        let big = render(&request(ChartKind::Pie, &borrowed), &ChartStyle::default())
            .expect("view");
        assert_eq!(big.preferred_height(12), 22);

        let bar = render(&request(ChartKind::Bar, &[("a", 1.0)]), &ChartStyle::default())
            .expect("view");
        assert_eq!(bar.preferred_height(12), 12);
    }

    #[test]
    fn format_value_is_compact() {
        assert_eq!(format_value(10.0), "10");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(12.5), "12.5");
        assert_eq!(format_value(0.126), "0.13");
        assert_eq!(format_value(-0.001), "0");
    }

    #[test]
    fn huge_values_use_exponent_notation() {
        assert_eq!(format_value(1e300), "1.00e300");
        assert_eq!(format_value(-2.5e16), "-2.50e16");
        assert_eq!(format_value(1e14), "100000000000000");
    }

    #[test]
    fn pie_shares_survive_overflowing_total() {
        let view = pie(&[("a", 1.7e308), ("b", 1.7e308)]);
        let shares: Vec<f64> = view.segments().iter().map(|s| s.share).collect();
        assert_eq!(shares, vec![0.5, 0.5]);

        let text = render_to_lines(&ChartView::Pie(view), 60, 14).join("\n");
        assert!(text.contains("a 1.70e308 (50%)"));
    }

    #[test]
    fn overflowing_value_span_is_rescaled() {
        let view = cartesian(ChartKind::Line, &[("a", f64::MAX), ("b", -f64::MAX)]);
        let [lo, hi] = view.y_bounds();
        assert!((hi - lo).is_finite());
        assert!(view.points()[0].1 > view.points()[1].1);
        assert_eq!(view.y_labels()[2], format_value(f64::MAX));

        let lines = render_to_lines(&ChartView::Line(view), 40, 12);
        let dot_rows: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.contains('•'))
            .map(|(row, _)| row)
            .collect();
        assert!(dot_rows.len() >= 2, "points share a row: {lines:?}");
    }
}
