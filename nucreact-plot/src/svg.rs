use nucreact::Curve;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LineStyle {
    fn dasharray(self) -> Option<&'static str> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some("6,4"),
            LineStyle::DashDot => Some("8,3,2,3"),
            LineStyle::Dotted => Some("2,3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Blue,
    Green,
    Cyan,
}

impl Color {
    fn hex(self) -> &'static str {
        match self {
            Color::Black => "#000000",
            Color::Red => "#d62728",
            Color::Blue => "#1f3fbf",
            Color::Green => "#2ca02c",
            Color::Cyan => "#17becf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPlacement {
    Inside,
    /// To the right of the frame, for figures with many series.
    Outside,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: Color,
    pub style: LineStyle,
}

impl Series {
    pub fn from_curve(label: impl Into<String>, curve: &Curve, color: Color, style: LineStyle) -> Self {
        Series {
            label: label.into(),
            points: curve.points().collect(),
            color,
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub legend: LegendPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    pub legend_width: u32,
    pub font_size: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 700,
            legend_width: 460,
            font_size: 14,
        }
    }
}

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TICK_LENGTH: f64 = 6.0;

struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x: (f64, f64),
    y: (f64, f64),
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        self.left + (x - self.x.0) / (self.x.1 - self.x.0) * self.width
    }

    fn py(&self, y: f64) -> f64 {
        self.top + self.height - (y - self.y.0) / (self.y.1 - self.y.0) * self.height
    }
}

/// Renders a line figure as a standalone SVG document.
///
/// Frame ticks point inwards on all four sides. The output depends only on
/// the inputs.
pub fn render_svg(figure: &Figure, config: &FigureConfig) -> String {
    let legend_extra = match figure.legend {
        LegendPlacement::Inside => 0.0,
        LegendPlacement::Outside => config.legend_width as f64,
    };
    let total_width = config.width as f64 + legend_extra;
    let total_height = config.height as f64;
    let font = config.font_size as f64;

    let (x_range, y_range) = data_ranges(&figure.series);
    let frame = Frame {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: (config.width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
        height: (total_height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        x: x_range,
        y: y_range,
    };
    let bottom = frame.top + frame.height;
    let right = frame.left + frame.width;

    let mut parts = vec![format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}' font-family='Helvetica, Arial, sans-serif' font-size='{font}'>",
        w = total_width,
        h = total_height,
    )];
    parts.push(format!(
        "<rect x='0' y='0' width='{total_width}' height='{total_height}' fill='#ffffff' />"
    ));
    parts.push(format!(
        "<defs><clipPath id='plot-area'><rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' /></clipPath></defs>",
        frame.left, frame.top, frame.width, frame.height
    ));

    for series in &figure.series {
        let points: Vec<String> = series
            .points
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|&(x, y)| format!("{:.2},{:.2}", frame.px(x), frame.py(y)))
            .collect();
        if points.is_empty() {
            continue;
        }
        let dash = series
            .style
            .dasharray()
            .map(|d| format!(" stroke-dasharray='{d}'"))
            .unwrap_or_default();
        parts.push(format!(
            "<polyline clip-path='url(#plot-area)' fill='none' stroke='{}' stroke-width='1.5'{dash} points='{}' />",
            series.color.hex(),
            points.join(" ")
        ));
    }

    parts.push(format!(
        "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='none' stroke='#000000' stroke-width='1' />",
        frame.left, frame.top, frame.width, frame.height
    ));

    let x_ticks = nice_ticks(frame.x.0, frame.x.1, 6);
    let x_step = tick_step(&x_ticks);
    for &tick in &x_ticks {
        let x = frame.px(tick);
        parts.push(format!(
            "<line x1='{x:.2}' y1='{bottom:.2}' x2='{x:.2}' y2='{:.2}' stroke='#000000' />",
            bottom - TICK_LENGTH
        ));
        parts.push(format!(
            "<line x1='{x:.2}' y1='{:.2}' x2='{x:.2}' y2='{:.2}' stroke='#000000' />",
            frame.top,
            frame.top + TICK_LENGTH
        ));
        parts.push(format!(
            "<text x='{x:.2}' y='{:.2}' text-anchor='middle'>{}</text>",
            bottom + font + 6.0,
            format_tick(tick, x_step)
        ));
    }

    let y_ticks = nice_ticks(frame.y.0, frame.y.1, 6);
    let y_step = tick_step(&y_ticks);
    for &tick in &y_ticks {
        let y = frame.py(tick);
        parts.push(format!(
            "<line x1='{:.2}' y1='{y:.2}' x2='{:.2}' y2='{y:.2}' stroke='#000000' />",
            frame.left,
            frame.left + TICK_LENGTH
        ));
        parts.push(format!(
            "<line x1='{right:.2}' y1='{y:.2}' x2='{:.2}' y2='{y:.2}' stroke='#000000' />",
            right - TICK_LENGTH
        ));
        parts.push(format!(
            "<text x='{:.2}' y='{:.2}' text-anchor='end'>{}</text>",
            frame.left - 8.0,
            y + font / 3.0,
            format_tick(tick, y_step)
        ));
    }

    parts.push(format!(
        "<text x='{:.2}' y='{:.2}' text-anchor='middle'>{}</text>",
        frame.left + frame.width / 2.0,
        MARGIN_TOP / 2.0,
        escape(&figure.title)
    ));
    parts.push(format!(
        "<text x='{:.2}' y='{:.2}' text-anchor='middle'>{}</text>",
        frame.left + frame.width / 2.0,
        total_height - MARGIN_BOTTOM / 4.0,
        escape(&figure.x_label)
    ));
    let y_label_x = font + 4.0;
    let y_label_y = frame.top + frame.height / 2.0;
    parts.push(format!(
        "<text x='{y_label_x:.2}' y='{y_label_y:.2}' text-anchor='middle' transform='rotate(-90 {y_label_x:.2} {y_label_y:.2})'>{}</text>",
        escape(&figure.y_label)
    ));

    parts.extend(render_legend(figure, &frame, config));
    parts.push("</svg>".into());
    parts.join("")
}

fn render_legend(figure: &Figure, frame: &Frame, config: &FigureConfig) -> Vec<String> {
    let entries: Vec<&Series> = figure
        .series
        .iter()
        .filter(|s| !s.label.is_empty())
        .collect();
    if entries.is_empty() {
        return Vec::new();
    }

    let font = config.font_size as f64;
    let row = font + 8.0;
    let sample = 36.0;
    let widest = entries
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0) as f64;
    let box_width = sample + 24.0 + widest * font * 0.55;
    let box_height = row * entries.len() as f64 + 8.0;
    let (x0, y0) = match figure.legend {
        LegendPlacement::Inside => (
            frame.left + frame.width - box_width - 10.0,
            frame.top + 10.0,
        ),
        LegendPlacement::Outside => (frame.left + frame.width + 20.0, frame.top),
    };

    let mut parts = vec![format!(
        "<rect x='{x0:.2}' y='{y0:.2}' width='{box_width:.2}' height='{box_height:.2}' fill='#ffffff' fill-opacity='0.8' stroke='#cccccc' />"
    )];
    for (idx, series) in entries.iter().enumerate() {
        let y = y0 + 4.0 + row * (idx as f64 + 0.5);
        let dash = series
            .style
            .dasharray()
            .map(|d| format!(" stroke-dasharray='{d}'"))
            .unwrap_or_default();
        parts.push(format!(
            "<line x1='{:.2}' y1='{y:.2}' x2='{:.2}' y2='{y:.2}' stroke='{}' stroke-width='1.5'{dash} />",
            x0 + 8.0,
            x0 + 8.0 + sample,
            series.color.hex()
        ));
        parts.push(format!(
            "<text x='{:.2}' y='{:.2}'>{}</text>",
            x0 + 16.0 + sample,
            y + font / 3.0,
            escape(&series.label)
        ));
    }
    parts
}

/// Axis ranges over every finite point, padded by 5% on each side.
fn data_ranges(series: &[Series]) -> ((f64, f64), (f64, f64)) {
    let finite = || {
        series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    };
    let x = padded(finite().map(|p| p.0));
    let y = padded(finite().map(|p| p.1));
    (x, y)
}

fn padded(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if max - min <= f64::EPSILON * max.abs().max(1.0) {
        let pad = (min.abs() * 0.05).max(1.0);
        return (min - pad, max + pad);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Round-valued ticks (1, 2 or 5 times a power of ten) inside `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(max - min).is_finite() || max <= min || target == 0 {
        return vec![min];
    }
    let raw = (max - min) / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    }
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    let text = format!("{value:.decimals$}");
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        return text.trim_start_matches('-').to_string();
    }
    text
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure(legend: LegendPlacement) -> Figure {
        Figure {
            title: "12C(a,g)16O".into(),
            x_label: "E_α [keV]".into(),
            y_label: "E_γ [keV]".into(),
            series: vec![
                Series {
                    label: "16O(g.s.)".into(),
                    points: vec![(4000.0, 10000.0), (9000.0, 14000.0)],
                    color: Color::Black,
                    style: LineStyle::Solid,
                },
                Series {
                    label: "16O(6130)".into(),
                    points: vec![(4000.0, 4000.0), (9000.0, 8000.0)],
                    color: Color::Red,
                    style: LineStyle::Dashed,
                },
            ],
            legend,
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = FigureConfig::default();
        let a = render_svg(&figure(LegendPlacement::Inside), &config);
        let b = render_svg(&figure(LegendPlacement::Inside), &config);
        assert_eq!(a, b);
        assert!(a.starts_with("<svg"));
        assert!(a.ends_with("</svg>"));
        assert_eq!(a.matches("<polyline").count(), 2);
        assert!(a.contains("stroke-dasharray='6,4'"));
        assert!(a.contains("16O(6130)"));
    }

    #[test]
    fn test_outside_legend_widens_canvas() {
        let config = FigureConfig::default();
        let svg = render_svg(&figure(LegendPlacement::Outside), &config);
        assert!(svg.contains(&format!("width='{}'", config.width + config.legend_width)));
    }

    #[test]
    fn test_empty_series_renders_frame_only() {
        let mut fig = figure(LegendPlacement::Inside);
        for s in &mut fig.series {
            s.points.clear();
        }
        let svg = render_svg(&fig, &FigureConfig::default());
        assert!(!svg.contains("<polyline"));
        assert!(svg.contains("fill='none' stroke='#000000'"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut fig = figure(LegendPlacement::Inside);
        fig.title = "a < b & c".into();
        let svg = render_svg(&fig, &FigureConfig::default());
        assert!(svg.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(
            nice_ticks(3750.0, 9250.0, 6),
            vec![4000.0, 5000.0, 6000.0, 7000.0, 8000.0, 9000.0]
        );
        let small = nice_ticks(0.0, 1.0, 5);
        assert_eq!(small.len(), 6);
        assert!((small[1] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(5000.0, 1000.0), "5000");
        assert_eq!(format_tick(0.4, 0.2), "0.4");
        assert_eq!(format_tick(-0.0, 0.5), "0.0");
    }
}
