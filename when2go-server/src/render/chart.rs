//! SVG charts for the dashboard.
//!
//! Chart builders lay points out in a fixed viewBox; the templates only
//! draw what the view models already positioned.

use askama::Template;
use chrono::NaiveDateTime;

use crate::domain::DisplayZone;
use crate::history::{DelayPoint, HourlyAverage};
use crate::planner::JourneyPlan;

use super::error::RenderError;

/// viewBox width
pub const WIDTH: f64 = 640.0;
/// viewBox height
pub const HEIGHT: f64 = 280.0;

const LEFT: f64 = 56.0;
const RIGHT: f64 = 16.0;
const TOP: f64 = 32.0;
const BOTTOM: f64 = 48.0;
const PLOT_W: f64 = WIDTH - LEFT - RIGHT;
const PLOT_H: f64 = HEIGHT - TOP - BOTTOM;

/// Most x-axis labels drawn before labels are thinned.
const MAX_X_LABELS: usize = 8;
const Y_TICK_COUNT: usize = 4;

/// An axis tick: position along the axis and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub pos: f64,
    /// Position of the label text along the same axis
    pub label_pos: f64,
    pub label: String,
}

/// A highlighted x position with a caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub caption: String,
}

/// A plotted point.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub value: f64,
}

/// A line chart with an optional highlighted point.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: &'static str,
    pub points: Vec<ChartPoint>,
    /// SVG path data through all points
    pub path: String,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub marker: Option<Marker>,
}

/// One bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value: f64,
}

/// A bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<ChartBar>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

/// Fixed layout of the plot area, shared by both chart templates.
struct Frame {
    width: f64,
    height: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    mid_x: f64,
    mid_y: f64,
    y_tick_x: f64,
    x_tick_y: f64,
    x_label_y: f64,
    marker_label_y: f64,
}

impl Frame {
    const fn new() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            left: LEFT,
            right: LEFT + PLOT_W,
            top: TOP,
            bottom: TOP + PLOT_H,
            mid_x: LEFT + PLOT_W / 2.0,
            mid_y: TOP + PLOT_H / 2.0,
            y_tick_x: LEFT - 6.0,
            x_tick_y: TOP + PLOT_H + 16.0,
            x_label_y: HEIGHT - 6.0,
            marker_label_y: TOP + 12.0,
        }
    }
}

#[derive(Template)]
#[template(path = "chart_line.html")]
struct LineChartTemplate<'a> {
    chart: &'a LineChart,
    frame: Frame,
}

#[derive(Template)]
#[template(path = "chart_bar.html")]
struct BarChartTemplate<'a> {
    chart: &'a BarChart,
    frame: Frame,
}

/// Round `max` up to a multiple of five, never below five.
fn nice_max(max: f64) -> f64 {
    ((max / 5.0).ceil() * 5.0).max(5.0)
}

fn y_at(value: f64, max: f64) -> f64 {
    TOP + PLOT_H * (1.0 - value / max)
}

/// Evenly spaced x positions for `n` categories.
fn x_at(i: usize, n: usize) -> f64 {
    if n <= 1 {
        LEFT + PLOT_W / 2.0
    } else {
        LEFT + PLOT_W * i as f64 / (n - 1) as f64
    }
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

fn y_ticks(max: f64) -> Vec<Tick> {
    (0..=Y_TICK_COUNT)
        .map(|k| {
            let v = max * k as f64 / Y_TICK_COUNT as f64;
            let pos = y_at(v, max);
            Tick {
                pos,
                label_pos: pos + 4.0,
                label: format_value(v),
            }
        })
        .collect()
}

/// Labels for at most `MAX_X_LABELS` of the points, always the first and last.
fn thinned_x_ticks(points: &[ChartPoint]) -> Vec<Tick> {
    let n = points.len();
    let step = n.div_ceil(MAX_X_LABELS).max(1);
    points
        .iter()
        .enumerate()
        .filter(|(i, _)| i % step == 0 || *i == n - 1)
        .map(|(_, p)| Tick {
            pos: p.x,
            label_pos: p.x,
            label: p.label.clone(),
        })
        .collect()
}

fn path_through(points: &[ChartPoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!("{cmd}{:.1},{:.1}", p.x, p.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Primary travel time against departure time, best departure marked.
///
/// Only meaningful for a scanned window; a "now" plan has no chart.
pub fn travel_time_chart(plan: &JourneyPlan, zone: &DisplayZone) -> Option<LineChart> {
    if !plan.scanned {
        return None;
    }
    let options = plan.options();
    let max = nice_max(
        options
            .iter()
            .map(|o| f64::from(o.primary().summary.travel_time_mins()))
            .fold(0.0, f64::max),
    );

    let points: Vec<ChartPoint> = options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let value = f64::from(option.primary().summary.travel_time_mins());
            ChartPoint {
                x: x_at(i, options.len()),
                y: y_at(value, max),
                label: zone.clock_12h(option.depart_at()),
                value,
            }
        })
        .collect();

    let marker = points.get(plan.best_index()).map(|p| Marker {
        x: p.x,
        caption: "Overall Best Departure".to_string(),
    });
    let abbreviation = zone.abbreviation(plan.best().depart_at());

    Some(LineChart {
        title: "Primary Route Travel Time vs Departure Time".to_string(),
        x_label: format!("Departure Time ({abbreviation})"),
        y_label: "Travel Time (min)".to_string(),
        color: "#6a0dad",
        path: path_through(&points),
        x_ticks: thinned_x_ticks(&points),
        y_ticks: y_ticks(max),
        points,
        marker,
    })
}

/// Mean travel time per hour of day, on a 24-slot axis.
pub fn hourly_chart(averages: &[HourlyAverage]) -> Option<BarChart> {
    if averages.is_empty() {
        return None;
    }
    let max = nice_max(averages.iter().map(|a| a.average_travel_min).fold(0.0, f64::max));
    let slot = PLOT_W / 24.0;

    let bars = averages
        .iter()
        .map(|a| {
            let y = y_at(a.average_travel_min, max);
            ChartBar {
                x: LEFT + slot * f64::from(a.hour) + slot * 0.1,
                y,
                width: slot * 0.8,
                height: TOP + PLOT_H - y,
                label: format!("{:02}:00", a.hour),
                value: (a.average_travel_min * 10.0).round() / 10.0,
            }
        })
        .collect();

    let x_ticks = (0..24)
        .step_by(3)
        .map(|h| {
            let pos = LEFT + slot * (f64::from(h) + 0.5);
            Tick {
                pos,
                label_pos: pos,
                label: h.to_string(),
            }
        })
        .collect();

    Some(BarChart {
        title: "Average Travel Time by Hour for this Route".to_string(),
        x_label: "Hour of Day (24h)".to_string(),
        y_label: "Average Travel Time (min)".to_string(),
        bars,
        x_ticks,
        y_ticks: y_ticks(max),
    })
}

/// Observed traffic delay over save time, x proportional to time.
pub fn delay_chart(trend: &[DelayPoint]) -> Option<LineChart> {
    let (first, last) = (trend.first()?, trend.last()?);
    let span = (last.saved_at - first.saved_at).num_seconds() as f64;
    let max = nice_max(
        trend
            .iter()
            .map(|p| f64::from(p.traffic_delay_min))
            .fold(0.0, f64::max),
    );
    let x_of = |t: NaiveDateTime| {
        if span <= 0.0 {
            LEFT + PLOT_W / 2.0
        } else {
            LEFT + PLOT_W * (t - first.saved_at).num_seconds() as f64 / span
        }
    };

    let points: Vec<ChartPoint> = trend
        .iter()
        .map(|p| {
            let value = f64::from(p.traffic_delay_min);
            ChartPoint {
                x: x_of(p.saved_at),
                y: y_at(value, max),
                label: p.saved_at.format("%m-%d %H:%M").to_string(),
                value,
            }
        })
        .collect();

    Some(LineChart {
        title: "Historical Traffic Delay (mins) for this Route".to_string(),
        x_label: "Date & Time".to_string(),
        y_label: "Traffic Delay (min)".to_string(),
        color: "#ff69b4",
        path: path_through(&points),
        x_ticks: thinned_x_ticks(&points),
        y_ticks: y_ticks(max),
        points,
        marker: None,
    })
}

pub fn render_line_chart(chart: &LineChart) -> Result<String, RenderError> {
    let template = LineChartTemplate {
        chart,
        frame: Frame::new(),
    };
    Ok(template.render()?)
}

pub fn render_bar_chart(chart: &BarChart) -> Result<String, RenderError> {
    let template = BarChartTemplate {
        chart,
        frame: Frame::new(),
    };
    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn nice_max_rounds_up_to_fives() {
        assert_eq!(nice_max(0.0), 5.0);
        assert_eq!(nice_max(41.0), 45.0);
        assert_eq!(nice_max(45.0), 45.0);
    }

    #[test]
    fn points_stay_inside_plot_area() {
        let trend = vec![
            DelayPoint { saved_at: at(1, 8), traffic_delay_min: 0 },
            DelayPoint { saved_at: at(2, 8), traffic_delay_min: 14 },
            DelayPoint { saved_at: at(4, 8), traffic_delay_min: 6 },
        ];

        let chart = delay_chart(&trend).unwrap();

        for p in &chart.points {
            assert!((LEFT..=LEFT + PLOT_W).contains(&p.x));
            assert!((TOP..=TOP + PLOT_H).contains(&p.y));
        }
        // x proportional to time: day 2 is a third of the way along
        assert!((chart.points[1].x - (LEFT + PLOT_W / 3.0)).abs() < 1e-9);
        assert_eq!(chart.points[0].y, TOP + PLOT_H);
        assert!(chart.path.starts_with('M'));
        assert_eq!(chart.path.matches('L').count(), 2);
    }

    #[test]
    fn single_point_is_centred() {
        let trend = vec![DelayPoint { saved_at: at(1, 8), traffic_delay_min: 3 }];
        let chart = delay_chart(&trend).unwrap();
        assert_eq!(chart.points[0].x, LEFT + PLOT_W / 2.0);
    }

    #[test]
    fn empty_inputs_have_no_chart() {
        assert!(delay_chart(&[]).is_none());
        assert!(hourly_chart(&[]).is_none());
    }

    #[test]
    fn bars_sit_in_their_hour_slot() {
        let averages = vec![
            HourlyAverage { hour: 0, average_travel_min: 20.0, samples: 1 },
            HourlyAverage { hour: 18, average_travel_min: 52.5, samples: 2 },
        ];

        let chart = hourly_chart(&averages).unwrap();

        let slot = PLOT_W / 24.0;
        assert!(chart.bars[0].x >= LEFT && chart.bars[0].x + chart.bars[0].width <= LEFT + slot);
        assert!(chart.bars[1].x >= LEFT + 18.0 * slot);
        // 52.5 rounds the axis up to 55
        assert!(chart.bars[1].height > chart.bars[0].height);
        assert_eq!(chart.y_ticks.last().unwrap().label, "55");
        assert_eq!(chart.bars[1].label, "18:00");
    }

    #[test]
    fn x_labels_are_thinned() {
        let trend: Vec<DelayPoint> = (0..20)
            .map(|h| DelayPoint { saved_at: at(1, 0) + chrono::Duration::hours(h), traffic_delay_min: 1 })
            .collect();

        let chart = delay_chart(&trend).unwrap();

        assert!(chart.x_ticks.len() <= MAX_X_LABELS + 1);
        assert_eq!(chart.x_ticks.first().unwrap().label, "10-01 00:00");
        assert_eq!(chart.x_ticks.last().unwrap().label, "10-01 19:00");
    }

    #[test]
    fn rendered_svg_escapes_labels() {
        let mut chart = delay_chart(&[DelayPoint { saved_at: at(1, 8), traffic_delay_min: 3 }]).unwrap();
        chart.title = "<script>".to_string();

        let svg = render_line_chart(&chart).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }
}
