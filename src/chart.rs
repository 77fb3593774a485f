//! Rasterizes the report charts as PNG files with `plotters`.
//!
//! Figure sizes are given in inches and font sizes in points, then scaled by
//! the configured dpi, so the same figure can be produced as a draft
//! (low dpi) or for print (300 dpi).

use detection::DetectionCounts;
use errors::*;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontDesc, FontStyle, TextStyle};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use samples::{self, Sample};
use scalability::Scalability;
use setting::Setting;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const FONT_FAMILY: &str = "sans-serif";

/// Font file currently registered with `plotters`, shared by every chart.
static REGISTERED_FONT: Mutex<Option<PathBuf>> = Mutex::new(None);

// matplotlib palette
const BLUE: RGBColor = RGBColor(31, 119, 180);
const ORANGE: RGBColor = RGBColor(255, 127, 14);
const GREEN: RGBColor = RGBColor(44, 160, 44);
const BRICK: RGBColor = RGBColor(214, 39, 40);
const NAMED_ORANGE: RGBColor = RGBColor(255, 165, 0);
const NAMED_GREEN: RGBColor = RGBColor(0, 128, 0);

/// Sequential color map from white to dark blue.
const BLUES: [(u8, u8, u8); 9] = [
    (247, 251, 255),
    (222, 235, 247),
    (198, 219, 239),
    (158, 202, 225),
    (107, 174, 214),
    (66, 146, 198),
    (33, 113, 181),
    (8, 81, 156),
    (8, 48, 107),
];

/// Maps `t` in [0, 1] onto the blue color map.
pub fn blues(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.max(0.0).min(1.0) };
    let pos = t * (BLUES.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = ::std::cmp::min(lo + 1, BLUES.len() - 1);
    let frac = pos - lo as f64;
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(
        mix(BLUES[lo].0, BLUES[hi].0),
        mix(BLUES[lo].1, BLUES[hi].1),
        mix(BLUES[lo].2, BLUES[hi].2),
    )
}

/// Extends `[min, max]` by 5% on each side; a degenerate range gets a unit
/// width. Non-finite bounds give `0..1`.
pub fn padded_range(min: f64, max: f64) -> ::std::ops::Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        let half = if min.abs() > 0.0 { min.abs() * 0.05 } else { 0.5 };
        return (min - half)..(max + half);
    }
    (min - span * 0.05)..(max + span * 0.05)
}

/// Splits the straight line `from -> to` into `count` dashes separated by
/// gaps of the same length.
pub fn dashes(from: (f64, f64), to: (f64, f64), count: usize) -> Vec<Vec<(f64, f64)>> {
    let pieces = count * 2 - 1;
    let at = |k: usize| {
        let t = k as f64 / pieces as f64;
        (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
    };
    (0..count).map(|i| vec![at(2 * i), at(2 * i + 1)]).collect()
}

fn min_max<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((::std::f64::INFINITY, ::std::f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

#[derive(Clone, Copy, PartialEq)]
enum Marker {
    None,
    Circle,
    Square,
}

struct Line<'a> {
    points: Vec<(f64, f64)>,
    color: RGBColor,
    marker: Marker,
    dashed: bool,
    label: Option<&'a str>,
}

impl<'a> Line<'a> {
    fn solid(points: Vec<(f64, f64)>, color: RGBColor, marker: Marker) -> Self {
        Line {
            points: points,
            color: color,
            marker: marker,
            dashed: false,
            label: None,
        }
    }
}

struct LinePanel<'a> {
    title: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
    lines: Vec<Line<'a>>,
    /// Horizontal reference line across the whole panel.
    hline: Option<(f64, RGBColor, &'a str)>,
}

struct Bar {
    name: &'static str,
    value: f64,
    color: RGBColor,
    label: String,
}

struct BarPanel<'a> {
    title: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
    bars: Vec<Bar>,
    y_max: f64,
    hline: Option<f64>,
}

/// Draws every chart of the report.
pub struct Charts {
    dpi: u32,
    font: Option<PathBuf>,
}

impl Charts {
    /// Creates a new `Charts` from the report setting. The font is located now
    /// but only loaded when the first chart is drawn.
    pub fn new(setting: &Setting) -> Charts {
        let font = setting.locate_font();
        match font {
            Some(ref path) => debug!("chart font {:?}", path),
            None => warn!("no font found, charts cannot be drawn"),
        }
        Charts {
            dpi: ::std::cmp::max(setting.dpi, 1),
            font: font,
        }
    }

    /// Converts points (1/72 inch) to pixels.
    fn px(&self, pt: f64) -> u32 {
        ::std::cmp::max((pt * self.dpi as f64 / 72.0).round() as u32, 1)
    }

    fn font(&self, pt: f64) -> FontDesc<'static> {
        (FONT_FAMILY, self.px(pt) as f64).into_font()
    }

    fn bold(&self, pt: f64) -> FontDesc<'static> {
        self.font(pt).style(FontStyle::Bold)
    }

    fn ensure_font(&self) -> Result<()> {
        let path = match self.font {
            Some(ref path) => path,
            None => bail!(ErrorKind::MissingFont),
        };
        let mut current = REGISTERED_FONT.lock().unwrap_or_else(|e| e.into_inner());
        if current.as_ref() == Some(path) {
            return Ok(());
        }

        let bytes = fs::read(path).chain_err(|| ErrorKind::MissingFont)?;
        // plotters keeps font data for the whole process
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        for style in vec![FontStyle::Normal, FontStyle::Bold] {
            register_font(FONT_FAMILY, style, bytes)
                .map_err(|_| Error::from_kind(ErrorKind::MissingFont))?;
        }
        *current = Some(path.clone());
        info!("registered font {:?}", path);
        Ok(())
    }

    /// Sets up a white PNG canvas of `inches`, hands it to `draw` and writes
    /// the file.
    fn canvas<F>(&self, path: &Path, inches: (f64, f64), draw: F) -> Result<()>
    where
        F: FnOnce(&DrawingArea<BitMapBackend, Shift>) -> Result<()>,
    {
        self.ensure_font()?;
        let size = (
            (inches.0 * self.dpi as f64).round() as u32,
            (inches.1 * self.dpi as f64).round() as u32,
        );
        trace!("drawing {:?} at {}x{}", path, size.0, size.1);
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        draw(&root)?;
        root.present().map_err(render_err)?;
        Ok(())
    }

    fn line_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        panel: &LinePanel,
    ) -> Result<()> {
        let (x_lo, x_hi) = min_max(panel.lines.iter().flat_map(|l| l.points.iter().map(|p| p.0)));
        let (mut y_lo, mut y_hi) =
            min_max(panel.lines.iter().flat_map(|l| l.points.iter().map(|p| p.1)));
        if let Some((y, _, _)) = panel.hline {
            y_lo = y_lo.min(y);
            y_hi = y_hi.max(y);
        }
        let x_range = padded_range(x_lo, x_hi);
        let y_range = padded_range(y_lo, y_hi);

        let mut chart = ChartBuilder::on(area)
            .caption(panel.title, self.bold(14.0))
            .margin(self.px(8.0))
            .x_label_area_size(self.px(40.0))
            .y_label_area_size(self.px(64.0))
            .build_cartesian_2d(x_range.clone(), y_range)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(panel.x_desc)
            .y_desc(panel.y_desc)
            .axis_desc_style(self.font(12.0))
            .label_style(self.font(10.0))
            .light_line_style(WHITE)
            .bold_line_style(BLACK.mix(0.1))
            .draw()
            .map_err(render_err)?;

        let stroke = self.px(2.0);
        let legend_len = self.px(20.0) as i32;
        let mut has_legend = false;
        for line in &panel.lines {
            let style = if line.dashed {
                line.color.mix(0.5).stroke_width(stroke)
            } else {
                line.color.stroke_width(stroke)
            };
            let anno = if line.dashed {
                let first = line.points.first().cloned().unwrap_or((0.0, 0.0));
                let last = line.points.last().cloned().unwrap_or(first);
                chart
                    .draw_series(
                        dashes(first, last, 24)
                            .into_iter()
                            .map(|seg| PathElement::new(seg, style)),
                    )
                    .map_err(render_err)?
            } else {
                chart
                    .draw_series(LineSeries::new(line.points.clone(), style))
                    .map_err(render_err)?
            };
            if let Some(label) = line.label {
                has_legend = true;
                anno.label(label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + legend_len, y)], style)
                });
            }

            let radius = self.px(4.0);
            match line.marker {
                Marker::None => {}
                Marker::Circle => {
                    chart
                        .draw_series(
                            line.points
                                .iter()
                                .map(|&p| Circle::new(p, radius, line.color.filled())),
                        )
                        .map_err(render_err)?;
                }
                Marker::Square => {
                    let r = radius as i32;
                    chart
                        .draw_series(line.points.iter().map(|&p| {
                            EmptyElement::at(p) +
                                Rectangle::new([(-r, -r), (r, r)], line.color.filled())
                        }))
                        .map_err(render_err)?;
                }
            }
        }

        if let Some((y, color, label)) = panel.hline {
            let style = color.mix(0.5).stroke_width(stroke);
            has_legend = true;
            chart
                .draw_series(
                    dashes((x_range.start, y), (x_range.end, y), 40)
                        .into_iter()
                        .map(|seg| PathElement::new(seg, style)),
                )
                .map_err(render_err)?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], style));
        }

        if has_legend {
            chart
                .configure_series_labels()
                .label_font(self.font(10.0))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .position(SeriesLabelPosition::UpperLeft)
                .draw()
                .map_err(render_err)?;
        }
        Ok(())
    }

    fn bar_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        panel: &BarPanel,
    ) -> Result<()> {
        let n = panel.bars.len() as f64;
        let mut chart = ChartBuilder::on(area)
            .caption(panel.title, self.bold(14.0))
            .margin(self.px(8.0))
            .x_label_area_size(self.px(44.0))
            .y_label_area_size(self.px(56.0))
            .build_cartesian_2d(-0.6..(n - 0.4), 0.0..panel.y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .x_desc(panel.x_desc)
            .y_desc(panel.y_desc)
            .axis_desc_style(self.font(12.0))
            .label_style(self.font(10.0))
            .light_line_style(WHITE)
            .bold_line_style(BLACK.mix(0.1))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(panel.bars.iter().enumerate().map(|(i, bar)| {
                let x = i as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, bar.value)], bar.color.mix(0.8).filled())
            }))
            .map_err(render_err)?;

        if let Some(y) = panel.hline {
            let style = BLACK.mix(0.3).stroke_width(self.px(1.0));
            chart
                .draw_series(
                    dashes((-0.6, y), (n - 0.4, y), 40)
                        .into_iter()
                        .map(|seg| PathElement::new(seg, style)),
                )
                .map_err(render_err)?;
        }

        let above = TextStyle::from(self.font(10.0)).pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(panel.bars.iter().enumerate().map(|(i, bar)| {
                Text::new(bar.label.clone(), (i as f64, bar.value), above.clone())
            }))
            .map_err(render_err)?;

        // category names under the axis, in area-relative pixels
        let below = TextStyle::from(self.font(10.0)).pos(Pos::new(HPos::Center, VPos::Top));
        let base = area.get_base_pixel();
        let gap = self.px(4.0) as i32;
        for (i, bar) in panel.bars.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(i as f64, 0.0));
            area.draw(&Text::new(bar.name, (x - base.0, y - base.1 + gap), below.clone()))
                .map_err(render_err)?;
        }
        Ok(())
    }

    /// Throughput against worker count.
    pub fn throughput(&self, data: &Scalability, path: &Path) -> Result<()> {
        let panel = LinePanel {
            title: "Scalability: Throughput vs Workers",
            x_desc: "Number of Workers",
            y_desc: "Throughput (packets/second)",
            lines: vec![
                Line::solid(data.series(|r| r.throughput_pps), BLUE, Marker::Circle),
            ],
            hline: None,
        };
        self.canvas(path, (10.0, 6.0), |root| self.line_panel(root, &panel))
    }

    /// Speedup next to its linear ideal, and efficiency next to 100%.
    pub fn speedup_efficiency(&self, data: &Scalability, path: &Path) -> Result<()> {
        let workers = data.workers();
        let mut ideal = workers.iter().map(|&w| (w, w)).collect::<Vec<_>>();
        ideal.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(::std::cmp::Ordering::Equal));

        let mut actual = Line::solid(
            workers.iter().cloned().zip(data.speedup().iter().cloned()).collect(),
            BLUE,
            Marker::Circle,
        );
        actual.label = Some("Actual Speedup");
        let speedup = LinePanel {
            title: "Parallel Speedup",
            x_desc: "Number of Workers",
            y_desc: "Speedup",
            lines: vec![
                actual,
                Line {
                    points: ideal,
                    color: ORANGE,
                    marker: Marker::None,
                    dashed: true,
                    label: Some("Linear Speedup (Ideal)"),
                },
            ],
            hline: None,
        };

        let efficiency = LinePanel {
            title: "Parallel Efficiency",
            x_desc: "Number of Workers",
            y_desc: "Parallel Efficiency (%)",
            lines: vec![
                Line::solid(
                    workers
                        .iter()
                        .cloned()
                        .zip(data.efficiency().iter().map(|e| e * 100.0))
                        .collect(),
                    NAMED_ORANGE,
                    Marker::Square,
                ),
            ],
            hline: Some((100.0, RED, "100% Efficiency")),
        };

        self.canvas(path, (14.0, 6.0), |root| {
            let panels = root.split_evenly((1, 2));
            self.line_panel(&panels[0], &speedup)?;
            self.line_panel(&panels[1], &efficiency)
        })
    }

    /// Average latency against worker count.
    pub fn latency(&self, data: &Scalability, path: &Path) -> Result<()> {
        let panel = LinePanel {
            title: "Latency vs Workers",
            x_desc: "Number of Workers",
            y_desc: "Average Latency (ms)",
            lines: vec![
                Line::solid(data.series(|r| r.latency_ms), NAMED_GREEN, Marker::Circle),
            ],
            hline: None,
        };
        self.canvas(path, (10.0, 6.0), |root| self.line_panel(root, &panel))
    }

    /// MPI communication overhead against worker count.
    pub fn mpi_overhead(&self, data: &Scalability, path: &Path) -> Result<()> {
        let panel = LinePanel {
            title: "MPI Communication Overhead vs Workers",
            x_desc: "Number of Workers",
            y_desc: "MPI Overhead (ms)",
            lines: vec![
                Line::solid(data.series(|r| r.mpi_overhead_ms), RED, Marker::Circle),
            ],
            hline: None,
        };
        self.canvas(path, (10.0, 6.0), |root| self.line_panel(root, &panel))
    }

    /// 2x2 heat map of the detection counts with a color bar.
    pub fn confusion_matrix(&self, counts: &DetectionCounts, path: &Path) -> Result<()> {
        info!(
            "precision {:.4}, recall {:.4}, f1 {:.4}, fpr {:.4}, accuracy {:.4}",
            counts.precision(),
            counts.recall(),
            counts.f1(),
            counts.false_positive_rate(),
            counts.accuracy()
        );
        let matrix = counts.matrix();
        let (lo, hi) = min_max(matrix.iter().flat_map(|r| r.iter()).map(|&v| v as f64));
        let hi = if hi > lo { hi } else { lo + 1.0 };
        let intensity = |v: u64| (v as f64 - lo) / (hi - lo);

        self.canvas(path, (8.0, 6.0), |root| {
            let (width, _) = root.dim_in_pixel();
            let (main, side) = root.split_horizontally((width as f64 * 0.82) as u32);

            let mut chart = ChartBuilder::on(&main)
                .caption("Confusion Matrix", self.bold(14.0))
                .margin(self.px(8.0))
                .x_label_area_size(self.px(44.0))
                .y_label_area_size(self.px(100.0))
                .build_cartesian_2d(0.0..2.0, 0.0..2.0)
                .map_err(render_err)?;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_label_formatter(&|_| String::new())
                .y_label_formatter(&|_| String::new())
                .x_desc("Predicted")
                .y_desc("Actual")
                .axis_desc_style(self.font(12.0))
                .label_style(self.font(10.0))
                .draw()
                .map_err(render_err)?;

            // row 0 (actual benign) is drawn on top
            let cells = matrix
                .iter()
                .enumerate()
                .flat_map(|(row, values)| {
                    values
                        .iter()
                        .enumerate()
                        .map(move |(col, &v)| (col as f64, (1 - row) as f64, v))
                })
                .collect::<Vec<(f64, f64, u64)>>();
            chart
                .draw_series(cells.iter().map(|&(x, y, v)| {
                    Rectangle::new([(x, y), (x + 1.0, y + 1.0)], blues(intensity(v)).filled())
                }))
                .map_err(render_err)?;
            chart
                .draw_series(cells.iter().map(|&(x, y, v)| {
                    let color = if intensity(v) > 0.5 { &WHITE } else { &BLACK };
                    let style = self.font(12.0)
                        .color(color)
                        .pos(Pos::new(HPos::Center, VPos::Center));
                    Text::new(v.to_string(), (x + 0.5, y + 0.5), style)
                }))
                .map_err(render_err)?;

            let base = main.get_base_pixel();
            let gap = self.px(4.0) as i32;
            let below = TextStyle::from(self.font(10.0)).pos(Pos::new(HPos::Center, VPos::Top));
            for &(x, name) in [(0.5, "Predicted Benign"), (1.5, "Predicted Attack")].iter() {
                let (px, py) = chart.backend_coord(&(x, 0.0));
                main.draw(&Text::new(name, (px - base.0, py - base.1 + gap), below.clone()))
                    .map_err(render_err)?;
            }
            let left = TextStyle::from(self.font(10.0)).pos(Pos::new(HPos::Right, VPos::Center));
            for &(y, name) in [(1.5, "Actual Benign"), (0.5, "Actual Attack")].iter() {
                let (px, py) = chart.backend_coord(&(0.0, y));
                main.draw(&Text::new(name, (px - base.0 - gap, py - base.1), left.clone()))
                    .map_err(render_err)?;
            }

            let mut bar = ChartBuilder::on(&side)
                .margin(self.px(8.0))
                .margin_top(self.px(30.0))
                .x_label_area_size(self.px(44.0))
                .right_y_label_area_size(self.px(48.0))
                .build_cartesian_2d(0.0..1.0, lo..hi)
                .map_err(render_err)?;
            bar.configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .disable_x_axis()
                .label_style(self.font(9.0))
                .y_label_formatter(&|v| format!("{:.0}", v))
                .draw()
                .map_err(render_err)?;
            let steps = 64;
            let step = (hi - lo) / steps as f64;
            bar.draw_series((0..steps).map(|k| {
                let y = lo + k as f64 * step;
                let color = blues(k as f64 / (steps - 1) as f64);
                Rectangle::new([(0.0, y), (1.0, y + step)], color.filled())
            })).map_err(render_err)?;
            Ok(())
        })
    }

    /// Precision, recall, F1 and accuracy as bars.
    pub fn detection_metrics(&self, path: &Path) -> Result<()> {
        let colors = [BLUE, ORANGE, GREEN, BRICK];
        let panel = BarPanel {
            title: "Detection Accuracy Metrics",
            x_desc: "Metric",
            y_desc: "Score",
            bars: bars(&samples::ACCURACY_SCORES, &colors, samples::score_label),
            y_max: 1.1,
            hline: Some(1.0),
        };
        self.canvas(path, (10.0, 6.0), |root| self.bar_panel(root, &panel))
    }

    /// Average, P95 and P99 latency as bars.
    pub fn latency_distribution(&self, path: &Path) -> Result<()> {
        let colors = [GREEN, ORANGE, BRICK];
        let bars = bars(&samples::LATENCY_PERCENTILES, &colors, samples::latency_label);
        let (_, max) = min_max(bars.iter().map(|b| b.value));
        let panel = BarPanel {
            title: "Latency Distribution",
            x_desc: "Latency Type",
            y_desc: "Latency (ms)",
            bars: bars,
            y_max: headroom(max),
            hline: None,
        };
        self.canvas(path, (10.0, 6.0), |root| self.bar_panel(root, &panel))
    }

    /// One single-bar panel per resource.
    pub fn resource_utilization(&self, path: &Path) -> Result<()> {
        let colors = [BLUE, ORANGE, GREEN];
        self.canvas(path, (15.0, 5.0), |root| {
            let areas = root.split_evenly((1, samples::RESOURCES.len()));
            for ((area, sample), &color) in areas
                .iter()
                .zip(samples::RESOURCES.iter())
                .zip(colors.iter())
            {
                let panel = BarPanel {
                    title: sample.name,
                    x_desc: "",
                    y_desc: sample.unit(),
                    bars: vec![
                        Bar {
                            name: sample.short_name(),
                            value: sample.value,
                            color: color,
                            label: samples::resource_label(sample.value),
                        },
                    ],
                    y_max: headroom(sample.value),
                    hline: None,
                };
                self.bar_panel(area, &panel)?;
            }
            Ok(())
        })
    }
}

fn headroom(max: f64) -> f64 {
    if max > 0.0 { max * 1.15 } else { 1.0 }
}

fn bars(samples: &[Sample], colors: &[RGBColor], label: fn(f64) -> String) -> Vec<Bar> {
    samples
        .iter()
        .zip(colors.iter())
        .map(|(s, &c)| {
            Bar {
                name: s.name,
                value: s.value,
                color: c,
                label: label(s.value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate tempfile;

    use super::*;

    #[test]
    fn blues_endpoints() {
        assert_eq!(blues(0.0), RGBColor(247, 251, 255));
        assert_eq!(blues(1.0), RGBColor(8, 48, 107));
        assert_eq!(blues(-3.0), blues(0.0));
        assert_eq!(blues(7.0), blues(1.0));
        assert_eq!(blues(0.5), RGBColor(107, 174, 214));
    }

    #[test]
    fn blues_darkens_monotonically() {
        let mut last = 255 * 3;
        for k in 0..=20 {
            let c = blues(k as f64 / 20.0);
            let sum = c.0 as u32 + c.1 as u32 + c.2 as u32;
            assert!(sum <= last);
            last = sum;
        }
    }

    #[test]
    fn padded_range_handles_degenerate_input() {
        let r = padded_range(1.0, 8.0);
        assert!((r.start - 0.65).abs() < 1e-9);
        assert!((r.end - 8.35).abs() < 1e-9);

        let r = padded_range(4.0, 4.0);
        assert!(r.start < 4.0 && r.end > 4.0);

        let r = padded_range(0.0, 0.0);
        assert_eq!(r, -0.5..0.5);
    }

    #[test]
    fn padded_range_is_always_finite() {
        let inf = ::std::f64::INFINITY;
        assert_eq!(padded_range(1.0, inf), 0.0..1.0);
        assert_eq!(padded_range(-inf, 2.0), 0.0..1.0);
        assert_eq!(padded_range(::std::f64::NAN, 2.0), 0.0..1.0);
        // an empty panel folds to (inf, -inf)
        assert_eq!(padded_range(inf, -inf), 0.0..1.0);

        let r = padded_range(-1e308, 1e308);
        assert!(r.start.is_finite() && r.end.is_finite());
    }

    #[test]
    fn dashes_alternate() {
        let d = dashes((0.0, 0.0), (3.0, 3.0), 2);
        assert_eq!(d, vec![vec![(0.0, 0.0), (1.0, 1.0)], vec![(2.0, 2.0), (3.0, 3.0)]]);
    }

    #[test]
    fn bars_carry_labels() {
        let b = bars(
            &samples::ACCURACY_SCORES,
            &[BLUE, ORANGE, GREEN, BRICK],
            samples::score_label,
        );
        assert_eq!(b.len(), 4);
        assert_eq!(b[1].label, "1.0000");
        assert_eq!(b[3].name, "Accuracy");
    }

    #[test]
    fn missing_font_fails_the_chart() {
        let tmp = tempfile::tempdir().unwrap();
        let mut setting = Setting::default();
        setting.font_path = Some(tmp.path().join("missing.ttf"));
        let charts = Charts::new(&setting);
        let path = tmp.path().join("detection_metrics.png");
        match charts.detection_metrics(&path) {
            Err(Error(ErrorKind::MissingFont, _)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn draws_sample_charts_when_a_font_exists() {
        let setting = Setting {
            dpi: 30,
            ..Setting::default()
        };
        if setting.locate_font().is_none() {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        let charts = Charts::new(&setting);
        let counts = DetectionCounts::default();

        charts.confusion_matrix(&counts, &tmp.path().join("cm.png")).unwrap();
        charts.detection_metrics(&tmp.path().join("dm.png")).unwrap();
        charts.latency_distribution(&tmp.path().join("ld.png")).unwrap();
        charts.resource_utilization(&tmp.path().join("ru.png")).unwrap();
        for name in &["cm.png", "dm.png", "ld.png", "ru.png"] {
            let meta = fs::metadata(tmp.path().join(name)).unwrap();
            assert!(meta.len() > 0);
        }
    }

    #[test]
    fn draws_scalability_charts_when_a_font_exists() {
        let setting = Setting {
            dpi: 30,
            ..Setting::default()
        };
        if setting.locate_font().is_none() {
            return;
        }
        let csv = "Workers,Throughput_pps,Latency_ms,MPI_Overhead_ms\n1,100,0.5,1\n2,190,0.6,2\n";
        let data = Scalability::from_reader(csv.as_bytes()).unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let charts = Charts::new(&setting);

        charts.throughput(&data, &tmp.path().join("t.png")).unwrap();
        charts.speedup_efficiency(&data, &tmp.path().join("s.png")).unwrap();
        charts.latency(&data, &tmp.path().join("l.png")).unwrap();
        charts.mpi_overhead(&data, &tmp.path().join("m.png")).unwrap();
        for name in &["t.png", "s.png", "l.png", "m.png"] {
            assert!(tmp.path().join(name).is_file());
        }
    }
}
