use crate::{colormap::ColorScale, curve::IsoCurve, Scale, SamplingField};

#[cfg(feature = "plot")]
use plotters::{
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
#[cfg(feature = "plot")]
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FigureError {
    #[error("failed to draw the figure: {0}")]
    Drawing(String),
}
#[cfg(feature = "plot")]
impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for FigureError {
    fn from(value: DrawingAreaErrorKind<E>) -> Self {
        FigureError::Drawing(value.to_string())
    }
}
#[cfg(feature = "plot")]
type Result<T> = std::result::Result<T, FigureError>;

/// Default canvas size in pixels
pub const CANVAS_SIZE: (u32, u32) = (800, 900);

/// One raster cell in display coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub value: f64,
}

/// Rendered sampling field
///
/// A figure owns everything needed to draw the field, its color bar and the iso-sampling
/// overlays. Nothing is drawn until [Figure::draw] or [Figure::save] is called.
#[derive(Debug, Clone)]
pub struct Figure {
    pub(crate) field: SamplingField,
    pub(crate) x_scale: Scale,
    pub(crate) y_scale: Scale,
    pub(crate) color_scale: ColorScale,
    pub(crate) curves: Vec<IsoCurve>,
    pub(crate) title: [String; 2],
    pub(crate) x_label: String,
    pub(crate) y_label: String,
    pub(crate) size: (u32, u32),
}
impl Figure {
    /// Sets the canvas size in pixels
    pub fn size(self, size: (u32, u32)) -> Self {
        Self { size, ..self }
    }
    pub fn field(&self) -> &SamplingField {
        &self.field
    }
    pub fn curves(&self) -> &[IsoCurve] {
        &self.curves
    }
    pub fn color_scale(&self) -> &ColorScale {
        &self.color_scale
    }
    /// (x,y) axis scales
    pub fn scales(&self) -> (Scale, Scale) {
        (self.x_scale, self.y_scale)
    }
    /// Title, one entry per line
    pub fn title(&self) -> &[String] {
        &self.title
    }
    pub fn x_label(&self) -> &str {
        &self.x_label
    }
    pub fn y_label(&self) -> &str {
        &self.y_label
    }
    /// Display coordinates range (x,y) covered by the raster
    pub fn extent(&self) -> ((f64, f64), (f64, f64)) {
        let x = self.field.magnification().cell_edges(self.x_scale);
        let y = self.field.numerical_aperture().cell_edges(self.y_scale);
        ((x[0], x[x.len() - 1]), (y[0], y[y.len() - 1]))
    }
    /// Raster cells, row by row along the numerical aperture axis
    pub fn cells(&self) -> Vec<Cell> {
        let x = self.field.magnification().cell_edges(self.x_scale);
        let y = self.field.numerical_aperture().cell_edges(self.y_scale);
        let data = self.field.as_matrix();
        (0..data.nrows())
            .flat_map(|i| {
                let x = &x;
                let y = &y;
                (0..data.ncols()).map(move |j| Cell {
                    x: (x[j], x[j + 1]),
                    y: (y[i], y[i + 1]),
                    value: data[(i, j)],
                })
            })
            .collect()
    }
}

#[cfg(feature = "plot")]
fn rgb(color: colorous::Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

#[cfg(feature = "plot")]
impl Figure {
    /// Draws the figure on a plotters drawing area
    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE)?;
        let area = root
            .titled(&self.title[0], ("sans-serif", 22))?
            .titled(&self.title[1], ("sans-serif", 17))?;
        let (_, height) = area.dim_in_pixel();
        let (plot_area, colorbar_area) = area.split_vertically((height * 4 / 5) as i32);

        self.draw_field(&plot_area)?;
        self.draw_colorbar(root, &colorbar_area)?;
        Ok(())
    }
    fn draw_field<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let ((x_lo, x_hi), (y_lo, y_hi)) = self.extent();
        let (x_scale, y_scale) = self.scales();
        let x_ticks = x_scale.ticks(x_lo, x_hi);
        let y_ticks = y_scale.ticks(y_lo, y_hi);
        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(
                (x_lo..x_hi)
                    .with_key_points(x_ticks.major.clone())
                    .with_light_points(x_ticks.minor.clone()),
                (y_lo..y_hi)
                    .with_key_points(y_ticks.major.clone())
                    .with_light_points(y_ticks.minor.clone()),
            )?;

        chart.draw_series(self.cells().into_iter().map(|cell| {
            Rectangle::new(
                [(cell.x.0, cell.y.0), (cell.x.1, cell.y.1)],
                rgb(self.color_scale.color(cell.value)).filled(),
            )
        }))?;

        let x_formatter = |v: &f64| x_ticks.label(*v);
        let y_formatter = |v: &f64| y_ticks.label(*v);
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .axis_desc_style(("sans-serif", 16))
            .label_style(("sans-serif", 13))
            .bold_line_style(&BLACK.mix(0.35))
            .light_line_style(&BLACK.mix(0.12))
            .draw()?;

        let (width, height) = chart.plotting_area().dim_in_pixel();
        let pixel_scale = (
            width as f64 / (x_hi - x_lo),
            height as f64 / (y_hi - y_lo),
        );
        let style = BLACK.stroke_width(2);
        let mut n_curve = 0;
        for curve in self.curves.iter().filter(|curve| !curve.is_empty()) {
            let points: Vec<(f64, f64)> = curve
                .points()
                .iter()
                .map(|&(m, na)| (x_scale.project(m), y_scale.project(na)))
                .collect();
            let dash = curve.dash_pattern();
            let (on, off) = (dash.on as i32, dash.off as i32);
            chart
                .draw_series(
                    crate::curve::dash_segments(&points, dash, pixel_scale)
                        .into_iter()
                        .map(|segment| PathElement::new(segment, style)),
                )?
                .label(curve.label())
                .legend(move |(x, y)| {
                    EmptyElement::at((x, y))
                        + PathElement::new(vec![(0, 0), (on, 0)], style)
                        + PathElement::new(vec![(on + off, 0), (2 * on + off, 0)], style)
                });
            n_curve += 1;
        }
        log::debug!("{n_curve} iso-sampling curve(s) drawn");
        if n_curve > 0 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .label_font(("sans-serif", 14))
                .draw()?;
        }
        Ok(())
    }
    fn draw_colorbar<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<()> {
        let (vmin, vmax) = self.color_scale.range();
        let cb_area = area.margin(10, 0, 80, 30);
        let chart = ChartBuilder::on(&cb_area)
            .set_label_area_size(LabelAreaPosition::Bottom, 70)
            .build_cartesian_2d(vmin..vmax, 0f64..1f64)?;
        let bar = chart.plotting_area();
        let (width, _) = bar.dim_in_pixel();
        let steps = width.max(1) as usize;
        let delta = (vmax - vmin) / steps as f64;
        for k in 0..steps {
            let v0 = vmin + delta * k as f64;
            let v1 = v0 + delta;
            let color = rgb(self.color_scale.color(0.5 * (v0 + v1)));
            bar.draw(&Rectangle::new([(v0, 0.0), (v1, 1.0)], color.filled()))?;
        }
        bar.draw(&Rectangle::new([(vmin, 0.0), (vmax, 1.0)], &BLACK))?;

        // tick marks and labels are drawn in pixels relative to `root`
        let (ox, oy) = root.get_base_pixel();
        let to_root = |value: f64| {
            let (x, y) = chart.backend_coord(&(value, 0.0));
            (x - ox, y - oy)
        };
        let font = ("sans-serif", 14).into_font().color(&BLACK);
        let centered = font.pos(Pos::new(HPos::Center, VPos::Top));
        for tick in self.color_scale.ticks() {
            let (x, y) = to_root(tick.value);
            root.draw(&PathElement::new(vec![(x, y), (x, y + 5)], &BLACK))?;
            root.draw(&Text::new(tick.label, (x, y + 8), centered.clone()))?;
        }
        let (x_lo, y) = to_root(vmin);
        let (x_hi, _) = to_root(vmax);
        let at = |fraction: f64| x_lo + (fraction * (x_hi - x_lo) as f64) as i32;
        root.draw(&Text::new(
            crate::colormap::COLORBAR_LABEL,
            (at(0.5), y + 28),
            centered.clone(),
        ))?;
        let small = ("sans-serif", 13)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(
            crate::colormap::UNDERSAMPLING,
            (at(0.1), y + 48),
            small.clone(),
        ))?;
        root.draw(&Text::new(
            crate::colormap::OVERSAMPLING,
            (at(0.9), y + 48),
            small,
        ))?;
        Ok(())
    }
    /// Saves the figure, as SVG if the file extension is `svg` and as a bitmap otherwise
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("svg") => {
                let root = SVGBackend::new(path, self.size).into_drawing_area();
                self.draw(&root)?;
                root.present()?;
            }
            _ => {
                let root = BitMapBackend::new(path, self.size).into_drawing_area();
                self.draw(&root)?;
                root.present()?;
            }
        }
        log::info!("figure saved to {:?}", path);
        Ok(())
    }
    /// Renders the figure into an SVG document
    pub fn to_svg(&self) -> Result<String> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, self.size).into_drawing_area();
            self.draw(&root)?;
            root.present()?;
        }
        Ok(buffer)
    }
}
