//! Static Chart Renderer
//! Draws the daily expense bar chart into an RGBA image for export.
//!
//! Layout:
//! 1. Title centered at the top
//! 2. Plot area: teal bars with currency value labels above each bar
//! 3. Y axis: currency ticks at fixed steps with light gridlines
//! 4. X axis: every day label, rotated to fit narrow columns, axis title below
//!
//! No legend is drawn; the chart has a single series.

use crate::charts::config::{
    BarChartConfig, BAR_BORDER, BAR_FILL, LABEL_ROTATION_MAX, LABEL_ROTATION_MIN, TITLE_FONT_SIZE,
    VALUE_LABEL_FONT_SIZE,
};
use crate::currency::format_brl;
use crate::data::DailySeries;
use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use rusttype::{Font, Scale};
use std::io::Cursor;
use thiserror::Error;

// Colors (RGBA)
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GRID_GRAY: Rgba<u8> = Rgba([222, 222, 222, 255]);

/// Fonts probed at runtime, first hit wins.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const BOLD_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No usable system font found")]
    FontNotFound,
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the bar chart at the given pixel size.
    ///
    /// Identical inputs always produce identical images. Totals above the
    /// axis bound are clipped at the top of the plot area.
    pub fn render(
        series: &DailySeries,
        config: &BarChartConfig,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, RenderError> {
        let mut img = ImageBuffer::from_pixel(width, height, WHITE);

        let font = Self::load_font(FONT_CANDIDATES)?;
        let bold_font = Self::load_font(BOLD_FONT_CANDIDATES).unwrap_or_else(|_| font.clone());

        let title_scale = Scale::uniform(TITLE_FONT_SIZE);
        let label_scale = Scale::uniform(12.0);
        let value_scale = Scale::uniform(VALUE_LABEL_FONT_SIZE);

        // Title
        let title_w = Self::measure_text(&bold_font, title_scale, &config.title);
        Self::draw_text(
            &mut img,
            &bold_font,
            title_scale,
            &config.title,
            (width as i32 - title_w) / 2,
            6,
            BLACK,
        );

        // Plot area: left margin sized to the widest tick label
        let tick_labels: Vec<String> = config.tick_values().iter().map(|&v| format_brl(v)).collect();
        let widest_tick = tick_labels
            .iter()
            .map(|l| Self::measure_text(&font, label_scale, l))
            .max()
            .unwrap_or(0);

        let plot_x = (widest_tick + 26) as u32;
        let plot_y = 36u32;
        let plot_w = width.saturating_sub(plot_x + 16).max(1);
        let plot_h = height.saturating_sub(plot_y + 70).max(1);

        // Y ticks and horizontal gridlines
        for (tick, label) in config.tick_values().iter().zip(&tick_labels) {
            let py = Self::map_y(*tick, config.max_y, plot_y, plot_h);
            let label_w = Self::measure_text(&font, label_scale, label);
            Self::draw_text(
                &mut img,
                &font,
                label_scale,
                label,
                plot_x as i32 - label_w - 8,
                py as i32 - 7,
                BLACK,
            );
            if *tick > 0.0 {
                draw_line_segment_mut(
                    &mut img,
                    (plot_x as f32, py as f32),
                    ((plot_x + plot_w) as f32, py as f32),
                    GRID_GRAY,
                );
            }
        }

        // Axes
        draw_line_segment_mut(
            &mut img,
            (plot_x as f32, (plot_y + plot_h) as f32),
            ((plot_x + plot_w) as f32, (plot_y + plot_h) as f32),
            BLACK,
        );
        draw_line_segment_mut(
            &mut img,
            (plot_x as f32, plot_y as f32),
            (plot_x as f32, (plot_y + plot_h) as f32),
            BLACK,
        );

        // Bars and value labels
        let n = series.len();
        if n > 0 {
            let slot_w = plot_w as f32 / n as f32;
            let bar_w = (config.bar_thickness as f32).min(slot_w).max(1.0) as u32;

            let widest_day = series
                .days
                .iter()
                .map(|d| Self::measure_text(&font, label_scale, d))
                .max()
                .unwrap_or(0);
            let rotation = Self::pick_rotation(widest_day as f32, slot_w);

            for (i, (day, &total)) in series.days.iter().zip(&series.totals).enumerate() {
                let cx = plot_x as f32 + slot_w * (i as f32 + 0.5);
                let clipped = total.min(config.max_y).max(0.0);
                let bar_top = Self::map_y(clipped, config.max_y, plot_y, plot_h);
                let bar_h = (plot_y + plot_h).saturating_sub(bar_top);

                if bar_h >= 1 {
                    let left = (cx - bar_w as f32 / 2.0) as i32;
                    draw_filled_rect_mut(
                        &mut img,
                        Rect::at(left, bar_top as i32).of_size(bar_w, bar_h),
                        Self::composite_over_white(BAR_FILL),
                    );
                    draw_hollow_rect_mut(
                        &mut img,
                        Rect::at(left, bar_top as i32).of_size(bar_w, bar_h),
                        Rgba(BAR_BORDER),
                    );
                }

                if config.show_value_labels {
                    let label = format_brl(total);
                    let label_w = Self::measure_text(&bold_font, value_scale, &label);
                    let label_y = (bar_top as i32 - 18).max(plot_y as i32);
                    Self::draw_text(
                        &mut img,
                        &bold_font,
                        value_scale,
                        &label,
                        cx as i32 - label_w / 2,
                        label_y,
                        BLACK,
                    );
                }

                // Day label under the bar, slanted to fit the column
                Self::draw_text_angled(
                    &mut img,
                    &font,
                    label_scale,
                    day,
                    cx as i32 + 4,
                    (plot_y + plot_h + 6) as i32,
                    rotation,
                    BLACK,
                );
            }
        }

        // Axis titles
        let x_title_w = Self::measure_text(&font, label_scale, &config.x_title);
        Self::draw_text(
            &mut img,
            &font,
            label_scale,
            &config.x_title,
            (plot_x + plot_w / 2) as i32 - x_title_w / 2,
            height as i32 - 20,
            BLACK,
        );
        Self::draw_text_rotated90(
            &mut img,
            &font,
            label_scale,
            &config.y_title,
            4,
            (plot_y + plot_h / 2) as i32 + Self::measure_text(&font, label_scale, &config.y_title) / 2,
            BLACK,
        );

        Ok(img)
    }

    /// Render and encode as PNG in memory.
    pub fn render_to_png_bytes(
        series: &DailySeries,
        config: &BarChartConfig,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let img = Self::render(series, config, width, height)?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn load_font(candidates: &[&str]) -> Result<Font<'static>, RenderError> {
        for path in candidates {
            if let Ok(bytes) = std::fs::read(path) {
                if let Some(font) = Font::try_from_vec(bytes) {
                    return Ok(font);
                }
            }
        }
        Err(RenderError::FontNotFound)
    }

    /// Alpha-composite an RGBA color over the white background.
    fn composite_over_white(color: [u8; 4]) -> Rgba<u8> {
        let alpha = color[3] as u16;
        let blend = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha)) / 255) as u8;
        Rgba([blend(color[0]), blend(color[1]), blend(color[2]), 255])
    }

    fn map_y(value: f64, max_y: f64, plot_y: u32, plot_h: u32) -> u32 {
        let ratio = if max_y > 0.0 {
            (value / max_y).clamp(0.0, 1.0)
        } else {
            0.0
        };
        plot_y + plot_h - (ratio * plot_h as f64).round() as u32
    }

    /// Use the shallow angle when the widest label fits its column at that
    /// slant, the steep one otherwise.
    fn pick_rotation(widest_label_px: f32, slot_w: f32) -> f32 {
        if widest_label_px * LABEL_ROTATION_MIN.to_radians().cos() <= slot_w {
            LABEL_ROTATION_MIN
        } else {
            LABEL_ROTATION_MAX
        }
    }

    fn measure_text(font: &Font, scale: Scale, text: &str) -> i32 {
        let v_metrics = font.v_metrics(scale);
        let glyphs: Vec<_> = font
            .layout(text, scale, rusttype::point(0.0, v_metrics.ascent))
            .collect();
        if let Some(last) = glyphs.last() {
            if let Some(bb) = last.pixel_bounding_box() {
                return bb.max.x;
            }
        }
        (text.len() * 6) as i32
    }

    fn draw_text(
        img: &mut RgbaImage,
        font: &Font,
        scale: Scale,
        text: &str,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) {
        let v_metrics = font.v_metrics(scale);
        for glyph in font.layout(
            text,
            scale,
            rusttype::point(x as f32, y as f32 + v_metrics.ascent),
        ) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = bb.min.x + gx as i32;
                    let py = bb.min.y + gy as i32;
                    if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height()
                    {
                        let alpha = (v * 255.0) as u8;
                        if alpha > 0 {
                            Self::blend_pixel(img, px as u32, py as u32, color, alpha);
                        }
                    }
                });
            }
        }
    }

    fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>, alpha: u8) {
        let pixel = img.get_pixel_mut(x, y);
        let bg = *pixel;
        let a = alpha as u16;
        for c in 0..3 {
            pixel[c] = ((color[c] as u16 * a + bg[c] as u16 * (255 - a)) / 255) as u8;
        }
    }

    /// Rasterize text to a scratch image. Returns the buffer with glyph
    /// coverage in the alpha channel.
    fn rasterize_text(font: &Font, scale: Scale, text: &str, color: Rgba<u8>) -> Option<RgbaImage> {
        let v_metrics = font.v_metrics(scale);
        let glyphs: Vec<_> = font
            .layout(text, scale, rusttype::point(0.0, v_metrics.ascent))
            .collect();

        let mut max_x = 0u32;
        let mut max_y = 0u32;
        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                max_x = max_x.max(bb.max.x.max(0) as u32);
                max_y = max_y.max(bb.max.y.max(0) as u32);
            }
        }
        if max_x == 0 || max_y == 0 {
            return None;
        }

        let temp_w = max_x + 2;
        let temp_h = max_y + 2;
        let mut temp: RgbaImage = ImageBuffer::from_pixel(temp_w, temp_h, Rgba([0, 0, 0, 0]));

        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = bb.min.x + gx as i32;
                    let py = bb.min.y + gy as i32;
                    if px >= 0 && py >= 0 && (px as u32) < temp_w && (py as u32) < temp_h {
                        let alpha = (v * 255.0) as u8;
                        if alpha > 0 {
                            temp.put_pixel(
                                px as u32,
                                py as u32,
                                Rgba([color[0], color[1], color[2], alpha]),
                            );
                        }
                    }
                });
            }
        }

        Some(temp)
    }

    /// Draw text slanted counter-clockwise by `degrees`, with the top-right
    /// corner of the slanted block anchored at (x, y). Used for X-axis day
    /// labels so narrow columns stay readable.
    fn draw_text_angled(
        img: &mut RgbaImage,
        font: &Font,
        scale: Scale,
        text: &str,
        x: i32,
        y: i32,
        degrees: f32,
        color: Rgba<u8>,
    ) {
        let Some(temp) = Self::rasterize_text(font, scale, text, color) else {
            return;
        };
        let (temp_w, temp_h) = (temp.width() as f32, temp.height() as f32);

        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();

        // Forward transform (image coords, y down): rotates the text so its
        // right end rises toward the anchor.
        let fwd = |tx: f32, ty: f32| (tx * cos + ty * sin, -tx * sin + ty * cos);

        let corners = [
            fwd(0.0, 0.0),
            fwd(temp_w, 0.0),
            fwd(0.0, temp_h),
            fwd(temp_w, temp_h),
        ];
        let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max);

        let dest_w = (max_x - min_x).ceil() as i32;
        let dest_h = (max_y - min_y).ceil() as i32;

        for dy in 0..dest_h {
            for dx in 0..dest_w {
                // Inverse-rotate the destination pixel back into the scratch
                // image and take the nearest sample.
                let u = dx as f32 + min_x;
                let v = dy as f32 + min_y;
                let sx = u * cos - v * sin;
                let sy = u * sin + v * cos;
                if sx < 0.0 || sy < 0.0 || sx >= temp_w || sy >= temp_h {
                    continue;
                }
                let sample = *temp.get_pixel(sx as u32, sy as u32);
                if sample[3] == 0 {
                    continue;
                }

                let dest_x = x - dest_w + dx;
                let dest_y = y + dy;
                if dest_x >= 0
                    && dest_y >= 0
                    && (dest_x as u32) < img.width()
                    && (dest_y as u32) < img.height()
                {
                    Self::blend_pixel(img, dest_x as u32, dest_y as u32, sample, sample[3]);
                }
            }
        }
    }

    /// Draw text rotated 90 degrees counter-clockwise (for the Y-axis title).
    fn draw_text_rotated90(
        img: &mut RgbaImage,
        font: &Font,
        scale: Scale,
        text: &str,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) {
        let Some(temp) = Self::rasterize_text(font, scale, text, color) else {
            return;
        };
        let (temp_w, temp_h) = (temp.width(), temp.height());

        // (tx, ty) -> (ty, temp_w - tx - 1)
        for ty in 0..temp_h {
            for tx in 0..temp_w {
                let sample = *temp.get_pixel(tx, ty);
                if sample[3] == 0 {
                    continue;
                }
                let dest_x = x + ty as i32;
                let dest_y = y - tx as i32;
                if dest_x >= 0
                    && dest_y >= 0
                    && (dest_x as u32) < img.width()
                    && (dest_y as u32) < img.height()
                {
                    Self::blend_pixel(img, dest_x as u32, dest_y as u32, sample, sample[3]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::config::BarChartConfig;

    fn sample_series() -> DailySeries {
        DailySeries::new(
            vec!["01".into(), "02".into(), "03".into()],
            vec![400.0, 900.0, 150.0],
        )
    }

    /// Count contiguous runs of bar-colored pixels in the row with the most
    /// of them. Each bar contributes exactly one run.
    fn max_bar_runs(img: &RgbaImage) -> usize {
        let fill = StaticChartRenderer::composite_over_white(BAR_FILL);
        let border = Rgba(BAR_BORDER);
        let mut best = 0;
        for y in 0..img.height() {
            let mut runs = 0;
            let mut in_run = false;
            for x in 0..img.width() {
                let p = *img.get_pixel(x, y);
                let is_bar = p == fill || p == border;
                if is_bar && !in_run {
                    runs += 1;
                }
                in_run = is_bar;
            }
            best = best.max(runs);
        }
        best
    }

    #[test]
    fn renders_requested_dimensions() {
        let config = BarChartConfig::new(1000.0);
        let img = StaticChartRenderer::render(&sample_series(), &config, 640, 480).unwrap();
        assert_eq!(img.dimensions(), (640, 480));
    }

    #[test]
    fn one_bar_per_day() {
        let config = BarChartConfig::new(1000.0);
        let img = StaticChartRenderer::render(&sample_series(), &config, 640, 480).unwrap();
        assert_eq!(max_bar_runs(&img), 3);
    }

    #[test]
    fn zero_total_draws_no_bar() {
        let series = DailySeries::new(
            vec!["01".into(), "02".into(), "03".into()],
            vec![100.0, 250.75, 0.0],
        );
        let config = BarChartConfig::new(500.0);
        let img = StaticChartRenderer::render(&series, &config, 640, 480).unwrap();
        assert_eq!(max_bar_runs(&img), 2);
    }

    #[test]
    fn empty_series_still_renders_axes() {
        let config = BarChartConfig::new(250.0);
        let img = StaticChartRenderer::render(&DailySeries::new(vec![], vec![]), &config, 400, 300)
            .unwrap();
        assert_eq!(max_bar_runs(&img), 0);
        assert_eq!(img.dimensions(), (400, 300));
    }

    #[test]
    fn identical_inputs_render_identical_images() {
        let config = BarChartConfig::new(1000.0);
        let a = StaticChartRenderer::render(&sample_series(), &config, 640, 480).unwrap();
        let b = StaticChartRenderer::render(&sample_series(), &config, 640, 480).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn totals_above_bound_are_clipped() {
        let series = DailySeries::new(vec!["01".into()], vec![5000.0]);
        let config = BarChartConfig::new(500.0);
        // Must not panic or draw outside the image
        let img = StaticChartRenderer::render(&series, &config, 400, 300).unwrap();
        assert_eq!(max_bar_runs(&img), 1);
    }

    #[test]
    fn png_bytes_have_png_signature() {
        let config = BarChartConfig::new(1000.0);
        let bytes =
            StaticChartRenderer::render_to_png_bytes(&sample_series(), &config, 320, 240).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn shallow_rotation_when_label_fits() {
        assert_eq!(StaticChartRenderer::pick_rotation(14.0, 40.0), 30.0);
        assert_eq!(StaticChartRenderer::pick_rotation(60.0, 20.0), 45.0);
    }

    #[test]
    fn maps_values_onto_plot_rows() {
        assert_eq!(StaticChartRenderer::map_y(0.0, 1000.0, 36, 400), 436);
        assert_eq!(StaticChartRenderer::map_y(1000.0, 1000.0, 36, 400), 36);
        assert_eq!(StaticChartRenderer::map_y(500.0, 1000.0, 36, 400), 236);
    }
}
