use std::io::Cursor;
use image::{ImageFormat, RgbImage};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::ScopeError;
use crate::drivers::pipeline::RenderFrame;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub envelope: RGBColor,
    pub peak_trace: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
            envelope: RGBColor(40, 140, 220),
            peak_trace: YELLOW,
        }
    }
}
/// Largest accepted width or height in pixels.
pub const MAX_PLOT_SIDE: u32 = 16_384;
/// RGB byte count for a `width` x `height` bitmap.
fn bitmap_len(width: u32, height: u32) -> Result<usize, ScopeError> {
    if width == 0 || height == 0 {
        return Err(ScopeError::Plot(format!("plot size {width}x{height} is empty")));
    }
    if width > MAX_PLOT_SIDE || height > MAX_PLOT_SIDE {
        return Err(ScopeError::Plot("plot size too large".into()));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(|| ScopeError::Plot("plot size too large".into()))
}
/// Draw each decimated column as a vertical min..max segment and encode
/// the result as PNG. The x axis is in GHz, the y axis uses the frame's
/// dB envelope.
pub fn render_frame_png(frame: &RenderFrame, style: PlotStyle) -> Result<Vec<u8>, ScopeError> {
    if frame.columns.is_empty() {
        return Err(ScopeError::Plot("render frame has no columns".into()));
    }
    let mut buffer = vec![0u8; bitmap_len(style.width, style.height)?];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_min = frame.range.min_hz / 1e9;
        // Avoid a zero-width axis for single-frequency frames.
        let x_max = (frame.range.max_hz / 1e9).max(x_min + 1e-9);
        let y_min = f64::from(frame.min_db);
        let y_max = f64::from(frame.max_db).max(y_min + 1.0);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
        let step = (x_max - x_min) / frame.columns.len() as f64;
        let column_x = |idx: usize| x_min + (idx as f64 + 0.5) * step;
        let envelope = style.envelope;
        chart.draw_series(frame.columns.iter().enumerate().map(|(idx, col)| {
            let x = column_x(idx);
            PathElement::new(vec![(x, col.min_db), (x, col.max_db)], envelope)
        }))?;
        chart.draw_series(LineSeries::new(
            frame
                .columns
                .iter()
                .enumerate()
                .map(|(idx, col)| (column_x(idx), col.max_db)),
            &style.peak_trace,
        ))?;
        root.present()?;
    }
    encode_png(buffer, style.width, style.height)
}
fn encode_png(pixels: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, ScopeError> {
    let image = RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| ScopeError::Plot(format!("pixel buffer does not match {width}x{height}")))?;
    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::decimate::DecimatedColumn;
    use crate::types::{FrequencyRange, GLOBAL_RANGE};
    fn frame(columns: Vec<DecimatedColumn>, range: FrequencyRange) -> RenderFrame {
        RenderFrame {
            range,
            columns,
            min_db: -120.0,
            max_db: -5.0,
            source_tag: "test".into(),
        }
    }
    #[test]
    fn renders_png_for_columns() {
        let columns = (0..64)
            .map(|i| DecimatedColumn {
                min_db: -110.0 + i as f64 * 0.1,
                max_db: -60.0 + i as f64 * 0.5,
            })
            .collect();
        let style = PlotStyle {
            width: 64,
            height: 48,
            ..PlotStyle::default()
        };
        let png = render_frame_png(&frame(columns, GLOBAL_RANGE), style).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
    #[test]
    fn zero_span_frame_still_renders() {
        let columns = vec![DecimatedColumn { min_db: -90.0, max_db: -30.0 }; 8];
        let range = FrequencyRange::new(5e9, 5e9);
        assert!(!render_frame_png(&frame(columns, range), PlotStyle::default())
            .unwrap()
            .is_empty());
    }
    #[test]
    fn empty_frame_is_an_error() {
        let err = render_frame_png(&frame(Vec::new(), GLOBAL_RANGE), PlotStyle::default());
        assert!(matches!(err, Err(ScopeError::Plot(_))));
    }
    #[test]
    fn oversized_plot_is_an_error() {
        let columns = vec![DecimatedColumn { min_db: -90.0, max_db: -30.0 }; 8];
        let style = PlotStyle {
            width: 1_500_000,
            height: 1000,
            ..PlotStyle::default()
        };
        let err = render_frame_png(&frame(columns.clone(), GLOBAL_RANGE), style);
        assert!(matches!(err, Err(ScopeError::Plot(ref msg)) if msg == "plot size too large"));
        let style = PlotStyle {
            width: u32::MAX,
            height: u32::MAX,
            ..PlotStyle::default()
        };
        assert!(render_frame_png(&frame(columns, GLOBAL_RANGE), style).is_err());
        assert!(bitmap_len(MAX_PLOT_SIDE, MAX_PLOT_SIDE).is_ok());
    }
    #[test]
    fn zero_sized_plot_is_an_error() {
        let columns = vec![DecimatedColumn { min_db: -90.0, max_db: -30.0 }; 8];
        for (width, height) in [(0, 400), (900, 0)] {
            let style = PlotStyle {
                width,
                height,
                ..PlotStyle::default()
            };
            let err = render_frame_png(&frame(columns.clone(), GLOBAL_RANGE), style);
            assert!(matches!(err, Err(ScopeError::Plot(_))));
        }
    }
}
