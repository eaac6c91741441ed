use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::viewer::{DetailPoint, ViewerError};

/// Rendering parameters for the exported snapshot.
#[derive(Clone, Debug)]
pub struct SnapshotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub trace: RGBColor,
}
impl Default for SnapshotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 300,
            background: RGBColor(252, 246, 246),
            trace: RGBColor(26, 26, 26),
        }
    }
}

/// Render the currently visible window of one lead to a PNG, so a clinician
/// can pull a still image out of the viewer.
pub fn render_lead_png(
    label: &str,
    detail: &[DetailPoint],
    style: &SnapshotStyle,
) -> Result<Vec<u8>, ViewerError> {
    if detail.is_empty() {
        return Err(ViewerError::Snapshot(
            "visible window has no samples".into(),
        ));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let t0 = detail.first().map(|p| p.time).unwrap_or(0.0);
        let mut t1 = detail.last().map(|p| p.time).unwrap_or(0.0);
        if t1 <= t0 {
            // Single-sample window; give the axis a nonzero span.
            t1 = t0 + 0.005;
        }
        let y_min = detail.iter().fold(f32::MAX, |acc, p| acc.min(p.value));
        let y_max = detail.iter().fold(f32::MIN, |acc, p| acc.max(p.value));
        let y_bounds = if (y_max - y_min).abs() < f32::EPSILON {
            (y_min - 50.0, y_max + 50.0)
        } else {
            let pad = (y_max - y_min) * 0.1;
            (y_min - pad, y_max + pad)
        };
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(label, ("sans-serif", 20).into_font())
            .set_label_area_size(LabelAreaPosition::Left, 45)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(t0..t1, y_bounds.0..y_bounds.1)?;
        chart
            .configure_mesh()
            .light_line_style(&RGBColor(232, 165, 165).mix(0.5))
            .x_desc("seconds")
            .draw()?;
        chart.draw_series(LineSeries::new(
            detail.iter().map(|p| (p.time, p.value)),
            &style.trace,
        ))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ViewerError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ViewerError::Snapshot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::{detail_series, LeadInput, SignalBuffer, Viewport};

    #[test]
    fn snapshot_of_a_window_returns_png_bytes() {
        let samples = (0..2_400).map(|i| 1500.0 + (i as f32 * 0.05).sin() * 40.0).collect();
        let buffer = SignalBuffer::new(LeadInput::new(samples, "Lead I")).unwrap();
        let viewport = Viewport::new(buffer.len(), 1_200);
        let detail = detail_series(&buffer, &viewport);
        let png = render_lead_png("Lead I", &detail, &SnapshotStyle::default()).unwrap();
        assert!(!png.is_empty());
        // PNG magic bytes.
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn empty_window_is_a_snapshot_error() {
        assert!(matches!(
            render_lead_png("Lead I", &[], &SnapshotStyle::default()),
            Err(ViewerError::Snapshot(_))
        ));
    }
}
