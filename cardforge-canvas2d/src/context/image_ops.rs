//! Image drawing, pixel readback, and PNG output for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::geometry::CanvasImageDataRef;

impl Canvas2dContext {
    /// Draw premultiplied RGBA image data scaled into the destination rectangle.
    ///
    /// Empty sources and non-positive destination sizes draw nothing.
    pub fn draw_image_data_scaled(
        &mut self,
        image: &CanvasImageDataRef<'_>,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) {
        log::debug!(
            target: "canvas",
            "drawImage {}x{} into {} {} {} {}",
            image.width, image.height, dx, dy, dw, dh
        );
        if !(dw > 0.0 && dh > 0.0) {
            return;
        }
        let Some(pixmap) = tiny_skia::PixmapRef::from_bytes(image.data, image.width, image.height)
        else {
            return;
        };
        let paint = tiny_skia::PixmapPaint {
            opacity: self.state.global_alpha,
            quality: self.state.filter_quality(),
            ..Default::default()
        };

        let scale_x = dw / image.width as f32;
        let scale_y = dh / image.height as f32;
        let transform = self
            .state
            .transform
            .pre_translate(dx, dy)
            .pre_scale(scale_x, scale_y);

        let clip_mask = self.create_clip_mask();
        self.pixmap
            .draw_pixmap(0, 0, pixmap, &paint, transform, clip_mask.as_ref());
    }

    /// Read a region of the canvas as straight-alpha RGBA.
    ///
    /// Pixels outside the canvas read as transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; (width * height * 4) as usize];
        let src = self.pixmap.data();

        for dy in 0..height {
            for dx in 0..width {
                let src_x = x + dx as i32;
                let src_y = y + dy as i32;
                if src_x < 0
                    || src_y < 0
                    || src_x >= self.width as i32
                    || src_y >= self.height as i32
                {
                    continue;
                }

                let src_idx = (src_y as u32 * self.width + src_x as u32) as usize * 4;
                let dst_idx = ((dy * width + dx) * 4) as usize;
                let pixel = &src[src_idx..src_idx + 4];

                match pixel[3] {
                    0 => {}
                    255 => data[dst_idx..dst_idx + 4].copy_from_slice(pixel),
                    a => {
                        let alpha_f = a as f32 / 255.0;
                        for c in 0..3 {
                            data[dst_idx + c] = (pixel[c] as f32 / alpha_f).round().min(255.0) as u8;
                        }
                        data[dst_idx + 3] = a;
                    }
                }
            }
        }

        data
    }

    /// Export the canvas as PNG data.
    ///
    /// `ppi` sets the pHYs pixel density and defaults to 72.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            let data = self.get_image_data(0, 0, self.width, self.height);
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use crate::font_config::FontConfig;
    use crate::geometry::{CanvasImageDataRef, RectParams};
    use crate::Canvas2dContext;

    fn ctx(width: u32, height: u32) -> Canvas2dContext {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        Canvas2dContext::with_config(width, height, config).unwrap()
    }

    #[test]
    fn test_draw_image_scaled_covers_destination() {
        let mut ctx = ctx(40, 40);
        ctx.set_image_smoothing_enabled(false);
        let pixels = [0u8, 0, 255, 255].repeat(4);
        let image = CanvasImageDataRef::new(&pixels, 2, 2).unwrap();
        ctx.draw_image_data_scaled(&image, 10.0, 10.0, 20.0, 20.0);

        assert_eq!(ctx.get_image_data(15, 15, 1, 1), vec![0, 0, 255, 255]);
        assert_eq!(ctx.get_image_data(28, 28, 1, 1), vec![0, 0, 255, 255]);
        assert_eq!(ctx.get_image_data(5, 5, 1, 1), vec![0, 0, 0, 0]);
        assert_eq!(ctx.get_image_data(35, 35, 1, 1), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_draw_image_zero_size_is_noop() {
        let mut ctx = ctx(10, 10);
        let pixels = [255u8; 4];
        let image = CanvasImageDataRef::new(&pixels, 1, 1).unwrap();
        ctx.draw_image_data_scaled(&image, 0.0, 0.0, 0.0, 10.0);
        assert!(ctx.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_get_image_data_unpremultiplies() {
        let mut ctx = ctx(4, 4);
        ctx.set_fill_style("rgba(255, 0, 0, 0.5)").unwrap();
        ctx.fill_rect(&RectParams::new(0.0, 0.0, 4.0, 4.0));
        let p = ctx.get_image_data(1, 1, 1, 1);
        assert!(p[0] >= 250);
        assert!((p[3] as i32 - 128).abs() <= 1);
        // Outside the canvas
        assert_eq!(ctx.get_image_data(-1, -1, 1, 1), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_to_png_header_and_dimensions() {
        let ctx = ctx(12, 7);
        let png = ctx.to_png(Some(144.0)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }
}
