//! Contain-fit of an image inside a box.

/// Scaled size and centering offsets of a contained image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitBox {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Scale a `src_w`×`src_h` image to fit inside `dst_w`×`dst_h`, preserving
/// aspect ratio, and center it.
///
/// A source or destination with a non-positive (or non-finite) dimension has
/// no meaningful fit and yields the zero box.
pub fn fit_contain(src_w: f32, src_h: f32, dst_w: f32, dst_h: f32) -> FitBox {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !(valid(src_w) && valid(src_h) && valid(dst_w) && valid(dst_h)) {
        return FitBox::default();
    }

    let ratio = (dst_w / src_w).min(dst_h / src_h);
    let width = src_w * ratio;
    let height = src_h * ratio;
    FitBox {
        width,
        height,
        offset_x: (dst_w - width) / 2.0,
        offset_y: (dst_h - height) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_wide_source_into_square() {
        assert_eq!(
            fit_contain(400.0, 200.0, 200.0, 200.0),
            FitBox {
                width: 200.0,
                height: 100.0,
                offset_x: 0.0,
                offset_y: 50.0
            }
        );
    }

    #[test]
    fn test_small_source_is_scaled_up() {
        let fit = fit_contain(64.0, 64.0, 624.0, 580.0);
        assert_eq!((fit.width, fit.height), (580.0, 580.0));
        assert_eq!((fit.offset_x, fit.offset_y), (22.0, 0.0));
    }

    #[rstest]
    #[case(0.0, 100.0)]
    #[case(100.0, 0.0)]
    #[case(-5.0, 100.0)]
    #[case(f32::NAN, 100.0)]
    fn test_degenerate_source(#[case] w: f32, #[case] h: f32) {
        assert_eq!(fit_contain(w, h, 200.0, 200.0), FitBox::default());
    }

    #[rstest]
    #[case(1920.0, 1080.0)]
    #[case(10.0, 3000.0)]
    #[case(333.0, 333.0)]
    fn test_never_exceeds_destination(#[case] w: f32, #[case] h: f32) {
        let fit = fit_contain(w, h, 624.0, 580.0);
        assert!(fit.width <= 624.0 + 1e-3);
        assert!(fit.height <= 580.0 + 1e-3);
        assert!((fit.offset_x * 2.0 + fit.width - 624.0).abs() < 1e-3);
        assert!((fit.offset_y * 2.0 + fit.height - 580.0).abs() < 1e-3);
        // Aspect ratio preserved
        assert!((fit.width / fit.height - w / h).abs() < 1e-3 * (w / h));
    }
}
