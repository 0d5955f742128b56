use image::{GrayImage, Rgb, RgbImage, imageops};
use imageproc::contrast::{ThresholdType, threshold as ip_threshold};

/// Grayscale intensity at or above which a pixel counts as background.
pub const BACKGROUND_THRESHOLD: u8 = 254;

/// Compute the keep-mask for a grayscale image: near-white pixels map to 0,
/// everything else to 255.
pub fn keep_mask(gray: &GrayImage) -> GrayImage {
    // imageproc's comparison is strict, so dropping at >= 254 needs t = 253.
    ip_threshold(gray, BACKGROUND_THRESHOLD - 1, ThresholdType::BinaryInverted)
}

/// Zero out the near-white background of a color image, passing every other
/// pixel through unchanged.
pub fn strip_background(rgb: &RgbImage) -> RgbImage {
    let gray = imageops::grayscale(rgb);
    apply_keep_mask(rgb, &keep_mask(&gray))
}

/// Combine the color image with the keep-mask, channel-wise bitwise AND.
/// The mask is binary (0 or 255), so each channel either survives or zeroes.
fn apply_keep_mask(rgb: &RgbImage, mask: &GrayImage) -> RgbImage {
    debug_assert_eq!(rgb.dimensions(), mask.dimensions());

    let (w, h) = rgb.dimensions();
    let mut out = RgbImage::new(w, h);
    for ((rgb_px, mask_px), out_px) in rgb.pixels().zip(mask.pixels()).zip(out.pixels_mut()) {
        let keep = mask_px[0];
        *out_px = Rgb([rgb_px[0] & keep, rgb_px[1] & keep, rgb_px[2] & keep]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gray_image(w: u32, h: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([value]))
    }

    fn rgb_image(w: u32, h: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(color))
    }

    mod keep_mask {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn white_becomes_background() {
                let input = gray_image(2, 2, 255);
                let result = keep_mask(&input);
                for px in result.pixels() {
                    assert_eq!(px.0[0], 0);
                }
            }

            #[test]
            fn exact_threshold_becomes_background() {
                let input = gray_image(2, 2, 254);
                let result = keep_mask(&input);
                for px in result.pixels() {
                    assert_eq!(px.0[0], 0);
                }
            }

            #[test]
            fn one_below_threshold_is_kept() {
                let input = gray_image(2, 2, 253);
                let result = keep_mask(&input);
                for px in result.pixels() {
                    assert_eq!(px.0[0], 255);
                }
            }

            #[test]
            fn black_is_kept() {
                let input = gray_image(2, 2, 0);
                let result = keep_mask(&input);
                for px in result.pixels() {
                    assert_eq!(px.0[0], 255);
                }
            }

            #[test]
            fn mixed_values_per_pixel() {
                let mut input = GrayImage::new(2, 2);
                input.put_pixel(0, 0, Luma([0]));
                input.put_pixel(1, 0, Luma([253]));
                input.put_pixel(0, 1, Luma([254]));
                input.put_pixel(1, 1, Luma([255]));

                let result = keep_mask(&input);

                assert_eq!(result.get_pixel(0, 0).0[0], 255);
                assert_eq!(result.get_pixel(1, 0).0[0], 255);
                assert_eq!(result.get_pixel(0, 1).0[0], 0);
                assert_eq!(result.get_pixel(1, 1).0[0], 0);
            }

            #[test]
            fn dimensions_preserved() {
                let input = gray_image(5, 3, 100);
                let result = keep_mask(&input);
                assert_eq!(result.dimensions(), (5, 3));
            }
        }

        mod prop {
            use super::*;
            use proptest::prelude::*;

            proptest! {
                /// keep_mask: output is always binary (0 or 255)
                #[test]
                fn output_is_binary(
                    w in 1u32..20,
                    h in 1u32..20,
                    fill_value in proptest::num::u8::ANY
                ) {
                    let input = GrayImage::from_pixel(w, h, Luma([fill_value]));
                    let result = keep_mask(&input);

                    prop_assert_eq!(result.dimensions(), (w, h));
                    for px in result.pixels() {
                        prop_assert!(px.0[0] == 0 || px.0[0] == 255);
                    }
                }

                /// keep_mask: values >= 254 become 0, values below become 255
                #[test]
                fn respects_threshold(value in proptest::num::u8::ANY) {
                    let input = GrayImage::from_pixel(1, 1, Luma([value]));
                    let result = keep_mask(&input);
                    let out = result.get_pixel(0, 0).0[0];

                    if value >= BACKGROUND_THRESHOLD {
                        prop_assert_eq!(out, 0);
                    } else {
                        prop_assert_eq!(out, 255);
                    }
                }
            }
        }
    }

    mod strip_background {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn all_white_becomes_all_black() {
                let input = rgb_image(4, 4, [255, 255, 255]);
                let result = strip_background(&input);
                for px in result.pixels() {
                    assert_eq!(px.0, [0, 0, 0]);
                }
            }

            #[test]
            fn no_near_white_pixels_unchanged() {
                // Equal-channel grays keep their exact value through the
                // luma conversion, so the cutoff is weight-independent.
                let input = rgb_image(3, 3, [200, 200, 200]);
                let result = strip_background(&input);
                assert_eq!(result.as_raw(), input.as_raw());
            }

            #[test]
            fn kept_pixels_retain_channel_values() {
                let mut input = rgb_image(2, 1, [255, 255, 255]);
                input.put_pixel(0, 0, Rgb([10, 20, 30]));

                let result = strip_background(&input);

                assert_eq!(result.get_pixel(0, 0).0, [10, 20, 30]);
                assert_eq!(result.get_pixel(1, 0).0, [0, 0, 0]);
            }

            #[test]
            fn near_white_gray_is_dropped() {
                let input = rgb_image(2, 2, [254, 254, 254]);
                let result = strip_background(&input);
                for px in result.pixels() {
                    assert_eq!(px.0, [0, 0, 0]);
                }
            }

            #[test]
            fn just_below_cutoff_gray_survives() {
                let input = rgb_image(2, 2, [253, 253, 253]);
                let result = strip_background(&input);
                for px in result.pixels() {
                    assert_eq!(px.0, [253, 253, 253]);
                }
            }

            #[test]
            fn dimensions_preserved() {
                let input = rgb_image(7, 5, [128, 64, 32]);
                let result = strip_background(&input);
                assert_eq!(result.dimensions(), (7, 5));
            }
        }

        mod prop {
            use super::*;
            use proptest::prelude::*;

            proptest! {
                /// strip_background on equal-channel pixels: >= 254 zeroes,
                /// below passes through untouched
                #[test]
                fn gray_pixels_follow_cutoff(value in proptest::num::u8::ANY) {
                    let input = RgbImage::from_pixel(1, 1, Rgb([value, value, value]));
                    let result = strip_background(&input);
                    let out = result.get_pixel(0, 0).0;

                    if value >= BACKGROUND_THRESHOLD {
                        prop_assert_eq!(out, [0, 0, 0]);
                    } else {
                        prop_assert_eq!(out, [value, value, value]);
                    }
                }

                /// strip_background: every output pixel is either the input
                /// pixel or fully zeroed, never a blend
                #[test]
                fn pixels_survive_or_zero(
                    r in proptest::num::u8::ANY,
                    g in proptest::num::u8::ANY,
                    b in proptest::num::u8::ANY
                ) {
                    let input = RgbImage::from_pixel(1, 1, Rgb([r, g, b]));
                    let result = strip_background(&input);
                    let out = result.get_pixel(0, 0).0;

                    prop_assert!(out == [r, g, b] || out == [0, 0, 0]);
                }

                /// strip_background: dimensions always preserved
                #[test]
                fn preserves_dimensions(
                    w in 1u32..16,
                    h in 1u32..16,
                    value in proptest::num::u8::ANY
                ) {
                    let input = RgbImage::from_pixel(w, h, Rgb([value, value, value]));
                    let result = strip_background(&input);
                    prop_assert_eq!(result.dimensions(), (w, h));
                }
            }
        }
    }
}
