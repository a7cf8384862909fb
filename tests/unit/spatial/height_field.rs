//! Tests for height field normalization and lookup

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use shadow_haptics::io::error::DegenerateGeometry;
    use shadow_haptics::spatial::HeightField;

    // Tests the channel mean is stretched to the full range
    // Verified by normalizing the red channel only
    #[test]
    fn test_min_max_normalization() {
        let img = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([10, 10, 10]),
            1 => Rgb([30, 0, 0]),
            _ => Rgb([110, 110, 110]),
        });

        let field = HeightField::from_rgb(&img);

        assert_eq!(field.get(0, 0), Some(0));
        assert_eq!(field.get(1, 0), Some(0));
        assert_eq!(field.get(2, 0), Some(255));
        assert_eq!(field.degeneracy(), None);
    }

    // Tests a flat source becomes an all-zero field
    // Verified by dividing by a zero range
    #[test]
    fn test_flat_source() {
        let field = HeightField::from_rgb(&RgbImage::from_pixel(4, 5, Rgb([90, 90, 90])));

        assert_eq!((field.width(), field.height()), (4, 5));
        assert!(field.heights().iter().all(|&h| h == 0));
        assert_eq!(field.degeneracy(), Some(DegenerateGeometry::FlatHeightField));
    }

    // Tests random sources always span 0 to 255
    // Verified by skipping the min offset
    #[test]
    fn test_random_sources_span_full_range() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let img = RgbImage::from_fn(16, 12, |_, _| {
                Rgb([rng.random(), rng.random(), rng.random()])
            });
            let field = HeightField::from_rgb(&img);
            let heights = field.heights();

            if field.degeneracy().is_some() {
                continue;
            }
            assert_eq!(heights.iter().min(), Some(&0));
            assert_eq!(heights.iter().max(), Some(&255));
        }
    }

    // Tests lookups outside the grid
    // Verified by wrapping negative coordinates
    #[test]
    fn test_bounds() {
        let field = HeightField::flat(3, 2, 9);

        assert_eq!(field.get(2, 1), Some(9));
        assert_eq!(field.get(3, 1), None);
        assert_eq!(field.get(0, 2), None);
        assert_eq!(field.get(-1, 0), None);
        assert!(field.contains(0, 0));
        assert!(!field.contains(0, -1));
    }

    // Tests an empty field
    // Verified by reporting emptiness from the width only
    #[test]
    fn test_empty_field() {
        let field = HeightField::from_rgb(&RgbImage::new(0, 0));
        assert!(field.is_empty());
        assert_eq!(field.degeneracy(), None);
    }
}
