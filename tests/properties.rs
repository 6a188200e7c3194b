use bmp_batch_rs::image_pipeline::bmp::{decode, encode};
use bmp_batch_rs::image_pipeline::{
    PixelGrid, Rgb, binarize, greyscale, is_nearly_black, saturate,
};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = PixelGrid> {
    (1usize..=17, 1usize..=9).prop_flat_map(|(width, height)| {
        prop::collection::vec(any::<(u8, u8, u8)>(), width * height).prop_map(move |raw| {
            let pixels = raw.into_iter().map(|(r, g, b)| Rgb::new(r, g, b)).collect();
            PixelGrid::from_pixels(width, height, pixels).unwrap()
        })
    })
}

/// A grid with some number of black pixels scattered over a white background.
fn arb_partly_black() -> impl Strategy<Value = (PixelGrid, usize)> {
    (1usize..=40, 1usize..=25).prop_flat_map(|(width, height)| {
        let len = width * height;
        (0..len, Just(len)).prop_flat_map(move |(black, len)| {
            Just((0..len).collect::<Vec<_>>())
                .prop_shuffle()
                .prop_map(move |order| {
                    let mut pixels = vec![Rgb::WHITE; len];
                    for &index in &order[..black] {
                        pixels[index] = Rgb::BLACK;
                    }
                    (PixelGrid::from_pixels(width, height, pixels).unwrap(), black)
                })
        })
    })
}

proptest! {
    #[test]
    fn prop_codec_round_trip(grid in arb_grid()) {
        let bytes = encode(&grid).unwrap();
        prop_assert_eq!(decode(&bytes).unwrap(), grid);
    }

    #[test]
    fn prop_saturate_identity(grid in arb_grid()) {
        prop_assert_eq!(saturate(&grid, 1.0).unwrap(), grid);
    }

    #[test]
    fn prop_saturate_zero_is_black(grid in arb_grid()) {
        let out = saturate(&grid, 0.0).unwrap();
        prop_assert!(out.pixels().iter().all(|&p| p == Rgb::BLACK));
    }

    #[test]
    fn prop_saturate_never_darkens_when_boosting(grid in arb_grid(), factor in 1.0f32..8.0) {
        let out = saturate(&grid, factor).unwrap();
        for (before, after) in grid.pixels().iter().zip(out.pixels()) {
            prop_assert!(after.r >= before.r && after.g >= before.g && after.b >= before.b);
        }
    }

    #[test]
    fn prop_greyscale_idempotent(grid in arb_grid()) {
        let once = greyscale(&grid);
        prop_assert!(once.pixels().iter().all(|p| p.r == p.g && p.g == p.b));
        prop_assert_eq!(greyscale(&once), once);
    }

    #[test]
    fn prop_binarize_is_black_or_white(grid in arb_grid(), threshold in 0.0f32..=1.0) {
        let out = binarize(&grid, threshold).unwrap();
        prop_assert!(out.pixels().iter().all(|&p| p == Rgb::BLACK || p == Rgb::WHITE));
    }

    #[test]
    fn prop_classifier_monotonic(grid in arb_grid(), a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if is_nearly_black(&grid, high).unwrap() {
            prop_assert!(is_nearly_black(&grid, low).unwrap());
        }
    }

    #[test]
    fn prop_classifier_threshold_boundary((grid, black) in arb_partly_black()) {
        let threshold = black as f32 / grid.len() as f32;
        prop_assert!(is_nearly_black(&grid, threshold).unwrap());

        let above = f32::from_bits(threshold.to_bits() + 1);
        prop_assert!(!is_nearly_black(&grid, above).unwrap());
    }
}

#[test]
fn transforms_leave_input_untouched() {
    let grid = PixelGrid::from_pixels(2, 1, vec![Rgb::new(9, 99, 199), Rgb::grey(42)]).unwrap();
    let copy = grid.clone();

    let _ = saturate(&grid, 3.0).unwrap();
    let _ = greyscale(&grid);
    let _ = binarize(&grid, 0.2).unwrap();

    assert_eq!(grid, copy);
}

#[test]
fn nearly_black_scenarios() {
    let black = PixelGrid::new(10, 10, Rgb::BLACK).unwrap();
    let white = PixelGrid::new(10, 10, Rgb::WHITE).unwrap();

    assert!(is_nearly_black(&black, 0.5).unwrap());
    assert!(!is_nearly_black(&white, 0.5).unwrap());
}
