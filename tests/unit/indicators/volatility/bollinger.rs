//! Unit tests for Bollinger Bands

use crate::support::{assert_close, choppy_closes, flat_closes};
use quantlens::common::math::sample_std_dev;
use quantlens::indicators::volatility::{bollinger_bands, bollinger_bands_default};

#[test]
fn test_bollinger_flat_prices_collapse_to_middle() {
    let bands = bollinger_bands_default(&flat_closes(30, 12.0));
    assert_eq!(bands.middle.first_defined_index(), Some(19));
    for i in 19..30 {
        assert_close(bands.middle.get(i).unwrap(), 12.0);
        assert_close(bands.upper.get(i).unwrap(), 12.0);
        assert_close(bands.lower.get(i).unwrap(), 12.0);
    }
}

#[test]
fn test_bollinger_uses_sample_std_dev() {
    let closes = choppy_closes(40);
    let bands = bollinger_bands(&closes, 20, 2.0);
    let window = &closes[20..40];
    let mean = window.iter().sum::<f64>() / 20.0;
    let std = sample_std_dev(window).unwrap();

    assert_close(bands.middle.latest().unwrap(), mean);
    assert_close(bands.upper.latest().unwrap(), mean + 2.0 * std);
    assert_close(bands.lower.latest().unwrap(), mean - 2.0 * std);
}

#[test]
fn test_bollinger_bands_are_ordered() {
    let bands = bollinger_bands(&choppy_closes(60), 10, 1.5);
    for i in 9..60 {
        let (u, m, l) = (
            bands.upper.get(i).unwrap(),
            bands.middle.get(i).unwrap(),
            bands.lower.get(i).unwrap(),
        );
        assert!(u >= m && m >= l);
    }
}

#[test]
fn test_bollinger_insufficient_data() {
    let bands = bollinger_bands_default(&choppy_closes(19));
    assert!(!bands.middle.is_defined_at_latest());
    assert!(!bands.upper.is_defined_at_latest());
}
