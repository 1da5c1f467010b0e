//! Unit tests for EMA indicator

use crate::support::{assert_close, flat_closes};
use quantlens::indicators::trend::exponential_moving_average;

#[test]
fn test_ema_seed_is_simple_average() {
    let closes = [2.0, 4.0, 6.0, 8.0, 10.0];
    let ema = exponential_moving_average(&closes, 3);
    assert_eq!(ema.name, "EMA3");
    assert_eq!(ema.get(0), None);
    assert_eq!(ema.get(1), None);
    assert_close(ema.get(2).unwrap(), 4.0);
    // k = 0.5
    assert_close(ema.get(3).unwrap(), 6.0);
    assert_close(ema.get(4).unwrap(), 8.0);
}

#[test]
fn test_ema_recurrence() {
    let closes = [10.0, 10.0, 10.0, 10.0, 16.0];
    let ema = exponential_moving_average(&closes, 4);
    // seed 10 at index 3, k = 0.4
    assert_close(ema.get(3).unwrap(), 10.0);
    assert_close(ema.get(4).unwrap(), 16.0 * 0.4 + 10.0 * 0.6);
}

#[test]
fn test_ema_constant_prices() {
    let ema = exponential_moving_average(&flat_closes(40, 7.5), 12);
    assert_eq!(ema.first_defined_index(), Some(11));
    for value in ema.values.iter().flatten() {
        assert_close(*value, 7.5);
    }
}

#[test]
fn test_ema_insufficient_data() {
    let ema = exponential_moving_average(&[1.0, 2.0], 5);
    assert!(ema.values.iter().all(Option::is_none));
}
