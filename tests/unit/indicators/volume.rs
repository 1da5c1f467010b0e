//! Unit tests for volume moving average

use crate::support::{assert_close, bars_from_closes};
use quantlens::indicators::volume::volume_moving_average;

#[test]
fn test_volume_ma() {
    // builder volumes are 1000, 1001, 1002, ...
    let bars = bars_from_closes(&[10.0; 8]);
    let vma = volume_moving_average(&bars, 5);
    assert_eq!(vma.name, "VOL_MA5");
    assert_eq!(vma.first_defined_index(), Some(4));
    assert_close(vma.get(4).unwrap(), 1_002.0);
    assert_close(vma.latest().unwrap(), 1_005.0);
}
