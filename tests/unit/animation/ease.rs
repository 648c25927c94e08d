use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    assert_eq!(Ease::OutQuart.apply(-0.5), 0.0);
    assert_eq!(Ease::InCubic.apply(3.0), 1.0);
}

#[test]
fn serde_names_are_snake_case() {
    let json = serde_json::to_string(&Ease::OutQuart).unwrap();
    assert_eq!(json, "\"out_quart\"");
    let back: Ease = serde_json::from_str("\"in_out_cubic\"").unwrap();
    assert_eq!(back, Ease::InOutCubic);
}
