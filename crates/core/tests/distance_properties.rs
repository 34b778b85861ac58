use proptest::prelude::*;
use proptest::test_runner::Config;
use ridehail_core::geo::{distance_km, eta_minutes, EARTH_RADIUS_KM};

fn lat() -> impl Strategy<Value = f64> {
    -90.0_f64..=90.0_f64
}

fn lon() -> impl Strategy<Value = f64> {
    -180.0_f64..=180.0_f64
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn distance_to_self_is_zero(a in lat(), b in lon()) {
        prop_assert!(distance_km(a, b, a, b).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric(a1 in lat(), o1 in lon(), a2 in lat(), o2 in lon()) {
        let there = distance_km(a1, o1, a2, o2);
        let back = distance_km(a2, o2, a1, o1);
        prop_assert!((there - back).abs() < 1e-6);
    }

    #[test]
    fn distance_is_bounded_by_half_circumference(a1 in lat(), o1 in lon(), a2 in lat(), o2 in lon()) {
        let d = distance_km(a1, o1, a2, o2);
        prop_assert!(d >= 0.0);
        prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
    }

    #[test]
    fn triangle_inequality(
        a1 in lat(), o1 in lon(),
        a2 in lat(), o2 in lon(),
        a3 in lat(), o3 in lon(),
    ) {
        let direct = distance_km(a1, o1, a3, o3);
        let via = distance_km(a1, o1, a2, o2) + distance_km(a2, o2, a3, o3);
        prop_assert!(direct <= via + 1e-6);
    }

    #[test]
    fn eta_grows_with_distance(d1 in 0.0_f64..500.0, extra in 0.0_f64..500.0, speed in proptest::option::of(0.1_f64..60.0)) {
        prop_assert!(eta_minutes(d1, speed) <= eta_minutes(d1 + extra, speed));
    }
}
