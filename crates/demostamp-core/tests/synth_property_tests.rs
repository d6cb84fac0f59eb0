use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use demostamp_core::{compute_times_for_id, stable_code_to_weeks, IdShape};
use proptest::prelude::*;

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 12, 12, 0, 0).unwrap()
}

fn project_code() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9][a-z0-9-]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn weeks_are_bounded_and_deterministic(code in "\\PC{0,40}") {
        let w = stable_code_to_weeks(&code);
        prop_assert!((3..=30).contains(&w), "weeks={}", w);
        prop_assert_eq!(w, stable_code_to_weeks(&code));
    }

    #[test]
    fn single_rule_arithmetic(n in 0i64..2000) {
        let id = format!("c-s-{n:02}");
        let t = compute_times_for_id(&id, anchor()).unwrap();
        prop_assert_eq!(t.create, anchor() - TimeDelta::days(4 * n));
        prop_assert_eq!(t.update, t.create + TimeDelta::hours(n));
    }

    #[test]
    fn project_rule_arithmetic(code in project_code(), n in 0i64..500) {
        prop_assume!(code != "s");
        let id = format!("c-{code}-{n}");
        let shape = IdShape::classify(&id).unwrap();
        let IdShape::Project { code: parsed, n: parsed_n } = shape else {
            return Err(TestCaseError::fail(format!("{id} classified as {shape:?}")));
        };
        prop_assert_eq!(parsed_n, n);
        let weeks = stable_code_to_weeks(parsed);
        let t = compute_times_for_id(&id, anchor()).unwrap();
        prop_assert_eq!(t.create, anchor() - TimeDelta::weeks(weeks));
        prop_assert_eq!(t.update, t.create + TimeDelta::hours(n) + TimeDelta::days(n));
    }

    #[test]
    fn create_never_after_update(id in "c-[a-z-]{0,8}(-[0-9]{1,3})?") {
        let t = compute_times_for_id(&id, anchor()).unwrap();
        prop_assert!(t.create <= t.update);
    }

    #[test]
    fn ids_without_c_prefix_fall_back(id in "[A-Zd-z_ ][a-z0-9_ -]{0,16}") {
        let t = compute_times_for_id(&id, anchor()).unwrap();
        prop_assert_eq!(t.create, anchor() - TimeDelta::days(10));
        prop_assert_eq!(t.update, t.create + TimeDelta::hours(2));
    }
}
