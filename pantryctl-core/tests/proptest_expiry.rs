/// Property tests for expiry-date ordering and validation.
///
/// Sorting by `ExpiryDate` must always produce a list that is non-decreasing
/// by (year, month, day), with a missing day ahead of any present day.
use pantryctl_core::ExpiryDate;
use proptest::prelude::*;

fn expiry() -> impl Strategy<Value = ExpiryDate> {
    (proptest::option::of(1i32..=31), 1i32..=12, 2000i32..=2040)
        .prop_map(|(day, month, year)| ExpiryDate::new(day, month, year).unwrap())
}

fn key(date: &ExpiryDate) -> (i32, i32, i32) {
    // absent day ranks below every real day
    (date.year(), date.month(), date.day().unwrap_or(i32::MIN))
}

proptest! {
    #[test]
    fn sorted_dates_are_non_decreasing(mut dates in proptest::collection::vec(expiry(), 0..64)) {
        dates.sort();
        for pair in dates.windows(2) {
            prop_assert!(key(&pair[0]) <= key(&pair[1]));
        }
    }

    #[test]
    fn months_outside_range_are_rejected(month in prop_oneof![i32::MIN..=0, 13i32..=i32::MAX]) {
        prop_assert!(ExpiryDate::new(None, month, 2024).is_err());
    }
}
