//! Item model and expiry-date handling

use std::fmt;

use chrono::NaiveDateTime;

use crate::ValidationError;

/// Three-letter English month names, indexed by `month - 1`.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Timestamp format used for the "Last Updated" column.
pub const UPDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Expiry date with an optional day.
///
/// Field order is the sort order: year, then month, then day, with an
/// absent day ordering before any present day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate {
    year: i32,
    month: i32,
    day: Option<i32>,
}

impl ExpiryDate {
    /// Build an expiry date, rejecting months outside 1-12.
    ///
    /// The day is stored as given; it is only required to be an integer.
    pub fn new(day: Option<i32>, month: i32, year: i32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::MonthOutOfRange(month));
        }
        Ok(Self { year, month, day })
    }

    /// Parse the three raw answers an operator types in.
    ///
    /// Inputs are trimmed. An empty day means "no day"; anything else must
    /// parse as an integer.
    ///
    /// # Example
    /// ```
    /// use pantryctl_core::ExpiryDate;
    ///
    /// let date = ExpiryDate::parse("", "5", "2024").unwrap();
    /// assert_eq!(date.to_string(), "May 2024");
    /// assert!(ExpiryDate::parse("x", "5", "2024").is_err());
    /// ```
    pub fn parse(day: &str, month: &str, year: &str) -> Result<Self, ValidationError> {
        let day = day.trim();
        let day = if day.is_empty() {
            None
        } else {
            Some(parse_int("expiry day", day)?)
        };
        let month = parse_int("expiry month", month)?;
        let year = parse_int("expiry year", year)?;
        Self::new(day, month, year)
    }

    pub fn day(&self) -> Option<i32> {
        self.day
    }

    pub fn month(&self) -> i32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Three-letter month abbreviation.
    pub fn month_abbreviation(&self) -> &'static str {
        // month is checked to be 1..=12 at construction
        MONTH_ABBREVIATIONS[(self.month - 1) as usize]
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            Some(day) => write!(f, "{} {} {}", day, self.month_abbreviation(), self.year),
            None => write!(f, "{} {}", self.month_abbreviation(), self.year),
        }
    }
}

/// Parse a trimmed integer field, naming the field on failure.
pub fn parse_int(field: &'static str, raw: &str) -> Result<i32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    raw.parse::<i32>().map_err(|_| ValidationError::NotANumber {
        field,
        value: raw.to_owned(),
    })
}

/// Validated item name (non-empty after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemName(String);

impl ItemName {
    /// The name is kept as typed; only blank names are rejected.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Everything needed to create an item; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: ItemName,
    pub expiry: ExpiryDate,
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub expiry: ExpiryDate,
    /// UTC wall-clock time of the last create or update
    pub updated_at: NaiveDateTime,
}

impl Item {
    pub fn updated_at_display(&self) -> String {
        self.updated_at.format(UPDATED_AT_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_with_and_without_day() {
        let with_day = ExpiryDate::new(Some(20), 7, 2024).unwrap();
        assert_eq!(with_day.to_string(), "20 Jul 2024");

        let without_day = ExpiryDate::new(None, 5, 2024).unwrap();
        assert_eq!(without_day.to_string(), "May 2024");
    }

    #[test]
    fn every_month_has_an_abbreviation() {
        for month in 1..=12 {
            let date = ExpiryDate::new(None, month, 2025).unwrap();
            assert_eq!(date.month_abbreviation(), MONTH_ABBREVIATIONS[(month - 1) as usize]);
        }
        assert_eq!(ExpiryDate::new(None, 1, 2025).unwrap().month_abbreviation(), "Jan");
        assert_eq!(ExpiryDate::new(None, 12, 2025).unwrap().month_abbreviation(), "Dec");
    }

    #[test]
    fn rejects_month_out_of_range() {
        assert_eq!(
            ExpiryDate::new(None, 0, 2024),
            Err(ValidationError::MonthOutOfRange(0))
        );
        assert_eq!(
            ExpiryDate::new(Some(1), 13, 2024),
            Err(ValidationError::MonthOutOfRange(13))
        );
    }

    #[test]
    fn parse_treats_blank_day_as_absent() {
        let date = ExpiryDate::parse("   ", " 6 ", "2024").unwrap();
        assert_eq!(date.day(), None);
        assert_eq!(date.month(), 6);
        assert_eq!(date.year(), 2024);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            ExpiryDate::parse("15th", "6", "2024"),
            Err(ValidationError::NotANumber { field: "expiry day", .. })
        ));
        assert!(matches!(
            ExpiryDate::parse("", "", "2024"),
            Err(ValidationError::Empty { field: "expiry month" })
        ));
        assert!(matches!(
            ExpiryDate::parse("", "6", "next year"),
            Err(ValidationError::NotANumber { field: "expiry year", .. })
        ));
    }

    #[test]
    fn day_is_not_range_checked() {
        let date = ExpiryDate::parse("42", "2", "2024").unwrap();
        assert_eq!(date.to_string(), "42 Feb 2024");
    }

    #[test]
    fn absent_day_sorts_first_within_month() {
        let no_day = ExpiryDate::new(None, 6, 2024).unwrap();
        let first = ExpiryDate::new(Some(1), 6, 2024).unwrap();
        let earlier_month = ExpiryDate::new(Some(30), 5, 2024).unwrap();
        assert!(no_day < first);
        assert!(earlier_month < no_day);
    }

    #[test]
    fn item_name_rejects_blank() {
        assert!(ItemName::new("").is_err());
        assert!(ItemName::new("  \t").is_err());
        assert_eq!(ItemName::new("Milk").unwrap().as_str(), "Milk");
    }

    #[test]
    fn updated_at_renders_without_fraction() {
        let item = Item {
            id: 1,
            name: "Milk".to_string(),
            expiry: ExpiryDate::new(None, 5, 2024).unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2024, 4, 30)
                .unwrap()
                .and_hms_milli_opt(9, 5, 7, 321)
                .unwrap(),
        };
        assert_eq!(item.updated_at_display(), "2024-04-30 09:05:07");
    }
}
