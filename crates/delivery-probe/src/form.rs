//! The card delivery form: its fields, DOM contract and valid values.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::locator::Selector;

/// Date format rendered and accepted by the form (`dd.MM.yyyy`)
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Valid full name (Cyrillic letters, space and hyphen)
pub const VALID_NAME: &str = "Иванов Иван-Петр";

/// Valid phone number
pub const VALID_PHONE: &str = "+79998887766";

/// Title of the success notification
pub const SUCCESS_TITLE: &str = "Успешно";

/// Prefix of the success notification body, followed by the date
pub const SUCCESS_MESSAGE_PREFIX: &str = "Встреча успешно забронирована на ";

/// One logical field of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// City (text with autocomplete)
    City,
    /// Meeting date (`dd.MM.yyyy`)
    Date,
    /// Full name
    Name,
    /// Phone number
    Phone,
    /// Agreement checkbox
    Agreement,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Self; 5] = [
        Self::City,
        Self::Date,
        Self::Name,
        Self::Phone,
        Self::Agreement,
    ];

    /// `data-test-id` of the field's container
    #[must_use]
    pub const fn test_id(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Date => "date",
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Agreement => "agreement",
        }
    }

    /// Selector of the element that receives input for this field
    #[must_use]
    pub fn input(self) -> Selector {
        match self {
            Self::City => Selector::placeholder("Город"),
            Self::Date => Selector::placeholder("Дата встречи"),
            Self::Name => Selector::name_attr("name"),
            Self::Phone => Selector::name_attr("phone"),
            Self::Agreement => Selector::css(".checkbox__box"),
        }
    }

    /// Container of the field while it is marked invalid
    #[must_use]
    pub fn invalid_container(self) -> Selector {
        Selector::css(format!("[data-test-id='{}'].input_invalid", self.test_id()))
    }

    /// Error text element shown under an invalid field
    #[must_use]
    pub fn error_text(self) -> Selector {
        Selector::css(format!(
            "[data-test-id='{}'].input_invalid .input__sub",
            self.test_id()
        ))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.test_id())
    }
}

/// Submit button
#[must_use]
pub fn submit_button() -> Selector {
    Selector::css("button.button")
}

/// Title of the post-submit notification
#[must_use]
pub fn notification_title() -> Selector {
    Selector::css(".notification__title")
}

/// Body of the post-submit notification
#[must_use]
pub fn notification_content() -> Selector {
    Selector::css(".notification__content")
}

/// `today + offset_days` formatted as `dd.MM.yyyy`; `None` past the calendar's end
#[must_use]
pub fn meeting_date(today: NaiveDate, offset_days: u32) -> Option<String> {
    today
        .checked_add_days(Days::new(u64::from(offset_days)))
        .map(|date| date.format(DATE_FORMAT).to_string())
}

/// Body text of the success notification for `date`
#[must_use]
pub fn success_message(date: &str) -> String {
    format!("{SUCCESS_MESSAGE_PREFIX}{date}")
}

/// What a scenario expects to observe after submitting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpectedOutcome {
    /// The field is marked invalid; with a message, its error text is shown
    FieldError {
        /// Invalid field
        field: Field,
        /// Expected error text, if the field renders one
        message: Option<String>,
    },
    /// Success notification for the booked date
    Success {
        /// Date as rendered, `dd.MM.yyyy`
        date: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod selectors {
        use super::*;

        #[test]
        fn test_field_inputs_match_dom_contract() {
            assert_eq!(Field::City.input().as_str(), "//input[@placeholder='Город']");
            assert_eq!(
                Field::Date.input().as_str(),
                "//input[@placeholder='Дата встречи']"
            );
            assert_eq!(Field::Name.input().as_str(), "[name='name']");
            assert_eq!(Field::Phone.input().as_str(), "[name='phone']");
            assert_eq!(Field::Agreement.input().as_str(), ".checkbox__box");
        }

        #[test]
        fn test_error_text_selector() {
            assert_eq!(
                Field::City.error_text().as_str(),
                "[data-test-id='city'].input_invalid .input__sub"
            );
        }

        #[test]
        fn test_invalid_container_selector() {
            assert_eq!(
                Field::Agreement.invalid_container().as_str(),
                "[data-test-id='agreement'].input_invalid"
            );
        }

        #[test]
        fn test_form_controls() {
            assert_eq!(submit_button().as_str(), "button.button");
            assert_eq!(notification_title().as_str(), ".notification__title");
            assert_eq!(notification_content().as_str(), ".notification__content");
        }

        #[test]
        fn test_field_serde_names() {
            let json = serde_json::to_string(&Field::Agreement).unwrap();
            assert_eq!(json, "\"agreement\"");
        }
    }

    mod dates {
        use super::*;

        #[test]
        fn test_meeting_date_three_days_ahead() {
            let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
            assert_eq!(meeting_date(today, 3).unwrap(), "21.10.2026");
        }

        #[test]
        fn test_meeting_date_crosses_year() {
            let today = NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();
            assert_eq!(meeting_date(today, 3).unwrap(), "02.01.2027");
        }

        #[test]
        fn test_meeting_date_leap_day() {
            let today = NaiveDate::from_ymd_opt(2028, 2, 27).unwrap();
            assert_eq!(meeting_date(today, 2).unwrap(), "29.02.2028");
        }

        #[test]
        fn test_meeting_date_past_calendar_end() {
            let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
            assert_eq!(meeting_date(today, u32::MAX), None);
            assert_eq!(meeting_date(NaiveDate::MAX, 1), None);
        }

        #[test]
        fn test_success_message() {
            assert_eq!(
                success_message("21.10.2026"),
                "Встреча успешно забронирована на 21.10.2026"
            );
        }

        proptest! {
            #[test]
            fn prop_meeting_date_parses_back(
                days_from_ce in 700_000i32..800_000,
                offset in 0u32..60,
            ) {
                let today = NaiveDate::from_num_days_from_ce_opt(days_from_ce).unwrap();
                let rendered = meeting_date(today, offset).unwrap();
                prop_assert_eq!(rendered.len(), 10);
                let parsed = NaiveDate::parse_from_str(&rendered, DATE_FORMAT).unwrap();
                prop_assert_eq!((parsed - today).num_days(), i64::from(offset));
            }
        }
    }
}
