//! The five form scenarios.
//!
//! Each scenario fills four fields validly and makes exactly one field
//! defective, either by overriding it with an invalid value or by leaving
//! it untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::form::{ExpectedOutcome, Field};

/// City the application does not deliver to
pub const INVALID_CITY: &str = "Ура";

/// Name in Latin script
pub const INVALID_NAME: &str = "John Smith";

/// Phone number that is too short
pub const INVALID_PHONE: &str = "12345";

/// Error shown for an unsupported city
pub const CITY_ERROR: &str = "Доставка в выбранный город недоступна";

/// Error shown for a name outside the allowed alphabet
pub const NAME_ERROR: &str =
    "Имя и Фамилия указаные неверно. Допустимы только русские буквы, пробелы и дефисы.";

/// Error shown for a malformed phone number
pub const PHONE_ERROR: &str = "Телефон указан неверно";

/// One independent end-to-end case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Unsupported city is rejected
    InvalidCity,
    /// Latin name is rejected
    InvalidName,
    /// Short phone is rejected
    InvalidPhone,
    /// Unchecked agreement is rejected
    RejectUnchecked,
    /// Fully valid form is booked
    SubmitFormSuccessfully,
}

impl Scenario {
    /// Every scenario, in run order
    pub const ALL: [Self; 5] = [
        Self::InvalidCity,
        Self::InvalidName,
        Self::InvalidPhone,
        Self::RejectUnchecked,
        Self::SubmitFormSuccessfully,
    ];

    /// Stable name used in reports and on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InvalidCity => "invalid_city",
            Self::InvalidName => "invalid_name",
            Self::InvalidPhone => "invalid_phone",
            Self::RejectUnchecked => "reject_unchecked",
            Self::SubmitFormSuccessfully => "submit_form_successfully",
        }
    }

    /// Field left out of the valid fill
    #[must_use]
    pub const fn skip_field(self) -> Option<Field> {
        match self {
            Self::InvalidCity => Some(Field::City),
            Self::InvalidName => Some(Field::Name),
            Self::InvalidPhone => Some(Field::Phone),
            Self::RejectUnchecked => Some(Field::Agreement),
            Self::SubmitFormSuccessfully => None,
        }
    }

    /// Invalid value written into the skipped field, if any
    #[must_use]
    pub const fn defect(self) -> Option<(Field, &'static str)> {
        match self {
            Self::InvalidCity => Some((Field::City, INVALID_CITY)),
            Self::InvalidName => Some((Field::Name, INVALID_NAME)),
            Self::InvalidPhone => Some((Field::Phone, INVALID_PHONE)),
            Self::RejectUnchecked | Self::SubmitFormSuccessfully => None,
        }
    }

    /// What must be observed after submit; `date` is the valid meeting date
    #[must_use]
    pub fn expected_outcome(self, date: &str) -> ExpectedOutcome {
        let field_error = |field, message: &str| ExpectedOutcome::FieldError {
            field,
            message: Some(message.to_string()),
        };
        match self {
            Self::InvalidCity => field_error(Field::City, CITY_ERROR),
            Self::InvalidName => field_error(Field::Name, NAME_ERROR),
            Self::InvalidPhone => field_error(Field::Phone, PHONE_ERROR),
            Self::RejectUnchecked => ExpectedOutcome::FieldError {
                field: Field::Agreement,
                message: None,
            },
            Self::SubmitFormSuccessfully => ExpectedOutcome::Success {
                date: date.to_string(),
            },
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == wanted)
            .ok_or_else(|| format!("unknown scenario: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_defective_field_per_scenario() {
        for scenario in Scenario::ALL {
            let outcome = scenario.expected_outcome("21.10.2026");
            match (scenario.skip_field(), outcome) {
                (Some(skipped), ExpectedOutcome::FieldError { field, .. }) => {
                    assert_eq!(skipped, field, "{scenario}");
                }
                (None, ExpectedOutcome::Success { date }) => assert_eq!(date, "21.10.2026"),
                (skip, outcome) => panic!("{scenario}: skip {skip:?} vs {outcome:?}"),
            }
        }
    }

    #[test]
    fn test_defect_targets_skipped_field() {
        for scenario in Scenario::ALL {
            if let Some((field, _)) = scenario.defect() {
                assert_eq!(scenario.skip_field(), Some(field));
            }
        }
    }

    #[test]
    fn test_agreement_has_no_message() {
        assert_eq!(
            Scenario::RejectUnchecked.expected_outcome("x"),
            ExpectedOutcome::FieldError {
                field: Field::Agreement,
                message: None
            }
        );
    }

    #[test]
    fn test_names_round_trip_through_from_str() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
        }
        assert_eq!(
            "Invalid-City".parse::<Scenario>().unwrap(),
            Scenario::InvalidCity
        );
        assert!("invalid_date".parse::<Scenario>().is_err());
    }

    #[test]
    fn test_error_texts() {
        assert_eq!(CITY_ERROR, "Доставка в выбранный город недоступна");
        assert_eq!(PHONE_ERROR, "Телефон указан неверно");
        assert!(NAME_ERROR.ends_with("пробелы и дефисы."));
    }
}
