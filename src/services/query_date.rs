use std::fmt;

use chrono::NaiveDate;

use crate::services::ServiceError;

/// A caller-supplied `YYYY-MM-DD` date, checked for shape and calendar validity.
///
/// Zero padding is required so that the string compares correctly against
/// stored dates.
///
/// ```
/// use climate_api::services::QueryDate;
///
/// assert_eq!(QueryDate::parse("2017-08-23").unwrap().as_str(), "2017-08-23");
/// assert!(QueryDate::parse("2017-8-23").is_err());
/// assert!(QueryDate::parse("2017-02-30").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryDate(String);

impl QueryDate {
    pub fn parse(value: &str) -> Result<Self, ServiceError> {
        let well_formed = value.len() == 10
            && value.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            });

        if !well_formed || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
            return Err(ServiceError::InvalidDate(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for QueryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
