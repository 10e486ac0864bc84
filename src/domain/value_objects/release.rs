//! Release identifier value object

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::error::CutoverError;

const FORMAT: &str = "%Y%m%d%H%M%S";

/// Timestamp token naming one release directory (`YYYYMMDDHHMMSS`)
///
/// Fixed-width digits, so string order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseId(String);

impl ReleaseId {
    /// Release id for the current local time
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self(time.format(FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Backup file name for the shared `.env` archived by this release
    pub fn env_backup_name(&self) -> String {
        format!(".env-{}.bak", self.0)
    }
}

impl FromStr for ReleaseId {
    type Err = CutoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == 14
            && s.bytes().all(|b| b.is_ascii_digit())
            && NaiveDateTime::parse_from_str(s, FORMAT).is_ok();
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(CutoverError::InvalidRelease(s.to_string()))
        }
    }
}

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReleaseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
