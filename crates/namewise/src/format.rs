//! Date rendering and output assembly

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Pattern `local_time` must follow.
pub const LOCAL_TIME_PATTERN: &str = "%Y-%m-%d";

/// Separator between the filename and the date.
pub const SEPARATOR: &str = " - ";

/// Supported date renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `YYYYMMDD`
    Compact,
    /// `MMDDYYYY`
    CompactUs,
    /// `YYYY-MM-DD`
    Iso,
    /// `MM-DD-YYYY`
    DashedUs,
}

impl DateFormat {
    /// Every supported format, in the order the client lists them.
    pub const ALL: [DateFormat; 4] = [
        DateFormat::Compact,
        DateFormat::CompactUs,
        DateFormat::Iso,
        DateFormat::DashedUs,
    ];

    /// Token used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::Compact => "YYYYMMDD",
            DateFormat::CompactUs => "MMDDYYYY",
            DateFormat::Iso => "YYYY-MM-DD",
            DateFormat::DashedUs => "MM-DD-YYYY",
        }
    }

    /// `chrono` format string for this rendering.
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Compact => "%Y%m%d",
            DateFormat::CompactUs => "%m%d%Y",
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::DashedUs => "%m-%d-%Y",
        }
    }

    /// Render a date.
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or(ValidationError::InvalidDateFormat)
    }
}

/// Where the date goes relative to the generated filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilenameFormat {
    /// `{filename} - {date}`
    FilenameThenDate,
    /// `{date} - {filename}`
    DateThenFilename,
    /// `{filename}`
    FilenameOnly,
}

impl FilenameFormat {
    /// Every supported template.
    pub const ALL: [FilenameFormat; 3] = [
        FilenameFormat::FilenameThenDate,
        FilenameFormat::DateThenFilename,
        FilenameFormat::FilenameOnly,
    ];

    /// Template string used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilenameFormat::FilenameThenDate => "{filename} - {date}",
            FilenameFormat::DateThenFilename => "{date} - {filename}",
            FilenameFormat::FilenameOnly => "{filename}",
        }
    }

    /// Join a generated filename and a rendered date, trimming the result.
    ///
    /// Only the outer edges of the joined string are trimmed. The date is
    /// dropped for [`FilenameFormat::FilenameOnly`].
    pub fn assemble(&self, filename: &str, date: &str) -> String {
        let assembled = match self {
            FilenameFormat::FilenameThenDate => format!("{filename}{SEPARATOR}{date}"),
            FilenameFormat::DateThenFilename => format!("{date}{SEPARATOR}{filename}"),
            FilenameFormat::FilenameOnly => filename.to_string(),
        };
        assembled.trim().to_string()
    }
}

impl fmt::Display for FilenameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilenameFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or(ValidationError::InvalidFilenameFormat)
    }
}

/// Parse `local_time` strictly as `YYYY-MM-DD`.
pub fn parse_local_time(local_time: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(local_time, LOCAL_TIME_PATTERN)
        .map_err(|_| ValidationError::InvalidLocalTime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn new_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[rstest]
    #[case(DateFormat::Compact, "20240101")]
    #[case(DateFormat::CompactUs, "01012024")]
    #[case(DateFormat::Iso, "2024-01-01")]
    #[case(DateFormat::DashedUs, "01-01-2024")]
    fn test_date_format_rendering(#[case] format: DateFormat, #[case] expected: &str) {
        assert_eq!(format.format(new_year()), expected);
    }

    #[test]
    fn test_date_format_parse_round_trips_tokens() {
        for format in DateFormat::ALL {
            assert_eq!(format.as_str().parse::<DateFormat>(), Ok(format));
        }
    }

    #[rstest]
    #[case("")]
    #[case("yyyymmdd")]
    #[case("DD-MM-YYYY")]
    #[case(" YYYYMMDD")]
    fn test_unknown_date_format(#[case] token: &str) {
        assert_eq!(
            token.parse::<DateFormat>(),
            Err(ValidationError::InvalidDateFormat)
        );
    }

    #[rstest]
    #[case("")]
    #[case("{filename}-{date}")]
    #[case("{date}")]
    fn test_unknown_filename_format(#[case] template: &str) {
        assert_eq!(
            template.parse::<FilenameFormat>(),
            Err(ValidationError::InvalidFilenameFormat)
        );
    }

    #[rstest]
    #[case(FilenameFormat::DateThenFilename, "20240101 - Doc")]
    #[case(FilenameFormat::FilenameThenDate, "Doc - 20240101")]
    #[case(FilenameFormat::FilenameOnly, "Doc")]
    fn test_assemble(#[case] format: FilenameFormat, #[case] expected: &str) {
        assert_eq!(format.assemble("Doc", "20240101"), expected);
    }

    #[test]
    fn test_assemble_trims_outer_edges_only() {
        assert_eq!(
            FilenameFormat::FilenameThenDate.assemble("Doc\n", "20240101"),
            "Doc\n - 20240101"
        );
        assert_eq!(
            FilenameFormat::DateThenFilename.assemble(" Doc\n", "20240101"),
            "20240101 -  Doc"
        );
        assert_eq!(
            FilenameFormat::FilenameThenDate.assemble("  Doc", "2024-01-01"),
            "Doc - 2024-01-01"
        );

        let only = FilenameFormat::FilenameOnly.assemble("\t Report - Q3 \n", "ignored");
        assert_eq!(only, "Report - Q3");
    }

    #[rstest]
    #[case("2024-02-30")]
    #[case("2024-13-01")]
    #[case("01-01-2024")]
    #[case("2024/01/01")]
    #[case("not a date")]
    fn test_parse_local_time_rejects(#[case] input: &str) {
        assert_eq!(parse_local_time(input), Err(ValidationError::InvalidLocalTime));
    }

    #[test]
    fn test_parse_local_time_leap_day() {
        assert_eq!(
            parse_local_time("2024-02-29"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }
}
