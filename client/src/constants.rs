//! Static lookup tables: status labels, weekday options, pagination defaults.
//!
//! Defined once, never mutated. Enums carry the numeric code the backend uses
//! so they can be interpolated into paths and query strings directly.

use std::fmt;

use serde::Serialize;

/// Label returned for codes with no entry in a table.
pub const UNKNOWN_LABEL: &str = "Unknown";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

/// One entry of a select-style option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: u8,
    pub label: &'static str,
}

// =============================================================================
// COURSE STATUS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseStatus {
    NotStarted,
    InProgress,
    Finished,
    Cancelled,
}

impl CourseStatus {
    pub const ALL: [Self; 4] = [Self::NotStarted, Self::InProgress, Self::Finished, Self::Cancelled];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::InProgress => 1,
            Self::Finished => 2,
            Self::Cancelled => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Finished => "Finished",
            Self::Cancelled => "Cancelled",
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|status| i64::from(status.code()) == code)
    }
}

// =============================================================================
// POST STATUS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostStatus {
    Draft,
    Published,
    Hidden,
}

impl PostStatus {
    pub const ALL: [Self; 3] = [Self::Draft, Self::Published, Self::Hidden];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Draft => 0,
            Self::Published => 1,
            Self::Hidden => 2,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Hidden => "Hidden",
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|status| i64::from(status.code()) == code)
    }
}

// =============================================================================
// WEEKDAY
// =============================================================================

/// ISO weekday, Monday = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
            Self::Sunday => 7,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|day| i64::from(day.code()) == code)
    }
}

/// Weekday select options in display order.
pub const WEEKDAY_OPTIONS: [SelectOption; 7] = [
    SelectOption { value: 1, label: "Monday" },
    SelectOption { value: 2, label: "Tuesday" },
    SelectOption { value: 3, label: "Wednesday" },
    SelectOption { value: 4, label: "Thursday" },
    SelectOption { value: 5, label: "Friday" },
    SelectOption { value: 6, label: "Saturday" },
    SelectOption { value: 7, label: "Sunday" },
];

// =============================================================================
// SHARED
// =============================================================================

macro_rules! display_as_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_as_label!(CourseStatus, PostStatus, Weekday);

/// Label for a raw course status code; [`UNKNOWN_LABEL`] when unmapped.
#[must_use]
pub fn course_status_label(code: i64) -> &'static str {
    CourseStatus::from_code(code).map_or(UNKNOWN_LABEL, CourseStatus::label)
}

/// Label for a raw post status code; [`UNKNOWN_LABEL`] when unmapped.
#[must_use]
pub fn post_status_label(code: i64) -> &'static str {
    PostStatus::from_code(code).map_or(UNKNOWN_LABEL, PostStatus::label)
}

/// Option list derived from a status table, for pickers.
#[must_use]
pub fn course_status_options() -> Vec<SelectOption> {
    CourseStatus::ALL
        .into_iter()
        .map(|status| SelectOption { value: status.code(), label: status.label() })
        .collect()
}

#[must_use]
pub fn post_status_options() -> Vec<SelectOption> {
    PostStatus::ALL
        .into_iter()
        .map(|status| SelectOption { value: status.code(), label: status.label() })
        .collect()
}

/// Clamp a requested page size to the nearest allowed option at or above it,
/// or the largest option.
#[must_use]
pub fn normalize_page_size(requested: u32) -> u32 {
    PAGE_SIZE_OPTIONS
        .into_iter()
        .find(|size| *size >= requested)
        .unwrap_or(PAGE_SIZE_OPTIONS[PAGE_SIZE_OPTIONS.len() - 1])
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod tests;
