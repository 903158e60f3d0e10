//! Patient demographics from the `PID` segment.
//!
//! Field mapping (components are `^`-separated within a field):
//! - field 3, component 0 → patient identifier
//! - field 5 → name, reordered given-name-first
//! - field 7 → date of birth, `YYYYMMDD` reformatted to `YYYY-MM-DD`
//! - field 8 → gender code, verbatim
//! - field 11 → address, components joined with `", "`
//! - field 13, component 0 → phone
//!
//! Missing fields degrade to empty values; nothing here is fatal.

use crate::none_if_empty;
use crate::segment::Segment;

/// Patient demographics, built once per message and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    /// Identifier from the first component of PID field 3.
    pub patient_id: String,

    /// Full name, given name first.
    pub patient_name: String,

    /// ISO `YYYY-MM-DD` when the source carried an 8-character `YYYYMMDD`
    /// token; any other form (including empty) is passed through unchanged.
    pub date_of_birth: String,

    /// Gender code, verbatim from the message.
    pub gender: String,

    /// Address components joined with `", "`, empty components dropped.
    pub address: Option<String>,

    /// Phone number from the first component of PID field 13.
    pub phone: Option<String>,
}

impl Patient {
    /// Build patient demographics from a `PID` segment.
    pub fn from_pid(segment: &Segment) -> Self {
        Patient {
            patient_id: segment.component(3, 0).to_string(),
            patient_name: format_name(segment.field(5)),
            date_of_birth: format_birth_date(segment.field(7)),
            gender: segment.field(8).to_string(),
            address: none_if_empty(&format_address(segment.field(11))),
            phone: none_if_empty(segment.component(13, 0)),
        }
    }
}

/// Reorder a `family^given` name field as `"given family"`, trimmed.
fn format_name(field: &str) -> String {
    let mut components = field.split('^');
    let family = components.next().unwrap_or("");
    let given = components.next().unwrap_or("");
    format!("{given} {family}").trim().to_string()
}

/// Reformat an 8-character `YYYYMMDD` token as `YYYY-MM-DD`.
///
/// Any other length or shape is passed through unchanged, empty included.
fn format_birth_date(raw: &str) -> String {
    if raw.len() == 8 {
        if let (Some(year), Some(month), Some(day)) = (raw.get(0..4), raw.get(4..6), raw.get(6..8)) {
            return format!("{year}-{month}-{day}");
        }
    }
    raw.to_string()
}

/// Join address components with `", "`, dropping empty components.
fn format_address(field: &str) -> String {
    field
        .split('^')
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
