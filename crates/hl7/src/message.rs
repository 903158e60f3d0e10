//! Whole-message parsing.

use crate::observation::ObservationRecord;
use crate::patient::Patient;
use crate::segment::Segment;
use crate::{Hl7Result, ParseError};

/// Parser output: patient demographics plus observations in message order.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedMessage {
    pub patient: Patient,
    pub results: Vec<ObservationRecord>,
}

/// Normalize all line-ending forms (`\r\n`, `\r`, `\n`) to `\n`.
///
/// [`parse`] only splits on `\n`; request and file boundaries call this
/// before handing text to the parser.
pub fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Parse a line-ending-normalized message into patient and observations.
///
/// Blank lines are discarded. The first segment whose identifier is `PID`
/// supplies the demographics; every `OBX` segment contributes at most one
/// observation record, in message order.
///
/// # Errors
///
/// Returns [`ParseError::MissingPatientSegment`] when no `PID` segment is
/// present. This is the only fatal condition: malformed individual fields
/// degrade to empty values or skipped records instead.
pub fn parse(text: &str) -> Hl7Result<ParsedMessage> {
    let segments: Vec<Segment> = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(Segment::parse)
        .collect();

    let pid = segments
        .iter()
        .find(|segment| segment.id() == "PID")
        .ok_or(ParseError::MissingPatientSegment)?;
    let patient = Patient::from_pid(pid);

    let results = segments
        .iter()
        .filter(|segment| segment.id() == "OBX")
        .filter_map(ObservationRecord::from_obx)
        .collect();

    Ok(ParsedMessage { patient, results })
}
