//! Segment-level tokenization.
//!
//! A segment is one line of the message, tagged by its first field (`PID`,
//! `OBX`, ...). Fields are `|`-separated; within a field, components are
//! `^`-separated. There is no escaping: delimiter characters are literal.

/// One tokenized message segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    fields: Vec<String>,
}

impl Segment {
    /// Tokenize a single line into fields.
    pub fn parse(line: &str) -> Self {
        Segment {
            fields: line.split('|').map(str::to_string).collect(),
        }
    }

    /// The segment identifier (the first field), e.g. `PID` or `OBX`.
    pub fn id(&self) -> &str {
        self.field(0)
    }

    /// Field at `index`, or the empty string when the segment is too short.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// Component `component` of field `field`, or the empty string.
    pub fn component(&self, field: usize, component: usize) -> &str {
        self.field(field).split('^').nth(component).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_fields_on_pipe() {
        let segment = Segment::parse("OBX|1|NM|GLU^Glucose");
        assert_eq!(segment.id(), "OBX");
        assert_eq!(segment.field(1), "1");
        assert_eq!(segment.field(3), "GLU^Glucose");
    }

    #[test]
    fn out_of_bounds_fields_are_empty() {
        let segment = Segment::parse("OBX|1");
        assert_eq!(segment.field(7), "");
        assert_eq!(segment.component(7, 0), "");
    }

    #[test]
    fn splits_components_on_caret() {
        let segment = Segment::parse("PID|||12345^^MRN||Smith^John");
        assert_eq!(segment.component(3, 0), "12345");
        assert_eq!(segment.component(3, 2), "MRN");
        assert_eq!(segment.component(5, 1), "John");
    }
}
