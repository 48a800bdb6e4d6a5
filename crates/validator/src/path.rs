//! Location of the value currently under evaluation

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Field(&'a str),
    Index(usize),
}

/// Path from the validated root, rendered as `$.nested[1].something`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FieldPath<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> FieldPath<'a> {
    pub(crate) fn root() -> Self {
        Self::default()
    }

    pub(crate) fn push_field(&mut self, name: &'a str) {
        self.segments.push(Segment::Field(name));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
