use std::fmt;
use thiserror::Error;

/// The timestamp fields of a serialized [`ElapsedTime`](crate::ElapsedTime).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Start,
    Stop,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Start => "start",
            Field::Stop => "stop",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug)]
pub enum ElapsedTimeError {
    #[error("malformed elapsed time record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{field}: {source}")]
    Parse {
        field: Field,
        #[source]
        source: chrono::ParseError,
    },
}

impl ElapsedTimeError {
    /// The timestamp field that failed to parse, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Parse { field, .. } => Some(*field),
            Self::Malformed(_) => None,
        }
    }
}
