use std::fmt;

/// Caller error raised by a drawing or state-changing operation.
///
/// Every operation validates its inputs before touching any state, so a
/// returned error means nothing changed.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawError {
    /// Non-positive canvas dimension, or a shape smaller than one device pixel.
    InvalidSize(String),
    /// Wrong component count, non-integer or out-of-range component.
    InvalidColor(String),
    InvalidPenRadius(String),
    /// Malformed argument: odd polygon coordinates, bad extent, bad font size.
    InvalidArgument(String),
    /// Font name or data the font system does not recognize.
    InvalidFont(String),
    /// The operation exists but is not implemented.
    Unsupported(String),
}

impl DrawError {
    pub(crate) fn invalid_size(msg: impl Into<String>) -> Self {
        Self::InvalidSize(msg.into())
    }

    pub(crate) fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// The human-readable detail without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            DrawError::InvalidSize(m)
            | DrawError::InvalidColor(m)
            | DrawError::InvalidPenRadius(m)
            | DrawError::InvalidArgument(m)
            | DrawError::InvalidFont(m)
            | DrawError::Unsupported(m) => m,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            DrawError::InvalidSize(_) => "invalid size",
            DrawError::InvalidColor(_) => "invalid color",
            DrawError::InvalidPenRadius(_) => "invalid pen radius",
            DrawError::InvalidArgument(_) => "invalid argument",
            DrawError::InvalidFont(_) => "invalid font",
            DrawError::Unsupported(_) => "unsupported",
        }
    }
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for DrawError {}

/// Shorthand for results of drawing operations.
pub type DrawResult<T> = Result<T, DrawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_kind() {
        let e = DrawError::invalid_argument("must provide an even number of points");
        assert_eq!(e.to_string(), "invalid argument: must provide an even number of points");
        assert_eq!(e.message(), "must provide an even number of points");
    }

    #[test]
    fn converts_into_anyhow() {
        let e: anyhow::Error = DrawError::Unsupported("font listing".into()).into();
        assert!(e.to_string().starts_with("unsupported"));
    }
}
