//! Values stored in the metadata sink.

/// The kind of value a metadata entry holds.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub enum MetadataValue {
    /// Free text, already decoded from the chunk's bytes.
    Text(String),

    /// A whole number.
    Integer(i64),

    /// A real number. Ratios (like an F-number) are stored this way.
    Real(f64),
}

impl MetadataValue {
    /// Returns the text inside, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(t) => Some(t.as_str()),
            MetadataValue::Integer(_) | MetadataValue::Real(_) => None,
        }
    }

    /// Returns the integer inside, if this is an `Integer` value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(i) => Some(*i),
            MetadataValue::Text(_) | MetadataValue::Real(_) => None,
        }
    }

    /// Returns the number inside as an `f64`, for either numeric kind.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            MetadataValue::Real(r) => Some(*r),
            MetadataValue::Integer(i) => Some(*i as f64),
            MetadataValue::Text(_) => None,
        }
    }
}

impl core::fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MetadataValue::Text(t) => f.write_str(t),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Real(r) => write!(f, "{r}"),
        }
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<u16> for MetadataValue {
    fn from(value: u16) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}
