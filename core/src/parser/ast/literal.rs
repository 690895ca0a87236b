use serde::{Serialize, Serializer};

use super::NodeKind;

/// Source text of a literal as written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extra {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TemplateElement {
    pub value: TemplateValue,
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateValue {
    pub raw: String,
    pub cooked: String,
}

/// Integral values print without a fractional part, like `1` not `1.0`.
pub(super) fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl NodeKind for TemplateElement {}
