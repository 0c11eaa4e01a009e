use serde::ser::Serializer;
use serde::Serialize;

/// Placeholder string an unresolved argument slot serializes to.
pub const UNSET_PLACEHOLDER: &str = "<none>";

/// One argument slot of a relation template: either a resolved surface
/// string or an explicit "no value" marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Filled(String),
    Unset,
}

impl Slot {
    pub fn filled(value: impl Into<String>) -> Self {
        Slot::Filled(value.into())
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled(_))
    }

    /// The slot's output form; unset slots render as the placeholder.
    pub fn as_str(&self) -> &str {
        match self {
            Slot::Filled(value) => value,
            Slot::Unset => UNSET_PLACEHOLDER,
        }
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A fixed-arity typed argument tuple representing one instance of a
/// target relation. The first argument is always filled; at least one
/// of the remaining slots is filled as well, enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationTemplate {
    pub relation: String,
    pub args: Vec<Slot>,
}

impl RelationTemplate {
    /// Assemble a template from a mandatory first argument and the
    /// remaining optional slots. Returns `None` when every optional slot
    /// is unset: a template with only arg1 populated is a spurious match,
    /// never emitted.
    pub fn new(relation: impl Into<String>, arg1: String, rest: Vec<Slot>) -> Option<Self> {
        if !rest.iter().any(Slot::is_filled) {
            return None;
        }
        let mut args = Vec::with_capacity(rest.len() + 1);
        args.push(Slot::Filled(arg1));
        args.extend(rest);
        Some(Self {
            relation: relation.into(),
            args,
        })
    }

    /// Argument strings in slot order, with placeholders for unset slots.
    pub fn argument_strings(&self) -> Vec<String> {
        self.args.iter().map(|s| s.as_str().to_string()).collect()
    }
}

/// A (part, whole) pair extracted by the part-whole tuple extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartTuple {
    pub part: String,
    pub whole: String,
}
