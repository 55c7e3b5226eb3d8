//! Members of a class, interface or structural typedef.

/// A single argument of a method or enum constructor.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Argument {
    pub name: String,
    /// Raw source type, if annotated. Resolution happens at emit time.
    pub ty: Option<String>,
    /// `?name` in the source.
    pub is_optional: bool,
    /// `= expr`, whitespace squeezed out.
    pub default_value: Option<String>,
}

impl Argument {
    /// Argument with just a name, no annotation.
    pub fn named(name: impl Into<String>) -> Self {
        Argument {
            name: name.into(),
            ..Argument::default()
        }
    }

    /// Argument with a name and a type annotation.
    pub fn typed(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Argument {
            name: name.into(),
            ty: Some(ty.into()),
            ..Argument::default()
        }
    }
}

/// A member of an open container.
///
/// Visibility is decided by the scanner (members default to private
/// without an explicit `public`, except in extern classes and
/// typedefs); the emitter simply skips private members.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Member {
    Property {
        name: String,
        ty: Option<String>,
        is_static: bool,
        is_private: bool,
        default_value: Option<String>,
        comment: Option<String>,
    },
    Method {
        name: String,
        arguments: Vec<Argument>,
        return_type: Option<String>,
        is_static: bool,
        is_private: bool,
        comment: Option<String>,
    },
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Property { name, .. } | Member::Method { name, .. } => name,
        }
    }

    pub fn is_private(&self) -> bool {
        match self {
            Member::Property { is_private, .. } | Member::Method { is_private, .. } => *is_private,
        }
    }
}
