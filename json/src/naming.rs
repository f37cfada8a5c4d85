//! Property name conventions applied by the [crate::TextBuilder].

use heck::{
    AsKebabCase, AsLowerCamelCase, AsShoutyKebabCase, AsShoutySnakeCase, AsSnakeCase,
    AsUpperCamelCase,
};
use std::borrow::Cow;

/// How a property name is transformed before it is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NamingPolicy {
    /// Written as given.
    #[default]
    Preserve,
    /// `fieldName`
    CamelCase,
    /// `FieldName`
    PascalCase,
    /// `field_name`
    SnakeCase,
    /// `FIELD_NAME`
    ScreamingSnakeCase,
    /// `field-name`
    KebabCase,
    /// `FIELD-NAME`
    ScreamingKebabCase,
    /// `FIELDNAME`
    UpperCase,
    /// `fieldname`
    LowerCase,
}

impl NamingPolicy {
    /// Applies the policy to `name`, borrowing it when the result is unchanged.
    pub fn apply(self, name: &str) -> Cow<'_, str> {
        let converted = match self {
            NamingPolicy::Preserve => return Cow::Borrowed(name),
            NamingPolicy::CamelCase => AsLowerCamelCase(name).to_string(),
            NamingPolicy::PascalCase => AsUpperCamelCase(name).to_string(),
            NamingPolicy::SnakeCase => AsSnakeCase(name).to_string(),
            NamingPolicy::ScreamingSnakeCase => AsShoutySnakeCase(name).to_string(),
            NamingPolicy::KebabCase => AsKebabCase(name).to_string(),
            NamingPolicy::ScreamingKebabCase => AsShoutyKebabCase(name).to_string(),
            NamingPolicy::UpperCase => name.to_uppercase(),
            NamingPolicy::LowerCase => name.to_lowercase(),
        };
        if converted == name {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(converted)
        }
    }
}
