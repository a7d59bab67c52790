//! Field declarations
//!
//! A field definition names a record field, its type and a handful of
//! options. Options are resolved eagerly against the chosen type: defaults
//! are filled in and options the type does not understand are rejected
//! before anything is built.

use dedupx_core::{Error, Result};
use dedupx_similarity::Comparators;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::variant::FieldTypeVariant;

/// Declared type of a string field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Short, fixed-format strings: codes, names, phone numbers
    ShortString,
    /// General strings, where whole-field token similarity also matters
    String,
    /// Free text and documents
    Text,
}

impl FieldType {
    pub const ALL: [FieldType; 3] = [FieldType::ShortString, FieldType::String, FieldType::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::ShortString => "ShortString",
            FieldType::String => "String",
            FieldType::Text => "Text",
        }
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| Error::UnknownFieldType(value.to_string()))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options accepted when declaring a field
///
/// Every option is optional; which ones are allowed depends on the type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// Display alias, defaults to the field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Use the CRF edit distance instead of affine gap (ShortString, String)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crf: Option<bool>,

    /// Whether index predicates drop stop words, default true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_stop_words: Option<bool>,

    /// Documents the cosine comparator learns term weights from (Text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus: Option<Vec<String>>,

    /// Whether records may lack a value for this field, default false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_missing: Option<bool>,
}

impl FieldOptions {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_crf(mut self, crf: bool) -> Self {
        self.crf = Some(crf);
        self
    }

    pub fn with_stop_words(mut self, use_stop_words: bool) -> Self {
        self.use_stop_words = Some(use_stop_words);
        self
    }

    pub fn with_corpus<I, S>(mut self, corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.corpus = Some(corpus.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_missing(mut self, has_missing: bool) -> Self {
        self.has_missing = Some(has_missing);
        self
    }

    /// Fill in defaults and check every option against `field_type`
    pub fn resolve(&self, field: &str, field_type: FieldType) -> Result<ResolvedOptions> {
        if field.trim().is_empty() {
            return Err(Error::InvalidConfig("field name cannot be empty".to_string()));
        }

        let name = match &self.name {
            Some(name) if name.trim().is_empty() => {
                return Err(Error::InvalidConfig(format!(
                    "alias of field '{}' cannot be empty",
                    field
                )));
            }
            Some(name) => name.clone(),
            None => field.to_string(),
        };

        let invalid = |option: &str| Error::InvalidOption {
            field: field.to_string(),
            option: option.to_string(),
            field_type: field_type.to_string(),
        };

        let use_stop_words = self.use_stop_words.unwrap_or(true);

        let variant = match field_type {
            FieldType::ShortString | FieldType::String => {
                if self.corpus.is_some() {
                    return Err(invalid("corpus"));
                }
                VariantOptions::Edit(StringOptions {
                    crf: self.crf.unwrap_or(false),
                    use_stop_words,
                })
            }
            FieldType::Text => {
                if self.crf.is_some() {
                    return Err(invalid("crf"));
                }
                VariantOptions::Text(TextOptions {
                    use_stop_words,
                    corpus: self.corpus.clone().unwrap_or_default(),
                })
            }
        };

        Ok(ResolvedOptions {
            name,
            has_missing: self.has_missing.unwrap_or(false),
            variant,
        })
    }
}

/// Options of the edit-distance string types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringOptions {
    pub crf: bool,
    pub use_stop_words: bool,
}

/// Options of the text type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    pub use_stop_words: bool,
    pub corpus: Vec<String>,
}

/// Type-specific options after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantOptions {
    /// ShortString and String
    Edit(StringOptions),
    Text(TextOptions),
}

impl VariantOptions {
    pub fn use_stop_words(&self) -> bool {
        match self {
            VariantOptions::Edit(options) => options.use_stop_words,
            VariantOptions::Text(options) => options.use_stop_words,
        }
    }
}

/// Field options with every default filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub name: String,
    pub has_missing: bool,
    pub variant: VariantOptions,
}

/// A field declaration as it appears in a data model document
///
/// ```json
/// {"field": "company", "type": "String", "crf": true}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Record field the values are read from
    pub field: String,

    /// Type name: `ShortString`, `String` or `Text`
    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(flatten)]
    pub options: FieldOptions,

    /// Keys that are not a known option, rejected on declaration
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl FieldDefinition {
    pub fn new(field: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            field_type: field_type.into(),
            options: FieldOptions::default(),
            unknown: BTreeMap::new(),
        }
    }

    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse the type name and resolve the options against it
    pub fn resolve(&self) -> Result<(FieldType, ResolvedOptions)> {
        let field_type: FieldType = self.field_type.parse()?;

        if let Some(option) = self.unknown.keys().next() {
            return Err(Error::InvalidOption {
                field: self.field.clone(),
                option: option.clone(),
                field_type: field_type.to_string(),
            });
        }

        let resolved = self.options.resolve(&self.field, field_type)?;
        Ok((field_type, resolved))
    }

    /// Declare this field against the shared comparators
    pub fn declare(&self, comparators: &Comparators) -> Result<FieldTypeVariant> {
        let (field_type, resolved) = self.resolve()?;
        FieldTypeVariant::build(&self.field, field_type, resolved, comparators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_parsing() {
        assert_eq!("ShortString".parse::<FieldType>().unwrap(), FieldType::ShortString);
        assert_eq!("String".parse::<FieldType>().unwrap(), FieldType::String);
        assert_eq!("Text".parse::<FieldType>().unwrap(), FieldType::Text);

        let err = "Price".parse::<FieldType>().unwrap_err();
        assert!(matches!(err, Error::UnknownFieldType(ref t) if t == "Price"));
        assert!("text".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_defaults() {
        let resolved = FieldOptions::default()
            .resolve("name", FieldType::ShortString)
            .unwrap();
        assert_eq!(resolved.name, "name");
        assert!(!resolved.has_missing);
        assert_eq!(
            resolved.variant,
            VariantOptions::Edit(StringOptions {
                crf: false,
                use_stop_words: true
            })
        );

        let text = FieldOptions::default().resolve("bio", FieldType::Text).unwrap();
        assert_eq!(
            text.variant,
            VariantOptions::Text(TextOptions {
                use_stop_words: true,
                corpus: Vec::new()
            })
        );
    }

    #[test]
    fn test_explicit_options() {
        let resolved = FieldOptions::default()
            .with_name("Company")
            .with_crf(true)
            .with_stop_words(false)
            .with_missing(true)
            .resolve("company", FieldType::String)
            .unwrap();
        assert_eq!(resolved.name, "Company");
        assert!(resolved.has_missing);
        assert!(!resolved.variant.use_stop_words());
        assert!(matches!(resolved.variant, VariantOptions::Edit(StringOptions { crf: true, .. })));
    }

    #[test]
    fn test_crf_rejected_on_text() {
        let err = FieldOptions::default()
            .with_crf(false)
            .resolve("bio", FieldType::Text)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref option, .. } if option == "crf"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_corpus_rejected_on_strings() {
        for field_type in [FieldType::ShortString, FieldType::String] {
            let err = FieldOptions::default()
                .with_corpus(["a document"])
                .resolve("name", field_type)
                .unwrap_err();
            assert!(matches!(err, Error::InvalidOption { ref option, .. } if option == "corpus"));
        }
    }

    #[test]
    fn test_empty_names_rejected() {
        assert!(FieldOptions::default().resolve("", FieldType::String).is_err());
        assert!(FieldOptions::default()
            .with_name(" ")
            .resolve("name", FieldType::String)
            .is_err());
    }

    #[test]
    fn test_definition_from_json() {
        let definition: FieldDefinition = serde_json::from_str(
            r#"{"field": "company", "type": "String", "crf": true, "name": "Company"}"#,
        )
        .unwrap();
        assert_eq!(definition.field, "company");
        assert_eq!(definition.options.crf, Some(true));
        assert!(definition.unknown.is_empty());

        let (field_type, resolved) = definition.resolve().unwrap();
        assert_eq!(field_type, FieldType::String);
        assert_eq!(resolved.name, "Company");
    }

    #[test]
    fn test_unknown_option_rejected() {
        let definition: FieldDefinition =
            serde_json::from_str(r#"{"field": "zip", "type": "ShortString", "weight": 2}"#)
                .unwrap();
        let err = definition.resolve().unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref option, .. } if option == "weight"));
    }

    #[test]
    fn test_unknown_type_rejected_first() {
        let definition = FieldDefinition::new("price", "Price");
        assert!(matches!(definition.resolve(), Err(Error::UnknownFieldType(_))));
    }

    #[test]
    fn test_definition_declare() {
        let definition: FieldDefinition =
            serde_json::from_str(r#"{"field": "company", "type": "String", "crf": true}"#)
                .unwrap();
        let variant = definition.declare(&Comparators::new()).unwrap();
        assert_eq!(variant.field(), "company");
        assert_eq!(variant.field_type(), FieldType::String);
        assert_eq!(variant.predicates().len(), 48);

        let unknown = FieldDefinition::new("price", "Price").declare(&Comparators::new());
        assert!(matches!(unknown, Err(Error::UnknownFieldType(_))));
    }

    #[test]
    fn test_definition_serializes_without_defaults() {
        let definition = FieldDefinition::new("zip", "ShortString");
        let json = serde_json::to_value(&definition).unwrap();
        assert_eq!(json, serde_json::json!({"field": "zip", "type": "ShortString"}));
    }
}
