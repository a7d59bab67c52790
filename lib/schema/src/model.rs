//! Data model: the ordered set of declared fields

use dedupx_core::{Error, PredicateDescriptor, Result};
use dedupx_similarity::Comparators;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::schema::{FieldDefinition, FieldType};
use crate::variant::{FieldSummary, FieldTypeVariant};

/// Declared fields in declaration order
#[derive(Debug, Clone)]
pub struct DataModel {
    fields: Vec<FieldTypeVariant>,
}

impl DataModel {
    /// Declare every definition, failing on the first invalid one
    pub fn new(definitions: &[FieldDefinition], comparators: &Comparators) -> Result<Self> {
        if definitions.is_empty() {
            return Err(Error::InvalidConfig(
                "data model must declare at least one field".to_string(),
            ));
        }

        let mut declared: HashSet<(String, FieldType)> = HashSet::new();
        let mut aliases: HashSet<String> = HashSet::new();
        let mut fields = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let variant = definition.declare(comparators)?;

            if !declared.insert((variant.field().to_string(), variant.field_type())) {
                return Err(Error::InvalidConfig(format!(
                    "field '{}' is declared as {} more than once",
                    variant.field(),
                    variant.field_type()
                )));
            }
            if !aliases.insert(variant.name().to_string()) {
                return Err(Error::InvalidConfig(format!(
                    "alias '{}' is used by more than one field, set a distinct 'name'",
                    variant.name()
                )));
            }

            fields.push(variant);
        }

        let model = Self { fields };
        info!(
            "Built data model: {} fields, {} predicates",
            model.fields.len(),
            model.predicate_count()
        );
        Ok(model)
    }

    /// Parse a JSON list of field definitions
    pub fn from_json(json: &str, comparators: &Comparators) -> Result<Self> {
        let definitions: Vec<FieldDefinition> = serde_json::from_str(json)?;
        Self::new(&definitions, comparators)
    }

    pub fn from_path<P: AsRef<Path>>(path: P, comparators: &Comparators) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, comparators)
    }

    pub fn fields(&self) -> &[FieldTypeVariant] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look a field up by its alias
    pub fn field(&self, alias: &str) -> Option<&FieldTypeVariant> {
        self.fields.iter().find(|f| f.name() == alias)
    }

    /// Every predicate of every field, in declaration order
    pub fn predicates(&self) -> impl Iterator<Item = &PredicateDescriptor> {
        self.fields.iter().flat_map(|f| f.predicates().iter())
    }

    pub fn predicate_count(&self) -> usize {
        self.fields.iter().map(|f| f.predicates().len()).sum()
    }

    /// Score two values of the field named `alias`
    pub fn compare(&self, alias: &str, a: &str, b: &str) -> Result<f64> {
        let field = self
            .field(alias)
            .ok_or_else(|| Error::FieldNotFound(alias.to_string()))?;
        Ok(field.compare(a, b))
    }

    /// Score two possibly missing values.
    ///
    /// For fields declared with `has_missing`, a missing value on either side
    /// yields `None` so the caller can impute. Other fields score a missing
    /// value as the empty string.
    pub fn compare_optional(
        &self,
        alias: &str,
        a: Option<&str>,
        b: Option<&str>,
    ) -> Result<Option<f64>> {
        let field = self
            .field(alias)
            .ok_or_else(|| Error::FieldNotFound(alias.to_string()))?;

        match (a, b) {
            (Some(a), Some(b)) => Ok(Some(field.compare(a, b))),
            _ if field.has_missing() => Ok(None),
            (a, b) => Ok(Some(field.compare(a.unwrap_or(""), b.unwrap_or("")))),
        }
    }

    pub fn summaries(&self) -> Vec<FieldSummary> {
        self.fields.iter().map(FieldTypeVariant::summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldOptions;
    use std::io::Write;

    const MODEL: &str = r#"[
        {"field": "name", "type": "ShortString", "crf": true},
        {"field": "company", "type": "String", "has_missing": true},
        {"field": "bio", "type": "Text", "corpus": ["data engineer", "software engineer"]}
    ]"#;

    #[test]
    fn test_from_json() {
        let model = DataModel::from_json(MODEL, &Comparators::new()).unwrap();
        assert_eq!(model.len(), 3);
        assert_eq!(model.predicate_count(), 40 + 48 + 34);
        assert_eq!(model.predicates().count(), model.predicate_count());

        let names: Vec<_> = model.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["name", "company", "bio"]);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MODEL.as_bytes()).unwrap();

        let model = DataModel::from_path(file.path(), &Comparators::new()).unwrap();
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = DataModel::from_path(dir.path().join("absent.json"), &Comparators::new());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = DataModel::from_json("[{\"field\": ", &Comparators::new());
        match result {
            Err(Error::Serialization(err)) => {
                assert!(err.is_eof());
                assert_eq!(err.line(), 1);
            }
            other => panic!("expected a serialization error, got {:?}", other.map(|m| m.len())),
        }
    }

    #[test]
    fn test_empty_model_rejected() {
        let result = DataModel::from_json("[]", &Comparators::new());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_declaration_rejected() {
        let definitions = vec![
            FieldDefinition::new("name", "String"),
            FieldDefinition::new("name", "String")
                .with_options(FieldOptions::default().with_name("other")),
        ];
        let err = DataModel::new(&definitions, &Comparators::new()).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_same_field_under_two_types() {
        let definitions = vec![
            FieldDefinition::new("name", "ShortString"),
            FieldDefinition::new("name", "Text")
                .with_options(FieldOptions::default().with_name("name text")),
        ];
        let model = DataModel::new(&definitions, &Comparators::new()).unwrap();
        assert_eq!(model.field("name").unwrap().field_type(), FieldType::ShortString);
        assert_eq!(model.field("name text").unwrap().field_type(), FieldType::Text);

        // without distinct aliases the lookup would be ambiguous
        let clashing = vec![
            FieldDefinition::new("name", "ShortString"),
            FieldDefinition::new("name", "Text"),
        ];
        let err = DataModel::new(&clashing, &Comparators::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(ref m) if m.contains("alias")));
    }

    #[test]
    fn test_invalid_definition_aborts() {
        let json = r#"[
            {"field": "name", "type": "ShortString"},
            {"field": "bio", "type": "Text", "crf": true}
        ]"#;
        let err = DataModel::from_json(json, &Comparators::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref field, .. } if field == "bio"));
    }

    #[test]
    fn test_crf_shared_across_model() {
        let comparators = Comparators::new();
        let json = r#"[
            {"field": "first", "type": "ShortString", "crf": true},
            {"field": "last", "type": "String", "crf": true}
        ]"#;
        let model = DataModel::from_json(json, &comparators).unwrap();
        let first = model.field("first").unwrap().comparator();
        let last = model.field("last").unwrap().comparator();
        assert!(first.same_instance(last));
        assert!(first.same_instance(&comparators.crf()));
    }

    #[test]
    fn test_compare() {
        let model = DataModel::from_json(MODEL, &Comparators::new()).unwrap();

        let close = model.compare("name", "jonathan", "johnathan").unwrap();
        let far = model.compare("name", "jonathan", "maria").unwrap();
        assert!(close < far);

        let bio = model.compare("bio", "data engineer", "data engineer").unwrap();
        assert!((bio - 1.0).abs() < 1e-9);

        let err = model.compare("email", "a", "b").unwrap_err();
        assert!(matches!(err, Error::FieldNotFound(ref a) if a == "email"));
    }

    #[test]
    fn test_compare_optional() {
        let model = DataModel::from_json(MODEL, &Comparators::new()).unwrap();

        // has_missing: missing on either side is left to the caller
        assert_eq!(model.compare_optional("company", Some("acme"), None).unwrap(), None);
        assert_eq!(model.compare_optional("company", None, None).unwrap(), None);
        assert!(model
            .compare_optional("company", Some("acme"), Some("acme inc"))
            .unwrap()
            .is_some());

        // otherwise a missing value scores as empty
        let scored = model.compare_optional("name", Some("abc"), None).unwrap();
        let expected = dedupx_similarity::CrfEditDistance::default().distance("abc", "");
        assert_eq!(scored, Some(expected));
    }

    #[test]
    fn test_summaries() {
        let model = DataModel::from_json(MODEL, &Comparators::new()).unwrap();
        let summaries = model.summaries();
        assert_eq!(summaries.len(), 3);
        assert!(summaries[1].has_missing);
        assert_eq!(summaries[2].predicate_count, 34);
    }
}
