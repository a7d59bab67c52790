// Integration tests for DedupX
use dedupx::prelude::*;
use dedupx::{IndexPredicateKind, VariantSpec};
use std::collections::HashSet;
use std::io::Write;

const CUSTOMERS: &str = r#"[
    {"field": "name", "type": "ShortString", "crf": true},
    {"field": "phone", "type": "ShortString", "name": "Phone Number", "use_stop_words": false},
    {"field": "address", "type": "String", "has_missing": true},
    {"field": "notes", "type": "Text", "corpus": [
        "prefers email contact",
        "prefers phone contact",
        "key account, prefers email"
    ]}
]"#;

#[test]
fn test_declare_every_type() {
    let comparators = Comparators::new();

    for (type_name, expected) in [("ShortString", 40), ("String", 48), ("Text", 34)] {
        let variant =
            declare_field("value", type_name, &FieldOptions::default(), &comparators).unwrap();
        assert_eq!(variant.predicates().len(), expected, "{}", type_name);
        assert_eq!(variant.field_type().as_str(), type_name);
        assert_eq!(
            VariantSpec::for_type(variant.field_type()).predicate_count(),
            expected
        );
    }
}

#[test]
fn test_customer_model() {
    let model = DataModel::from_json(CUSTOMERS, &Comparators::new()).unwrap();
    assert_eq!(model.len(), 4);
    assert_eq!(model.predicate_count(), 40 + 40 + 48 + 34);

    let phone = model.field("Phone Number").unwrap();
    assert_eq!(phone.field(), "phone");
    assert!(phone
        .index_predicates()
        .all(|p| p.use_stop_words() == Some(false)));

    assert!(model.field("phone").is_none());
    assert_eq!(
        model.field("notes").unwrap().comparator().kind(),
        ComparatorKind::Cosine
    );
}

#[test]
fn test_model_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fields.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(CUSTOMERS.as_bytes()).unwrap();

    let model = DataModel::from_path(&path, &Comparators::new()).unwrap();
    let summaries = model.summaries();
    assert_eq!(summaries.len(), 4);

    let json = serde_json::to_value(&summaries).unwrap();
    assert_eq!(json[0]["comparator"], "crf");
    assert_eq!(json[1]["name"], "Phone Number");
    assert_eq!(json[2]["type"], "String");
    assert_eq!(json[3]["predicate_count"], 34);
}

#[test]
fn test_predicates_render_with_field() {
    let variant =
        declare_field("city", "String", &FieldOptions::default(), &Comparators::new()).unwrap();
    let rendered: Vec<String> = variant.predicates().iter().map(|p| p.to_string()).collect();
    assert_eq!(rendered[0], "whole_field(city)");
    assert!(rendered.iter().all(|r| r.contains("city")));

    let unique: HashSet<&String> = rendered.iter().collect();
    assert_eq!(unique.len(), rendered.len());
}

#[test]
fn test_base_predicates_produce_keys() {
    let variant =
        declare_field("name", "ShortString", &FieldOptions::default(), &Comparators::new())
            .unwrap();

    let keys: HashSet<String> = variant
        .base_predicates()
        .filter_map(|p| p.keys("Jonathan Smith 42"))
        .flatten()
        .collect();
    assert!(keys.contains("Jonathan Smith 42"));
    assert!(keys.contains("42"));
    assert!(!keys.contains(""));

    // index predicates need an index, so they have no key function
    assert!(variant
        .index_predicates()
        .all(|p| p.keys("Jonathan Smith 42").is_none()));
}

#[test]
fn test_text_lacks_string_families() {
    let variant =
        declare_field("notes", "Text", &FieldOptions::default(), &Comparators::new()).unwrap();

    assert!(variant
        .base_predicates()
        .filter_map(|p| p.base_family())
        .all(|f| !f.is_short_string_only()));
    assert!(variant.index_predicates().all(|p| !matches!(
        p.index_family(),
        Some(IndexPredicateKind::TfidfNGramCanopy | IndexPredicateKind::TfidfNGramSearch)
    )));
}

#[test]
fn test_scores_rank_duplicates_first() {
    let model = DataModel::from_json(CUSTOMERS, &Comparators::new()).unwrap();

    let same_name = model.compare("name", "Jonathan Smith", "Johnathan Smith").unwrap();
    let other_name = model.compare("name", "Jonathan Smith", "Maria Garcia").unwrap();
    assert!(same_name < other_name);

    let same_address = model
        .compare("address", "12 Main Street", "12 Main St")
        .unwrap();
    let other_address = model
        .compare("address", "12 Main Street", "400 Elm Avenue")
        .unwrap();
    assert!(same_address < other_address);

    let similar_notes = model
        .compare("notes", "prefers email contact", "prefers email")
        .unwrap();
    let different_notes = model
        .compare("notes", "prefers email contact", "key account")
        .unwrap();
    assert!(similar_notes > different_notes);
}

#[test]
fn test_missing_values() {
    let model = DataModel::from_json(CUSTOMERS, &Comparators::new()).unwrap();

    assert_eq!(
        model.compare_optional("address", None, Some("12 Main St")).unwrap(),
        None
    );
    let name = model.compare_optional("name", None, Some("Jonathan")).unwrap();
    assert!(name.is_some());
}

#[test]
fn test_configuration_errors() {
    let comparators = Comparators::new();

    let cases = [
        r#"[{"field": "price", "type": "Price"}]"#,
        r#"[{"field": "bio", "type": "Text", "crf": true}]"#,
        r#"[{"field": "name", "type": "String", "corpus": ["x"]}]"#,
        r#"[{"field": "name", "type": "String", "weight": 3}]"#,
        r#"[{"field": "name", "type": "String"}, {"field": "name", "type": "String"}]"#,
    ];
    for json in cases {
        let err = DataModel::from_json(json, &comparators).unwrap_err();
        assert!(err.is_configuration_error(), "{}: {}", json, err);
    }

    let err = DataModel::from_json("not json", &comparators).unwrap_err();
    assert!(!err.is_configuration_error());
}

#[test]
fn test_custom_crf_model() {
    let json = r#"{
        "matching": {"same_char": 3.0, "different_char": -2.0, "gap_open": -3.0, "gap_extend": -1.0},
        "distinct": {"same_char": 0.0, "different_char": 0.0, "gap_open": -1.0, "gap_extend": -0.5},
        "bias": 0.5
    }"#;
    let crf = dedupx::CrfEditDistance::from_json(json).unwrap();
    let comparators = Comparators::with_crf(crf);

    let variant = declare_field(
        "name",
        "String",
        &FieldOptions::default().with_crf(true),
        &comparators,
    )
    .unwrap();
    assert!(variant.comparator().same_instance(&comparators.crf()));

    let score = variant.compare("acme", "acme");
    assert!((0.0..=1.0).contains(&score));
}
