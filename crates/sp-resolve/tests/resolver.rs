//! Resolver behavior against an in-memory catalog fixture.

use std::collections::BTreeMap;

use sp_catalog::{
    Catalogs, ClassificationRow, CommissionRow, DatasetRow, DatasetVariableRow, VariableRow,
};
use sp_resolve::{ResolveError, resolve};

fn variable_row(mnemonic: &str, title: &str, type_code: &str) -> VariableRow {
    VariableRow {
        mnemonic: mnemonic.to_string(),
        title: title.to_string(),
        description: format!("Description of {title}"),
        type_code: type_code.to_string(),
        quality_statement: None,
        quality_url: None,
        topic: None,
    }
}

fn category_row(classification: &str, code: &str, label: &str) -> sp_catalog::CategoryRow {
    sp_catalog::CategoryRow {
        classification: classification.to_string(),
        code: code.to_string(),
        label: label.to_string(),
    }
}

fn fixture_catalogs() -> Catalogs {
    let mut datasets = BTreeMap::new();
    datasets.insert(
        "SP101".to_string(),
        DatasetRow {
            mnemonic: "SP101".to_string(),
            title: "Ethnic group by sex".to_string(),
            description: "People by ethnic group and sex".to_string(),
            statistical_unit: "Person".to_string(),
            population: "Usual residents".to_string(),
        },
    );

    let mut variables = BTreeMap::new();
    for row in [
        variable_row("sex", "Sex", "DVO"),
        variable_row("ltla", "Lower tier local authorities", "GEOG"),
        variable_row("nat", "England and Wales", "GEOG"),
        variable_row("rgn", "Regions", "GEOG"),
    ] {
        variables.insert(row.mnemonic.clone(), row);
    }

    let mut classifications = BTreeMap::new();
    classifications.insert(
        "sex".to_string(),
        ClassificationRow {
            mnemonic: "sex".to_string(),
            label: "Sex (2 categories)".to_string(),
        },
    );

    let mut categories = BTreeMap::new();
    categories.insert(
        "sex".to_string(),
        vec![
            category_row("sex", "1", "Female"),
            category_row("sex", "2", "Male"),
        ],
    );

    let mut dataset_variables = BTreeMap::new();
    dataset_variables.insert(
        "SP101".to_string(),
        vec![
            DatasetVariableRow {
                dataset: "SP101".to_string(),
                variable: "ltla".to_string(),
                classification: None,
                lowest_geog: true,
            },
            DatasetVariableRow {
                dataset: "SP101".to_string(),
                variable: "sex".to_string(),
                classification: Some("sex".to_string()),
                lowest_geog: false,
            },
        ],
    );

    let mut commissioned = BTreeMap::new();
    commissioned.insert(
        "SP219H".to_string(),
        CommissionRow {
            table_number: "SP219H".to_string(),
            title: "Caribbean population detail".to_string(),
            description: "Commissioned Caribbean tables".to_string(),
            variables: "sex".to_string(),
            geography: "National/Region".to_string(),
            population: "Usual residents: aged 16 years and over".to_string(),
        },
    );
    commissioned.insert(
        "SP101A".to_string(),
        CommissionRow {
            table_number: "SP101A".to_string(),
            title: "Ethnic group by sex, national".to_string(),
            description: "Commissioned national extension".to_string(),
            variables: "sex".to_string(),
            geography: "National".to_string(),
            population: "Usual residents".to_string(),
        },
    );

    let mut geog_titles = BTreeMap::new();
    geog_titles.insert("ltla".to_string(), "Lower tier local authorities".to_string());
    geog_titles.insert("nat".to_string(), "England and Wales".to_string());
    geog_titles.insert("rgn".to_string(), "Regions".to_string());

    Catalogs {
        datasets,
        variables,
        classifications,
        categories,
        dataset_variables,
        commissioned,
        sdc_statement: "Counts have been rounded.".to_string(),
        geog_titles,
    }
}

#[test]
fn primary_exact_lookup() {
    let catalogs = fixture_catalogs();
    let record = resolve("SP101", &[], &catalogs).expect("resolve SP101");

    assert!(!record.resolved_id.fallback_fired());
    assert_eq!(record.title, "Ethnic group by sex");
    assert_eq!(record.statistical_unit, "Person");
    assert_eq!(record.sdc_statement, "Counts have been rounded.");

    let mnemonics: Vec<&str> = record.variables.iter().map(|v| v.mnemonic.as_str()).collect();
    assert_eq!(mnemonics, vec!["sex"]);
    let areas: Vec<&str> = record.area_types.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(areas, vec!["ltla"]);
    assert_eq!(
        record.variables[0].classification.label_to_code["Female"],
        "1"
    );
}

#[test]
fn suffix_fallback_resolves_and_is_recorded() {
    let catalogs = fixture_catalogs();
    let record = resolve("SP101A", &[], &catalogs).expect("resolve via fallback");

    assert!(record.resolved_id.fallback_fired());
    assert_eq!(record.resolved_id.requested, "SP101A");
    assert_eq!(record.resolved_id.real, "SP101");
    // Join-table rows are keyed by the real id.
    assert_eq!(record.variables.len(), 1);
}

#[test]
fn unresolvable_primary_id_fails() {
    let catalogs = fixture_catalogs();
    let error = resolve("SP999", &[], &catalogs).expect_err("must fail");
    assert!(matches!(error, ResolveError::UnresolvedDataset { .. }));
}

#[test]
fn id_outside_both_families_fails() {
    let catalogs = fixture_catalogs();
    let error = resolve("TS001", &[], &catalogs).expect_err("must fail");
    assert!(matches!(error, ResolveError::AmbiguousFamily { .. }));
}

#[test]
fn commissioned_record_uses_spec_sheet_fields() {
    let catalogs = fixture_catalogs();
    let record = resolve("SP219H", &[], &catalogs).expect("resolve SP219H");

    assert_eq!(record.title, "Caribbean population detail");
    assert_eq!(record.statistical_unit, "Person");
    // Population is truncated at the first colon.
    assert_eq!(record.population, "Usual residents");

    let areas: Vec<&str> = record.area_types.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(areas, vec!["nat", "rgn"], "coarse-to-fine order");
    assert_eq!(record.area_types[0].title, "England and Wales");
}

#[test]
fn provenance_merges_commissioned_geographies() {
    let catalogs = fixture_catalogs();
    let provenance = vec!["SP101A".to_string(), "nat_SP101".to_string()];
    let record = resolve("SP101", &provenance, &catalogs).expect("resolve with provenance");

    let areas: Vec<&str> = record.area_types.iter().map(|a| a.code.as_str()).collect();
    // nat from the commissioned member SP101A, sorted before the join-table
    // ltla; the plain extract member contributes nothing.
    assert_eq!(areas, vec!["nat", "ltla"]);
    assert_eq!(record.provenance, provenance);
}

#[test]
fn missing_variable_catalog_row_fails_dataset() {
    let mut catalogs = fixture_catalogs();
    catalogs.variables.remove("sex");

    let error = resolve("SP101", &[], &catalogs).expect_err("must fail");
    match error {
        ResolveError::MissingJoinRow { key, .. } => assert_eq!(key, "sex"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn quality_url_becomes_topic_hyperlink() {
    let mut catalogs = fixture_catalogs();
    {
        let sex = catalogs.variables.get_mut("sex").expect("sex variable");
        sex.quality_statement = Some("Sex quality note.".to_string());
        sex.quality_url = Some("https://example.org/quality".to_string());
        sex.topic = Some("DEM".to_string());
    }

    let record = resolve("SP101", &[], &catalogs).expect("resolve SP101");
    let url = record.variables[0].quality_url.as_deref().expect("quality url");
    assert!(url.starts_with("=HYPERLINK(\"https://example.org/quality\""));
    assert!(url.contains("Demography and migration"));
}

#[test]
fn unknown_quality_topic_fails_dataset() {
    let mut catalogs = fixture_catalogs();
    {
        let sex = catalogs.variables.get_mut("sex").expect("sex variable");
        sex.quality_url = Some("https://example.org/quality".to_string());
        sex.topic = Some("XYZ".to_string());
    }

    let error = resolve("SP101", &[], &catalogs).expect_err("must fail");
    assert!(matches!(error, ResolveError::UnknownTopic { .. }));
}
