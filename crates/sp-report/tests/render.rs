//! Metadata sheet rendering and artifact writing.

use std::collections::BTreeMap;
use std::fs;

use sp_model::{
    AreaType, ClassificationMapping, DatasetFamily, MetadataRecord, ResolvedId, TidyTable,
    VariableRef,
};
use sp_report::{RenderOptions, render, write_data_csv, write_metadata_csv};

fn record() -> MetadataRecord {
    MetadataRecord {
        resolved_id: ResolvedId::exact("SP101"),
        family: DatasetFamily::Primary,
        title: "Ethnic group by sex".to_string(),
        description: "People by ethnic group and sex".to_string(),
        statistical_unit: "Person".to_string(),
        population: "Usual residents".to_string(),
        sdc_statement: "Counts have been rounded.".to_string(),
        area_types: vec![
            AreaType {
                code: "nat".to_string(),
                title: "England and Wales".to_string(),
                description: String::new(),
            },
            AreaType {
                code: "ltla".to_string(),
                title: "Lower tier local authorities".to_string(),
                description: String::new(),
            },
        ],
        variables: vec![
            VariableRef {
                mnemonic: "sex".to_string(),
                title: "Sex".to_string(),
                description: "The sex recorded by the person".to_string(),
                quality_note: Some("Sex question guidance changed.".to_string()),
                quality_url: Some(
                    "=HYPERLINK(\"https://example.test/sex\", \"Demography quality information\")"
                        .to_string(),
                ),
                classification: ClassificationMapping {
                    mnemonic: "sex_cls".to_string(),
                    label: "Sex (2 categories)".to_string(),
                    label_to_code: BTreeMap::new(),
                },
            },
            VariableRef {
                mnemonic: "age".to_string(),
                title: "Age".to_string(),
                description: "Age on census day".to_string(),
                quality_note: None,
                quality_url: None,
                classification: ClassificationMapping {
                    mnemonic: "age_cls".to_string(),
                    label: "Age (2 categories)".to_string(),
                    label_to_code: BTreeMap::new(),
                },
            },
        ],
        provenance: Vec::new(),
    }
}

fn options() -> RenderOptions {
    RenderOptions {
        release_date: Some("25/09/2023".to_string()),
    }
}

fn field_values<'a>(rows: &'a [(String, String)], field: &str) -> Vec<&'a str> {
    rows.iter()
        .filter(|(name, _)| name == field)
        .map(|(_, value)| value.as_str())
        .collect()
}

#[test]
fn sheet_opens_with_header_pair_and_dataset_fields() {
    let rows = render(&record(), &options());

    assert_eq!(rows[0], ("Metadata Field".into(), "Metadata Content".into()));
    assert_eq!(rows[1], ("Title".into(), "Ethnic group by sex".into()));
    assert_eq!(
        rows[2],
        ("Description".into(), "People by ethnic group and sex".into())
    );
    assert_eq!(rows[3], ("Release Date".into(), "25/09/2023".into()));
    assert_eq!(rows[4], ("Dataset Population".into(), "Usual residents".into()));
    assert_eq!(rows[5], ("Unit of Measure".into(), "Person".into()));
    assert_eq!(rows.last(), Some(&(String::new(), String::new())));
}

#[test]
fn area_types_join_coarsest_first() {
    let rows = render(&record(), &options());
    assert_eq!(
        field_values(&rows, "Area Types"),
        vec!["England and Wales, Lower tier local authorities"]
    );
}

#[test]
fn variable_blocks_follow_record_order() {
    let rows = render(&record(), &options());
    assert_eq!(field_values(&rows, "Variable Name"), vec!["Sex", "Age"]);
    assert_eq!(
        field_values(&rows, "Variable Description"),
        vec!["The sex recorded by the person", "Age on census day"]
    );
}

#[test]
fn quality_rows_are_omitted_not_blanked() {
    let rows = render(&record(), &options());

    // Only the sex variable carries quality information.
    assert_eq!(
        field_values(&rows, "Quality Note(s)"),
        vec!["Sex question guidance changed."]
    );
    assert_eq!(field_values(&rows, "Quality Statement URL").len(), 1);

    // The age block jumps straight from description to the version row.
    let age_idx = rows
        .iter()
        .position(|(_, value)| value == "Age on census day")
        .unwrap();
    assert_eq!(rows[age_idx + 1].0, "Version Number");
}

#[test]
fn default_release_date_is_day_month_year() {
    let rows = render(&record(), &RenderOptions::default());
    let date = field_values(&rows, "Release Date")[0];
    assert_eq!(date.len(), 10);
    assert_eq!(&date[2..3], "/");
    assert_eq!(&date[5..6], "/");
}

#[test]
fn rendering_is_idempotent() {
    let record = record();
    let options = options();
    assert_eq!(render(&record, &options), render(&record, &options));
}

#[test]
fn data_csv_duplicates_headers_on_first_data_row() {
    let dir = tempfile::tempdir().unwrap();
    let table = TidyTable::with_header_row(
        vec!["Geography Code".to_string(), "Count".to_string()],
        vec![vec!["E12000001".to_string(), "120".to_string()]],
    );

    let path = write_data_csv(dir.path(), "SP101", &table).unwrap();
    assert_eq!(path.file_name().unwrap(), "SP101_data.csv");

    let written = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "Geography Code,Count");
    assert_eq!(lines[1], "Geography Code,Count");
    assert_eq!(lines[2], "E12000001,120");
}

#[test]
fn metadata_csv_preserves_row_order_and_formulas() {
    let dir = tempfile::tempdir().unwrap();
    let rows = render(&record(), &options());

    let path = write_metadata_csv(dir.path(), "SP101", &rows).unwrap();
    assert_eq!(path.file_name().unwrap(), "SP101_metadata.csv");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(&path)
        .unwrap();
    let read_back: Vec<(String, String)> = reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            (
                record.get(0).unwrap_or_default().to_string(),
                record.get(1).unwrap_or_default().to_string(),
            )
        })
        .collect();
    assert_eq!(read_back, rows);
}
