//! Integration tests for catalog loading from CSV fixtures.

use std::fs;
use std::path::Path;

use sp_catalog::{CatalogError, CatalogPaths, Catalogs};

fn write_fixture(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

fn write_standard_catalogs(dir: &Path) {
    write_fixture(
        dir,
        "Dataset.csv",
        "Dataset_Mnemonic,Dataset_Title,Dataset_Description,Statistical_Unit,Dataset_Population\n\
         SP101,Ethnic group,People by ethnic group,Person,Usual residents\n\
         SP101,Duplicate title,ignored,Person,ignored\n\
         SP102,Country of birth,People by country of birth,Person,Usual residents\n",
    );
    write_fixture(
        dir,
        "Variable.csv",
        "Variable_Mnemonic,Variable_Title,Variable_Description,Variable_Type_Code,Quality_Statement_Text,Quality_Summary_URL,Topic_Mnemonic\n\
         sex,Sex,The sex recorded by the person,DVO,,,DEM\n\
         ltla,Lower tier local authorities,Local authority districts,GEOG,,,\n\
         nat,England and Wales,The national level,GEOG,,,\n",
    );
    write_fixture(
        dir,
        "Classification.csv",
        "Classification_Mnemonic,External_Classification_Label_English\n\
         sex,Sex (2 categories)\n",
    );
    write_fixture(
        dir,
        "Category.csv",
        "Classification_Mnemonic,Category_Code,External_Category_Label_English\n\
         sex,1,Female\n\
         sex,2,Male\n\
         sex,9,Male\n",
    );
    write_fixture(
        dir,
        "Dataset_Variable.csv",
        "Dataset_Mnemonic,Variable_Mnemonic,Classification_Mnemonic,Lowest_Geog_Variable_Flag\n\
         SP101,ltla,,Y\n\
         SP101,sex,sex,\n",
    );
    write_fixture(
        dir,
        "Source.csv",
        "Source_Mnemonic,SDC_Statement\n\
         CEN2021,Counts have been rounded to protect confidentiality.\n",
    );
}

fn write_commission_spec(path: &Path) {
    fs::write(
        path,
        " table number,table title,dataset_description / Table Notes,variables,Geography,table population\n\
         SP219H,Caribbean detail,Notes,\"sex, age_23a\",National/Region,Usual residents: aged 16 and over\n",
    )
    .expect("write commission spec");
}

fn load_fixture_catalogs(dir: &Path) -> Result<Catalogs, CatalogError> {
    let spec = dir.join("commission_spec.csv");
    Catalogs::load(&CatalogPaths {
        catalog_dir: dir.to_path_buf(),
        commission_spec: spec,
    })
}

#[test]
fn loads_all_catalogs() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_standard_catalogs(dir.path());
    write_commission_spec(&dir.path().join("commission_spec.csv"));

    let catalogs = load_fixture_catalogs(dir.path()).expect("load catalogs");

    assert_eq!(catalogs.datasets.len(), 2);
    assert_eq!(
        catalogs.datasets["SP101"].title, "Ethnic group",
        "duplicate dataset keys must be first-wins"
    );
    assert_eq!(
        catalogs.sdc_statement,
        "Counts have been rounded to protect confidentiality."
    );
    assert_eq!(catalogs.commissioned["SP219H"].geography, "National/Region");
}

#[test]
fn category_labels_last_write_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_standard_catalogs(dir.path());
    write_commission_spec(&dir.path().join("commission_spec.csv"));

    let catalogs = load_fixture_catalogs(dir.path()).expect("load catalogs");
    let mapping = catalogs.label_to_code("sex").expect("sex classification");

    assert_eq!(mapping["Female"], "1");
    // The duplicate Male row overwrites the earlier code.
    assert_eq!(mapping["Male"], "9");
}

#[test]
fn geog_titles_cover_only_geographic_variables() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_standard_catalogs(dir.path());
    write_commission_spec(&dir.path().join("commission_spec.csv"));

    let catalogs = load_fixture_catalogs(dir.path()).expect("load catalogs");

    assert_eq!(
        catalogs.geog_titles["ltla"],
        "Lower tier local authorities"
    );
    assert!(!catalogs.geog_titles.contains_key("sex"));
}

#[test]
fn missing_catalog_file_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_standard_catalogs(dir.path());
    write_commission_spec(&dir.path().join("commission_spec.csv"));
    fs::remove_file(dir.path().join("Category.csv")).expect("remove catalog");

    let error = load_fixture_catalogs(dir.path()).expect_err("load must fail");
    assert!(matches!(error, CatalogError::Io { .. }));
}

#[test]
fn missing_required_column_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_standard_catalogs(dir.path());
    write_commission_spec(&dir.path().join("commission_spec.csv"));
    write_fixture(
        dir.path(),
        "Classification.csv",
        "Classification_Mnemonic,Wrong_Column\nsex,Sex (2 categories)\n",
    );

    let error = load_fixture_catalogs(dir.path()).expect_err("load must fail");
    match error {
        CatalogError::MissingColumn { column, .. } => {
            assert_eq!(column, "External_Classification_Label_English");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_source_table_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_standard_catalogs(dir.path());
    write_commission_spec(&dir.path().join("commission_spec.csv"));
    write_fixture(dir.path(), "Source.csv", "Source_Mnemonic,SDC_Statement\n");

    let error = load_fixture_catalogs(dir.path()).expect_err("load must fail");
    assert!(matches!(error, CatalogError::Empty { .. }));
}
