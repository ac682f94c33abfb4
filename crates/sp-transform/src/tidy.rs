//! Reshapes a raw wide extract into the canonical tidy layout.

use std::collections::BTreeMap;

use tracing::debug;

use sp_model::{ExtractTable, MetadataRecord, TidyTable, VariableRef};

use crate::error::{Result, TransformError};

/// Observation-count column in raw extracts.
const OBS_COLUMN: &str = "OBS";
/// Composite geography column: "<code> <label words>".
const GEOGRAPHY_COLUMN: &str = "small_population";
/// Area-type short-code column.
const AREA_TYPE_COLUMN: &str = "area_type";
/// Legacy export artifact, dropped without complaint.
const PERCENTAGE_COLUMN: &str = "Percentage";

/// Raw column indices keyed by role after classification.
struct ColumnMap {
    geography: usize,
    area_type: usize,
    count: usize,
    /// Variable mnemonic to raw column index.
    variables: BTreeMap<String, usize>,
}

/// Transform a raw extract into the tidy layout driven by the resolved
/// metadata record.
///
/// Output column order is fixed: Geography Code, Geography Label, Area type,
/// then a Code/Label pair per variable in resolver order, then Count —
/// independent of the raw column order. The first output row duplicates the
/// headers.
pub fn tidy(
    raw: &ExtractTable,
    record: &MetadataRecord,
    geog_titles: &BTreeMap<String, String>,
) -> Result<TidyTable> {
    let columns = classify_columns(raw, record)?;

    let mut headers = vec![
        "Geography Code".to_string(),
        "Geography Label".to_string(),
        "Area type".to_string(),
    ];
    for variable in &record.variables {
        headers.push(format!("{} Code", variable.classification.label));
        headers.push(format!("{} Label", variable.classification.label));
    }
    headers.push("Count".to_string());

    let mut data_rows = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        data_rows.push(tidy_row(raw, record, geog_titles, &columns, row)?);
    }

    debug!(
        table = %raw.id,
        column_count = headers.len(),
        row_count = data_rows.len(),
        "extract tidied"
    );

    Ok(TidyTable::with_header_row(headers, data_rows))
}

fn classify_columns(raw: &ExtractTable, record: &MetadataRecord) -> Result<ColumnMap> {
    let mut geography = None;
    let mut area_type = None;
    let mut count = None;
    let mut variables: BTreeMap<String, usize> = BTreeMap::new();

    for (idx, header) in raw.headers.iter().enumerate() {
        match header.as_str() {
            OBS_COLUMN => count = Some(idx),
            GEOGRAPHY_COLUMN => geography = Some(idx),
            AREA_TYPE_COLUMN => area_type = Some(idx),
            PERCENTAGE_COLUMN => {}
            other => {
                let mnemonic = other.split_whitespace().next().unwrap_or_default();
                if record.variable(mnemonic).is_none() {
                    return Err(TransformError::UnresolvedColumn {
                        table: raw.id.clone(),
                        column: other.to_string(),
                    });
                }
                variables.entry(mnemonic.to_string()).or_insert(idx);
            }
        }
    }

    let require = |name: &str, idx: Option<usize>| {
        idx.ok_or_else(|| TransformError::MissingColumn {
            table: raw.id.clone(),
            column: name.to_string(),
        })
    };
    let columns = ColumnMap {
        geography: require(GEOGRAPHY_COLUMN, geography)?,
        area_type: require(AREA_TYPE_COLUMN, area_type)?,
        count: require(OBS_COLUMN, count)?,
        variables,
    };

    for variable in &record.variables {
        if !columns.variables.contains_key(&variable.mnemonic) {
            return Err(TransformError::MissingVariableColumn {
                table: raw.id.clone(),
                variable: variable.mnemonic.clone(),
            });
        }
    }

    Ok(columns)
}

fn tidy_row(
    raw: &ExtractTable,
    record: &MetadataRecord,
    geog_titles: &BTreeMap<String, String>,
    columns: &ColumnMap,
    row: &[String],
) -> Result<Vec<String>> {
    let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or_default();

    let (geography_code, geography_label) = split_geography(cell(columns.geography));

    let area_code = cell(columns.area_type);
    let area_title =
        geog_titles
            .get(area_code)
            .ok_or_else(|| TransformError::UnknownAreaType {
                table: raw.id.clone(),
                code: area_code.to_string(),
            })?;

    let mut out = Vec::with_capacity(raw.headers.len() + 2);
    out.push(geography_code);
    out.push(geography_label);
    out.push(area_title.clone());
    for variable in &record.variables {
        let idx = columns.variables[&variable.mnemonic];
        let label = cell(idx);
        out.push(encode_label(raw, variable, label)?);
        out.push(label.to_string());
    }
    out.push(cell(columns.count).to_string());
    Ok(out)
}

/// First whitespace token is the geography code; the remaining tokens rejoin
/// with single spaces as the label.
fn split_geography(value: &str) -> (String, String) {
    let mut tokens = value.split_whitespace();
    let code = tokens.next().unwrap_or_default().to_string();
    let label = tokens.collect::<Vec<_>>().join(" ");
    (code, label)
}

/// A label absent from the mapping is a resolution fault, never a blank code.
fn encode_label(raw: &ExtractTable, variable: &VariableRef, label: &str) -> Result<String> {
    variable
        .classification
        .label_to_code
        .get(label)
        .cloned()
        .ok_or_else(|| TransformError::LabelNotFound {
            table: raw.id.clone(),
            classification: variable.classification.mnemonic.clone(),
            label: label.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geography_splits_on_first_token() {
        let (code, label) = split_geography("E12000001 North East");
        assert_eq!(code, "E12000001");
        assert_eq!(label, "North East");
    }

    #[test]
    fn geography_label_rejoins_with_single_spaces() {
        let (code, label) = split_geography("E06000001  Hartlepool   and  district");
        assert_eq!(code, "E06000001");
        assert_eq!(label, "Hartlepool and district");
    }

    #[test]
    fn empty_geography_cell_yields_empty_parts() {
        let (code, label) = split_geography("");
        assert_eq!(code, "");
        assert_eq!(label, "");
    }
}
