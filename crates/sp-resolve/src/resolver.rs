//! Builds one immutable `MetadataRecord` per dataset from the reference
//! catalogs.

use std::collections::BTreeMap;

use tracing::debug;

use sp_catalog::Catalogs;
use sp_model::{
    AreaType, COMMISSIONED_ALLOW_LIST, ClassificationMapping, DatasetFamily, MetadataRecord,
    ResolvedId, VariableRef, precedence_rank,
};

use crate::error::{ResolveError, Result};
use crate::freetext::{parse_geography_list, parse_variable_list};
use crate::lookup::lookup_dataset;

/// Commissioned datasets always publish person counts.
const COMMISSIONED_STATISTICAL_UNIT: &str = "Person";

/// Display text for quality summary links, keyed by topic mnemonic.
const TOPIC_TEXTS: [(&str, &str); 7] = [
    (
        "DEM",
        "Read more in our Demography and migration quality information for Census 2021 methodology",
    ),
    (
        "MIG",
        "Read more in our Demography and migration quality information for Census 2021 methodology",
    ),
    (
        "LAB",
        "Read more in our Labour market quality information for Census 2021 methodology",
    ),
    (
        "HOU",
        "Read more in our housing quality information for Census 2021 methodology",
    ),
    (
        "HUC",
        "Read more in our Health, disability and unpaid care quality information for Census 2021 methodology",
    ),
    (
        "EILR",
        "Read more in our Ethnic group, national identity, language and religion quality information for Census 2021 methodology",
    ),
    (
        "EDU",
        "Read more in our Education quality information for Census 2021 methodology",
    ),
];

/// Scalar fields and unjoined variable/area sets for one dataset, before the
/// variable, classification, and category joins run.
struct RecordSeed {
    resolved_id: ResolvedId,
    family: DatasetFamily,
    title: String,
    description: String,
    statistical_unit: String,
    population: String,
    /// (variable mnemonic, classification mnemonic) in catalog order.
    variables: Vec<(String, String)>,
    area_codes: Vec<String>,
}

/// Resolve a dataset identifier into a complete metadata record.
///
/// `provenance` is the ordered list of extract identifiers merged into this
/// dataset; commissioned members found in the commission catalog contribute
/// their geography area types to the record.
pub fn resolve(
    dataset_id: &str,
    provenance: &[String],
    catalogs: &Catalogs,
) -> Result<MetadataRecord> {
    let family =
        DatasetFamily::classify(dataset_id).ok_or_else(|| ResolveError::AmbiguousFamily {
            id: dataset_id.to_string(),
        })?;

    let mut seed = match family {
        DatasetFamily::Primary => resolve_primary(dataset_id, catalogs)?,
        DatasetFamily::Commissioned => resolve_commissioned(dataset_id, catalogs)?,
    };

    merge_provenance_areas(&mut seed, provenance, catalogs);

    let area_types = join_area_types(&seed, catalogs)?;
    let variables = join_variables(&seed, catalogs)?;

    debug!(
        dataset_id,
        real_id = %seed.resolved_id.real,
        fallback = seed.resolved_id.fallback_fired(),
        variable_count = variables.len(),
        area_type_count = area_types.len(),
        "metadata resolved"
    );

    Ok(MetadataRecord {
        resolved_id: seed.resolved_id,
        family: seed.family,
        title: seed.title,
        description: seed.description,
        statistical_unit: seed.statistical_unit,
        population: seed.population,
        sdc_statement: catalogs.sdc_statement.clone(),
        area_types,
        variables,
        provenance: provenance.to_vec(),
    })
}

fn resolve_primary(dataset_id: &str, catalogs: &Catalogs) -> Result<RecordSeed> {
    let (resolved_id, row) = lookup_dataset(catalogs, dataset_id)?;

    // Join-table lookups must use the real id, not the requested one.
    let join_rows = catalogs
        .dataset_variables
        .get(&resolved_id.real)
        .ok_or_else(|| ResolveError::MissingJoinRow {
            dataset: dataset_id.to_string(),
            catalog: "Dataset_Variable",
            key: resolved_id.real.clone(),
        })?;

    let mut variables = Vec::new();
    let mut area_codes = Vec::new();
    let mut seen = Vec::new();
    for join in join_rows {
        if seen.contains(&join.variable) {
            continue;
        }
        seen.push(join.variable.clone());
        if join.lowest_geog {
            area_codes.push(join.variable.clone());
        } else {
            let classification =
                join.classification
                    .clone()
                    .ok_or_else(|| ResolveError::MissingJoinRow {
                        dataset: dataset_id.to_string(),
                        catalog: "Dataset_Variable classification",
                        key: join.variable.clone(),
                    })?;
            variables.push((join.variable.clone(), classification));
        }
    }

    Ok(RecordSeed {
        resolved_id,
        family: DatasetFamily::Primary,
        title: row.title.clone(),
        description: row.description.clone(),
        statistical_unit: row.statistical_unit.clone(),
        population: row.population.clone(),
        variables,
        area_codes,
    })
}

fn resolve_commissioned(dataset_id: &str, catalogs: &Catalogs) -> Result<RecordSeed> {
    // The commission spec sheet has no fallback lookup.
    let row = catalogs
        .commissioned
        .get(dataset_id)
        .ok_or_else(|| ResolveError::UnresolvedDataset {
            id: dataset_id.to_string(),
            catalog: "commission specification",
            tried: dataset_id.to_string(),
        })?;

    let variables = parse_variable_list(&row.variables)
        .into_iter()
        .map(|parsed| (parsed.variable, parsed.classification))
        .collect();
    let area_codes = parse_geography_list(&row.geography);

    Ok(RecordSeed {
        resolved_id: ResolvedId::exact(dataset_id),
        family: DatasetFamily::Commissioned,
        title: row.title.clone(),
        description: row.description.clone(),
        statistical_unit: COMMISSIONED_STATISTICAL_UNIT.to_string(),
        population: commission_population(dataset_id, catalogs)?,
        variables,
        area_codes,
    })
}

/// Commissioned populations are read via a proxy row: `H`-suffixed ids share
/// `SP219H`'s population, `G`-suffixed ids share `SP219G`'s, and allow-list
/// ids read their own row. The value is truncated at the first `:`.
fn commission_population(dataset_id: &str, catalogs: &Catalogs) -> Result<String> {
    let proxy = if COMMISSIONED_ALLOW_LIST.contains(&dataset_id) {
        dataset_id
    } else if dataset_id.ends_with('H') {
        "SP219H"
    } else {
        "SP219G"
    };

    let row = catalogs
        .commissioned
        .get(proxy)
        .ok_or_else(|| ResolveError::MissingJoinRow {
            dataset: dataset_id.to_string(),
            catalog: "commission specification population",
            key: proxy.to_string(),
        })?;
    let value = row
        .population
        .split(':')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    Ok(value)
}

/// Fold the geography area types of combined commissioned members into the
/// seed. Members absent from the commission catalog are plain extracts and
/// contribute nothing.
fn merge_provenance_areas(seed: &mut RecordSeed, provenance: &[String], catalogs: &Catalogs) {
    for member in provenance {
        let Some(row) = catalogs.commissioned.get(member) else {
            continue;
        };
        for code in parse_geography_list(&row.geography) {
            if !seed.area_codes.contains(&code) {
                seed.area_codes.push(code);
            }
        }
    }
}

fn join_area_types(seed: &RecordSeed, catalogs: &Catalogs) -> Result<Vec<AreaType>> {
    let mut codes: Vec<&String> = seed.area_codes.iter().collect();
    codes.sort_by_key(|code| precedence_rank(code));
    codes.dedup();

    let mut area_types = Vec::with_capacity(codes.len());
    for code in codes {
        let row = catalogs
            .variables
            .get(code)
            .ok_or_else(|| ResolveError::MissingJoinRow {
                dataset: seed.resolved_id.requested.clone(),
                catalog: "Variable",
                key: code.clone(),
            })?;
        area_types.push(AreaType {
            code: code.clone(),
            title: row.title.clone(),
            description: row.description.clone(),
        });
    }
    Ok(area_types)
}

fn join_variables(seed: &RecordSeed, catalogs: &Catalogs) -> Result<Vec<VariableRef>> {
    let mut variables = Vec::with_capacity(seed.variables.len());
    for (mnemonic, classification) in &seed.variables {
        let row = catalogs
            .variables
            .get(mnemonic)
            .ok_or_else(|| ResolveError::MissingJoinRow {
                dataset: seed.resolved_id.requested.clone(),
                catalog: "Variable",
                key: mnemonic.clone(),
            })?;

        let quality_url = match &row.quality_url {
            Some(url) => Some(quality_hyperlink(
                &seed.resolved_id.requested,
                mnemonic,
                url,
                row.topic.as_deref(),
            )?),
            None => None,
        };

        variables.push(VariableRef {
            mnemonic: mnemonic.clone(),
            title: row.title.clone(),
            description: row.description.clone(),
            quality_note: row.quality_statement.clone(),
            quality_url,
            classification: join_classification(seed, classification, catalogs)?,
        });
    }
    Ok(variables)
}

fn join_classification(
    seed: &RecordSeed,
    classification: &str,
    catalogs: &Catalogs,
) -> Result<ClassificationMapping> {
    let row = catalogs
        .classifications
        .get(classification)
        .ok_or_else(|| ResolveError::MissingJoinRow {
            dataset: seed.resolved_id.requested.clone(),
            catalog: "Classification",
            key: classification.to_string(),
        })?;
    let label_to_code: BTreeMap<String, String> = catalogs
        .label_to_code(classification)
        .unwrap_or_default();

    Ok(ClassificationMapping {
        mnemonic: classification.to_string(),
        label: row.label.clone(),
        label_to_code,
    })
}

fn quality_hyperlink(
    dataset: &str,
    variable: &str,
    url: &str,
    topic: Option<&str>,
) -> Result<String> {
    let topic = topic.unwrap_or_default();
    let text = TOPIC_TEXTS
        .iter()
        .find(|(mnemonic, _)| *mnemonic == topic)
        .map(|(_, text)| *text)
        .ok_or_else(|| ResolveError::UnknownTopic {
            dataset: dataset.to_string(),
            variable: variable.to_string(),
            topic: topic.to_string(),
        })?;
    Ok(format!("=HYPERLINK(\"{url}\", \"{text}\")"))
}
