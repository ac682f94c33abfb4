//! Renders a resolved metadata record into the ordered field/value sheet.

use chrono::Local;
use tracing::debug;

use sp_model::MetadataRecord;

/// Census customer services mailbox.
const CONTACT_EMAIL: &str = "census.customerservices@ons.gov.uk";
/// Census customer services switchboard.
const CONTACT_PHONE: &str = "+44 1329 444972";

const AREA_TYPE_SUMMARY: &str = "Census 2021 statistics are published for a number of different geographies. These can be large, for example the whole of England, or small, for example an output area (OA), the lowest level of geography for which statistics are produced.\nFor higher levels of geography, more detailed statistics can be produced. When a lower level of geography is used, such as output areas (which have a minimum of 100 persons), the statistics produced have less detail. This is to protect the confidentiality of people and ensure that individuals or\ntheir characteristics cannot be identified.";

const SMALL_POPULATIONS_DESCRIPTION: &str = "Small population tables provide census data for some of the key characteristics of people in specific small population groups - for example individuals of an ethnic group, a country of birth, a religion or a national identity - in which the small size of the total population in that group means confidentiality constraints limit the release of more detailed standard statistics.";

const TERMS_AND_CONDITIONS: &str = "All material on the Office for National Statistics (ONS) website is subject to Crown Copyright protection unless otherwise indicated. These statistics may be used, excluding logos, under the terms of the Open Government Licence.";

/// Run-wide rendering knobs.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Release date printed verbatim. Today's date in `%d/%m/%Y` when unset.
    pub release_date: Option<String>,
}

impl RenderOptions {
    fn release_date(&self) -> String {
        self.release_date
            .clone()
            .unwrap_or_else(|| Local::now().format("%d/%m/%Y").to_string())
    }
}

/// Render the ordered field/value rows of a dataset's metadata sheet.
///
/// The sequence is fixed: header pair, dataset fields, contact fields, area
/// types (coarsest geography first), one block per variable in record order,
/// then the release boilerplate. Quality rows are omitted outright when the
/// variable carries none. Pure with respect to the record; calling twice
/// with the same options yields identical rows.
pub fn render(record: &MetadataRecord, options: &RenderOptions) -> Vec<(String, String)> {
    let mut rows: Vec<(String, String)> = Vec::new();
    let mut push = |field: &str, value: &str| rows.push((field.to_string(), value.to_string()));

    push("Metadata Field", "Metadata Content");
    push("Title", &record.title);
    push("Description", &record.description);
    push("Release Date", &options.release_date());
    push("Dataset Population", &record.population);
    push("Unit of Measure", &record.statistical_unit);
    push("Contact Email", CONTACT_EMAIL);
    push("Contact Telephone Number", CONTACT_PHONE);
    push(
        "Statistical Disclosure Control Statement",
        &record.sdc_statement,
    );

    let area_titles: Vec<&str> = record
        .area_types
        .iter()
        .map(|area| area.title.as_str())
        .collect();
    push("Area Types", &area_titles.join(", "));
    push("Area Type Summary", AREA_TYPE_SUMMARY);

    for variable in &record.variables {
        push("Variable Name", &variable.title);
        push("Variable Description", &variable.description);
        if let Some(note) = non_empty(variable.quality_note.as_deref()) {
            push("Quality Note(s)", note);
        }
        if let Some(url) = non_empty(variable.quality_url.as_deref()) {
            push("Quality Statement URL", url);
        }
    }

    push("Version Number", "1");
    push("Related Content Title", "Small Populations");
    push("Related Content Description", SMALL_POPULATIONS_DESCRIPTION);
    push(
        "Related Content URL",
        "=HYPERLINK(\"https://www.nomisweb.co.uk/sources/census_2021_sp\")",
    );
    push(
        "Related Content Title",
        "Small population groups, England and Wales: Census 2021",
    );
    push(
        "Related Content Description",
        "Statistics about small population groups, Census 2021 data",
    );
    push(
        "Related Content URL",
        "=HYPERLINK(\"https://www.ons.gov.uk/releases/smallpopulationsenglandandwalescensus2021\")",
    );
    push("Related Content Title", "Census 2021 dictionary");
    push(
        "Related Content Description",
        "Definitions, variables and classifications to help when using Census 2021 data.",
    );
    push(
        "Related Content URL",
        "=HYPERLINK(\"https://www.ons.gov.uk/census/census2021dictionary\")",
    );
    push(
        "Source",
        "Office for National Statistics \u{a9} Crown Copyright 2023",
    );
    push("Copyright Statement and Terms and Conditions", "");
    push("Terms and Conditions", TERMS_AND_CONDITIONS);
    push(
        "Licence URL",
        "=HYPERLINK(\"http://www.nationalarchives.gov.uk/doc/open-government-licence/\")",
    );
    push("", "");

    debug!(
        dataset_id = %record.dataset_id(),
        row_count = rows.len(),
        "metadata sheet rendered"
    );

    rows
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
