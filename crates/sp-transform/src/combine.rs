//! Groups raw extracts into logical datasets and concatenates them.
//!
//! Two composable phases: (a) same-dataset, different-area exports merge in
//! fixed precedence order; (b) a primary-family base table absorbs its
//! suffixed commissioned counterpart, consuming phase (a)'s output. Both
//! phases require an identical column signature across members.

use tracing::debug;

use sp_model::{COMBINE_ORDER, ExtractTable, strip_suffix_char};

use crate::error::{Result, TransformError};

/// The members that resolve to one combined output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationPlan {
    /// Output identity of the combined table.
    pub dataset_id: String,
    /// Area-prefixed extract stems (`nat_SP101`, ...) in discovery order.
    pub area_members: Vec<String>,
    /// Suffixed commissioned stem merging into this dataset, if any.
    pub commissioned_member: Option<String>,
}

impl CombinationPlan {
    /// All member stems the orchestrator must load for this plan.
    pub fn member_ids(&self) -> Vec<String> {
        let mut ids = self.area_members.clone();
        if let Some(member) = &self.commissioned_member {
            ids.push(member.clone());
        }
        ids
    }

    fn member_count(&self) -> usize {
        self.area_members.len() + usize::from(self.commissioned_member.is_some())
    }
}

/// One combined table plus the ordered identifiers actually merged into it.
#[derive(Debug, Clone)]
pub struct CombinedTable {
    pub dataset_id: String,
    pub table: ExtractTable,
    /// Empty when the table was a single extract and nothing merged.
    pub provenance: Vec<String>,
}

/// Group extract stems into combination plans.
///
/// Area extracts named `<area>_<dataset>` group by dataset id. Commissioned
/// stems starting `SP1` merge with the base id obtained by stripping their
/// trailing character; other commissioned stems stand alone.
pub fn plan_groups(extract_ids: &[String], commissioned_ids: &[String]) -> Vec<CombinationPlan> {
    let mut plans: Vec<CombinationPlan> = Vec::new();

    for stem in extract_ids {
        let dataset_id = match stem.rsplit_once('_') {
            Some((_, id)) => id.to_string(),
            None => stem.clone(),
        };
        match plans.iter_mut().find(|plan| plan.dataset_id == dataset_id) {
            Some(plan) => plan.area_members.push(stem.clone()),
            None => plans.push(CombinationPlan {
                dataset_id,
                area_members: vec![stem.clone()],
                commissioned_member: None,
            }),
        }
    }

    for stem in commissioned_ids {
        let base = if stem.starts_with("SP1") {
            strip_suffix_char(stem).map(str::to_string)
        } else {
            None
        };
        match base.and_then(|id| {
            plans
                .iter_mut()
                .find(|plan| plan.dataset_id == id && plan.commissioned_member.is_none())
        }) {
            Some(plan) => plan.commissioned_member = Some(stem.clone()),
            None => plans.push(CombinationPlan {
                dataset_id: stem.clone(),
                area_members: Vec::new(),
                commissioned_member: Some(stem.clone()),
            }),
        }
    }

    plans
}

/// Concatenate a plan's member tables into one combined table.
///
/// Row-block order is: the commissioned member first, then area members in
/// {national, local-area, mid-layer-area} precedence, regardless of input
/// order. Members are matched to the plan by stem.
pub fn combine(plan: &CombinationPlan, members: Vec<ExtractTable>) -> Result<CombinedTable> {
    let ordered = order_members(plan, members)?;
    check_signatures(plan, &ordered)?;

    let merged = ordered.len() > 1;
    let provenance: Vec<String> = if merged {
        ordered.iter().map(|table| table.id.clone()).collect()
    } else {
        Vec::new()
    };

    let mut iter = ordered.into_iter();
    let first = iter.next().ok_or_else(|| TransformError::MissingColumn {
        table: plan.dataset_id.clone(),
        column: "no members supplied".to_string(),
    })?;
    let mut combined = ExtractTable::new(plan.dataset_id.clone(), first.headers.clone());
    combined.rows = first.rows;
    for member in iter {
        combined.rows.extend(member.rows);
    }

    debug!(
        dataset_id = %plan.dataset_id,
        member_count = provenance.len().max(1),
        row_count = combined.rows.len(),
        "extracts combined"
    );

    Ok(CombinedTable {
        dataset_id: plan.dataset_id.clone(),
        table: combined,
        provenance,
    })
}

fn order_members(
    plan: &CombinationPlan,
    mut members: Vec<ExtractTable>,
) -> Result<Vec<ExtractTable>> {
    let mut ordered = Vec::with_capacity(members.len());

    if let Some(stem) = &plan.commissioned_member {
        let idx = members
            .iter()
            .position(|table| &table.id == stem)
            .ok_or_else(|| TransformError::MissingColumn {
                table: plan.dataset_id.clone(),
                column: format!("member {stem}"),
            })?;
        ordered.push(members.swap_remove(idx));
    }

    let mut area_members = Vec::with_capacity(members.len());
    for table in members {
        let variant = table
            .id
            .split_once('_')
            .map(|(prefix, _)| prefix)
            .unwrap_or_default();
        let rank = COMBINE_ORDER
            .iter()
            .position(|known| *known == variant)
            .ok_or_else(|| TransformError::CombinationOrder {
                group: plan.dataset_id.clone(),
                member: table.id.clone(),
                variant: variant.to_string(),
            })?;
        area_members.push((rank, table));
    }
    area_members.sort_by_key(|(rank, _)| *rank);
    ordered.extend(area_members.into_iter().map(|(_, table)| table));

    Ok(ordered)
}

fn check_signatures(plan: &CombinationPlan, members: &[ExtractTable]) -> Result<()> {
    let Some(reference) = members.first() else {
        return Ok(());
    };
    for member in &members[1..] {
        if member.signature() != reference.signature() {
            return Err(TransformError::ColumnSignatureMismatch {
                group: plan.dataset_id.clone(),
                reference: reference.id.clone(),
                member: member.id.clone(),
            });
        }
    }
    Ok(())
}
