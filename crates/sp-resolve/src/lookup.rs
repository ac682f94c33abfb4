//! Two-step dataset lookup: exact id first, then the id minus its trailing
//! character. The result carries which id actually matched.

use sp_catalog::{Catalogs, DatasetRow};
use sp_model::{ResolvedId, strip_suffix_char};

use crate::error::ResolveError;

pub fn lookup_dataset<'a>(
    catalogs: &'a Catalogs,
    id: &str,
) -> Result<(ResolvedId, &'a DatasetRow), ResolveError> {
    if let Some(row) = catalogs.datasets.get(id) {
        return Ok((ResolvedId::exact(id), row));
    }
    if let Some(real) = strip_suffix_char(id) {
        if let Some(row) = catalogs.datasets.get(real) {
            return Ok((ResolvedId::stripped(id, real), row));
        }
        return Err(ResolveError::UnresolvedDataset {
            id: id.to_string(),
            catalog: "dataset catalog",
            tried: format!("{id}, {real}"),
        });
    }
    Err(ResolveError::UnresolvedDataset {
        id: id.to_string(),
        catalog: "dataset catalog",
        tried: id.to_string(),
    })
}
