//! Dataset identifier families and the two-step fallback lookup result.

use serde::{Deserialize, Serialize};

/// Commissioned-family identifiers that do not follow the suffix rules.
pub const COMMISSIONED_ALLOW_LIST: [&str; 5] =
    ["SP115A", "SP116A", "SP117A", "SP118A", "SP119A"];

/// Which reference catalog resolves a dataset identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetFamily {
    /// Resolved from the standard dataset catalog.
    Primary,
    /// Resolved from the bespoke commission specification table.
    Commissioned,
}

impl DatasetFamily {
    /// Classify an identifier by prefix/suffix rules plus the allow-list.
    ///
    /// The commissioned suffix and allow-list rules take precedence over the
    /// primary prefix rule; identifiers outside both families return `None`.
    pub fn classify(id: &str) -> Option<Self> {
        if COMMISSIONED_ALLOW_LIST.contains(&id) {
            return Some(Self::Commissioned);
        }
        if id.starts_with("SP2") && (id.ends_with('H') || id.ends_with('G')) {
            return Some(Self::Commissioned);
        }
        if id.starts_with("SP1") || id.starts_with("SP2") {
            return Some(Self::Primary);
        }
        None
    }
}

/// Outcome of the exact-then-stripped dataset lookup.
///
/// `requested` is the identifier the caller asked for; `real` is the
/// identifier a catalog row was actually found under. Join-table lookups
/// must use `real`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedId {
    pub requested: String,
    pub real: String,
}

impl ResolvedId {
    pub fn exact(id: &str) -> Self {
        Self {
            requested: id.to_string(),
            real: id.to_string(),
        }
    }

    pub fn stripped(requested: &str, real: &str) -> Self {
        Self {
            requested: requested.to_string(),
            real: real.to_string(),
        }
    }

    /// True when the trailing-character fallback produced the real id.
    pub fn fallback_fired(&self) -> bool {
        self.requested != self.real
    }
}

/// Strip the trailing character to obtain the fallback candidate id.
pub fn strip_suffix_char(id: &str) -> Option<&str> {
    let mut chars = id.char_indices();
    let (last, _) = chars.next_back()?;
    if last == 0 {
        return None;
    }
    Some(&id[..last])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commissioned_suffix_rules() {
        assert_eq!(
            DatasetFamily::classify("SP219H"),
            Some(DatasetFamily::Commissioned)
        );
        assert_eq!(
            DatasetFamily::classify("SP220G"),
            Some(DatasetFamily::Commissioned)
        );
        assert_eq!(
            DatasetFamily::classify("SP117A"),
            Some(DatasetFamily::Commissioned)
        );
    }

    #[test]
    fn primary_prefix_rules() {
        assert_eq!(DatasetFamily::classify("SP101"), Some(DatasetFamily::Primary));
        assert_eq!(DatasetFamily::classify("SP101A"), Some(DatasetFamily::Primary));
        assert_eq!(DatasetFamily::classify("SP201"), Some(DatasetFamily::Primary));
    }

    #[test]
    fn unknown_prefix_is_no_family() {
        assert_eq!(DatasetFamily::classify("TS001"), None);
        assert_eq!(DatasetFamily::classify(""), None);
    }

    #[test]
    fn resolved_id_fallback_flag() {
        assert!(!ResolvedId::exact("SP101").fallback_fired());
        assert!(ResolvedId::stripped("SP101A", "SP101").fallback_fired());
    }

    #[test]
    fn strip_suffix() {
        assert_eq!(strip_suffix_char("SP101A"), Some("SP101"));
        assert_eq!(strip_suffix_char("S"), None);
        assert_eq!(strip_suffix_char(""), None);
    }
}
