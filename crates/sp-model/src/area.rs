//! Area-type codes and their publication precedence.

/// Coarse-to-fine precedence of the known area-type short codes.
///
/// Governs both combination row-block ordering and the rendering order of
/// area-type titles in the metadata sheet.
pub const AREA_PRECEDENCE: [&str; 5] = ["nat", "ctry", "rgn", "ltla", "msoa"];

/// Area-scoped extract variants combine in this fixed order; country and
/// region never arrive as separate exports.
pub const COMBINE_ORDER: [&str; 3] = ["nat", "ltla", "msoa"];

/// Long-form geography names used in commission spec free text.
pub const GEOGRAPHY_NAME_TABLE: [(&str, &str); 3] = [
    ("national", "nat"),
    ("country", "ctry"),
    ("region", "rgn"),
];

/// Coarse-to-fine rank of a short code; unknown codes sort after known ones.
pub fn precedence_rank(code: &str) -> usize {
    AREA_PRECEDENCE
        .iter()
        .position(|known| *known == code)
        .unwrap_or(AREA_PRECEDENCE.len())
}

/// Map a long-form geography name to its short code, passing unrecognized
/// tokens through lower-cased.
pub fn short_code(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    for (long, short) in GEOGRAPHY_NAME_TABLE {
        if lower == long {
            return short.to_string();
        }
    }
    lower
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_is_coarse_to_fine() {
        assert!(precedence_rank("nat") < precedence_rank("ctry"));
        assert!(precedence_rank("ctry") < precedence_rank("rgn"));
        assert!(precedence_rank("rgn") < precedence_rank("ltla"));
        assert!(precedence_rank("ltla") < precedence_rank("msoa"));
        assert!(precedence_rank("msoa") < precedence_rank("oa"));
    }

    #[test]
    fn short_codes_from_long_names() {
        assert_eq!(short_code("National"), "nat");
        assert_eq!(short_code("Country"), "ctry");
        assert_eq!(short_code("Region"), "rgn");
        assert_eq!(short_code("LTLA"), "ltla");
    }
}
