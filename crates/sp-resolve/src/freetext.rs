//! Parsers for the commission spec's free-text descriptor fields.
//!
//! Both parsers are rule tables rather than ad-hoc branching: every token is
//! tagged with the rule that produced it, and canonicalization exceptions are
//! named table entries.

use sp_model::short_code;

/// Literal prefix some variable lists carry; the classification tokens
/// follow it.
const FLAT_CLASSIFICATION_PREFIX: &str = "Flat classification for ethnic group, ";

/// Canonicalization exceptions applied after suffix stripping.
const CANONICAL_EXCEPTIONS: [(&str, &str); 1] =
    [("economic_activity_status", "economic_activity")];

/// How a variable token was reduced to its canonical mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRule {
    /// Token contained no numeric characters; already canonical.
    Plain,
    /// Token carried a numeric disambiguating suffix; canonical name is
    /// everything before the last underscore.
    SuffixStripped,
    /// Suffix-stripped form matched the exception table.
    NamedException,
}

/// One entry of a parsed commission variable list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVariable {
    /// Canonical mnemonic used for variable-catalog joins.
    pub variable: String,
    /// The original token, which names the classification.
    pub classification: String,
    pub rule: TokenRule,
}

/// Parse the comma-separated classification list of a commission spec row.
pub fn parse_variable_list(raw: &str) -> Vec<ParsedVariable> {
    let list = if raw.starts_with("Flat classification") {
        match raw.split_once(FLAT_CLASSIFICATION_PREFIX) {
            Some((_, rest)) => rest,
            None => raw,
        }
    } else {
        raw
    };

    let mut parsed = Vec::new();
    for token in list.split(',') {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }
        parsed.push(classify_token(&token));
    }
    parsed
}

fn classify_token(token: &str) -> ParsedVariable {
    if !token.chars().any(|ch| ch.is_ascii_digit()) {
        return ParsedVariable {
            variable: token.to_string(),
            classification: token.to_string(),
            rule: TokenRule::Plain,
        };
    }

    let stripped = match token.rsplit_once('_') {
        Some((head, _suffix)) => head,
        None => token,
    };
    for (exception, canonical) in CANONICAL_EXCEPTIONS {
        if stripped == exception {
            return ParsedVariable {
                variable: canonical.to_string(),
                classification: token.to_string(),
                rule: TokenRule::NamedException,
            };
        }
    }
    ParsedVariable {
        variable: stripped.to_string(),
        classification: token.to_string(),
        rule: TokenRule::SuffixStripped,
    }
}

/// Parse the "/"-delimited geography list into short area-type codes.
pub fn parse_geography_list(raw: &str) -> Vec<String> {
    raw.split('/')
        .map(short_code)
        .filter(|code| !code.is_empty())
        .collect()
}
