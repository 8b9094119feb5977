//! Hierarchy-rule definition parser
//!
//! The hierarchy artifact is free legacy text in which rule lines are
//! recognized by content markers rather than line offsets (offsets drift
//! between model-version artifacts). A rule line carries a `CC=` trigger
//! marker and a `HIER=` suppressed-list marker, the list decorated with a
//! string-literal wrapper, parentheses and a trailing semicolon:
//!
//! ```text
//! %SET0(CC=8   ,HIER=%STR(9 ,10 ,11 ,12 ));
//! ```
//!
//! Lines without either marker are decoration and are skipped. File order
//! of the rules is significant and preserved.

use smallvec::SmallVec;

use crate::error::{GrouperError, Result};
use crate::models::category::CategoryId;

/// Marker introducing the trigger category number
const TRIGGER_MARKER: &str = "CC=";
/// Marker introducing the suppressed-category list
const SUPPRESS_MARKER: &str = "HIER=";
/// String-literal wrapper around the suppressed list
const LITERAL_MARKER: &str = "%STR";

/// One hierarchy-exclusion rule: when the trigger category is present, the
/// suppressed categories are forced absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyRule {
    /// Category whose presence fires the rule
    pub trigger: CategoryId,
    /// Categories zeroed when the rule fires, in source order
    pub suppressed: SmallVec<[CategoryId; 8]>,
}

/// Parse the hierarchy artifact into an ordered rule list.
///
/// # Errors
/// `Parse` on a rule line with a missing or non-integer trigger, an empty
/// suppressed list, a non-integer list token, or when the artifact contains
/// no rule lines at all.
pub fn parse_hierarchy_rules(text: &str, artifact: &str) -> Result<Vec<HierarchyRule>> {
    let mut rules = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        let has_trigger = line.contains(TRIGGER_MARKER);
        let has_suppress = line.contains(SUPPRESS_MARKER);
        if !has_trigger && !has_suppress {
            continue;
        }
        if !(has_trigger && has_suppress) {
            return Err(GrouperError::parse(
                artifact,
                format!("rule line must carry both `{TRIGGER_MARKER}` and `{SUPPRESS_MARKER}`"),
                line,
            ));
        }
        rules.push(HierarchyRule {
            trigger: parse_trigger(line, artifact)?,
            suppressed: parse_suppressed(line, artifact)?,
        });
    }
    if rules.is_empty() {
        return Err(GrouperError::parse(artifact, "no hierarchy rule lines found", ""));
    }
    Ok(rules)
}

fn parse_trigger(line: &str, artifact: &str) -> Result<CategoryId> {
    let marker = line.find(TRIGGER_MARKER).unwrap_or_default();
    let rest = line[marker + TRIGGER_MARKER.len()..].trim_start();
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().map_err(|_| {
        GrouperError::parse(artifact, "missing or non-integer trigger category", line)
    })
}

fn parse_suppressed(line: &str, artifact: &str) -> Result<SmallVec<[CategoryId; 8]>> {
    let marker = line.find(SUPPRESS_MARKER).unwrap_or_default();
    let mut rest = line[marker + SUPPRESS_MARKER.len()..].trim_start();
    if let Some(stripped) = rest.strip_prefix(LITERAL_MARKER) {
        rest = stripped.trim_start();
    }
    rest = rest.strip_prefix('(').unwrap_or(rest);
    // the list ends at its closing parenthesis; trailing `));` is decoration
    let list = match rest.find(')') {
        Some(end) => &rest[..end],
        None => rest.trim_end_matches(';').trim_end(),
    };
    if list.trim().is_empty() {
        return Err(GrouperError::parse(artifact, "empty suppressed list", line));
    }

    let mut suppressed = SmallVec::new();
    for token in list.split(',') {
        let token = token.trim();
        let id: CategoryId = token.parse().map_err(|_| {
            GrouperError::parse(
                artifact,
                format!("suppressed category `{token}` is not an integer"),
                line,
            )
        })?;
        suppressed.push(id);
    }
    Ok(suppressed)
}
