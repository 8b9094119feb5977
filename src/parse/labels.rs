//! Category-label definition parser
//!
//! The label artifact carries one `id=name` entry per logical definition,
//! with entries wrapped across physical lines and label text usually
//! double-quoted. Physical lines are re-joined into one logical stream
//! before scanning, so wrapping never splits an entry.

use itertools::Itertools;

use crate::error::{GrouperError, Result};
use crate::models::category::{CategoryCatalog, CategoryId, CategoryLabel};

/// Parse the label-definition text into the ordered category catalog.
///
/// # Errors
/// `Parse` if any entry cannot be split into an integer id and a non-empty
/// label, a quoted label is unterminated, or an id repeats.
pub fn parse_label_catalog(text: &str, artifact: &str) -> Result<CategoryCatalog> {
    // Re-join wrapped physical lines before splitting into entries.
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .join(" ");

    let mut labels = Vec::new();
    let mut chars = joined.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut id_token = String::new();
        let mut saw_separator = false;
        while let Some(&c) = chars.peek() {
            chars.next();
            if c == '=' {
                saw_separator = true;
                break;
            }
            id_token.push(c);
        }
        let id_token = id_token.trim().to_string();
        if !saw_separator {
            return Err(GrouperError::parse(artifact, "entry is missing `=`", id_token));
        }
        let id: CategoryId = id_token.parse().map_err(|_| {
            GrouperError::parse(artifact, "category id is not an integer", id_token.as_str())
        })?;

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let name = match chars.peek() {
            Some(&quote) if quote == '"' || quote == '\'' => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == quote {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(GrouperError::parse(
                        artifact,
                        "unterminated quoted label",
                        id_token,
                    ));
                }
                name
            }
            Some(_) => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                name
            }
            None => {
                return Err(GrouperError::parse(artifact, "entry has no label text", id_token));
            }
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(GrouperError::parse(artifact, "entry has an empty label", id_token));
        }

        labels.push(CategoryLabel::new(id, name));
    }

    if labels.is_empty() {
        return Err(GrouperError::parse(
            artifact,
            "no category entries found",
            "",
        ));
    }

    CategoryCatalog::from_labels(labels, artifact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_entries() {
        let catalog = parse_label_catalog("1=\"Diag A\" 2=\"Diag B\"", "labels").unwrap();
        let entries: Vec<_> = catalog
            .iter()
            .map(|label| (label.id, label.name.clone()))
            .collect();
        assert_eq!(
            entries,
            vec![(1, "Diag A".to_string()), (2, "Diag B".to_string())]
        );
    }

    #[test]
    fn wrapped_entries_are_rejoined() {
        let text = "19=\"Diabetes without\n Complication\"\n85=\"Congestive Heart\n Failure\"";
        let catalog = parse_label_catalog(text, "labels").unwrap();
        assert_eq!(catalog.name_of(19), Some("Diabetes without Complication"));
        assert_eq!(catalog.name_of(85), Some("Congestive Heart Failure"));
    }

    #[test]
    fn bare_labels_end_at_whitespace() {
        let catalog = parse_label_catalog("1=HIV 2=Sepsis", "labels").unwrap();
        assert_eq!(catalog.name_of(1), Some("HIV"));
        assert_eq!(catalog.name_of(2), Some("Sepsis"));
    }

    #[test]
    fn whitespace_around_separator_is_trimmed() {
        let catalog = parse_label_catalog("  7 = 'Label Seven'  ", "labels").unwrap();
        assert_eq!(catalog.name_of(7), Some("Label Seven"));
    }

    #[test]
    fn missing_separator_is_an_error() {
        assert!(parse_label_catalog("1=\"A\" 2", "labels").is_err());
    }

    #[test]
    fn non_integer_id_is_an_error() {
        assert!(parse_label_catalog("one=\"A\"", "labels").is_err());
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(parse_label_catalog("1=\"Diag A", "labels").is_err());
    }

    #[test]
    fn empty_label_is_an_error() {
        assert!(parse_label_catalog("1=\"\"", "labels").is_err());
    }

    #[test]
    fn empty_artifact_is_an_error() {
        assert!(parse_label_catalog("\n  \n", "labels").is_err());
    }
}
