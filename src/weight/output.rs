//! Text formats for merged weights and inconsistency diagnostics.
//!
//! Output lines look like:
//!
//! ```text
//! redcar \t 12 \t red[0.58] \t car[1]
//! ```
//!
//! (without the spaces around the tabs). Weights keep at most two fractional
//! digits with trailing zeros removed.

use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::weight::merger::join_terms;
use crate::weight::types::{QueryItem, WeightedQuery};

/// Format a weight with at most two fractional digits.
///
/// Halfway cases round away from zero, so `0.125` becomes `0.13`.
///
/// # Examples
///
/// ```
/// use termweight::weight::output::format_weight;
///
/// assert_eq!(format_weight(1.0), "1");
/// assert_eq!(format_weight(0.5), "0.5");
/// assert_eq!(format_weight(7.0 / 12.0), "0.58");
/// ```
pub fn format_weight(weight: f64) -> String {
    let rounded = (weight * 100.0).round() / 100.0;
    let formatted = format!("{rounded:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

impl fmt::Display for WeightedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.query, self.total_frequency)?;
        for term in &self.terms {
            write!(f, "\t{}[{}]", term.term, format_weight(term.weight))?;
        }
        Ok(())
    }
}

/// Write one merged query as an output line.
pub fn write_weighted_query<W: Write>(writer: &mut W, query: &WeightedQuery) -> Result<()> {
    writeln!(writer, "{query}")?;
    Ok(())
}

/// Write the diagnostic block for a rejected query.
///
/// Each contributing item is written as its raw query text followed by its
/// terms joined by spaces; the block ends with a blank line.
pub fn write_inconsistency<W: Write>(writer: &mut W, items: &[QueryItem]) -> Result<()> {
    for item in items {
        writeln!(writer, "{}", item.query)?;
        writeln!(writer, "{}", join_terms(item.terms()))?;
    }
    writeln!(writer)?;
    Ok(())
}
