use crate::error::ScrapeError;
use crate::etf::holdings::RawRecord;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, trace};

lazy_static! {
    // Matches the embedded structure literal in either of its observed
    // forms: `var structure = [...];` or `structure: [...],`. The lazy
    // body match ends at the first `]` followed by a separator.
    static ref STRUCTURE_RE: Regex =
        Regex::new(r"(?:var\s+)?structure\s*[:=]\s*(\[[\s\S]*?\])\s*[,;]")
            .expect("structure regex");
}

/// Locate and parse the `structure` array embedded in a detail page.
///
/// Returns `Ok(None)` when the page carries no structure literal (a normal
/// outcome for funds without published holdings); a literal that is found
/// but fails to parse as a JSON array of objects is a hard error.
pub fn structure(html: &str) -> anyhow::Result<Option<Vec<RawRecord>>> {
    let captures = match STRUCTURE_RE.captures(html) {
        Some(captures) => captures,
        None => {
            debug!("no structure literal found in page");
            return Ok(None);
        }
    };

    let literal = &captures[1];
    trace!("structure literal found ({} bytes)", literal.len());

    let records: Vec<RawRecord> = serde_json::from_str(literal).map_err(|err| {
        error!("failed to parse structure JSON, error({err})");
        ScrapeError::MalformedStructure(err)
    })?;

    debug!("structure parsed, {} raw records", records.len());
    Ok(Some(records))
}
