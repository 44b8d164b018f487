use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use tracing::trace;

// field aliases
// ----------------------------------------------------------------------------

// Candidate field names per logical attribute, checked in priority order;
// the source records carry no fixed schema.
const NAME_FIELDS: &[&str] = &["asset_name"];
const ISIN_FIELDS: &[&str] = &["isin", "asset_isin", "emitent_isin"];
const TICKER_FIELDS: &[&str] = &["ticker", "asset_ticker"];

// `weight.numeric` is a 0-1 proportion (e.g. 0.045573 = 4.5573%);
// `weight.rounded` is an already-rounded percentage.
const WEIGHT_FRACTION: &str = "weight.numeric";
const WEIGHT_ROUNDED: &str = "weight.rounded";

// types
// ----------------------------------------------------------------------------

/// One raw record of the embedded structure array, exactly as parsed.
pub type RawRecord = Map<String, Value>;

/// A single constituent asset of a fund. Optional fields are left out of
/// the serialized output entirely rather than carried as empty strings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Holding {
    pub name: String,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
}

/// Output of [`normalize`]: the sorted holdings plus the field names seen
/// on the first raw record (diagnostic only).
#[derive(Debug, PartialEq)]
pub struct Normalized {
    pub holdings: Vec<Holding>,
    pub available_fields: Vec<String>,
}

/// Full scrape result, keyed the way the stdout report expects.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsReport {
    pub holdings: Vec<Holding>,
    pub cbonds_id: String,
    pub total_count: usize,
    pub available_fields: Vec<String>,
}

// normalize
// ----------------------------------------------------------------------------

/// Normalize raw structure records into a sorted holdings list.
///
/// Records without a usable name are dropped silently; a malformed weight
/// degrades to `0.0` and a missing optional field is omitted, so a single
/// bad record never fails the batch. Holdings are sorted by weight
/// descending, stable with respect to input order on ties.
pub fn normalize(records: &[RawRecord]) -> Normalized {
    let mut holdings: Vec<Holding> = records
        .iter()
        .filter_map(|record| {
            let name = first_string(record, NAME_FIELDS)?;
            Some(Holding {
                name,
                weight: weight_of(record),
                isin: first_string(record, ISIN_FIELDS),
                ticker: first_string(record, TICKER_FIELDS),
            })
        })
        .collect();

    // `sort_by` is stable, so equal weights keep their input order
    holdings.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));

    let available_fields = records
        .first()
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default();

    trace!(
        "normalized {} of {} raw records",
        holdings.len(),
        records.len()
    );

    Normalized {
        holdings,
        available_fields,
    }
}

/// First non-empty trimmed string among `fields`, in priority order.
fn first_string(record: &RawRecord, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| {
        record
            .get(*field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    })
}

fn weight_of(record: &RawRecord) -> f64 {
    if let Some(value) = present(record, WEIGHT_FRACTION) {
        return as_f64(value).map(|v| round2(v * 100.0)).unwrap_or(0.0);
    }
    if let Some(value) = present(record, WEIGHT_ROUNDED) {
        return as_f64(value).unwrap_or(0.0);
    }
    0.0
}

// a JSON null counts as an absent field
fn present<'a>(record: &'a RawRecord, field: &str) -> Option<&'a Value> {
    record.get(field).filter(|value| !value.is_null())
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn round2(weight: f64) -> f64 {
    (weight * 100.0).round() / 100.0
}
