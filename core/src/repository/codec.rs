use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::DecodeFormatError;
use crate::model::schedule::ScheduleStore;
use crate::model::shift::ShiftType;
use crate::time::parse_iso_date;

/// Writes the store as `{"YYYY-MM-DD": "SHIFT", ...}` in date order.
pub fn encode(store: &ScheduleStore) -> String {
    encode_entries(&store.snapshot())
}

pub fn encode_entries(entries: &[(NaiveDate, ShiftType)]) -> String {
    let map: BTreeMap<String, &'static str> = entries
        .iter()
        .map(|(date, shift)| (date.format("%Y-%m-%d").to_string(), shift.name()))
        .collect();
    // a map of plain strings always serializes
    serde_json::to_string_pretty(&map).unwrap_or_else(|_| String::from("{}"))
}

/// Parses an export. Every entry is validated before anything is returned.
pub fn decode(text: &str) -> Result<Vec<(NaiveDate, ShiftType)>, DecodeFormatError> {
    let raw: BTreeMap<String, String> = serde_json::from_str(text)?;

    raw.into_iter()
        .map(|(key, name)| {
            // chrono also takes `2024-3-4` or `+2024-03-04`; only the canonical spelling is a key
            let date = parse_iso_date(&key)
                .filter(|date| date.format("%Y-%m-%d").to_string() == key)
                .ok_or_else(|| DecodeFormatError::InvalidDate { key: key.clone() })?;
            let shift = ShiftType::from_identifier(&name).ok_or(DecodeFormatError::UnknownShift { date: key, name })?;
            Ok((date, shift))
        })
        .collect()
}

/// Decodes `text` into `store`, leaving the store untouched on error.
pub fn import_into(store: &mut ScheduleStore, text: &str) -> Result<usize, DecodeFormatError> {
    let entries = decode(text)?;
    let count = entries.len();
    store.replace_all(entries);
    Ok(count)
}
