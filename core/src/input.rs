use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use crate::model::shift::ShiftType;
use crate::time::parse_human_date;

const CLEAR_WORDS: [&str; 4] = ["none", "clear", "off", "-"];

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    let key = key.to_lowercase();

    // 1. Exact match
    if candidates.contains(&key.as_str()) {
        return Ok(key);
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(&key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Reads a shift typed by the user: an identifier, a label such as `8-24`,
/// or an unambiguous prefix. Clearing words yield `None`.
pub fn parse_shift_arg(input: &str) -> Result<Option<ShiftType>> {
    let input = input.trim();
    if CLEAR_WORDS.iter().any(|w| w.eq_ignore_ascii_case(input)) {
        return Ok(None);
    }
    if let Ok(shift) = input.parse::<ShiftType>() {
        return Ok(Some(shift));
    }

    let names: Vec<String> = ShiftType::ALL.iter().map(|s| s.name().to_lowercase()).collect();
    let candidates: Vec<&str> = names.iter().map(String::as_str).collect();
    let name = expand_key(input, &candidates)?;
    ShiftType::from_name(&name)
        .map(Some)
        .ok_or_else(|| anyhow!("Unknown shift type: {}", input))
}

/// Parses `DATE:SHIFT` tokens. Fails on the first bad token, so callers can
/// apply all or nothing.
pub fn parse_assignments(args: &[String], today: NaiveDate) -> Result<Vec<(NaiveDate, Option<ShiftType>)>> {
    args.iter()
        .map(|arg| {
            let (date, shift) = arg
                .split_once(':')
                .ok_or_else(|| anyhow!("Expected DATE:SHIFT, got '{}'", arg))?;
            let date = parse_human_date(date, today).with_context(|| format!("in '{}'", arg))?;
            let shift = parse_shift_arg(shift).with_context(|| format!("in '{}'", arg))?;
            Ok((date, shift))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["morning", "night", "full", "day16", "evening"];

        assert_eq!(expand_key("m", &candidates).unwrap(), "morning");
        assert_eq!(expand_key("NI", &candidates).unwrap(), "night");
        assert_eq!(expand_key("day16", &candidates).unwrap(), "day16");

        // Unknown
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_expand_key_ambiguous() {
        let candidates = vec!["day16", "daily", "evening"];
        assert!(expand_key("d", &candidates).is_err());
        assert!(expand_key("da", &candidates).is_err());
        assert_eq!(expand_key("day", &candidates).unwrap(), "day16");
        assert_eq!(expand_key("dai", &candidates).unwrap(), "daily");
    }

    #[test]
    fn test_parse_shift_arg() {
        assert_eq!(parse_shift_arg("FULL").unwrap(), Some(ShiftType::Full));
        assert_eq!(parse_shift_arg("16-24").unwrap(), Some(ShiftType::Evening));
        assert_eq!(parse_shift_arg("d").unwrap(), Some(ShiftType::Day16));
        assert_eq!(parse_shift_arg("eve").unwrap(), Some(ShiftType::Evening));
        assert_eq!(parse_shift_arg("none").unwrap(), None);
        assert_eq!(parse_shift_arg("-").unwrap(), None);
        assert!(parse_shift_arg("nightx").is_err());
    }

    #[test]
    fn test_parse_assignments() {
        let today = date(2024, 3, 4);
        let args = vec!["2024-03-05:night".to_string(), "today:f".to_string(), "tom:none".to_string()];
        assert_eq!(
            parse_assignments(&args, today).unwrap(),
            vec![
                (date(2024, 3, 5), Some(ShiftType::Night)),
                (today, Some(ShiftType::Full)),
                (date(2024, 3, 5), None),
            ]
        );

        let bad = vec!["2024-03-05:night".to_string(), "2024-03-06".to_string()];
        assert!(parse_assignments(&bad, today).is_err());
    }
}
