use log::{debug, warn};

use crate::core::constants::{
    CONFIG_HEADERS, CONFIG_KEY_SPLIT_A, CONFIG_KEY_SPLIT_B, DEFAULT_CATEGORIES, LEGACY_CONFIG_KEY_SPLIT_A,
    LEGACY_CONFIG_KEY_SPLIT_B,
};
use crate::core::models::{Settings, SplitRatio};

fn lookup<'a>(rows: &'a [Vec<String>], keys: &[&str]) -> Option<&'a str> {
    rows.iter().find_map(|row| {
        let key = row.first()?.trim();
        keys.iter()
            .any(|k| key.eq_ignore_ascii_case(k))
            .then(|| row.get(1).map(|v| v.trim()).unwrap_or(""))
    })
}

fn proportion(raw: Option<&str>) -> Option<f64> {
    raw?.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (0.0..=1.0).contains(v))
}

/// Reads the default split from the `key,value` config sheet.
///
/// When only one side is usable the other is its complement. When neither is,
/// the built-in 0.6/0.4 split applies.
pub fn parse_default_split(values: &[Vec<String>]) -> SplitRatio {
    if values.len() < 2 {
        debug!("Config sheet is empty, using default split");
        return SplitRatio::default();
    }
    let rows = &values[1..];
    let a = proportion(lookup(rows, &[CONFIG_KEY_SPLIT_A, LEGACY_CONFIG_KEY_SPLIT_A]));
    let b = proportion(lookup(rows, &[CONFIG_KEY_SPLIT_B, LEGACY_CONFIG_KEY_SPLIT_B]));
    match (a, b) {
        (Some(a), Some(b)) => SplitRatio::new(a, b),
        (Some(a), None) => SplitRatio::new(a, 1.0 - a),
        (None, Some(b)) => SplitRatio::new(1.0 - b, b),
        (None, None) => {
            warn!("Config sheet has no usable split, using default split");
            SplitRatio::default()
        }
    }
}

/// Reads the category list, one category per row in the first column.
pub fn parse_categories(values: &[Vec<String>]) -> Vec<String> {
    let categories: Vec<String> = values
        .iter()
        .filter_map(|row| row.first())
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect();
    if categories.is_empty() {
        return DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
    }
    categories
}

pub fn parse_settings(config_values: &[Vec<String>], category_values: &[Vec<String>]) -> Settings {
    Settings {
        default_split: parse_default_split(config_values),
        categories: parse_categories(category_values),
    }
}

/// Config sheet contents for `settings`, header included.
pub fn config_rows(settings: &Settings) -> Vec<Vec<String>> {
    vec![
        CONFIG_HEADERS.iter().map(|h| h.to_string()).collect(),
        vec![CONFIG_KEY_SPLIT_A.to_string(), settings.default_split.a.to_string()],
        vec![CONFIG_KEY_SPLIT_B.to_string(), settings.default_split.b.to_string()],
    ]
}

pub fn category_rows(settings: &Settings) -> Vec<Vec<String>> {
    settings.categories.iter().map(|c| vec![c.clone()]).collect()
}
