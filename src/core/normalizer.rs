//! Turns the raw transactions sheet into a typed [`Ledger`].
//!
//! Older versions of the ledger wrote narrower rows (no `currency`, no
//! per-row split) and the sheet may contain ragged rows. None of that is an
//! error here: every row is padded or truncated to the header, every cell is
//! parsed into a [`Cell`], and unreadable values become missing. Sheets that
//! name the per-row split after the parties (`split_juan`, `amount_mailu`)
//! are read as `split_a`/`split_b` and `amount_a`/`amount_b`.

use log::debug;
use std::collections::HashMap;

use crate::core::constants::*;
use crate::core::models::{Cell, ColumnKind, Ledger, Parties, Party, Transaction};

/// Position at which a missing `currency` column is inserted.
pub fn currency_insert_position(header: &[String]) -> Option<usize> {
    if header.iter().any(|label| is_label(label, COL_CURRENCY)) {
        return None;
    }
    let position = header
        .iter()
        .position(|label| is_label(label, COL_CATEGORY))
        .map(|idx| idx + 1)
        .unwrap_or(header.len());
    Some(position)
}

/// Header with `currency` inserted after `category` (or appended) when absent.
pub fn patch_header(header: &[String]) -> Vec<String> {
    let mut patched: Vec<String> = header.iter().map(|label| label.trim().to_string()).collect();
    if let Some(position) = currency_insert_position(header) {
        patched.insert(position, COL_CURRENCY.to_string());
    }
    patched
}

/// Pads with empty cells or truncates so that `row` has exactly `width` cells.
pub fn pad_row(row: &[String], width: usize) -> Vec<String> {
    let mut fixed: Vec<String> = row.iter().take(width).cloned().collect();
    fixed.resize(width, String::new());
    fixed
}

pub fn normalize(values: &[Vec<String>], base_currency: &str, parties: &Parties) -> Ledger {
    if values.len() < 2 {
        debug!("Transactions sheet has no data rows, returning empty ledger");
        return Ledger::empty();
    }

    let raw_header = &values[0];
    let inserted_at = currency_insert_position(raw_header);
    let columns = patch_header(raw_header);
    let index = ColumnIndex::new(&columns, parties);
    let width = columns.len();

    let mut padded = 0usize;
    let mut truncated = 0usize;
    let transactions = values[1..]
        .iter()
        .map(|row| {
            let mut row = row.clone();
            if let Some(position) = inserted_at {
                if position <= row.len() {
                    row.insert(position, String::new());
                }
            }
            if row.len() < width {
                padded += 1;
            } else if row.len() > width {
                truncated += 1;
            }
            index.parse(&pad_row(&row, width), base_currency)
        })
        .collect::<Vec<_>>();

    debug!(
        "Normalized {} transactions ({} padded, {} truncated, currency column {})",
        transactions.len(),
        padded,
        truncated,
        if inserted_at.is_some() { "inserted" } else { "present" }
    );

    Ledger { columns, transactions }
}

fn is_label(label: &str, expected: &str) -> bool {
    label.trim().eq_ignore_ascii_case(expected)
}

struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(columns: &[String], parties: &Parties) -> Self {
        let mut positions = HashMap::new();
        for (idx, label) in columns.iter().enumerate() {
            positions.entry(label.trim().to_lowercase()).or_insert(idx);
        }

        // Party-named split columns stand in for absent canonical ones.
        let aliases = [
            (COL_SPLIT_A, "split", Party::A),
            (COL_SPLIT_B, "split", Party::B),
            (COL_AMOUNT_A, "amount", Party::A),
            (COL_AMOUNT_B, "amount", Party::B),
        ];
        for (canonical, prefix, party) in aliases {
            if positions.contains_key(canonical) {
                continue;
            }
            let alias = parties.column(prefix, party);
            if let Some(&idx) = positions.get(&alias) {
                debug!("Reading {} from legacy column {}", canonical, alias);
                positions.insert(canonical.to_string(), idx);
            }
        }
        ColumnIndex { positions }
    }

    fn cell(&self, row: &[String], label: &str) -> Cell {
        match self.positions.get(label).and_then(|&idx| row.get(idx)) {
            Some(raw) => Cell::parse(ColumnKind::of(label), raw),
            None => Cell::Missing,
        }
    }

    fn parse(&self, row: &[String], base_currency: &str) -> Transaction {
        let currency = self.cell(row, COL_CURRENCY).into_text().trim().to_string();
        Transaction {
            timestamp: self.cell(row, COL_TIMESTAMP).as_timestamp(),
            entry_user: self.cell(row, COL_ENTRY_USER).into_text(),
            paid_by: self.cell(row, COL_PAID_BY).into_text(),
            paid_for: self.cell(row, COL_PAID_FOR).into_text(),
            kind: self.cell(row, COL_TYPE).into_text(),
            category: self.cell(row, COL_CATEGORY).into_text(),
            currency: if currency.is_empty() {
                base_currency.to_string()
            } else {
                currency
            },
            amount: self.cell(row, COL_AMOUNT).as_number(),
            notes: self.cell(row, COL_NOTES).into_text(),
            split_a: self.cell(row, COL_SPLIT_A).as_number(),
            split_b: self.cell(row, COL_SPLIT_B).as_number(),
            amount_a: self.cell(row, COL_AMOUNT_A).as_number(),
            amount_b: self.cell(row, COL_AMOUNT_B).as_number(),
        }
    }
}
