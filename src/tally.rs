// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Running money count built from detection results

use serde::Serialize;

use crate::currency::{format_rupiah, Denomination};
use crate::vision::Prediction;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TallyEntry {
    pub denomination: Denomination,
    pub count: u64,
    pub subtotal: u64,
}

impl TallyEntry {
    pub fn nominal(&self) -> u64 {
        self.denomination.nominal()
    }
}

/// Per-denomination counts in the order each denomination was first seen
#[derive(Debug, Clone, Default, Serialize)]
pub struct MoneyTally {
    entries: Vec<TallyEntry>,
    min_confidence: f32,
}

impl MoneyTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore predictions below `min_confidence`
    pub fn with_min_confidence(min_confidence: f32) -> Self {
        Self {
            entries: Vec::new(),
            min_confidence,
        }
    }

    /// Count every prediction that maps to a banknote and clears the
    /// confidence floor. Returns how many were counted.
    pub fn record(&mut self, predictions: &[Prediction]) -> usize {
        let mut counted = 0;
        for prediction in predictions {
            if prediction.confidence < self.min_confidence {
                continue;
            }
            let Some(denomination) = Denomination::from_class_id(prediction.class_id) else {
                continue;
            };

            match self
                .entries
                .iter_mut()
                .find(|e| e.denomination == denomination)
            {
                Some(entry) => {
                    entry.count += 1;
                    entry.subtotal = entry.count * denomination.nominal();
                }
                None => self.entries.push(TallyEntry {
                    denomination,
                    count: 1,
                    subtotal: denomination.nominal(),
                }),
            }
            counted += 1;
        }
        counted
    }

    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// `count,nominal,subtotal` rows followed by a `,,<total>` line
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("count,nominal,subtotal\n");
        for entry in &self.entries {
            csv.push_str(&format!(
                "{},{},{}\n",
                entry.count,
                entry.nominal(),
                entry.subtotal
            ));
        }
        csv.push_str(&format!(",,{}\n", self.total()));
        csv
    }

    /// Human readable table, one line per denomination plus the total
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!(
                "{:>4} x {:<12} = {}\n",
                entry.count,
                format_rupiah(entry.nominal()),
                format_rupiah(entry.subtotal)
            ));
        }
        out.push_str(&format!("Total: {}\n", format_rupiah(self.total())));
        out
    }
}
