// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Rupiah banknote classes emitted by the detector

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indonesian Rupiah banknote denominations, indexed by detector class id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Denomination {
    Rp1000,
    Rp2000,
    Rp5000,
    Rp10000,
    Rp20000,
    Rp50000,
    Rp100000,
}

impl Denomination {
    pub const ALL: [Denomination; 7] = [
        Denomination::Rp1000,
        Denomination::Rp2000,
        Denomination::Rp5000,
        Denomination::Rp10000,
        Denomination::Rp20000,
        Denomination::Rp50000,
        Denomination::Rp100000,
    ];

    /// Map a detector class id to a denomination; unknown ids map to `None`
    pub fn from_class_id(class_id: u32) -> Option<Self> {
        Self::ALL.get(class_id as usize).copied()
    }

    pub fn class_id(self) -> u32 {
        Self::ALL
            .iter()
            .position(|d| *d == self)
            .map(|i| i as u32)
            .unwrap_or_default()
    }

    /// Face value in rupiah
    pub fn nominal(self) -> u64 {
        match self {
            Denomination::Rp1000 => 1_000,
            Denomination::Rp2000 => 2_000,
            Denomination::Rp5000 => 5_000,
            Denomination::Rp10000 => 10_000,
            Denomination::Rp20000 => 20_000,
            Denomination::Rp50000 => 50_000,
            Denomination::Rp100000 => 100_000,
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_rupiah(self.nominal()))
    }
}

/// Nominal value for a class id, 0 when the class is not a known banknote
pub fn nominal_for_class(class_id: u32) -> u64 {
    Denomination::from_class_id(class_id)
        .map(Denomination::nominal)
        .unwrap_or(0)
}

/// Format an amount the way id-ID locales print rupiah: `Rp 1.250.000`
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp {}", grouped)
}
