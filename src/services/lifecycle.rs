// SPDX-License-Identifier: MIT

//! Record lifecycle model: stage completion, list filtering, bill numbers.
//!
//! This is a pure-function layer over [`BikeRecord`]; it never touches the
//! database. Completion flags are strict two-field conjunctions per stage,
//! regardless of how many other fields in that stage are filled.

use crate::models::BikeRecord;
use std::str::FromStr;

/// Completion flags derived from a record's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StageCompletion {
    /// Purchased: registration number and seller name present
    pub part1: bool,
    /// Repaired: repair description and cost present
    pub part2: bool,
    /// Sold: buyer name and sale price present
    pub part3: bool,
}

impl StageCompletion {
    pub fn of(bike: &BikeRecord) -> Self {
        Self {
            part1: !bike.registration_number.is_empty() && !bike.seller_name.is_empty(),
            part2: !bike.repair_description.is_empty() && !bike.repair_cost.is_empty(),
            part3: !bike.buyer_name.is_empty() && !bike.sale_price.is_empty(),
        }
    }
}

/// Stage filter for the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageFilter {
    #[default]
    All,
    Purchased,
    Repair,
    Sold,
    Complete,
}

impl FromStr for StageFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "purchased" => Ok(Self::Purchased),
            "repair" => Ok(Self::Repair),
            "sold" => Ok(Self::Sold),
            "complete" => Ok(Self::Complete),
            _ => Err(()),
        }
    }
}

/// Bought but not yet on the market as sold.
///
/// Deliberately stricter than `part1 && !part3`: a record with either sale
/// field filled (buyer recorded, price pending, or vice versa) is no longer
/// available stock. Backs both the `purchased` filter and the dashboard's
/// ready-to-sell view so the two can never disagree.
pub fn is_ready_for_sale(bike: &BikeRecord) -> bool {
    StageCompletion::of(bike).part1 && bike.buyer_name.is_empty() && bike.sale_price.is_empty()
}

/// Fields searched by the free-text filter.
fn search_haystack(bike: &BikeRecord) -> [&str; 7] {
    [
        &bike.registration_number,
        &bike.seller_name,
        &bike.buyer_name,
        &bike.account_number,
        &bike.buyer_cnic,
        &bike.seller_cnic,
        &bike.chassis_number,
    ]
}

/// Filter and search a record list.
///
/// The stage filter and the search compose with AND; output preserves input
/// order. Search is a case-insensitive substring match over the identifying
/// fields; a record matches if any field contains the text.
pub fn filter_bikes<'a>(
    bikes: &'a [BikeRecord],
    filter: StageFilter,
    search: &str,
) -> Vec<&'a BikeRecord> {
    let needle = search.trim().to_lowercase();

    bikes
        .iter()
        .filter(|bike| {
            let s = StageCompletion::of(bike);
            match filter {
                StageFilter::All => true,
                StageFilter::Purchased => is_ready_for_sale(bike),
                StageFilter::Repair => s.part2,
                StageFilter::Sold => s.part3,
                StageFilter::Complete => s.part1 && s.part2 && s.part3,
            }
        })
        .filter(|bike| {
            needle.is_empty()
                || search_haystack(bike)
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

const FIRST_BILL_NUMBER: u64 = 101;

/// Next sequential bill number (`B-<n>`).
///
/// Returns one past the greatest well-formed bill number in `bikes`, or
/// `B-101` when none exists. Malformed bill numbers are skipped with a
/// warning rather than failing intake.
pub fn next_bill_number(bikes: &[BikeRecord]) -> String {
    let max = bikes
        .iter()
        .filter(|b| !b.bill_number.is_empty())
        .filter_map(|b| match b.bill_number.strip_prefix("B-") {
            Some(digits) => digits.parse::<u64>().ok().or_else(|| {
                tracing::warn!(bill_number = %b.bill_number, "Skipping malformed bill number");
                None
            }),
            None => {
                tracing::warn!(bill_number = %b.bill_number, "Skipping malformed bill number");
                None
            }
        })
        .max();

    match max {
        Some(n) => format!("B-{}", n + 1),
        None => format!("B-{}", FIRST_BILL_NUMBER),
    }
}
