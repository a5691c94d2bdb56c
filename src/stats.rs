// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Value distribution over transfer records
//!
//! Records are grouped by exact transfer value. Every group becomes one
//! [`DistributionRow`] holding the number of transfers at that value and its
//! share of the total. Rows are ordered by descending count; equal counts keep
//! the order in which their value was first seen.
//!
//! Both the displayed value and the percentage are floored, so near-equal
//! values can display identically and percentages rarely sum to 100.
//!
//! # Examples
//!
//! ```rust
//! use transferscan::distribution_from_values;
//!
//! let rows = distribution_from_values([10.0, 10.0, 10.0, 5.0]);
//! assert_eq!(rows.len(), 2);
//! assert_eq!((rows[0].value, rows[0].owner_count, rows[0].percentage), (10.0, 3, 75));
//! assert_eq!((rows[1].value, rows[1].owner_count, rows[1].percentage), (5.0, 1, 25));
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;

use crate::normalize::TransferRecord;

/// One bucket of the value distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionRow {
    /// Dense 1-based row number
    pub index: usize,
    /// Bucket value, floored
    pub value: f64,
    /// Number of transfers with this exact value
    pub owner_count: usize,
    /// `owner_count * 100 / total`, floored
    pub percentage: u32,
}

/// Distribution of the `value` field over `records`
pub fn value_distribution(records: &[TransferRecord]) -> Vec<DistributionRow> {
    distribution_from_values(records.iter().map(|record| record.value))
}

/// Distribution over raw values; empty input gives no rows
pub fn distribution_from_values<I>(values: I) -> Vec<DistributionRow>
where
    I: IntoIterator<Item = f64>,
{
    let mut buckets: Vec<(f64, usize)> = Vec::new();
    let mut positions: HashMap<u64, usize> = HashMap::new();
    let mut total = 0usize;

    for value in values {
        total += 1;
        match positions.entry(bucket_key(value)) {
            Entry::Occupied(slot) => buckets[*slot.get()].1 += 1,
            Entry::Vacant(slot) => {
                slot.insert(buckets.len());
                buckets.push((value, 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    buckets.sort_by(|a, b| b.1.cmp(&a.1));

    buckets
        .into_iter()
        .enumerate()
        .map(|(position, (value, owner_count))| DistributionRow {
            index: position + 1,
            value: value.floor(),
            owner_count,
            percentage: floor_percentage(owner_count, total),
        })
        .collect()
}

/// Grouping key; `-0.0` and `0.0` share a bucket.
fn bucket_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

fn floor_percentage(count: usize, total: usize) -> u32 {
    // count <= total, so the quotient is at most 100
    ((count as u128 * 100) / total as u128) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert!(distribution_from_values(Vec::<f64>::new()).is_empty());
        assert!(value_distribution(&[]).is_empty());
    }

    #[test]
    fn test_frequency_order() {
        let rows = distribution_from_values([10.0, 10.0, 10.0, 5.0]);
        assert_eq!(
            rows,
            vec![
                DistributionRow {
                    index: 1,
                    value: 10.0,
                    owner_count: 3,
                    percentage: 75,
                },
                DistributionRow {
                    index: 2,
                    value: 5.0,
                    owner_count: 1,
                    percentage: 25,
                },
            ]
        );
    }

    #[test]
    fn test_single_bucket_is_100_percent() {
        let rows = distribution_from_values([2.5, 2.5]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].percentage, 100);
        assert_eq!(rows[0].value, 2.0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let rows = distribution_from_values([7.0, 3.0, 3.0, 7.0, 1.0]);
        let values: Vec<_> = rows.iter().map(|row| row.value).collect();
        assert_eq!(values, vec![7.0, 3.0, 1.0]);
        assert_eq!(rows.iter().map(|row| row.index).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_floor_does_not_merge_buckets() {
        // 1.2 and 1.7 group separately and both display as 1
        let rows = distribution_from_values([1.2, 1.7, 1.7]);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].value, rows[0].owner_count), (1.0, 2));
        assert_eq!((rows[1].value, rows[1].owner_count), (1.0, 1));
    }

    #[test]
    fn test_percentage_is_floored() {
        // 1/3 = 33.33.., 2/3 = 66.66..
        let rows = distribution_from_values([4.0, 4.0, 9.0]);
        assert_eq!(rows[0].percentage, 66);
        assert_eq!(rows[1].percentage, 33);

        // 29/100 would be 28.999.. in floating point
        let values = std::iter::repeat(1.0).take(29).chain(std::iter::repeat(2.0).take(71));
        let rows = distribution_from_values(values);
        assert_eq!(rows[1].percentage, 29);
    }

    #[test]
    fn test_signed_zero_shares_bucket() {
        let rows = distribution_from_values([0.0, -0.0]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].owner_count, 2);
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_input_len(values in prop::collection::vec(0u32..20, 1..200)) {
            let rows = distribution_from_values(values.iter().map(|v| *v as f64));

            let total: usize = rows.iter().map(|row| row.owner_count).sum();
            prop_assert_eq!(total, values.len());

            for (position, row) in rows.iter().enumerate() {
                prop_assert!(row.percentage <= 100);
                prop_assert_eq!(row.index, position + 1);
            }

            for pair in rows.windows(2) {
                prop_assert!(pair[0].owner_count >= pair[1].owner_count);
            }
        }
    }
}
