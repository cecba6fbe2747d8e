use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::parser::OrderLine;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCount {
    pub label: String,
    pub count: usize,
}

/// Labels sorted by count descending, ties by label ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking(Vec<RankedCount>);

impl Ranking {
    fn from_counts(counts: HashMap<&str, usize>) -> Self {
        let mut items: Vec<RankedCount> = counts
            .into_iter()
            .map(|(label, count)| RankedCount {
                label: label.to_string(),
                count,
            })
            .collect();
        items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        Ranking(items)
    }

    pub fn items(&self) -> &[RankedCount] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `n` highest counts, highest first.
    pub fn best(&self, n: usize) -> Vec<RankedCount> {
        self.0.iter().take(n).cloned().collect()
    }

    /// The `n` lowest counts, lowest first. Taken from the tail of the same
    /// ordering as `best`, so the two never overlap while `len() >= 2 * n`.
    pub fn worst(&self, n: usize) -> Vec<RankedCount> {
        self.0.iter().rev().take(n).cloned().collect()
    }
}

/// Distinct products sold per category. Rows without a category are ignored,
/// rows without a product register the category with no product.
pub fn category_performance(rows: &[&OrderLine]) -> Ranking {
    distinct_per_group(
        rows,
        |r| r.category.as_deref(),
        |r| r.product_id.as_deref(),
    )
}

/// Distinct customers per state. Rows without a state are ignored.
pub fn customers_by_region(rows: &[&OrderLine]) -> Ranking {
    distinct_per_group(
        rows,
        |r| r.customer_state.as_deref(),
        |r| Some(r.customer_unique_id.as_str()),
    )
}

fn distinct_per_group<'a>(
    rows: &[&'a OrderLine],
    group: impl Fn(&'a OrderLine) -> Option<&'a str>,
    member: impl Fn(&'a OrderLine) -> Option<&'a str>,
) -> Ranking {
    let mut groups: HashMap<&'a str, HashSet<&'a str>> = HashMap::new();
    for &row in rows {
        let Some(key) = group(row) else {
            continue;
        };
        let members = groups.entry(key).or_default();
        if let Some(m) = member(row) {
            members.insert(m);
        }
    }

    Ranking::from_counts(
        groups
            .into_iter()
            .map(|(key, members)| (key, members.len()))
            .collect(),
    )
}
