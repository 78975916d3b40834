use std::{collections::BTreeMap, fmt};

use serde::Serialize;

/// One aggregated entry of a shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

impl fmt::Display for ShoppingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = format!("• {} {} {}", self.name, self.amount, self.measurement_unit);

        f.write_str(line.trim_end())
    }
}

/// Sums `(name, measurement_unit, amount)` rows per name and unit, ordered by
/// name then unit.
pub fn aggregate<I>(rows: I) -> Vec<ShoppingLine>
where
    I: IntoIterator<Item = (String, String, i64)>,
{
    let mut groups: BTreeMap<(String, String), i64> = BTreeMap::new();

    for (name, unit, amount) in rows {
        let total = groups.entry((name, unit)).or_default();
        *total = total.saturating_add(amount);
    }

    groups
        .into_iter()
        .map(|((name, measurement_unit), amount)| ShoppingLine {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}
