//! Merchant partitioning of an estimate's cart lines.

use rustc_hash::FxHashMap;

use crate::{cart::CartLine, catalog::MerchantId};

/// Group cart lines by merchant id.
///
/// Groups appear in first-appearance order of their merchant, lines keep
/// their submission order within a group, and every input line lands in
/// exactly one group. Flattening the groups therefore yields a
/// permutation of `lines` partitioned by merchant.
#[must_use]
pub fn partition_lines(lines: &[CartLine]) -> Vec<(MerchantId, Vec<CartLine>)> {
    let mut order: Vec<MerchantId> = Vec::new();
    let mut groups: FxHashMap<MerchantId, Vec<CartLine>> = FxHashMap::default();

    for line in lines {
        let group = groups.entry(line.merchant_id.clone()).or_insert_with(|| {
            order.push(line.merchant_id.clone());
            Vec::new()
        });
        group.push(line.clone());
    }

    order
        .into_iter()
        .filter_map(|id| groups.remove(&id).map(|lines| (id, lines)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(merchant: &str, item: &str, quantity: u32) -> CartLine {
        CartLine {
            merchant_id: merchant.into(),
            item_id: item.into(),
            quantity,
        }
    }

    #[test]
    fn one_group_per_distinct_merchant() {
        let lines = [
            line("m1", "i1", 1),
            line("m2", "i2", 2),
            line("m1", "i3", 3),
        ];

        let groups = partition_lines(&lines);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0.as_str(), "m1");
        assert_eq!(groups[1].0.as_str(), "m2");
    }

    #[test]
    fn every_line_lands_in_exactly_one_group() {
        let lines = [
            line("m2", "i1", 1),
            line("m1", "i2", 2),
            line("m2", "i3", 3),
            line("m3", "i4", 4),
        ];

        let groups = partition_lines(&lines);

        let mut flattened: Vec<CartLine> = groups
            .iter()
            .flat_map(|(_, lines)| lines.iter().cloned())
            .collect();
        flattened.sort_by(|a, b| a.item_id.cmp(&b.item_id));

        let mut expected = lines.to_vec();
        expected.sort_by(|a, b| a.item_id.cmp(&b.item_id));

        assert_eq!(flattened, expected);

        for (merchant_id, lines) in &groups {
            assert!(
                lines.iter().all(|l| l.merchant_id == *merchant_id),
                "group for {merchant_id} contains a foreign line"
            );
        }
    }

    #[test]
    fn no_lines_means_no_groups() {
        assert!(partition_lines(&[]).is_empty());
    }
}
