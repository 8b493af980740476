//! Town ranking with a bounded tie rule at the cutoff.

use std::collections::{BTreeMap, HashMap};

use crate::models::{TownCount, TownRanking};

/// Number of ranked towns before tie handling.
pub const TOP_TOWNS: usize = 10;

/// Maximum towns kept when ties at the cutoff are included.
pub const MAX_TOWNS_WITH_TIES: usize = 20;

/// Rank towns by count descending, then name ascending.
///
/// With more than [`TOP_TOWNS`] towns, the count at rank 10 is the boundary.
/// Towns past rank 10 that share the boundary count are kept as well, unless
/// that would exceed [`MAX_TOWNS_WITH_TIES`]; in that case every town at the
/// boundary count is dropped, including those inside the top 10.
pub fn rank_towns(counts: &HashMap<String, u32>) -> TownRanking {
    let mut sorted: Vec<TownCount> = counts
        .iter()
        .map(|(name, count)| TownCount::new(name.clone(), *count))
        .collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    if sorted.len() <= TOP_TOWNS {
        return TownRanking(sorted);
    }

    let boundary = sorted[TOP_TOWNS - 1].count;
    let tied_beyond = sorted[TOP_TOWNS..]
        .iter()
        .take_while(|t| t.count == boundary)
        .count();

    if TOP_TOWNS + tied_beyond > MAX_TOWNS_WITH_TIES {
        sorted.retain(|t| t.count > boundary);
    } else {
        sorted.truncate(TOP_TOWNS + tied_beyond);
    }

    TownRanking(sorted)
}

/// Rank every year's towns.
pub fn rank_towns_by_year(
    counts: &BTreeMap<String, HashMap<String, u32>>,
) -> BTreeMap<String, TownRanking> {
    counts
        .iter()
        .map(|(year, towns)| (year.clone(), rank_towns(towns)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn counts(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
        pairs.iter().map(|(n, c)| (n.to_string(), *c)).collect()
    }

    fn town_names(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}{:02}", prefix, i)).collect()
    }

    #[test]
    fn test_few_towns_all_included() {
        let ranking = rank_towns(&counts(&[("A", 15), ("B", 12), ("C", 10), ("D", 10)]));

        assert_eq!(ranking.names(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_tie_break_by_name() {
        let ranking = rank_towns(&counts(&[("Zalău", 3), ("Arad", 3), ("Brașov", 5)]));

        assert_eq!(ranking.names(), vec!["Brașov", "Arad", "Zalău"]);
    }

    #[test]
    fn test_name_order_is_bytewise() {
        // "Ș" sorts after every ASCII letter in plain string order
        let ranking = rank_towns(&counts(&[("Șimleu", 1), ("Zimnicea", 1)]));

        assert_eq!(ranking.names(), vec!["Zimnicea", "Șimleu"]);
    }

    #[test]
    fn test_exactly_ten_towns() {
        let names = town_names("T", 10);
        let map: HashMap<String, u32> = names.iter().map(|n| (n.clone(), 1)).collect();

        assert_eq!(rank_towns(&map).len(), 10);
    }

    #[test]
    fn test_no_ties_at_boundary() {
        let map: HashMap<String, u32> = (0..15u32).map(|i| (format!("T{:02}", i), 100 - i)).collect();

        let ranking = rank_towns(&map);

        assert_eq!(ranking.len(), 10);
        assert_eq!(ranking.0[9].count, 91);
    }

    #[test]
    fn test_small_tie_cluster_included() {
        let mut map = counts(&[("A", 15), ("B", 12)]);
        for name in town_names("Tie", 12) {
            map.insert(name, 10);
        }
        map.insert("Low".to_string(), 2);

        let ranking = rank_towns(&map);

        // 2 leaders + 12 ties = 14 towns, within the cap
        assert_eq!(ranking.len(), 14);
        assert_eq!(ranking.names()[..2], ["A", "B"]);
        assert!(ranking.get("Low").is_none());
        assert!(ranking.0[2..].iter().all(|t| t.count == 10));
    }

    #[test]
    fn test_large_tie_cluster_excluded() {
        let mut map = counts(&[("A", 15), ("B", 12)]);
        for name in town_names("Tie", 19) {
            map.insert(name, 10);
        }

        let ranking = rank_towns(&map);

        // 10 + 11 tied beyond the cutoff exceeds 20, so every 10 is dropped
        assert_eq!(ranking.names(), vec!["A", "B"]);
    }

    #[test]
    fn test_tie_cluster_exactly_at_cap() {
        let mut map = HashMap::new();
        for name in town_names("Tie", 20) {
            map.insert(name, 4);
        }

        assert_eq!(rank_towns(&map).len(), 20);

        map.insert("Extra".to_string(), 4);
        assert!(rank_towns(&map).is_empty());
    }

    #[test]
    fn test_rank_towns_by_year() {
        let mut by_year = BTreeMap::new();
        by_year.insert("2024".to_string(), counts(&[("Cluj-Napoca", 2)]));
        by_year.insert("2025".to_string(), counts(&[("Sibiu", 1), ("Arad", 4)]));

        let ranked = rank_towns_by_year(&by_year);

        assert_eq!(ranked["2024"].names(), vec!["Cluj-Napoca"]);
        assert_eq!(ranked["2025"].names(), vec!["Arad", "Sibiu"]);
    }
}
