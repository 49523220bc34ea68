use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// カテゴリ別の件数（円グラフ・棒グラフ用の系列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Ord + Serialize",
    deserialize = "K: Ord + Deserialize<'de>"
))]
pub struct CountDistribution<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for CountDistribution<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> CountDistribution<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: K) -> usize {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// キー順に走査
    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }

    /// 件数の多い順（同数ならキー順）
    pub fn by_count_desc(&self) -> Vec<(K, usize)> {
        let mut entries: Vec<(K, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

impl<K: Ord + Copy> FromIterator<K> for CountDistribution<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut distribution = Self::new();
        for key in iter {
            distribution.add(key);
        }
        distribution
    }
}
