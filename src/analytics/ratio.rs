use serde::{Deserialize, Serialize};
use std::fmt;

/// 件数ベースの比率
///
/// 分母が0の場合は値を持たず、表示は`N/A`になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ratio {
    pub count: usize,
    pub total: usize,
}

impl Ratio {
    pub fn new(count: usize, total: usize) -> Self {
        debug_assert!(count <= total, "count must not exceed total");
        Self { count, total }
    }

    /// 条件を満たす要素の比率を計算
    pub fn of<T>(items: impl IntoIterator<Item = T>, predicate: impl Fn(&T) -> bool) -> Self {
        let (count, total) = items.into_iter().fold((0, 0), |(count, total), item| {
            (count + usize::from(predicate(&item)), total + 1)
        });
        Self { count, total }
    }

    /// 0.0〜1.0の値（分母0ならNone）
    pub fn value(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.count as f64 / self.total as f64)
        }
    }

    pub fn is_applicable(&self) -> bool {
        self.total > 0
    }

    pub fn percentage(&self) -> Option<f64> {
        self.value().map(|v| v * 100.0)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percentage() {
            Some(pct) => write!(f, "{:.1}%", pct),
            None => write!(f, "N/A"),
        }
    }
}
