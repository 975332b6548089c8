use serde::{Deserialize, Serialize};

/// Safely convert usize to f64 for percentage calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Fraction of `size` covered by `count`; 0.0 for an empty side
fn fraction(count: usize, size: usize) -> f64 {
    if size == 0 {
        0.0
    } else {
        count_to_f64(count) / count_to_f64(size)
    }
}

/// Overlap counts and percentages for one comparison.
///
/// Percentages are fractions in `[0, 1]` of each side's original size, never
/// of the residual left after direct matching, so the direct and indirect
/// figures add up to the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapResult {
    pub pila_size: usize,
    pub other_size: usize,

    pub direct_overlap: usize,
    pub pila_direct_overlap_percentage: f64,
    pub other_direct_overlap_percentage: f64,

    pub indirect_overlap: usize,
    pub pila_indirect_overlap_percentage: f64,
    pub other_indirect_overlap_percentage: f64,

    pub total_overlap: usize,
    pub pila_total_overlap_percentage: f64,
    pub other_total_overlap_percentage: f64,
}

/// A single displayed metric value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(usize),
    Fraction(f64),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            // Debug keeps the fractional part of whole numbers ("1.0", not "1")
            Self::Fraction(value) => write!(f, "{:?}", round4(*value)),
        }
    }
}

/// Round to 4 decimal places
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

impl OverlapResult {
    /// Aggregate phase counts against the original side sizes
    #[must_use]
    pub fn aggregate(pila_size: usize, other_size: usize, direct: usize, indirect: usize) -> Self {
        let total = direct + indirect;
        Self {
            pila_size,
            other_size,
            direct_overlap: direct,
            pila_direct_overlap_percentage: fraction(direct, pila_size),
            other_direct_overlap_percentage: fraction(direct, other_size),
            indirect_overlap: indirect,
            pila_indirect_overlap_percentage: fraction(indirect, pila_size),
            other_indirect_overlap_percentage: fraction(indirect, other_size),
            total_overlap: total,
            pila_total_overlap_percentage: fraction(total, pila_size),
            other_total_overlap_percentage: fraction(total, other_size),
        }
    }

    /// Metrics in canonical order, keyed by name
    #[must_use]
    pub fn entries(&self) -> [(&'static str, MetricValue); 11] {
        use MetricValue::{Count, Fraction};
        [
            ("pila_size", Count(self.pila_size)),
            ("other_size", Count(self.other_size)),
            ("direct_overlap", Count(self.direct_overlap)),
            (
                "pila_direct_overlap_percentage",
                Fraction(self.pila_direct_overlap_percentage),
            ),
            (
                "other_direct_overlap_percentage",
                Fraction(self.other_direct_overlap_percentage),
            ),
            ("indirect_overlap", Count(self.indirect_overlap)),
            (
                "pila_indirect_overlap_percentage",
                Fraction(self.pila_indirect_overlap_percentage),
            ),
            (
                "other_indirect_overlap_percentage",
                Fraction(self.other_indirect_overlap_percentage),
            ),
            ("total_overlap", Count(self.total_overlap)),
            (
                "pila_total_overlap_percentage",
                Fraction(self.pila_total_overlap_percentage),
            ),
            (
                "other_total_overlap_percentage",
                Fraction(self.other_total_overlap_percentage),
            ),
        ]
    }
}

/// `"pila_direct_overlap_percentage"` → `"Pila Direct Overlap Percentage"`
#[must_use]
pub fn display_name(metric: &str) -> String {
    metric
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
