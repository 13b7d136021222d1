//! Natural-breaks (optimal 1-D k-means) classification.

/// Ascending class boundaries for a `class_count`-class scheme.
///
/// A value belongs to the class equal to the number of boundaries `<=` it, so values
/// below the first boundary are class 0 and values at or above the last boundary fall
/// in the last class. Boundaries may repeat when the data has fewer distinct values
/// than classes.
#[derive(Debug, Clone, PartialEq)]
pub struct Breaks {
    boundaries: Vec<f64>,
    class_count: usize,
}

impl Breaks {
    /// Compute boundaries from raw values. Non-finite values are ignored.
    pub fn compute(values: &[f64], class_count: usize) -> Self {
        let class_count = class_count.max(1);
        let (distinct, counts) = distinct_sorted(values);
        if distinct.is_empty() {
            return Self { boundaries: Vec::new(), class_count };
        }

        let groups = class_count.min(distinct.len());
        let mut boundaries: Vec<f64> = optimal_group_starts(&distinct, &counts, groups)
            .into_iter()
            .skip(1)
            .map(|start| distinct[start])
            .collect();

        // Fewer distinct values than classes: the top classes collapse onto the last break.
        let fill = boundaries.last().copied().unwrap_or(distinct[0]);
        boundaries.resize(class_count - 1, fill);

        Self { boundaries, class_count }
    }

    pub fn boundaries(&self) -> &[f64] { &self.boundaries }

    pub fn class_count(&self) -> usize { self.class_count }

    /// Class index of `value`, always `< class_count`.
    pub fn class_of(&self, value: f64) -> usize {
        self.boundaries.partition_point(|&b| b <= value).min(self.class_count - 1)
    }
}

/// Boundaries for `values` split into `class_count` natural-breaks classes.
pub fn natural_breaks(values: &[f64], class_count: usize) -> Vec<f64> {
    Breaks::compute(values, class_count).boundaries
}

/// Sorted distinct finite values with their multiplicities.
fn distinct_sorted(values: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let mut distinct: Vec<f64> = Vec::with_capacity(sorted.len());
    let mut counts: Vec<usize> = Vec::with_capacity(sorted.len());
    for v in sorted {
        match distinct.last() {
            Some(&last) if last == v => {
                if let Some(count) = counts.last_mut() { *count += 1 }
            }
            _ => {
                distinct.push(v);
                counts.push(1);
            }
        }
    }
    (distinct, counts)
}

/// Weighted prefix sums over centered values, for O(1) within-group squared error.
/// Values are scaled into `[-1, 1]` first so squares of large inputs stay finite; an
/// affine rescale leaves the optimal partition unchanged.
struct PrefixSums {
    weight: Vec<f64>,
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl PrefixSums {
    fn new(distinct: &[f64], counts: &[usize]) -> Self {
        let magnitude = distinct.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let unit = if magnitude > 0.0 { magnitude } else { 1.0 };

        let total: f64 = counts.iter().map(|&c| c as f64).sum();
        let mean = distinct.iter().zip(counts).map(|(&v, &c)| v / unit * c as f64).sum::<f64>() / total;

        let n = distinct.len();
        let mut weight = vec![0.0; n + 1];
        let mut sum = vec![0.0; n + 1];
        let mut sum_sq = vec![0.0; n + 1];
        for i in 0..n {
            let w = counts[i] as f64;
            let x = distinct[i] / unit - mean;
            weight[i + 1] = weight[i] + w;
            sum[i + 1] = sum[i] + w * x;
            sum_sq[i + 1] = sum_sq[i] + w * x * x;
        }
        Self { weight, sum, sum_sq }
    }

    /// Sum of squared deviations from the group mean for distinct values `i..=j`.
    #[inline]
    fn cost(&self, i: usize, j: usize) -> f64 {
        let w = self.weight[j + 1] - self.weight[i];
        let s = self.sum[j + 1] - self.sum[i];
        let q = self.sum_sq[j + 1] - self.sum_sq[i];
        (q - s * s / w).max(0.0)
    }
}

/// Start index (into `distinct`) of each of `groups` contiguous groups minimizing the
/// total within-group squared error. Dynamic program over group count and prefix end.
fn optimal_group_starts(distinct: &[f64], counts: &[usize], groups: usize) -> Vec<usize> {
    let n = distinct.len();
    let sums = PrefixSums::new(distinct, counts);

    // cost[g][j]: best error for distinct[0..=j] in g+1 groups; start[g][j]: last group's start.
    let mut cost = vec![vec![f64::INFINITY; n]; groups];
    let mut start = vec![vec![0usize; n]; groups];

    for j in 0..n {
        cost[0][j] = sums.cost(0, j);
    }

    for g in 1..groups {
        for j in g..n {
            for i in g..=j {
                let candidate = cost[g - 1][i - 1] + sums.cost(i, j);
                if candidate < cost[g][j] {
                    cost[g][j] = candidate;
                    start[g][j] = i;
                }
            }
        }
    }

    let mut starts = vec![0usize; groups];
    let mut end = n - 1;
    for g in (1..groups).rev() {
        starts[g] = start[g][end];
        end = starts[g] - 1;
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::{Breaks, natural_breaks};

    /// Exhaustive reference: minimum total squared error over all contiguous splits.
    fn brute_force_error(sorted: &[f64], groups: usize) -> f64 {
        fn sse(xs: &[f64]) -> f64 {
            let mean = xs.iter().sum::<f64>() / xs.len() as f64;
            xs.iter().map(|x| (x - mean).powi(2)).sum()
        }
        fn best(xs: &[f64], groups: usize) -> f64 {
            if groups == 1 { return sse(xs) }
            (1..=xs.len() - (groups - 1))
                .map(|cut| sse(&xs[..cut]) + best(&xs[cut..], groups - 1))
                .fold(f64::INFINITY, f64::min)
        }
        best(sorted, groups)
    }

    fn error_for(sorted: &[f64], boundaries: &[f64]) -> f64 {
        let breaks = Breaks { boundaries: boundaries.to_vec(), class_count: boundaries.len() + 1 };
        let mut total = 0.0;
        for class in 0..breaks.class_count() {
            let xs: Vec<f64> = sorted.iter().copied().filter(|&v| breaks.class_of(v) == class).collect();
            if xs.is_empty() { continue }
            let mean = xs.iter().sum::<f64>() / xs.len() as f64;
            total += xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
        }
        total
    }

    #[test]
    fn isolates_outlier_cluster() {
        let breaks = Breaks::compute(&[1.0, 2.0, 3.0, 100.0, 101.0], 2);
        assert_eq!(breaks.boundaries(), &[100.0]);
        assert_eq!(breaks.class_of(50.0), 0);
        assert_eq!(breaks.class_of(100.0), 1);
        assert_eq!(breaks.class_of(1000.0), 1);
        assert_eq!(breaks.class_of(-5.0), 0);
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = natural_breaks(&[101.0, 3.0, 100.0, 1.0, 2.0], 2);
        assert_eq!(a, vec![100.0]);
    }

    #[test]
    fn five_classes_on_obvious_groups() {
        let values = [1.0, 1.1, 5.0, 5.2, 10.0, 10.1, 20.0, 20.5, 40.0, 41.0];
        assert_eq!(natural_breaks(&values, 5), vec![5.0, 10.0, 20.0, 40.0]);
    }

    #[test]
    fn matches_exhaustive_search() {
        let values = [4.0, 9.0, 1.0, 7.5, 3.2, 15.0, 8.8, 2.0, 11.0, 30.0, 29.0];
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        for k in 1..=5 {
            let boundaries = natural_breaks(&values, k);
            assert_eq!(boundaries.len(), k - 1);
            let expected = brute_force_error(&sorted, k);
            assert!((error_for(&sorted, &boundaries) - expected).abs() < 1e-9, "k = {k}");
        }
    }

    #[test]
    fn boundaries_are_non_decreasing_with_fixed_length() {
        let values = [5.0, 3.0, 3.0, 9.0, 1.0, 1.0, 1.0, 12.0, 7.0];
        for k in 1..=8 {
            let boundaries = natural_breaks(&values, k);
            assert_eq!(boundaries.len(), k - 1);
            assert!(boundaries.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn identical_values_map_to_last_class() {
        let breaks = Breaks::compute(&[7.0, 7.0, 7.0], 5);
        assert_eq!(breaks.boundaries(), &[7.0, 7.0, 7.0, 7.0]);
        assert_eq!(breaks.class_of(7.0), 4);
        assert_eq!(breaks.class_of(6.9), 0);
    }

    #[test]
    fn fewer_distinct_values_than_classes() {
        let breaks = Breaks::compute(&[1.0, 2.0, 2.0], 5);
        assert_eq!(breaks.boundaries(), &[2.0, 2.0, 2.0, 2.0]);
        assert_eq!(breaks.class_of(1.0), 0);
        assert_eq!(breaks.class_of(2.0), 4);
    }

    #[test]
    fn duplicates_are_never_split() {
        let breaks = Breaks::compute(&[1.0, 5.0, 5.0, 5.0, 5.0, 9.0], 3);
        assert_eq!(breaks.boundaries(), &[5.0, 9.0]);
    }

    #[test]
    fn empty_and_non_finite_input() {
        let breaks = Breaks::compute(&[], 5);
        assert!(breaks.boundaries().is_empty());
        assert_eq!(breaks.class_of(3.0), 0);

        let breaks = Breaks::compute(&[f64::NAN, f64::INFINITY], 3);
        assert!(breaks.boundaries().is_empty());
    }

    #[test]
    fn huge_values_still_split_optimally() {
        assert_eq!(natural_breaks(&[1.0, 2.0, 1e200, 2e200], 2), vec![1e200]);
        assert_eq!(natural_breaks(&[2e200, 1.0, 1e200, 2.0], 2), vec![1e200]);
        assert_eq!(natural_breaks(&[-1.5e308, -1e308, 0.0, 1.0], 2), vec![0.0]);
        assert_eq!(natural_breaks(&[0.0, 0.0, 0.0], 2), vec![0.0]);
    }

    #[test]
    fn single_class() {
        let breaks = Breaks::compute(&[1.0, 2.0, 3.0], 1);
        assert!(breaks.boundaries().is_empty());
        assert_eq!(breaks.class_of(2.0), 0);
    }
}
