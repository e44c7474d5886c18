//! Searches the best integer threshold for a single feature.
use fixedbitset::FixedBitSet;

use super::split_rule::DivisionRule;
use crate::{HomogeneityMeasure, Feature, Sample};


/// The best split found for one feature.
/// The masks are indexed by the position of a row
/// in the row list given to [`best_split`].
#[derive(Debug, Clone)]
pub(crate) struct SplitCandidate {
    pub(crate) cost: f64,
    pub(crate) rule: DivisionRule,
    pub(crate) left: FixedBitSet,
    pub(crate) right: FixedBitSet,
}


impl SplitCandidate {
    /// Applies the masks to `rows`, returning `(left, right)`.
    pub(crate) fn partition(&self, rows: &[usize])
        -> (Vec<usize>, Vec<usize>)
    {
        let left = self.left.ones()
            .map(|k| rows[k])
            .collect::<Vec<_>>();
        let right = self.right.ones()
            .map(|k| rows[k])
            .collect::<Vec<_>>();
        (left, right)
    }
}


/// Returns the threshold of `feature` that minimizes
/// the size-weighted homogeneity of the two parts,
/// or `None` if no threshold separates `rows`.
///
/// Every integer threshold `i` in `0..max` is tried,
/// where `max` is the (rounded up) largest value of the feature on `rows`.
/// A threshold replaces the current best one only if its cost is
/// strictly lower, so the lowest threshold wins ties.
pub(crate) fn best_split<H>(
    measure: &H,
    sample: &Sample,
    rows: &[usize],
    feature: &Feature,
) -> Option<SplitCandidate>
    where H: HomogeneityMeasure + ?Sized,
{
    let n_rows = rows.len() as f64;
    let upper = threshold_upper_bound(feature.max_over(rows));

    let mut best_cost = f64::INFINITY;
    let mut best_threshold = None;
    for i in 0..upper {
        let threshold = i as f64;
        let (left, right): (Vec<usize>, Vec<usize>) = rows.iter()
            .copied()
            .partition(|&r| feature[r] <= threshold);

        let cost = if left.is_empty() || right.is_empty() {
            f64::INFINITY
        } else {
            let rh = measure.homogeneity(sample, &right);
            let lh = measure.homogeneity(sample, &left);
            right.len() as f64 / n_rows * rh + left.len() as f64 / n_rows * lh
        };

        // `NaN` never compares lower.
        if cost < best_cost {
            best_cost = cost;
            best_threshold = Some(i);
        }
    }

    let threshold = best_threshold?;
    let rule = DivisionRule::new(feature.name(), threshold);

    let mut left = FixedBitSet::with_capacity(rows.len());
    let mut right = FixedBitSet::with_capacity(rows.len());
    for (k, &r) in rows.iter().enumerate() {
        if feature[r] > threshold as f64 {
            right.insert(k);
        } else {
            left.insert(k);
        }
    }

    Some(SplitCandidate { cost: best_cost, rule, left, right, })
}


/// Thresholds are tried in `0..upper`.
fn threshold_upper_bound(max: f64) -> i64 {
    if !max.is_finite() || max <= 0f64 {
        0
    } else {
        max.ceil() as i64
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn spread(sample: &Sample, rows: &[usize]) -> f64 {
        let x = &sample["m"];
        let max = rows.iter().map(|&i| x[i]).fold(f64::MIN, f64::max);
        let min = rows.iter().map(|&i| x[i]).fold(f64::MAX, f64::min);
        max - min
    }

    #[test]
    fn test_two_groups() {
        let sample = Sample::from_columns([
            ("f", vec![0.0, 0.0, 5.0, 5.0]),
            ("m", vec![0.0, 0.0, 5.0, 5.0]),
        ]).unwrap();
        let rows = vec![0, 1, 2, 3];
        let cand = best_split(&spread, &sample, &rows, &sample["f"]).unwrap();

        assert_eq!(0.0, cand.cost, "expected 0, got {}.", cand.cost);
        assert_eq!("f >0", cand.rule.to_string());
        let (left, right) = cand.partition(&rows);
        assert_eq!(vec![0, 1], left);
        assert_eq!(vec![2, 3], right);
    }

    #[test]
    fn test_lowest_threshold_wins_ties() {
        // Thresholds 0..4 all separate {0} from {5, 5}.
        let sample = Sample::from_columns([
            ("f", vec![5.0, 0.0, 5.0]),
            ("m", vec![1.0, 1.0, 1.0]),
        ]).unwrap();
        let rows = vec![0, 1, 2];
        let cand = best_split(&spread, &sample, &rows, &sample["f"]).unwrap();
        assert_eq!(0, cand.rule.threshold());
    }

    #[test]
    fn test_strictly_better_threshold_replaces() {
        // `m` is tight only when the split is at 2.
        let sample = Sample::from_columns([
            ("f", vec![1.0, 2.0, 3.0, 4.0]),
            ("m", vec![0.0, 0.0, 9.0, 9.0]),
        ]).unwrap();
        let rows = vec![0, 1, 2, 3];
        let cand = best_split(&spread, &sample, &rows, &sample["f"]).unwrap();
        assert_eq!(2, cand.rule.threshold());
        assert_eq!(0.0, cand.cost);
    }

    #[test]
    fn test_constant_feature_has_no_split() {
        let sample = Sample::from_columns([
            ("f", vec![3.0, 3.0, 3.0]),
            ("m", vec![0.0, 1.0, 2.0]),
        ]).unwrap();
        let rows = vec![0, 1, 2];
        let res = best_split(&spread, &sample, &rows, &sample["f"]);
        assert!(res.is_none());
    }

    #[test]
    fn test_non_positive_feature_has_no_split() {
        let sample = Sample::from_columns([
            ("f", vec![-3.0, 0.0, -1.0]),
            ("m", vec![0.0, 1.0, 2.0]),
        ]).unwrap();
        let rows = vec![0, 1, 2];
        let res = best_split(&spread, &sample, &rows, &sample["f"]);
        assert!(res.is_none());
    }

    #[test]
    fn test_measure_is_never_called_on_empty_rows() {
        let sample = Sample::from_columns([
            ("f", vec![0.0, 4.0]),
        ]).unwrap();
        let strict = |_: &Sample, rows: &[usize]| {
            assert!(!rows.is_empty());
            1.0
        };
        let cand = best_split(&strict, &sample, &[0, 1], &sample["f"]);
        assert_eq!(1.0, cand.unwrap().cost);
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(5, threshold_upper_bound(5.0));
        assert_eq!(6, threshold_upper_bound(5.5));
        assert_eq!(0, threshold_upper_bound(0.0));
        assert_eq!(0, threshold_upper_bound(f64::NEG_INFINITY));
        assert_eq!(0, threshold_upper_bound(f64::NAN));
    }
}
