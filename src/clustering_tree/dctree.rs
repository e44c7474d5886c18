use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    Sample,
    HomogeneityMeasure,
    Homogeneity,
};
use crate::error::{ClusteringError, Result};

use super::{
    clustering::ClusteringTree,
    depth::Depth,
    node::Node,
    split_search::{best_split, SplitCandidate},
};

use std::fmt;


/// The divisive clustering tree algorithm.
///
/// Starting from all rows of a sample,
/// [`DivisionClusteringTree`] repeatedly picks the division rule
/// (a feature and an integer threshold) that minimizes the
/// size-weighted homogeneity of the two resulting parts,
/// until a stopping condition holds or no rule separates the rows.
///
/// [`DivisionClusteringTree`] is constructed
/// by [`DivisionClusteringTreeBuilder`](super::DivisionClusteringTreeBuilder).
///
/// # Example
/// ```no_run
/// use divclust::prelude::*;
///
/// let sample = SampleReader::default()
///     .file("/path/to/data/file.csv")
///     .has_header(true)
///     .read()
///     .unwrap();
///
/// let tree = DivisionClusteringTreeBuilder::new()
///     .division_rules(&["age", "income"])
///     .motivation_columns(&["score_a", "score_b"])
///     .max_depth(3)
///     .distance_method(DistanceMethod::MeanGroup)
///     .build()
///     .unwrap();
///
/// let clusters = tree.fit(&sample).unwrap();
/// println!("{}", clusters.mean_homogeneity_in_leaves());
/// ```
pub struct DivisionClusteringTree<H = Homogeneity> {
    division_rules: Vec<String>,
    measure:        H,
    max_depth:      Option<Depth>,
    min_size:       Option<usize>,
}


impl<H> DivisionClusteringTree<H> {
    /// Initialize [`DivisionClusteringTree`].
    /// This method is called only via
    /// `DivisionClusteringTreeBuilder::build`.
    #[inline]
    pub(super) fn new(
        division_rules: Vec<String>,
        measure:        H,
        max_depth:      Option<Depth>,
        min_size:       Option<usize>,
    ) -> Self
    {
        Self { division_rules, measure, max_depth, min_size, }
    }


    /// Returns the candidate features, in the order they are tried.
    pub fn division_rules(&self) -> &[String] {
        &self.division_rules[..]
    }


    /// Returns the homogeneity measure.
    pub fn measure(&self) -> &H {
        &self.measure
    }


    /// Returns `true` if a node at `depth` with `n_rows` rows
    /// must be a leaf.
    #[inline]
    fn must_stop(&self, depth: Depth, n_rows: usize) -> bool {
        let too_deep = self.max_depth
            .is_some_and(|max_depth| depth == max_depth);
        let too_small = self.min_size
            .is_some_and(|min_size| n_rows <= min_size);
        too_deep || too_small
    }
}


impl<H> DivisionClusteringTree<H>
    where H: HomogeneityMeasure,
{
    /// Builds the clustering tree of `sample`.
    ///
    /// Returns `Err` if a division rule or a column required by the
    /// measure does not exist in `sample`, if `sample` has no rows,
    /// or if the tree is too deep for its node ids to fit in `usize`.
    pub fn fit<'a>(&self, sample: &'a Sample) -> Result<ClusteringTree<'a>> {
        self.division_rules.iter()
            .try_for_each(|name| sample.try_feature(name).map(|_| ()))?;
        self.measure.validate(sample)?;

        let n_sample = sample.shape().0;
        if n_sample == 0 {
            return Err(ClusteringError::EmptySample);
        }

        info!(
            n_sample,
            n_rules = self.division_rules.len(),
            "building a divisive clustering tree"
        );

        let rows = (0..n_sample).collect::<Vec<_>>();
        let mut root = self.grow(sample, rows, Depth::ROOT);
        root.assign_ids(0, None)?;

        info!(
            n_leaves = root.n_leaves(),
            "finished building the clustering tree"
        );
        Ok(ClusteringTree::new(sample, *root))
    }


    /// Grows the subtree for `rows` at `depth`.
    fn grow(&self, sample: &Sample, rows: Vec<usize>, depth: Depth)
        -> Box<Node>
    {
        if self.must_stop(depth, rows.len()) {
            return self.leaf(sample, rows, depth);
        }

        let best = match self.best_split(sample, &rows) {
            Some(best) => best,
            None => {
                debug!(%depth, rows = rows.len(), "no rule separates the rows");
                return self.leaf(sample, rows, depth);
            },
        };

        debug!(
            %depth,
            rows = rows.len(),
            rule = %best.rule,
            cost = best.cost,
            "split"
        );

        let (lrows, rrows) = best.partition(&rows);
        let left  = self.grow(sample, lrows, depth.next());
        let right = self.grow(sample, rrows, depth.next());

        Box::new(Node::branch(best.rule, best.cost, left, right))
    }


    /// Searches every division rule and returns the best split.
    /// The rules are evaluated in parallel,
    /// but the first rule in the list wins ties.
    fn best_split(&self, sample: &Sample, rows: &[usize])
        -> Option<SplitCandidate>
    {
        let candidates = self.division_rules
            .par_iter()
            .map(|name| best_split(&self.measure, sample, rows, &sample[name]))
            .collect::<Vec<_>>();

        let mut best: Option<SplitCandidate> = None;
        for candidate in candidates.into_iter().flatten() {
            let best_cost = best.as_ref()
                .map_or(f64::INFINITY, |b| b.cost);
            if candidate.cost < best_cost {
                best = Some(candidate);
            }
        }
        best
    }


    #[inline]
    fn leaf(&self, sample: &Sample, rows: Vec<usize>, depth: Depth)
        -> Box<Node>
    {
        let homogeneity = self.measure.homogeneity(sample, &rows);
        debug!(%depth, rows = rows.len(), homogeneity, "leaf");
        Box::new(Node::leaf(homogeneity, rows))
    }
}


impl<H> fmt::Display for DivisionClusteringTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_depth = self.max_depth
            .map(|depth| depth.to_string())
            .unwrap_or_else(|| "Unlimited".to_string());
        let min_size = self.min_size
            .map(|size| size.to_string())
            .unwrap_or_else(|| "None".to_string());
        write!(
            f,
            "\
            ----------\n\
            # Divisive Clustering Tree\n\n\
            - Division rules: {}\n\
            - Max depth: {max_depth}\n\
            - Min size: {min_size}\n\
            ----------\
            ",
            self.division_rules.join(", "),
        )
    }
}
