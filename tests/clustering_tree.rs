use divclust::prelude::*;
use polars::prelude::{DataFrame, NamedFrom, Series};

use rand::prelude::*;
use rand::rngs::StdRng;


// Two well separated groups on `f`.
//
//  m |
//  5 |              x  x
//    |
//  0 |  x  x
//    |________________________ f
//       0           5
fn two_groups() -> Sample {
    Sample::from_columns([
        ("f", vec![0.0, 0.0, 5.0, 5.0]),
        ("m", vec![0.0, 0.0, 5.0, 5.0]),
    ]).unwrap()
}


// Each split peels off the smallest value of `f`,
// so the tree is a chain as deep as the sample is long.
//
//   0: f >0
//   /     \
// {0}    2: f >1
//        /     \
//      {1}    6: f >2
//               ...
fn chain(n_sample: usize) -> Sample {
    let values = (0..n_sample).map(|i| i as f64).collect::<Vec<_>>();
    Sample::from_columns([("f", values.clone()), ("m", values)]).unwrap()
}


fn chain_builder() -> DivisionClusteringTreeBuilder {
    DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .motivation_columns(&["m"])
        .distance_method(DistanceMethod::NearestNeighbor)
}


fn random_sample(seed: u64, n_sample: usize) -> Sample {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut column = |hi: i64| {
        (0..n_sample)
            .map(|_| rng.gen_range(0..hi) as f64)
            .collect::<Vec<_>>()
    };
    let a = column(10);
    let b = column(6);
    let m1 = column(100);
    let m2 = column(100);
    Sample::from_columns([("a", a), ("b", b), ("m1", m1), ("m2", m2)])
        .unwrap()
}


fn random_tree(sample: &Sample) -> ClusteringTree<'_> {
    DivisionClusteringTreeBuilder::new()
        .division_rules(&["a", "b"])
        .motivation_columns(&["m1", "m2"])
        .max_depth(4)
        .min_size(5)
        .build()
        .unwrap()
        .fit(sample)
        .unwrap()
}


#[test]
fn two_groups_are_separated() {
    let sample = two_groups();
    let tree = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .motivation_columns(&["m"])
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    let root = tree.root();
    assert_eq!("f >0", root.rule().unwrap().to_string());
    assert_eq!(0.0, root.homogeneity());
    assert_eq!(4, root.n_objects());
    assert_eq!(2, tree.n_leaves());

    let left = root.left().unwrap();
    let right = root.right().unwrap();
    assert_eq!(Some(&[0, 1][..]), left.value());
    assert_eq!(Some(&[2, 3][..]), right.value());
    assert_eq!(0.0, left.homogeneity());
    assert_eq!(0.0, right.homogeneity());
    assert_eq!(0.0, tree.mean_homogeneity_in_leaves());
}


#[test]
fn min_size_stops_at_root() {
    let sample = two_groups();
    let tree = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .motivation_columns(&["m"])
        .min_size(5)
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    let root = tree.root();
    assert!(root.is_leaf());
    assert_eq!(Some(0), root.id());
    assert_eq!(Some(&[0, 1, 2, 3][..]), root.value());

    let measure = Homogeneity::new(
        DistanceMethod::MeanGroup, Metric::Euclidean, &["m"]
    );
    let exp = measure.homogeneity(&sample, &[0, 1, 2, 3]);
    let res = root.homogeneity();
    assert_eq!(exp, res, "expected {exp}, got {res}.");
    assert!(res > 0.0);
}


#[test]
fn zero_depth_is_a_single_leaf() {
    let sample = two_groups();
    let tree = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .motivation_columns(&["m"])
        .max_depth(0)
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();
    assert!(tree.root().is_leaf());
}


#[test]
fn constant_feature_yields_a_leaf() {
    let sample = Sample::from_columns([
        ("f", vec![3.0, 3.0, 3.0]),
        ("m", vec![1.0, 2.0, 9.0]),
    ]).unwrap();
    let tree = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .motivation_columns(&["m"])
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();
    assert!(tree.root().is_leaf());
    assert_eq!(3, tree.root().n_objects());
}


#[test]
fn unknown_columns_fail_before_building() {
    let sample = two_groups();

    let res = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f", "nope"])
        .motivation_columns(&["m"])
        .build()
        .unwrap()
        .fit(&sample);
    assert!(matches!(res, Err(ClusteringError::MissingColumn(c)) if c == "nope"));

    let res = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .motivation_columns(&["missing"])
        .build()
        .unwrap()
        .fit(&sample);
    assert!(matches!(res, Err(ClusteringError::MissingColumn(c)) if c == "missing"));
}


#[test]
fn empty_sample_is_rejected() {
    let sample = Sample::from_columns([("f", Vec::new())]).unwrap();
    let res = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .motivation_columns(&["f"])
        .build()
        .unwrap()
        .fit(&sample);
    assert!(matches!(res, Err(ClusteringError::EmptySample)));
}


#[test]
fn sizes_and_ids_are_consistent() {
    let sample = random_sample(1234, 80);
    let tree = random_tree(&sample);

    let summaries = tree.node_summaries();
    let mut ids = summaries.iter()
        .map(|s| s.id.unwrap())
        .collect::<Vec<_>>();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(summaries.len(), ids.len(), "node ids are not distinct");

    for summary in summaries {
        let id = summary.id.unwrap();
        let node = tree.node_by_id(id).unwrap();
        assert_eq!(Some(id), node.id());
        assert_eq!(summary.n_objects, node.n_objects());
        assert!(usize::from(summary.depth) <= 4, "node {id} at depth {}", summary.depth);
        assert_eq!(summary.depth, NodePath::from_id(id).len());

        match node {
            Node::Branch { left, right, n_objects, .. } => {
                assert_eq!(*n_objects, left.n_objects() + right.n_objects());
                assert_eq!(Some(2 * id + 1), left.id());
                assert_eq!(Some(2 * id + 2), right.id());
                assert_eq!(Some(id), left.parent());
                assert_eq!(Some(id), right.parent());
                assert!(*n_objects > 5);

                let mut exp = tree.indices_in_subtree_by_id(2 * id + 1).unwrap();
                exp.extend(tree.indices_in_subtree_by_id(2 * id + 2).unwrap());
                let res = tree.indices_in_subtree_by_id(id).unwrap();
                assert_eq!(exp, res, "node {id}");
            },
            Node::Leaf { value, .. } => {
                assert!(!value.is_empty());
                assert_eq!(summary.n_objects, value.len());
            },
        }
    }
}


#[test]
fn root_subtree_is_the_whole_sample() {
    let sample = random_sample(7, 50);
    let tree = random_tree(&sample);

    let mut rows = tree.indices_in_subtree_by_id(0).unwrap();
    rows.sort_unstable();
    assert_eq!((0..50).collect::<Vec<_>>(), rows);

    let data = tree.data_in_subtree_by_id(0).unwrap();
    assert_eq!(sample.shape(), data.shape());
}


#[test]
fn rows_follow_the_rules_to_their_node() {
    let sample = random_sample(99, 60);
    let tree = random_tree(&sample);

    for summary in tree.node_summaries() {
        let id = summary.id.unwrap();
        let rules = tree.division_rules_by_id(id).unwrap();
        assert_eq!(NodePath::from_id(id).len(), rules.len());

        for row in tree.indices_in_subtree_by_id(id).unwrap() {
            for rule in rules.iter() {
                let (rule, side) = rule.rsplit_once(" = ").unwrap();
                let (feature, threshold) = rule.rsplit_once(" >").unwrap();
                let threshold = threshold.parse::<f64>().unwrap();
                let right = sample[feature][row] > threshold;
                assert_eq!(side == "true", right, "row {row} at node {id}");
            }
        }
    }
}


#[test]
fn invalid_ids_are_reported() {
    let sample = two_groups();
    let tree = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .motivation_columns(&["m"])
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    for id in [3, 4, 5, 6, 100] {
        let res = tree.node_by_id(id);
        assert!(
            matches!(res, Err(ClusteringError::InvalidNodeId(i)) if i == id),
            "id {id}: got {res:?}"
        );
    }
}


#[test]
fn building_is_deterministic() {
    let sample = random_sample(5, 70);
    let first = random_tree(&sample);
    let second = random_tree(&sample);
    assert_eq!(first, second);
}


#[test]
fn distance_methods_and_metrics_by_name() {
    let sample = random_sample(11, 30);
    let methods = [
        "nearest_neighbor_distance",
        "most_distance_neighbor_distance",
        "mean_group_distance",
        "wards_distance",
        "distance_centroid",
    ];
    let metrics = ["euclidean", "sqeuclidean", "cityblock", "chebyshev", "cosine"];
    for method in methods {
        for metric in metrics {
            let tree = DivisionClusteringTreeBuilder::new()
                .division_rules(&["a", "b"])
                .motivation_columns(&["m1", "m2"])
                .max_depth(2)
                .distance_method_name(method).unwrap()
                .metric_name(metric).unwrap()
                .build()
                .unwrap()
                .fit(&sample)
                .unwrap();
            assert_eq!(30, tree.root().n_objects(), "{method} / {metric}");
            assert!(tree.mean_homogeneity_in_leaves().is_finite());
        }
    }
}


#[test]
fn custom_measure() {
    let sample = two_groups();
    let spread = |sample: &Sample, rows: &[usize]| {
        let m = &sample["m"];
        let max = rows.iter().map(|&i| m[i]).fold(f64::MIN, f64::max);
        let min = rows.iter().map(|&i| m[i]).fold(f64::MAX, f64::min);
        max - min
    };
    let tree = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .build_with(spread)
        .unwrap()
        .fit(&sample)
        .unwrap();
    assert_eq!("f >0", tree.root().rule().unwrap().to_string());
}


#[test]
fn from_dataframe() {
    let f = Series::new("f", &[0.0, 0.0, 5.0, 5.0]);
    let m = Series::new("m", &[0_i64, 0, 5, 5]);
    let df = DataFrame::new(vec![f, m]).unwrap();
    let sample = Sample::from_dataframe(&df).unwrap();

    let tree = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .motivation_columns(&["m"])
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();
    assert_eq!(2, tree.n_leaves());
}


#[test]
fn export_subtree_to_csv() {
    let sample = two_groups();
    let tree = DivisionClusteringTreeBuilder::new()
        .division_rules(&["f"])
        .motivation_columns(&["m"])
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    tree.export_subtree_by_id_to_csv(2, file.path()).unwrap();
    let res = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!("f,m\n5,5\n5,5\n", res);

    let read = SampleReader::default()
        .file(file.path())
        .has_header(true)
        .read()
        .unwrap();
    assert_eq!(tree.data_in_subtree_by_id(2).unwrap(), read);
}


#[test]
fn short_chain_is_a_right_spine() {
    let sample = chain(6);
    let tree = chain_builder().build().unwrap().fit(&sample).unwrap();

    // Spine ids are 0, 2, 6, 14, 30.
    let mut id = 0;
    for k in 0..4 {
        let node = tree.node_by_id(id).unwrap();
        assert_eq!(format!("f >{k}"), node.rule().unwrap().to_string());
        assert_eq!(Some(&[k][..]), node.left().unwrap().value());
        id = 2 * id + 2;
    }
    assert_eq!(vec![4, 5], tree.indices_in_subtree_by_id(id).unwrap());
}


#[test]
fn too_deep_to_number_is_an_error() {
    let sample = chain(70);
    let res = chain_builder().build().unwrap().fit(&sample);
    assert!(
        matches!(res, Err(ClusteringError::NodeIdOverflow(_))),
        "got {res:?}"
    );
}


#[cfg(target_pointer_width = "64")]
#[test]
fn deepest_numbered_chain() {
    let sample = chain(70);
    let tree = chain_builder()
        .max_depth(63)
        .build()
        .unwrap()
        .fit(&sample)
        .unwrap();

    // The right spine ends at depth 63 with id 2^64 - 2.
    let node = tree.node_by_id(usize::MAX - 1).unwrap();
    assert!(node.is_leaf());
    assert_eq!(Some(usize::MAX / 2 - 1), node.parent());
    assert_eq!(vec![63, 64, 65, 66, 67, 68, 69], node.rows_in_subtree());

    let encoding = tree.to_structural_encoding();
    let restored = ClusteringTree::from_structural_encoding(&sample, &encoding)
        .unwrap();
    assert_eq!(tree, restored);
}
