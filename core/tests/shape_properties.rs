//! Property tests for the shape walker.

use clinic_core::shape::{transform, Callable, Namespace, Scalar, ShapeNode};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = ShapeNode> {
    prop_oneof![
        Just(ShapeNode::null()),
        any::<bool>().prop_map(|b| ShapeNode::from(Scalar::from(b))),
        any::<i64>().prop_map(|n| ShapeNode::from(Scalar::from(n))),
        "[a-z,}\" ]{0,8}".prop_map(|s| ShapeNode::string(s)),
    ]
}

fn leaf() -> impl Strategy<Value = ShapeNode> {
    prop_oneof![
        scalar(),
        "[a-z]{1,6}".prop_map(|name| ShapeNode::from(Callable::new(name))),
    ]
}

fn shape() -> impl Strategy<Value = ShapeNode> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(ShapeNode::Sequence),
            prop::collection::vec(("[a-z]{1,5}", inner), 0..6)
                .prop_map(|entries| ShapeNode::Namespace(entries.into_iter().collect::<Namespace>())),
        ]
    })
}

/// Walk `input` and `output` together, checking that they have the same
/// structure and that callables became their name.
fn assert_mirrors(input: &ShapeNode, output: &ShapeNode) {
    match (input, output) {
        (ShapeNode::Callable(callable), out) => {
            assert_eq!(out, &ShapeNode::string(format!("fn:{}", callable.name)));
        }
        (ShapeNode::Sequence(a), ShapeNode::Sequence(b)) => {
            assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(b) {
                assert_mirrors(x, y);
            }
        }
        (ShapeNode::Namespace(a), ShapeNode::Namespace(b)) => {
            assert_eq!(a.keys().collect::<Vec<_>>(), b.keys().collect::<Vec<_>>());
            for ((_, x), (_, y)) in a.iter().zip(b.iter()) {
                assert_mirrors(x, y);
            }
        }
        (ShapeNode::Scalar(a), ShapeNode::Scalar(b)) => assert_eq!(a, b),
        (a, b) => panic!("shape mismatch: {a:?} became {b:?}"),
    }
}

proptest! {
    #[test]
    fn prop_structure_is_preserved(input in shape()) {
        let output = transform(&input, |c| ShapeNode::string(format!("fn:{}", c.name))).unwrap();
        assert_mirrors(&input, &output);
    }

    #[test]
    fn prop_input_is_not_modified(input in shape()) {
        let before = input.clone();
        let _ = transform(&input, |_| ShapeNode::null()).unwrap();
        prop_assert_eq!(before, input);
    }

    #[test]
    fn prop_transform_is_deterministic(input in shape()) {
        let first = transform(&input, |_| ShapeNode::string("MockFn")).unwrap();
        let second = transform(&input, |_| ShapeNode::string("MockFn")).unwrap();
        prop_assert_eq!(first, second);
    }
}
