//! Property-based tests for the encode/decode guarantees
//!
//! Scalars survive a trip through the document tree and through XML text, collections keep
//! their order, and arbitrary trees survive XML and JSON.

use intros_tree::{decode, encode, from_str, from_xml_str, intros_type, to_string, to_xml_string, Node, XmlOptions};
use proptest::prelude::*;

#[derive(Debug, Default, Clone, PartialEq)]
struct Sample {
    small: i32,
    large: i64,
    count: u32,
    flag: bool,
    ratio: f64,
    initial: char,
    label: String,
    note: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Waypoint {
    id: u32,
    s: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Route {
    name: String,
    waypoints: Vec<Waypoint>,
    tags: Vec<String>,
}

intros_type! {
    Sample = "Sample" {
        small: attribute "small",
        large: attribute "large",
        count: attribute "count",
        flag: attribute "flag",
        ratio: attribute "ratio",
        initial: attribute "initial",
        label: attribute "label",
        note: element "Note",
    }

    Waypoint = "Waypoint" {
        id: attribute "id",
        s: attribute "s",
    }

    Route = "Route" {
        name: attribute "name",
        waypoints: element "Waypoints.Waypoint",
        tags: element "Tag",
    }
}

fn xml_roundtrip<T>(value: &T) -> bool
where
    T: intros_tree::Introspect + PartialEq + std::fmt::Debug,
{
    match to_string(value) {
        Ok(xml) => match from_str::<T>(&xml) {
            Ok(back) => *value == back,
            Err(e) => {
                eprintln!("Decode failed: {}", e);
                eprintln!("XML was: {}", xml);
                false
            }
        },
        Err(e) => {
            eprintln!("Encode failed: {}", e);
            false
        }
    }
}

fn tree_roundtrip<T>(value: &T) -> bool
where
    T: intros_tree::Introspect + PartialEq + std::fmt::Debug,
{
    match encode(value).and_then(|doc| decode::<T>(&doc)) {
        Ok(back) => *value == back,
        Err(e) => {
            eprintln!("Roundtrip failed: {}", e);
            false
        }
    }
}

fn sample_strategy() -> impl Strategy<Value = Sample> {
    (
        any::<i32>(),
        any::<i64>(),
        any::<u32>(),
        any::<bool>(),
        -1.0e300f64..1.0e300,
        prop::char::range('!', '\u{D7FF}'),
        "\\PC{0,40}",
        "[a-zA-Z0-9<>&\"' ]{0,40}",
    )
        .prop_map(
            |(small, large, count, flag, ratio, initial, label, note)| Sample {
                small,
                large,
                count,
                flag,
                ratio,
                initial,
                label,
                note,
            },
        )
}

fn waypoint_strategy() -> impl Strategy<Value = Waypoint> {
    (any::<u32>(), -1.0e6f64..1.0e6).prop_map(|(id, s)| Waypoint { id, s })
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let name = "[A-Za-z][A-Za-z0-9_]{0,8}";
    let leaf = (
        prop::collection::vec((name, "[a-z0-9 ]{0,10}"), 0..3),
        prop::option::of("[a-z0-9]{1,10}"),
    )
        .prop_map(|(attributes, text)| {
            let mut node = Node::new();
            for (key, value) in attributes {
                node.set_attribute(key, value);
            }
            if let Some(text) = text {
                node.set_text(text);
            }
            node
        });

    leaf.prop_recursive(3, 24, 4, move |inner| {
        (
            prop::collection::vec((name, "[a-z0-9 ]{0,10}"), 0..3),
            prop::collection::vec((name, inner), 1..4),
        )
            .prop_map(|(attributes, children)| {
                let mut node = Node::new();
                for (key, value) in attributes {
                    node.set_attribute(key, value);
                }
                for (key, child) in children {
                    node.push_child(key, child);
                }
                node
            })
    })
}

proptest! {
    #[test]
    fn prop_scalars_tree_roundtrip(sample in sample_strategy()) {
        prop_assert!(tree_roundtrip(&sample));
    }

    #[test]
    fn prop_scalars_xml_roundtrip(sample in sample_strategy()) {
        prop_assert!(xml_roundtrip(&sample));
    }

    #[test]
    fn prop_collection_order(
        name in "[a-z]{0,10}",
        waypoints in prop::collection::vec(waypoint_strategy(), 0..20),
        tags in prop::collection::vec("[a-z]{1,8}", 0..10),
    ) {
        let route = Route { name, waypoints, tags };
        prop_assert!(tree_roundtrip(&route));
        prop_assert!(xml_roundtrip(&route));
    }

    #[test]
    fn prop_empty_collection_writes_nothing(name in "[a-z]{1,10}") {
        let route = Route { name, ..Route::default() };
        let doc = encode(&route).unwrap();
        let root = doc.child("Route").unwrap();
        prop_assert_eq!(root.child_count(), 0);
    }

    #[test]
    fn prop_node_json_roundtrip(node in node_strategy()) {
        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, node);
    }

    #[test]
    fn prop_node_xml_roundtrip(root in node_strategy()) {
        let mut doc = Node::new();
        doc.push_child("Root", root);

        for options in [XmlOptions::new(), XmlOptions::pretty()] {
            let xml = to_xml_string(&doc, &options);
            let back = from_xml_str(&xml).unwrap();
            prop_assert_eq!(&back, &doc);
        }
    }
}
