//! Repeated elements, scalar lists and shared intermediate nodes.
//!
//! Run with: cargo run --example collections

use intros_tree::{from_str, intros_type, to_string_pretty};
use std::collections::VecDeque;
use std::error::Error;

#[derive(Debug, Default, PartialEq)]
struct Signlight {
    id: String,
    kind: String,
}

#[derive(Debug, Default, PartialEq)]
struct Junction {
    id: u32,
    active_plan: String,
    signlights: Vec<Signlight>,
    connections: VecDeque<u32>,
}

intros_type! {
    Signlight = "signlight" {
        id: attribute "id",
        kind: attribute "type",
    }

    Junction = "junction" {
        id: attribute "id",
        active_plan: attribute "signlights.activePlan",
        signlights: element "signlights.signlight",
        connections: element "connection",
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let junction = Junction {
        id: 7,
        active_plan: "morning".to_string(),
        signlights: vec![
            Signlight {
                id: "north".to_string(),
                kind: "vehicle".to_string(),
            },
            Signlight {
                id: "crossing".to_string(),
                kind: "pedestrian".to_string(),
            },
        ],
        connections: VecDeque::from(vec![12, 4, 9]),
    };

    // activePlan and the signlight list share one <signlights> node
    let xml = to_string_pretty(&junction)?;
    println!("{}", xml);

    let back: Junction = from_str(&xml)?;
    assert_eq!(back, junction);
    println!("✓ Element order preserved");

    // An empty collection writes nothing, and decodes back to empty
    let empty = Junction::default();
    let xml = to_string_pretty(&empty)?;
    println!("\nEmpty junction:\n{}", xml);
    assert!(from_str::<Junction>(&xml)?.signlights.is_empty());

    Ok(())
}
