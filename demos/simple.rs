//! Describe two types, encode them into a document tree and decode them back.
//!
//! Run with: cargo run --example simple

use intros_tree::{decode, encode, to_string_pretty, Introspect, RegistrationError, TypeDescriptor};
use std::error::Error;

#[derive(Debug, Default, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

impl Introspect for Point {
    fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
        TypeDescriptor::<Self>::builder("Point")
            .attribute("x", |p| &p.x, |p| &mut p.x)
            .attribute("y", |p| &p.y, |p| &mut p.y)
            .build()
    }
}

#[derive(Debug, Default, PartialEq)]
struct Line {
    name: String,
    points: Vec<Point>,
}

impl Introspect for Line {
    fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
        TypeDescriptor::<Self>::builder("Line")
            .attribute("name", |l| &l.name, |l| &mut l.name)
            .element("Point", |l| &l.points, |l| &mut l.points)
            .build()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let line = Line {
        name: "L1".to_string(),
        points: vec![Point { x: 1.0, y: 2.0 }, Point { x: 3.0, y: 4.0 }],
    };

    // Encode to a document tree
    let doc = encode(&line)?;
    println!("Tree:\n{:#?}\n", doc);

    // The same value as XML
    println!("XML:\n{}", to_string_pretty(&line)?);

    // Decode back to the struct
    let line_back: Line = decode(&doc)?;
    assert_eq!(line, line_back);
    println!("✓ Round-trip successful");

    Ok(())
}
