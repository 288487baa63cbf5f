//! Declaring types with intros_type! and building trees with node!.
//!
//! Run with: cargo run --example macro

use intros_tree::{decode, intros_type, node, to_string};
use std::error::Error;

#[derive(Debug, Default, PartialEq)]
struct Header {
    rev_major: u16,
    rev_minor: u16,
    description: String,
    author: String,
}

#[derive(Debug, Default, PartialEq)]
struct ParameterDeclaration {
    name: String,
    value: String,
}

#[derive(Debug, Default, PartialEq)]
struct Scenario {
    header: Header,
    parameters: Vec<ParameterDeclaration>,
}

intros_type! {
    Header = "FileHeader" {
        rev_major: attribute "revMajor",
        rev_minor: attribute "revMinor",
        description: attribute "description",
        author: attribute "author",
    }

    ParameterDeclaration = "ParameterDeclaration" {
        name: attribute "name",
        value: attribute "value",
    }

    Scenario = "OpenSCENARIO" {
        header: element "FileHeader",
        parameters: element "ParameterDeclarations.ParameterDeclaration",
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a document by hand
    let doc = node!({
        "OpenSCENARIO" => {
            "FileHeader" => {
                @"revMajor" = "1",
                @"revMinor" = "0",
                @"description" = "Cut-in",
                @"author" = "demo",
            },
            "ParameterDeclarations" => {
                "ParameterDeclaration" => { @"name" = "EgoSpeed", @"value" = "30" },
                "ParameterDeclaration" => { @"name" = "Gap", @"value" = "12.5" },
            },
        },
    });

    let scenario: Scenario = decode(&doc)?;
    println!("Decoded: {:#?}\n", scenario);

    let names: Vec<_> = scenario.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["EgoSpeed", "Gap"]);

    println!("Re-encoded:\n{}", to_string(&scenario)?);
    println!("✓ Hand-built tree matches the declared types");

    Ok(())
}
