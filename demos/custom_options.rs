//! Controlling the XML output with XmlOptions.
//!
//! Run with: cargo run --example custom_options

use intros_tree::{intros_type, to_string_with_options, IndentChar, XmlOptions};
use std::error::Error;

#[derive(Debug, Default)]
struct Dimensions {
    width: f64,
    length: f64,
    height: f64,
}

#[derive(Debug, Default)]
struct Vehicle {
    name: String,
    category: String,
    dimensions: Dimensions,
}

intros_type! {
    Dimensions = "Dimensions" {
        width: attribute "width",
        length: attribute "length",
        height: attribute "height",
    }

    Vehicle = "Vehicle" {
        name: attribute "name",
        category: attribute "vehicleCategory",
        dimensions: element "BoundingBox.Dimensions",
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let vehicle = Vehicle {
        name: "car_white".to_string(),
        category: "car".to_string(),
        dimensions: Dimensions {
            width: 1.8,
            length: 4.5,
            height: 1.5,
        },
    };

    // Default: a single line, no declaration
    println!("Compact:");
    println!("{}\n", to_string_with_options(&vehicle, XmlOptions::new())?);

    // Pretty: one element per line, two spaces, with declaration
    println!("Pretty:");
    println!("{}", to_string_with_options(&vehicle, XmlOptions::pretty())?);

    // Tabs, no declaration
    println!("Tabs:");
    let tabs = XmlOptions::pretty()
        .with_declaration(false)
        .with_indent_char(IndentChar::Tab)
        .with_indent(1);
    println!("{}", to_string_with_options(&vehicle, tabs)?);

    // Four spaces
    println!("Four spaces:");
    let wide = XmlOptions::new().with_pretty(true).with_indent(4);
    println!("{}", to_string_with_options(&vehicle, wide)?);

    Ok(())
}
