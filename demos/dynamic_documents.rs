//! Working with Node trees directly, without declared types.
//!
//! Run with: cargo run --example dynamic_documents

use intros_tree::{from_xml_str, to_xml_string, Node, XmlOptions};
use std::error::Error;

const INPUT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<OpenSCENARIO>
  <Entities>
    <ScenarioObject name="Ego">
      <CatalogReference catalogName="VehicleCatalog" entryName="car_white"/>
    </ScenarioObject>
    <ScenarioObject name="Target">
      <CatalogReference catalogName="VehicleCatalog" entryName="car_red"/>
    </ScenarioObject>
  </Entities>
</OpenSCENARIO>
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = from_xml_str(INPUT)?;

    // Read
    let entities = doc
        .child("OpenSCENARIO")
        .and_then(|root| root.child("Entities"))
        .ok_or("no Entities node")?;
    for object in entities.children_with_key("ScenarioObject") {
        let entry = object
            .child("CatalogReference")
            .and_then(|r| r.attribute("entryName"))
            .unwrap_or("-");
        println!("{:<8} {}", object.attribute("name").unwrap_or("?"), entry);
    }

    // Modify
    let entities = doc
        .child_mut("OpenSCENARIO")
        .and_then(|root| root.child_mut("Entities"))
        .ok_or("no Entities node")?;
    let mut pedestrian = Node::new();
    pedestrian.set_attribute("name", "Walker");
    pedestrian
        .add_child("CatalogReference")
        .set_attribute("entryName", "pedestrian_adult");
    entities.push_child("ScenarioObject", pedestrian);

    println!("\n{}", to_xml_string(&doc, &XmlOptions::pretty()));

    // Trees are plain data and serialize with serde
    let json = serde_json::to_string_pretty(&doc)?;
    println!("As JSON:\n{}", json);

    Ok(())
}
