//! A small OpenSCENARIO-like document, end to end.
//!
//! Reads a scenario file, reports values that had to fall back to defaults, edits the result
//! and writes it back out.
//!
//! Run with: cargo run --example scenario

use intros_tree::{decode_with_report, from_xml_str, intros_type, to_string_pretty};
use std::error::Error;

#[derive(Debug, Default, PartialEq)]
struct FileHeader {
    rev_major: u16,
    rev_minor: u16,
    date: String,
    description: String,
    author: String,
}

#[derive(Debug, Default, PartialEq)]
struct Performance {
    max_speed: f64,
    max_acceleration: f64,
    max_deceleration: f64,
}

#[derive(Debug, Default, PartialEq)]
struct Axle {
    max_steering: f64,
    wheel_diameter: f64,
    track_width: f64,
    position_x: f64,
    position_z: f64,
}

#[derive(Debug, Default, PartialEq)]
struct Axles {
    front: Axle,
    rear: Axle,
}

#[derive(Debug, Default, PartialEq)]
struct Property {
    name: String,
    value: String,
}

#[derive(Debug, Default, PartialEq)]
struct Properties {
    items: Vec<Property>,
}

#[derive(Debug, Default, PartialEq)]
struct Vehicle {
    name: String,
    category: String,
    performance: Performance,
    axles: Axles,
    properties: Properties,
}

#[derive(Debug, Default, PartialEq)]
struct ScenarioObject {
    name: String,
    vehicle: Vehicle,
}

#[derive(Debug, Default, PartialEq)]
struct Scenario {
    header: FileHeader,
    logic_file: String,
    objects: Vec<ScenarioObject>,
}

intros_type! {
    FileHeader = "FileHeader" {
        rev_major: attribute "revMajor",
        rev_minor: attribute "revMinor",
        date: attribute "date",
        description: attribute "description",
        author: attribute "author",
    }

    Performance = "Performance" {
        max_speed: attribute "maxSpeed",
        max_acceleration: attribute "maxAcceleration",
        max_deceleration: attribute "maxDeceleration",
    }

    Axle = "Axle" {
        max_steering: attribute "maxSteering",
        wheel_diameter: attribute "wheelDiameter",
        track_width: attribute "trackWidth",
        position_x: attribute "positionX",
        position_z: attribute "positionZ",
    }

    Axles = "Axles" {
        front: element "FrontAxle",
        rear: element "RearAxle",
    }

    Property = "Property" {
        name: attribute "name",
        value: attribute "value",
    }

    Properties = "Properties" {
        items: element "Property";
        omit_when |p| p.items.is_empty()
    }

    Vehicle = "Vehicle" {
        name: attribute "name",
        category: attribute "vehicleCategory",
        performance: element "Performance",
        axles: element "Axles",
        properties: element "Properties",
    }

    ScenarioObject = "ScenarioObject" {
        name: attribute "name",
        vehicle: element "Vehicle",
    }

    Scenario = "OpenSCENARIO" {
        header: element "FileHeader",
        logic_file: attribute "RoadNetwork.LogicFile.filepath",
        objects: element "Entities.ScenarioObject",
    }
}

const INPUT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<OpenSCENARIO>
  <FileHeader revMajor="1" revMinor="0" date="2024-03-01T09:00:00" description="Cut-in" author="demo"/>
  <RoadNetwork>
    <LogicFile filepath="Town04.xodr"/>
  </RoadNetwork>
  <Entities>
    <ScenarioObject name="Ego">
      <Vehicle name="car_white" vehicleCategory="car">
        <Performance maxSpeed="69.444" maxAcceleration="200" maxDeceleration="10.0"/>
        <Axles>
          <FrontAxle maxSteering="0.5" wheelDiameter="0.6" trackWidth="1.8" positionX="3.1" positionZ="0.3"/>
          <RearAxle maxSteering="0.0" wheelDiameter="0.6" trackWidth="1.8" positionX="0.0" positionZ="0.3"/>
        </Axles>
        <Properties>
          <Property name="model_id" value="0"/>
        </Properties>
      </Vehicle>
    </ScenarioObject>
    <ScenarioObject name="Target">
      <Vehicle name="car_red" vehicleCategory="car">
        <Performance maxSpeed="$MaxSpeed" maxAcceleration="200" maxDeceleration="10.0"/>
        <Axles>
          <FrontAxle maxSteering="0.5" wheelDiameter="0.6" trackWidth="1.8" positionX="3.1" positionZ="0.3"/>
          <RearAxle maxSteering="0.0" wheelDiameter="0.6" trackWidth="1.8" positionX="0.0" positionZ="0.3"/>
        </Axles>
      </Vehicle>
    </ScenarioObject>
  </Entities>
</OpenSCENARIO>
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = from_xml_str(INPUT)?;
    let (mut scenario, report) = decode_with_report::<Scenario>(&doc)?;

    println!(
        "{} (rev {}.{}) on {}",
        scenario.header.description,
        scenario.header.rev_major,
        scenario.header.rev_minor,
        scenario.logic_file
    );
    for object in &scenario.objects {
        println!(
            "  {:<8} {:<10} max speed {}",
            object.name, object.vehicle.name, object.vehicle.performance.max_speed
        );
    }

    // Parameter references are not resolved, so they fall back to defaults
    if !report.is_empty() {
        println!("\n{} value(s) fell back to defaults:", report.len());
        for coercion in report.coercions() {
            println!("  {}", coercion);
        }
    }

    // Edit and write back; Properties without entries are left out
    scenario.header.rev_minor = 1;
    if let Some(target) = scenario.objects.iter_mut().find(|o| o.name == "Target") {
        target.vehicle.performance.max_speed = 50.0;
    }

    println!("\n{}", to_string_pretty(&scenario)?);

    Ok(())
}
