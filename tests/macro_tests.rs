use intros_tree::{
    accessor, decode, decode_with_report, encode, from_str, intros_type, node, register,
    scalar_member, to_string, Category, FieldDescriptor, Member, Node, Scalar,
};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
enum SignalState {
    #[default]
    Off,
    Red,
    Yellow,
    Green,
}

impl Scalar for SignalState {
    fn to_text(&self) -> String {
        match self {
            SignalState::Off => "off",
            SignalState::Red => "red",
            SignalState::Yellow => "yellow",
            SignalState::Green => "green",
        }
        .to_string()
    }

    fn from_text(text: &str) -> Option<Self> {
        match text.trim() {
            "off" => Some(SignalState::Off),
            "red" => Some(SignalState::Red),
            "yellow" => Some(SignalState::Yellow),
            "green" => Some(SignalState::Green),
            _ => None,
        }
    }
}

scalar_member!(SignalState);

#[derive(Debug, Default, Clone, PartialEq)]
struct TrafficSignalState {
    signal_id: String,
    state: SignalState,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Phase {
    name: String,
    duration: f64,
    states: Vec<TrafficSignalState>,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct TrafficSignalController {
    name: String,
    delay: f64,
    reference: String,
    phases: Vec<Phase>,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Cycle {
    states: Vec<SignalState>,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Comment {
    author: String,
    body: String,
}

intros_type! {
    TrafficSignalState = "TrafficSignalState" {
        signal_id: attribute "trafficSignalId",
        state: attribute "state",
    }

    Phase = "Phase" {
        name: attribute "name",
        duration: attribute "duration",
        states: element "TrafficSignalState",
    }

    TrafficSignalController = "TrafficSignalController" {
        name: attribute "name",
        delay: attribute "delay",
        reference: attribute "reference",
        phases: element "Phase",
    }

    Cycle = "Cycle" {
        states: element "State",
    }

    Comment = "Comment" {
        author: attribute "author",
        body: element "#text";
        omit_when |c| c.body.is_empty()
    }
}

fn controller() -> TrafficSignalController {
    TrafficSignalController {
        name: "junction_1".to_string(),
        delay: 0.0,
        reference: String::new(),
        phases: vec![
            Phase {
                name: "go".to_string(),
                duration: 30.0,
                states: vec![
                    TrafficSignalState {
                        signal_id: "s1".to_string(),
                        state: SignalState::Green,
                    },
                    TrafficSignalState {
                        signal_id: "s2".to_string(),
                        state: SignalState::Red,
                    },
                ],
            },
            Phase {
                name: "clear".to_string(),
                duration: 3.5,
                states: vec![TrafficSignalState {
                    signal_id: "s1".to_string(),
                    state: SignalState::Yellow,
                }],
            },
        ],
    }
}

#[test]
fn test_node_macro_empty() {
    let doc = node!({});
    assert!(doc.is_empty());
    assert_eq!(doc, Node::new());
}

#[test]
fn test_node_macro_attributes_and_children() {
    let doc = node!({
        "Phase" => {
            @"name" = "go",
            @"duration" = "30.0",
            "TrafficSignalState" => { @"trafficSignalId" = "s1", @"state" = "green" },
            "TrafficSignalState" => { @"trafficSignalId" = "s2" },
        },
    });

    let phase = doc.child("Phase").unwrap();
    assert_eq!(phase.attribute("duration"), Some("30.0"));
    let ids: Vec<_> = phase
        .children_with_key("TrafficSignalState")
        .filter_map(|s| s.attribute("trafficSignalId"))
        .collect();
    assert_eq!(ids, vec!["s1", "s2"]);
}

#[test]
fn test_node_macro_text() {
    let owned = String::from("owned text");
    let doc = node!({
        "Comment" => { @"author" = "qa", #text = "looks fine" },
        "Note" => owned,
    });

    let comment = doc.child("Comment").unwrap();
    assert_eq!(comment.text(), Some("looks fine"));
    assert_eq!(comment.attribute("author"), Some("qa"));
    assert_eq!(doc.child("Note").and_then(|n| n.text()), Some("owned text"));
}

#[test]
fn test_node_macro_matches_encoded_tree() {
    let built = node!({
        "TrafficSignalState" => { @"trafficSignalId" = "s9", @"state" = "red" },
    });
    let encoded = encode(&TrafficSignalState {
        signal_id: "s9".to_string(),
        state: SignalState::Red,
    })
    .unwrap();

    assert_eq!(built, encoded);
}

#[test]
fn test_intros_type_registers_fields_in_order() {
    let descriptor = register::<TrafficSignalController>().unwrap();
    assert_eq!(descriptor.node_name(), "TrafficSignalController");

    let paths: Vec<_> = descriptor.fields().iter().map(|f| f.path().as_str()).collect();
    assert_eq!(paths, vec!["name", "delay", "reference", "Phase"]);
    assert_eq!(descriptor.fields()[3].category(), Category::Collection);
    assert!(!descriptor.is_optional());
}

#[test]
fn test_intros_type_roundtrip_through_xml() {
    let xml = to_string(&controller()).unwrap();
    println!("Controller XML: {}", xml);

    let back: TrafficSignalController = from_str(&xml).unwrap();
    assert_eq!(back, controller());
}

#[test]
fn test_intros_type_omit_when() {
    #[derive(Debug, Default, PartialEq)]
    struct Review {
        score: u8,
        comment: Comment,
    }

    intros_type! {
        Review = "Review" {
            score: attribute "score",
            comment: element "Comment",
        }
    }

    let quiet = Review {
        score: 4,
        comment: Comment::default(),
    };
    assert_eq!(to_string(&quiet).unwrap(), "<Review score=\"4\"/>");

    let loud = Review {
        score: 1,
        comment: Comment {
            author: "qa".to_string(),
            body: "too slow".to_string(),
        },
    };
    let xml = to_string(&loud).unwrap();
    assert_eq!(
        xml,
        "<Review score=\"1\"><Comment author=\"qa\">too slow</Comment></Review>"
    );
    assert_eq!(from_str::<Review>(&xml).unwrap(), loud);
}

#[test]
fn test_accessor_macro() {
    let field = FieldDescriptor::new("duration", true, accessor!(Phase, duration)).unwrap();
    assert_eq!(field.category(), Category::Scalar);
    assert!(field.is_attribute());
    assert_eq!(field.type_name(), "f64");

    let states = FieldDescriptor::new("TrafficSignalState", false, accessor!(Phase, states)).unwrap();
    assert_eq!(states.category(), Category::Collection);
}

#[test]
fn test_scalar_member_custom_enum() {
    assert_eq!(<SignalState as Member>::CATEGORY, Category::Scalar);

    let doc = node!({
        "TrafficSignalState" => { @"trafficSignalId" = "s1", @"state" = "blue" },
    });
    let (state, report) = decode_with_report::<TrafficSignalState>(&doc).unwrap();
    assert_eq!(state.state, SignalState::Off);
    assert_eq!(report.len(), 1);
    assert_eq!(report.coercions()[0].text(), "blue");
}

#[test]
fn test_scalar_member_as_collection_element() {
    let cycle = Cycle {
        states: vec![SignalState::Red, SignalState::Green, SignalState::Yellow],
    };

    let doc = encode(&cycle).unwrap();
    let texts: Vec<_> = doc
        .child("Cycle")
        .unwrap()
        .children_with_key("State")
        .filter_map(|s| s.text())
        .collect();
    assert_eq!(texts, vec!["red", "green", "yellow"]);

    let back: Cycle = decode(&doc).unwrap();
    assert_eq!(back, cycle);
}
