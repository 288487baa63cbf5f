/// Builds a [`Node`](crate::Node) tree in place.
///
/// Inside the braces, `@"key" = value` sets an attribute, `#text = value` sets the node's own
/// text, `"key" => { ... }` appends a child built from a nested block, and `"key" => value`
/// appends a child that only carries text. Values are anything `Into<String>`.
///
/// ```rust
/// use intros_tree::node;
///
/// let doc = node!({
///     "Line" => {
///         @"name" = "L1",
///         "Point" => { @"x" = "1.0", @"y" = "2.0" },
///         "Point" => { @"x" = "3.0", @"y" = "4.0" },
///         "Comment" => "two points",
///     },
/// });
///
/// let line = doc.child("Line").unwrap();
/// assert_eq!(line.attribute("name"), Some("L1"));
/// assert_eq!(line.children_with_key("Point").count(), 2);
/// assert_eq!(line.child("Comment").and_then(|c| c.text()), Some("two points"));
/// ```
#[macro_export]
macro_rules! node {
    ({}) => {
        $crate::Node::new()
    };

    ({ $($body:tt)+ }) => {{
        let mut node = $crate::Node::new();
        $crate::node!(@fill node; $($body)+);
        node
    }};

    (@fill $node:ident;) => {};

    (@fill $node:ident; @ $key:literal = $value:expr $(, $($rest:tt)*)?) => {
        $node.set_attribute($key, $value);
        $crate::node!(@fill $node; $($($rest)*)?);
    };

    (@fill $node:ident; # text = $value:expr $(, $($rest:tt)*)?) => {
        $node.set_text($value);
        $crate::node!(@fill $node; $($($rest)*)?);
    };

    (@fill $node:ident; $key:literal => { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $node.push_child($key, $crate::node!({ $($inner)* }));
        $crate::node!(@fill $node; $($($rest)*)?);
    };

    (@fill $node:ident; $key:literal => $value:expr $(, $($rest:tt)*)?) => {
        $node.push_child($key, $crate::Node::with_text($value));
        $crate::node!(@fill $node; $($($rest)*)?);
    };
}

/// Builds an [`Accessor`](crate::Accessor) for a named field.
///
/// ```rust
/// use intros_tree::{accessor, Category, FieldDescriptor};
///
/// #[derive(Default)]
/// struct Lane {
///     id: i32,
/// }
///
/// let field = FieldDescriptor::new("id", true, accessor!(Lane, id)).unwrap();
/// assert_eq!(field.category(), Category::Scalar);
/// ```
#[macro_export]
macro_rules! accessor {
    ($ty:ty, $field:ident) => {
        $crate::Accessor::<$ty, _>::new(|v| &v.$field, |v| &mut v.$field)
    };
}

/// Implements [`Introspect`](crate::Introspect) from a field table.
///
/// Each entry is `field: attribute "path"` or `field: element "path"`, in emission order. An
/// optional `; omit_when predicate` closing the table makes the type optional when nested.
/// Generic types implement [`Introspect`](crate::Introspect) by hand.
///
/// ```rust
/// use intros_tree::{decode, encode, intros_type};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Line {
///     name: String,
///     points: Vec<Point>,
/// }
///
/// intros_type! {
///     Point = "Point" {
///         x: attribute "x",
///         y: attribute "y",
///     }
///
///     Line = "Line" {
///         name: attribute "name",
///         points: element "Point";
///         omit_when |line| line.points.is_empty()
///     }
/// }
///
/// let line = Line {
///     name: "L1".into(),
///     points: vec![Point { x: 1.0, y: 2.0 }],
/// };
/// let back: Line = decode(&encode(&line).unwrap()).unwrap();
/// assert_eq!(back, line);
/// ```
#[macro_export]
macro_rules! intros_type {
    ($(
        $ty:ident = $name:literal {
            $($field:ident : $kind:ident $path:literal),* $(,)?
            $(; omit_when $predicate:expr)?
        }
    )+) => {
        $(
            impl $crate::Introspect for $ty {
                fn describe() -> ::std::result::Result<
                    $crate::TypeDescriptor<Self>,
                    $crate::RegistrationError,
                > {
                    $crate::TypeDescriptor::<Self>::builder($name)
                        $(.$kind($path, |v| &v.$field, |v| &mut v.$field))*
                        $(.omit_when($predicate))?
                        .build()
                }
            }
        )+
    };
}

/// Binds [`Scalar`](crate::Scalar) types as field and collection element types.
///
/// The types must also implement `Default`, which is used when a slot is missing or its text
/// does not parse.
///
/// ```rust
/// use intros_tree::{scalar_member, Category, Member, Scalar};
///
/// #[derive(Debug, Default, Clone, Copy, PartialEq)]
/// enum Rule {
///     #[default]
///     RightHand,
///     LeftHand,
/// }
///
/// impl Scalar for Rule {
///     fn to_text(&self) -> String {
///         match self {
///             Rule::RightHand => "RHT".to_string(),
///             Rule::LeftHand => "LHT".to_string(),
///         }
///     }
///
///     fn from_text(text: &str) -> Option<Self> {
///         match text.trim() {
///             "RHT" => Some(Rule::RightHand),
///             "LHT" => Some(Rule::LeftHand),
///             _ => None,
///         }
///     }
/// }
///
/// scalar_member!(Rule);
///
/// assert_eq!(<Rule as Member>::CATEGORY, Category::Scalar);
/// ```
#[macro_export]
macro_rules! scalar_member {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Member for $ty {
                const CATEGORY: $crate::Category = $crate::Category::Scalar;

                fn encode_member(
                    &self,
                    parent: &mut $crate::Node,
                    path: &$crate::FieldPath,
                ) -> $crate::Result<()> {
                    $crate::encode::encode_scalar(self, parent, path)
                }

                fn decode_member(
                    &mut self,
                    parent: &$crate::Node,
                    path: &$crate::FieldPath,
                    report: &mut $crate::DecodeReport,
                ) -> $crate::Result<()> {
                    $crate::decode::decode_scalar(self, parent, path, report)
                }
            }

            impl $crate::Element for $ty {
                fn encode_element(&self) -> $crate::Result<$crate::Node> {
                    $crate::encode::encode_scalar_element(self)
                }

                fn decode_element(
                    node: &$crate::Node,
                    location: $crate::Location<'_>,
                    report: &mut $crate::DecodeReport,
                ) -> $crate::Result<Self> {
                    $crate::decode::decode_scalar_element(node, location, report)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use crate::{decode, encode, Node};

    #[derive(Debug, Default, PartialEq)]
    struct Stop {
        name: String,
        seconds: u32,
    }

    intros_type! {
        Stop = "Stop" {
            name: element "#text",
            seconds: attribute "duration";
            omit_when |stop| stop.name.is_empty()
        }
    }

    #[test]
    fn test_node_macro_empty() {
        assert_eq!(node!({}), Node::new());
    }

    #[test]
    fn test_node_macro_text_and_attributes() {
        let node = node!({ @"k" = "v", #text = "body" });
        assert_eq!(node.attribute("k"), Some("v"));
        assert_eq!(node.text(), Some("body"));
    }

    #[test]
    fn test_node_macro_keeps_sibling_order() {
        let node = node!({
            "a" => "1",
            "b" => {},
            "a" => "2",
        });
        let texts: Vec<_> = node.children_with_key("a").filter_map(Node::text).collect();
        assert_eq!(texts, vec!["1", "2"]);
        assert_eq!(node.child_count(), 3);
    }

    #[test]
    fn test_intros_type_text_field() {
        let stop = Stop {
            name: "Depot".to_string(),
            seconds: 30,
        };
        let doc = encode(&stop).unwrap();
        assert_eq!(
            doc,
            node!({ "Stop" => { @"duration" = "30", #text = "Depot" } })
        );
        assert_eq!(decode::<Stop>(&doc).unwrap(), stop);
    }
}
