use ordered_json::{
    from_reader, from_slice, from_str, from_value, to_string, to_string_pretty,
    to_string_with_options, to_value, to_vec, to_writer, EncodeOptions, Error, List, OrderedMap,
    Value,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
    note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Shape {
    Empty,
    Circle(f64),
    Rect(u32, u32),
    Polygon { sides: u8, label: String },
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Section {
    name: String,
    settings: OrderedMap<String, String>,
    history: List<u16>,
}

fn alice(tags: &[&str]) -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn test_simple_struct() {
    let user = alice(&["admin", "developer"]);

    let json = to_string(&user).unwrap();
    assert_eq!(
        json,
        r#"{"id":123,"name":"Alice","active":true,"tags":["admin","developer"]}"#
    );

    let user_back: User = from_str(&json).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: alice(&["vip"]),
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
        note: None,
    };

    let json = to_string_pretty(&order).unwrap();
    assert!(json.starts_with("{\n  \"order_id\": 12345,\n  \"customer\": {\n    \"id\": 123,"));
    assert!(json.ends_with("  \"total\": 109.97,\n  \"note\": null\n}"));

    let order_back: Order = from_str(&json).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_array_of_objects() {
    let products = vec![
        Product {
            sku: "A001".to_string(),
            price: 10.99,
            quantity: 5,
        },
        Product {
            sku: "B002".to_string(),
            price: 15.99,
            quantity: 3,
        },
        Product {
            sku: "C003".to_string(),
            price: 20.99,
            quantity: 1,
        },
    ];

    let json = to_string_pretty(&products).unwrap();
    let products_back: Vec<Product> = from_str(&json).unwrap();
    assert_eq!(products, products_back);
}

#[test]
fn test_primitives() {
    assert_roundtrip(&42i32);
    assert_roundtrip(&3.5f64);
    assert_roundtrip(&true);
    assert_roundtrip(&false);
    assert_roundtrip(&'x');
    assert_roundtrip(&"hello world".to_string());
    assert_roundtrip(&vec![1, 2, 3, 4, 5]);
    assert_roundtrip(&());
    assert_roundtrip(&Some(5u8));
    assert_roundtrip(&None::<u8>);
    assert_roundtrip(&(1u8, "two".to_string(), 3.5f32));
}

#[test]
fn test_enums() {
    let shapes = vec![
        Shape::Empty,
        Shape::Circle(1.5),
        Shape::Rect(3, 4),
        Shape::Polygon {
            sides: 6,
            label: "hex".to_string(),
        },
    ];

    let json = to_string(&shapes).unwrap();
    assert_eq!(
        json,
        r#"["Empty",{"Circle":1.5},{"Rect":[3,4]},{"Polygon":{"sides":6,"label":"hex"}}]"#
    );
    let back: Vec<Shape> = from_str(&json).unwrap();
    assert_eq!(back, shapes);

    assert!(from_str::<Shape>(r#"{"Circle": 1, "Rect": [1, 2]}"#).is_err());
    assert!(from_str::<Shape>("3").is_err());
}

#[test]
fn test_options() {
    let user = alice(&["admin", "<script>"]);

    let options = EncodeOptions::pretty().with_indent(4);
    let json = to_string_with_options(&user, options).unwrap();
    assert!(json.contains("\n    \"id\": 123,\n"));
    let user_back: User = from_str(&json).unwrap();
    assert_eq!(user, user_back);

    let options = EncodeOptions::pretty().with_prefix("  ").with_indent(1);
    let json = to_string_with_options(&user, options).unwrap();
    assert!(json.ends_with("\n  }"));
    let user_back: User = from_str(&json).unwrap();
    assert_eq!(user, user_back);

    let options = EncodeOptions::new().with_escape_html(true);
    let json = to_string_with_options(&user, options).unwrap();
    assert!(!json.contains("<script>"));
    let user_back: User = from_str(&json).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_to_value() {
    let user = alice(&["admin"]);
    let value = to_value(&user).unwrap();

    match &value {
        Value::Object(obj) => {
            assert_eq!(
                obj.keys().cloned().collect::<Vec<_>>(),
                vec!["id", "name", "active", "tags"]
            );
            assert_eq!(obj.get("id"), Some(&Value::Number(123.0)));
            assert_eq!(obj.get("name"), Some(&Value::String("Alice".to_string())));
            assert_eq!(obj.get("active"), Some(&Value::Bool(true)));

            if let Some(Value::Array(tags)) = obj.get("tags") {
                assert_eq!(tags.len(), 1);
                assert_eq!(tags.get_at(0), Some(&Value::String("admin".to_string())));
            } else {
                panic!("Expected tags to be an array");
            }
        }
        _ => panic!("Expected object"),
    }

    let user_back: User = from_value(value).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_from_value_type_errors() {
    let value = to_value(&alice(&[])).unwrap();
    assert!(from_value::<Vec<u32>>(value.clone()).is_err());
    assert!(from_value::<String>(value).is_err());
    assert!(from_value::<u8>(Value::Number(256.0)).is_err());
    assert!(from_value::<u8>(Value::Number(1.5)).is_err());
    assert_eq!(from_value::<f32>(Value::Number(1.5)).unwrap(), 1.5);
}

#[test]
fn test_ordered_containers_as_fields() {
    let mut settings = OrderedMap::new();
    settings.set("zeta".to_string(), "last letter".to_string());
    settings.set("alpha".to_string(), "first letter".to_string());
    let section = Section {
        name: "letters".to_string(),
        settings,
        history: vec![3, 1, 2].into(),
    };

    let json = to_string(&section).unwrap();
    assert_eq!(
        json,
        r#"{"name":"letters","settings":{"zeta":"last letter","alpha":"first letter"},"history":[3,1,2]}"#
    );

    let back: Section = from_str(&json).unwrap();
    assert_eq!(back, section);
    assert_eq!(
        back.settings.keys().cloned().collect::<Vec<_>>(),
        vec!["zeta", "alpha"]
    );
}

#[test]
fn test_non_string_map_keys() {
    let mut scores = BTreeMap::new();
    scores.insert(10u32, "ten".to_string());
    scores.insert(2u32, "two".to_string());
    let json = to_string(&scores).unwrap();
    assert_eq!(json, r#"{"2":"two","10":"ten"}"#);
    let back: BTreeMap<u32, String> = from_str(&json).unwrap();
    assert_eq!(back, scores);

    let mut flags = BTreeMap::new();
    flags.insert(true, 1);
    let json = to_string(&flags).unwrap();
    assert_eq!(json, r#"{"true":1}"#);
    let back: BTreeMap<bool, i32> = from_str(&json).unwrap();
    assert_eq!(back, flags);

    let mut bad = BTreeMap::new();
    bad.insert(vec![1], 1);
    assert!(matches!(to_string(&bad), Err(Error::KeyMustBeString)));
}

#[test]
fn test_empty_collections() {
    let empty_vec: Vec<i32> = vec![];
    assert_roundtrip(&empty_vec);
    assert_eq!(to_string(&empty_vec).unwrap(), "[]");

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Empty {}

    let empty = Empty {};
    assert_eq!(to_string(&empty).unwrap(), "{}");
    assert_eq!(to_string_pretty(&empty).unwrap(), "{}");
    assert_roundtrip(&empty);
}

#[test]
fn test_special_strings() {
    let special_strings = vec![
        "".to_string(),
        "hello, world".to_string(),
        "line1\nline2".to_string(),
        "tab\there".to_string(),
        "back\\slash".to_string(),
        "slash/here".to_string(),
        "nul\u{0}byte".to_string(),
        "true".to_string(),
        "null".to_string(),
        "123".to_string(),
        "\"quoted\"".to_string(),
        "caf\u{e9} \u{4e2d}\u{6587} \u{1f980}".to_string(),
        "\u{2028}\u{2029}".to_string(),
    ];

    for s in special_strings {
        assert_roundtrip(&s);
    }
}

#[test]
fn test_numbers() {
    assert_roundtrip(&0i8);
    assert_roundtrip(&127i8);
    assert_roundtrip(&-128i8);
    assert_roundtrip(&32767i16);
    assert_roundtrip(&-32768i16);
    assert_roundtrip(&2147483647i32);
    assert_roundtrip(&-2147483648i32);
    assert_roundtrip(&0i64);
    assert_roundtrip(&9_007_199_254_740_992i64);
    assert_roundtrip(&-9_007_199_254_740_992i64);
    assert_roundtrip(&i64::MIN);

    assert_roundtrip(&255u8);
    assert_roundtrip(&65535u16);
    assert_roundtrip(&4294967295u32);
    assert_roundtrip(&9_007_199_254_740_992u64);

    assert_roundtrip(&0.0f32);
    assert_roundtrip(&3.5f32);
    assert_roundtrip(&-2.5f32);
    assert_roundtrip(&0.0f64);
    assert_roundtrip(&4.25f64);
    assert_roundtrip(&-5.75f64);
    assert_roundtrip(&1e-7f64);
    assert_roundtrip(&6.02214076e23f64);
    assert_roundtrip(&f64::MAX);
    assert_roundtrip(&f64::MIN_POSITIVE);
}

#[test]
fn test_integers_are_written_exactly() {
    assert_eq!(to_string(&u64::MAX).unwrap(), "18446744073709551615");
    assert_eq!(to_string(&i64::MIN).unwrap(), "-9223372036854775808");
    assert_eq!(to_string(&-0.0f64).unwrap(), "-0");
    assert_eq!(to_string(&1e21f64).unwrap(), "1e21");
}

#[test]
fn test_io_entry_points() {
    let user = alice(&["io"]);

    let bytes = to_vec(&user).unwrap();
    let mut written = Vec::new();
    to_writer(&mut written, &user).unwrap();
    assert_eq!(bytes, written);

    let from_bytes: User = from_slice(&bytes).unwrap();
    let from_io: User = from_reader(bytes.as_slice()).unwrap();
    assert_eq!(from_bytes, user);
    assert_eq!(from_io, user);
}

#[test]
fn test_error_display() {
    let err = from_str::<User>("{\"id\": 1,\n \"name\": }").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("line 2"), "{}", message);
    assert!(message.contains("expecting an object value"), "{}", message);

    let err = from_str::<User>(r#"{"id": 1}"#).unwrap_err();
    assert!(matches!(err, Error::Custom(_)));
    assert!(err.to_string().contains("missing field"));
}

fn assert_roundtrip<T>(original: &T)
where
    T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    let json = to_string(original).unwrap();
    let deserialized: T = from_str(&json).unwrap();
    assert_eq!(*original, deserialized);

    let pretty = to_string_pretty(original).unwrap();
    let deserialized: T = from_str(&pretty).unwrap();
    assert_eq!(*original, deserialized);
}

struct BrokenPipe;

impl std::io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::io::Read for BrokenPipe {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
    }
}

#[test]
fn test_io_failures_become_io_errors() {
    let err = to_writer(BrokenPipe, &vec![1, 2]).unwrap_err();
    assert_eq!(err, Error::Io("pipe closed".to_string()));

    let err = from_reader::<_, Value>(BrokenPipe).unwrap_err();
    assert!(matches!(err, Error::Io(ref msg) if msg == "pipe closed"));
}
