/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object keys keep the order they are written in. Anything that is not a nested
/// array, object or `null`/`true`/`false` goes through [`to_value`](crate::to_value);
/// a value that cannot be converted becomes `Null`.
///
/// ```rust
/// use ordered_json::value;
///
/// let v = value!({"b": [1, 2.5, null], "a": {"nested": true}});
/// assert_eq!(v.to_string(), r#"{"b":[1,2.5,null],"a":{"nested":true}}"#);
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array($crate::List::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let mut list = $crate::List::new();
        $(
            list.push_back($crate::value!($elem));
        )*
        $crate::Value::Array(list)
    }};

    ({}) => {
        $crate::Value::Object($crate::OrderedMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::OrderedMap::new();
        $(
            object.set($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or_default()
    };
}

/// Builds a [`List`](crate::List) from its elements, front to back.
///
/// ```rust
/// use ordered_json::list;
///
/// let l = list![1, 2, 3];
/// assert_eq!(l.len(), 3);
/// assert_eq!(l.get_at(-1), Some(&3));
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::List::new()
    };

    ($($elem:expr),+ $(,)?) => {{
        let mut list = $crate::List::new();
        $(
            list.push_back($elem);
        )+
        list
    }};
}

/// Builds an [`OrderedMap`](crate::OrderedMap) with `set` semantics: a repeated key
/// keeps its first position and takes the last value.
///
/// ```rust
/// use ordered_json::ordered_map;
///
/// let m = ordered_map! {"b" => 1, "a" => 2, "b" => 3};
/// assert_eq!(m.iter().collect::<Vec<_>>(), vec![(&"b", &3), (&"a", &2)]);
/// ```
#[macro_export]
macro_rules! ordered_map {
    () => {
        $crate::OrderedMap::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::OrderedMap::new();
        $(
            map.set($key, $value);
        )+
        map
    }};
}
