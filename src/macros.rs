/// Builds a [`Value`](crate::Value) tree with VDF-like syntax.
///
/// Objects are written `{ "key": value, ... }`. A bracketed list becomes an
/// object keyed `"0"`, `"1"`, … the way sequences are stored in VDF. `true`
/// and `false` become `"1"` and `"0"`, and any other expression becomes a
/// leaf holding its `Display` text.
///
/// # Examples
///
/// ```rust
/// use serde_vdf::{vdf, Value};
///
/// let steam = vdf!({
///     "Steam": {
///         "DesktopShortcutCheck": true,
///         "SurveyDateVersion": 42,
///         "Tags": ["Puzzle", "Sci-fi"]
///     }
/// });
///
/// assert_eq!(
///     steam.get_path(&["Steam", "DesktopShortcutCheck"]).and_then(Value::as_str),
///     Some("1")
/// );
/// assert_eq!(
///     steam.get_path(&["Steam", "Tags", "1"]).and_then(Value::as_str),
///     Some("Sci-fi")
/// );
/// ```
#[macro_export]
macro_rules! vdf {
    (true) => {
        $crate::Value::from(true)
    };

    (false) => {
        $crate::Value::from(false)
    };

    ([]) => {
        $crate::Value::Object($crate::VdfMap::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Object(
            ::std::vec![$($crate::vdf!($elem)),*]
                .into_iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value))
                .collect(),
        )
    };

    ({}) => {
        $crate::Value::Object($crate::VdfMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::VdfMap::new();
        $(
            object.insert($key.to_string(), $crate::vdf!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::Leaf(::std::string::ToString::to_string(&$other))
    };
}

#[cfg(test)]
mod tests {
    use crate::{Value, VdfMap};

    #[test]
    fn test_vdf_macro_leaves() {
        assert_eq!(vdf!(true), Value::from("1"));
        assert_eq!(vdf!(false), Value::from("0"));
        assert_eq!(vdf!(400), Value::from("400"));
        assert_eq!(vdf!("Portal"), Value::from("Portal"));

        let name = String::from("Half-Life");
        assert_eq!(vdf!(name), Value::from("Half-Life"));
    }

    #[test]
    fn test_vdf_macro_lists_use_index_keys() {
        assert_eq!(vdf!([]), Value::Object(VdfMap::new()));

        let tags = vdf!(["Puzzle", "Sci-fi", "Singleplayer"]);
        let keys: Vec<_> = tags.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["0", "1", "2"]);
        assert_eq!(tags.get("2").and_then(Value::as_str), Some("Singleplayer"));
    }

    #[test]
    fn test_vdf_macro_nested_objects() {
        let config = vdf!({
            "InstallConfigStore": {
                "Software": {
                    "Valve": { "Steam": { "AutoUpdateWindowEnabled": false } }
                }
            },
            "400": { "name": "Portal" },
        });

        assert_eq!(
            config
                .get_path(&[
                    "InstallConfigStore",
                    "Software",
                    "Valve",
                    "Steam",
                    "AutoUpdateWindowEnabled"
                ])
                .and_then(Value::as_str),
            Some("0")
        );
        assert_eq!(
            config.get_path(&["400", "name"]).and_then(Value::as_str),
            Some("Portal")
        );
    }

    #[test]
    fn test_vdf_macro_matches_parser() {
        let built = vdf!({ "a": "1", "b": { "c": "2" } });
        let parsed = crate::parse("\"a\" \"1\" \"b\" { \"c\" \"2\" }").unwrap();
        assert_eq!(built, parsed);
    }
}
