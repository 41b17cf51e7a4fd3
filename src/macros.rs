/// Builds a [`LineMap`](crate::LineMap) or a [`Value`](crate::Value) from a
/// JSON-like literal.
///
/// An object literal at the top produces a `LineMap`, ready to be encoded.
/// Any other form produces a `Value`. Values that are not literals go through
/// [`Value::from`](crate::Value), so a negative number or a computed value
/// needs parentheses inside an object: `{ "delta": (-1) }`.
///
/// # Examples
///
/// ```rust
/// use serde_lines::{encode, lines, Value};
///
/// let line = lines!({ "at": "boot", "tags": ["a", "b"], "ok": true, "err": null });
/// assert_eq!(encode(&line), "at=boot tags=[a b] ok=#t err=nil");
///
/// assert_eq!(lines!(42), Value::from(42));
/// ```
#[macro_export]
macro_rules! lines {
    ({}) => {
        $crate::LineMap::new()
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut line = $crate::LineMap::new();
        $(
            line.insert($key, $crate::lines!(@value $value));
        )*
        line
    }};

    (@value null) => {
        $crate::Value::Null
    };

    (@value true) => {
        $crate::Value::Bool(true)
    };

    (@value false) => {
        $crate::Value::Bool(false)
    };

    (@value []) => {
        $crate::Value::Sequence(vec![])
    };

    (@value [ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::lines!(@value $elem)),*])
    };

    (@value { $($inner:tt)* }) => {
        $crate::Value::Mapping($crate::lines!({ $($inner)* }))
    };

    (@value $e:expr) => {
        $crate::Value::from($e)
    };

    ($($other:tt)+) => {
        $crate::lines!(@value $($other)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::{LineMap, Number, Value};

    #[test]
    fn test_lines_macro_primitives() {
        assert_eq!(lines!(null), Value::Null);
        assert_eq!(lines!(true), Value::Bool(true));
        assert_eq!(lines!(false), Value::Bool(false));
        assert_eq!(lines!(42), Value::Number(Number::Integer(42)));
        assert_eq!(lines!(-7), Value::Number(Number::Integer(-7)));
        assert_eq!(lines!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(lines!("hello"), Value::Text("hello".to_string()));
    }

    #[test]
    fn test_lines_macro_sequences() {
        assert_eq!(lines!([]), Value::Sequence(vec![]));
        assert_eq!(
            lines!([1, "two", null]),
            Value::Sequence(vec![Value::from(1), Value::from("two"), Value::Null])
        );
    }

    #[test]
    fn test_lines_macro_objects() {
        assert_eq!(lines!({}), LineMap::new());

        let line = lines!({
            "name": "Alice",
            "delta": (-1),
            "nested": { "x": [1] },
        });
        assert_eq!(line.len(), 3);
        assert_eq!(line.get("name"), Some(&Value::from("Alice")));
        assert_eq!(line.get("delta"), Some(&Value::from(-1)));
        assert!(line.get("nested").is_some_and(Value::is_mapping));
    }
}
