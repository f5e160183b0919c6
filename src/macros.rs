#[macro_export]
macro_rules! koda {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::koda!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::KodaMap::new())
    };

    // Handle non-empty object with literal keys
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::KodaMap::new();
        $(
            object.insert($key.to_string(), $crate::koda!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any other expression
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    }};
}
