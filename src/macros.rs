/// Builds a [`Value`](crate::Value) tree from a JSON-like literal.
///
/// Objects may carry a type name before the braces. Explicit `null` entries
/// follow the usual insertion policy and are dropped from containers.
///
/// ```rust
/// use muesli::muesli;
///
/// let data = muesli!(User {
///     "name": "Alice",
///     "age": 30,
///     "tags": ["admin", "ops"]
/// });
///
/// let obj = data.as_object().unwrap();
/// assert_eq!(obj.type_name(), "User");
/// assert_eq!(obj.list("tags").unwrap().len(), 2);
/// ```
#[macro_export]
macro_rules! muesli {
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
        $crate::Value::List($crate::List::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let mut list = $crate::List::new();
        $( list.add($crate::muesli!($elem)); )*
        $crate::Value::List(list)
    }};

    ({}) => {
        $crate::Value::Object($crate::Object::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Object::new();
        $( object.add($key, $crate::muesli!($value)); )*
        $crate::Value::Object(object)
    }};

    ($name:ident {}) => {
        $crate::Value::Object($crate::Object::typed(stringify!($name)))
    };

    ($name:ident { $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Object::typed(stringify!($name));
        $( object.add($key, $crate::muesli!($value)); )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
