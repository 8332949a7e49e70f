use super::Value;
use std::fmt;

impl Value {
    /// Rendering used inside arrays: strings are quoted JSON strings.
    pub fn to_nested_string(&self) -> String {
        match self {
            Value::String(s) => serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}")),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::String(s) => write!(f, "{s}"),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(Value::to_nested_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_drop_the_fraction() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(-3.5).to_string(), "-3.5");
    }

    #[test]
    fn strings_are_quoted_only_inside_arrays() {
        let value = Value::Array(vec![Value::from("a"), Value::Null, Value::from(true)]);
        assert_eq!(Value::from("a").to_string(), "a");
        assert_eq!(value.to_string(), r#"["a", null, true]"#);
    }
}
