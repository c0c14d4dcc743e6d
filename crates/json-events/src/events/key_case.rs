use super::{forward_to_inner, transformer_struct, Consumer};
use crate::error::Result;

/// `fooBar` to `foo_bar`. Runs of capitals stay together (`HTTPServer` to
/// `http_server`) and no underscore is doubled.
pub fn camel_case_to_snake_case(v: &str) -> String {
    let chars: Vec<char> = v.chars().collect();
    let mut out = String::with_capacity(v.len() + 4);
    let mut last_upper = false;
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let next_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if i != 0 && (!last_upper || next_lower) && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            last_upper = true;
        } else {
            out.push(c);
            last_upper = false;
        }
    }
    out
}

/// `foo_bar` to `fooBar`. Only underscores between two other characters are
/// removed; leading, trailing and repeated underscores are kept.
pub fn snake_case_to_camel_case(v: &str) -> String {
    let chars: Vec<char> = v.chars().collect();
    let mut out = String::with_capacity(v.len());
    let mut upper_next = false;
    for (i, &c) in chars.iter().enumerate() {
        let joins = c == '_'
            && i > 0
            && chars[i - 1] != '_'
            && chars.get(i + 1).is_some_and(|&n| n != '_');
        if joins {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

transformer_struct!(
    /// Rewrites object keys with [`camel_case_to_snake_case`].
    KeyCamelCaseToSnakeCase
);

transformer_struct!(
    /// Rewrites object keys with [`snake_case_to_camel_case`].
    KeySnakeCaseToCamelCase
);

impl<C: Consumer> Consumer for KeyCamelCaseToSnakeCase<C> {
    fn key(&mut self, v: &str) -> Result<()> {
        self.inner.key(&camel_case_to_snake_case(v))
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, string_bytes,
        binary, begin_array, element, end_array, begin_object, member, end_object,
    );
}

impl<C: Consumer> Consumer for KeySnakeCaseToCamelCase<C> {
    fn key(&mut self, v: &str) -> Result<()> {
        self.inner.key(&snake_case_to_camel_case(v))
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, string_bytes,
        binary, begin_array, element, end_array, begin_object, member, end_object,
    );
}
