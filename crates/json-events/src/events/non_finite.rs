use super::{forward_to_inner, transformer_struct, Consumer};
use crate::error::{Error, Result};

transformer_struct!(
    /// Replaces NaN and infinities with the strings `"NaN"`, `"Infinity"` and
    /// `"-Infinity"`.
    NonFiniteToString
);

transformer_struct!(
    /// Replaces NaN and infinities with `null`.
    NonFiniteToNull
);

transformer_struct!(
    /// Rejects NaN and infinities with [`Error::NonFinite`].
    NonFiniteToException
);

fn non_finite_name(v: f64) -> &'static str {
    if v.is_nan() {
        "NaN"
    } else if v.is_sign_negative() {
        "-Infinity"
    } else {
        "Infinity"
    }
}

impl<C: Consumer> Consumer for NonFiniteToString<C> {
    fn number_f64(&mut self, v: f64) -> Result<()> {
        if v.is_finite() {
            self.inner.number_f64(v)
        } else {
            self.inner.string(non_finite_name(v))
        }
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, string, string_bytes, binary,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

impl<C: Consumer> Consumer for NonFiniteToNull<C> {
    fn number_f64(&mut self, v: f64) -> Result<()> {
        if v.is_finite() {
            self.inner.number_f64(v)
        } else {
            self.inner.null()
        }
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, string, string_bytes, binary,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

impl<C: Consumer> Consumer for NonFiniteToException<C> {
    fn number_f64(&mut self, v: f64) -> Result<()> {
        if v.is_finite() {
            self.inner.number_f64(v)
        } else {
            Err(Error::NonFinite(v))
        }
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, string, string_bytes, binary,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Dump;

    #[test]
    fn to_string_names_each_case() {
        let mut t = NonFiniteToString::new(Dump::new());
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.5] {
            t.number_f64(v).unwrap();
        }
        assert_eq!(
            t.inner().as_str(),
            "string \"NaN\"\nstring \"Infinity\"\nstring \"-Infinity\"\ndouble 1.5\n"
        );
    }

    #[test]
    fn to_null_and_to_exception() {
        let mut t = NonFiniteToNull::new(Dump::new());
        t.number_f64(f64::NAN).unwrap();
        t.number_f64(-0.0).unwrap();
        assert_eq!(t.into_inner().as_str(), "null\ndouble -0.0\n");

        let mut t = NonFiniteToException::new(Dump::new());
        assert!(matches!(
            t.number_f64(f64::INFINITY),
            Err(Error::NonFinite(v)) if v == f64::INFINITY
        ));
        t.number_f64(2.0).unwrap();
        assert_eq!(t.inner().as_str(), "double 2.0\n");
    }
}
