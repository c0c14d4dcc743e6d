use super::{forward_to_inner, transformer_struct, Consumer};
use crate::error::Result;

transformer_struct!(
    /// Emits unsigned numbers that fit in `i64` as signed.
    PreferSigned
);

transformer_struct!(
    /// Emits non-negative signed numbers as unsigned.
    PreferUnsigned
);

impl<C: Consumer> Consumer for PreferSigned<C> {
    fn number_u64(&mut self, v: u64) -> Result<()> {
        match i64::try_from(v) {
            Ok(i) => self.inner.number_i64(i),
            Err(_) => self.inner.number_u64(v),
        }
    }

    forward_to_inner!(
        null, boolean, number_i64, number_f64, string, string_bytes, binary,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

impl<C: Consumer> Consumer for PreferUnsigned<C> {
    fn number_i64(&mut self, v: i64) -> Result<()> {
        match u64::try_from(v) {
            Ok(u) => self.inner.number_u64(u),
            Err(_) => self.inner.number_i64(v),
        }
    }

    forward_to_inner!(
        null, boolean, number_u64, number_f64, string, string_bytes, binary,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Dump;

    #[test]
    fn prefer_signed() {
        let mut t = PreferSigned::new(Dump::new());
        t.number_u64(5).unwrap();
        t.number_u64(i64::MAX as u64).unwrap();
        t.number_u64(i64::MAX as u64 + 1).unwrap();
        assert_eq!(
            t.inner().as_str(),
            "signed 5\nsigned 9223372036854775807\nunsigned 9223372036854775808\n"
        );
    }

    #[test]
    fn prefer_unsigned() {
        let mut t = PreferUnsigned::new(Dump::new());
        t.number_i64(0).unwrap();
        t.number_i64(-1).unwrap();
        assert_eq!(t.inner().as_str(), "unsigned 0\nsigned -1\n");
    }
}
