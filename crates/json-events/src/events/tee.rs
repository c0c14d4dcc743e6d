use super::Consumer;
use crate::error::Result;

/// A tuple of consumers that can be visited in order.
pub trait TeeTuple {
    fn for_each(&mut self, f: &mut dyn FnMut(&mut dyn Consumer) -> Result<()>) -> Result<()>;
}

impl TeeTuple for () {
    fn for_each(&mut self, _: &mut dyn FnMut(&mut dyn Consumer) -> Result<()>) -> Result<()> {
        Ok(())
    }
}

macro_rules! tee_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Consumer),+> TeeTuple for ($($name,)+) {
            fn for_each(
                &mut self,
                f: &mut dyn FnMut(&mut dyn Consumer) -> Result<()>,
            ) -> Result<()> {
                $(f(&mut self.$idx)?;)+
                Ok(())
            }
        }
    };
}

tee_tuple!(A.0);
tee_tuple!(A.0, B.1);
tee_tuple!(A.0, B.1, C.2);
tee_tuple!(A.0, B.1, C.2, D.3);
tee_tuple!(A.0, B.1, C.2, D.3, E.4);
tee_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);

/// Fan-out: forwards every event to each consumer of the tuple, in tuple
/// order. `Tee<()>` accepts everything, like [`super::Discard`].
///
/// The first error stops the fan-out and is returned unchanged.
///
/// ```
/// use json_events::events::{Consumer, Statistics, Tee, ToValue};
///
/// let mut tee = Tee::new((ToValue::new(), Statistics::new()));
/// tee.string("hi").unwrap();
/// let (to_value, stats) = tee.into_inner();
/// assert_eq!(stats.strings, 1);
/// assert_eq!(to_value.into_value().unwrap(), "hi");
/// ```
#[derive(Debug, Default, Clone)]
pub struct Tee<T>(pub T);

impl<T: TeeTuple> Tee<T> {
    pub fn new(consumers: T) -> Self {
        Tee(consumers)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: TeeTuple> Consumer for Tee<T> {
    fn null(&mut self) -> Result<()> {
        self.0.for_each(&mut |c| c.null())
    }
    fn boolean(&mut self, v: bool) -> Result<()> {
        self.0.for_each(&mut |c| c.boolean(v))
    }
    fn number_i64(&mut self, v: i64) -> Result<()> {
        self.0.for_each(&mut |c| c.number_i64(v))
    }
    fn number_u64(&mut self, v: u64) -> Result<()> {
        self.0.for_each(&mut |c| c.number_u64(v))
    }
    fn number_f64(&mut self, v: f64) -> Result<()> {
        self.0.for_each(&mut |c| c.number_f64(v))
    }
    fn string(&mut self, v: &str) -> Result<()> {
        self.0.for_each(&mut |c| c.string(v))
    }
    fn string_bytes(&mut self, v: &[u8]) -> Result<()> {
        self.0.for_each(&mut |c| c.string_bytes(v))
    }
    fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.0.for_each(&mut |c| c.binary(v))
    }
    fn begin_array(&mut self, size: Option<usize>) -> Result<()> {
        self.0.for_each(&mut |c| c.begin_array(size))
    }
    fn element(&mut self) -> Result<()> {
        self.0.for_each(&mut |c| c.element())
    }
    fn end_array(&mut self, size: Option<usize>) -> Result<()> {
        self.0.for_each(&mut |c| c.end_array(size))
    }
    fn begin_object(&mut self, size: Option<usize>) -> Result<()> {
        self.0.for_each(&mut |c| c.begin_object(size))
    }
    fn key(&mut self, v: &str) -> Result<()> {
        self.0.for_each(&mut |c| c.key(v))
    }
    fn member(&mut self) -> Result<()> {
        self.0.for_each(&mut |c| c.member())
    }
    fn end_object(&mut self, size: Option<usize>) -> Result<()> {
        self.0.for_each(&mut |c| c.end_object(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Discard, Dump};

    #[test]
    fn forwards_in_tuple_order() {
        let mut tee = Tee::new((Dump::new(), Dump::new()));
        tee.begin_object(Some(1)).unwrap();
        tee.key("a").unwrap();
        tee.boolean(true).unwrap();
        tee.member().unwrap();
        tee.end_object(Some(1)).unwrap();
        let (a, b) = tee.into_inner();
        assert_eq!(a.as_str(), b.as_str());
        assert_eq!(
            a.as_str(),
            "begin object 1\nkey \"a\"\nboolean true\nmember\nend object 1\n"
        );
    }

    #[test]
    fn empty_tee_discards() {
        let mut tee = Tee::new(());
        tee.null().unwrap();
        tee.binary(&[1, 2, 3]).unwrap();
        let mut nested = Tee::new((Discard, Tee::new(())));
        nested.number_f64(1.5).unwrap();
    }
}
