use super::{forward_to_inner, Consumer};
use crate::error::{Error, Result};

/// Fails as soon as containers nest deeper than `limit`.
///
/// A limit of 0 rejects every array and object; a limit of 1 allows a
/// top-level container of scalars.
#[derive(Debug, Clone)]
pub struct LimitNestingDepth<C> {
    inner: C,
    limit: usize,
    depth: usize,
}

impl<C> LimitNestingDepth<C> {
    pub fn new(inner: C, limit: usize) -> Self {
        Self {
            inner,
            limit,
            depth: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.limit {
            return Err(Error::NestingDepthExceeded(self.limit));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl<C: Consumer> Consumer for LimitNestingDepth<C> {
    fn begin_array(&mut self, size: Option<usize>) -> Result<()> {
        self.enter()?;
        self.inner.begin_array(size)
    }

    fn end_array(&mut self, size: Option<usize>) -> Result<()> {
        self.inner.end_array(size)?;
        self.leave();
        Ok(())
    }

    fn begin_object(&mut self, size: Option<usize>) -> Result<()> {
        self.enter()?;
        self.inner.begin_object(size)
    }

    fn end_object(&mut self, size: Option<usize>) -> Result<()> {
        self.inner.end_object(size)?;
        self.leave();
        Ok(())
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, string_bytes,
        binary, element, key, member,
    );
}

/// Fails as soon as more than `limit` array elements and object members
/// have been seen in total.
#[derive(Debug, Clone)]
pub struct LimitValueCount<C> {
    inner: C,
    limit: usize,
    count: usize,
}

impl<C> LimitValueCount<C> {
    pub fn new(inner: C, limit: usize) -> Self {
        Self {
            inner,
            limit,
            count: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn bump(&mut self) -> Result<()> {
        if self.count >= self.limit {
            return Err(Error::ValueCountExceeded(self.limit));
        }
        self.count += 1;
        Ok(())
    }
}

impl<C: Consumer> Consumer for LimitValueCount<C> {
    fn element(&mut self) -> Result<()> {
        self.bump()?;
        self.inner.element()
    }

    fn member(&mut self) -> Result<()> {
        self.bump()?;
        self.inner.member()
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, string_bytes,
        binary, begin_array, end_array, begin_object, key, end_object,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Discard;

    #[test]
    fn depth_is_checked_on_the_way_in() {
        let mut t = LimitNestingDepth::new(Discard, 2);
        t.begin_array(None).unwrap();
        t.begin_object(None).unwrap();
        assert!(matches!(
            t.begin_array(None),
            Err(Error::NestingDepthExceeded(2))
        ));
        assert_eq!(t.depth(), 2);
        t.end_object(None).unwrap();
        t.begin_array(None).unwrap();
        assert_eq!(t.depth(), 2);
    }

    #[test]
    fn zero_depth_allows_scalars_only() {
        let mut t = LimitNestingDepth::new(Discard, 0);
        t.null().unwrap();
        assert!(t.begin_object(Some(0)).is_err());
    }

    #[test]
    fn value_count_counts_elements_and_members() {
        let mut t = LimitValueCount::new(Discard, 2);
        t.begin_array(None).unwrap();
        t.null().unwrap();
        t.element().unwrap();
        t.begin_object(None).unwrap();
        t.key("k").unwrap();
        t.null().unwrap();
        t.member().unwrap();
        assert_eq!(t.count(), 2);
        t.end_object(None).unwrap();
        assert!(matches!(t.element(), Err(Error::ValueCountExceeded(2))));
    }
}
