//! Runtime composition of transformers in front of a sink.

use std::fmt;

use super::{
    BinaryToBase64, BinaryToBase64Url, BinaryToException, BinaryToHex, Consumer,
    InvalidStringToBinary, InvalidStringToException, InvalidStringToHex,
    KeyCamelCaseToSnakeCase, KeySnakeCaseToCamelCase, LimitNestingDepth, LimitValueCount,
    NonFiniteToException, NonFiniteToNull, NonFiniteToString, PreferSigned, PreferUnsigned,
    Utf8Mode, ValidateEventOrder,
};

/// A user-supplied layer: wraps a consumer chain in one more transformer.
pub trait Wrap {
    fn wrap<'c>(&self, inner: Box<dyn Consumer + 'c>) -> Box<dyn Consumer + 'c>;
}

impl<F> Wrap for F
where
    F: for<'c> Fn(Box<dyn Consumer + 'c>) -> Box<dyn Consumer + 'c>,
{
    fn wrap<'c>(&self, inner: Box<dyn Consumer + 'c>) -> Box<dyn Consumer + 'c> {
        self(inner)
    }
}

/// One transformer selection in a [`Pipeline`].
pub enum Layer {
    NonFiniteToString,
    NonFiniteToNull,
    NonFiniteToException,
    PreferSigned,
    PreferUnsigned,
    KeyCamelCaseToSnakeCase,
    KeySnakeCaseToCamelCase,
    LimitNestingDepth(usize),
    LimitValueCount(usize),
    ValidateEventOrder,
    InvalidStringToException,
    InvalidStringToHex,
    InvalidStringToBinary,
    BinaryToBase64,
    BinaryToBase64Url,
    BinaryToHex,
    BinaryToException,
    Custom(Box<dyn Wrap>),
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::NonFiniteToString => f.write_str("NonFiniteToString"),
            Layer::NonFiniteToNull => f.write_str("NonFiniteToNull"),
            Layer::NonFiniteToException => f.write_str("NonFiniteToException"),
            Layer::PreferSigned => f.write_str("PreferSigned"),
            Layer::PreferUnsigned => f.write_str("PreferUnsigned"),
            Layer::KeyCamelCaseToSnakeCase => f.write_str("KeyCamelCaseToSnakeCase"),
            Layer::KeySnakeCaseToCamelCase => f.write_str("KeySnakeCaseToCamelCase"),
            Layer::LimitNestingDepth(n) => f.debug_tuple("LimitNestingDepth").field(n).finish(),
            Layer::LimitValueCount(n) => f.debug_tuple("LimitValueCount").field(n).finish(),
            Layer::ValidateEventOrder => f.write_str("ValidateEventOrder"),
            Layer::InvalidStringToException => f.write_str("InvalidStringToException"),
            Layer::InvalidStringToHex => f.write_str("InvalidStringToHex"),
            Layer::InvalidStringToBinary => f.write_str("InvalidStringToBinary"),
            Layer::BinaryToBase64 => f.write_str("BinaryToBase64"),
            Layer::BinaryToBase64Url => f.write_str("BinaryToBase64Url"),
            Layer::BinaryToHex => f.write_str("BinaryToHex"),
            Layer::BinaryToException => f.write_str("BinaryToException"),
            Layer::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Wrap for Layer {
    fn wrap<'c>(&self, inner: Box<dyn Consumer + 'c>) -> Box<dyn Consumer + 'c> {
        match self {
            Layer::NonFiniteToString => Box::new(NonFiniteToString::new(inner)),
            Layer::NonFiniteToNull => Box::new(NonFiniteToNull::new(inner)),
            Layer::NonFiniteToException => Box::new(NonFiniteToException::new(inner)),
            Layer::PreferSigned => Box::new(PreferSigned::new(inner)),
            Layer::PreferUnsigned => Box::new(PreferUnsigned::new(inner)),
            Layer::KeyCamelCaseToSnakeCase => Box::new(KeyCamelCaseToSnakeCase::new(inner)),
            Layer::KeySnakeCaseToCamelCase => Box::new(KeySnakeCaseToCamelCase::new(inner)),
            Layer::LimitNestingDepth(n) => Box::new(LimitNestingDepth::new(inner, *n)),
            Layer::LimitValueCount(n) => Box::new(LimitValueCount::new(inner, *n)),
            Layer::ValidateEventOrder => Box::new(ValidateEventOrder::new(inner)),
            Layer::InvalidStringToException => Box::new(InvalidStringToException::new(inner)),
            Layer::InvalidStringToHex => Box::new(InvalidStringToHex::new(inner)),
            Layer::InvalidStringToBinary => Box::new(InvalidStringToBinary::new(inner)),
            Layer::BinaryToBase64 => Box::new(BinaryToBase64::new(inner)),
            Layer::BinaryToBase64Url => Box::new(BinaryToBase64Url::new(inner)),
            Layer::BinaryToHex => Box::new(BinaryToHex::new(inner)),
            Layer::BinaryToException => Box::new(BinaryToException::new(inner)),
            Layer::Custom(w) => w.wrap(inner),
        }
    }
}

/// Ordered list of transformers placed between a producer and a sink.
///
/// The first layer added sees events first:
/// `Pipeline::new().with(a).with(b).build(sink)` feeds `a`, which feeds `b`,
/// which feeds `sink`.
///
/// ```
/// use json_events::events::{Consumer, Dump, Layer, Pipeline};
///
/// let pipeline = Pipeline::new()
///     .with(Layer::NonFiniteToNull)
///     .with(Layer::PreferSigned);
/// let mut dump = Dump::new();
/// {
///     let mut chain = pipeline.build(&mut dump);
///     chain.number_f64(f64::NAN).unwrap();
///     chain.number_u64(3).unwrap();
/// }
/// assert_eq!(dump.as_str(), "null\nsigned 3\n");
/// ```
#[derive(Debug, Default)]
pub struct Pipeline {
    layers: Vec<Layer>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Appends a closure or other [`Wrap`] implementation.
    pub fn with_custom(self, wrap: impl Wrap + 'static) -> Self {
        self.with(Layer::Custom(Box::new(wrap)))
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// String handling for parsers feeding this pipeline: unvalidated
    /// when an `InvalidString*` layer is present to decide on bad bytes.
    pub fn utf8_mode(&self) -> Utf8Mode {
        let handles_invalid = self.layers.iter().any(|layer| {
            matches!(
                layer,
                Layer::InvalidStringToException
                    | Layer::InvalidStringToHex
                    | Layer::InvalidStringToBinary
            )
        });
        if handles_invalid {
            Utf8Mode::Trust
        } else {
            Utf8Mode::Check
        }
    }

    /// Wraps `sink` in every layer, last layer innermost.
    pub fn build<'c, C: Consumer + 'c>(&self, sink: C) -> Box<dyn Consumer + 'c> {
        self.layers
            .iter()
            .rev()
            .fold(Box::new(sink) as Box<dyn Consumer + 'c>, |inner, layer| {
                layer.wrap(inner)
            })
    }
}

impl FromIterator<Layer> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}
