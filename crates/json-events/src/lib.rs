//! Push-style JSON events with binary codecs.
//!
//! Every producer (a parser or [`events::from_value`]) drives a
//! [`Consumer`] with one call per token. Consumers either build something
//! ([`events::ToValue`], the per-format `ToStream` emitters) or transform the
//! calls and forward them ([`events::Pipeline`] layers). Codecs:
//!
//! - [`cbor`]: RFC 8949, including indefinite-length items.
//! - [`msgpack`]: MessagePack without extension types.
//! - [`ubjson`]: UBJSON with optimized containers.
//!
//! JSON text output lives in [`events::to_string`] and
//! [`events::to_pretty_string`].
//!
//! ```
//! use json_events::events::{Layer, Pipeline};
//! use json_events::{cbor, msgpack, Value};
//!
//! let v = Value::from(vec![Value::from(1u8), Value::from("two")]);
//! let bytes = cbor::to_vec(&v).unwrap();
//! let pipeline = Pipeline::new().with(Layer::LimitNestingDepth(8));
//! let back = cbor::from_slice_with(&bytes, &pipeline).unwrap();
//! assert_eq!(back, v);
//! assert_eq!(msgpack::from_slice(&msgpack::to_vec(&back).unwrap()).unwrap(), v);
//! ```

pub mod cbor;
mod driver;
pub mod error;
pub mod events;
pub mod msgpack;
pub mod ubjson;
pub mod value;

pub use error::{Error, Result};
pub use events::Consumer;
pub use value::Value;
