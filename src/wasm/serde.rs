// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::ser::Serialize;
use serde_wasm_bindgen::{Error, Serializer};
use wasm_bindgen::JsValue;

/// Serialize any struct into plain JavaScript objects.
///
/// Maps are serialized as objects instead of `Map` instances so the form layer can read the
/// result with property access.
pub fn serialize_to_js<T>(value: &T) -> Result<JsValue, Error>
where
    T: Serialize + ?Sized,
{
    let serializer = Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer)
}
