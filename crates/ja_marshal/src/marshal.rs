use alloc::string::String;
use alloc::vec::Vec;
use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Included, ManyPayload, MarshalError, Marshaler, Meta, OnePayload, Resource, Result};
use crate::{Node, encode_meta};

// -----------------------------------------------------------------------------
// Payloads

/// Marshals one resource, sideloading related resources into `included`.
///
/// ```
/// use ja_marshal::Resource;
///
/// #[derive(Resource)]
/// struct Animal {
///     #[jsonapi("primary,animals")]
///     id: String,
///     #[jsonapi("attr,name")]
///     name: String,
/// }
///
/// #[derive(Resource)]
/// struct Person {
///     #[jsonapi("primary,people")]
///     id: String,
///     #[jsonapi("relation,pet")]
///     pet: Option<Animal>,
/// }
///
/// let alice = Person {
///     id: "42".into(),
///     pet: Some(Animal { id: "7".into(), name: "Rex".into() }),
/// };
///
/// let payload = ja_marshal::marshal_one(&alice).unwrap();
/// assert_eq!(
///     serde_json::to_value(&payload).unwrap(),
///     serde_json::json!({
///         "data": {
///             "type": "people",
///             "id": "42",
///             "relationships": { "pet": { "data": { "type": "animals", "id": "7" } } },
///         },
///         "included": [{ "type": "animals", "id": "7", "attributes": { "name": "Rex" } }],
///     })
/// );
/// ```
pub fn marshal_one<R: Resource + ?Sized>(model: &R) -> Result<OnePayload> {
    let mut included = Included::new();
    let data = Marshaler::new().node(model, &mut included)?;
    log::debug!("marshaled {}:{} with {} included", data.resource_type, data.id, included.len());
    Ok(OnePayload::assemble(data, included, None))
}

/// Marshals one resource with shallow linkage and no `included` section.
pub fn marshal_one_without_included<R: Resource + ?Sized>(model: &R) -> Result<OnePayload> {
    let data = Marshaler::new().node(model, &mut Included::new())?;
    log::debug!("marshaled {}:{} without included", data.resource_type, data.id);
    Ok(OnePayload::new(data))
}

/// Marshals one resource with related resources nested in its linkage.
pub fn marshal_one_embedded<R: Resource + ?Sized>(model: &R) -> Result<OnePayload> {
    let data = Marshaler::embedded().node(model, &mut Included::new())?;
    log::debug!("marshaled {}:{} embedded", data.resource_type, data.id);
    Ok(OnePayload::new(data))
}

/// Marshals a list of resources sharing one `included` section.
///
/// An empty slice yields `{"data":[]}`.
pub fn marshal_many<R: Resource>(models: &[R]) -> Result<ManyPayload> {
    many(models, None)
}

/// Like [`marshal_many`], adding a top-level `meta` member.
pub fn marshal_many_with_meta<R: Resource, M: Meta + ?Sized>(
    models: &[R],
    meta: &M,
) -> Result<ManyPayload> {
    many(models, Some(encode_meta(meta)?))
}

/// Marshals type-erased resources.
///
/// The roots must all have the same resource type, otherwise this fails with
/// [`MarshalError::ExpectedSequence`].
pub fn marshal_many_dyn(models: &[&dyn Resource]) -> Result<ManyPayload> {
    let payload = many(models, None)?;
    expect_homogeneous(&payload.data)?;
    Ok(payload)
}

fn many<R: Resource>(models: &[R], meta: Option<Map<String, Value>>) -> Result<ManyPayload> {
    let mut included = Included::new();
    let data = Marshaler::new().nodes(models, &mut included)?;
    log::debug!("marshaled {} resources with {} included", data.len(), included.len());
    Ok(ManyPayload::assemble(data, included, meta))
}

fn expect_homogeneous(roots: &[Node]) -> Result<()> {
    let Some((first, rest)) = roots.split_first() else {
        return Ok(());
    };
    match rest.iter().find(|node| node.resource_type != first.resource_type) {
        Some(other) => Err(MarshalError::ExpectedSequence {
            expected: first.resource_type.clone(),
            found: other.resource_type.clone(),
        }),
        None => Ok(()),
    }
}

// -----------------------------------------------------------------------------
// Writers

fn write_payload<W: Write, P: Serialize>(mut writer: W, payload: &P) -> Result<()> {
    serde_json::to_writer(&mut writer, payload)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Writes the document of [`marshal_one`] as a line of JSON.
pub fn write_one<W: Write, R: Resource + ?Sized>(writer: W, model: &R) -> Result<()> {
    write_payload(writer, &marshal_one(model)?)
}

/// Writes the document of [`marshal_one_without_included`] as a line of JSON.
pub fn write_one_without_included<W: Write, R: Resource + ?Sized>(
    writer: W,
    model: &R,
) -> Result<()> {
    write_payload(writer, &marshal_one_without_included(model)?)
}

/// Writes the document of [`marshal_one_embedded`] as a line of JSON.
pub fn write_one_embedded<W: Write, R: Resource + ?Sized>(writer: W, model: &R) -> Result<()> {
    write_payload(writer, &marshal_one_embedded(model)?)
}

/// Writes the document of [`marshal_many`] as a line of JSON.
pub fn write_many<W: Write, R: Resource>(writer: W, models: &[R]) -> Result<()> {
    write_payload(writer, &marshal_many(models)?)
}

/// Writes the document of [`marshal_many_with_meta`] as a line of JSON.
pub fn write_many_with_meta<W: Write, R: Resource, M: Meta + ?Sized>(
    writer: W,
    models: &[R],
    meta: &M,
) -> Result<()> {
    write_payload(writer, &marshal_many_with_meta(models, meta)?)
}
