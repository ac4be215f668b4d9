// -----------------------------------------------------------------------------
// Modules

mod field_visits;
mod match_jsonapi;
mod trait_meta;
mod trait_resource;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_jsonapi::match_jsonapi_impls;

use field_visits::visit_fields;
use trait_meta::impl_trait_meta;
use trait_resource::impl_trait_resource;
