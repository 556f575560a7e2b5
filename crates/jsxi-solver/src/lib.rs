//! Structural type solver for the JSX core.
//!
//! Types are interned into a [`TypeInterner`] and referred to by [`TypeId`].
//! The solver knows nothing about syntax: the checker builds types from
//! declarations and asks the solver to combine and relate them.
//!
//! - **Interning**: unions and intersections are normalized on construction
//! - **Spread**: `{ ...a, ...b }` at the type level
//! - **Relations**: structural, coinductive assignability
//! - **Instantiation/inference**: substitution of type parameters

mod format;
mod infer;
mod instantiate;
mod intern;
pub mod operations_property;
mod relations;
mod spread;
pub mod types;

pub use format::{SymbolNames, TypeFormatter};
pub use infer::infer_type_arguments;
pub use instantiate::{TypeSubstitution, instantiate_signature, instantiate_type};
pub use intern::TypeInterner;
pub use operations_property::{
    PropertyAccessResult, array_element_type, get_call_signatures, get_construct_signatures,
    get_index_type_of_type, get_properties_of_type, get_property_of_type, is_array_like,
    is_object_like, is_tuple_like, is_valid_spread_type, resolve_property_access,
};
pub use relations::{AssignabilityChecker, is_assignable_to};
pub use spread::get_spread_type;
pub use types::*;
