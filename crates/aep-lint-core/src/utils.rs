//! Shared primitives for rule implementations.

pub mod case;
pub mod methods;
pub mod pattern;
pub mod resource;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use case::{to_kebab_case, to_lower_camel_case, to_snake_case};
#[doc(inline)]
pub use methods::is_get_request_message;
#[doc(inline)]
pub use pattern::{desired_form, extract_variables, parse_segments, plain_form, Segment};
#[doc(inline)]
pub use resource::{
    get_resource, get_resource_definitions, is_resource_candidate, split_resource_type_name,
    ResourceAnnotation,
};
