pub mod form;
pub mod submit;

pub use form::{FormState, HouseFormInput};
