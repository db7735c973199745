//! Element stage, selectors and the JSON choreography document.

pub mod choreography;
pub(crate) mod document;
pub mod selector;
pub mod stage;
