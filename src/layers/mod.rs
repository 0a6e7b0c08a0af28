pub mod annotation;
pub mod marker;
pub mod reconciler;
