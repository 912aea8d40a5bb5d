pub mod annotations;
pub mod type_registry;
