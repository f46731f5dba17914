//! Supporting modules for the tudo application.

pub mod data_storage;
pub mod view;
