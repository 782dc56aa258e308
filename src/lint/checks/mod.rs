//! Individual check families

pub mod flow;
pub mod references;
pub mod syntax;
