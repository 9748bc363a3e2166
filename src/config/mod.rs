pub mod factcheck;
pub mod reference;

pub use factcheck::FactCheckConfig;
pub use reference::ReferenceLists;
