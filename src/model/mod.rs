pub mod ids;
pub mod location;
pub mod value;

pub use ids::*;
pub use location::*;
pub use value::*;
