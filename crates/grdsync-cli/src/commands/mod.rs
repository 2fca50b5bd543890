pub mod drift;
pub mod greaselion;
pub mod map;
pub mod parts;
pub mod paths;
pub mod schema;
pub mod sync;
