// Core modules implementing the decode pipeline and error modeling.
pub mod alphabet;
pub mod decode;
pub mod deserialize;
pub mod error;
pub mod inflate;
pub mod value;
