// Core modules implementing wire primitives, column codecs, and error modeling.
pub mod buffer;
pub mod column;
pub mod error;
pub mod feature;
pub mod progress;
pub mod reader;
