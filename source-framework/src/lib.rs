//! Source Framework
//!
//! Shared components for consuming sequential input: ordinal positions,
//! last-element tagging, and the `Source` capability that unifies pull
//! (fully available) and push (incrementally delivered) sequences.

pub mod element;
pub mod position;
pub mod pull;
pub mod push;
pub mod source;

pub use element::Tagged;
pub use position::Position;
pub use pull::PullSource;
pub use push::PushSource;
pub use source::{Read, Source, SourceError};
