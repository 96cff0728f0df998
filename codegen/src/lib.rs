//! ptrans-codegen
//!
//! This crate implements:
//!  1) A reader for the `packets.proto` schema (ordered packet enumeration
//!     plus validation against the `message` declarations),
//!  2) Two dispatch-code generators (Java and C++) that turn the ordered
//!     packet list into wrap/unwrap method bodies,
//!  3) A splicer that replaces exactly those two method bodies inside a
//!     hand-written source file, leaving everything else untouched,
//!  4) The whitespace-insensitive regeneration decision and the
//!     backup-then-overwrite file pipeline,
//!  5) Error types (`PtransError`).

pub mod convert;
pub mod error;
pub mod gen_cpp;
pub mod gen_java;
pub mod generator;
pub mod pipeline;
pub mod schema;
pub mod splicer;
pub mod utils;

pub use error::PtransError;
pub use gen_cpp::CppGenerator;
pub use gen_java::JavaGenerator;
pub use generator::CodeGenerator;
pub use pipeline::{regenerate_file, Outcome};
pub use schema::{parse_proto_schema, ProtoSchema};
pub use splicer::{splice_generated, SourceSets};
