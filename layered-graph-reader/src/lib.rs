//! Annotation records consumed by `layered-graph`.
//!
//! An annotation document (KAF or NAF) is reduced to plain record sets:
//! words, terms, entities, coreference chains, dependencies and
//! constituency trees. This crate defines those records, the
//! [`AnnotationReader`] trait the graph builder reads through, and the
//! [`Dialect`] capability object that carries the identifier conventions of
//! each schema.
//!
//! ## Modules
//!
//! - [`records`] - Record types
//! - [`reader`] - The reader trait and the in-memory [`RecordSet`]
//! - [`dialect`] - KAF / NAF identifier conventions
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```
//! use layered_graph_reader::{AnnotationReader, Dialect, RecordSet};
//!
//! let records = RecordSet::from_ron_str(
//!     r#"(
//!         words: [(id: "w1", text: "Hello", offset: 0, length: 5)],
//!         terms: [(id: "t1", morphofeat: "UH", words: ["w1"])],
//!     )"#,
//! )
//! .unwrap();
//! assert_eq!(records.terms().len(), 1);
//! assert_eq!("naf".parse::<Dialect>().unwrap(), Dialect::Naf);
//! ```

pub mod dialect;
pub mod errors;
pub mod reader;
pub mod records;

pub use dialect::Dialect;
pub use errors::{ReaderError, ReaderResult};
pub use reader::{AnnotationReader, RecordSet};
pub use records::{
    ConstituencyTree, CorefChainRecord, DependencyRecord, EntityRecord, NonTerminalRecord,
    TermRecord, TerminalRecord, TreeEdgeRecord, WordRecord,
};
