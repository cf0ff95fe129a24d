//! Interface model extraction.
//!
//! The pipeline runs leaf-first and never calls backwards:
//!
//! 1. [`descriptor`] decomposes one resolved type into a [`TypeDescriptor`]
//! 2. [`signature`] names and describes a parameter or result tuple
//! 3. [`extractor`] walks the methods of a resolved interface
//! 4. [`fixup`] aliases qualified types and collects the interface imports
//! 5. [`assemble`] combines everything with the wrapper naming
//!
//! ```rust,ignore
//! use middleware_gen::extraction::build_interface;
//!
//! let model = build_interface(&db, &options)?;
//! for method in &model.methods {
//!     println!("{} takes {} params", method.name, method.params.len());
//! }
//! ```
//!
//! [`TypeDescriptor`]: crate::core::model::TypeDescriptor

pub mod assemble;
pub mod descriptor;
pub mod extractor;
pub mod fixup;
pub mod signature;

pub use assemble::{assemble_model, build_interface};
pub use descriptor::describe_type;
pub use extractor::{extract_interface, ExtractedInterface};
pub use fixup::{fixup_methods, FixupOutput, ReferenceAccumulator};
pub use signature::build_parameters;
