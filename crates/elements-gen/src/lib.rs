//! TypeScript module generation using OXC AST builders
//!
//! This crate builds the generated half of the elements registration module:
//! object and array literals, `export const` bindings and named imports are
//! assembled with [`JsBuilder`] and printed through `oxc_codegen`. With the
//! `parser` feature it also reads existing modules so their import table can
//! be extended in place.
//!
//! # Examples
//!
//! ```rust
//! use elements_gen::{Allocator, JsBuilder};
//! use oxc_ast::ast::Statement;
//!
//! let allocator = Allocator::default();
//! let js = JsBuilder::new(&allocator);
//!
//! // export const registerConfig = [{ component: IgxGridComponent }];
//! let entry = js.object(vec![js.prop("component", js.ident("IgxGridComponent"))]);
//! let table = js.export_const("registerConfig", js.array(vec![entry]));
//!
//! let code = js.program(vec![Statement::from(table)])?;
//! assert!(code.contains("export const registerConfig"));
//! # Ok::<(), elements_gen::GenError>(())
//! ```

mod error;
mod format;
mod js_builder;
mod program_builder;

#[cfg(feature = "parser")]
mod parser;

pub use error::{GenError, Result};
pub use format::{FormatOptions, QuoteStyle};
pub use js_builder::{JsBuilder, validate_identifier};
pub use program_builder::ProgramBuilder;

#[cfg(feature = "parser")]
pub use parser::{ImportInfo, ParseDiagnostic, ParseOptions, ParsedProgram, parse};

// Re-export commonly used OXC types for convenience
pub use oxc_allocator::Allocator;
pub use oxc_span::Atom;
