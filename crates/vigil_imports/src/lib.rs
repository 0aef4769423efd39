//! Import bookkeeping for fixes that add or remove imports.
//!
//! A fix may ask for imports to be added or removed instead of spelling out
//! the edit. [`ImportStatements`] turns such a request into one concrete
//! replacement of the file's import block: it starts from the imports of a
//! [`CompilationUnit`], applies the additions and removals, and renders the
//! new block through an [`ImportOrganizer`].

#![warn(missing_docs)]

pub mod import_name;
pub mod organizer;
pub mod statements;
pub mod unit;

pub use import_name::ImportName;
pub use organizer::{
    AndroidOrganizer, BasicOrganizer, ImportOrganizer, OrganizedImports, OrganizerStrategy,
    StaticOrder,
};
pub use statements::ImportStatements;
pub use unit::{CompilationUnit, ImportDecl, PackageDecl};
