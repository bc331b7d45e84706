pub mod document;
pub mod edit;
pub mod ident;
