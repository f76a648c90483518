pub mod buffer;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod fasta;
pub mod header;
pub mod label;
pub mod output;
pub mod pipeline;
pub mod source;
