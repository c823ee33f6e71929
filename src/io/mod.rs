//! Reading and writing scenes on disk.

pub mod vox;

pub use vox::{decode, encode, load, save, DecodeIssue, DecodeReport, Problem, Record};
