#![deny(unsafe_code)]

pub mod codebook;
pub mod index;

pub use codebook::{Ancestor, CodeBook, CodeBookStats, SharedCodeBook};
pub use index::{BuildReport, CodeIndex, HierarchyIndex, IndexBuilder, build};
