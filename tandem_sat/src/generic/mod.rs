//! Generic structures with no dependence on the rest of the library.

pub mod index_heap;
pub mod luby;
pub mod pcg;
