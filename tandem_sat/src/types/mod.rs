//! Types shared across the library, at present only [errors](err).

pub mod err;
