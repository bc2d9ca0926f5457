//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types and functions for easy glob
//! importing:
//!
//! ```ignore
//! use chela::prelude::*;
//! ```

pub use crate::{
    ContentType, Cookie, Error, HttpClient, Method, Request, Requester, ReqwestClient, Response,
    Result, delete, from_json, get, post, put, to_json,
};
