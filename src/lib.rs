//! A blocking client for a banking ledger REST API.
//!
//! List endpoints return a [`Page`], which can fetch the page after it or be
//! turned into an [`AutoPager`] that walks every remaining page.

mod nullable;
pub use nullable::Nullable;

mod error;
pub use error::{ApiError, ApiErrorBody, Error, Result};

pub mod json;
pub mod query;

pub mod options;
pub use options::{ClientOptions, Environment};

pub mod http;

mod client;
pub use client::Client;

pub mod pagination;
pub use pagination::{AutoPager, ListResponse, Page};

pub mod resources;

mod args;
pub use args::{Action, Args, Resource};

mod config;
pub use config::{Appearance, Auth, ClientSection, Config};

mod render;
pub use render::{
    format_amount, Color, ColorStyle, Entries, Entry, Render, Style, Summarize, Theme,
};

mod util;

#[cfg(test)]
mod testing;
