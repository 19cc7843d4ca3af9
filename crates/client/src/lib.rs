//! Client side of the Living Heritage site.
//!
//! [`api::ContentApi`] talks to the Content API. The [`admin`] module holds
//! the admin panel controllers and [`loader`] the public page loaders that
//! patch static pages with published records.

pub mod admin;
pub mod api;
pub mod error;
pub mod loader;
