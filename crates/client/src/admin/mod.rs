//! Admin panel controllers.
//!
//! [`auth::login`] yields a session that opens a [`panel::AdminPanel`], which
//! hands out one [`panel::CollectionPanel`] per collection and language.
//! Panels keep the last fetched list, a bound form for create/edit, and a
//! queue of transient notifications.

pub mod auth;
pub mod form;
pub mod notify;
pub mod panel;
pub mod subform;
