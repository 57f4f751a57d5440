//! # foodboard
//!
//! A terminal dashboard for a food menu kept behind a REST backend.
//!
//! ## Architecture
//!
//! ```text
//! Remote store (REST) ⇄ FoodApi → Dashboard (state + reducer) → TUI / CLI
//! ```
//!
//! The dashboard fetches the whole collection once at start. After that every
//! add, update and delete is user-triggered, goes through the [`api`] client
//! and only changes the local collection when the remote store succeeds.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the dashboard against a local backend
//! foodboard --api-url http://localhost:3333
//!
//! # Scripted use
//! foodboard list
//! foodboard add --name Pizza --price 20 --image https://example.com/pizza.png
//! foodboard update 1 --price 25
//! foodboard delete 1
//! ```

/// Application context and error types.
///
/// The [`AppContext`](app::AppContext) wires the configured API client to
/// the configuration.
pub mod app;

/// Remote store client.
///
/// - [`FoodApi`](api::FoodApi): async trait over the `/foods` resource
/// - [`HttpFoodApi`](api::http::HttpFoodApi): reqwest-based implementation
pub mod api;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/foodboard/config.toml`.
pub mod config;

/// The list state controller.
///
/// - [`DashboardState`](dashboard::DashboardState): collection, modal and
///   in-flight requests, changed only through [`Transition`](dashboard::Transition)s
/// - [`DashboardController`](dashboard::DashboardController): drives the
///   state against a [`FoodApi`](api::FoodApi)
pub mod dashboard;

/// Core domain models: [`Food`](domain::Food), [`NewFood`](domain::NewFood)
/// and [`FoodPatch`](domain::FoodPatch).
pub mod domain;

/// Terminal user interface.
///
/// Food list on top, details of the selected food below and a status bar.
/// `a` opens the add modal, `e`/Enter the edit modal, `d` deletes after
/// confirmation, `t` flips availability, `R` reloads, `q` quits.
pub mod tui;
