//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services: JSON
//! (de)serialization, query parsing, and translation of domain errors into
//! status codes.
//!
//! ## Supported Operations
//!
//! - **GET/POST /api/activities**, **GET/PUT/DELETE /api/activities/:id**
//! - **GET /api/daily-log**: One day's activities with wake windows and totals
//! - **GET /api/pattern**: Multi-day timeline with midnight-split night sleep
//! - **POST /api/logs**: Frontend log forwarding

pub mod rest;
