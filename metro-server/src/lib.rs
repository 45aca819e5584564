//! Metro route planner server.
//!
//! Loads a transit network once, makes it connected, and answers: "what
//! is the fastest way from this station to that one, and which trains do
//! I take?"

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod spanning;
pub mod web;
