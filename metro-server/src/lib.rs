//! Metro route planner server.
//!
//! Answers: "what is the best way from this station to that one, where do
//! I change line, and what will it cost?"

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
