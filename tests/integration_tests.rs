//! Integration tests for zwotag

mod integration;
