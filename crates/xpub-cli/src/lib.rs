//! CLI library components for the XML export publisher.

pub mod logging;
