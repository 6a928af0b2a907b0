//! ANP Dashboard - protected natural areas of Peru by department
//!
//! Loads the national ANP register, aggregates it into a handful of
//! departmental reports and shows each one as a table and a bar chart.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod reports;
