//! Narcissus - bulk reflected-origin CORS scanner
//!
//! Probes every hostname in the configured site lists over both http and
//! https with a forged `Origin` header, and reports hosts whose response
//! both reflects the forged origin and allows credentials for it. One
//! JSON record per host is written to the result sink as it becomes
//! available.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod report;
pub mod scanner;
pub mod source;
