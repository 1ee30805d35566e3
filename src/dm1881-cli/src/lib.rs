//! dm1881 - command line client for the 1881 search API
//!
//! ```bash
//! DM1881_CLIENT_ID=... DM1881_USERNAME=... DM1881_SECRET=... dm1881 search "Ola Nordmann" --rows 5
//! dm1881 phone "+47 800 12 345"
//! dm1881 meta facet
//! ```

pub use dm1881_rs;

pub mod cli;
