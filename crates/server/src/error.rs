// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Startup errors for the server binary.

use campus_book_domain::DomainError;
use campus_book_persistence::PersistenceError;

/// Errors that stop the server before it starts serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A command-line option could not be turned into configuration.
    #[error("Invalid value for --{option}: {reason}")]
    InvalidConfig {
        /// The offending option, without dashes.
        option: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// The slot calendar could not be built from the configured hours.
    #[error("Invalid slot calendar: {0}")]
    Calendar(#[from] DomainError),
    /// The booking database could not be opened.
    #[error("Failed to open booking database: {0}")]
    Persistence(#[from] PersistenceError),
    /// The listen address could not be parsed.
    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
    /// Binding or serving failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
