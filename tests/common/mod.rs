//! Common test utilities and helper modules
//!
//! Published reference positions and small constructors shared by the
//! integration tests.
