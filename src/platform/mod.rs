//! GogoCDN protocol: HTTP client, cipher, handshake, payload and manifest handling

pub mod client;
pub mod crypto;
pub mod extractor;
pub mod handshake;
pub mod manifest;
pub mod normalize;
pub mod payload;
pub mod server;

pub use client::*;
pub use crypto::*;
pub use extractor::*;
pub use handshake::*;
pub use manifest::*;
pub use normalize::*;
pub use payload::*;
pub use server::*;
