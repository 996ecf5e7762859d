//! Purpose: Binary codec layer for a columnar database's native wire protocol.
//! Exports: `core` (buffer, reader, column codecs, feature gates, packets, errors).
//! Role: Library boundary consumed by a transport/session layer; knows nothing about sockets.
//! Invariants: Every decode path is bounds-checked and never coerces invalid bytes.
//! Invariants: Versioned decoders take the negotiated protocol version as an explicit input.
pub mod core;
