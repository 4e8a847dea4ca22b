//! Unit tests for the client state, board, coordinator, session and export.

mod support;
