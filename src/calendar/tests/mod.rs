//! Unit tests for calendar events, the upcoming filter and the store adapter.
