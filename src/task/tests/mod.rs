//! Unit tests for the task domain, store adapter and link replacement.
