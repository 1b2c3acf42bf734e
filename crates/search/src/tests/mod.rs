//! Pipeline-level tests against a scripted gateway.
