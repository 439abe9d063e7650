//! Unit and pipeline tests for the CLI.
