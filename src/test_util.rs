//! Test-only helpers for isolating process-global state (currently just
//! environment variables) across tests that would otherwise race each other.

use std::env;

/// Set an environment variable for the duration of a `rusty_fork_test!` case.
///
/// `rusty_fork` runs the annotated test in its own forked process, so mutating
/// process environment here never leaks into other tests in the same binary.
#[cfg(test)]
pub fn single_threaded_set_env_var(name: &str, value: &str) {
    env::set_var(name, value);
}

#[cfg(test)]
pub fn single_threaded_remove_env_var(name: &str) {
    env::remove_var(name);
}
