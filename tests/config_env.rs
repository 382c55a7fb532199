//! Configuration environment tests.
//!
//! Kept in their own binary so the process environment is not shared with
//! other tests, and serialized on a lock because the test harness still
//! runs the functions here on parallel threads.

use helloserv::config::Config;
use std::sync::Mutex;

/// Guards the process environment; every test in this file mutates it.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn plain_port_variable_overrides_default() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

    std::env::set_var("PORT", "8123");
    let cfg = Config::load_from("tests-nonexistent-config").unwrap();
    std::env::remove_var("PORT");

    assert_eq!(cfg.server.port, 8123);
}

#[test]
fn prefixed_variables_override_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

    std::env::set_var("HELLOSERV_SERVER__HOST", "127.0.0.1");
    std::env::set_var("HELLOSERV_ROUTES__GREETING", "hello from env");
    let cfg = Config::load_from("tests-nonexistent-config").unwrap();
    std::env::remove_var("HELLOSERV_SERVER__HOST");
    std::env::remove_var("HELLOSERV_ROUTES__GREETING");

    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.routes.greeting, "hello from env");
}
