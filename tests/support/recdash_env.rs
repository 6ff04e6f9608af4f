use std::{
    ffi::OsString,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the process-wide env lock and restores every variable it set.
pub struct RecdashEnvGuard {
    previous: Vec<(&'static str, Option<OsString>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl RecdashEnvGuard {
    pub fn new() -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        Self {
            previous: Vec::new(),
            _lock: lock,
        }
    }

    pub fn set(mut self, key: &'static str, value: impl Into<OsString>) -> Self {
        self.previous.push((key, std::env::var_os(key)));
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(key, value.into());
        }
        self
    }

    pub fn unset(mut self, key: &'static str) -> Self {
        self.previous.push((key, std::env::var_os(key)));
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::remove_var(key);
        }
        self
    }
}

impl Drop for RecdashEnvGuard {
    fn drop(&mut self) {
        while let Some((key, value)) = self.previous.pop() {
            match value {
                // SAFETY: tests run under a global lock to prevent concurrent env mutations.
                Some(value) => unsafe { std::env::set_var(key, value) },
                // SAFETY: tests run under a global lock to prevent concurrent env mutations.
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
