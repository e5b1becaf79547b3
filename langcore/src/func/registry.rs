//! The process-wide, name-indexed function/fact registry (spec §4.4
//! "Registries", §6 "Registry key"). Keys are `<module>.<name>`;
//! registration happens once at process initialisation and is read-only
//! thereafter (spec §5), so a `Mutex` is only ever contended during that
//! startup window.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use super::Node;

/// A node factory: called once per graph site that references the
/// function, producing a fresh, `New`-state [`Node`].
pub type Factory = Box<dyn Fn() -> Box<dyn Node + Send> + Send + Sync>;

#[derive(Default)]
pub struct Registry {
    entries: Mutex<HashMap<String, Factory>>,
}

impl Registry {
    /// Registers `factory` under `<module>.<name>`.
    ///
    /// # Panics
    /// Panics on duplicate registration (spec §4.4: "Duplicate
    /// registration is a programmer error (panic)").
    pub fn register(&self, module: &str, name: &str, factory: Factory) {
        let key = format!("{module}.{name}");
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        assert!(!entries.contains_key(&key), "duplicate function registration for {key:?}");
        log::debug!("registered function {key}");
        entries.insert(key, factory);
    }

    #[must_use]
    pub fn lookup(&self, module: &str, name: &str) -> Option<Box<dyn Node + Send>> {
        let key = format!("{module}.{name}");
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(&key).map(|f| f())
    }

    #[must_use]
    pub fn contains(&self, module: &str, name: &str) -> bool {
        let key = format!("{module}.{name}");
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).contains_key(&key)
    }
}

/// The process-wide registry instance.
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::default);

/// Registers a factory, deriving the module name from the caller's
/// context the way spec §4.4's "module-prefixed `Register` helper"
/// does — here, via `module_path!()`'s last segment, Rust's nearest
/// analogue to "caller context at initialisation time."
#[macro_export]
macro_rules! register_fn {
    ($name:expr, $factory:expr) => {{
        let module = module_path!().rsplit("::").next().unwrap_or(module_path!());
        $crate::func::REGISTRY.register(module, $name, Box::new($factory));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, StreamError};
    use crate::func::{Ctx, Info};
    use crate::types::FuncType;

    struct Noop;
    impl Node for Noop {
        fn info(&self) -> Info {
            Info { pure: true, memo: false, sig: FuncType::new(vec![], None) }
        }
        fn validate(&self) -> Result<()> {
            Ok(())
        }
        fn init(&mut self, _ctx: Ctx) -> Result<()> {
            Ok(())
        }
        fn stream(&mut self) -> std::result::Result<(), StreamError> {
            Ok(())
        }
    }

    #[test]
    fn register_and_lookup_round_trips() {
        let reg = Registry::default();
        reg.register("test_mod", "noop", Box::new(|| Box::new(Noop) as Box<dyn Node + Send>));
        assert!(reg.contains("test_mod", "noop"));
        assert!(reg.lookup("test_mod", "noop").is_some());
        assert!(reg.lookup("test_mod", "missing").is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate function registration")]
    fn duplicate_registration_panics() {
        let reg = Registry::default();
        reg.register("test_mod", "dup", Box::new(|| Box::new(Noop) as Box<dyn Node + Send>));
        reg.register("test_mod", "dup", Box::new(|| Box::new(Noop) as Box<dyn Node + Send>));
    }
}
