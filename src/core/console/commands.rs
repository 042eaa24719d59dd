//=========================================================================
// Command Table
//=========================================================================
//
// Named debug-console commands, shared between the engine and whichever
// console front end reads user input.
//
// Architecture:
//   add / force_add / clear → Arc<Mutex<HashMap<name, Command>>>
//   run(name, args)         → clone command out of the lock → call
//
// Commands are called without the lock held, so a command may register
// or remove other commands.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::orchestrator::SkipHandle;

//=== Command =============================================================

/// A console command. Receives the whitespace-separated arguments that
/// followed its name.
pub type Command = Arc<dyn Fn(&[String]) + Send + Sync>;

//=== CommandError ========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A command with this name is already registered. Nothing was replaced.
    AlreadyExists(String),

    /// No command with this name is registered.
    Unknown(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists(name) => write!(f, "Command '{}' already exists", name),
            Self::Unknown(name) => write!(f, "Unknown command '{}'", name),
        }
    }
}

impl std::error::Error for CommandError {}

//=== CommandTable ========================================================

/// Cloneable handle to a shared table of console commands.
#[derive(Clone, Default)]
pub struct CommandTable {
    commands: Arc<Mutex<HashMap<String, Command>>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Registers a command. Fails without overwriting if the name is taken.
    pub fn add<F>(&self, name: &str, command: F) -> Result<(), CommandError>
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        let mut commands = self.lock();
        if commands.contains_key(name) {
            return Err(CommandError::AlreadyExists(name.to_string()));
        }
        info!("Adding command {}", name);
        commands.insert(name.to_string(), Arc::new(command));
        Ok(())
    }

    /// Registers a command, replacing and returning any previous one.
    pub fn force_add<F>(&self, name: &str, command: F) -> Option<Command>
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        let previous = self.lock().insert(name.to_string(), Arc::new(command));
        if previous.is_some() {
            info!("Overwriting command {}", name);
        } else {
            info!("Adding command {}", name);
        }
        previous
    }

    /// Removes a command. Returns whether it existed.
    pub fn clear(&self, name: &str) -> bool {
        self.lock().remove(name).is_some()
    }

    /// Removes every command.
    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Registers `skip` (`skip scene` ends the running scene) and `help`
    /// (logs the sorted command names).
    pub fn add_builtins(&self, skip: SkipHandle) -> Result<(), CommandError> {
        self.add("skip", move |args| match args {
            [target] if target == "scene" => {
                if !skip.skip() {
                    info!("Scene skip already pending");
                }
            }
            _ => warn!("Usage: skip scene"),
        })?;

        let table = Arc::downgrade(&self.commands);
        self.add("help", move |_| {
            if let Some(commands) = table.upgrade() {
                let table = CommandTable { commands };
                info!("Commands: {}", table.keys().join(", "));
            }
        })
    }

    //--- Query API --------------------------------------------------------

    /// Registered command names, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    //--- Invocation -------------------------------------------------------

    /// Runs a registered command by name, passing `args` through.
    pub fn run(&self, name: &str, args: &[&str]) -> Result<(), CommandError> {
        let command = self
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| CommandError::Unknown(name.to_string()))?;

        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        command(args.as_slice());
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Command>> {
        self.commands.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&[String]) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, move |_: &[String]| {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn add_rejects_duplicates_without_overwriting() {
        let table = CommandTable::new();
        let (first, first_cmd) = counter();
        let (second, second_cmd) = counter();

        table.add("fade", first_cmd).unwrap();
        assert_eq!(
            table.add("fade", second_cmd),
            Err(CommandError::AlreadyExists("fade".into()))
        );

        table.run("fade", &[]).unwrap();
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn force_add_returns_previous_command() {
        let table = CommandTable::new();
        let (first, first_cmd) = counter();
        let (second, second_cmd) = counter();

        assert!(table.force_add("print", first_cmd).is_none());
        let previous = table.force_add("print", second_cmd).expect("previous command");

        previous(&[][..]);
        table.run("print", &[]).unwrap();
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn run_passes_arguments_through() {
        let table = CommandTable::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        table
            .add("move", move |args| sink.lock().unwrap().extend_from_slice(args))
            .unwrap();

        table.run("move", &["10", "20"]).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["10".to_string(), "20".to_string()]);
    }

    #[test]
    fn run_unknown_command_fails() {
        let table = CommandTable::new();
        assert_eq!(table.run("nope", &[]), Err(CommandError::Unknown("nope".into())));
    }

    #[test]
    fn keys_are_sorted_and_clear_removes() {
        let table = CommandTable::new();
        table.add("zoom", |_| {}).unwrap();
        table.add("alpha", |_| {}).unwrap();
        assert_eq!(table.keys(), vec!["alpha".to_string(), "zoom".to_string()]);

        assert!(table.clear("zoom"));
        assert!(!table.clear("zoom"));
        table.reset();
        assert!(table.keys().is_empty());
    }

    #[test]
    fn commands_may_modify_the_table() {
        let table = CommandTable::new();
        let inner = table.clone();
        table
            .add("alias", move |_| {
                let _ = inner.add("aliased", |_| {});
            })
            .unwrap();

        table.run("alias", &[]).unwrap();
        assert!(table.contains("aliased"));
    }

    #[test]
    fn builtin_skip_sends_skip_signal() {
        let (tx, rx) = bounded(1);
        let table = CommandTable::new();
        table.add_builtins(SkipHandle::new(tx)).unwrap();

        table.run("skip", &["bogus"]).unwrap();
        assert!(rx.try_recv().is_err());

        table.run("skip", &["scene"]).unwrap();
        assert!(rx.try_recv().is_ok());
        table.run("help", &[]).unwrap();
    }

    #[test]
    fn builtins_cannot_be_added_twice() {
        let (tx, _rx) = bounded(1);
        let table = CommandTable::new();
        table.add_builtins(SkipHandle::new(tx.clone())).unwrap();
        assert_eq!(
            table.add_builtins(SkipHandle::new(tx)),
            Err(CommandError::AlreadyExists("skip".into()))
        );
    }
}
