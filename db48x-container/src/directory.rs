//! The nested variable store (spec.md §4.6): a tree of directories, each
//! holding named objects and named subdirectories, navigated by an
//! explicit path from `HOME` rather than parent back-pointers — the same
//! reason `fuel-merkle`'s node storage is keyed by the caller's path into
//! the tree instead of nodes holding parent references.

use alloc::{
    string::{
        String,
        ToString,
    },
    vec::Vec,
};
use core::ops::Add;

use db48x_object::CommandId;
use hashbrown::HashMap;
use strum::IntoEnumIterator;

/// Names the runtime never allows a `STO`/`CRDIR` to shadow: the built-in
/// statistics/solver variables and anything naming a built-in command.
const RESERVED_VARIABLE_NAMES: &[&str] = &["EQ", "ΣData", "PPAR", "ΣParameters"];

/// A failure navigating or mutating a [`Directory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryError {
    /// The name is reserved (a built-in variable or command name).
    NameReserved,
    /// No entry with that name exists here.
    NotFound,
    /// An entry with that name already exists.
    AlreadyExists,
    /// The name refers to a subdirectory where an object was expected.
    NotAnObject,
    /// The name refers to an object where a subdirectory was expected.
    NotADirectory,
    /// `UPDIR` was attempted from the home directory.
    AlreadyAtHome,
    /// A `PURGE` targeted the directory currently in use.
    CannotPurgeActiveDirectory,
}

impl core::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let message = match self {
            DirectoryError::NameReserved => "name is reserved",
            DirectoryError::NotFound => "undefined name",
            DirectoryError::AlreadyExists => "name already exists",
            DirectoryError::NotAnObject => "name is a directory, not an object",
            DirectoryError::NotADirectory => "name is an object, not a directory",
            DirectoryError::AlreadyAtHome => "already at the home directory",
            DirectoryError::CannotPurgeActiveDirectory => "cannot purge the active directory",
        };
        f.write_str(message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DirectoryError {}

impl From<DirectoryError> for db48x_object::ErrorKind {
    fn from(error: DirectoryError) -> Self {
        match error {
            DirectoryError::NameReserved | DirectoryError::NotAnObject | DirectoryError::NotADirectory => {
                db48x_object::ErrorKind::InvalidName
            }
            DirectoryError::NotFound => db48x_object::ErrorKind::UndefinedName,
            DirectoryError::AlreadyExists => db48x_object::ErrorKind::InvalidName,
            DirectoryError::AlreadyAtHome => db48x_object::ErrorKind::InvalidInput,
            DirectoryError::CannotPurgeActiveDirectory => db48x_object::ErrorKind::CannotPurgeActiveDirectory,
        }
    }
}

/// Returns `true` when `name` may not be used for a variable or
/// subdirectory: a reserved statistics/solver name, or the name of a
/// built-in command.
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_VARIABLE_NAMES.contains(&name) || CommandId::iter().any(|cmd| cmd.to_string() == name)
}

enum Entry<T> {
    Object(T),
    Subdir(Directory<T>),
}

/// A single level of the variable/subdirectory tree.
pub struct Directory<T> {
    entries: HashMap<String, Entry<T>>,
}

/// An absolute path from `HOME`, as `PATH` reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<String>);

impl Path {
    /// The path at `HOME`.
    pub fn home() -> Self {
        Path(Vec::new())
    }

    /// Descend into subdirectory `name`.
    pub fn push(&mut self, name: String) {
        self.0.push(name);
    }

    /// `UPDIR`: move to the parent directory.
    pub fn updir(&mut self) -> Result<(), DirectoryError> {
        if self.0.pop().is_none() {
            return Err(DirectoryError::AlreadyAtHome);
        }
        Ok(())
    }

    /// The path segments from `HOME` to the current directory.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl<T> Directory<T> {
    /// An empty directory.
    pub fn new() -> Self {
        Directory { entries: HashMap::new() }
    }

    /// Resolve `path` from `self` as the root, descending one subdirectory
    /// per segment.
    pub fn resolve(&self, path: &[String]) -> Result<&Directory<T>, DirectoryError> {
        let mut current = self;
        for segment in path {
            current = match current.entries.get(segment) {
                Some(Entry::Subdir(dir)) => dir,
                Some(Entry::Object(_)) => return Err(DirectoryError::NotADirectory),
                None => return Err(DirectoryError::NotFound),
            };
        }
        Ok(current)
    }

    /// Mutable counterpart of [`Directory::resolve`].
    pub fn resolve_mut(&mut self, path: &[String]) -> Result<&mut Directory<T>, DirectoryError> {
        let mut current = self;
        for segment in path {
            current = match current.entries.get_mut(segment) {
                Some(Entry::Subdir(dir)) => dir,
                Some(Entry::Object(_)) => return Err(DirectoryError::NotADirectory),
                None => return Err(DirectoryError::NotFound),
            };
        }
        Ok(current)
    }

    /// `STO`: bind `name` to `value` in this directory, overwriting any
    /// existing object bound to the same name.
    pub fn store(&mut self, name: &str, value: T) -> Result<(), DirectoryError> {
        if is_reserved_name(name) {
            return Err(DirectoryError::NameReserved);
        }
        if let Some(Entry::Subdir(_)) = self.entries.get(name) {
            return Err(DirectoryError::NotAnObject);
        }
        self.entries.insert(name.to_string(), Entry::Object(value));
        Ok(())
    }

    /// `RCL`: look up the object bound to `name` in this directory.
    pub fn recall(&self, name: &str) -> Result<&T, DirectoryError> {
        match self.entries.get(name) {
            Some(Entry::Object(value)) => Ok(value),
            Some(Entry::Subdir(_)) => Err(DirectoryError::NotAnObject),
            None => Err(DirectoryError::NotFound),
        }
    }

    /// `PURGE`: remove the object or empty subdirectory bound to `name`.
    pub fn purge(&mut self, name: &str) -> Result<(), DirectoryError> {
        match self.entries.get(name) {
            Some(Entry::Subdir(dir)) if !dir.entries.is_empty() => Err(DirectoryError::NotAnObject),
            Some(_) => {
                self.entries.remove(name);
                Ok(())
            }
            None => Err(DirectoryError::NotFound),
        }
    }

    /// `PGALL`: remove every object bound in this directory and, for each
    /// subdirectory, recurse before removing the now-empty subdirectory
    /// entry itself.
    pub fn purge_all(&mut self) {
        let names: Vec<String> = self.entries.keys().cloned().collect();
        for name in names {
            if let Some(Entry::Subdir(mut dir)) = self.entries.remove(&name) {
                dir.purge_all();
            }
        }
    }

    /// `CRDIR`: create an empty subdirectory bound to `name`.
    pub fn create_subdirectory(&mut self, name: &str) -> Result<(), DirectoryError> {
        if is_reserved_name(name) {
            return Err(DirectoryError::NameReserved);
        }
        if self.entries.contains_key(name) {
            return Err(DirectoryError::AlreadyExists);
        }
        self.entries.insert(name.to_string(), Entry::Subdir(Directory::new()));
        Ok(())
    }

    /// Names bound to an object in this directory, sorted for a
    /// deterministic `VARS` listing.
    pub fn vars(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter_map(|(name, entry)| matches!(entry, Entry::Object(_)).then(|| name.as_str()))
            .collect();
        names.sort_unstable();
        names
    }

    /// `TVARS`: names bound to an object satisfying `predicate` (a
    /// type-tag or semantic-marker test supplied by the caller), sorted.
    pub fn tvars(&self, predicate: impl Fn(&T) -> bool) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter_map(|(name, entry)| match entry {
                Entry::Object(value) if predicate(value) => Some(name.as_str()),
                _ => None,
            })
            .collect();
        names.sort_unstable();
        names
    }

    /// Names bound to a subdirectory in this directory, sorted.
    pub fn subdirectories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter_map(|(name, entry)| matches!(entry, Entry::Subdir(_)).then(|| name.as_str()))
            .collect();
        names.sort_unstable();
        names
    }

    /// Apply a fallible combining function to the object bound to `name`
    /// and store the result back under the same name (`STO+`/`STO-`/
    /// `STO×`/`STO÷`).
    pub fn store_combine<E>(&mut self, name: &str, operand: &T, f: impl FnOnce(&T, &T) -> Result<T, E>) -> Result<(), StoreCombineError<E>>
    where
        T: Clone,
    {
        let current = self.recall(name).map_err(StoreCombineError::Directory)?.clone();
        let combined = f(&current, operand).map_err(StoreCombineError::Combine)?;
        self.store(name, combined).map_err(StoreCombineError::Directory)
    }

    /// `INCR`: add `one` to the numeric value bound to `name`.
    pub fn increment(&mut self, name: &str, one: &T) -> Result<(), DirectoryError>
    where
        T: Clone + Add<Output = T>,
    {
        let current = self.recall(name)?.clone();
        self.store(name, current + one.clone())
    }

    /// `CLONE`: a deep copy of this directory and every subdirectory it
    /// contains.
    pub fn deep_clone(&self) -> Directory<T>
    where
        T: Clone,
    {
        let entries = self
            .entries
            .iter()
            .map(|(name, entry)| {
                let cloned = match entry {
                    Entry::Object(value) => Entry::Object(value.clone()),
                    Entry::Subdir(dir) => Entry::Subdir(dir.deep_clone()),
                };
                (name.clone(), cloned)
            })
            .collect();
        Directory { entries }
    }
}

impl<T> Default for Directory<T> {
    fn default() -> Self {
        Directory::new()
    }
}

/// Error from [`Directory::store_combine`]: either directory navigation
/// failed, or the combining function itself did (e.g. a `DivideByZero`
/// from `STO÷`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCombineError<E> {
    /// A [`Directory`] operation (lookup or store) failed.
    Directory(DirectoryError),
    /// The caller-supplied combining function failed.
    Combine(E),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_recall_round_trips() {
        let mut dir: Directory<i64> = Directory::new();
        dir.store("X", 42).unwrap();
        assert_eq!(*dir.recall("X").unwrap(), 42);
    }

    #[test]
    fn store_rejects_reserved_names() {
        let mut dir: Directory<i64> = Directory::new();
        assert_eq!(dir.store("EQ", 1), Err(DirectoryError::NameReserved));
        assert_eq!(dir.store("+", 1), Err(DirectoryError::NameReserved));
    }

    #[test]
    fn recall_of_an_undefined_name_is_not_found() {
        let dir: Directory<i64> = Directory::new();
        assert_eq!(dir.recall("X"), Err(DirectoryError::NotFound));
    }

    #[test]
    fn create_subdirectory_then_resolve_path() {
        let mut dir: Directory<i64> = Directory::new();
        dir.create_subdirectory("SUB").unwrap();
        dir.resolve_mut(&["SUB".to_string()]).unwrap().store("Y", 7).unwrap();
        assert_eq!(*dir.resolve(&["SUB".to_string()]).unwrap().recall("Y").unwrap(), 7);
    }

    #[test]
    fn purge_all_empties_nested_subdirectories() {
        let mut dir: Directory<i64> = Directory::new();
        dir.store("X", 1).unwrap();
        dir.create_subdirectory("SUB").unwrap();
        dir.resolve_mut(&["SUB".to_string()]).unwrap().store("Y", 2).unwrap();
        dir.purge_all();
        assert!(dir.vars().is_empty());
        assert!(dir.subdirectories().is_empty());
    }

    #[test]
    fn increment_adds_to_the_stored_value() {
        let mut dir: Directory<i64> = Directory::new();
        dir.store("X", 10).unwrap();
        dir.increment("X", &1).unwrap();
        assert_eq!(*dir.recall("X").unwrap(), 11);
    }

    #[test]
    fn path_updir_from_home_is_an_error() {
        let mut path = Path::home();
        assert_eq!(path.updir(), Err(DirectoryError::AlreadyAtHome));
        path.push("SUB".to_string());
        assert!(path.updir().is_ok());
        assert_eq!(path.segments(), &[] as &[String]);
    }

    #[test]
    fn deep_clone_is_independent_of_the_original() {
        let mut dir: Directory<i64> = Directory::new();
        dir.store("X", 1).unwrap();
        let mut clone = dir.deep_clone();
        clone.store("X", 2).unwrap();
        assert_eq!(*dir.recall("X").unwrap(), 1);
        assert_eq!(*clone.recall("X").unwrap(), 2);
    }
}
