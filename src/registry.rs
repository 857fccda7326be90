// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::option::{OptionSchema, ParameterDescriptor};

/// Highest parameter position an option can be registered for.
pub const MAX_POSITION: usize = 255;

thread_local! {
    static GLOBAL_REGISTRY: Registry = Registry::new();
}

/// Identifies a handler: the type that owns it and the handler's name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerKey {
    owner: &'static str,
    handler: String,
}

impl HandlerKey {
    /// Create a key for the handler called `handler` owned by `owner`.
    pub fn new(owner: &'static str, handler: &str) -> Self {
        HandlerKey {
            owner,
            handler: handler.into(),
        }
    }

    /// Create a key for the handler called `handler` owned by type `T`.
    pub fn of<T: ?Sized>(handler: &str) -> Self {
        HandlerKey::new(any::type_name::<T>(), handler)
    }

    /// Name of the owning type.
    pub fn owner(&self) -> &str {
        self.owner
    }

    /// Name of the handler.
    pub fn handler(&self) -> &str {
        &self.handler
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}::{}", self.owner, self.handler)
    }
}

/// Stores the parameter descriptors registered for each handler.
///
/// A `Registry` is a handle: clones share the same store.
///
/// # Notes
///
/// - The store is not thread safe (a `Registry` is neither `Send` nor
///   `Sync`). Register options on the thread that invokes the handlers.
/// - Registering a parameter position that already has a descriptor
///   replaces it; the handler's list keeps its original order.
#[derive(Clone, Default, PartialEq)]
pub struct Registry {
    /// Hash of descriptor lists.
    ///
    /// - name: handler key.
    /// - value: descriptors in registration order.
    entries: Rc<RefCell<HashMap<HandlerKey, Vec<ParameterDescriptor>>>>,
}

impl Registry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Returns the registry shared by all code running on the current
    /// thread.
    pub fn global() -> Self {
        GLOBAL_REGISTRY.with(|r| r.clone())
    }

    /// Register an option for the parameter at `position` of the handler
    /// identified by `key`.
    ///
    /// # Errors
    ///
    /// - [Error::MissingOptName] if the option name is empty.
    /// - [Error::InvalidPosition] if `position` is greater than
    ///   [MAX_POSITION].
    /// - [Error::InvalidDefault] if the option has a default value whose
    ///   type differs from the option type.
    ///
    /// A failed registration does not affect parameters that were already
    /// registered.
    pub fn register(&self, key: &HandlerKey, position: usize, schema: OptionSchema) -> Result<()> {
        if schema.name.is_empty() {
            return Err(Error::MissingOptName);
        }

        if position > MAX_POSITION {
            return Err(Error::InvalidPosition {
                name: schema.name,
                position,
            });
        }

        if let Some(default) = &schema.default {
            if default.option_type() != schema.option_type {
                return Err(Error::InvalidDefault {
                    name: schema.name,
                    expected: schema.option_type,
                });
            }
        }

        debug!(
            handler = %key,
            position,
            option = %schema.name,
            option_type = %schema.option_type,
            "registering option"
        );

        let descriptor = ParameterDescriptor::new(position, schema);

        let mut entries = self.entries.borrow_mut();
        let list = entries.entry(key.clone()).or_insert_with(Vec::new);

        match list.iter_mut().find(|d| d.position == position) {
            Some(existing) => *existing = descriptor,
            None => list.push(descriptor),
        }

        Ok(())
    }

    /// Returns a copy of the descriptors registered for the handler
    /// (empty if there are none).
    pub fn descriptors(&self, key: &HandlerKey) -> Vec<ParameterDescriptor> {
        self.entries
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Call `f` with mutable access to the handler's descriptors.
    pub(crate) fn with_descriptors_mut<F, R>(&self, key: &HandlerKey, f: F) -> R
    where
        F: FnOnce(&mut [ParameterDescriptor]) -> R,
    {
        let mut entries = self.entries.borrow_mut();

        match entries.get_mut(key) {
            Some(list) => f(list.as_mut_slice()),
            None => {
                let empty: &mut [ParameterDescriptor] = &mut [];
                f(empty)
            }
        }
    }

    /// Determine if any options have been registered for the handler.
    pub fn contains(&self, key: &HandlerKey) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Remove all options registered for the handler. Returns `true` if
    /// there were any.
    pub fn clear(&self, key: &HandlerKey) -> bool {
        self.entries.borrow_mut().remove(key).is_some()
    }

    /// Returns the number of handlers with registered options.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Determine if no options have been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries.borrow())
            .finish()
    }
}
