//! The process-wide descriptor table.
//!
//! Each [`Introspect`] type is described once. The first call to [`register`] (directly, or via
//! [`encode`](crate::encode) / [`decode`](crate::decode)) builds the descriptor, registers the
//! types it nests, and caches the outcome keyed by [`TypeId`]. Descriptors are leaked and live
//! for the rest of the process. A failed registration is cached too, so a broken type reports the
//! same error on every use and never reaches the encoder.
//!
//! Types that nest themselves (directly or through a collection) register by treating a type
//! whose registration is already under way on the current thread as satisfied. A descriptor
//! built while an outer registration is still running may rely on that outer type, so it is
//! held back per thread and only published once the outermost registration succeeds. If the
//! outermost one fails, the held-back descriptors are dropped and rebuilt on their next use,
//! where they see the cached failure.

use crate::descriptor::{Introspect, TypeDescriptor};
use crate::error::RegistrationError;
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::{debug, warn};

#[derive(Clone)]
enum Entry {
    Ready(&'static (dyn Any + Send + Sync)),
    Failed(RegistrationError),
}

fn table() -> &'static RwLock<HashMap<TypeId, Entry>> {
    static TABLE: OnceLock<RwLock<HashMap<TypeId, Entry>>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(HashMap::new()))
}

thread_local! {
    static IN_PROGRESS: RefCell<HashSet<TypeId>> = RefCell::new(HashSet::new());
    static PENDING: RefCell<Vec<(TypeId, Entry)>> = RefCell::new(Vec::new());
}

/// Marks a type as being registered on this thread until dropped.
struct InProgress(TypeId);

impl InProgress {
    fn enter(type_id: TypeId) -> Option<Self> {
        IN_PROGRESS
            .with(|set| set.borrow_mut().insert(type_id))
            .then(|| InProgress(type_id))
    }

    fn contains(type_id: TypeId) -> bool {
        IN_PROGRESS.with(|set| set.borrow().contains(&type_id))
    }

    fn any() -> bool {
        IN_PROGRESS.with(|set| !set.borrow().is_empty())
    }
}

impl Drop for InProgress {
    fn drop(&mut self) {
        IN_PROGRESS.with(|set| {
            set.borrow_mut().remove(&self.0);
        });
    }
}

/// Returns the descriptor of `T`, building and registering it on first use.
///
/// Registration is idempotent: later calls return the cached descriptor, or the cached error if
/// the first attempt failed.
///
/// # Errors
///
/// Returns the [`RegistrationError`] of `T` or of any type it nests.
///
/// # Examples
///
/// ```rust
/// use intros_tree::{register, Introspect, RegistrationError, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Broken {
///     matrix: [f64; 4],
/// }
///
/// impl Introspect for Broken {
///     fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
///         TypeDescriptor::<Self>::builder("Broken")
///             .element("matrix", |b| &b.matrix, |b| &mut b.matrix)
///             .build()
///     }
/// }
///
/// let first = register::<Broken>().unwrap_err();
/// let second = register::<Broken>().unwrap_err();
/// assert_eq!(first, second);
/// ```
pub fn register<T: Introspect>() -> Result<&'static TypeDescriptor<T>, RegistrationError> {
    let type_id = TypeId::of::<T>();
    if let Some(entry) = lookup(type_id) {
        return resolve::<T>(entry);
    }

    let Some(guard) = InProgress::enter(type_id) else {
        return Err(RegistrationError::Reentrant(type_name::<T>()));
    };

    let entry = match build::<T>() {
        Ok(descriptor) => {
            debug!(
                type_name = type_name::<T>(),
                node = descriptor.node_name(),
                fields = descriptor.fields().len(),
                "registered type descriptor"
            );
            let leaked: &'static TypeDescriptor<T> = Box::leak(Box::new(descriptor));
            Entry::Ready(leaked)
        }
        Err(err) => {
            warn!(type_name = type_name::<T>(), error = %err, "type registration failed");
            Entry::Failed(err)
        }
    };
    drop(guard);

    if InProgress::any() {
        if let Entry::Ready(_) = entry {
            PENDING.with(|pending| pending.borrow_mut().push((type_id, entry.clone())));
            return resolve::<T>(entry);
        }
        return resolve::<T>(publish(type_id, entry, Vec::new()));
    }

    let pending = PENDING.with(|pending| std::mem::take(&mut *pending.borrow_mut()));
    let pending = match entry {
        Entry::Ready(_) => pending,
        Entry::Failed(_) => {
            if !pending.is_empty() {
                debug!(
                    type_name = type_name::<T>(),
                    dropped = pending.len(),
                    "dropping descriptors built during failed registration"
                );
            }
            Vec::new()
        }
    };
    resolve::<T>(publish(type_id, entry, pending))
}

/// Inserts `entry` and any held-back entries into the table, returning what the table holds
/// for `type_id`. Another thread may have won the race; its entry is the one everybody sees.
fn publish(type_id: TypeId, entry: Entry, pending: Vec<(TypeId, Entry)>) -> Entry {
    let mut table = table().write().unwrap_or_else(PoisonError::into_inner);
    for (id, held) in pending {
        table.entry(id).or_insert(held);
    }
    table.entry(type_id).or_insert(entry).clone()
}

/// Registers `T` unless it is already being registered further up this thread's stack.
pub(crate) fn ensure_registered<T: Introspect>() -> Result<(), RegistrationError> {
    if InProgress::contains(TypeId::of::<T>()) {
        return Ok(());
    }
    register::<T>().map(|_| ())
}

fn build<T: Introspect>() -> Result<TypeDescriptor<T>, RegistrationError> {
    let descriptor = T::describe()?;
    for field in descriptor.fields() {
        field.register_dependencies()?;
    }
    Ok(descriptor)
}

fn lookup(type_id: TypeId) -> Option<Entry> {
    let held = PENDING.with(|pending| {
        pending
            .borrow()
            .iter()
            .find(|(id, _)| *id == type_id)
            .map(|(_, entry)| entry.clone())
    });
    held.or_else(|| {
        table()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    })
}

fn resolve<T: Introspect>(entry: Entry) -> Result<&'static TypeDescriptor<T>, RegistrationError> {
    match entry {
        Entry::Ready(any) => Ok(any
            .downcast_ref::<TypeDescriptor<T>>()
            .expect("descriptor table is keyed by TypeId")),
        Entry::Failed(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Leaf {
        value: i32,
    }

    impl Introspect for Leaf {
        fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
            TypeDescriptor::<Self>::builder("Leaf")
                .attribute("value", |l| &l.value, |l| &mut l.value)
                .build()
        }
    }

    #[derive(Default)]
    struct Tree {
        leaf: Leaf,
        children: Vec<Tree>,
    }

    impl Introspect for Tree {
        fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
            TypeDescriptor::<Self>::builder("Tree")
                .element("Leaf", |t| &t.leaf, |t| &mut t.leaf)
                .element("Tree", |t| &t.children, |t| &mut t.children)
                .build()
        }
    }

    #[derive(Default)]
    struct HasArray {
        cells: [u8; 2],
    }

    impl Introspect for HasArray {
        fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
            TypeDescriptor::<Self>::builder("HasArray")
                .element("cells", |h| &h.cells, |h| &mut h.cells)
                .build()
        }
    }

    #[derive(Default)]
    struct Outer {
        inner: HasArray,
    }

    impl Introspect for Outer {
        fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
            TypeDescriptor::<Self>::builder("Outer")
                .element("HasArray", |o| &o.inner, |o| &mut o.inner)
                .build()
        }
    }

    #[derive(Default)]
    struct Route {
        lanes: Vec<Lane>,
        signal: HasArray,
    }

    #[derive(Default)]
    struct Lane {
        detours: Vec<Route>,
    }

    impl Introspect for Route {
        fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
            TypeDescriptor::<Self>::builder("Route")
                .element("Lane", |r| &r.lanes, |r| &mut r.lanes)
                .element("HasArray", |r| &r.signal, |r| &mut r.signal)
                .build()
        }
    }

    impl Introspect for Lane {
        fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
            TypeDescriptor::<Self>::builder("Lane")
                .element("Route", |l| &l.detours, |l| &mut l.detours)
                .build()
        }
    }

    #[derive(Default)]
    struct SelfDescribing;

    impl Introspect for SelfDescribing {
        fn describe() -> Result<TypeDescriptor<Self>, RegistrationError> {
            register::<SelfDescribing>()?;
            TypeDescriptor::new("SelfDescribing", Vec::new())
        }
    }

    #[test]
    fn test_register_is_idempotent() {
        let first = register::<Leaf>().unwrap();
        let second = register::<Leaf>().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_recursive_type_registers() {
        let descriptor = register::<Tree>().unwrap();
        assert_eq!(descriptor.node_name(), "Tree");
        assert!(register::<Leaf>().is_ok());
    }

    #[test]
    fn test_nested_failure_propagates() {
        let err = register::<Outer>().unwrap_err();
        assert!(matches!(err, RegistrationError::UnsupportedArray { .. }));
        assert!(register::<HasArray>().is_err());
    }

    #[test]
    fn test_failed_cycle_does_not_publish_members() {
        let err = register::<Route>().unwrap_err();
        assert!(matches!(err, RegistrationError::UnsupportedArray { .. }));

        // Lane finished first, but it relies on Route.
        assert_eq!(register::<Lane>().unwrap_err(), err);
        assert!(PENDING.with(|pending| pending.borrow().is_empty()));
    }

    #[test]
    fn test_reentrant_describe_fails() {
        let err = register::<SelfDescribing>().unwrap_err();
        assert!(matches!(err, RegistrationError::Reentrant(_)));
    }

    #[test]
    fn test_concurrent_registration() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| register::<Tree>().map(|d| d as *const _ as usize)))
            .collect();
        let addresses: HashSet<_> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert_eq!(addresses.len(), 1);
    }
}
