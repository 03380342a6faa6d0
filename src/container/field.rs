//! Field references.

use std::fmt;
use std::sync::Arc;

type Modify<T> = dyn Fn(&mut dyn FnMut(&mut T)) + Send + Sync;

/// A read/write handle to a value or a part of one.
///
/// Obtained from [`Container::field`](super::Container::field) or
/// [`Container::reference`](super::Container::reference); narrower handles
/// come from [`project`](Self::project). Handles bound to a container modify
/// it in a single `update`, so concurrent writers are never overwritten.
pub struct FieldRef<T> {
    read: Arc<dyn Fn() -> T + Send + Sync>,
    modify: Arc<Modify<T>>,
}

impl<T> Clone for FieldRef<T> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            modify: Arc::clone(&self.modify),
        }
    }
}

impl<T: 'static> FieldRef<T> {
    /// Handle from a getter and a setter.
    ///
    /// Modifications read, patch and write back as separate steps; use
    /// [`from_modify`](Self::from_modify) when the target can apply a
    /// change in place.
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn() -> T + Send + Sync + 'static,
        W: Fn(T) + Send + Sync + 'static,
    {
        let read = Arc::new(read);
        let current = Arc::clone(&read);
        Self {
            read,
            modify: Arc::new(move |f: &mut dyn FnMut(&mut T)| {
                let mut value = current();
                f(&mut value);
                write(value);
            }),
        }
    }

    /// Handle from a getter and an in-place modifier.
    pub fn from_modify<R, M>(read: R, modify: M) -> Self
    where
        R: Fn() -> T + Send + Sync + 'static,
        M: Fn(&mut dyn FnMut(&mut T)) + Send + Sync + 'static,
    {
        Self {
            read: Arc::new(read),
            modify: Arc::new(modify),
        }
    }

    pub fn get(&self) -> T {
        (self.read)()
    }

    pub fn set(&self, value: T) {
        let mut value = Some(value);
        self.modify(|slot| {
            if let Some(value) = value.take() {
                *slot = value;
            }
        });
    }

    /// Change the value in place.
    pub fn modify(&self, mut f: impl FnMut(&mut T)) {
        (self.modify)(&mut f)
    }

    /// Handle to a part of `T`.
    ///
    /// Writes patch the part inside this handle's own modify step.
    pub fn project<U, G, W>(&self, get: G, set: W) -> FieldRef<U>
    where
        U: 'static,
        G: Fn(&T) -> U + Send + Sync + 'static,
        W: Fn(&mut T, U) + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        let reader = self.clone();
        let parent = self.clone();
        let part_of = Arc::clone(&get);
        FieldRef::from_modify(
            move || get(&reader.get()),
            move |f: &mut dyn FnMut(&mut U)| {
                parent.modify(|whole| {
                    let mut part = part_of(whole);
                    f(&mut part);
                    set(whole, part);
                });
            },
        )
    }
}

impl<T> fmt::Debug for FieldRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRef").finish_non_exhaustive()
    }
}
