//! Authoritative window entity store keyed by [`WindowId`].
//!
//! The store is a plain data holder: it never syncs taskbar entries, focus, or rendering. The
//! lifecycle controller keeps those dependents consistent.

use serde::{Deserialize, Serialize};

use crate::{
    model::{LifecycleState, WindowContent, WindowId, WindowRecord, WindowRect},
    reducer::ReducerError,
};

/// Partial update applied by [`WindowStore::update`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowPatch {
    pub title: Option<String>,
    pub rect: Option<WindowRect>,
    pub restore_rect: Option<Option<WindowRect>>,
    pub state: Option<LifecycleState>,
    pub content: Option<WindowContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStore {
    windows: Vec<WindowRecord>,
}

impl WindowStore {
    /// Creates a closed window entity.
    ///
    /// A `Closed` entity with the same id is replaced by a fresh one.
    ///
    /// # Errors
    ///
    /// Returns [`ReducerError::DuplicateWindow`] when `id` belongs to a window that is not closed.
    pub fn create(
        &mut self,
        id: WindowId,
        title: impl Into<String>,
        initial_rect: WindowRect,
    ) -> Result<&mut WindowRecord, ReducerError> {
        let record = WindowRecord::new(id.clone(), title, initial_rect);
        match self.windows.iter().position(|w| w.id == id) {
            Some(index) if self.windows[index].is_open() => Err(ReducerError::DuplicateWindow(id)),
            Some(index) => {
                self.windows[index] = record;
                Ok(&mut self.windows[index])
            }
            None => {
                self.windows.push(record);
                let last = self.windows.len() - 1;
                Ok(&mut self.windows[last])
            }
        }
    }

    pub fn get(&self, id: &WindowId) -> Result<&WindowRecord, ReducerError> {
        self.windows
            .iter()
            .find(|w| w.id == *id)
            .ok_or_else(|| ReducerError::WindowNotFound(id.clone()))
    }

    pub fn get_mut(&mut self, id: &WindowId) -> Result<&mut WindowRecord, ReducerError> {
        self.windows
            .iter_mut()
            .find(|w| w.id == *id)
            .ok_or_else(|| ReducerError::WindowNotFound(id.clone()))
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.windows.iter().any(|w| w.id == *id)
    }

    pub fn update(&mut self, id: &WindowId, patch: WindowPatch) -> Result<(), ReducerError> {
        let window = self.get_mut(id)?;
        if let Some(title) = patch.title {
            window.title = title;
        }
        if let Some(rect) = patch.rect {
            window.rect = rect;
        }
        if let Some(restore_rect) = patch.restore_rect {
            window.restore_rect = restore_rect;
        }
        if let Some(state) = patch.state {
            window.state = state;
        }
        if let Some(content) = patch.content {
            window.content = content;
        }
        Ok(())
    }

    pub fn remove(&mut self, id: &WindowId) -> Result<WindowRecord, ReducerError> {
        let index = self
            .windows
            .iter()
            .position(|w| w.id == *id)
            .ok_or_else(|| ReducerError::WindowNotFound(id.clone()))?;
        Ok(self.windows.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WindowRecord> {
        self.windows.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
