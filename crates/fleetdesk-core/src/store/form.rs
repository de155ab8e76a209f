// ── Shared create/edit form ──

use tokio::sync::watch;

/// Whether the form is shown and which entity, if any, it edits.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<T> {
    pub shown: bool,
    pub edited: Option<T>,
}

impl<T> Default for FormState<T> {
    fn default() -> Self {
        Self {
            shown: false,
            edited: None,
        }
    }
}

/// Form modal toggling between create mode (`edited` is `None`) and edit
/// mode.
#[derive(Debug)]
pub struct FormModal<T> {
    state: watch::Sender<FormState<T>>,
}

impl<T> Default for FormModal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FormModal<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self { state }
    }

    /// Show the form, editing `entity` or creating when `None`.
    pub fn open(&self, entity: Option<T>) {
        self.state.send_replace(FormState {
            shown: true,
            edited: entity,
        });
    }

    /// Hide the form and forget the edited entity.
    pub fn close(&self) {
        self.state.send_replace(FormState::default());
    }

    pub fn is_shown(&self) -> bool {
        self.state.borrow().shown
    }

    pub fn is_editing(&self) -> bool {
        self.state.borrow().edited.is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState<T>> {
        self.state.subscribe()
    }
}

impl<T: Clone> FormModal<T> {
    pub fn edited(&self) -> Option<T> {
        self.state.borrow().edited.clone()
    }
}
