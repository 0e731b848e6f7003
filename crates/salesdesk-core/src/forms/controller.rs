//! Generic create/edit form controller.
//!
//! The save flow is shared by every form:
//!
//! ```text
//! Idle -> Validating -> Invalid        (labels updated, window stays open)
//!                    -> Persisting -> Saved   (listeners notified, window closed)
//!                                  -> Failed  (alert shown, window stays open)
//! ```
//!
//! What differs per record type (field extraction, population, error label
//! routing, which service persists it) lives behind [`EntityForm`].

use std::rc::Rc;

use tracing::{debug, info, instrument, warn};

use super::{
    listeners::DataChangeListener,
    window::{Alert, FormWindow},
};
use crate::{
    domain::ValidationError,
    error::{SalesdeskError, SalesdeskResult},
};

/// Title of the alert shown when the store rejects a save.
pub const SAVE_ERROR_TITLE: &str = "Error saving object";

/// Form state for one record type.
pub trait EntityForm {
    /// Record edited by the form.
    type Entity: Clone;

    /// Collaborators the record is persisted through.
    type Services;

    /// Record name used in logs.
    const ENTITY: &'static str;

    /// Build a fresh record from the current input, or report every
    /// invalid field.
    fn get_form_data(&self) -> Result<Self::Entity, ValidationError>;

    /// Copy `entity` into the inputs.
    fn update_form_data(&mut self, entity: &Self::Entity);

    /// Mirror `errors` onto the error labels; labels without an error are
    /// cleared.
    fn set_error_messages(&mut self, errors: &ValidationError);

    /// Insert or update `entity`, writing back any assigned identity.
    fn persist(services: &Self::Services, entity: &mut Self::Entity) -> SalesdeskResult<()>;
}

/// Result of a save attempt that did not abort.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<E> {
    /// Stored; listeners were notified and the window was closed.
    Saved(E),
    /// Input rejected; the window stays open.
    Invalid(ValidationError),
    /// The store failed; an alert was shown and the window stays open.
    Failed(SalesdeskError),
}

impl<E> SaveOutcome<E> {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Controller for a modal create/edit form.
///
/// Call order: [`set_entity`](Self::set_entity) and
/// [`set_services`](Self::set_services), optionally subscribe listeners, then
/// [`update_form_data`](Self::update_form_data) before showing the form.
pub struct FormController<F: EntityForm> {
    entity: Option<F::Entity>,
    services: Option<F::Services>,
    listeners: Vec<Rc<dyn DataChangeListener>>,
    form: F,
}

impl<F: EntityForm> FormController<F> {
    pub fn new(form: F) -> Self {
        Self {
            entity: None,
            services: None,
            listeners: Vec::new(),
            form,
        }
    }

    /// Bind the record to edit (a default record for "create").
    pub fn set_entity(&mut self, entity: F::Entity) {
        self.entity = Some(entity);
    }

    pub fn entity(&self) -> Option<&F::Entity> {
        self.entity.as_ref()
    }

    pub fn set_services(&mut self, services: F::Services) {
        self.services = Some(services);
    }

    /// Append a listener; listeners are notified in subscription order.
    pub fn subscribe_data_change_listener(&mut self, listener: Rc<dyn DataChangeListener>) {
        self.listeners.push(listener);
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Populate the inputs from the bound record.
    ///
    /// # Panics
    /// Panics if no record is bound.
    pub fn update_form_data(&mut self) {
        let Some(entity) = &self.entity else {
            illegal_state("entity");
        };
        self.form.update_form_data(entity);
    }

    /// Validate, persist, notify and close.
    ///
    /// # Panics
    /// Panics if no record or no service is bound. That is a wiring bug in
    /// the caller, not something to show the user; the service is not
    /// called.
    #[instrument(skip_all, fields(form = F::ENTITY))]
    pub fn on_save_action(&mut self, window: &dyn FormWindow) -> SaveOutcome<F::Entity> {
        if self.entity.is_none() {
            illegal_state("entity");
        }
        let Some(services) = &self.services else {
            illegal_state("service");
        };

        let mut entity = match self.form.get_form_data() {
            Ok(entity) => entity,
            Err(errors) => {
                debug!(fields = errors.len(), "Form data rejected");
                self.form.set_error_messages(&errors);
                return SaveOutcome::Invalid(errors);
            }
        };

        if let Err(e) = F::persist(services, &mut entity) {
            warn!(error = %e, "Save failed");
            window.show_alert(&Alert::error(SAVE_ERROR_TITLE, e.to_string()));
            return SaveOutcome::Failed(e);
        }

        self.notify_data_change_listeners();
        window.close();
        self.entity = None;
        info!("Form saved and closed");
        SaveOutcome::Saved(entity)
    }

    /// Close the window without saving.
    pub fn on_cancel_action(&self, window: &dyn FormWindow) {
        debug!(form = F::ENTITY, "Form cancelled");
        window.close();
    }

    pub(crate) fn services(&self) -> Option<&F::Services> {
        self.services.as_ref()
    }

    fn notify_data_change_listeners(&self) {
        // Snapshot so a listener that re-subscribes cannot disturb the walk.
        let listeners = self.listeners.clone();
        for listener in &listeners {
            listener.on_data_changed();
        }
    }
}

/// Abort on a collaborator that was never bound.
#[track_caller]
pub(crate) fn illegal_state(what: &str) -> ! {
    panic!("illegal state: {what} was not set")
}
