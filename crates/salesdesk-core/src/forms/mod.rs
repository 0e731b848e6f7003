//! Create/edit forms for departments and sellers.
//!
//! Each form is a plain state record ([`DepartmentForm`], [`SellerForm`])
//! plus a [`FormController`] that binds it to a record and a service. Hosts
//! copy user input into the record, trigger the controller's actions, and
//! render whatever the record holds afterwards (field text, error labels).

pub mod controller;
pub mod department;
pub mod listeners;
pub mod seller;
pub mod utils;
pub mod widgets;
pub mod window;

pub use controller::{EntityForm, FormController, SAVE_ERROR_TITLE, SaveOutcome};
pub use department::{DepartmentForm, DepartmentFormController};
pub use listeners::DataChangeListener;
pub use seller::{SellerForm, SellerFormController, SellerServices};
pub use widgets::{ComboBox, Constraint, DatePicker, ErrorLabel, TextField};
pub use window::{Alert, AlertKind, FormWindow};

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};

    use super::window::{Alert, FormWindow};

    /// Window fake that records what the controller asked for.
    #[derive(Default)]
    pub struct RecordingWindow {
        closed: Cell<usize>,
        alerts: RefCell<Vec<Alert>>,
    }

    impl RecordingWindow {
        pub fn close_count(&self) -> usize {
            self.closed.get()
        }

        pub fn alerts(&self) -> Vec<Alert> {
            self.alerts.borrow().clone()
        }
    }

    impl FormWindow for RecordingWindow {
        fn close(&self) {
            self.closed.set(self.closed.get() + 1);
        }

        fn show_alert(&self, alert: &Alert) {
            self.alerts.borrow_mut().push(alert.clone());
        }
    }
}
