//! Data-change observers.

/// Notified after a form saved its record, so dependent views can refresh.
pub trait DataChangeListener {
    fn on_data_changed(&self);
}

impl<F: Fn()> DataChangeListener for F {
    fn on_data_changed(&self) {
        self()
    }
}
