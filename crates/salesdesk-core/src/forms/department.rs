//! Department create/edit form.

use std::sync::Arc;

use super::{
    controller::{EntityForm, FormController},
    utils::try_parse_to_int,
    widgets::{Constraint, ErrorLabel, TextField},
};
use crate::{
    application::DepartmentService,
    domain::{Department, Field, ValidationError, require_text},
    error::SalesdeskResult,
};

/// Longest department name the form accepts.
pub const NAME_MAX_LENGTH: usize = 30;

/// Inputs of the department form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentForm {
    pub id: TextField,
    pub name: TextField,
    pub name_error: ErrorLabel,
}

impl DepartmentForm {
    pub fn new() -> Self {
        Self {
            id: TextField::new().with_constraint(Constraint::Integer),
            name: TextField::new().with_constraint(Constraint::MaxLength(NAME_MAX_LENGTH)),
            name_error: ErrorLabel::default(),
        }
    }
}

impl Default for DepartmentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityForm for DepartmentForm {
    type Entity = Department;
    type Services = Arc<DepartmentService>;

    const ENTITY: &'static str = "department";

    fn get_form_data(&self) -> Result<Department, ValidationError> {
        let mut errors = ValidationError::new();

        let id = try_parse_to_int(self.id.text());

        require_text(&mut errors, Field::Name, self.name.text());
        let name = self.name.text().to_owned();

        errors.into_result(Department { id, name })
    }

    fn update_form_data(&mut self, department: &Department) {
        self.id
            .set_text(department.id.map(|id| id.to_string()).unwrap_or_default());
        self.name.set_text(department.name.clone());
    }

    fn set_error_messages(&mut self, errors: &ValidationError) {
        self.name_error
            .set_text(errors.get(Field::Name).unwrap_or_default());
    }

    fn persist(service: &Arc<DepartmentService>, department: &mut Department) -> SalesdeskResult<()> {
        service.save_or_update(department)
    }
}

/// Controller for the department form.
pub type DepartmentFormController = FormController<DepartmentForm>;

impl FormController<DepartmentForm> {
    /// Bind the service the form saves through.
    pub fn set_department_service(&mut self, service: Arc<DepartmentService>) {
        self.set_services(service);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::application::{ApplicationError, ports::MockDepartmentRepository};
    use crate::forms::{controller::SaveOutcome, testing::RecordingWindow};

    fn controller_with(repo: MockDepartmentRepository) -> DepartmentFormController {
        let mut controller = DepartmentFormController::new(DepartmentForm::new());
        controller.set_department_service(Arc::new(DepartmentService::new(Box::new(repo))));
        controller
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut form = DepartmentForm::new();
        form.name.set_text("   ");

        let errors = form.get_form_data().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Name), Some("Field can't be empty"));
    }

    #[test]
    fn name_is_stored_untrimmed() {
        let mut form = DepartmentForm::new();
        form.id.set_text("5");
        form.name.set_text(" Books ");

        let department = form.get_form_data().unwrap();
        assert_eq!(department, Department::new(Some(5), " Books "));
    }

    #[test]
    fn empty_id_means_new_record() {
        let mut form = DepartmentForm::new();
        form.name.set_text("Books");
        assert_eq!(form.get_form_data().unwrap().id, None);
    }

    #[test]
    fn name_longer_than_limit_is_refused_by_the_input() {
        let mut form = DepartmentForm::new();
        assert!(form.name.set_text("x".repeat(NAME_MAX_LENGTH)));
        assert!(!form.name.set_text("x".repeat(NAME_MAX_LENGTH + 1)));
    }

    #[test]
    fn update_form_data_writes_fields() {
        let mut controller = DepartmentFormController::new(DepartmentForm::new());
        controller.set_entity(Department::new(Some(3), "Fashion"));
        controller.update_form_data();

        assert_eq!(controller.form().id.text(), "3");
        assert_eq!(controller.form().name.text(), "Fashion");
    }

    #[test]
    fn update_form_data_leaves_id_blank_for_new_record() {
        let mut controller = DepartmentFormController::new(DepartmentForm::new());
        controller.set_entity(Department::default());
        controller.update_form_data();

        assert_eq!(controller.form().id.text(), "");
    }

    #[test]
    #[should_panic(expected = "illegal state: entity was not set")]
    fn update_form_data_without_entity_panics() {
        DepartmentFormController::new(DepartmentForm::new()).update_form_data();
    }

    #[test]
    fn save_persists_notifies_and_closes() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_insert()
            .withf(|d| d.name == "Books" && d.id.is_none())
            .times(1)
            .returning(|_| Ok(8));

        let mut controller = controller_with(repo);
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        controller.subscribe_data_change_listener(Rc::new(move || *counter.borrow_mut() += 1));
        controller.set_entity(Department::default());
        controller.update_form_data();
        controller.form_mut().name.set_text("Books");

        let window = RecordingWindow::default();
        let outcome = controller.on_save_action(&window);

        assert_eq!(outcome, SaveOutcome::Saved(Department::new(Some(8), "Books")));
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(window.close_count(), 1);
        assert!(window.alerts().is_empty());
        assert!(controller.entity().is_none());
    }

    #[test]
    fn invalid_save_sets_label_and_stays_open() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_insert().never();

        let mut controller = controller_with(repo);
        controller.set_entity(Department::default());

        let window = RecordingWindow::default();
        let outcome = controller.on_save_action(&window);

        assert!(matches!(outcome, SaveOutcome::Invalid(_)));
        assert_eq!(controller.form().name_error.text(), "Field can't be empty");
        assert_eq!(window.close_count(), 0);

        // Labels without an error are cleared.
        let mut errors = ValidationError::new();
        errors.add_error(Field::Id, "unused");
        controller.form_mut().set_error_messages(&errors);
        assert!(controller.form().name_error.is_empty());
    }

    #[test]
    fn storage_failure_shows_alert_and_keeps_entity() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_update()
            .returning(|_| Err(ApplicationError::storage("duplicate key").into()));

        let mut controller = controller_with(repo);
        let original = Department::new(Some(2), "Electronics");
        controller.set_entity(original.clone());
        controller.update_form_data();
        controller.form_mut().name.set_text("Gadgets");

        let window = RecordingWindow::default();
        let outcome = controller.on_save_action(&window);

        assert!(matches!(outcome, SaveOutcome::Failed(_)));
        assert_eq!(window.close_count(), 0);
        let alerts = window.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Error saving object");
        assert_eq!(alerts[0].content, "duplicate key");
        assert_eq!(controller.entity(), Some(&original));
    }

    #[test]
    #[should_panic(expected = "illegal state: service was not set")]
    fn save_without_service_panics() {
        let mut controller = DepartmentFormController::new(DepartmentForm::new());
        controller.set_entity(Department::default());
        controller.on_save_action(&RecordingWindow::default());
    }

    #[test]
    fn cancel_closes_window() {
        let controller = DepartmentFormController::new(DepartmentForm::new());
        let window = RecordingWindow::default();
        controller.on_cancel_action(&window);
        assert_eq!(window.close_count(), 1);
    }
}
