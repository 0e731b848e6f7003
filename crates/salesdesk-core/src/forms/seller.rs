//! Seller create/edit form.

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, instrument, warn};

use super::{
    controller::{EntityForm, FormController, illegal_state},
    utils::{format_decimal, start_of_day, to_local_date, try_parse_to_double, try_parse_to_int},
    widgets::{ComboBox, Constraint, DatePicker, ErrorLabel, TextField},
};
use crate::{
    application::{DepartmentService, SellerService},
    domain::{Department, EMPTY_FIELD_MESSAGE, Field, Seller, ValidationError, require_text},
    error::SalesdeskResult,
};

/// Longest seller name the form accepts.
pub const NAME_MAX_LENGTH: usize = 70;
/// Longest e-mail address the form accepts.
pub const EMAIL_MAX_LENGTH: usize = 30;

/// Inputs of the seller form.
#[derive(Debug, Clone)]
pub struct SellerForm {
    pub id: TextField,
    pub name: TextField,
    pub email: TextField,
    pub birth_date: DatePicker,
    pub base_salary: TextField,
    pub department: ComboBox<Department>,

    pub name_error: ErrorLabel,
    pub email_error: ErrorLabel,
    pub birth_date_error: ErrorLabel,
    pub base_salary_error: ErrorLabel,
}

impl SellerForm {
    /// Form with the default `dd/mm/yyyy` date pattern.
    pub fn new() -> Self {
        Self::with_date_format(super::utils::DEFAULT_DATE_FORMAT)
    }

    pub fn with_date_format(date_format: impl Into<String>) -> Self {
        Self {
            id: TextField::new().with_constraint(Constraint::Integer),
            name: TextField::new().with_constraint(Constraint::MaxLength(NAME_MAX_LENGTH)),
            email: TextField::new().with_constraint(Constraint::MaxLength(EMAIL_MAX_LENGTH)),
            birth_date: DatePicker::new(date_format),
            base_salary: TextField::new().with_constraint(Constraint::Decimal),
            department: ComboBox::new(|d: &Department| d.name.clone()),
            name_error: ErrorLabel::default(),
            email_error: ErrorLabel::default(),
            birth_date_error: ErrorLabel::default(),
            base_salary_error: ErrorLabel::default(),
        }
    }
}

impl Default for SellerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityForm for SellerForm {
    type Entity = Seller;
    type Services = SellerServices;

    const ENTITY: &'static str = "seller";

    fn get_form_data(&self) -> Result<Seller, ValidationError> {
        let mut errors = ValidationError::new();

        let id = try_parse_to_int(self.id.text());

        require_text(&mut errors, Field::Name, self.name.text());
        let name = self.name.text().to_owned();

        require_text(&mut errors, Field::Email, self.email.text());
        let email = self.email.text().to_owned();

        let birth_date = match self.birth_date.value() {
            Some(date) => Some(start_of_day(date, &Local)),
            None => {
                errors.add_error(Field::BirthDate, EMPTY_FIELD_MESSAGE);
                None
            }
        };

        let salary_text = self.base_salary.text();
        require_text(&mut errors, Field::BaseSalary, salary_text);
        let base_salary = try_parse_to_double(salary_text);
        if base_salary.is_none() && !salary_text.trim().is_empty() {
            warn!(text = salary_text, "Base salary is not a number, storing no value");
        }

        let department = self.department.value().cloned();

        errors.into_result(Seller {
            id,
            name,
            email,
            birth_date,
            base_salary,
            department,
        })
    }

    fn update_form_data(&mut self, seller: &Seller) {
        self.id
            .set_text(seller.id.map(|id| id.to_string()).unwrap_or_default());
        self.name.set_text(seller.name.clone());
        self.email.set_text(seller.email.clone());
        self.base_salary
            .set_text(seller.base_salary.map(format_decimal).unwrap_or_default());
        if let Some(birth_date) = &seller.birth_date {
            self.birth_date
                .set_value(Some(to_local_date(birth_date, &Local)));
        }
        match &seller.department {
            None => self.department.select_first(),
            Some(department) => self.department.set_value(Some(department.clone())),
        }
    }

    fn set_error_messages(&mut self, errors: &ValidationError) {
        let label = |field| errors.get(field).unwrap_or_default();

        self.name_error.set_text(label(Field::Name));
        self.email_error.set_text(label(Field::Email));
        self.base_salary_error.set_text(label(Field::BaseSalary));
        self.birth_date_error.set_text(label(Field::BirthDate));
    }

    fn persist(services: &SellerServices, seller: &mut Seller) -> SalesdeskResult<()> {
        services.sellers.save_or_update(seller)
    }
}

/// Services the seller form needs: one to save sellers, one to list the
/// departments a seller can be assigned to.
#[derive(Clone)]
pub struct SellerServices {
    pub sellers: Arc<SellerService>,
    pub departments: Arc<DepartmentService>,
}

/// Controller for the seller form.
pub type SellerFormController = FormController<SellerForm>;

impl FormController<SellerForm> {
    pub fn set_seller_services(
        &mut self,
        sellers: Arc<SellerService>,
        departments: Arc<DepartmentService>,
    ) {
        self.set_services(SellerServices {
            sellers,
            departments,
        });
    }

    /// Fill the department list from the department service, replacing
    /// whatever it showed before.
    ///
    /// # Panics
    /// Panics if the services were not bound.
    #[instrument(skip_all)]
    pub fn load_associated_objects(&mut self) -> SalesdeskResult<()> {
        let Some(services) = self.services() else {
            illegal_state("department service");
        };
        let departments = services.departments.find_all()?;
        debug!(count = departments.len(), "Departments loaded");
        self.form_mut().department.set_items(departments);
        Ok(())
    }
}
