//! Integration tests for salesdesk-core: both forms driven through the
//! public API against a small in-test store.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    sync::{Arc, Mutex},
};

use chrono::NaiveDate;
use salesdesk_core::prelude::*;

#[derive(Default)]
struct Table<T> {
    rows: Mutex<Vec<T>>,
}

type DepartmentTable = Arc<Table<Department>>;
type SellerTable = Arc<Table<Seller>>;

struct Departments(DepartmentTable);
struct Sellers(SellerTable);

impl DepartmentRepository for Departments {
    fn insert(&self, department: &Department) -> SalesdeskResult<i32> {
        let mut rows = self.0.rows.lock().unwrap();
        let id = rows.len() as i32 + 1;
        rows.push(Department {
            id: Some(id),
            ..department.clone()
        });
        Ok(id)
    }

    fn update(&self, department: &Department) -> SalesdeskResult<()> {
        let mut rows = self.0.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|d| d.id == department.id)
            .ok_or_else(|| ApplicationError::storage("no such row"))?;
        *row = department.clone();
        Ok(())
    }

    fn delete_by_id(&self, id: i32) -> SalesdeskResult<()> {
        self.0.rows.lock().unwrap().retain(|d| d.id != Some(id));
        Ok(())
    }

    fn find_by_id(&self, id: i32) -> SalesdeskResult<Option<Department>> {
        Ok(self
            .0
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == Some(id))
            .cloned())
    }

    fn find_all(&self) -> SalesdeskResult<Vec<Department>> {
        let mut all = self.0.rows.lock().unwrap().clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

impl SellerRepository for Sellers {
    fn insert(&self, seller: &Seller) -> SalesdeskResult<i32> {
        let mut rows = self.0.rows.lock().unwrap();
        let id = rows.len() as i32 + 1;
        rows.push(Seller {
            id: Some(id),
            ..seller.clone()
        });
        Ok(id)
    }

    fn update(&self, seller: &Seller) -> SalesdeskResult<()> {
        let mut rows = self.0.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id == seller.id)
            .ok_or_else(|| ApplicationError::storage("no such row"))?;
        *row = seller.clone();
        Ok(())
    }

    fn delete_by_id(&self, id: i32) -> SalesdeskResult<()> {
        self.0.rows.lock().unwrap().retain(|s| s.id != Some(id));
        Ok(())
    }

    fn find_by_id(&self, id: i32) -> SalesdeskResult<Option<Seller>> {
        Ok(self
            .0
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == Some(id))
            .cloned())
    }

    fn find_all(&self) -> SalesdeskResult<Vec<Seller>> {
        Ok(self.0.rows.lock().unwrap().clone())
    }

    fn find_by_department(&self, department_id: i32) -> SalesdeskResult<Vec<Seller>> {
        Ok(self
            .0
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.department_id() == Some(department_id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct Window {
    closed: Cell<bool>,
    alerts: RefCell<Vec<Alert>>,
}

impl FormWindow for Window {
    fn close(&self) {
        self.closed.set(true);
    }

    fn show_alert(&self, alert: &Alert) {
        self.alerts.borrow_mut().push(alert.clone());
    }
}

fn department_service(table: &DepartmentTable, sellers: &SellerTable) -> Arc<DepartmentService> {
    Arc::new(
        DepartmentService::new(Box::new(Departments(Arc::clone(table))))
            .with_seller_lookup(Box::new(Sellers(Arc::clone(sellers)))),
    )
}

#[test]
fn create_department_then_assign_seller() {
    let department_rows = DepartmentTable::default();
    let seller_rows = SellerTable::default();
    let departments = department_service(&department_rows, &seller_rows);
    let sellers = Arc::new(SellerService::new(Box::new(Sellers(Arc::clone(&seller_rows)))));

    // Department form: create "Books".
    let refreshed = Rc::new(Cell::new(0));
    let mut department_form = DepartmentFormController::new(DepartmentForm::new());
    department_form.set_department_service(Arc::clone(&departments));
    let counter = Rc::clone(&refreshed);
    department_form.subscribe_data_change_listener(Rc::new(move || counter.set(counter.get() + 1)));
    department_form.set_entity(Department::default());
    department_form.update_form_data();
    department_form.form_mut().name.set_text("Books");

    let window = Window::default();
    assert!(department_form.on_save_action(&window).is_saved());
    assert!(window.closed.get());
    assert_eq!(refreshed.get(), 1);

    // Seller form: new seller defaults to the first department.
    let mut seller_form = SellerFormController::new(SellerForm::new());
    seller_form.set_seller_services(Arc::clone(&sellers), Arc::clone(&departments));
    seller_form.load_associated_objects().unwrap();
    seller_form.set_entity(Seller::default());
    seller_form.update_form_data();

    let form = seller_form.form_mut();
    assert_eq!(form.department.button_text(), "Books");
    form.name.set_text("Bob Brown");
    form.email.set_text("bob@gmail.com");
    form.birth_date.set_text("21/04/1998").unwrap();
    form.base_salary.set_text("1000.00");

    let window = Window::default();
    let SaveOutcome::Saved(seller) = seller_form.on_save_action(&window) else {
        panic!("seller should have been saved");
    };
    assert_eq!(seller.id, Some(1));
    assert_eq!(seller.department_id(), Some(1));

    // The department cannot be removed while Bob works there.
    assert!(departments.remove(1).is_err());

    // Edit the seller: the form shows the stored values.
    let mut edit = SellerFormController::new(SellerForm::new());
    edit.set_seller_services(Arc::clone(&sellers), Arc::clone(&departments));
    edit.load_associated_objects().unwrap();
    edit.set_entity(sellers.find_by_id(1).unwrap().unwrap());
    edit.update_form_data();

    let form = edit.form();
    assert_eq!(form.id.text(), "1");
    assert_eq!(form.base_salary.text(), "1000.00");
    assert_eq!(form.birth_date.value(), NaiveDate::from_ymd_opt(1998, 4, 21));
    assert_eq!(form.birth_date.text(), "21/04/1998");

    edit.form_mut().base_salary.set_text("1250.5");
    assert!(edit.on_save_action(&Window::default()).is_saved());
    assert_eq!(
        sellers.find_by_id(1).unwrap().unwrap().base_salary,
        Some(1250.5)
    );
    assert_eq!(sellers.find_all().unwrap().len(), 1);
}

#[test]
fn failed_update_reports_through_alert() {
    let department_rows = DepartmentTable::default();
    let seller_rows = SellerTable::default();
    let departments = department_service(&department_rows, &seller_rows);

    let mut controller = DepartmentFormController::new(DepartmentForm::new());
    controller.set_department_service(departments);
    // Id 42 was never stored, so the update is rejected by the store.
    controller.set_entity(Department::new(Some(42), "Ghost"));
    controller.update_form_data();

    let window = Window::default();
    let outcome = controller.on_save_action(&window);

    assert!(matches!(outcome, SaveOutcome::Failed(_)));
    assert!(!window.closed.get());
    let alerts = window.alerts.borrow();
    assert_eq!(alerts[0].title, "Error saving object");
    assert_eq!(alerts[0].content, "no such row");
    assert_eq!(alerts[0].kind, AlertKind::Error);
}
