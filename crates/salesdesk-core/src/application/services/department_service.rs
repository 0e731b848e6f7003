//! Department Service - department persistence operations.

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{DepartmentRepository, SellerRepository},
    },
    domain::Department,
    error::SalesdeskResult,
};

/// Service for department records.
pub struct DepartmentService {
    repository: Box<dyn DepartmentRepository>,
    sellers: Option<Box<dyn SellerRepository>>,
}

impl DepartmentService {
    /// Create a new department service.
    pub fn new(repository: Box<dyn DepartmentRepository>) -> Self {
        Self {
            repository,
            sellers: None,
        }
    }

    /// Attach the seller store so that removals can check for references.
    pub fn with_seller_lookup(mut self, sellers: Box<dyn SellerRepository>) -> Self {
        self.sellers = Some(sellers);
        self
    }

    /// All departments, ordered by name.
    pub fn find_all(&self) -> SalesdeskResult<Vec<Department>> {
        self.repository.find_all()
    }

    pub fn find_by_id(&self, id: i32) -> SalesdeskResult<Option<Department>> {
        self.repository.find_by_id(id)
    }

    /// Insert a new department or update an existing one.
    ///
    /// On insert the identity assigned by the store is written back into
    /// `department`.
    #[instrument(skip_all, fields(id = ?department.id))]
    pub fn save_or_update(&self, department: &mut Department) -> SalesdeskResult<()> {
        if department.is_new() {
            let id = self.repository.insert(department)?;
            department.id = Some(id);
            info!(id, name = %department.name, "Department created");
        } else {
            self.repository.update(department)?;
            info!(name = %department.name, "Department updated");
        }
        Ok(())
    }

    /// Remove a department that no seller refers to.
    #[instrument(skip(self))]
    pub fn remove(&self, id: i32) -> SalesdeskResult<()> {
        if let Some(sellers) = &self.sellers {
            let referencing = sellers.find_by_department(id)?;
            if !referencing.is_empty() {
                debug!(count = referencing.len(), "Department still has sellers");
                return Err(ApplicationError::Integrity {
                    message: format!(
                        "department {} is assigned to {} seller(s)",
                        id,
                        referencing.len()
                    ),
                }
                .into());
            }
        }
        self.repository.delete_by_id(id)?;
        info!("Department removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::application::ports::{MockDepartmentRepository, MockSellerRepository};
    use crate::domain::Seller;

    #[test]
    fn new_department_is_inserted_and_receives_id() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(12));
        repo.expect_update().never();

        let service = DepartmentService::new(Box::new(repo));
        let mut department = Department::new(None, "Books");
        service.save_or_update(&mut department).unwrap();

        assert_eq!(department.id, Some(12));
    }

    #[test]
    fn zero_id_counts_as_new() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(1));

        let service = DepartmentService::new(Box::new(repo));
        let mut department = Department::new(Some(0), "Books");
        service.save_or_update(&mut department).unwrap();

        assert_eq!(department.id, Some(1));
    }

    #[test]
    fn existing_department_is_updated() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_insert().never();
        repo.expect_update()
            .withf(|d| d.id == Some(4) && d.name == "Music")
            .times(1)
            .returning(|_| Ok(()));

        let service = DepartmentService::new(Box::new(repo));
        service
            .save_or_update(&mut Department::new(Some(4), "Music"))
            .unwrap();
    }

    #[test]
    fn storage_failure_is_propagated() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_insert()
            .returning(|_| Err(ApplicationError::storage("connection lost").into()));

        let service = DepartmentService::new(Box::new(repo));
        let mut department = Department::new(None, "Books");
        let err = service.save_or_update(&mut department).unwrap_err();

        assert_eq!(err.to_string(), "connection lost");
        assert_eq!(department.id, None);
    }

    #[test]
    fn remove_refuses_referenced_department() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_delete_by_id().never();
        let mut sellers = MockSellerRepository::new();
        sellers
            .expect_find_by_department()
            .with(eq(2))
            .returning(|_| Ok(vec![Seller::default()]));

        let service = DepartmentService::new(Box::new(repo)).with_seller_lookup(Box::new(sellers));
        let err = service.remove(2).unwrap_err();

        assert!(err.to_string().contains("assigned to 1 seller"));
    }

    #[test]
    fn remove_deletes_unreferenced_department() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_delete_by_id()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(()));
        let mut sellers = MockSellerRepository::new();
        sellers
            .expect_find_by_department()
            .returning(|_| Ok(Vec::new()));

        let service = DepartmentService::new(Box::new(repo)).with_seller_lookup(Box::new(sellers));
        service.remove(3).unwrap();
    }
}
