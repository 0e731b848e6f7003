//! Seller Service - seller persistence operations.

use tracing::{info, instrument};

use crate::{application::ports::SellerRepository, domain::Seller, error::SalesdeskResult};

/// Service for seller records.
pub struct SellerService {
    repository: Box<dyn SellerRepository>,
}

impl SellerService {
    /// Create a new seller service.
    pub fn new(repository: Box<dyn SellerRepository>) -> Self {
        Self { repository }
    }

    /// All sellers, ordered by name.
    pub fn find_all(&self) -> SalesdeskResult<Vec<Seller>> {
        self.repository.find_all()
    }

    pub fn find_by_id(&self, id: i32) -> SalesdeskResult<Option<Seller>> {
        self.repository.find_by_id(id)
    }

    pub fn find_by_department(&self, department_id: i32) -> SalesdeskResult<Vec<Seller>> {
        self.repository.find_by_department(department_id)
    }

    /// Insert a new seller or update an existing one.
    ///
    /// On insert the identity assigned by the store is written back into
    /// `seller`.
    #[instrument(skip_all, fields(id = ?seller.id))]
    pub fn save_or_update(&self, seller: &mut Seller) -> SalesdeskResult<()> {
        if seller.is_new() {
            let id = self.repository.insert(seller)?;
            seller.id = Some(id);
            info!(id, name = %seller.name, "Seller created");
        } else {
            self.repository.update(seller)?;
            info!(name = %seller.name, "Seller updated");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn remove(&self, id: i32) -> SalesdeskResult<()> {
        self.repository.delete_by_id(id)?;
        info!("Seller removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::application::ports::MockSellerRepository;

    #[test]
    fn new_seller_is_inserted_and_receives_id() {
        let mut repo = MockSellerRepository::new();
        repo.expect_insert()
            .withf(|s| s.name == "Bob Brown")
            .times(1)
            .returning(|_| Ok(7));

        let service = SellerService::new(Box::new(repo));
        let mut seller = Seller {
            name: "Bob Brown".into(),
            email: "bob@gmail.com".into(),
            ..Seller::default()
        };
        service.save_or_update(&mut seller).unwrap();

        assert_eq!(seller.id, Some(7));
    }

    #[test]
    fn existing_seller_is_updated() {
        let mut repo = MockSellerRepository::new();
        repo.expect_insert().never();
        repo.expect_update().times(1).returning(|_| Ok(()));

        let service = SellerService::new(Box::new(repo));
        let mut seller = Seller {
            id: Some(2),
            ..Seller::default()
        };
        service.save_or_update(&mut seller).unwrap();
        assert_eq!(seller.id, Some(2));
    }

    #[test]
    fn remove_delegates_to_store() {
        let mut repo = MockSellerRepository::new();
        repo.expect_delete_by_id()
            .with(eq(9))
            .times(1)
            .returning(|_| Ok(()));

        SellerService::new(Box::new(repo)).remove(9).unwrap();
    }
}
