use uuid::Uuid;

use crate::domain::actor::ActorRef;
use crate::domain::errors::DomainError;
use crate::domain::policy::{self, Action, Resource};
use crate::domain::ports::ProductStore;
use crate::domain::product::{Product, ProductInput};

/// Catalog reads are public; everything that mutates (and the all-products
/// view including hidden items) is admin-only.
#[derive(Clone)]
pub struct CatalogService<P> {
    products: P,
}

impl<P: ProductStore> CatalogService<P> {
    pub fn new(products: P) -> Self {
        Self { products }
    }

    pub fn list_available(&self) -> Result<Vec<Product>, DomainError> {
        self.products.list_available()
    }

    pub fn get(&self, id: Uuid) -> Result<Product, DomainError> {
        self.products
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Product"))
    }

    pub fn list_all(&self, caller: &ActorRef) -> Result<Vec<Product>, DomainError> {
        policy::authorize(caller, Action::ManageCatalog, &Resource::None)?;
        self.products.list_all()
    }

    pub fn create(&self, caller: &ActorRef, input: ProductInput) -> Result<Product, DomainError> {
        policy::authorize(caller, Action::ManageCatalog, &Resource::None)?;
        self.products.create(input)
    }

    pub fn update(
        &self,
        caller: &ActorRef,
        id: Uuid,
        input: ProductInput,
    ) -> Result<Product, DomainError> {
        policy::authorize(caller, Action::ManageCatalog, &Resource::None)?;
        self.products.update(id, input)
    }

    pub fn delete(&self, caller: &ActorRef, id: Uuid) -> Result<(), DomainError> {
        policy::authorize(caller, Action::ManageCatalog, &Resource::None)?;
        self.products.delete(id)
    }

    pub fn toggle_availability(
        &self,
        caller: &ActorRef,
        id: Uuid,
    ) -> Result<Product, DomainError> {
        policy::authorize(caller, Action::ManageCatalog, &Resource::None)?;
        self.products.toggle_availability(id)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::actor::Role;
    use crate::infrastructure::MemoryStore;

    fn caller(role: Role) -> ActorRef {
        ActorRef {
            id: Uuid::new_v4(),
            role,
        }
    }

    fn input(name: &str, available: bool) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: Some("seasonal".to_string()),
            price: BigDecimal::from_str("12.50").unwrap(),
            image_url: None,
            category: "General".to_string(),
            available,
        }
    }

    #[test]
    fn available_listing_hides_unavailable_products() {
        let catalog = CatalogService::new(MemoryStore::new());
        let admin = caller(Role::Admin);
        catalog
            .create(&admin, input("Croissant", true))
            .expect("create failed");
        let hidden = catalog
            .create(&admin, input("Eclair", false))
            .expect("create failed");

        let available = catalog.list_available().expect("list failed");
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name, "Croissant");

        let all = catalog.list_all(&admin).expect("list failed");
        assert_eq!(all.len(), 2);

        let toggled = catalog
            .toggle_availability(&admin, hidden.id)
            .expect("toggle failed");
        assert!(toggled.available);
        assert_eq!(catalog.list_available().expect("list failed").len(), 2);
    }

    #[test]
    fn mutations_require_the_admin_role() {
        let catalog = CatalogService::new(MemoryStore::new());
        let admin = caller(Role::Admin);
        let customer = caller(Role::Customer);
        let product = catalog
            .create(&admin, input("Croissant", true))
            .expect("create failed");

        assert!(matches!(
            catalog.create(&customer, input("Brownie", true)),
            Err(DomainError::Forbidden)
        ));
        assert!(matches!(
            catalog.update(&customer, product.id, input("Croissant", false)),
            Err(DomainError::Forbidden)
        ));
        assert!(matches!(
            catalog.delete(&customer, product.id),
            Err(DomainError::Forbidden)
        ));
        assert!(matches!(
            catalog.list_all(&customer),
            Err(DomainError::Forbidden)
        ));
    }

    #[test]
    fn get_and_delete_surface_not_found() {
        let catalog = CatalogService::new(MemoryStore::new());
        let admin = caller(Role::Admin);

        assert!(matches!(
            catalog.get(Uuid::new_v4()),
            Err(DomainError::NotFound("Product"))
        ));
        assert!(matches!(
            catalog.delete(&admin, Uuid::new_v4()),
            Err(DomainError::NotFound("Product"))
        ));
    }
}
