use uuid::Uuid;

use super::actor::{Actor, ActorRef, NewActor, Role};
use super::errors::DomainError;
use super::order::{NewOrder, OrderView};
use super::product::{Product, ProductInput};
use super::status::OrderStatus;

pub trait UserStore: Send + Sync + 'static {
    /// Persists a new actor; a unique-email conflict maps to `DuplicateEmail`.
    fn create(&self, new_actor: NewActor) -> Result<Actor, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Actor>, DomainError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Actor>, DomainError>;
    fn list_active_by_role(&self, role: Role) -> Result<Vec<Actor>, DomainError>;
}

pub trait ProductStore: Send + Sync + 'static {
    fn create(&self, input: ProductInput) -> Result<Product, DomainError>;
    fn update(&self, id: Uuid, input: ProductInput) -> Result<Product, DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    fn toggle_availability(&self, id: Uuid) -> Result<Product, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    fn list_all(&self) -> Result<Vec<Product>, DomainError>;
    fn list_available(&self) -> Result<Vec<Product>, DomainError>;
}

pub trait OrderStore: Send + Sync + 'static {
    /// Persists the order and its lines in one transaction and returns the
    /// assembled view.
    fn create(&self, new_order: NewOrder) -> Result<OrderView, DomainError>;
    fn find_view(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;

    /// All list projections are ordered by creation time, descending.
    fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<OrderView>, DomainError>;
    fn list_all(&self) -> Result<Vec<OrderView>, DomainError>;
    fn list_by_status(&self, status: OrderStatus) -> Result<Vec<OrderView>, DomainError>;
    fn list_assigned_to(&self, courier_id: Uuid) -> Result<Vec<OrderView>, DomainError>;

    /// Applies a status transition under per-order serialization: the
    /// decision (`status::check_transition`) runs against the freshest
    /// status inside the store's transaction. Reaching `Delivered` stamps
    /// the assignment's delivered-at timestamp.
    fn transition(
        &self,
        order_id: Uuid,
        caller: &ActorRef,
        target: OrderStatus,
    ) -> Result<OrderView, DomainError>;

    /// Creates the unique courier binding for an order and forces the order
    /// to `ReadyForDelivery` in the same transaction, validated as a
    /// `caller`-initiated transition. A second assignment attempt fails with
    /// `AlreadyAssigned`, including when two attempts race.
    fn assign_courier(
        &self,
        order_id: Uuid,
        courier: &Actor,
        caller: &ActorRef,
    ) -> Result<OrderView, DomainError>;
}
