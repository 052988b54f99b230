use uuid::Uuid;

use crate::domain::actor::{Actor, ActorRef, Role};
use crate::domain::errors::DomainError;
use crate::domain::order::OrderView;
use crate::domain::policy::{self, Action, Resource};
use crate::domain::ports::{OrderStore, UserStore};
use crate::domain::status::OrderStatus;

#[derive(Clone)]
pub struct DeliveryService<O, U> {
    orders: O,
    users: U,
}

impl<O: OrderStore, U: UserStore> DeliveryService<O, U> {
    pub fn new(orders: O, users: U) -> Self {
        Self { orders, users }
    }

    /// Binds a courier to an order and forces it to READY_FOR_DELIVERY.
    /// Admin-only; exactly one assignment can ever exist per order.
    pub fn assign(
        &self,
        caller: &ActorRef,
        order_id: Uuid,
        courier_id: Uuid,
    ) -> Result<OrderView, DomainError> {
        policy::authorize(caller, Action::AssignCourier, &Resource::None)?;

        let courier = self
            .users
            .find_by_id(courier_id)?
            .ok_or(DomainError::NotFound("Courier"))?;
        if courier.role != Role::Courier {
            return Err(DomainError::InvalidRole(format!(
                "User '{}' is not a courier",
                courier.name
            )));
        }

        self.orders.assign_courier(order_id, &courier, caller)
    }

    /// Courier-side status update on an order whose assignment binds the
    /// caller. The store re-checks the binding under its per-order lock; the
    /// policy check here keeps the same decision on every call path.
    pub fn update_status(
        &self,
        caller: &ActorRef,
        order_id: Uuid,
        target: OrderStatus,
    ) -> Result<OrderView, DomainError> {
        let view = self
            .orders
            .find_view(order_id)?
            .ok_or(DomainError::NotFound("Order"))?;
        policy::authorize(
            caller,
            Action::UpdateDeliveryStatus,
            &Resource::Order {
                owner: view.customer_id,
                courier: view.delivery.as_ref().map(|d| d.courier_id),
            },
        )?;
        self.orders.transition(order_id, caller, target)
    }

    pub fn my_assigned(&self, caller: &ActorRef) -> Result<Vec<OrderView>, DomainError> {
        policy::authorize(caller, Action::ListAssignedOrders, &Resource::None)?;
        self.orders.list_assigned_to(caller.id)
    }

    /// Every order with its assignment data joined in, for operational
    /// visibility.
    pub fn all_with_assignments(&self, caller: &ActorRef) -> Result<Vec<OrderView>, DomainError> {
        policy::authorize(caller, Action::ListAssignments, &Resource::None)?;
        self.orders.list_all()
    }

    pub fn courier_roster(&self, caller: &ActorRef) -> Result<Vec<Actor>, DomainError> {
        policy::authorize(caller, Action::ListCouriers, &Resource::None)?;
        self.users.list_active_by_role(Role::Courier)
    }
}
