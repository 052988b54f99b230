//! Central authorization table: (role, action, ownership) → allow/deny.
//!
//! Every application-service operation calls [`authorize`] before touching
//! state, so the same decision is made whether a request came through the
//! HTTP layer or one service invoked another.

use uuid::Uuid;

use super::actor::{ActorRef, Role};
use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateOrder,
    ViewOrder,
    ListOwnOrders,
    ListAllOrders,
    ListOrdersByStatus,
    UpdateOrderStatus,
    UpdateDeliveryStatus,
    ListAssignedOrders,
    AssignCourier,
    ListAssignments,
    ListCouriers,
    BrowseCatalog,
    ManageCatalog,
}

/// What the action is aimed at, for ownership-scoped actions.
#[derive(Debug, Clone, Copy)]
pub enum Resource {
    None,
    Order {
        owner: Uuid,
        courier: Option<Uuid>,
    },
}

fn allowed_actions(role: Role) -> &'static [Action] {
    match role {
        Role::Customer => &[
            Action::CreateOrder,
            Action::ViewOrder,
            Action::ListOwnOrders,
            Action::BrowseCatalog,
        ],
        Role::Courier => &[
            Action::ViewOrder,
            Action::UpdateDeliveryStatus,
            Action::ListAssignedOrders,
            Action::BrowseCatalog,
        ],
        Role::Admin => &[
            Action::ViewOrder,
            Action::ListAllOrders,
            Action::ListOrdersByStatus,
            Action::UpdateOrderStatus,
            Action::AssignCourier,
            Action::ListAssignments,
            Action::ListCouriers,
            Action::BrowseCatalog,
            Action::ManageCatalog,
        ],
    }
}

/// Customers act only on orders they own; couriers only on orders whose
/// assignment binds them. Admin access is not ownership-scoped.
fn owns(actor: &ActorRef, resource: &Resource) -> bool {
    match (actor.role, resource) {
        (Role::Admin, _) => true,
        (_, Resource::None) => true,
        (Role::Customer, Resource::Order { owner, .. }) => *owner == actor.id,
        (Role::Courier, Resource::Order { courier, .. }) => *courier == Some(actor.id),
    }
}

pub fn authorize(
    actor: &ActorRef,
    action: Action,
    resource: &Resource,
) -> Result<(), DomainError> {
    if !allowed_actions(actor.role).contains(&action) {
        return Err(DomainError::Forbidden);
    }
    if !owns(actor, resource) {
        return Err(DomainError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role) -> ActorRef {
        ActorRef {
            id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn customers_create_orders_admins_do_not() {
        assert!(authorize(&actor(Role::Customer), Action::CreateOrder, &Resource::None).is_ok());
        assert!(authorize(&actor(Role::Admin), Action::CreateOrder, &Resource::None).is_err());
        assert!(authorize(&actor(Role::Courier), Action::CreateOrder, &Resource::None).is_err());
    }

    #[test]
    fn customer_views_only_own_orders() {
        let customer = actor(Role::Customer);
        let own = Resource::Order {
            owner: customer.id,
            courier: None,
        };
        let foreign = Resource::Order {
            owner: Uuid::new_v4(),
            courier: None,
        };
        assert!(authorize(&customer, Action::ViewOrder, &own).is_ok());
        assert!(matches!(
            authorize(&customer, Action::ViewOrder, &foreign),
            Err(DomainError::Forbidden)
        ));
    }

    #[test]
    fn courier_scoped_to_assigned_orders() {
        let courier = actor(Role::Courier);
        let assigned = Resource::Order {
            owner: Uuid::new_v4(),
            courier: Some(courier.id),
        };
        let other = Resource::Order {
            owner: Uuid::new_v4(),
            courier: Some(Uuid::new_v4()),
        };
        let unassigned = Resource::Order {
            owner: Uuid::new_v4(),
            courier: None,
        };
        assert!(authorize(&courier, Action::UpdateDeliveryStatus, &assigned).is_ok());
        assert!(authorize(&courier, Action::UpdateDeliveryStatus, &other).is_err());
        assert!(authorize(&courier, Action::UpdateDeliveryStatus, &unassigned).is_err());
    }

    #[test]
    fn admin_surface_is_admin_only() {
        for action in [
            Action::ListAllOrders,
            Action::UpdateOrderStatus,
            Action::AssignCourier,
            Action::ListAssignments,
            Action::ListCouriers,
            Action::ManageCatalog,
        ] {
            assert!(authorize(&actor(Role::Admin), action, &Resource::None).is_ok());
            assert!(authorize(&actor(Role::Customer), action, &Resource::None).is_err());
            assert!(authorize(&actor(Role::Courier), action, &Resource::None).is_err());
        }
    }

    #[test]
    fn admin_views_any_order() {
        let any = Resource::Order {
            owner: Uuid::new_v4(),
            courier: None,
        };
        assert!(authorize(&actor(Role::Admin), Action::ViewOrder, &any).is_ok());
    }
}
