use uuid::Uuid;

use super::actor::{ActorRef, Role};
use super::errors::DomainError;

/// Order lifecycle states. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    InPreparation,
    ReadyForDelivery,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::InPreparation,
        OrderStatus::ReadyForDelivery,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InPreparation => "IN_PREPARATION",
            OrderStatus::ReadyForDelivery => "READY_FOR_DELIVERY",
            OrderStatus::InTransit => "IN_TRANSIT",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<OrderStatus> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Position in the admin-driven preparation chain
    /// PENDING → IN_PREPARATION → READY_FOR_DELIVERY; `None` outside it.
    fn prep_rank(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::InPreparation => Some(1),
            OrderStatus::ReadyForDelivery => Some(2),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates a status transition for the calling actor.
///
/// Admins move strictly forward within the preparation chain, or cancel any
/// non-terminal order. Couriers move READY_FOR_DELIVERY → IN_TRANSIT →
/// DELIVERED, and only on the order whose assignment binds them; the binding
/// check runs before transition validity, so an unbound courier always gets
/// `Forbidden` rather than a hint about the order's state.
///
/// Every status mutation in the system funnels through this function,
/// including the forced READY_FOR_DELIVERY move during courier assignment.
pub fn check_transition(
    current: OrderStatus,
    target: OrderStatus,
    caller: &ActorRef,
    assigned_courier: Option<Uuid>,
) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidTransition {
        from: current,
        to: target,
    };

    match caller.role {
        Role::Admin => {
            if current.is_terminal() {
                return Err(invalid());
            }
            if target == OrderStatus::Cancelled {
                return Ok(());
            }
            match (current.prep_rank(), target.prep_rank()) {
                (Some(from), Some(to)) if to > from => Ok(()),
                _ => Err(invalid()),
            }
        }
        Role::Courier => {
            if assigned_courier != Some(caller.id) {
                return Err(DomainError::Forbidden);
            }
            match (current, target) {
                (OrderStatus::ReadyForDelivery, OrderStatus::InTransit)
                | (OrderStatus::InTransit, OrderStatus::Delivered) => Ok(()),
                _ => Err(invalid()),
            }
        }
        Role::Customer => Err(DomainError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> ActorRef {
        ActorRef {
            id: Uuid::new_v4(),
            role: Role::Admin,
        }
    }

    fn courier() -> ActorRef {
        ActorRef {
            id: Uuid::new_v4(),
            role: Role::Courier,
        }
    }

    #[test]
    fn parse_round_trips_every_status() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("SHIPPED"), None);
    }

    #[test]
    fn admin_moves_forward_along_preparation_chain() {
        let a = admin();
        for (from, to) in [
            (OrderStatus::Pending, OrderStatus::InPreparation),
            (OrderStatus::Pending, OrderStatus::ReadyForDelivery),
            (OrderStatus::InPreparation, OrderStatus::ReadyForDelivery),
        ] {
            assert!(check_transition(from, to, &a, None).is_ok());
        }
    }

    #[test]
    fn admin_cannot_move_backward_or_into_courier_states() {
        let a = admin();
        for (from, to) in [
            (OrderStatus::InPreparation, OrderStatus::Pending),
            (OrderStatus::ReadyForDelivery, OrderStatus::InPreparation),
            (OrderStatus::ReadyForDelivery, OrderStatus::InTransit),
            (OrderStatus::InTransit, OrderStatus::Delivered),
        ] {
            assert!(matches!(
                check_transition(from, to, &a, None),
                Err(DomainError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn admin_cancels_any_non_terminal_state() {
        let a = admin();
        for from in [
            OrderStatus::Pending,
            OrderStatus::InPreparation,
            OrderStatus::ReadyForDelivery,
            OrderStatus::InTransit,
        ] {
            assert!(check_transition(from, OrderStatus::Cancelled, &a, None).is_ok());
        }
    }

    #[test]
    fn terminal_states_admit_no_transition() {
        let a = admin();
        let c = courier();
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            for to in OrderStatus::ALL {
                assert!(check_transition(from, to, &a, None).is_err());
                assert!(check_transition(from, to, &c, Some(c.id)).is_err());
            }
        }
    }

    #[test]
    fn assigned_courier_walks_delivery_leg() {
        let c = courier();
        assert!(check_transition(
            OrderStatus::ReadyForDelivery,
            OrderStatus::InTransit,
            &c,
            Some(c.id),
        )
        .is_ok());
        assert!(check_transition(
            OrderStatus::InTransit,
            OrderStatus::Delivered,
            &c,
            Some(c.id),
        )
        .is_ok());
    }

    #[test]
    fn unbound_courier_is_forbidden_before_anything_else() {
        let c = courier();
        // Unassigned order: even a transition that would otherwise be valid.
        assert!(matches!(
            check_transition(
                OrderStatus::ReadyForDelivery,
                OrderStatus::InTransit,
                &c,
                None
            ),
            Err(DomainError::Forbidden)
        ));
        // Assigned to someone else.
        assert!(matches!(
            check_transition(
                OrderStatus::ReadyForDelivery,
                OrderStatus::InTransit,
                &c,
                Some(Uuid::new_v4())
            ),
            Err(DomainError::Forbidden)
        ));
    }

    #[test]
    fn courier_cannot_skip_or_cancel() {
        let c = courier();
        for (from, to) in [
            (OrderStatus::ReadyForDelivery, OrderStatus::Delivered),
            (OrderStatus::Pending, OrderStatus::InTransit),
            (OrderStatus::InTransit, OrderStatus::Cancelled),
        ] {
            assert!(matches!(
                check_transition(from, to, &c, Some(c.id)),
                Err(DomainError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn customers_never_transition() {
        let actor = ActorRef {
            id: Uuid::new_v4(),
            role: Role::Customer,
        };
        assert!(matches!(
            check_transition(
                OrderStatus::Pending,
                OrderStatus::Cancelled,
                &actor,
                None
            ),
            Err(DomainError::Forbidden)
        ));
    }
}
