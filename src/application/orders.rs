use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::actor::ActorRef;
use crate::domain::errors::DomainError;
use crate::domain::order::{LineRequest, NewOrder, OrderView, PricedLine};
use crate::domain::policy::{self, Action, Resource};
use crate::domain::ports::{OrderStore, ProductStore};
use crate::domain::status::OrderStatus;

/// Ownership context for policy checks against an existing order.
fn resource_of(view: &OrderView) -> Resource {
    Resource::Order {
        owner: view.customer_id,
        courier: view.delivery.as_ref().map(|d| d.courier_id),
    }
}

#[derive(Clone)]
pub struct OrderService<O, P> {
    orders: O,
    products: P,
}

impl<O: OrderStore, P: ProductStore> OrderService<O, P> {
    pub fn new(orders: O, products: P) -> Self {
        Self { orders, products }
    }

    /// Creates an order with the caller as owner, snapshotting each
    /// product's current name and price into the lines. Catalog changes
    /// after this point never touch the order.
    pub fn create_order(
        &self,
        caller: &ActorRef,
        lines: Vec<LineRequest>,
        delivery_address: Option<String>,
        notes: Option<String>,
    ) -> Result<OrderView, DomainError> {
        policy::authorize(caller, Action::CreateOrder, &Resource::None)?;

        if lines.is_empty() {
            return Err(DomainError::InvalidQuantity);
        }

        let mut priced = Vec::with_capacity(lines.len());
        let mut total = BigDecimal::from(0);
        for line in lines {
            if line.quantity < 1 {
                return Err(DomainError::InvalidQuantity);
            }
            let product = self
                .products
                .find_by_id(line.product_id)?
                .ok_or(DomainError::NotFound("Product"))?;
            if !product.available {
                return Err(DomainError::NotAvailable(product.name));
            }

            let subtotal = &product.price * BigDecimal::from(line.quantity);
            total += &subtotal;
            priced.push(PricedLine {
                product_id: product.id,
                product_name: product.name,
                quantity: line.quantity,
                unit_price: product.price,
                subtotal,
            });
        }

        self.orders.create(NewOrder {
            customer_id: caller.id,
            delivery_address,
            notes,
            total,
            lines: priced,
        })
    }

    pub fn get_order(&self, caller: &ActorRef, id: Uuid) -> Result<OrderView, DomainError> {
        let view = self
            .orders
            .find_view(id)?
            .ok_or(DomainError::NotFound("Order"))?;
        policy::authorize(caller, Action::ViewOrder, &resource_of(&view))?;
        Ok(view)
    }

    pub fn my_orders(&self, caller: &ActorRef) -> Result<Vec<OrderView>, DomainError> {
        policy::authorize(caller, Action::ListOwnOrders, &Resource::None)?;
        self.orders.list_for_customer(caller.id)
    }

    pub fn list_all(&self, caller: &ActorRef) -> Result<Vec<OrderView>, DomainError> {
        policy::authorize(caller, Action::ListAllOrders, &Resource::None)?;
        self.orders.list_all()
    }

    pub fn list_by_status(
        &self,
        caller: &ActorRef,
        status: OrderStatus,
    ) -> Result<Vec<OrderView>, DomainError> {
        policy::authorize(caller, Action::ListOrdersByStatus, &Resource::None)?;
        self.orders.list_by_status(status)
    }

    /// Admin-side status update; courier updates go through
    /// `DeliveryService::update_status`.
    pub fn update_status(
        &self,
        caller: &ActorRef,
        order_id: Uuid,
        target: OrderStatus,
    ) -> Result<OrderView, DomainError> {
        policy::authorize(caller, Action::UpdateOrderStatus, &Resource::None)?;
        self.orders.transition(order_id, caller, target)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::domain::actor::{Actor, NewActor, Role};
    use crate::domain::ports::UserStore;
    use crate::domain::product::ProductInput;
    use crate::infrastructure::MemoryStore;

    fn actor_ref(actor: &Actor) -> ActorRef {
        ActorRef {
            id: actor.id,
            role: actor.role,
        }
    }

    fn make_user(store: &MemoryStore, role: Role) -> Actor {
        UserStore::create(
            store,
            NewActor {
                name: format!("{role} user"),
                email: format!("{}@example.com", Uuid::new_v4()),
                phone: None,
                password_hash: "hash".to_string(),
                role,
            },
        )
        .expect("create user failed")
    }

    fn make_product(store: &MemoryStore, price: &str, available: bool) -> Uuid {
        ProductStore::create(
            store,
            ProductInput {
                name: "Tres Leches".to_string(),
                description: None,
                price: BigDecimal::from_str(price).expect("valid decimal"),
                image_url: None,
                category: "Cakes".to_string(),
                available,
            },
        )
        .expect("create product failed")
        .id
    }

    fn service(store: &MemoryStore) -> OrderService<MemoryStore, MemoryStore> {
        OrderService::new(store.clone(), store.clone())
    }

    fn line(product_id: Uuid, quantity: i32) -> LineRequest {
        LineRequest {
            product_id,
            quantity,
        }
    }

    #[test]
    fn totals_are_the_sum_of_snapshotted_subtotals() {
        let store = MemoryStore::new();
        let orders = service(&store);
        let customer = make_user(&store, Role::Customer);
        let a = make_product(&store, "10.00", true);
        let b = make_product(&store, "5.00", true);

        let view = orders
            .create_order(
                &actor_ref(&customer),
                vec![line(a, 2), line(b, 3)],
                Some("123 Baker St".to_string()),
                None,
            )
            .expect("create failed");

        assert_eq!(view.status, OrderStatus::Pending);
        assert_eq!(view.total, BigDecimal::from_str("35.00").unwrap());
        let item_sum: BigDecimal = view.items.iter().map(|i| i.subtotal.clone()).sum();
        assert_eq!(item_sum, view.total);

        // Fetch-by-id returns identical quantities, prices, and total.
        let fetched = orders
            .get_order(&actor_ref(&customer), view.id)
            .expect("get failed");
        assert_eq!(fetched.total, view.total);
        assert_eq!(fetched.items.len(), 2);
        for (created, read) in view.items.iter().zip(fetched.items.iter()) {
            assert_eq!(created.quantity, read.quantity);
            assert_eq!(created.unit_price, read.unit_price);
        }
    }

    #[test]
    fn catalog_price_changes_never_touch_existing_orders() {
        let store = MemoryStore::new();
        let orders = service(&store);
        let customer = make_user(&store, Role::Customer);
        let product_id = make_product(&store, "10.00", true);

        let view = orders
            .create_order(&actor_ref(&customer), vec![line(product_id, 2)], None, None)
            .expect("create failed");

        ProductStore::update(
            &store,
            product_id,
            ProductInput {
                name: "Tres Leches".to_string(),
                description: None,
                price: BigDecimal::from_str("99.00").unwrap(),
                image_url: None,
                category: "Cakes".to_string(),
                available: true,
            },
        )
        .expect("price update failed");

        let fetched = orders
            .get_order(&actor_ref(&customer), view.id)
            .expect("get failed");
        assert_eq!(
            fetched.items[0].unit_price,
            BigDecimal::from_str("10.00").unwrap()
        );
        assert_eq!(fetched.total, BigDecimal::from_str("20.00").unwrap());
    }

    #[test]
    fn create_rejects_empty_and_invalid_lines() {
        let store = MemoryStore::new();
        let orders = service(&store);
        let customer = make_user(&store, Role::Customer);
        let product_id = make_product(&store, "10.00", true);
        let caller = actor_ref(&customer);

        assert!(matches!(
            orders.create_order(&caller, vec![], None, None),
            Err(DomainError::InvalidQuantity)
        ));
        assert!(matches!(
            orders.create_order(&caller, vec![line(product_id, 0)], None, None),
            Err(DomainError::InvalidQuantity)
        ));
    }

    #[test]
    fn create_rejects_missing_and_unavailable_products() {
        let store = MemoryStore::new();
        let orders = service(&store);
        let customer = make_user(&store, Role::Customer);
        let caller = actor_ref(&customer);
        let sold_out = make_product(&store, "4.00", false);

        assert!(matches!(
            orders.create_order(&caller, vec![line(Uuid::new_v4(), 1)], None, None),
            Err(DomainError::NotFound("Product"))
        ));
        assert!(matches!(
            orders.create_order(&caller, vec![line(sold_out, 1)], None, None),
            Err(DomainError::NotAvailable(_))
        ));
    }

    #[test]
    fn customers_read_only_their_own_orders() {
        let store = MemoryStore::new();
        let orders = service(&store);
        let owner = make_user(&store, Role::Customer);
        let other = make_user(&store, Role::Customer);
        let admin = make_user(&store, Role::Admin);
        let product_id = make_product(&store, "10.00", true);

        let view = orders
            .create_order(&actor_ref(&owner), vec![line(product_id, 1)], None, None)
            .expect("create failed");

        assert!(orders.get_order(&actor_ref(&owner), view.id).is_ok());
        assert!(orders.get_order(&actor_ref(&admin), view.id).is_ok());
        assert!(matches!(
            orders.get_order(&actor_ref(&other), view.id),
            Err(DomainError::Forbidden)
        ));
    }

    #[test]
    fn admins_walk_the_preparation_chain_and_cancel() {
        let store = MemoryStore::new();
        let orders = service(&store);
        let customer = make_user(&store, Role::Customer);
        let admin = make_user(&store, Role::Admin);
        let product_id = make_product(&store, "10.00", true);
        let admin_ref = actor_ref(&admin);

        let view = orders
            .create_order(&actor_ref(&customer), vec![line(product_id, 1)], None, None)
            .expect("create failed");

        let view = orders
            .update_status(&admin_ref, view.id, OrderStatus::InPreparation)
            .expect("to in-preparation failed");
        assert_eq!(view.status, OrderStatus::InPreparation);

        let view = orders
            .update_status(&admin_ref, view.id, OrderStatus::Cancelled)
            .expect("cancel failed");
        assert_eq!(view.status, OrderStatus::Cancelled);

        // Terminal; nothing moves out.
        assert!(matches!(
            orders.update_status(&admin_ref, view.id, OrderStatus::Pending),
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn customers_cannot_use_the_admin_surface() {
        let store = MemoryStore::new();
        let orders = service(&store);
        let customer = make_user(&store, Role::Customer);
        let caller = actor_ref(&customer);

        assert!(matches!(
            orders.list_all(&caller),
            Err(DomainError::Forbidden)
        ));
        assert!(matches!(
            orders.update_status(&caller, Uuid::new_v4(), OrderStatus::Cancelled),
            Err(DomainError::Forbidden)
        ));
    }

    #[test]
    fn list_projections_are_newest_first_and_status_scoped() {
        let store = MemoryStore::new();
        let orders = service(&store);
        let customer = make_user(&store, Role::Customer);
        let admin = make_user(&store, Role::Admin);
        let product_id = make_product(&store, "10.00", true);

        let first = orders
            .create_order(&actor_ref(&customer), vec![line(product_id, 1)], None, None)
            .expect("create failed");
        let second = orders
            .create_order(&actor_ref(&customer), vec![line(product_id, 2)], None, None)
            .expect("create failed");

        let mine = orders.my_orders(&actor_ref(&customer)).expect("list failed");
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, second.id);
        assert_eq!(mine[1].id, first.id);

        orders
            .update_status(&actor_ref(&admin), first.id, OrderStatus::InPreparation)
            .expect("transition failed");
        let pending = orders
            .list_by_status(&actor_ref(&admin), OrderStatus::Pending)
            .expect("list failed");
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, second.id);
    }
}
