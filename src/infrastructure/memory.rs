//! In-memory implementations of the store ports.
//!
//! Backs the service-level tests and local experiments where a database is
//! not required. The single mutex gives the same per-order serialization the
//! Diesel stores get from row locks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::actor::{Actor, ActorRef, NewActor, Role};
use crate::domain::errors::DomainError;
use crate::domain::order::{DeliveryInfo, NewOrder, OrderItemView, OrderView};
use crate::domain::ports::{OrderStore, ProductStore, UserStore};
use crate::domain::product::{Product, ProductInput};
use crate::domain::status::{self, OrderStatus};

#[derive(Debug, Clone)]
struct StoredOrder {
    id: Uuid,
    customer_id: Uuid,
    status: OrderStatus,
    total: bigdecimal::BigDecimal,
    delivery_address: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    items: Vec<OrderItemView>,
}

#[derive(Debug, Clone)]
struct StoredAssignment {
    courier_id: Uuid,
    assigned_at: DateTime<Utc>,
    delivered_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct State {
    users: HashMap<Uuid, Actor>,
    products: HashMap<Uuid, Product>,
    orders: HashMap<Uuid, StoredOrder>,
    assignments: HashMap<Uuid, StoredAssignment>,
}

impl State {
    fn view_of(&self, order: &StoredOrder) -> OrderView {
        let customer_name = self
            .users
            .get(&order.customer_id)
            .map(|u| u.name.clone())
            .unwrap_or_default();
        let delivery = self.assignments.get(&order.id).map(|a| {
            let courier = self.users.get(&a.courier_id);
            DeliveryInfo {
                courier_id: a.courier_id,
                courier_name: courier.map(|c| c.name.clone()).unwrap_or_default(),
                courier_phone: courier.and_then(|c| c.phone.clone()),
                assigned_at: a.assigned_at,
                delivered_at: a.delivered_at,
            }
        });
        OrderView {
            id: order.id,
            customer_id: order.customer_id,
            customer_name,
            status: order.status,
            total: order.total.clone(),
            delivery_address: order.delivery_address.clone(),
            notes: order.notes.clone(),
            created_at: order.created_at,
            items: order.items.clone(),
            delivery,
        }
    }

    fn views_desc<'a, I>(&self, orders: I) -> Vec<OrderView>
    where
        I: Iterator<Item = &'a StoredOrder>,
    {
        let mut views: Vec<OrderView> = orders.map(|o| self.view_of(o)).collect();
        views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        views
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserStore for MemoryStore {
    fn create(&self, new_actor: NewActor) -> Result<Actor, DomainError> {
        let mut state = self.lock();
        if state.users.values().any(|u| u.email == new_actor.email) {
            return Err(DomainError::DuplicateEmail);
        }
        let actor = Actor {
            id: Uuid::new_v4(),
            name: new_actor.name,
            email: new_actor.email,
            phone: new_actor.phone,
            password_hash: new_actor.password_hash,
            role: new_actor.role,
            active: true,
            created_at: Utc::now(),
        };
        state.users.insert(actor.id, actor.clone());
        Ok(actor)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Actor>, DomainError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Actor>, DomainError> {
        Ok(self.lock().users.values().find(|u| u.email == email).cloned())
    }

    fn list_active_by_role(&self, role: Role) -> Result<Vec<Actor>, DomainError> {
        let mut actors: Vec<Actor> = self
            .lock()
            .users
            .values()
            .filter(|u| u.role == role && u.active)
            .cloned()
            .collect();
        actors.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(actors)
    }
}

impl ProductStore for MemoryStore {
    fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            image_url: input.image_url,
            category: input.category,
            available: input.available,
            created_at: now,
            updated_at: now,
        };
        self.lock().products.insert(product.id, product.clone());
        Ok(product)
    }

    fn update(&self, id: Uuid, input: ProductInput) -> Result<Product, DomainError> {
        let mut state = self.lock();
        let product = state
            .products
            .get_mut(&id)
            .ok_or(DomainError::NotFound("Product"))?;
        product.name = input.name;
        product.description = input.description;
        product.price = input.price;
        product.image_url = input.image_url;
        product.category = input.category;
        product.available = input.available;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.lock()
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NotFound("Product"))
    }

    fn toggle_availability(&self, id: Uuid) -> Result<Product, DomainError> {
        let mut state = self.lock();
        let product = state
            .products
            .get_mut(&id)
            .ok_or(DomainError::NotFound("Product"))?;
        product.available = !product.available;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(self.lock().products.get(&id).cloned())
    }

    fn list_all(&self) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<Product> = self.lock().products.values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    fn list_available(&self) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<Product> = self
            .lock()
            .products
            .values()
            .filter(|p| p.available)
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }
}

impl OrderStore for MemoryStore {
    fn create(&self, new_order: NewOrder) -> Result<OrderView, DomainError> {
        let mut state = self.lock();
        let order = StoredOrder {
            id: Uuid::new_v4(),
            customer_id: new_order.customer_id,
            status: OrderStatus::Pending,
            total: new_order.total,
            delivery_address: new_order.delivery_address,
            notes: new_order.notes,
            created_at: Utc::now(),
            items: new_order
                .lines
                .into_iter()
                .map(|line| OrderItemView {
                    id: Uuid::new_v4(),
                    product_id: line.product_id,
                    product_name: line.product_name,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    subtotal: line.subtotal,
                })
                .collect(),
        };
        let view = state.view_of(&order);
        state.orders.insert(order.id, order);
        Ok(view)
    }

    fn find_view(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let state = self.lock();
        Ok(state.orders.get(&id).map(|o| state.view_of(o)))
    }

    fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        let state = self.lock();
        Ok(state.views_desc(
            state
                .orders
                .values()
                .filter(|o| o.customer_id == customer_id),
        ))
    }

    fn list_all(&self) -> Result<Vec<OrderView>, DomainError> {
        let state = self.lock();
        Ok(state.views_desc(state.orders.values()))
    }

    fn list_by_status(&self, status: OrderStatus) -> Result<Vec<OrderView>, DomainError> {
        let state = self.lock();
        Ok(state.views_desc(state.orders.values().filter(|o| o.status == status)))
    }

    fn list_assigned_to(&self, courier_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        let state = self.lock();
        Ok(state.views_desc(state.orders.values().filter(|o| {
            state
                .assignments
                .get(&o.id)
                .is_some_and(|a| a.courier_id == courier_id)
        })))
    }

    fn transition(
        &self,
        order_id: Uuid,
        caller: &ActorRef,
        target: OrderStatus,
    ) -> Result<OrderView, DomainError> {
        let mut state = self.lock();
        let current = state
            .orders
            .get(&order_id)
            .ok_or(DomainError::NotFound("Order"))?
            .status;
        let assigned_courier = state.assignments.get(&order_id).map(|a| a.courier_id);

        status::check_transition(current, target, caller, assigned_courier)?;

        if let Some(order) = state.orders.get_mut(&order_id) {
            order.status = target;
        }
        if target == OrderStatus::Delivered {
            if let Some(assignment) = state.assignments.get_mut(&order_id) {
                assignment.delivered_at = Some(Utc::now());
            }
        }

        let order = state
            .orders
            .get(&order_id)
            .ok_or(DomainError::NotFound("Order"))?;
        Ok(state.view_of(order))
    }

    fn assign_courier(
        &self,
        order_id: Uuid,
        courier: &Actor,
        caller: &ActorRef,
    ) -> Result<OrderView, DomainError> {
        let mut state = self.lock();
        let current = state
            .orders
            .get(&order_id)
            .ok_or(DomainError::NotFound("Order"))?
            .status;

        if state.assignments.contains_key(&order_id) {
            return Err(DomainError::AlreadyAssigned);
        }
        // Validate the forced move before touching anything; the lock makes
        // the check-and-insert atomic.
        if current != OrderStatus::ReadyForDelivery {
            status::check_transition(current, OrderStatus::ReadyForDelivery, caller, None)?;
        }

        state.assignments.insert(
            order_id,
            StoredAssignment {
                courier_id: courier.id,
                assigned_at: Utc::now(),
                delivered_at: None,
            },
        );
        if let Some(order) = state.orders.get_mut(&order_id) {
            order.status = OrderStatus::ReadyForDelivery;
        }

        let order = state
            .orders
            .get(&order_id)
            .ok_or(DomainError::NotFound("Order"))?;
        Ok(state.view_of(order))
    }
}
