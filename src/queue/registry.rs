//! Customer registry
//!
//! Owns every customer record created during a run. Identities are dense and
//! sequential from 1, so records are stored in a vector indexed by `id - 1`.
//! Nothing is removed until the run is reset.

use crate::queue::Customer;
use crate::types::CustomerId;

/// Exclusive owner of all customer records of a run
#[derive(Debug, Clone, Default)]
pub struct CustomerRegistry {
    customers: Vec<Customer>,
}

impl CustomerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identity and store a new customer arriving at `arrival_time`
    pub fn create(&mut self, arrival_time: f64) -> CustomerId {
        let id = CustomerId(self.customers.len() as u64 + 1);
        self.customers.push(Customer::new(id, arrival_time));
        id
    }

    /// Look up a customer, if registered
    pub fn find(&self, id: CustomerId) -> Option<&Customer> {
        Self::index(id).and_then(|idx| self.customers.get(idx))
    }

    /// Look up a customer that must exist
    ///
    /// # Panics
    /// When `id` was never registered; that is an engine defect.
    pub fn get(&self, id: CustomerId) -> &Customer {
        self.find(id)
            .unwrap_or_else(|| panic!("customer {} is not registered", id))
    }

    /// Mutable lookup of a customer that must exist
    ///
    /// # Panics
    /// When `id` was never registered.
    pub fn get_mut(&mut self, id: CustomerId) -> &mut Customer {
        Self::index(id)
            .and_then(|idx| self.customers.get_mut(idx))
            .unwrap_or_else(|| panic!("customer {} is not registered", id))
    }

    /// Record the service start of a customer (once)
    pub fn mark_service_start(&mut self, id: CustomerId, time: f64) {
        self.get_mut(id).mark_service_start(time);
    }

    /// Record the departure of a customer (once)
    pub fn mark_departure(&mut self, id: CustomerId, time: f64) {
        self.get_mut(id).mark_departure(time);
    }

    /// Number of registered customers
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether no customer has been registered
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// All customers in identity order
    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    /// Customers that have departed
    pub fn departed(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter().filter(|c| c.has_departed())
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.customers.clear();
    }

    fn index(id: CustomerId) -> Option<usize> {
        id.get().checked_sub(1).map(|idx| idx as usize)
    }
}
