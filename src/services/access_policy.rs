//! Owner-or-staff-or-read-only policy for products.
//!
//! Reads are open to everyone, anonymous callers included. Creating needs an
//! authenticated user. Changing or removing a product needs its owner or a
//! staff user; a product without owner can only be changed by staff.

use crate::models;

pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";
pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn is_safe(&self) -> bool {
        matches!(self, Operation::Read)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Anonymous caller asked for a mutation.
    NotAuthenticated,
    /// Authenticated caller lacks rights on the object.
    Forbidden,
}

/// View-level check, before any object is loaded.
pub fn has_permission(actor: Option<&models::User>, operation: Operation) -> Decision {
    match actor {
        _ if operation.is_safe() => Decision::Allow,
        Some(_) => Decision::Allow,
        None => Decision::NotAuthenticated,
    }
}

/// Object-level check against a loaded product.
pub fn has_object_permission(
    actor: Option<&models::User>,
    operation: Operation,
    product: &models::Product,
) -> Decision {
    if operation.is_safe() {
        return Decision::Allow;
    }

    match actor {
        None => Decision::NotAuthenticated,
        Some(user) if user.is_staff => Decision::Allow,
        Some(user) if product.owner_id == Some(user.id) => Decision::Allow,
        Some(_) => Decision::Forbidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32, is_staff: bool) -> models::User {
        models::User {
            id,
            username: format!("user_{}", id),
            is_staff,
        }
    }

    fn product(owner_id: Option<i32>) -> models::Product {
        models::Product {
            id: 10,
            owner_id,
            ..Default::default()
        }
    }

    #[test]
    fn anyone_can_read() {
        let owned = product(Some(1));
        assert_eq!(has_permission(None, Operation::Read), Decision::Allow);
        assert_eq!(has_object_permission(None, Operation::Read, &owned), Decision::Allow);
        assert_eq!(
            has_object_permission(Some(&user(2, false)), Operation::Read, &owned),
            Decision::Allow
        );
    }

    #[test]
    fn create_requires_authentication() {
        assert_eq!(has_permission(None, Operation::Create), Decision::NotAuthenticated);
        assert_eq!(has_permission(Some(&user(1, false)), Operation::Create), Decision::Allow);
    }

    #[test]
    fn owner_can_mutate() {
        let owned = product(Some(1));
        for op in [Operation::Update, Operation::Delete] {
            assert_eq!(has_object_permission(Some(&user(1, false)), op, &owned), Decision::Allow);
        }
    }

    #[test]
    fn stranger_is_forbidden() {
        let owned = product(Some(1));
        for op in [Operation::Update, Operation::Delete] {
            assert_eq!(
                has_object_permission(Some(&user(2, false)), op, &owned),
                Decision::Forbidden
            );
            assert_eq!(has_object_permission(None, op, &owned), Decision::NotAuthenticated);
        }
    }

    #[test]
    fn staff_can_mutate_anything() {
        for owner in [Some(1), None] {
            let p = product(owner);
            assert_eq!(
                has_object_permission(Some(&user(5, true)), Operation::Delete, &p),
                Decision::Allow
            );
        }
    }

    #[test]
    fn ownerless_product_is_staff_only() {
        let orphan = product(None);
        assert_eq!(
            has_object_permission(Some(&user(1, false)), Operation::Update, &orphan),
            Decision::Forbidden
        );
    }
}
