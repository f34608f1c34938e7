//! Phone bill lookup for the monitor warning line.
//!
//! Jobs only call while the phone bill is paid. The flag lives on the first
//! FSM of `Systems/PhoneBills`; any miss along the way means "unknown" and the
//! warning stays hidden.

use crate::host::Host;

pub const SYSTEMS_PATH: &str = "Systems";
pub const PHONE_BILLS_CHILD: &str = "PhoneBills";
pub const PHONE_PAID_VAR: &str = "PhonePaid";

/// `Some(paid)` when the bill FSM could be read
pub fn phone_bill_paid(host: &dyn Host) -> Option<bool> {
    let systems = host.find_object(SYSTEMS_PATH)?;
    let bills = host.find_child(systems, PHONE_BILLS_CHILD)?;
    let fsm = host.first_fsm(bills)?;
    host.bool_var(fsm, PHONE_PAID_VAR)
}

/// Show the warning only when the bill is known to be unpaid
pub fn show_unpaid_warning(host: &dyn Host) -> bool {
    phone_bill_paid(host) == Some(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryFsm, MemoryWorld};

    fn world_with_bill(paid: Option<bool>) -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.insert_object("Systems");
        let fsm = match paid {
            Some(paid) => MemoryFsm::new("Data").flag("PhonePaid", paid),
            None => MemoryFsm::new("Data"),
        };
        world.insert("Systems/PhoneBills", fsm);
        world
    }

    #[test]
    fn test_unpaid_shows_warning() {
        let world = world_with_bill(Some(false));
        assert_eq!(phone_bill_paid(&world), Some(false));
        assert!(show_unpaid_warning(&world));
    }

    #[test]
    fn test_paid_hides_warning() {
        let world = world_with_bill(Some(true));
        assert!(!show_unpaid_warning(&world));
    }

    #[test]
    fn test_missing_pieces_hide_warning() {
        assert_eq!(phone_bill_paid(&MemoryWorld::new()), None);
        assert!(!show_unpaid_warning(&MemoryWorld::new()));

        // FSM present, variable missing
        let world = world_with_bill(None);
        assert_eq!(phone_bill_paid(&world), None);
        assert!(!show_unpaid_warning(&world));

        // Systems present, PhoneBills missing
        let mut world = MemoryWorld::new();
        world.insert_object("Systems");
        assert!(!show_unpaid_warning(&world));
    }
}
