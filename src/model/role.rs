use std::fmt;

/// One tier of the four-stage supply chain, ordered downstream → upstream.
///
/// Each role's customer is the previous role in `Role::CHAIN` and its
/// supplier is the next one. The Retailer faces external market demand;
/// the Factory draws on unconstrained production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Retailer,
    Distributor,
    Wholesaler,
    Factory,
}

impl Role {
    /// The fixed chain topology, downstream first.
    pub const CHAIN: [Role; 4] = [
        Role::Retailer,
        Role::Distributor,
        Role::Wholesaler,
        Role::Factory,
    ];

    /// The role that places orders with this one, or `None` for the
    /// Retailer (end-customer demand is exogenous).
    pub fn customer(self) -> Option<Role> {
        let idx = self.index();
        if idx == 0 {
            None
        } else {
            Some(Role::CHAIN[idx - 1])
        }
    }

    /// The role this one orders from, or `None` for the Factory
    /// (production is exogenous).
    pub fn supplier(self) -> Option<Role> {
        let idx = self.index();
        if idx == Role::CHAIN.len() - 1 {
            None
        } else {
            Some(Role::CHAIN[idx + 1])
        }
    }

    /// Position in the chain: 0 = Retailer .. 3 = Factory.
    pub fn index(self) -> usize {
        Role::CHAIN.iter().position(|r| *r == self).unwrap_or(0)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Retailer => "Retailer",
            Role::Distributor => "Distributor",
            Role::Wholesaler => "Wholesaler",
            Role::Factory => "Factory",
        }
    }

    /// Parse the stored string form back into a role.
    pub fn parse(s: &str) -> Option<Role> {
        Role::CHAIN.iter().copied().find(|r| r.as_str() == s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_topology() {
        assert_eq!(Role::Retailer.customer(), None);
        assert_eq!(Role::Retailer.supplier(), Some(Role::Distributor));
        assert_eq!(Role::Distributor.customer(), Some(Role::Retailer));
        assert_eq!(Role::Wholesaler.supplier(), Some(Role::Factory));
        assert_eq!(Role::Factory.supplier(), None);
        assert_eq!(Role::Factory.customer(), Some(Role::Wholesaler));
    }

    #[test]
    fn parse_round_trips() {
        for role in Role::CHAIN {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("Supplier"), None);
    }
}
