use crate::model::role::Role;

/// Opaque team identifier handed out by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamId(pub i64);

/// Opaque player identifier handed out by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub i64);

/// A registered team. The join secret is kept in the store and compared
/// there; it is never carried on this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

/// One player occupying one seat of a team's supply chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub team: TeamId,
    pub name: String,
    pub role: Role,
    pub contact: String,
}
