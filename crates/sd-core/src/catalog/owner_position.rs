//! Owner position catalog.

/// A role the person completing setup can hold in the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerPosition {
    pub id: &'static str,
    pub label: &'static str,
}

pub const OWNER_POSITIONS: &[OwnerPosition] = &[
    OwnerPosition { id: "owner", label: "Owner" },
    OwnerPosition { id: "manager", label: "Manager" },
    OwnerPosition { id: "receptionist", label: "Receptionist" },
    OwnerPosition { id: "stylist", label: "Stylist" },
];

impl OwnerPosition {
    pub fn find(id: &str) -> Option<&'static OwnerPosition> {
        OWNER_POSITIONS.iter().find(|p| p.id == id)
    }
}
