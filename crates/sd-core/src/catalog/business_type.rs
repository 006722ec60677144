//! Business type catalog.

/// A service a business of a given type can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub id: &'static str,
    pub label: &'static str,
}

/// A business category with its fixed sub-catalog of services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessType {
    pub id: &'static str,
    pub label: &'static str,
    pub services: &'static [Service],
}

pub const BUSINESS_TYPES: &[BusinessType] = &[
    BusinessType {
        id: "barbershop",
        label: "Barbershop",
        services: &[
            Service { id: "haircut", label: "Haircut" },
            Service { id: "beard", label: "Beard trim" },
            Service { id: "shave", label: "Hot towel shave" },
            Service { id: "kids_cut", label: "Kids cut" },
        ],
    },
    BusinessType {
        id: "hair_salon",
        label: "Hair salon",
        services: &[
            Service { id: "haircut", label: "Haircut" },
            Service { id: "coloring", label: "Coloring" },
            Service { id: "styling", label: "Styling" },
            Service { id: "treatment", label: "Hair treatment" },
        ],
    },
    BusinessType {
        id: "beauty_salon",
        label: "Beauty salon",
        services: &[
            Service { id: "facial", label: "Facial" },
            Service { id: "makeup", label: "Makeup" },
            Service { id: "waxing", label: "Waxing" },
            Service { id: "lashes", label: "Lash extensions" },
        ],
    },
    BusinessType {
        id: "nail_salon",
        label: "Nail salon",
        services: &[
            Service { id: "manicure", label: "Manicure" },
            Service { id: "pedicure", label: "Pedicure" },
            Service { id: "gel", label: "Gel nails" },
        ],
    },
    BusinessType {
        id: "spa",
        label: "Spa",
        services: &[
            Service { id: "massage", label: "Massage" },
            Service { id: "sauna", label: "Sauna" },
            Service { id: "body_treatment", label: "Body treatment" },
        ],
    },
];

impl BusinessType {
    /// Look up a business type by its identifier.
    pub fn find(id: &str) -> Option<&'static BusinessType> {
        BUSINESS_TYPES.iter().find(|t| t.id == id)
    }

    /// Whether `service_id` belongs to this type's sub-catalog.
    pub fn offers(&self, service_id: &str) -> bool {
        self.services.iter().any(|s| s.id == service_id)
    }
}
