//! Static category catalog for the save-time classification form.

/// Category names with their sub-categories, in display order.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Filters",
        &[
            "Oil Filter",
            "Air Filter",
            "Fuel Filter",
            "Cabin Filter",
            "Transmission Filter",
        ],
    ),
    (
        "Brakes",
        &[
            "Brake Pads",
            "Brake Discs",
            "Brake Sensors",
            "Brake Calipers",
            "Brake Lines",
        ],
    ),
    (
        "Suspension",
        &[
            "Control Arms",
            "Ball Joints",
            "Tie Rod Ends",
            "Bushings",
            "Shock Absorbers",
            "Springs",
            "Wheel Bearings",
        ],
    ),
    (
        "Engine",
        &[
            "Spark Plugs",
            "Ignition Coils",
            "Belts",
            "Tensioners",
            "Gaskets",
            "Sensors",
            "Water Pump",
            "Thermostat",
        ],
    ),
    (
        "Cooling",
        &["Radiator", "Coolant Hoses", "Expansion Tank", "Radiator Fan"],
    ),
    (
        "Electrical",
        &["Starter Motor", "Alternator", "Battery", "Sensors", "Switches"],
    ),
    (
        "Steering",
        &["Tie Rods", "Steering Rack", "Power Steering Pump"],
    ),
    (
        "Transmission",
        &["Clutch Kit", "Flywheel", "Gearbox Mount", "CV Joint", "Drive Shaft"],
    ),
    (
        "Exhaust",
        &["Catalytic Converter", "Muffler", "Exhaust Pipe", "Lambda Sensor"],
    ),
    ("Body", &["Mirrors", "Lights", "Wipers", "Door Parts"]),
];

/// Sub-categories for a category name, if known.
#[must_use]
pub fn sub_categories(category: &str) -> Option<&'static [&'static str]> {
    CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, subs)| *subs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_category_has_sub_categories() {
        let subs = sub_categories("Filters").unwrap();
        assert!(subs.contains(&"Oil Filter"));
    }

    #[test]
    fn unknown_category_returns_none() {
        assert!(sub_categories("Upholstery").is_none());
    }
}
