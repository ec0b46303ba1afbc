//! The compiled-in product catalog.

use eaudumaroc_core::{Availability, Category, Price, Product, ProductId, Region, WaterColor};

use Region::{Agadir, Casablanca, Fes, Marrakech, Rabat, Tanger};

#[allow(clippy::too_many_arguments)]
fn product(
    id: i32,
    name: &str,
    category: Category,
    price: u64,
    availability: Availability,
    water_color: WaterColor,
    description: &str,
    icon: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category,
        price: Price::new(price),
        availability,
        water_color,
        description: description.to_owned(),
        icon: icon.to_owned(),
        original_price: None,
        rating: None,
        review_count: 0,
        features: Vec::new(),
    }
}

fn regions(list: &[Region]) -> Availability {
    Availability::Regions(list.to_vec())
}

/// Every product sold by the storefront, in listing order.
#[must_use]
pub fn builtin_products() -> Vec<Product> {
    use Category::{Accessory, Cartridge, Filter, OsmosisSystem};
    use WaterColor::{Clear, Colored};

    let mut premium = product(
        1,
        "Osmoseur 5 Étapes Premium",
        OsmosisSystem,
        2500,
        regions(&[Casablanca, Rabat, Marrakech]),
        Clear,
        "Système d'osmose inverse 5 étapes pour une eau ultra pure",
        "💧",
    );
    premium.original_price = Some(Price::new(2900));
    premium.rating = Some(4.8);
    premium.review_count = 127;
    premium.features = vec![
        "5 étapes de filtration".to_owned(),
        "Réservoir 12 L".to_owned(),
        "Installation incluse".to_owned(),
    ];

    let mut alkaline = product(
        2,
        "Osmoseur 7 Étapes Alcalin",
        OsmosisSystem,
        3200,
        regions(&[Casablanca, Rabat, Fes, Tanger]),
        Clear,
        "Osmoseur avancé avec minéralisation alcaline",
        "💎",
    );
    alkaline.rating = Some(4.9);
    alkaline.review_count = 84;
    alkaline.features = vec![
        "Minéralisation alcaline".to_owned(),
        "7 étapes de filtration".to_owned(),
    ];

    let mut sediment = product(
        5,
        "Cartouche Sédiment 5 Microns",
        Cartridge,
        80,
        Availability::Everywhere,
        Colored,
        "Cartouche de préfiltration pour eau trouble ou colorée",
        "🔧",
    );
    sediment.original_price = Some(Price::new(100));
    sediment.rating = Some(4.5);
    sediment.review_count = 312;

    vec![
        premium,
        alkaline,
        product(
            3,
            "Filtre à Eau 3 Étapes",
            Filter,
            1200,
            regions(&[Marrakech, Agadir, Fes]),
            Clear,
            "Filtre à eau compact pour éliminer chlore et sédiments",
            "🚰",
        ),
        product(
            4,
            "Filtre Anti-Calcaire",
            Filter,
            1500,
            regions(&[Casablanca, Rabat, Tanger]),
            Clear,
            "Protection contre le calcaire et dépôts minéraux",
            "🛡️",
        ),
        sediment,
        product(
            6,
            "Cartouche Charbon Actif",
            Cartridge,
            120,
            Availability::Everywhere,
            Clear,
            "Élimine goûts, odeurs et chlore",
            "⚙️",
        ),
        product(
            7,
            "Membrane Osmose 75 GPD",
            Cartridge,
            350,
            regions(&[Casablanca, Rabat, Marrakech, Fes]),
            Clear,
            "Membrane haute performance pour osmoseur",
            "🎯",
        ),
        product(
            8,
            "Kit de Nettoyage Complet",
            Accessory,
            200,
            Availability::Everywhere,
            Clear,
            "Kit d'entretien pour systèmes de filtration",
            "🧰",
        ),
        product(
            9,
            "Robinet Designer Chrome",
            Accessory,
            180,
            regions(&[Casablanca, Rabat, Marrakech]),
            Clear,
            "Robinet élégant pour eau filtrée",
            "🚿",
        ),
        product(
            10,
            "Filtre Spécial Eau Colorée",
            Filter,
            1800,
            regions(&[Fes, Marrakech, Agadir]),
            Colored,
            "Solution pour eau trouble, jaune ou brune",
            "🌊",
        ),
        product(
            11,
            "Osmoseur Compact Sous-Évier",
            OsmosisSystem,
            2800,
            regions(&[Casablanca, Rabat, Tanger]),
            Clear,
            "Design compact pour petits espaces",
            "📦",
        ),
        product(
            12,
            "Préfiltre Anti-Impuretés",
            Filter,
            900,
            Availability::Everywhere,
            Colored,
            "Premier niveau de filtration pour eau chargée",
            "🔍",
        ),
    ]
}
